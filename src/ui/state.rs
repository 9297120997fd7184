//! Application state for the desktop front end.
//!
//! The engine state lives in [`CanvasSession`] and [`SearchPipeline`]; this
//! module only adds what the widgets need between frames.

use crate::config::CanvasConfig;
use crate::search::{SearchPipeline, UnitCatalog};
use crate::session::CanvasSession;
use eframe::egui;
use std::sync::Arc;

/// Screen rectangles remembered from the previous frame.
///
/// Used for hit tests that must run before the panels are laid out again.
#[derive(Debug, Clone, Default)]
pub struct LayoutState {
    /// Rectangle of the canvas widget
    pub canvas_rect: Option<egui::Rect>,
    /// Rectangle of the search panel, for dismissing suggestions
    pub search_panel_rect: Option<egui::Rect>,
    /// Rectangle of the zoom controls overlay
    pub zoom_controls_rect: Option<egui::Rect>,
}

/// Main application struct tying the canvas session to the search pipeline.
pub struct CanvasApp {
    /// Graph, viewport and gesture state
    pub session: CanvasSession,
    /// Search and filter state plus the catalog driver
    pub search: SearchPipeline,
    /// Rectangles from the last frame
    pub layout: LayoutState,
    /// Text edit buffer mirroring the search query
    pub query_input: String,
    /// Whether the background grid is drawn
    pub show_grid: bool,
}

impl CanvasApp {
    /// Creates the app and fetches the initial unit list.
    ///
    /// # Arguments
    ///
    /// * `config` - Validated configuration
    /// * `catalog` - Where search and filter calls go
    /// * `runtime` - Runtime that catalog calls are spawned on
    pub fn new(
        config: &CanvasConfig,
        catalog: Arc<dyn UnitCatalog>,
        runtime: tokio::runtime::Handle,
    ) -> Self {
        let mut search = SearchPipeline::new(catalog, runtime, config.search_debounce_secs());
        search.start();
        Self {
            session: CanvasSession::new(config),
            search,
            layout: LayoutState::default(),
            query_input: String::new(),
            show_grid: true,
        }
    }

    /// Converts a world position to an absolute screen position.
    pub fn world_to_screen(&self, canvas_rect: egui::Rect, world_pos: egui::Pos2) -> egui::Pos2 {
        canvas_rect.min + self.session.viewport().world_to_screen(world_pos).to_vec2()
    }
}
