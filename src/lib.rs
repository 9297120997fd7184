//! # Unit Canvas
//!
//! An interactive graph canvas for team planning. Units are dragged from a
//! searchable palette onto a pannable, zoomable canvas, and every newly
//! placed unit is linked automatically to the units already there that
//! share one of its traits.
//!
//! ## Features
//! - Pan by dragging the background, zoom with the wheel or the zoom buttons
//! - Reposition placed units by dragging them
//! - One labelled edge per shared trait, fanned out when a pair shares several
//! - Dropping a unit that is already placed re-centers and highlights it
//! - Search champions and traits, then filter the palette by the selection
//!
//! The engine modules ([`viewport`], [`drag`], [`graph`], [`autolink`],
//! [`placement`], [`geometry`], [`session`], [`search`]) have no rendering
//! dependency beyond egui's point and vector types and can be driven
//! directly.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod autolink;
pub mod config;
pub mod constants;
pub mod drag;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod placement;
pub mod search;
pub mod session;
mod types;
mod ui;
pub mod viewport;

// Re-export public types and functions
pub use config::CanvasConfig;
pub use error::{AppError, CatalogError, ConfigError};
pub use session::CanvasSession;
pub use types::*;
pub use ui::{CanvasApp, LayoutState};

use eframe::egui;
use search::{HttpCatalog, StaticCatalog, UnitCatalog};
use std::sync::Arc;

/// Builds the catalog selected by the configuration.
///
/// # Returns
///
/// The demo catalog when `offline` is set, otherwise an HTTP client for
/// `api_base_url`.
pub fn catalog_for(config: &CanvasConfig) -> Result<Arc<dyn UnitCatalog>, CatalogError> {
    if config.offline {
        log::info!("Running offline with the built-in demo roster");
        Ok(Arc::new(StaticCatalog::demo()))
    } else {
        log::info!("Using unit catalog at {}", config.api_base_url);
        Ok(Arc::new(HttpCatalog::new(config.api_base_url.clone())?))
    }
}

/// Runs the unit canvas application.
///
/// This function validates the configuration, creates the catalog client,
/// opens the native window and blocks until it is closed.
///
/// # Arguments
///
/// * `config` - Application settings
/// * `runtime` - Handle of the tokio runtime that catalog calls run on
///
/// # Example
///
/// ```no_run
/// use unit_canvas::{run_app, AppError, CanvasConfig};
///
/// fn main() -> Result<(), AppError> {
///     let runtime = tokio::runtime::Runtime::new()?;
///     run_app(CanvasConfig::default(), runtime.handle().clone())
/// }
/// ```
pub fn run_app(config: CanvasConfig, runtime: tokio::runtime::Handle) -> Result<(), AppError> {
    config.validate()?;
    let catalog = catalog_for(&config)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Unit Canvas")
            .with_inner_size([1280.0, 820.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Unit Canvas",
        options,
        Box::new(move |cc| {
            let mut app = CanvasApp::new(&config, catalog, runtime);
            app.search.set_repaint_context(cc.egui_ctx.clone());
            Ok(Box::new(app))
        }),
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offline_config_selects_demo_catalog() {
        let config = CanvasConfig {
            offline: true,
            ..Default::default()
        };
        let catalog = catalog_for(&config).unwrap();
        let rt = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();
        let units = rt.block_on(catalog.filter(&[], &[])).unwrap();
        assert_eq!(units.len(), search::demo_roster().len());
    }

    #[test]
    fn invalid_config_is_rejected_before_opening_a_window() {
        let rt = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();
        let config = CanvasConfig {
            min_zoom: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            run_app(config, rt.handle().clone()),
            Err(AppError::Config(ConfigError::ZoomRange { .. }))
        ));
    }
}
