//! A single canvas session: the graph plus every gesture controller acting on it.
//!
//! All pointer input arrives here in canvas-local screen coordinates. The
//! session decides whether a press grabs a vertex or starts a pan, so the
//! two gestures can never run at the same time.

use crate::config::CanvasConfig;
use crate::drag::NodeDragController;
use crate::geometry::{self, EdgeSegment};
use crate::graph::GraphStore;
use crate::placement::{DropController, DropOutcome};
use crate::types::*;
use crate::viewport::{ViewportController, ViewportFrame, ZoomDirection};
use eframe::egui;

/// Which gesture a pointer press started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressTarget {
    /// A vertex was grabbed
    Vertex(VertexId),
    /// The background was grabbed; the viewport pans
    Background,
    /// A gesture was already running; the press was ignored
    Ignored,
}

/// Owns the graph, viewport, drag, hover and drop state of one canvas.
#[derive(Debug, Clone)]
pub struct CanvasSession {
    graph: GraphStore,
    viewport: ViewportController,
    drag: NodeDragController,
    drops: DropController,
    hovered: Option<VertexId>,
    vertex_radius: f32,
    edge_spacing: f32,
}

impl Default for CanvasSession {
    fn default() -> Self {
        Self::new(&CanvasConfig::default())
    }
}

impl CanvasSession {
    /// Creates an empty session from configuration.
    pub fn new(config: &CanvasConfig) -> Self {
        Self {
            graph: GraphStore::new(),
            viewport: ViewportController::new(config.zoom_limits()),
            drag: NodeDragController::default(),
            drops: DropController::new(config.highlight_secs),
            hovered: None,
            vertex_radius: config.vertex_radius,
            edge_spacing: config.parallel_edge_spacing,
        }
    }

    /// The graph.
    pub fn graph(&self) -> &GraphStore {
        &self.graph
    }

    /// The viewport controller.
    pub fn viewport(&self) -> &ViewportController {
        &self.viewport
    }

    /// The vertex drag controller.
    pub fn drag(&self) -> &NodeDragController {
        &self.drag
    }

    /// The drop controller.
    pub fn drops(&self) -> &DropController {
        &self.drops
    }

    /// The vertex under the pointer, if any.
    pub fn hovered(&self) -> Option<VertexId> {
        self.hovered
    }

    /// Updates the visible canvas size.
    pub fn set_frame_size(&mut self, size: egui::Vec2) {
        self.viewport.set_frame(ViewportFrame { size });
    }

    /// Current radius of a vertex in world units.
    pub fn radius_of(&self, id: VertexId) -> f32 {
        geometry::vertex_radius(
            self.vertex_radius,
            self.drag.dragging() == Some(id),
            self.hovered == Some(id),
        )
    }

    /// Finds the topmost vertex whose circle contains a canvas-local screen point.
    pub fn vertex_at(&self, screen_pos: egui::Pos2) -> Option<VertexId> {
        let world_pos = self.viewport.screen_to_world(screen_pos);
        self.graph
            .vertices()
            .iter()
            .rev()
            .find(|v| v.position.distance(world_pos) <= self.radius_of(v.id))
            .map(|v| v.id)
    }

    /// Handles a primary-button press.
    ///
    /// A press on a vertex starts a vertex drag and never a pan. A press on
    /// the background starts a pan. Presses while either gesture is active
    /// are ignored.
    pub fn pointer_down(&mut self, screen_pos: egui::Pos2) -> PressTarget {
        if self.drag.is_dragging() || self.viewport.is_panning() {
            return PressTarget::Ignored;
        }
        match self.vertex_at(screen_pos) {
            Some(id) => {
                let Some(vertex) = self.graph.vertex(id) else {
                    return PressTarget::Ignored;
                };
                let pointer_world = self.viewport.screen_to_world(screen_pos);
                self.drag.begin(id, vertex.position, pointer_world);
                self.hovered = None;
                log::debug!("Grabbed vertex {}", id);
                PressTarget::Vertex(id)
            }
            None => {
                self.viewport.begin_pan(screen_pos);
                PressTarget::Background
            }
        }
    }

    /// Handles pointer motion: moves the held vertex, pans, or updates hover.
    pub fn pointer_move(&mut self, screen_pos: egui::Pos2) {
        if self.drag.is_dragging() {
            let pointer_world = self.viewport.screen_to_world(screen_pos);
            if let Some((id, position)) = self.drag.drag_to(pointer_world) {
                self.graph.update_vertex_position(id, position);
            }
        } else if !self.viewport.pan_move(screen_pos) {
            self.hovered = self.vertex_at(screen_pos);
        }
    }

    /// Handles primary-button release, ending whichever gesture was active.
    pub fn pointer_up(&mut self) {
        if let Some(id) = self.drag.end() {
            log::debug!("Released vertex {}", id);
        }
        self.viewport.end_pan();
    }

    /// Handles the pointer leaving the canvas.
    ///
    /// Ends a pan. A vertex drag keeps the pointer captured and continues.
    pub fn pointer_left(&mut self) {
        self.viewport.end_pan();
        self.hovered = None;
    }

    /// Zooms one step about the pointer.
    pub fn wheel(&mut self, anchor: egui::Pos2, direction: ZoomDirection) -> bool {
        self.viewport.zoom_at(anchor, direction)
    }

    /// Zooms one step in about the canvas center.
    pub fn zoom_in(&mut self) -> bool {
        self.viewport.zoom_in()
    }

    /// Zooms one step out about the canvas center.
    pub fn zoom_out(&mut self) -> bool {
        self.viewport.zoom_out()
    }

    /// Restores zoom 1 and zero pan.
    pub fn reset_view(&mut self) {
        self.viewport.reset();
    }

    /// Records a unit picked up from the palette.
    pub fn begin_unit_drag(&mut self, unit: Unit) {
        self.drops.begin(unit);
    }

    /// Forgets the pending unit, e.g. when it was released outside the canvas.
    pub fn cancel_unit_drag(&mut self) {
        self.drops.cancel();
    }

    /// Drops the pending unit at a canvas-local position.
    pub fn drop_pending(&mut self, screen_pos: egui::Pos2, now: f64) -> DropOutcome {
        self.drops
            .drop_pending(screen_pos, now, &mut self.graph, &mut self.viewport)
    }

    /// Drops a unit carried by the gesture at a canvas-local position.
    pub fn drop_unit(&mut self, unit: Unit, screen_pos: egui::Pos2, now: f64) -> DropOutcome {
        self.drops
            .drop_unit(unit, screen_pos, now, &mut self.graph, &mut self.viewport)
    }

    /// Advances timed state.
    ///
    /// # Returns
    ///
    /// `true` if something changed and the canvas needs a repaint
    pub fn tick(&mut self, now: f64) -> bool {
        self.drops.tick(now)
    }

    /// The highlighted vertex at time `now`.
    pub fn highlighted(&self, now: f64) -> Option<VertexId> {
        self.drops.highlight().highlighted(now)
    }

    /// World-space geometry of every drawable edge.
    pub fn edge_geometry(&self) -> Vec<(EdgeId, EdgeSegment)> {
        geometry::edge_geometry(
            self.graph.vertices(),
            self.graph.edges(),
            self.edge_spacing,
            |id| self.radius_of(id),
        )
    }
}
