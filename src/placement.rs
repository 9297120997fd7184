//! Drop handling: turns a palette drop into either a new linked vertex or a
//! re-focus on the vertex that already carries the dropped unit.

use crate::autolink;
use crate::constants::HIGHLIGHT_DURATION_SECS;
use crate::graph::GraphStore;
use crate::types::*;
use crate::viewport::ViewportController;
use eframe::egui;

/// One-shot highlight cue on a single vertex.
///
/// Time is passed in by the caller (seconds since an arbitrary epoch, such
/// as egui's `InputState::time`) so the timer is testable without a clock.
/// Triggering again replaces the current cue and restarts the countdown.
#[derive(Debug, Clone, PartialEq)]
pub struct HighlightTimer {
    duration: f64,
    active: Option<(VertexId, f64)>,
}

impl Default for HighlightTimer {
    fn default() -> Self {
        Self::new(HIGHLIGHT_DURATION_SECS)
    }
}

impl HighlightTimer {
    /// Creates an idle timer whose cues last `duration` seconds.
    pub fn new(duration: f64) -> Self {
        Self {
            duration,
            active: None,
        }
    }

    /// Highlights `id` until `now + duration`, replacing any running cue.
    pub fn trigger(&mut self, id: VertexId, now: f64) {
        self.active = Some((id, now + self.duration));
    }

    /// Clears the cue once it has expired.
    ///
    /// # Returns
    ///
    /// `true` if a cue was cleared by this call
    pub fn tick(&mut self, now: f64) -> bool {
        match self.active {
            Some((_, expires_at)) if now >= expires_at => {
                self.active = None;
                true
            }
            _ => false,
        }
    }

    /// The highlighted vertex at time `now`, if any.
    pub fn highlighted(&self, now: f64) -> Option<VertexId> {
        self.active
            .filter(|(_, expires_at)| now < *expires_at)
            .map(|(id, _)| id)
    }

    /// Seconds until the running cue expires, or `None` when idle.
    pub fn remaining(&self, now: f64) -> Option<f64> {
        self.active.map(|(_, expires_at)| (expires_at - now).max(0.0))
    }
}

/// Result of a drop.
#[derive(Debug, Clone, PartialEq)]
pub enum DropOutcome {
    /// A new vertex was placed and linked
    Placed {
        /// The new vertex
        vertex: VertexId,
        /// Number of auto-link edges created for it
        edges: usize,
    },
    /// The unit was already on the canvas; the view moved to it instead
    Refocused {
        /// The existing vertex now centered and highlighted
        vertex: VertexId,
    },
    /// Nothing was being dragged
    NoPayload,
}

/// Holds the unit currently dragged out of the palette and applies drops.
#[derive(Debug, Clone, Default)]
pub struct DropController {
    pending: Option<Unit>,
    highlight: HighlightTimer,
}

impl DropController {
    /// Creates a controller whose highlight cues last `highlight_secs`.
    pub fn new(highlight_secs: f64) -> Self {
        Self {
            pending: None,
            highlight: HighlightTimer::new(highlight_secs),
        }
    }

    /// Records the unit picked up from the palette.
    pub fn begin(&mut self, unit: Unit) {
        self.pending = Some(unit);
    }

    /// Drops the pending unit without placing it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// The unit being dragged, if any.
    pub fn pending(&self) -> Option<&Unit> {
        self.pending.as_ref()
    }

    /// Highlight state.
    pub fn highlight(&self) -> &HighlightTimer {
        &self.highlight
    }

    /// Expires the highlight cue if due.
    pub fn tick(&mut self, now: f64) -> bool {
        self.highlight.tick(now)
    }

    /// Drops the pending unit at a canvas-local screen position.
    ///
    /// Pending state is cleared whatever the outcome.
    ///
    /// # Arguments
    ///
    /// * `screen_pos` - Drop point in canvas-local screen space
    /// * `now` - Current time in seconds, for the highlight cue
    /// * `graph` - Store receiving the vertex and its edges
    /// * `viewport` - Used for the coordinate conversion and re-centering
    pub fn drop_pending(
        &mut self,
        screen_pos: egui::Pos2,
        now: f64,
        graph: &mut GraphStore,
        viewport: &mut ViewportController,
    ) -> DropOutcome {
        match self.pending.take() {
            Some(unit) => self.drop_unit(unit, screen_pos, now, graph, viewport),
            None => DropOutcome::NoPayload,
        }
    }

    /// Drops a unit carried by the gesture itself, ignoring any pending one.
    pub fn drop_unit(
        &mut self,
        unit: Unit,
        screen_pos: egui::Pos2,
        now: f64,
        graph: &mut GraphStore,
        viewport: &mut ViewportController,
    ) -> DropOutcome {
        self.pending = None;

        if let Some(existing) = graph.find_vertex_by_payload_key(&unit.name) {
            let (id, position) = (existing.id, existing.position);
            log::info!("{} is already placed; focusing vertex {}", unit.name, id);
            viewport.pan_to(position);
            self.highlight.trigger(id, now);
            return DropOutcome::Refocused { vertex: id };
        }

        let world_pos = viewport.screen_to_world(screen_pos);
        let name = unit.name.clone();
        let id = graph.add_vertex(world_pos, Some(unit));
        let edges = autolink::link_and_commit(graph, id);
        log::info!(
            "Placed {} as vertex {} at ({:.1}, {:.1}) with {} link(s)",
            name,
            id,
            world_pos.x,
            world_pos.y,
            edges
        );
        DropOutcome::Placed { vertex: id, edges }
    }
}
