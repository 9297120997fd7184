//! Drag state machine for repositioning an existing vertex.
//!
//! The grab offset is captured once, when the drag begins, and reused for
//! every move so the vertex keeps its position relative to the pointer
//! instead of snapping its center onto it.

use crate::types::VertexId;
use eframe::egui;

/// Vertex drag gesture state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    /// No vertex is being dragged
    #[default]
    Idle,
    /// A vertex is held by the pointer
    DraggingVertex {
        /// The dragged vertex
        id: VertexId,
        /// World-space vector from the vertex center to the grab point
        grab_offset: egui::Vec2,
    },
}

/// Owns the vertex drag state for one canvas.
#[derive(Debug, Clone, Default)]
pub struct NodeDragController {
    state: DragState,
}

impl NodeDragController {
    /// Current state.
    pub fn state(&self) -> DragState {
        self.state
    }

    /// The vertex being dragged, if any.
    pub fn dragging(&self) -> Option<VertexId> {
        match self.state {
            DragState::DraggingVertex { id, .. } => Some(id),
            DragState::Idle => None,
        }
    }

    /// Returns true while a vertex is held.
    pub fn is_dragging(&self) -> bool {
        self.dragging().is_some()
    }

    /// Idle -> DraggingVertex.
    ///
    /// # Arguments
    ///
    /// * `id` - The grabbed vertex
    /// * `vertex_pos` - The vertex center in world space at grab time
    /// * `pointer_world` - The pointer position in world space at grab time
    pub fn begin(&mut self, id: VertexId, vertex_pos: egui::Pos2, pointer_world: egui::Pos2) {
        self.state = DragState::DraggingVertex {
            id,
            grab_offset: pointer_world - vertex_pos,
        };
    }

    /// Computes where the dragged vertex should move for the given pointer position.
    ///
    /// # Returns
    ///
    /// The dragged vertex and its new world position, or `None` while idle
    pub fn drag_to(&self, pointer_world: egui::Pos2) -> Option<(VertexId, egui::Pos2)> {
        match self.state {
            DragState::DraggingVertex { id, grab_offset } => Some((id, pointer_world - grab_offset)),
            DragState::Idle => None,
        }
    }

    /// DraggingVertex -> Idle.
    ///
    /// # Returns
    ///
    /// The vertex that was released, or `None` if no drag was active
    pub fn end(&mut self) -> Option<VertexId> {
        let released = self.dragging();
        self.state = DragState::Idle;
        released
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_controller_ignores_moves_and_release() {
        let mut drag = NodeDragController::default();
        assert_eq!(drag.drag_to(egui::pos2(5.0, 5.0)), None);
        assert_eq!(drag.end(), None);
        assert_eq!(drag.state(), DragState::Idle);
    }

    #[test]
    fn grab_offset_is_preserved_while_dragging() {
        let mut drag = NodeDragController::default();
        let center = egui::pos2(100.0, 100.0);
        let grab = egui::pos2(108.0, 94.0);
        drag.begin(7, center, grab);

        let (id, moved) = drag.drag_to(grab + egui::vec2(25.0, -40.0)).unwrap();
        assert_eq!(id, 7);
        assert_eq!(moved, center + egui::vec2(25.0, -40.0));

        let (_, moved_again) = drag.drag_to(grab + egui::vec2(-3.0, 11.0)).unwrap();
        assert_eq!(moved_again, center + egui::vec2(-3.0, 11.0));

        assert_eq!(
            drag.state(),
            DragState::DraggingVertex {
                id: 7,
                grab_offset: egui::vec2(8.0, -6.0)
            }
        );
    }

    #[test]
    fn release_returns_to_idle() {
        let mut drag = NodeDragController::default();
        drag.begin(3, egui::Pos2::ZERO, egui::pos2(1.0, 1.0));
        assert!(drag.is_dragging());
        assert_eq!(drag.end(), Some(3));
        assert!(!drag.is_dragging());
    }
}
