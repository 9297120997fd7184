//! Canvas widget: turns egui pointer input into session gestures.
//!
//! Positions are converted to canvas-local coordinates before they reach
//! the session, so the engine never sees where the canvas sits on screen.

use super::state::CanvasApp;
use crate::placement::DropOutcome;
use crate::types::Unit;
use crate::viewport::ZoomDirection;
use eframe::egui;

impl CanvasApp {
    /// Renders the canvas and handles its input.
    ///
    /// # Arguments
    ///
    /// * `ui` - The egui UI context
    pub fn draw_canvas(&mut self, ui: &mut egui::Ui) {
        let (response, painter) =
            ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
        let canvas_rect = response.rect;
        self.layout.canvas_rect = Some(canvas_rect);
        self.session.set_frame_size(canvas_rect.size());

        self.handle_canvas_pointer(ui, canvas_rect);
        self.handle_canvas_zoom(ui, canvas_rect);
        self.handle_unit_drop(ui, &response);

        let now = ui.input(|i| i.time);
        self.render_canvas(&painter, canvas_rect, now);
    }

    /// Returns true if an absolute position is on the canvas and not under an overlay.
    fn is_on_canvas(&self, canvas_rect: egui::Rect, pos: egui::Pos2) -> bool {
        canvas_rect.contains(pos)
            && !self
                .layout
                .zoom_controls_rect
                .is_some_and(|overlay| overlay.contains(pos))
    }

    /// Feeds press, motion and release of the primary button to the session.
    ///
    /// A press only counts when it lands on the canvas; release always ends
    /// the active gesture so a drag that left the canvas still finishes.
    ///
    /// # Arguments
    ///
    /// * `ui` - The egui UI context
    /// * `canvas_rect` - Screen-space rectangle of the canvas
    fn handle_canvas_pointer(&mut self, ui: &egui::Ui, canvas_rect: egui::Rect) {
        let (pressed, released, press_pos, latest_pos) = ui.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
                i.pointer.press_origin(),
                i.pointer.latest_pos(),
            )
        });
        let to_local = |pos: egui::Pos2| (pos - canvas_rect.min).to_pos2();
        let carrying_unit = egui::DragAndDrop::has_any_payload(ui.ctx());

        if pressed && !carrying_unit {
            if let Some(pos) = press_pos.or(latest_pos) {
                if self.is_on_canvas(canvas_rect, pos) {
                    self.session.pointer_down(to_local(pos));
                }
            }
        }

        if let Some(pos) = latest_pos {
            let gesture_active =
                self.session.drag().is_dragging() || self.session.viewport().is_panning();
            if gesture_active || self.is_on_canvas(canvas_rect, pos) {
                self.session.pointer_move(to_local(pos));
            }
            if !canvas_rect.contains(pos) {
                self.session.pointer_left();
            }
        }

        if released {
            self.session.pointer_up();
        }
    }

    /// Zooms one step per wheel or pinch event, anchored at the pointer.
    ///
    /// # Arguments
    ///
    /// * `ui` - The egui UI context
    /// * `canvas_rect` - Screen-space rectangle of the canvas
    fn handle_canvas_zoom(&mut self, ui: &egui::Ui, canvas_rect: egui::Rect) {
        let (scroll, pinch, hover) = ui.input(|i| {
            (
                i.raw_scroll_delta.y,
                i.zoom_delta(),
                i.pointer.hover_pos(),
            )
        });
        let Some(hover) = hover else {
            return;
        };
        if !self.is_on_canvas(canvas_rect, hover) {
            return;
        }

        let direction = if scroll > 0.0 || pinch > 1.0 {
            ZoomDirection::In
        } else if scroll < 0.0 || pinch < 1.0 {
            ZoomDirection::Out
        } else {
            return;
        };
        self.session
            .wheel((hover - canvas_rect.min).to_pos2(), direction);
    }

    /// Places a unit released over the canvas from the palette.
    ///
    /// # Arguments
    ///
    /// * `ui` - The egui UI context
    /// * `response` - The canvas response
    fn handle_unit_drop(&mut self, ui: &egui::Ui, response: &egui::Response) {
        let Some(unit) = response.dnd_release_payload::<Unit>() else {
            return;
        };
        let Some(pos) = ui.input(|i| i.pointer.latest_pos()) else {
            self.session.cancel_unit_drag();
            return;
        };
        let local = (pos - response.rect.min).to_pos2();
        let now = ui.input(|i| i.time);
        match self.session.drop_unit((*unit).clone(), local, now) {
            DropOutcome::Refocused { .. } => ui.ctx().request_repaint(),
            DropOutcome::Placed { .. } | DropOutcome::NoPayload => {}
        }
    }
}
