//! Desktop front end for the unit canvas.
//!
//! # Module Organization
//!
//! - `state` - The `CanvasApp` struct and layout memory
//! - `canvas` - Pointer, wheel and drop handling on the canvas
//! - `rendering` - Drawing the grid, edges and vertices
//! - `panels` - Unit palette, search panel and zoom controls

mod canvas;
mod panels;
mod rendering;
mod state;

pub use state::{CanvasApp, LayoutState};

use eframe::egui;
use std::time::Duration;

impl eframe::App for CanvasApp {
    /// Main update function called by egui for each frame.
    ///
    /// Applies finished catalog calls and timers first, then lays out the
    /// palette, the search panel, the zoom overlay and the canvas.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The egui context
    /// * `_frame` - The eframe frame
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_timers(ctx);
        self.dismiss_suggestions_on_outside_press(ctx);

        egui::SidePanel::left("unit_palette")
            .resizable(true)
            .default_width(220.0)
            .show(ctx, |ui| {
                self.draw_palette(ui);
            });

        let search_panel = egui::TopBottomPanel::bottom("search_panel")
            .resizable(false)
            .show(ctx, |ui| {
                self.draw_search_panel(ui);
            });
        self.layout.search_panel_rect = Some(search_panel.response.rect);

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_canvas(ui);
        });

        if let Some(canvas_rect) = self.layout.canvas_rect {
            let controls = egui::Area::new(egui::Id::new("zoom_controls"))
                .fixed_pos(canvas_rect.right_top() + egui::vec2(-200.0, 12.0))
                .show(ctx, |ui| {
                    egui::Frame::popup(ui.style()).show(ui, |ui| {
                        self.draw_zoom_controls(ui);
                    });
                });
            self.layout.zoom_controls_rect = Some(controls.response.rect);
        }

        // A palette drag released anywhere but the canvas leaves nothing to drop.
        if self.session.drops().pending().is_some() && !egui::DragAndDrop::has_any_payload(ctx)
        {
            self.session.cancel_unit_drag();
        }
    }
}

impl CanvasApp {
    /// Applies catalog completions and expires timed state, scheduling the
    /// repaints that make timers fire without further input.
    fn update_timers(&mut self, ctx: &egui::Context) {
        let now = ctx.input(|i| i.time);

        self.search.poll();
        self.search.tick(now);
        if let Some(due) = self.search.state().search_due_at() {
            ctx.request_repaint_after(Duration::from_secs_f64((due - now).max(0.0)));
        }

        if self.session.tick(now) {
            ctx.request_repaint();
        }
        if let Some(remaining) = self.session.drops().highlight().remaining(now) {
            ctx.request_repaint_after(Duration::from_secs_f64(remaining));
        }
    }

    /// Closes the suggestion list when a press lands outside the search panel.
    fn dismiss_suggestions_on_outside_press(&mut self, ctx: &egui::Context) {
        let press = ctx.input(|i| {
            if i.pointer.any_pressed() {
                i.pointer.interact_pos()
            } else {
                None
            }
        });
        if let (Some(pos), Some(panel)) = (press, self.layout.search_panel_rect) {
            self.search.dismiss_if_outside(panel.contains(pos));
        }
    }
}

#[cfg(test)]
mod tests;
