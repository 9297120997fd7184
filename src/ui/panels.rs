//! Side panels and overlays: the unit palette, the search panel and the zoom controls.

use super::state::CanvasApp;
use crate::types::*;
use eframe::egui;

impl CanvasApp {
    /// Draws the palette of filtered units. Each unit can be dragged onto the canvas.
    ///
    /// # Arguments
    ///
    /// * `ui` - The egui UI context
    pub fn draw_palette(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading("Units");
            if self.search.state().is_filtering() {
                ui.spinner();
            }
        });
        ui.separator();

        let units: Vec<Unit> = self.search.state().filtered().to_vec();
        if units.is_empty() && !self.search.state().is_filtering() {
            ui.weak("No units match the current filters.");
            return;
        }

        egui::ScrollArea::vertical().show(ui, |ui| {
            for unit in units {
                let id = egui::Id::new(("palette_unit", unit.name.as_str()));
                let drag = ui.dnd_drag_source(id, unit.clone(), |ui| {
                    ui.group(|ui| {
                        ui.set_width(ui.available_width());
                        ui.strong(&unit.name);
                        ui.small(unit.traits.join(" · "));
                    });
                });
                if drag.response.drag_started() {
                    log::debug!("Picked up {} from the palette", unit.name);
                    self.session.begin_unit_drag(unit);
                }
            }
        });
    }

    /// Draws the search box, the selected filters and the suggestion list.
    ///
    /// # Arguments
    ///
    /// * `ui` - The egui UI context
    pub fn draw_search_panel(&mut self, ui: &mut egui::Ui) {
        let now = ui.input(|i| i.time);

        let selected: Vec<SearchItem> = self.search.state().selected().to_vec();
        if !selected.is_empty() {
            ui.horizontal_wrapped(|ui| {
                ui.label("Filters:");
                for item in &selected {
                    let text = format!("{} ({}) ✕", item.name, kind_label(item.kind));
                    if ui.button(text).on_hover_text("Remove filter").clicked() {
                        self.search.remove_selected(&item.name);
                    }
                }
            });
        }

        // The pipeline may have cleared the query (selection, dismissal).
        if self.query_input != self.search.state().query() {
            self.query_input = self.search.state().query().to_string();
        }
        ui.horizontal(|ui| {
            let edit = ui.add(
                egui::TextEdit::singleline(&mut self.query_input)
                    .hint_text("Search champions or traits")
                    .desired_width(320.0),
            );
            if edit.changed() {
                self.search.set_query(self.query_input.clone(), now);
            }
            if self.search.state().is_searching() {
                ui.spinner();
            }
        });

        let results: Vec<SearchItem> = self.search.state().results().to_vec();
        if !results.is_empty() {
            egui::ScrollArea::vertical()
                .max_height(160.0)
                .show(ui, |ui| {
                    for item in results {
                        let text = format!("{}  ·  {}", item.name, kind_label(item.kind));
                        if ui.selectable_label(false, text).clicked() {
                            self.search.add_selected(item);
                        }
                    }
                });
        }
    }

    /// Draws the zoom buttons and the current zoom percentage.
    ///
    /// # Arguments
    ///
    /// * `ui` - The egui UI context
    pub fn draw_zoom_controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("−").on_hover_text("Zoom out").clicked() {
                self.session.zoom_out();
            }
            ui.label(format!("{:.0}%", self.session.viewport().zoom() * 100.0));
            if ui.button("+").on_hover_text("Zoom in").clicked() {
                self.session.zoom_in();
            }
            if ui.button("Reset").on_hover_text("Reset view").clicked() {
                self.session.reset_view();
            }
        });
    }
}

fn kind_label(kind: ItemKind) -> &'static str {
    match kind {
        ItemKind::Champion => "champion",
        ItemKind::Trait => "trait",
    }
}
