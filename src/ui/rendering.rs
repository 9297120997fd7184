//! Canvas rendering for the grid, trait edges and unit vertices.
//!
//! Everything is drawn from world-space geometry computed by the session,
//! converted to screen space with the current viewport transform.

use super::state::CanvasApp;
use crate::constants::GRID_SIZE;
use crate::geometry::EdgeSegment;
use crate::types::*;
use eframe::egui;
use eframe::epaint::QuadraticBezierShape;

const EDGE_COLOR: egui::Color32 = egui::Color32::from_rgb(0x59, 0x4b, 0x42);
const VERTEX_FILL: egui::Color32 = egui::Color32::from_rgb(0xd9, 0xc3, 0x9a);
const VERTEX_DRAG_FILL: egui::Color32 = egui::Color32::from_rgb(0xb8, 0xa0, 0x78);
const HIGHLIGHT_COLOR: egui::Color32 = egui::Color32::from_rgb(255, 165, 0);

impl CanvasApp {
    /// Renders all canvas elements in layers: grid, edges, vertices, then the hover card.
    ///
    /// # Arguments
    ///
    /// * `painter` - The egui painter for drawing operations
    /// * `canvas_rect` - The screen-space rectangle of the canvas area
    /// * `now` - Current input time, for the highlight cue
    pub fn render_canvas(&self, painter: &egui::Painter, canvas_rect: egui::Rect, now: f64) {
        if self.show_grid {
            self.draw_grid(painter, canvas_rect);
        }

        let labels: std::collections::HashMap<EdgeId, &str> = self
            .session
            .graph()
            .edges()
            .iter()
            .filter_map(|e| e.label.as_deref().map(|label| (e.id, label)))
            .collect();
        for (edge_id, segment) in self.session.edge_geometry() {
            self.draw_edge(painter, canvas_rect, &segment, labels.get(&edge_id).copied());
        }

        let highlighted = self.session.highlighted(now);
        for vertex in self.session.graph().vertices() {
            self.draw_vertex(painter, canvas_rect, vertex, highlighted == Some(vertex.id));
        }

        if let Some(vertex) = self
            .session
            .hovered()
            .and_then(|id| self.session.graph().vertex(id))
        {
            self.draw_trait_card(painter, canvas_rect, vertex);
        }
    }

    /// Draws the background grid, skipping it when the lines would crowd together.
    ///
    /// # Arguments
    ///
    /// * `painter` - The egui painter for drawing operations
    /// * `canvas_rect` - The screen-space rectangle defining visible area
    pub fn draw_grid(&self, painter: &egui::Painter, canvas_rect: egui::Rect) {
        let zoom = self.session.viewport().zoom();
        let screen_step = GRID_SIZE * zoom;
        if screen_step < 4.0 {
            return;
        }
        let stroke = egui::Stroke::new(
            1.0,
            egui::Color32::from_rgba_unmultiplied(128, 128, 128, 28),
        );

        // Grid origin follows the pan offset so lines stay fixed to world space.
        let pan = self.session.viewport().pan();
        let first_x = canvas_rect.min.x + pan.x.rem_euclid(screen_step);
        let first_y = canvas_rect.min.y + pan.y.rem_euclid(screen_step);

        let mut x = first_x;
        while x <= canvas_rect.max.x {
            painter.line_segment(
                [
                    egui::pos2(x, canvas_rect.min.y),
                    egui::pos2(x, canvas_rect.max.y),
                ],
                stroke,
            );
            x += screen_step;
        }
        let mut y = first_y;
        while y <= canvas_rect.max.y {
            painter.line_segment(
                [
                    egui::pos2(canvas_rect.min.x, y),
                    egui::pos2(canvas_rect.max.x, y),
                ],
                stroke,
            );
            y += screen_step;
        }
    }

    /// Draws one edge as a line or, for fanned-out parallel edges, a curve, with its label.
    ///
    /// # Arguments
    ///
    /// * `painter` - The egui painter for drawing operations
    /// * `canvas_rect` - The screen-space rectangle of the canvas area
    /// * `segment` - World-space geometry of the edge
    /// * `label` - Trait name to print at the edge midpoint
    fn draw_edge(
        &self,
        painter: &egui::Painter,
        canvas_rect: egui::Rect,
        segment: &EdgeSegment,
        label: Option<&str>,
    ) {
        let zoom = self.session.viewport().zoom();
        let stroke = egui::Stroke::new((2.0 * zoom).max(1.0), EDGE_COLOR);
        let start = self.world_to_screen(canvas_rect, segment.start);
        let end = self.world_to_screen(canvas_rect, segment.end);

        if segment.is_straight() {
            painter.line_segment([start, end], stroke);
        } else {
            let control = self.world_to_screen(canvas_rect, segment.control);
            painter.add(QuadraticBezierShape::from_points_stroke(
                [start, control, end],
                false,
                egui::Color32::TRANSPARENT,
                stroke,
            ));
        }

        if let Some(label) = label {
            let anchor = self.world_to_screen(canvas_rect, segment.label_anchor);
            let font = egui::FontId::proportional((11.0 * zoom).clamp(8.0, 24.0));
            painter.text(anchor, egui::Align2::CENTER_CENTER, label, font, EDGE_COLOR);
        }
    }

    /// Draws a vertex circle with its unit name.
    ///
    /// # Arguments
    ///
    /// * `painter` - The egui painter for drawing operations
    /// * `canvas_rect` - The screen-space rectangle of the canvas area
    /// * `vertex` - The vertex to render
    /// * `highlighted` - Whether the re-drop cue is active on this vertex
    pub fn draw_vertex(
        &self,
        painter: &egui::Painter,
        canvas_rect: egui::Rect,
        vertex: &Vertex,
        highlighted: bool,
    ) {
        let zoom = self.session.viewport().zoom();
        let center = self.world_to_screen(canvas_rect, vertex.position);
        let radius = self.session.radius_of(vertex.id) * zoom;
        let dragging = self.session.drag().dragging() == Some(vertex.id);

        let fill = if dragging { VERTEX_DRAG_FILL } else { VERTEX_FILL };
        painter.circle_filled(center, radius, fill);

        let stroke = if highlighted {
            egui::Stroke::new(4.0, HIGHLIGHT_COLOR)
        } else {
            egui::Stroke::new(2.0, EDGE_COLOR)
        };
        painter.circle_stroke(center, radius, stroke);

        let name = vertex.unit_name().unwrap_or("?");
        let font = egui::FontId::proportional((12.0 * zoom).clamp(8.0, 28.0));
        painter.text(
            center + egui::vec2(0.0, radius + 4.0),
            egui::Align2::CENTER_TOP,
            name,
            font,
            EDGE_COLOR,
        );
    }

    /// Draws the hovered unit's traits next to its vertex.
    fn draw_trait_card(&self, painter: &egui::Painter, canvas_rect: egui::Rect, vertex: &Vertex) {
        let Some(unit) = &vertex.unit else {
            return;
        };
        let zoom = self.session.viewport().zoom();
        let center = self.world_to_screen(canvas_rect, vertex.position);
        let offset = self.session.radius_of(vertex.id) * zoom + 8.0;
        let anchor = center + egui::vec2(offset, -offset);

        let text = format!("{}\n{}", unit.name, unit.traits.join(", "));
        let galley = painter.layout_no_wrap(
            text,
            egui::FontId::proportional(12.0),
            egui::Color32::BLACK,
        );
        let rect = egui::Rect::from_min_size(anchor, galley.size()).expand(6.0);
        painter.rect_filled(rect, 4.0, egui::Color32::from_white_alpha(235));
        painter.galley(anchor, galley, egui::Color32::BLACK);
    }
}
