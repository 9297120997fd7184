//! Edge geometry in world space: trimmed endpoints, parallel-edge fanning and label anchors.

use crate::constants::{DRAGGING_RADIUS_SCALE, HOVER_RADIUS_SCALE, MIN_EDGE_LENGTH};
use crate::types::*;
use eframe::egui;
use std::collections::HashMap;

/// Drawable shape of one edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeSegment {
    /// Point on the source vertex's boundary
    pub start: egui::Pos2,
    /// Point on the target vertex's boundary
    pub end: egui::Pos2,
    /// Quadratic Bezier control point; on the chord for straight edges
    pub control: egui::Pos2,
    /// Where the label is centered (the curve midpoint)
    pub label_anchor: egui::Pos2,
}

impl EdgeSegment {
    /// Returns true if the edge is drawn as a straight line.
    pub fn is_straight(&self) -> bool {
        let mid = self.start.lerp(self.end, 0.5);
        (self.control - mid).length() <= MIN_EDGE_LENGTH
    }
}

/// Radius of a vertex given its interaction state.
pub fn vertex_radius(base: f32, dragging: bool, hovered: bool) -> f32 {
    if dragging {
        base * DRAGGING_RADIUS_SCALE
    } else if hovered {
        base * HOVER_RADIUS_SCALE
    } else {
        base
    }
}

/// Computes the geometry of an edge between two vertex centers.
///
/// `bend` is the signed perpendicular distance of the curve's midpoint from
/// the straight chord, measured along the left-hand normal of the
/// source-to-target direction; 0 gives a straight line.
///
/// # Returns
///
/// `None` when the centers coincide; such an edge has no direction and is not drawn.
pub fn edge_segment(
    source: egui::Pos2,
    target: egui::Pos2,
    source_radius: f32,
    target_radius: f32,
    bend: f32,
) -> Option<EdgeSegment> {
    let delta = target - source;
    let distance = delta.length();
    if distance < MIN_EDGE_LENGTH {
        return None;
    }
    let dir = delta / distance;
    let start = source + dir * source_radius;
    let end = target - dir * target_radius;

    let normal = egui::vec2(-dir.y, dir.x);
    let mid = start.lerp(end, 0.5);
    // A quadratic curve passes halfway between its chord midpoint and control point.
    let control = mid + normal * (bend * 2.0);
    let label_anchor = mid + normal * bend;

    Some(EdgeSegment {
        start,
        end,
        control,
        label_anchor,
    })
}

/// Assigns each edge a bend so that parallel edges between the same pair fan out.
///
/// A bundle of `n` edges gets offsets `(i - (n - 1) / 2) * spacing`, so a
/// single edge stays straight and the bundle is symmetric around the chord.
/// The sign is flipped for edges running from the higher to the lower id,
/// keeping every edge of a bundle on its own side regardless of direction.
pub fn parallel_bends(edges: &[Edge], spacing: f32) -> HashMap<EdgeId, f32> {
    let mut bundles: HashMap<(VertexId, VertexId), Vec<&Edge>> = HashMap::new();
    for edge in edges {
        bundles.entry(edge.unordered_pair()).or_default().push(edge);
    }

    let mut bends = HashMap::with_capacity(edges.len());
    for bundle in bundles.values() {
        let center = (bundle.len() as f32 - 1.0) / 2.0;
        for (i, edge) in bundle.iter().enumerate() {
            let offset = (i as f32 - center) * spacing;
            let sign = if edge.source <= edge.target { 1.0 } else { -1.0 };
            bends.insert(edge.id, offset * sign);
        }
    }
    bends
}

/// Computes the drawable geometry for every edge of a graph.
///
/// Edges with a missing endpoint or coincident endpoints are left out.
///
/// # Arguments
///
/// * `vertices` - All vertices; used to resolve edge endpoints
/// * `edges` - Edges to lay out
/// * `spacing` - Gap between neighbouring parallel edges
/// * `radius_of` - Radius to trim at each endpoint, by vertex id
pub fn edge_geometry(
    vertices: &[Vertex],
    edges: &[Edge],
    spacing: f32,
    radius_of: impl Fn(VertexId) -> f32,
) -> Vec<(EdgeId, EdgeSegment)> {
    let positions: HashMap<VertexId, egui::Pos2> =
        vertices.iter().map(|v| (v.id, v.position)).collect();
    let bends = parallel_bends(edges, spacing);

    edges
        .iter()
        .filter_map(|edge| {
            let source = *positions.get(&edge.source)?;
            let target = *positions.get(&edge.target)?;
            let bend = bends.get(&edge.id).copied().unwrap_or(0.0);
            edge_segment(
                source,
                target,
                radius_of(edge.source),
                radius_of(edge.target),
                bend,
            )
            .map(|segment| (edge.id, segment))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(id: EdgeId, source: VertexId, target: VertexId) -> Edge {
        Edge {
            id,
            source,
            target,
            label: Some(format!("t{id}")),
        }
    }

    #[test]
    fn straight_edge_is_trimmed_by_radii() {
        let seg = edge_segment(egui::pos2(0.0, 0.0), egui::pos2(100.0, 0.0), 20.0, 10.0, 0.0)
            .unwrap();
        assert_eq!(seg.start, egui::pos2(20.0, 0.0));
        assert_eq!(seg.end, egui::pos2(90.0, 0.0));
        assert_eq!(seg.label_anchor, egui::pos2(55.0, 0.0));
        assert!(seg.is_straight());
    }

    #[test]
    fn coincident_vertices_produce_no_geometry() {
        let p = egui::pos2(42.0, 42.0);
        assert!(edge_segment(p, p, 20.0, 20.0, 0.0).is_none());

        let vertices = vec![
            Vertex {
                id: 1,
                position: p,
                unit: None,
            },
            Vertex {
                id: 2,
                position: p,
                unit: None,
            },
        ];
        assert!(edge_geometry(&vertices, &[edge(1, 1, 2)], 18.0, |_| 20.0).is_empty());
    }

    #[test]
    fn edges_with_missing_endpoint_are_skipped() {
        let vertices = vec![Vertex {
            id: 1,
            position: egui::Pos2::ZERO,
            unit: None,
        }];
        assert!(edge_geometry(&vertices, &[edge(1, 1, 2)], 18.0, |_| 20.0).is_empty());
    }

    #[test]
    fn single_edge_stays_straight() {
        let bends = parallel_bends(&[edge(1, 1, 2)], 18.0);
        assert_eq!(bends[&1], 0.0);
    }

    #[test]
    fn parallel_bundle_fans_out_symmetrically() {
        let edges = vec![edge(1, 1, 2), edge(2, 1, 2), edge(3, 1, 2), edge(4, 3, 1)];
        let bends = parallel_bends(&edges, 10.0);
        assert_eq!(bends[&1], -10.0);
        assert_eq!(bends[&2], 0.0);
        assert_eq!(bends[&3], 10.0);
        assert_eq!(bends[&4], 0.0);
    }

    #[test]
    fn reversed_edges_in_bundle_land_on_distinct_sides() {
        let edges = vec![edge(1, 1, 2), edge(2, 2, 1)];
        let bends = parallel_bends(&edges, 10.0);
        let a = edge_segment(egui::pos2(0.0, 0.0), egui::pos2(100.0, 0.0), 0.0, 0.0, bends[&1])
            .unwrap();
        let b = edge_segment(egui::pos2(100.0, 0.0), egui::pos2(0.0, 0.0), 0.0, 0.0, bends[&2])
            .unwrap();
        assert!((a.label_anchor - b.label_anchor).length() > 9.0);
    }

    #[test]
    fn radius_reflects_interaction_state() {
        assert_eq!(vertex_radius(20.0, false, false), 20.0);
        assert!((vertex_radius(20.0, true, true) - 18.0).abs() < 1e-5);
        assert!((vertex_radius(20.0, false, true) - 22.0).abs() < 1e-5);
    }
}
