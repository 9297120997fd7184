//! The graph data store: exclusive owner of vertices and edges for a canvas session.
//!
//! Vertex and edge ids come from two independent counters that only move
//! forward. Every mutation completes before returning, so callers never see
//! a half-applied update.

use crate::types::*;
use eframe::egui;

/// Vertex and edge collections plus their id counters.
#[derive(Debug, Clone)]
pub struct GraphStore {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
    next_vertex_id: VertexId,
    next_edge_id: EdgeId,
}

impl Default for GraphStore {
    /// Creates an empty store whose first vertex and edge ids are 1.
    fn default() -> Self {
        Self {
            vertices: Vec::new(),
            edges: Vec::new(),
            next_vertex_id: 1,
            next_edge_id: 1,
        }
    }
}

impl GraphStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// All vertices in placement order.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// All edges in creation order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Looks up a vertex by id.
    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.iter().find(|v| v.id == id)
    }

    /// The id the next added edge will receive.
    pub fn next_edge_id(&self) -> EdgeId {
        self.next_edge_id
    }

    /// Adds a vertex at a world position.
    ///
    /// # Arguments
    ///
    /// * `position` - Center of the vertex in world space
    /// * `unit` - Attached unit, or `None` for a bare node
    ///
    /// # Returns
    ///
    /// The ID of the newly added vertex.
    pub fn add_vertex(&mut self, position: egui::Pos2, unit: Option<Unit>) -> VertexId {
        let id = self.next_vertex_id;
        self.next_vertex_id += 1;
        self.vertices.push(Vertex { id, position, unit });
        id
    }

    /// Appends edges and advances the edge id counter by the number offered.
    ///
    /// Edges whose endpoints are not both present are skipped; the counter
    /// still advances past their ids so no id is ever handed out twice.
    ///
    /// # Returns
    ///
    /// The number of edges actually appended.
    pub fn add_edges(&mut self, edges: Vec<Edge>) -> usize {
        let offered = edges.len() as EdgeId;
        let mut added = 0;
        for edge in edges {
            if self.vertex(edge.source).is_none() || self.vertex(edge.target).is_none() {
                log::debug!(
                    "Skipping edge {} with missing endpoint ({} -> {})",
                    edge.id,
                    edge.source,
                    edge.target
                );
                continue;
            }
            self.edges.push(edge);
            added += 1;
        }
        self.next_edge_id += offered;
        added
    }

    /// Replaces the position of one vertex. Does nothing if the id is unknown.
    ///
    /// # Returns
    ///
    /// `true` if the vertex existed and was moved.
    pub fn update_vertex_position(&mut self, id: VertexId, position: egui::Pos2) -> bool {
        match self.vertices.iter_mut().find(|v| v.id == id) {
            Some(vertex) => {
                vertex.position = position;
                true
            }
            None => false,
        }
    }

    /// Finds the vertex whose unit has the given primary name.
    pub fn find_vertex_by_payload_key(&self, key: &str) -> Option<&Vertex> {
        self.vertices.iter().find(|v| v.unit_name() == Some(key))
    }

    /// Edges that touch the given vertex.
    pub fn edges_of(&self, id: VertexId) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(move |e| e.touches(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jinx() -> Unit {
        Unit::new("Jinx", ["StreetDemon", "Marksman"])
    }

    #[test]
    fn vertex_ids_are_monotonic_from_one() {
        let mut store = GraphStore::new();
        let a = store.add_vertex(egui::pos2(0.0, 0.0), None);
        let b = store.add_vertex(egui::pos2(10.0, 0.0), Some(jinx()));
        assert_eq!((a, b), (1, 2));
        assert_eq!(store.vertices().len(), 2);
        assert_eq!(store.vertex(b).and_then(Vertex::unit_name), Some("Jinx"));
    }

    #[test]
    fn add_edges_advances_counter_by_count_offered() {
        let mut store = GraphStore::new();
        let a = store.add_vertex(egui::Pos2::ZERO, None);
        let b = store.add_vertex(egui::Pos2::ZERO, None);
        let first = store.next_edge_id();
        let added = store.add_edges(vec![
            Edge {
                id: first,
                source: a,
                target: b,
                label: Some("X".into()),
            },
            Edge {
                id: first + 1,
                source: a,
                target: 99,
                label: None,
            },
        ]);
        assert_eq!(added, 1);
        assert_eq!(store.edges().len(), 1);
        assert_eq!(store.next_edge_id(), first + 2);
    }

    #[test]
    fn update_position_moves_exactly_one_vertex() {
        let mut store = GraphStore::new();
        let a = store.add_vertex(egui::pos2(1.0, 1.0), None);
        let b = store.add_vertex(egui::pos2(2.0, 2.0), None);
        assert!(store.update_vertex_position(b, egui::pos2(50.0, -5.0)));
        assert_eq!(store.vertex(a).unwrap().position, egui::pos2(1.0, 1.0));
        assert_eq!(store.vertex(b).unwrap().position, egui::pos2(50.0, -5.0));
    }

    #[test]
    fn update_position_of_missing_vertex_is_noop() {
        let mut store = GraphStore::new();
        store.add_vertex(egui::pos2(1.0, 1.0), None);
        assert!(!store.update_vertex_position(42, egui::pos2(9.0, 9.0)));
        assert_eq!(store.vertices()[0].position, egui::pos2(1.0, 1.0));
    }

    #[test]
    fn payload_lookup_matches_primary_name_only() {
        let mut store = GraphStore::new();
        store.add_vertex(egui::Pos2::ZERO, None);
        let id = store.add_vertex(egui::pos2(3.0, 4.0), Some(jinx()));
        assert_eq!(store.find_vertex_by_payload_key("Jinx").map(|v| v.id), Some(id));
        assert!(store.find_vertex_by_payload_key("Marksman").is_none());
    }
}
