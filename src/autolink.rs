//! Trait-based edge creation for newly placed units.

use crate::graph::GraphStore;
use crate::types::*;
use std::collections::HashSet;

/// Computes the edges linking a newly placed vertex to every unit already on the canvas.
///
/// One edge is produced per trait the two units share, labelled with that
/// trait, running from the existing vertex to the new one. Bare vertices
/// and the new vertex itself are skipped. Ids are contiguous starting at
/// `first_id`.
///
/// # Arguments
///
/// * `new_vertex` - The vertex just placed; returns nothing if it has no unit
/// * `existing` - Vertices that were on the canvas before the placement
/// * `first_id` - The id to give the first produced edge
pub fn link_new_vertex(new_vertex: &Vertex, existing: &[Vertex], first_id: EdgeId) -> Vec<Edge> {
    let Some(new_unit) = &new_vertex.unit else {
        return Vec::new();
    };
    let new_traits = new_unit.distinct_traits();

    let mut edges = Vec::new();
    for other in existing {
        if other.id == new_vertex.id {
            continue;
        }
        let Some(other_unit) = &other.unit else {
            continue;
        };
        let other_traits: HashSet<&str> = other_unit.traits.iter().map(String::as_str).collect();
        for shared in new_traits.iter().filter(|t| other_traits.contains(*t)) {
            edges.push(Edge {
                id: first_id + edges.len() as EdgeId,
                source: other.id,
                target: new_vertex.id,
                label: Some((*shared).to_string()),
            });
        }
    }
    edges
}

/// Links `new_id` against the rest of the store and commits the resulting edges.
///
/// # Returns
///
/// The number of edges added.
pub fn link_and_commit(store: &mut GraphStore, new_id: VertexId) -> usize {
    let Some(new_vertex) = store.vertex(new_id).cloned() else {
        return 0;
    };
    let edges = link_new_vertex(&new_vertex, store.vertices(), store.next_edge_id());
    store.add_edges(edges)
}
