//! Core data types shared by the canvas engine, the search pipeline and the UI.
//!
//! Vertices and edges live in [`crate::graph::GraphStore`]; this module only
//! defines their shape together with the unit payload and search items that
//! flow between the palette, the search panel and the canvas.

use eframe::egui;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Unique identifier for placed vertices. Assigned monotonically, never reused.
pub type VertexId = u64;

/// Unique identifier for edges. Drawn from a counter separate from vertex ids.
pub type EdgeId = u64;

/// A unit that can be dragged from the palette onto the canvas.
///
/// The wire format names the primary name `champion`, matching the filter
/// endpoint's response records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    /// Primary name, also the key used for duplicate detection
    #[serde(rename = "champion")]
    pub name: String,
    /// Trait names; order and duplicates carry no meaning
    #[serde(default)]
    pub traits: Vec<String>,
}

impl Unit {
    /// Creates a unit from a name and any iterable of trait names.
    pub fn new<I, S>(name: impl Into<String>, traits: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            traits: traits.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns true if the unit carries the given trait.
    pub fn has_trait(&self, name: &str) -> bool {
        self.traits.iter().any(|t| t == name)
    }

    /// Traits in first-occurrence order with duplicates removed.
    pub fn distinct_traits(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.traits
            .iter()
            .map(String::as_str)
            .filter(|t| seen.insert(*t))
            .collect()
    }
}

/// A placed node on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    /// Unique identifier for this vertex
    pub id: VertexId,
    /// Center position in world space
    pub position: egui::Pos2,
    /// Attached unit; `None` for a bare node
    pub unit: Option<Unit>,
}

impl Vertex {
    /// Primary name of the attached unit, if any.
    pub fn unit_name(&self) -> Option<&str> {
        self.unit.as_ref().map(|u| u.name.as_str())
    }
}

/// A directed link between two vertices.
///
/// Direction records placement order only: the source is the vertex that
/// was already on the canvas, the target is the newly placed one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    /// Unique identifier for this edge
    pub id: EdgeId,
    /// ID of the pre-existing vertex
    pub source: VertexId,
    /// ID of the newly placed vertex
    pub target: VertexId,
    /// Shared trait this edge stands for
    pub label: Option<String>,
}

impl Edge {
    /// Returns true if the edge touches the given vertex.
    pub fn touches(&self, id: VertexId) -> bool {
        self.source == id || self.target == id
    }

    /// Endpoints ordered so that parallel edges in either direction compare equal.
    pub fn unordered_pair(&self) -> (VertexId, VertexId) {
        if self.source <= self.target {
            (self.source, self.target)
        } else {
            (self.target, self.source)
        }
    }
}

/// Which attribute a search or filter item refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// A champion (unit primary name)
    Champion,
    /// A trait shared between units
    Trait,
}

/// A search result or a selected filter attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchItem {
    /// Display name; also the identity used by the selected filter set
    pub name: String,
    /// Whether this is a champion or a trait
    #[serde(rename = "type")]
    pub kind: ItemKind,
}

impl SearchItem {
    /// Creates a champion item.
    pub fn champion(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ItemKind::Champion,
        }
    }

    /// Creates a trait item.
    pub fn trait_item(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ItemKind::Trait,
        }
    }
}
