//! Node identity, position, and the immutable graph node.

use serde::{Deserialize, Serialize};

/// Opaque node identifier, stable for the lifetime of a graph.
///
/// Ordering is lexicographic on the underlying string; it is used only for
/// deterministic table iteration, never for search tie-breaking.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Wrap a string identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<u64> for NodeId {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

/// A point in the plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Straight-line distance to `other`.
    #[must_use]
    pub fn distance_to(&self, other: &Position) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Whether both coordinates are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A graph node. Immutable once the graph is built.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphNode {
    pub id: NodeId,
    pub position: Position,
    /// Display name only; never used for identity or ordering.
    pub label: String,
    /// Cost charged whenever a path enters this node (>= 0).
    pub traversal_cost: f64,
}

impl GraphNode {
    /// A node labelled with its own id and no traversal cost.
    #[must_use]
    pub fn new(id: impl Into<NodeId>, x: f64, y: f64) -> Self {
        let id = id.into();
        Self {
            label: id.to_string(),
            id,
            position: Position::new(x, y),
            traversal_cost: 0.0,
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    #[must_use]
    pub fn with_traversal_cost(mut self, cost: f64) -> Self {
        self.traversal_cost = cost;
        self
    }
}
