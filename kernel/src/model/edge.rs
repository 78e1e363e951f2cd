//! Weighted edges and graph directedness.

use serde::{Deserialize, Serialize};

use super::node::NodeId;

/// Whether edges may be traversed only `from -> to` or in both directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeMode {
    #[default]
    Directed,
    Undirected,
}

impl EdgeMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Directed => "directed",
            Self::Undirected => "undirected",
        }
    }
}

/// An edge between two existing nodes.
///
/// Parallel edges between the same pair are independent candidates.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    /// Non-negative traversal weight.
    pub weight: f64,
}

impl Edge {
    #[must_use]
    pub fn new(from: impl Into<NodeId>, to: impl Into<NodeId>, weight: f64) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            weight,
        }
    }

    /// The endpoint opposite `id`, if `id` is an endpoint.
    ///
    /// For a self-loop both endpoints are `id`, so `id` is returned.
    #[must_use]
    pub fn opposite(&self, id: &NodeId) -> Option<&NodeId> {
        if &self.from == id {
            Some(&self.to)
        } else if &self.to == id {
            Some(&self.from)
        } else {
            None
        }
    }
}
