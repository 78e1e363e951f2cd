//! Query requests: graph description plus start and goal references.
//!
//! This is the caller side of the engine contract. Everything the engine
//! assumes (valid graph, existing start and goal) is established here before
//! [`meridian_search::search::search`] runs.

use std::collections::BTreeMap;

use meridian_kernel::model::{
    Edge, EdgeMode, Graph, GraphBuilder, GraphError, GraphNode, NodeId, Position,
};
use meridian_search::error::NodeRole;
use meridian_search::policy::SearchPolicy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A node reference as callers send it: a string or a non-negative integer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeRef {
    Text(String),
    Number(u64),
}

impl NodeRef {
    #[must_use]
    pub fn to_node_id(&self) -> NodeId {
        match self {
            Self::Text(s) => NodeId::new(s.as_str()),
            Self::Number(n) => NodeId::from(*n),
        }
    }
}

impl From<&str> for NodeRef {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<u64> for NodeRef {
    fn from(n: u64) -> Self {
        Self::Number(n)
    }
}

/// One node of the request's graph description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSpec {
    pub id: NodeRef,
    pub x: f64,
    pub y: f64,
    /// Display label; the id is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub traversal_cost: f64,
}

/// One edge of the request's graph description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeSpec {
    pub from: NodeRef,
    pub to: NodeRef,
    /// Explicit weight; defaults to the straight-line distance between the
    /// endpoints.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

fn default_directed() -> bool {
    true
}

/// A complete query: graph, endpoints, and engine policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphRequest {
    pub nodes: Vec<NodeSpec>,
    #[serde(default)]
    pub edges: Vec<EdgeSpec>,
    #[serde(default = "default_directed")]
    pub directed: bool,
    pub start: NodeRef,
    pub goal: NodeRef,
    #[serde(default)]
    pub policy: SearchPolicy,
}

/// Why a request was rejected before search.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The request bytes are not a valid request document.
    #[error("malformed request: {0}")]
    Decode(#[from] serde_json::Error),
    /// The graph description failed validation.
    #[error("invalid graph: {0}")]
    Graph(#[from] GraphError),
    /// Start or goal does not name a node of the graph.
    #[error("invalid {role} reference: {id}")]
    InvalidReference { role: NodeRole, id: NodeId },
}

/// A validated request, ready for the engine.
#[derive(Debug, Clone)]
pub struct PreparedQuery {
    pub graph: Graph,
    pub start: NodeId,
    pub goal: NodeId,
    pub policy: SearchPolicy,
}

impl GraphRequest {
    /// Decode a request from JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::Decode`] on malformed JSON or missing fields.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, RequestError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    #[must_use]
    pub fn edge_mode(&self) -> EdgeMode {
        if self.directed {
            EdgeMode::Directed
        } else {
            EdgeMode::Undirected
        }
    }

    /// Build the validated graph described by this request.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::Graph`] for any graph validation failure,
    /// including an unweighted edge whose endpoint is unknown.
    pub fn to_graph(&self) -> Result<Graph, RequestError> {
        let positions: BTreeMap<NodeId, Position> = self
            .nodes
            .iter()
            .map(|n| (n.id.to_node_id(), Position::new(n.x, n.y)))
            .collect();

        let mut builder = GraphBuilder::new(self.edge_mode());
        for spec in &self.nodes {
            let mut node = GraphNode::new(spec.id.to_node_id(), spec.x, spec.y)
                .with_traversal_cost(spec.traversal_cost);
            if let Some(label) = &spec.label {
                node = node.with_label(label.as_str());
            }
            builder.add_node(node);
        }

        for (edge_index, spec) in self.edges.iter().enumerate() {
            let from = spec.from.to_node_id();
            let to = spec.to.to_node_id();
            let weight = match spec.weight {
                Some(w) => w,
                None => {
                    let endpoint = |id: &NodeId| {
                        positions.get(id).copied().ok_or_else(|| GraphError::DanglingEdge {
                            edge_index,
                            id: id.clone(),
                        })
                    };
                    endpoint(&from)?.distance_to(&endpoint(&to)?)
                }
            };
            builder.add_edge(Edge::new(from, to, weight));
        }

        Ok(builder.build()?)
    }

    /// Validate the whole request and resolve its endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::Graph`] for an invalid graph and
    /// [`RequestError::InvalidReference`] if start or goal is not a node.
    pub fn prepare(&self) -> Result<PreparedQuery, RequestError> {
        let graph = self.to_graph()?;
        let start = self.start.to_node_id();
        let goal = self.goal.to_node_id();
        for (role, id) in [(NodeRole::Start, &start), (NodeRole::Goal, &goal)] {
            if !graph.contains(id) {
                return Err(RequestError::InvalidReference {
                    role,
                    id: id.clone(),
                });
            }
        }
        Ok(PreparedQuery {
            graph,
            start,
            goal,
            policy: self.policy,
        })
    }
}
