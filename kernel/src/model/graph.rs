//! Immutable graph value and its validating builder.
//!
//! Every graph is an independently owned value: there is no process-wide
//! node or edge registry. All validation happens in [`GraphBuilder::build`];
//! a built [`Graph`] is never checked again at search time.

use std::collections::BTreeMap;

use thiserror::Error;

use super::edge::{Edge, EdgeMode};
use super::node::{GraphNode, NodeId};
use crate::proof::canon::{canonical_json_bytes, CanonError};
use crate::proof::hash::{canonical_hash, ContentHash, HashDomain};

/// Typed failure for graph construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    /// Two nodes share an id.
    #[error("duplicate node id: {id}")]
    DuplicateNode { id: NodeId },
    /// An edge references a node that was never added.
    #[error("edge {edge_index} references unknown node {id}")]
    DanglingEdge { edge_index: usize, id: NodeId },
    /// Edge weight is negative, NaN, or infinite.
    #[error("edge {edge_index} has invalid weight {weight}")]
    InvalidWeight { edge_index: usize, weight: f64 },
    /// Node traversal cost is negative, NaN, or infinite.
    #[error("node {id} has invalid traversal cost {cost}")]
    InvalidTraversalCost { id: NodeId, cost: f64 },
    /// Node coordinates are NaN or infinite.
    #[error("node {id} has non-finite position")]
    InvalidPosition { id: NodeId },
}

/// Accumulates nodes and edges; validates everything at [`build`](Self::build).
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    mode: EdgeMode,
    nodes: Vec<GraphNode>,
    edges: Vec<Edge>,
}

impl GraphBuilder {
    #[must_use]
    pub fn new(mode: EdgeMode) -> Self {
        Self {
            mode,
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    #[must_use]
    pub fn directed() -> Self {
        Self::new(EdgeMode::Directed)
    }

    #[must_use]
    pub fn undirected() -> Self {
        Self::new(EdgeMode::Undirected)
    }

    pub fn add_node(&mut self, node: GraphNode) -> &mut Self {
        self.nodes.push(node);
        self
    }

    pub fn add_edge(&mut self, edge: Edge) -> &mut Self {
        self.edges.push(edge);
        self
    }

    /// Chaining form of [`add_node`](Self::add_node).
    #[must_use]
    pub fn node(mut self, node: GraphNode) -> Self {
        self.nodes.push(node);
        self
    }

    /// Chaining form of [`add_edge`](Self::add_edge).
    #[must_use]
    pub fn edge(mut self, from: impl Into<NodeId>, to: impl Into<NodeId>, weight: f64) -> Self {
        self.edges.push(Edge::new(from, to, weight));
        self
    }

    /// Validate and freeze the graph.
    ///
    /// # Errors
    ///
    /// Returns the first [`GraphError`] found, checking nodes in insertion
    /// order before edges in insertion order.
    pub fn build(self) -> Result<Graph, GraphError> {
        let mut index = BTreeMap::new();
        for (i, node) in self.nodes.iter().enumerate() {
            if !node.position.is_finite() {
                return Err(GraphError::InvalidPosition {
                    id: node.id.clone(),
                });
            }
            if !node.traversal_cost.is_finite() || node.traversal_cost < 0.0 {
                return Err(GraphError::InvalidTraversalCost {
                    id: node.id.clone(),
                    cost: node.traversal_cost,
                });
            }
            if index.insert(node.id.clone(), i).is_some() {
                return Err(GraphError::DuplicateNode {
                    id: node.id.clone(),
                });
            }
        }

        let mut adjacency: BTreeMap<NodeId, Vec<usize>> = BTreeMap::new();
        for (edge_index, edge) in self.edges.iter().enumerate() {
            for endpoint in [&edge.from, &edge.to] {
                if !index.contains_key(endpoint) {
                    return Err(GraphError::DanglingEdge {
                        edge_index,
                        id: endpoint.clone(),
                    });
                }
            }
            if !edge.weight.is_finite() || edge.weight < 0.0 {
                return Err(GraphError::InvalidWeight {
                    edge_index,
                    weight: edge.weight,
                });
            }

            adjacency
                .entry(edge.from.clone())
                .or_default()
                .push(edge_index);
            if self.mode == EdgeMode::Undirected && edge.to != edge.from {
                adjacency.entry(edge.to.clone()).or_default().push(edge_index);
            }
        }

        Ok(Graph {
            mode: self.mode,
            nodes: self.nodes,
            edges: self.edges,
            index,
            adjacency,
        })
    }
}

/// Validated, immutable graph.
///
/// Nodes and edges keep their insertion order; neighbor enumeration follows
/// edge insertion order.
#[derive(Debug, Clone)]
pub struct Graph {
    mode: EdgeMode,
    nodes: Vec<GraphNode>,
    edges: Vec<Edge>,
    index: BTreeMap<NodeId, usize>,
    /// Node id -> indices into `edges` traversable from that node, ascending.
    adjacency: BTreeMap<NodeId, Vec<usize>>,
}

impl Graph {
    #[must_use]
    pub fn mode(&self) -> EdgeMode {
        self.mode
    }

    #[must_use]
    pub fn node(&self, id: &NodeId) -> Option<&GraphNode> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    #[must_use]
    pub fn contains(&self, id: &NodeId) -> bool {
        self.index.contains_key(id)
    }

    #[must_use]
    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Neighbors reachable from `id` in one step, as `(neighbor, weight)`.
    ///
    /// Directed graphs yield only edges whose `from` is `id`; undirected
    /// graphs yield edges where `id` is either endpoint. Parallel edges are
    /// yielded once each. Unknown ids yield nothing.
    pub fn neighbors<'a>(&'a self, id: &'a NodeId) -> impl Iterator<Item = (&'a NodeId, f64)> + 'a {
        self.adjacency
            .get(id)
            .into_iter()
            .flatten()
            .filter_map(move |&edge_index| {
                let edge = &self.edges[edge_index];
                let neighbor = match self.mode {
                    EdgeMode::Directed => Some(&edge.to),
                    EdgeMode::Undirected => edge.opposite(id),
                };
                neighbor.map(|n| (n, edge.weight))
            })
    }

    /// Canonical JSON description of the graph (insertion order preserved).
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "edge_mode": self.mode.as_str(),
            "edges": self.edges.iter().map(|e| serde_json::json!({
                "from": e.from.as_str(),
                "to": e.to.as_str(),
                "weight": e.weight,
            })).collect::<Vec<_>>(),
            "nodes": self.nodes.iter().map(|n| serde_json::json!({
                "id": n.id.as_str(),
                "label": n.label,
                "traversal_cost": n.traversal_cost,
                "x": n.position.x,
                "y": n.position.y,
            })).collect::<Vec<_>>(),
        })
    }

    /// Content hash of the canonical graph description.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if canonical serialization fails.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        let bytes = canonical_json_bytes(&self.to_json_value())?;
        Ok(canonical_hash(HashDomain::Graph, &bytes))
    }
}
