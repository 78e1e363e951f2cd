//! Graph model: nodes with positions, weighted edges, and the validated
//! immutable [`graph::Graph`].
//!
//! Depends on `proof` for the graph digest.

pub mod edge;
pub mod graph;
pub mod node;

pub use edge::{Edge, EdgeMode};
pub use graph::{Graph, GraphBuilder, GraphError};
pub use node::{GraphNode, NodeId, Position};
