//! Shared inputs for the meridian benchmark suites.

use meridian_harness::request::{EdgeSpec, GraphRequest, NodeRef, NodeSpec, RequestError};
use meridian_kernel::model::{Graph, NodeId};
use meridian_search::policy::SearchPolicy;

/// Id of lattice cell `(x, y)`.
#[must_use]
pub fn cell(x: u32, y: u32) -> NodeId {
    NodeId::new(format!("{x},{y}"))
}

/// `side × side` undirected lattice with unit edges, as a request from the
/// top-left to the bottom-right corner.
///
/// Every third cell of every odd column is a costly cell, so the search has
/// to weigh entry costs against detours.
#[must_use]
pub fn lattice_request(side: u32) -> GraphRequest {
    let mut nodes = Vec::new();
    let mut edges = Vec::new();
    for y in 0..side {
        for x in 0..side {
            let id = cell(x, y).to_string();
            let traversal_cost = if x % 2 == 1 && y % 3 == 0 { 4.0 } else { 0.0 };
            nodes.push(NodeSpec {
                id: NodeRef::Text(id.clone()),
                x: f64::from(x),
                y: f64::from(y),
                label: None,
                traversal_cost,
            });
            if x + 1 < side {
                edges.push(EdgeSpec {
                    from: NodeRef::Text(id.clone()),
                    to: NodeRef::Text(cell(x + 1, y).to_string()),
                    weight: Some(1.0),
                });
            }
            if y + 1 < side {
                edges.push(EdgeSpec {
                    from: NodeRef::Text(id),
                    to: NodeRef::Text(cell(x, y + 1).to_string()),
                    weight: Some(1.0),
                });
            }
        }
    }
    let last = side.saturating_sub(1);
    GraphRequest {
        nodes,
        edges,
        directed: false,
        start: NodeRef::Text(cell(0, 0).to_string()),
        goal: NodeRef::Text(cell(last, last).to_string()),
        policy: SearchPolicy::default(),
    }
}

/// The validated graph of [`lattice_request`].
///
/// # Errors
///
/// Returns [`RequestError`] if the lattice fails validation.
pub fn lattice(side: u32) -> Result<Graph, RequestError> {
    lattice_request(side).to_graph()
}
