//! Path reconstruction from recorded parent links.

use std::collections::BTreeMap;

use meridian_kernel::model::{Graph, NodeId};

use crate::error::ReconstructError;

/// An ordered start-to-goal path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconstructedPath {
    /// Node ids, start first, goal last.
    pub nodes: Vec<NodeId>,
    /// Consecutive `(from, to)` pairs; empty for a single-node path.
    pub transitions: Vec<(NodeId, NodeId)>,
    /// Display labels aligned with `nodes`.
    pub labels: Vec<String>,
}

impl ReconstructedPath {
    /// Number of edges traversed.
    #[must_use]
    pub fn hop_count(&self) -> usize {
        self.transitions.len()
    }
}

/// Walk `came_from` backward from `goal` until `start`.
///
/// The total cost is not recomputed here; callers take it from the search's
/// cost table.
///
/// # Errors
///
/// - [`ReconstructError::GoalUnreached`] if `goal` has no parent and is not `start`.
/// - [`ReconstructError::BrokenChain`] if a node on the chain has no parent
///   before `start` is reached.
/// - [`ReconstructError::Cycle`] if the chain is longer than the table allows.
pub fn reconstruct(
    came_from: &BTreeMap<NodeId, NodeId>,
    start: &NodeId,
    goal: &NodeId,
    graph: &Graph,
) -> Result<ReconstructedPath, ReconstructError> {
    if goal != start && !came_from.contains_key(goal) {
        return Err(ReconstructError::GoalUnreached { goal: goal.clone() });
    }

    let mut nodes = vec![goal.clone()];
    let mut current = goal;
    while current != start {
        let Some(parent) = came_from.get(current) else {
            return Err(ReconstructError::BrokenChain {
                at: current.clone(),
                start: start.clone(),
            });
        };
        nodes.push(parent.clone());
        if nodes.len() > came_from.len() + 1 {
            return Err(ReconstructError::Cycle { goal: goal.clone() });
        }
        current = parent;
    }
    nodes.reverse();

    let transitions = nodes
        .windows(2)
        .map(|pair| (pair[0].clone(), pair[1].clone()))
        .collect();
    let labels = nodes
        .iter()
        .map(|id| {
            graph
                .node(id)
                .map_or_else(|| id.to_string(), |n| n.label.clone())
        })
        .collect();

    Ok(ReconstructedPath {
        nodes,
        transitions,
        labels,
    })
}
