//! Typed search errors.
//!
//! `SearchError` represents pre-flight failures only. Runtime outcomes
//! (goal reached, frontier exhausted) are expressed via
//! [`crate::search::Termination`] and always produce a full
//! [`crate::search::SearchResult`].

use meridian_kernel::model::NodeId;
use thiserror::Error;

/// Which query endpoint a reference belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRole {
    Start,
    Goal,
}

impl std::fmt::Display for NodeRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::Goal => f.write_str("goal"),
        }
    }
}

/// Typed failure for pre-flight search validation.
///
/// Returned before any node is expanded; no trace is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The start or goal id is not a node of the graph.
    #[error("{role} node {id} is not in the graph")]
    UnknownNode { role: NodeRole, id: NodeId },
}

/// Failure while walking parent links from goal back to start.
///
/// `GoalUnreached` is the ordinary "no path" case surfacing at the wrong
/// layer; the other variants mean the parent table is internally broken.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReconstructError {
    /// The goal has no recorded parent and is not the start.
    #[error("goal {goal} was never reached")]
    GoalUnreached { goal: NodeId },
    /// A node on the chain has no parent before the start was reached.
    #[error("parent chain broken at {at} before reaching {start}")]
    BrokenChain { at: NodeId, start: NodeId },
    /// The chain revisits nodes and never reaches the start.
    #[error("parent chain from {goal} does not terminate")]
    Cycle { goal: NodeId },
}
