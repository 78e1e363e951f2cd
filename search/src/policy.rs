//! Search policy types.

use meridian_kernel::model::GraphNode;
use serde::{Deserialize, Serialize};

/// Engine configuration for one search call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchPolicy {
    /// Whether the start node's own traversal cost is charged.
    pub start_cost: StartCostPolicy,
    /// Whether decision events are recorded.
    pub trace: TraceMode,
}

/// Treatment of the start node's traversal cost.
///
/// Every other node is charged its traversal cost on entry. The start is
/// never *entered* by an edge, so charging it is a modelling choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StartCostPolicy {
    /// `g(start) = 0`. Default.
    #[default]
    Exclude,
    /// `g(start) = start.traversal_cost`.
    Include,
}

impl StartCostPolicy {
    /// The `g_cost` the start node is seeded with.
    #[must_use]
    pub fn initial_cost(self, start: &GraphNode) -> f64 {
        match self {
            Self::Exclude => 0.0,
            Self::Include => start.traversal_cost,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Exclude => "exclude",
            Self::Include => "include",
        }
    }
}

/// Whether the search records its trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceMode {
    /// Record every decision event. Default.
    #[default]
    Full,
    /// Record nothing; path and costs are unaffected.
    Off,
}

impl TraceMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Off => "off",
        }
    }
}
