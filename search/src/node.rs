//! Transient search node and the frontier ordering key.

use meridian_kernel::model::NodeId;

/// A candidate queued on the frontier.
///
/// Parent links are not carried here; the search records them in its
/// `came_from` table when a cost improves.
///
/// Created and discarded within one `search()` call. Several entries for the
/// same `node_id` may coexist; only the one whose `g_cost` matches the
/// recorded best cost is live.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchNode {
    pub node_id: NodeId,
    /// Best known cost from start at push time.
    pub g_cost: f64,
    /// Heuristic estimate to goal.
    pub h_cost: f64,
    /// Insertion sequence assigned by the frontier.
    pub sequence: u64,
}

impl SearchNode {
    #[must_use]
    pub fn new(node_id: NodeId, g_cost: f64, h_cost: f64) -> Self {
        Self {
            node_id,
            g_cost,
            h_cost,
            sequence: 0,
        }
    }

    /// `f_cost = g_cost + h_cost` (the frontier ordering key).
    #[must_use]
    pub fn f_cost(&self) -> f64 {
        self.g_cost + self.h_cost
    }
}

/// The frontier ordering key: `(f_cost, sequence)`.
///
/// Lower `f_cost` first; equal `f_cost` resolves to the earlier insertion.
/// Node ids never take part in ordering.
#[derive(Debug, Clone, Copy)]
pub struct FrontierKey {
    pub f_cost: f64,
    pub sequence: u64,
}

impl PartialEq for FrontierKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for FrontierKey {}

impl PartialOrd for FrontierKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.f_cost
            .total_cmp(&other.f_cost)
            .then(self.sequence.cmp(&other.sequence))
    }
}

impl From<&SearchNode> for FrontierKey {
    fn from(node: &SearchNode) -> Self {
        Self {
            f_cost: node.f_cost(),
            sequence: node.sequence,
        }
    }
}
