//! Remaining-cost estimators.
//!
//! A* is optimal only if the estimate never exceeds the true remaining cost.
//! [`Euclidean`] satisfies this whenever edge weights and traversal costs are
//! non-negative and at least the straight-line distance between endpoints;
//! the graph does not enforce the second condition.

use meridian_kernel::model::Position;

/// Estimate of the cost still to pay from `from` to `to`.
///
/// Implementations must be pure: same inputs, same output.
pub trait Heuristic: Send + Sync {
    fn estimate(&self, from: &Position, to: &Position) -> f64;

    /// Stable name recorded in reports.
    fn name(&self) -> &'static str;
}

/// Straight-line distance. The default heuristic.
#[derive(Debug, Clone, Copy, Default)]
pub struct Euclidean;

impl Heuristic for Euclidean {
    fn estimate(&self, from: &Position, to: &Position) -> f64 {
        from.distance_to(to)
    }

    fn name(&self) -> &'static str {
        "euclidean"
    }
}

/// Always zero. Reduces the engine to Dijkstra's algorithm.
#[derive(Debug, Clone, Copy, Default)]
pub struct Zero;

impl Heuristic for Zero {
    fn estimate(&self, _from: &Position, _to: &Position) -> f64 {
        0.0
    }

    fn name(&self) -> &'static str {
        "zero"
    }
}
