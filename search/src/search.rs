//! Search entry point and expansion loop.

use std::collections::BTreeMap;

use meridian_kernel::model::{Graph, NodeId};

use crate::error::{NodeRole, ReconstructError, SearchError};
use crate::frontier::Frontier;
use crate::heuristic::{Euclidean, Heuristic};
use crate::node::SearchNode;
use crate::policy::SearchPolicy;
use crate::reconstruct::{reconstruct, ReconstructedPath};
use crate::trace::{SearchTrace, TraceEvent};

/// Why the search stopped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Termination {
    /// The goal was popped from the frontier.
    GoalReached { total_cost: f64 },
    /// The frontier emptied first; the goal is unreachable.
    FrontierExhausted,
}

/// Aggregate counters for one search call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Live entries popped and expanded (goal pop included).
    pub expansions: u64,
    /// Popped entries discarded because a cheaper entry superseded them.
    pub stale_skipped: u64,
    /// Total frontier insertions.
    pub pushes: u64,
    /// Largest frontier size observed.
    pub frontier_high_water: u64,
}

/// Result of a search execution.
///
/// Always contains the parent and cost tables and the trace, whether or not
/// the goal was reached. Check [`SearchResult::is_goal_reached`] before
/// reconstructing a path.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub start: NodeId,
    pub goal: NodeId,
    /// Parent pointer for every node reached except the start.
    pub came_from: BTreeMap<NodeId, NodeId>,
    /// Best `g_cost` for every node reached, the start included.
    pub cost_so_far: BTreeMap<NodeId, f64>,
    pub trace: SearchTrace,
    pub stats: SearchStats,
    pub termination: Termination,
}

impl SearchResult {
    /// Returns `true` if the search terminated because the goal was popped.
    #[must_use]
    pub fn is_goal_reached(&self) -> bool {
        matches!(self.termination, Termination::GoalReached { .. })
    }

    /// `cost_so_far[goal]` when the goal was reached.
    #[must_use]
    pub fn total_cost(&self) -> Option<f64> {
        match self.termination {
            Termination::GoalReached { total_cost } => Some(total_cost),
            Termination::FrontierExhausted => None,
        }
    }

    /// Walk the parent table from goal to start.
    ///
    /// # Errors
    ///
    /// See [`reconstruct`].
    pub fn path(&self, graph: &Graph) -> Result<ReconstructedPath, ReconstructError> {
        reconstruct(&self.came_from, &self.start, &self.goal, graph)
    }
}

/// Run A* with the Euclidean heuristic and the default policy.
///
/// # Errors
///
/// Returns [`SearchError::UnknownNode`] if `start` or `goal` is not in `graph`.
pub fn search_euclidean(
    graph: &Graph,
    start: &NodeId,
    goal: &NodeId,
) -> Result<SearchResult, SearchError> {
    search(graph, start, goal, &Euclidean, &SearchPolicy::default())
}

/// Run A* from `start` to `goal`.
///
/// Both runtime outcomes (goal reached, frontier exhausted) return
/// `Ok(SearchResult)`; an unreachable goal is data, not an error.
///
/// Nodes are never barred from re-expansion. A neighbor is re-queued only
/// when its cost strictly improves, and a popped entry whose `g_cost` exceeds
/// the recorded best is skipped as stale.
///
/// # Errors
///
/// Returns [`SearchError::UnknownNode`] only as a pre-flight failure, before
/// any node is expanded.
pub fn search(
    graph: &Graph,
    start: &NodeId,
    goal: &NodeId,
    heuristic: &dyn Heuristic,
    policy: &SearchPolicy,
) -> Result<SearchResult, SearchError> {
    let start_node = graph.node(start).ok_or_else(|| SearchError::UnknownNode {
        role: NodeRole::Start,
        id: start.clone(),
    })?;
    let goal_node = graph.node(goal).ok_or_else(|| SearchError::UnknownNode {
        role: NodeRole::Goal,
        id: goal.clone(),
    })?;

    let mut frontier = Frontier::new();
    let mut came_from: BTreeMap<NodeId, NodeId> = BTreeMap::new();
    let mut cost_so_far: BTreeMap<NodeId, f64> = BTreeMap::new();
    let mut trace = SearchTrace::new(policy.trace);
    let mut stats = SearchStats::default();

    let start_g = policy.start_cost.initial_cost(start_node);
    let start_h = heuristic.estimate(&start_node.position, &goal_node.position);
    cost_so_far.insert(start.clone(), start_g);
    frontier.push(SearchNode::new(start.clone(), start_g, start_h));

    tracing::debug!(
        start = %start,
        goal = %goal,
        heuristic = heuristic.name(),
        start_cost = policy.start_cost.as_str(),
        "search started"
    );

    let termination = loop {
        let Some(current) = frontier.pop() else {
            trace.record(TraceEvent::FrontierExhausted {
                goal: goal.clone(),
                label: goal_node.label.clone(),
            });
            break Termination::FrontierExhausted;
        };

        let current_label = graph
            .node(&current.node_id)
            .map_or_else(|| current.node_id.to_string(), |n| n.label.clone());
        let current_g = cost_so_far
            .get(&current.node_id)
            .copied()
            .unwrap_or(current.g_cost);

        if current.g_cost > current_g {
            stats.stale_skipped += 1;
            trace.record(TraceEvent::StaleEntrySkipped {
                node: current.node_id.clone(),
                label: current_label,
                f_cost: current.f_cost(),
                best_g_cost: current_g,
            });
            continue;
        }

        stats.expansions += 1;
        tracing::debug!(
            node = %current.node_id,
            g = current_g,
            f = current.f_cost(),
            sequence = current.sequence,
            "expanding"
        );
        trace.record(TraceEvent::Examine {
            node: current.node_id.clone(),
            label: current_label.clone(),
            g_cost: current_g,
            f_cost: current.f_cost(),
        });

        if current.node_id == *goal {
            trace.record(TraceEvent::GoalReached {
                node: current.node_id.clone(),
                label: current_label,
                total_cost: current_g,
            });
            break Termination::GoalReached {
                total_cost: current_g,
            };
        }

        for (neighbor_id, weight) in graph.neighbors(&current.node_id) {
            let Some(neighbor) = graph.node(neighbor_id) else {
                continue;
            };
            let tentative_g = current_g + weight + neighbor.traversal_cost;
            let improves = match cost_so_far.get(neighbor_id) {
                Some(&known) => tentative_g < known,
                None => true,
            };
            if !improves {
                continue;
            }

            cost_so_far.insert(neighbor_id.clone(), tentative_g);
            came_from.insert(neighbor_id.clone(), current.node_id.clone());
            let h_cost = heuristic.estimate(&neighbor.position, &goal_node.position);
            let child = SearchNode::new(neighbor_id.clone(), tentative_g, h_cost);
            let f_cost = child.f_cost();
            frontier.push(child);

            tracing::trace!(
                node = %neighbor_id,
                via = %current.node_id,
                g = tentative_g,
                h = h_cost,
                "relaxed"
            );
            trace.record(TraceEvent::Discovered {
                node: neighbor_id.clone(),
                label: neighbor.label.clone(),
                via: current.node_id.clone(),
                via_label: current_label.clone(),
                g_cost: tentative_g,
                h_cost,
                f_cost,
                traversal_cost: (neighbor.traversal_cost > 0.0).then_some(neighbor.traversal_cost),
            });
        }
    };

    stats.pushes = frontier.pushes();
    stats.frontier_high_water = frontier.high_water();

    tracing::debug!(
        reached = matches!(termination, Termination::GoalReached { .. }),
        expansions = stats.expansions,
        stale_skipped = stats.stale_skipped,
        "search finished"
    );

    Ok(SearchResult {
        start: start.clone(),
        goal: goal.clone(),
        came_from,
        cost_so_far,
        trace,
        stats,
        termination,
    })
}
