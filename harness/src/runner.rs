//! Query runner: validate, search, reconstruct, report.
//!
//! # Pipeline
//!
//! ```text
//! GraphRequest::prepare() → search() → [goal reached?]
//!   yes → reconstruct() → PathReport
//!   no  → NoPathReport
//! ```
//!
//! The runner holds no state between calls; every query builds and owns its
//! own `Graph`.

use meridian_kernel::model::NodeId;
use meridian_kernel::proof::canon::CanonError;
use meridian_search::error::{ReconstructError, SearchError};
use meridian_search::heuristic::{Euclidean, Heuristic};
use meridian_search::search::{search, SearchResult};
use thiserror::Error;

use crate::report::{NoPathReport, PathReport, PathStep, QueryOutcome};
use crate::request::{GraphRequest, PreparedQuery, RequestError};

/// Error during a query run.
///
/// An unreachable goal is NOT an error; see [`QueryOutcome::NoPath`].
#[derive(Debug, Error)]
pub enum RunError {
    /// The request was rejected before search.
    #[error(transparent)]
    Request(#[from] RequestError),
    /// The engine rejected its inputs.
    #[error("search rejected query: {0}")]
    Search(#[from] SearchError),
    /// The parent table was inconsistent with a reached goal.
    #[error("path reconstruction failed: {0}")]
    Reconstruct(#[from] ReconstructError),
    /// A path cost overflowed to `inf` even though every weight was finite.
    #[error("cost at {node} is not finite ({cost})")]
    NonFiniteCost { node: NodeId, cost: f64 },
    /// Canonical serialization of a digest input failed.
    #[error("canonical serialization failed: {0}")]
    Canon(#[from] CanonError),
}

/// Decode and run a JSON request with the Euclidean heuristic.
///
/// # Errors
///
/// See [`run_query`]; additionally [`RequestError::Decode`] for malformed bytes.
pub fn run_json(bytes: &[u8]) -> Result<QueryOutcome, RunError> {
    let request = GraphRequest::from_json_slice(bytes)?;
    run_query(&request)
}

/// Run a request with the Euclidean heuristic.
///
/// # Errors
///
/// Returns [`RunError`] for invalid requests or a broken parent chain.
pub fn run_query(request: &GraphRequest) -> Result<QueryOutcome, RunError> {
    run_query_with(request, &Euclidean)
}

/// Run a request with a caller-chosen heuristic.
///
/// # Errors
///
/// Returns [`RunError`] for invalid requests or a broken parent chain.
pub fn run_query_with(
    request: &GraphRequest,
    heuristic: &dyn Heuristic,
) -> Result<QueryOutcome, RunError> {
    let prepared = match request.prepare() {
        Ok(prepared) => prepared,
        Err(e) => {
            tracing::warn!(error = %e, "request rejected");
            return Err(e.into());
        }
    };
    run_prepared(&prepared, heuristic)
}

/// Run an already validated query.
///
/// # Errors
///
/// Returns [`RunError`] if the engine rejects the endpoints or the parent
/// chain is broken.
pub fn run_prepared(
    query: &PreparedQuery,
    heuristic: &dyn Heuristic,
) -> Result<QueryOutcome, RunError> {
    let graph_digest = query.graph.digest()?;
    let result = search(
        &query.graph,
        &query.start,
        &query.goal,
        heuristic,
        &query.policy,
    )?;

    let outcome = match result.total_cost() {
        Some(total_cost) => {
            let path = result.path(&query.graph)?;
            let steps = build_steps(query, &result, &path.nodes, heuristic);
            if let Some(step) = steps
                .iter()
                .find(|s| !(s.g_cost.is_finite() && s.h_cost.is_finite()))
            {
                tracing::warn!(node = %step.node, "path cost overflowed");
                return Err(RunError::NonFiniteCost {
                    node: step.node.clone(),
                    cost: step.g_cost + step.h_cost,
                });
            }
            QueryOutcome::Found(PathReport {
                start: result.start,
                goal: result.goal,
                path: path.nodes,
                labels: path.labels,
                transitions: path.transitions,
                steps,
                total_cost,
                heuristic: heuristic.name(),
                policy: query.policy,
                trace: result.trace,
                stats: result.stats,
                graph_digest,
            })
        }
        None => QueryOutcome::NoPath(NoPathReport {
            start: result.start,
            goal: result.goal,
            heuristic: heuristic.name(),
            policy: query.policy,
            trace: result.trace,
            stats: result.stats,
            graph_digest,
        }),
    };

    tracing::info!(
        start = %query.start,
        goal = %query.goal,
        found = outcome.is_found(),
        expansions = outcome.stats().expansions,
        "query complete"
    );
    Ok(outcome)
}

fn build_steps(
    query: &PreparedQuery,
    result: &SearchResult,
    nodes: &[NodeId],
    heuristic: &dyn Heuristic,
) -> Vec<PathStep> {
    let graph = &query.graph;
    let goal_position = graph.node(&query.goal).map(|n| n.position);
    nodes
        .iter()
        .filter_map(|id| {
            let node = graph.node(id)?;
            let h_cost =
                goal_position.map_or(0.0, |goal| heuristic.estimate(&node.position, &goal));
            let traversal_cost = if *id == query.start {
                query.policy.start_cost.initial_cost(node)
            } else {
                node.traversal_cost
            };
            Some(PathStep {
                node: id.clone(),
                label: node.label.clone(),
                coordinates: node.position,
                g_cost: result.cost_so_far.get(id).copied().unwrap_or(0.0),
                h_cost,
                traversal_cost,
            })
        })
        .collect()
}
