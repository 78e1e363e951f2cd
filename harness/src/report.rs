//! Query reports: the caller-facing shape of a search outcome.
//!
//! No file I/O in this module. Reports are deterministic in-memory values
//! with a canonical JSON form and a content digest, so two runs over the
//! same request can be compared byte for byte.

use meridian_kernel::model::{NodeId, Position};
use meridian_kernel::proof::canon::{canonical_json_bytes, finite_number, CanonError};
use meridian_kernel::proof::hash::{canonical_hash, ContentHash, HashDomain};
use meridian_search::policy::SearchPolicy;
use meridian_search::search::SearchStats;
use meridian_search::trace::SearchTrace;

/// One row of the step-by-step cost breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct PathStep {
    pub node: NodeId,
    pub label: String,
    pub coordinates: Position,
    /// Best cost from start to this node.
    pub g_cost: f64,
    /// Heuristic estimate from this node to the goal.
    pub h_cost: f64,
    /// Entry cost charged at this node (zero for the start unless the policy
    /// includes it).
    pub traversal_cost: f64,
}

/// A successful query.
#[derive(Debug, Clone)]
pub struct PathReport {
    pub start: NodeId,
    pub goal: NodeId,
    pub path: Vec<NodeId>,
    pub labels: Vec<String>,
    pub transitions: Vec<(NodeId, NodeId)>,
    pub steps: Vec<PathStep>,
    /// `cost_so_far[goal]` as recorded by the search.
    pub total_cost: f64,
    pub heuristic: &'static str,
    pub policy: SearchPolicy,
    pub trace: SearchTrace,
    pub stats: SearchStats,
    pub graph_digest: ContentHash,
}

/// A query whose goal is unreachable from its start.
#[derive(Debug, Clone)]
pub struct NoPathReport {
    pub start: NodeId,
    pub goal: NodeId,
    pub heuristic: &'static str,
    pub policy: SearchPolicy,
    pub trace: SearchTrace,
    pub stats: SearchStats,
    pub graph_digest: ContentHash,
}

/// Outcome of a well-formed query. "No path" is not an error.
#[derive(Debug, Clone)]
pub enum QueryOutcome {
    Found(PathReport),
    NoPath(NoPathReport),
}

impl QueryOutcome {
    #[must_use]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    #[must_use]
    pub fn as_found(&self) -> Option<&PathReport> {
        match self {
            Self::Found(report) => Some(report),
            Self::NoPath(_) => None,
        }
    }

    #[must_use]
    pub fn trace(&self) -> &SearchTrace {
        match self {
            Self::Found(report) => &report.trace,
            Self::NoPath(report) => &report.trace,
        }
    }

    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        match self {
            Self::Found(report) => &report.stats,
            Self::NoPath(report) => &report.stats,
        }
    }

    #[must_use]
    pub fn graph_digest(&self) -> &ContentHash {
        match self {
            Self::Found(report) => &report.graph_digest,
            Self::NoPath(report) => &report.graph_digest,
        }
    }

    /// Convert to a `serde_json::Value` for canonical serialization.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError::NonFiniteNumber`] if any cost overflowed to
    /// `inf`; such a report is refused rather than written with `null`.
    pub fn to_json_value(&self) -> Result<serde_json::Value, CanonError> {
        let value = match self {
            Self::Found(r) => serde_json::json!({
                "goal": r.goal.as_str(),
                "graph_digest": r.graph_digest.as_str(),
                "heuristic": r.heuristic,
                "labels": r.labels,
                "outcome": "found",
                "path": r.path.iter().map(NodeId::as_str).collect::<Vec<_>>(),
                "policy": policy_to_json(&r.policy),
                "start": r.start.as_str(),
                "stats": stats_to_json(&r.stats),
                "steps": r.steps.iter().map(step_to_json).collect::<Result<Vec<_>, _>>()?,
                "total_cost": finite_number(r.total_cost)?,
                "trace": r.trace.to_json_value()?,
                "trace_digest": r.trace.digest()?.as_str(),
                "transitions": r.transitions
                    .iter()
                    .map(|(from, to)| serde_json::json!([from.as_str(), to.as_str()]))
                    .collect::<Vec<_>>(),
            }),
            Self::NoPath(r) => serde_json::json!({
                "goal": r.goal.as_str(),
                "graph_digest": r.graph_digest.as_str(),
                "heuristic": r.heuristic,
                "outcome": "no_path",
                "policy": policy_to_json(&r.policy),
                "start": r.start.as_str(),
                "stats": stats_to_json(&r.stats),
                "trace": r.trace.to_json_value()?,
                "trace_digest": r.trace.digest()?.as_str(),
            }),
        };
        Ok(value)
    }

    /// Serialize the report to canonical JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, CanonError> {
        canonical_json_bytes(&self.to_json_value()?)
    }

    /// Content hash of the canonical report.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        let bytes = self.to_canonical_json_bytes()?;
        Ok(canonical_hash(HashDomain::QueryReport, &bytes))
    }
}

fn step_to_json(s: &PathStep) -> Result<serde_json::Value, CanonError> {
    Ok(serde_json::json!({
        "coordinates": [finite_number(s.coordinates.x)?, finite_number(s.coordinates.y)?],
        "g_cost": finite_number(s.g_cost)?,
        "h_cost": finite_number(s.h_cost)?,
        "label": s.label,
        "node": s.node.as_str(),
        "traversal_cost": finite_number(s.traversal_cost)?,
    }))
}

fn policy_to_json(p: &SearchPolicy) -> serde_json::Value {
    serde_json::json!({
        "start_cost": p.start_cost.as_str(),
        "trace": p.trace.as_str(),
    })
}

fn stats_to_json(s: &SearchStats) -> serde_json::Value {
    serde_json::json!({
        "expansions": s.expansions,
        "frontier_high_water": s.frontier_high_water,
        "pushes": s.pushes,
        "stale_skipped": s.stale_skipped,
    })
}
