//! Human-readable record of the search's decisions.
//!
//! Events are appended in the order they happen. [`TraceEvent::render`]
//! produces the display line; the structured form feeds the trace digest.

use meridian_kernel::model::NodeId;
use meridian_kernel::proof::canon::{canonical_json_bytes, finite_number, CanonError};
use meridian_kernel::proof::hash::{canonical_hash, ContentHash, HashDomain};

use crate::policy::TraceMode;

/// A single search decision.
#[derive(Debug, Clone, PartialEq)]
pub enum TraceEvent {
    /// A live frontier entry was popped and is being expanded.
    Examine {
        node: NodeId,
        label: String,
        g_cost: f64,
        f_cost: f64,
    },
    /// A popped entry was older than the node's best known cost.
    StaleEntrySkipped {
        node: NodeId,
        label: String,
        f_cost: f64,
        best_g_cost: f64,
    },
    /// A neighbor's cost was set or strictly improved.
    Discovered {
        node: NodeId,
        label: String,
        via: NodeId,
        via_label: String,
        g_cost: f64,
        h_cost: f64,
        f_cost: f64,
        /// Present only when a non-zero entry cost was charged.
        traversal_cost: Option<f64>,
    },
    /// The goal was popped.
    GoalReached {
        node: NodeId,
        label: String,
        total_cost: f64,
    },
    /// The frontier emptied before the goal was popped.
    FrontierExhausted { goal: NodeId, label: String },
}

impl TraceEvent {
    /// The display line for this event.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Examine {
                label,
                g_cost,
                f_cost,
                ..
            } => format!("Examining {label} (g={g_cost:.2}, f={f_cost:.2})"),
            Self::StaleEntrySkipped {
                label,
                f_cost,
                best_g_cost,
                ..
            } => format!(
                "Skipping stale entry for {label} (f={f_cost:.2}); best g is {best_g_cost:.2}"
            ),
            Self::Discovered {
                label,
                via_label,
                g_cost,
                h_cost,
                f_cost,
                traversal_cost,
                ..
            } => {
                let mut line = format!(
                    "Updated {label} via {via_label}: g={g_cost:.2}, h={h_cost:.2}, f={f_cost:.2}"
                );
                if let Some(cost) = traversal_cost {
                    line.push_str(&format!(" (traversal cost {cost:.2} applied)"));
                }
                line
            }
            Self::GoalReached {
                label, total_cost, ..
            } => format!("Goal {label} reached with total cost {total_cost:.2}"),
            Self::FrontierExhausted { label, .. } => {
                format!("Frontier exhausted; no path to {label}")
            }
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Examine { .. } => "examine",
            Self::StaleEntrySkipped { .. } => "stale_entry_skipped",
            Self::Discovered { .. } => "discovered",
            Self::GoalReached { .. } => "goal_reached",
            Self::FrontierExhausted { .. } => "frontier_exhausted",
        }
    }

    fn to_json_value(&self) -> Result<serde_json::Value, CanonError> {
        let mut obj = match self {
            Self::Examine {
                node,
                g_cost,
                f_cost,
                ..
            } => serde_json::json!({
                "f_cost": finite_number(*f_cost)?,
                "g_cost": finite_number(*g_cost)?,
                "node": node.as_str(),
            }),
            Self::StaleEntrySkipped {
                node,
                f_cost,
                best_g_cost,
                ..
            } => serde_json::json!({
                "best_g_cost": finite_number(*best_g_cost)?,
                "f_cost": finite_number(*f_cost)?,
                "node": node.as_str(),
            }),
            Self::Discovered {
                node,
                via,
                g_cost,
                h_cost,
                f_cost,
                traversal_cost,
                ..
            } => serde_json::json!({
                "f_cost": finite_number(*f_cost)?,
                "g_cost": finite_number(*g_cost)?,
                "h_cost": finite_number(*h_cost)?,
                "node": node.as_str(),
                "traversal_cost": traversal_cost.map(finite_number).transpose()?,
                "via": via.as_str(),
            }),
            Self::GoalReached {
                node, total_cost, ..
            } => serde_json::json!({
                "node": node.as_str(),
                "total_cost": finite_number(*total_cost)?,
            }),
            Self::FrontierExhausted { goal, .. } => serde_json::json!({"goal": goal.as_str()}),
        };
        obj["type"] = serde_json::json!(self.kind());
        obj["line"] = serde_json::json!(self.render());
        Ok(obj)
    }
}

/// Ordered trace of one search call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchTrace {
    mode: TraceMode,
    events: Vec<TraceEvent>,
}

impl SearchTrace {
    #[must_use]
    pub fn new(mode: TraceMode) -> Self {
        Self {
            mode,
            events: Vec::new(),
        }
    }

    /// Append an event unless tracing is off.
    pub fn record(&mut self, event: TraceEvent) {
        if self.mode == TraceMode::Full {
            self.events.push(event);
        }
    }

    #[must_use]
    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Rendered lines in chronological order.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.events.iter().map(TraceEvent::render).collect()
    }

    /// Structured form of every event, in order.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError::NonFiniteNumber`] if any recorded cost overflowed.
    pub fn to_json_value(&self) -> Result<serde_json::Value, CanonError> {
        self.events
            .iter()
            .map(TraceEvent::to_json_value)
            .collect::<Result<Vec<_>, _>>()
            .map(serde_json::Value::Array)
    }

    /// Content hash of the canonical trace.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if canonical serialization fails.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        let bytes = canonical_json_bytes(&self.to_json_value()?)?;
        Ok(canonical_hash(HashDomain::SearchTrace, &bytes))
    }
}
