//! Canonical JSON bytes: the single serialization-for-hashing implementation.
//!
//! All digest flows that involve JSON route through this module.
//!
//! # Canonicalization rules
//!
//! 1. Object keys are sorted lexicographically (byte order) at every depth,
//!    whatever map ordering `serde_json` was built with.
//! 2. Compact form, RFC 8259 escapes, integers verbatim, floats in shortest
//!    round-trip form. All of this is `serde_json`'s own writer.
//! 3. Cost values enter JSON only through [`finite_number`]. A `serde_json`
//!    value cannot hold `inf` or `NaN` (`json!` silently turns them into
//!    `null`), so the check has to happen before the value is built.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;

/// Error type for canonical JSON serialization.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CanonError {
    /// A cost or coordinate was `inf` or `NaN`.
    #[error("non-finite number in canonical JSON: {raw}")]
    NonFiniteNumber { raw: String },
    /// The JSON writer failed.
    #[error("canonical JSON encoding failed: {message}")]
    Encode { message: String },
}

/// A JSON number for `value`, refusing values JSON cannot represent.
///
/// # Errors
///
/// Returns [`CanonError::NonFiniteNumber`] for `inf`, `-inf` and `NaN`.
pub fn finite_number(value: f64) -> Result<Value, CanonError> {
    serde_json::Number::from_f64(value)
        .map(Value::Number)
        .ok_or_else(|| CanonError::NonFiniteNumber {
            raw: value.to_string(),
        })
}

/// Produce canonical JSON bytes from a `serde_json::Value`.
///
/// # Errors
///
/// Returns [`CanonError::Encode`] if the writer fails.
pub fn canonical_json_bytes(value: &Value) -> Result<Vec<u8>, CanonError> {
    serde_json::to_vec(&SortedKeys(value)).map_err(|e| CanonError::Encode {
        message: e.to_string(),
    })
}

/// Serializes a value with object keys in byte order.
struct SortedKeys<'a>(&'a Value);

impl Serialize for SortedKeys<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Value::Array(items) => serializer.collect_seq(items.iter().map(SortedKeys)),
            Value::Object(map) => {
                let sorted: BTreeMap<&str, SortedKeys<'_>> = map
                    .iter()
                    .map(|(k, v)| (k.as_str(), SortedKeys(v)))
                    .collect();
                serializer.collect_map(sorted)
            }
            scalar => scalar.serialize(serializer),
        }
    }
}
