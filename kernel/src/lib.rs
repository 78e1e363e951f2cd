//! Meridian Kernel: the graph model and digest primitives.
//!
//! # API Surface
//!
//! - [`model::GraphBuilder::build`] -- validate nodes and edges into an immutable [`model::Graph`]
//! - [`model::Graph::neighbors`] -- directed or undirected one-step expansion
//! - [`proof::canon::canonical_json_bytes`] -- the single canonical JSON writer
//! - [`proof::hash::canonical_hash`] -- domain-separated SHA-256
//!
//! # Module Dependency Direction
//!
//! `proof` ← `model`
//!
//! One-way only. `model` uses `proof` for graph digests; `proof` depends on
//! nothing internal.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod model;
pub mod proof;
