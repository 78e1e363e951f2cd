//! Meridian Search: deterministic A* over a validated graph.
//!
//! This crate provides the search layer. It depends only on
//! `meridian_kernel`; it does NOT depend on `meridian_harness`.
//!
//! # Crate dependency graph
//!
//! ```text
//! meridian_kernel  ←  meridian_search  ←  meridian_harness
//! (graph, digests)    (frontier, A*)      (requests, reports)
//! ```
//!
//! # Key types
//!
//! - [`heuristic::Heuristic`] -- remaining-cost estimator ([`heuristic::Euclidean`] by default)
//! - [`frontier::Frontier`] -- min-heap keyed by `(f_cost, insertion sequence)`
//! - [`search::search`] -- the A* loop, returning a [`search::SearchResult`]
//! - [`reconstruct::reconstruct`] -- parent-link walk from goal to start
//! - [`trace::SearchTrace`] -- chronological decision events
//! - [`policy::SearchPolicy`] -- start-cost and trace configuration

#![forbid(unsafe_code)]

pub mod error;
pub mod frontier;
pub mod heuristic;
pub mod node;
pub mod policy;
pub mod reconstruct;
pub mod search;
pub mod trace;
