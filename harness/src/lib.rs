//! Meridian Harness: the caller side of the search engine.
//!
//! The harness decodes a query, validates it, runs the engine, and packages
//! the outcome as a report (`request` → `runner` → `report`).
//!
//! The harness does NOT implement search logic; it delegates to
//! `meridian_search`. It owns validation and result shaping only.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod report;
pub mod request;
pub mod runner;
