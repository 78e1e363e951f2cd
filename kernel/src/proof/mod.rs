//! Proof module: canonical JSON and content hashing.
//!
//! Depends on nothing else in the kernel. `model` depends on `proof` for
//! graph digests.

pub mod canon;
pub mod hash;
pub mod hash_domain;
