//! Core plumbing for Loreforge.
//!
//! This crate holds what every tool shares: the deterministic PRNG that makes
//! generation reproducible from a seed, the error type, the data directory
//! that locates the static JSON tables, and date helpers. It does no I/O on
//! stdout and knows nothing about names, fates, or rubrics.

/// Data directory resolution and JSON file loading.
pub mod data;
/// Error types used throughout the workspace.
pub mod error;
/// Deterministic linear-congruential generator.
pub mod rng;
/// Calendar helpers for stamping files and documents.
pub mod time;

/// Re-export data directory helpers.
pub use data::{DataDir, load_json, read_json, write_json_pretty};
/// Re-export error types.
pub use error::{LfError, LfResult};
/// Re-export the generator.
pub use rng::{Lcg, random_seed};
