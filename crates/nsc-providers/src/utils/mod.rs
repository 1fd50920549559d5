//! Shared utilities for store providers

/// Glob pattern matching (store SCAN MATCH semantics)
pub mod glob;

pub use glob::glob_match;
