//! # nscache - Store Provider Implementations
//!
//! Implementations of the [`KeyValueStore`] port defined in `nsc-domain`.
//!
//! | Provider | Type | Description |
//! |----------|------|-------------|
//! | [`store::RedisStore`] | Remote | Redis, optimistic transactions via WATCH/MULTI/EXEC |
//! | [`store::InMemoryStore`] | Local | Process-local store with version-stamped watches |
//!
//! ## Feature Flags
//!
//! ```toml
//! [dependencies]
//! nsc-providers = { version = "0.1", default-features = false, features = ["store-redis"] }
//! ```

// Re-export nsc-domain types commonly used with providers
pub use nsc_domain::error::{Error, Result};
pub use nsc_domain::ports::{KeyValueStore, WatchSession};

/// Provider-specific constants
pub mod constants;

/// Store provider implementations
pub mod store;

/// Shared utilities for provider implementations
pub mod utils;
