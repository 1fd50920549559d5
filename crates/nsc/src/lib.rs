//! # nscache
//!
//! Namespaced key-value cache on top of Redis with optimistic
//! compare-and-set and compare-and-delete.
//!
//! This crate is the public facade: it re-exports the domain types, the
//! store providers and the infrastructure wiring, and hosts the `nsc` CLI.
//!
//! ## Example
//!
//! ```ignore
//! use nsc::{AtomicCache, NamespacedAtomicCache};
//! use nsc::providers::store::{RedisStore, RedisStoreConfig};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let store = Arc::new(RedisStore::connect(&RedisStoreConfig::default()).await?);
//! let sessions = NamespacedAtomicCache::new(store.clone(), "sessions:");
//! let locks = NamespacedAtomicCache::new(store, "locks:");
//!
//! if locks.add("job-42", &json!("worker-1"), None).await? {
//!     // ... work ...
//!     locks.cad("job-42", &json!("worker-1")).await?;
//! }
//! ```
//!
//! ## Architecture
//!
//! - `domain` - Errors, value codec, namespace, store and cache ports
//! - `providers` - Redis and in-memory store implementations
//! - `infrastructure` - Namespaced cache adapter, config, logging, health

/// Domain layer - errors, value objects and ports
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use nsc_domain::*;
}

/// Store providers
///
/// Re-exports from the providers crate for convenience
pub mod providers {
    pub use nsc_providers::*;
}

/// Infrastructure layer - cache adapter, config, logging and health
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use nsc_infrastructure::*;
}

pub mod cli;

// Re-export commonly used domain types at the crate root
pub use domain::*;

// Re-export the cache adapter and its wiring at the crate root
pub use infrastructure::{NamespacedAtomicCache, create_cache, create_store};
