//! Domain Port Interfaces
//!
//! Boundary contracts between the cache and the outside world.
//!
//! | Port | Description |
//! |------|-------------|
//! | [`KeyValueStore`] | Remote store primitives, implemented in `nsc-providers` |
//! | [`WatchSession`] | Optimistic transaction scope on one key |
//! | [`AtomicCache`] | Namespaced cache surface, implemented in `nsc-infrastructure` |

/// Cache port
pub mod cache;
/// Store port
pub mod store;

pub use cache::{AtomicCache, CacheStats};
pub use store::{KeyValueStore, WatchSession};
