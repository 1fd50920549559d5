//! Atomic Cache Port
//!
//! Public operation surface of a namespaced cache. Keys are unqualified here;
//! the implementation prefixes them with its [`Namespace`].

use crate::error::Result;
use crate::value_objects::{CacheValue, ClearReport, Namespace};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Cache Operation Statistics
///
/// Counts what one cache handle observed; the store itself keeps no stats.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CacheStats {
    /// Number of `get` calls that found a value
    pub hits: u64,
    /// Number of `get` calls that found nothing
    pub misses: u64,
    /// Cache hit rate (0.0 to 1.0)
    pub hit_rate: f64,
    /// Compare-and-set/delete calls that committed
    pub cas_committed: u64,
    /// Compare-and-set/delete calls that returned false (mismatch or conflict)
    pub cas_rejected: u64,
}

impl CacheStats {
    /// Create empty cache statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Calculate hit rate from hits and misses
    pub fn calculate_hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total > 0 {
            self.hits as f64 / total as f64
        } else {
            0.0
        }
    }
}

/// Atomic Cache Port
///
/// # Example
///
/// ```ignore
/// use nsc_domain::ports::AtomicCache;
/// use serde_json::json;
///
/// cache.set("user:1", &json!({"name": "ada"}), None).await?;
/// if cache.cas("user:1", &json!({"name": "ada"}), &json!({"name": "grace"})).await? {
///     // we won the race
/// }
/// ```
#[async_trait]
pub trait AtomicCache: Send + Sync + std::fmt::Debug {
    /// Namespace every key is qualified with
    fn namespace(&self) -> &Namespace;

    /// Decoded value of a key, `None` if absent
    async fn get(&self, key: &str) -> Result<Option<CacheValue>>;

    /// Unconditional write; `None` or a zero `ttl` means no expiry
    async fn set(&self, key: &str, value: &CacheValue, ttl: Option<Duration>) -> Result<()>;

    /// Whether a key exists
    async fn has_key(&self, key: &str) -> Result<bool>;

    /// Delete a key; returns whether it existed
    async fn remove(&self, key: &str) -> Result<bool>;

    /// Delete every key starting with `prefix` (best-effort, never fails)
    async fn clear(&self, prefix: &str) -> ClearReport;

    /// Write only if absent; returns whether the key was created
    async fn add(&self, key: &str, value: &CacheValue, ttl: Option<Duration>) -> Result<bool>;

    /// Increment a counter, creating it from 0 when absent
    async fn inc(&self, key: &str, step: i64) -> Result<i64>;

    /// Decrement an existing counter; `None` when the key is absent
    async fn dec(&self, key: &str, step: i64) -> Result<Option<i64>>;

    /// Replace the value only if it currently equals `old`
    ///
    /// An absent key compares as `null`, so `old = null` creates it.
    async fn cas(&self, key: &str, old: &CacheValue, new: &CacheValue) -> Result<bool>;

    /// Delete the key only if its value currently equals `old`
    ///
    /// An absent key compares as `null`.
    async fn cad(&self, key: &str, old: &CacheValue) -> Result<bool>;

    /// Whether the backing store is reachable and recent enough
    async fn is_available(&self) -> bool;

    /// Statistics observed by this handle
    fn stats(&self) -> CacheStats;
}
