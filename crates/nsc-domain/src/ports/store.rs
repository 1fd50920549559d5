//! Key-Value Store Port
//!
//! Contract for the remote store the cache sits on. Implementations receive
//! fully qualified keys; namespacing is the cache adapter's job.
//!
//! ## Optimistic transactions
//!
//! The store has no native "set if current value equals X". Instead it offers
//! a watch scope: [`KeyValueStore::watch`] registers a key for change
//! detection and returns a [`WatchSession`]. Reads made through the session
//! establish a baseline, and [`WatchSession::commit`] applies a single write
//! only if nothing touched the key since the watch began.
//!
//! | Implementation | Provider |
//! |----------------|----------|
//! | Redis (WATCH/MULTI/EXEC) | `nsc_providers::store::RedisStore` |
//! | Process-local, version stamped | `nsc_providers::store::InMemoryStore` |

use crate::error::Result;
use crate::value_objects::{ScanPage, StoreInfo, TransactionOp};
use async_trait::async_trait;
use std::time::Duration;

/// Key-Value Store Port
///
/// Every single-key operation is assumed linearizable at the store.
#[async_trait]
pub trait KeyValueStore: Send + Sync + std::fmt::Debug {
    /// Raw value of a key, `None` if absent
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Unconditional write
    ///
    /// A non-zero `ttl` makes the key expire that long after the write.
    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<()>;

    /// Whether a key exists
    async fn exists(&self, key: &str) -> Result<bool>;

    /// Delete keys, returning how many actually existed
    async fn delete(&self, keys: &[String]) -> Result<u64>;

    /// One round-trip of a cursor-based glob scan
    ///
    /// Start with cursor `0`; the iteration is complete when the returned
    /// cursor is `0` again. `count` is a hint, pages may be larger or empty.
    async fn scan(&self, cursor: u64, pattern: &str, count: usize) -> Result<ScanPage>;

    /// Write only if the key is absent; returns whether it was created
    async fn set_if_absent(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<bool>;

    /// Atomically add `step` to an integer value, initializing a missing key to 0
    async fn increment_by(&self, key: &str, step: i64) -> Result<i64>;

    /// Atomically subtract `step` from an integer value, initializing a missing key to 0
    async fn decrement_by(&self, key: &str, step: i64) -> Result<i64>;

    /// Open a watch scope on one key
    async fn watch(&self, key: &str) -> Result<Box<dyn WatchSession>>;

    /// Server identity and version
    async fn server_info(&self) -> Result<StoreInfo>;

    /// Get the name/identifier of this provider implementation
    ///
    /// # Returns
    /// A string identifier for the provider (e.g., "redis", "memory")
    fn provider_name(&self) -> &str;
}

/// Watch scope for a single key
///
/// Lives for one compare-and-set / compare-and-delete call. It ends with
/// exactly one of [`commit`](WatchSession::commit) or
/// [`unwatch`](WatchSession::unwatch); an implementation must also release
/// the watch when the session is dropped without either.
#[async_trait]
pub trait WatchSession: Send {
    /// The watched key (qualified)
    fn key(&self) -> &str;

    /// Read the watched key's raw value
    async fn get(&mut self) -> Result<Option<String>>;

    /// Whether the watched key exists
    async fn exists(&mut self) -> Result<bool>;

    /// Atomically apply `op` unless the key changed since the watch began
    ///
    /// Returns `false` when the store aborted the transaction.
    async fn commit(self: Box<Self>, op: TransactionOp) -> Result<bool>;

    /// Abandon the watch without writing
    async fn unwatch(self: Box<Self>) -> Result<()>;
}
