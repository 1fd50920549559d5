//! In-memory key-value store
//!
//! Process-local implementation of [`KeyValueStore`] with the store semantics
//! the cache relies on: lazy TTL expiry, cursor-based scans, SET NX,
//! INCRBY/DECRBY and optimistic watch sessions.
//!
//! ## Watch semantics
//!
//! Every mutation stamps the key's slot with a fresh version from a global
//! clock. Deleting or expiring a key keeps a tombstone slot with the new
//! version, so a watch taken on a live key is invalidated by its deletion and
//! a watch taken on an absent key is invalidated by its creation. A commit
//! applies its write only if the slot version is still the one observed by
//! [`KeyValueStore::watch`]; the check and the write happen under the slot's
//! lock.

use crate::constants::{MEMORY_PROVIDER_NAME, MEMORY_SCAN_DEFAULT_COUNT};
use crate::utils::glob_match;
use async_trait::async_trait;
use dashmap::DashMap;
use nsc_domain::error::{Error, Result};
use nsc_domain::ports::{KeyValueStore, WatchSession};
use nsc_domain::value_objects::{ScanPage, StoreInfo, TransactionOp};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Default)]
struct Slot {
    value: Option<String>,
    expires_at: Option<Instant>,
    version: u64,
}

impl Slot {
    /// Turn an expired value into a tombstone
    fn expire_if_due(&mut self, now: Instant, clock: &AtomicU64) {
        if self.value.is_some() && self.expires_at.is_some_and(|at| at <= now) {
            self.value = None;
            self.expires_at = None;
            self.version = tick(clock);
        }
    }

    fn is_live(&self, now: Instant) -> bool {
        self.value.is_some() && self.expires_at.is_none_or(|at| at > now)
    }

    fn write(&mut self, value: String, expires_at: Option<Instant>, clock: &AtomicU64) {
        self.value = Some(value);
        self.expires_at = expires_at;
        self.version = tick(clock);
    }

    fn remove(&mut self, clock: &AtomicU64) -> bool {
        let existed = self.value.take().is_some();
        self.expires_at = None;
        self.version = tick(clock);
        existed
    }
}

fn tick(clock: &AtomicU64) -> u64 {
    clock.fetch_add(1, Ordering::SeqCst) + 1
}

fn deadline(ttl: Option<Duration>) -> Option<Instant> {
    ttl.filter(|ttl| !ttl.is_zero())
        .map(|ttl| Instant::now() + ttl)
}

/// In-memory key-value store
///
/// Cloning yields another handle onto the same data, which is how several
/// caches share one store in tests.
///
/// Deleted and expired keys stay behind as tombstones, so the map grows with
/// every distinct key ever written until [`InMemoryStore::purge`] runs.
/// Long-lived processes with unbounded key sets should purge periodically
/// or use the Redis provider.
///
/// # Example
///
/// ```rust
/// use nsc_providers::store::InMemoryStore;
///
/// let store = InMemoryStore::new();
/// assert_eq!(store.len(), 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    slots: Arc<DashMap<String, Slot>>,
    clock: Arc<AtomicU64>,
}

impl InMemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live keys
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.slots.iter().filter(|slot| slot.is_live(now)).count()
    }

    /// Number of slots held, tombstones included
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Whether the store holds no live keys
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop tombstones and expired entries
    ///
    /// Outstanding watches on purged keys observe the key as freshly absent
    /// and running scans may skip keys, so only call this while the store is
    /// otherwise idle.
    pub fn purge(&self) {
        let now = Instant::now();
        self.slots.retain(|_, slot| slot.is_live(now));
    }

    fn read(&self, key: &str) -> Option<String> {
        let mut slot = self.slots.get_mut(key)?;
        slot.expire_if_due(Instant::now(), &self.clock);
        slot.value.clone()
    }

    fn version_of(&self, key: &str) -> u64 {
        match self.slots.get_mut(key) {
            Some(mut slot) => {
                slot.expire_if_due(Instant::now(), &self.clock);
                slot.version
            }
            None => 0,
        }
    }

    fn apply_delta(&self, key: &str, delta: i64) -> Result<i64> {
        let mut slot = self.slots.entry(key.to_string()).or_default();
        slot.expire_if_due(Instant::now(), &self.clock);
        let current = match &slot.value {
            Some(raw) => raw
                .parse::<i64>()
                .map_err(|_| Error::infrastructure("value is not an integer or out of range"))?,
            None => 0,
        };
        let next = current
            .checked_add(delta)
            .ok_or_else(|| Error::infrastructure("increment or decrement would overflow"))?;
        // INCRBY keeps an existing TTL
        let expires_at = slot.expires_at;
        slot.write(next.to_string(), expires_at, &self.clock);
        Ok(next)
    }
}

#[async_trait]
impl KeyValueStore for InMemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read(key))
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<()> {
        let mut slot = self.slots.entry(key.to_string()).or_default();
        slot.write(value.to_string(), deadline(ttl), &self.clock);
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.read(key).is_some())
    }

    async fn delete(&self, keys: &[String]) -> Result<u64> {
        let now = Instant::now();
        let mut removed = 0;
        for key in keys {
            if let Some(mut slot) = self.slots.get_mut(key) {
                slot.expire_if_due(now, &self.clock);
                // Deleting an absent key is not a modification
                if slot.value.is_some() && slot.remove(&self.clock) {
                    removed += 1;
                }
            }
        }
        Ok(removed)
    }

    async fn scan(&self, cursor: u64, pattern: &str, count: usize) -> Result<ScanPage> {
        // The cursor indexes the sorted slot keys, tombstones included, so
        // deleting keys between round-trips does not shift later positions.
        let mut ordered: Vec<String> = self.slots.iter().map(|entry| entry.key().clone()).collect();
        ordered.sort();

        let count = if count == 0 {
            MEMORY_SCAN_DEFAULT_COUNT
        } else {
            count
        };
        let start = usize::try_from(cursor)
            .map_err(|_| Error::invalid_argument(format!("invalid scan cursor {cursor}")))?
            .min(ordered.len());
        let end = start.saturating_add(count).min(ordered.len());
        let next = if end >= ordered.len() { 0 } else { end as u64 };

        let now = Instant::now();
        let keys = ordered[start..end]
            .iter()
            .filter(|key| glob_match(pattern, key))
            .filter(|key| self.slots.get(*key).is_some_and(|slot| slot.is_live(now)))
            .cloned()
            .collect();

        Ok(ScanPage { cursor: next, keys })
    }

    async fn set_if_absent(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<bool> {
        let mut slot = self.slots.entry(key.to_string()).or_default();
        slot.expire_if_due(Instant::now(), &self.clock);
        if slot.value.is_some() {
            return Ok(false);
        }
        slot.write(value.to_string(), deadline(ttl), &self.clock);
        Ok(true)
    }

    async fn increment_by(&self, key: &str, step: i64) -> Result<i64> {
        self.apply_delta(key, step)
    }

    async fn decrement_by(&self, key: &str, step: i64) -> Result<i64> {
        let delta = step
            .checked_neg()
            .ok_or_else(|| Error::infrastructure("decrement would overflow"))?;
        self.apply_delta(key, delta)
    }

    async fn watch(&self, key: &str) -> Result<Box<dyn WatchSession>> {
        let version = self.version_of(key);
        Ok(Box::new(InMemoryWatchSession {
            store: self.clone(),
            key: key.to_string(),
            version,
        }))
    }

    async fn server_info(&self) -> Result<StoreInfo> {
        Ok(StoreInfo {
            name: MEMORY_PROVIDER_NAME.to_string(),
            version: None,
        })
    }

    fn provider_name(&self) -> &str {
        MEMORY_PROVIDER_NAME
    }
}

/// Watch session over an [`InMemoryStore`] key
#[derive(Debug)]
pub struct InMemoryWatchSession {
    store: InMemoryStore,
    key: String,
    version: u64,
}

#[async_trait]
impl WatchSession for InMemoryWatchSession {
    fn key(&self) -> &str {
        &self.key
    }

    async fn get(&mut self) -> Result<Option<String>> {
        Ok(self.store.read(&self.key))
    }

    async fn exists(&mut self) -> Result<bool> {
        Ok(self.store.read(&self.key).is_some())
    }

    async fn commit(self: Box<Self>, op: TransactionOp) -> Result<bool> {
        let mut slot = self.store.slots.entry(self.key.clone()).or_default();
        slot.expire_if_due(Instant::now(), &self.store.clock);
        if slot.version != self.version {
            return Ok(false);
        }
        match op {
            // SET inside a transaction clears any TTL
            TransactionOp::Set(value) => slot.write(value, None, &self.store.clock),
            TransactionOp::Delete => {
                slot.remove(&self.store.clock);
            }
        }
        Ok(true)
    }

    async fn unwatch(self: Box<Self>) -> Result<()> {
        Ok(())
    }
}
