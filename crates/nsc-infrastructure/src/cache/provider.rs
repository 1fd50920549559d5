//! Namespaced atomic cache
//!
//! Adapter from the public [`AtomicCache`] surface onto an injected
//! [`KeyValueStore`]. Every key is qualified with the cache's namespace before
//! it reaches the store, values are JSON encoded (integers raw), and
//! compare-and-set / compare-and-delete run as watched optimistic transactions.
//!
//! **ARCHITECTURE**: Uses `Arc<dyn KeyValueStore>` directly. The store handle
//! belongs to the application; any number of namespaced caches may share it.

use crate::health::check_store;
use async_trait::async_trait;
use nsc_domain::constants::{CLEAR_SCAN_BATCH, SCAN_CURSOR_START};
use nsc_domain::error::Result;
use nsc_domain::ports::{AtomicCache, CacheStats, KeyValueStore, WatchSession};
use nsc_domain::value_objects::{
    CacheValue, ClearReport, Namespace, TransactionOp, decode, encode_value,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Default)]
struct StatsCounters {
    hits: AtomicU64,
    misses: AtomicU64,
    cas_committed: AtomicU64,
    cas_rejected: AtomicU64,
}

/// Namespaced cache with optimistic compare-and-set
///
/// Cloning yields another handle to the same store, namespace and counters.
#[derive(Clone)]
pub struct NamespacedAtomicCache {
    store: Arc<dyn KeyValueStore>,
    namespace: Namespace,
    default_ttl: Option<Duration>,
    stats: Arc<StatsCounters>,
}

// Construction Methods
impl NamespacedAtomicCache {
    /// Create a cache over `store` whose keys all start with `namespace`
    pub fn new<N: Into<Namespace>>(store: Arc<dyn KeyValueStore>, namespace: N) -> Self {
        Self {
            store,
            namespace: namespace.into(),
            default_ttl: None,
            stats: Arc::new(StatsCounters::default()),
        }
    }

    /// TTL applied by `set`/`add` calls that pass `None`
    pub fn with_default_ttl(mut self, ttl: Option<Duration>) -> Self {
        self.default_ttl = ttl.filter(|ttl| !ttl.is_zero());
        self
    }

    /// Sibling cache on the same store under another namespace
    pub fn namespaced<N: Into<Namespace>>(&self, namespace: N) -> Self {
        Self::new(Arc::clone(&self.store), namespace).with_default_ttl(self.default_ttl)
    }

    /// The shared store handle
    pub fn store(&self) -> Arc<dyn KeyValueStore> {
        Arc::clone(&self.store)
    }

    fn qualify(&self, key: &str) -> String {
        self.namespace.qualify(key)
    }

    /// Explicit zero means "never expire" and wins over the default
    fn effective_ttl(&self, ttl: Option<Duration>) -> Option<Duration> {
        match ttl {
            None => self.default_ttl,
            Some(ttl) if ttl.is_zero() => None,
            Some(ttl) => Some(ttl),
        }
    }
}

// Typed Operations Methods
impl NamespacedAtomicCache {
    /// Get a typed value
    pub async fn get_as<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: DeserializeOwned + Send,
    {
        match self.get(key).await? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    /// Set a typed value
    pub async fn set_as<T>(&self, key: &str, value: &T, ttl: Option<Duration>) -> Result<()>
    where
        T: Serialize + Send + Sync,
    {
        let value = serde_json::to_value(value)?;
        self.set(key, &value, ttl).await
    }

    /// Add a typed value if the key is absent
    pub async fn add_as<T>(&self, key: &str, value: &T, ttl: Option<Duration>) -> Result<bool>
    where
        T: Serialize + Send + Sync,
    {
        let value = serde_json::to_value(value)?;
        self.add(key, &value, ttl).await
    }

    /// Compare-and-set with typed values
    ///
    /// Both values are serialized before the watch opens.
    pub async fn cas_as<T>(&self, key: &str, old: &T, new: &T) -> Result<bool>
    where
        T: Serialize + Send + Sync,
    {
        let old = serde_json::to_value(old)?;
        let new = serde_json::to_value(new)?;
        self.cas(key, &old, &new).await
    }

    /// Compare-and-delete with a typed value
    pub async fn cad_as<T>(&self, key: &str, old: &T) -> Result<bool>
    where
        T: Serialize + Send + Sync,
    {
        let old = serde_json::to_value(old)?;
        self.cad(key, &old).await
    }
}

// Transaction Helpers
impl NamespacedAtomicCache {
    /// Watch `key`, compare its value with `old` and apply `op` on a match
    async fn compare_and_commit(
        &self,
        operation: &'static str,
        key: &str,
        old: &CacheValue,
        op: TransactionOp,
    ) -> Result<bool> {
        let qualified = self.qualify(key);
        let mut session = self.store.watch(&qualified).await?;

        let current = match read_watched(session.as_mut()).await {
            Ok(current) => current,
            Err(e) => {
                if let Err(release) = session.unwatch().await {
                    warn!(namespace = %self.namespace, key, error = %release, "Failed to release watch");
                }
                return Err(e);
            }
        };

        // An absent key reads as null
        if current.as_ref().unwrap_or(&CacheValue::Null) != old {
            session.unwatch().await?;
            self.stats.cas_rejected.fetch_add(1, Ordering::Relaxed);
            debug!(namespace = %self.namespace, key, operation, outcome = "mismatch", "Comparison failed");
            return Ok(false);
        }

        let committed = session.commit(op).await?;
        if committed {
            self.stats.cas_committed.fetch_add(1, Ordering::Relaxed);
            debug!(namespace = %self.namespace, key, operation, outcome = "committed", "Transaction committed");
        } else {
            self.stats.cas_rejected.fetch_add(1, Ordering::Relaxed);
            debug!(namespace = %self.namespace, key, operation, outcome = "conflict", "Transaction aborted by a concurrent writer");
        }
        Ok(committed)
    }
}

/// Decode a raw read, probing existence when the read came back empty
///
/// A key that exists without a payload decodes as `Null`.
async fn settle<F>(raw: Option<String>, exists: F) -> Result<Option<CacheValue>>
where
    F: Future<Output = Result<bool>>,
{
    match raw {
        Some(raw) => decode(&raw).map(Some),
        None if exists.await? => Ok(Some(CacheValue::Null)),
        None => Ok(None),
    }
}

async fn read_watched(session: &mut dyn WatchSession) -> Result<Option<CacheValue>> {
    let raw = session.get().await?;
    settle(raw, session.exists()).await
}

#[async_trait]
impl AtomicCache for NamespacedAtomicCache {
    fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    async fn get(&self, key: &str) -> Result<Option<CacheValue>> {
        let qualified = self.qualify(key);
        let raw = self.store.get(&qualified).await?;
        let value = settle(raw, self.store.exists(&qualified)).await?;

        let counter = if value.is_some() {
            &self.stats.hits
        } else {
            &self.stats.misses
        };
        counter.fetch_add(1, Ordering::Relaxed);
        debug!(namespace = %self.namespace, key, hit = value.is_some(), "get");
        Ok(value)
    }

    async fn set(&self, key: &str, value: &CacheValue, ttl: Option<Duration>) -> Result<()> {
        let encoded = encode_value(value);
        let ttl = self.effective_ttl(ttl);
        self.store.set(&self.qualify(key), &encoded, ttl).await?;
        debug!(namespace = %self.namespace, key, ttl = ?ttl, "set");
        Ok(())
    }

    async fn has_key(&self, key: &str) -> Result<bool> {
        let exists = self.store.exists(&self.qualify(key)).await?;
        debug!(namespace = %self.namespace, key, exists, "has_key");
        Ok(exists)
    }

    async fn remove(&self, key: &str) -> Result<bool> {
        let removed = self.store.delete(&[self.qualify(key)]).await? > 0;
        debug!(namespace = %self.namespace, key, removed, "remove");
        Ok(removed)
    }

    async fn clear(&self, prefix: &str) -> ClearReport {
        let pattern = self.namespace.scan_pattern(prefix);
        let mut report = ClearReport::default();
        let mut cursor = SCAN_CURSOR_START;

        loop {
            let page = match self.store.scan(cursor, &pattern, CLEAR_SCAN_BATCH).await {
                Ok(page) => page,
                Err(e) => {
                    // Without a cursor the iteration cannot resume
                    report.failed_batches += 1;
                    warn!(namespace = %self.namespace, prefix, error = %e, "Scan failed, clear is incomplete");
                    break;
                }
            };

            if !page.keys.is_empty() {
                match self.store.delete(&page.keys).await {
                    Ok(removed) => report.removed += removed,
                    Err(e) => {
                        report.failed_batches += 1;
                        warn!(
                            namespace = %self.namespace,
                            prefix,
                            batch = page.keys.len(),
                            error = %e,
                            "Failed to delete a batch of keys"
                        );
                    }
                }
            }

            if page.is_last() {
                report.complete = true;
                break;
            }
            cursor = page.cursor;
        }

        debug!(
            namespace = %self.namespace,
            prefix,
            removed = report.removed,
            failed_batches = report.failed_batches,
            complete = report.complete,
            "clear"
        );
        report
    }

    async fn add(&self, key: &str, value: &CacheValue, ttl: Option<Duration>) -> Result<bool> {
        let encoded = encode_value(value);
        let ttl = self.effective_ttl(ttl);
        let created = self
            .store
            .set_if_absent(&self.qualify(key), &encoded, ttl)
            .await?;
        debug!(namespace = %self.namespace, key, created, "add");
        Ok(created)
    }

    async fn inc(&self, key: &str, step: i64) -> Result<i64> {
        let value = self.store.increment_by(&self.qualify(key), step).await?;
        debug!(namespace = %self.namespace, key, step, value, "inc");
        Ok(value)
    }

    async fn dec(&self, key: &str, step: i64) -> Result<Option<i64>> {
        let qualified = self.qualify(key);
        if !self.store.exists(&qualified).await? {
            debug!(namespace = %self.namespace, key, step, "dec on absent key");
            return Ok(None);
        }
        let value = self.store.decrement_by(&qualified, step).await?;
        debug!(namespace = %self.namespace, key, step, value, "dec");
        Ok(Some(value))
    }

    async fn cas(&self, key: &str, old: &CacheValue, new: &CacheValue) -> Result<bool> {
        let encoded = encode_value(new);
        self.compare_and_commit("cas", key, old, TransactionOp::Set(encoded))
            .await
    }

    async fn cad(&self, key: &str, old: &CacheValue) -> Result<bool> {
        self.compare_and_commit("cad", key, old, TransactionOp::Delete)
            .await
    }

    async fn is_available(&self) -> bool {
        check_store(self.store.as_ref()).await.status.is_healthy()
    }

    fn stats(&self) -> CacheStats {
        let mut stats = CacheStats {
            hits: self.stats.hits.load(Ordering::Relaxed),
            misses: self.stats.misses.load(Ordering::Relaxed),
            hit_rate: 0.0,
            cas_committed: self.stats.cas_committed.load(Ordering::Relaxed),
            cas_rejected: self.stats.cas_rejected.load(Ordering::Relaxed),
        };
        stats.hit_rate = stats.calculate_hit_rate();
        stats
    }
}

impl fmt::Debug for NamespacedAtomicCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamespacedAtomicCache")
            .field("store", &self.store.provider_name())
            .field("namespace", &self.namespace)
            .field("default_ttl", &self.default_ttl)
            .finish()
    }
}
