//! Store factory
//!
//! Turns a [`StoreConfig`] into a shared store handle. Adding a provider means
//! adding a [`StoreProvider`] variant and one match arm here.

use crate::cache::NamespacedAtomicCache;
use crate::config::{AppConfig, StoreConfig, StoreProvider};
use nsc_domain::error::Result;
use nsc_domain::ports::KeyValueStore;
use nsc_providers::store::{InMemoryStore, RedisStore};
use std::sync::Arc;
use tracing::info;

/// Create the store selected by `config`
///
/// Connecting to a remote store happens here, so an unreachable server is
/// reported as a network error before any cache is built.
pub async fn create_store(config: &StoreConfig) -> Result<Arc<dyn KeyValueStore>> {
    let store: Arc<dyn KeyValueStore> = match config.provider {
        StoreProvider::Redis => Arc::new(RedisStore::connect(&config.redis()).await?),
        StoreProvider::Memory => Arc::new(InMemoryStore::new()),
    };
    info!(provider = store.provider_name(), "Store created");
    Ok(store)
}

/// Create the store and wrap it in a cache using the configured namespace and TTL
pub async fn create_cache(config: &AppConfig) -> Result<NamespacedAtomicCache> {
    let store = create_store(&config.store).await?;
    Ok(
        NamespacedAtomicCache::new(store, config.cache.namespace.as_str())
            .with_default_ttl(config.cache.default_ttl()),
    )
}
