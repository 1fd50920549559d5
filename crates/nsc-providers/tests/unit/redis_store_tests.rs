//! Redis store tests
//!
//! Note: These tests require a Redis server to be running; they return
//! early when none is reachable.

use nsc_domain::ports::KeyValueStore;
use nsc_domain::value_objects::TransactionOp;
use nsc_providers::store::{RedisStore, RedisStoreConfig};
use std::time::Duration;

/// Redis settings from `REDIS_HOST` / `REDIS_PORT` or the defaults
fn test_config() -> RedisStoreConfig {
    let mut config = RedisStoreConfig::default();
    if let Ok(host) = std::env::var("REDIS_HOST") {
        config.host = host;
    }
    if let Some(port) = std::env::var("REDIS_PORT").ok().and_then(|p| p.parse().ok()) {
        config.port = port;
    }
    config.timeout = Some(Duration::from_secs(2));
    config
}

/// Helper to skip test if Redis is not available
macro_rules! redis_or_skip {
    () => {
        match RedisStore::connect(&test_config()).await {
            Ok(store) => store,
            Err(e) => {
                eprintln!("Skipping test: Redis not available ({})", e);
                return;
            }
        }
    };
}

fn unique(name: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("nsc-test:{}:{}", nanos, name)
}

#[test]
fn test_redis_config_url() {
    let config = RedisStoreConfig::with_host_port("cache.internal", 6380);
    assert_eq!(config.url(), "redis://cache.internal:6380");
}

#[tokio::test]
async fn test_connect_to_closed_port_is_network_error() {
    let mut config = RedisStoreConfig::with_host_port("127.0.0.1", 1);
    config.timeout = Some(Duration::from_secs(1));
    let err = RedisStore::connect(&config).await.unwrap_err();
    assert!(err.is_network());
}

#[tokio::test]
async fn test_redis_basic_operations() {
    let store = redis_or_skip!();
    let key = unique("basic");

    store.set(&key, "\"v\"", None).await.unwrap();
    assert_eq!(store.get(&key).await.unwrap(), Some("\"v\"".to_string()));
    assert!(store.exists(&key).await.unwrap());
    assert_eq!(store.delete(&[key.clone()]).await.unwrap(), 1);
    assert!(!store.exists(&key).await.unwrap());
}

#[tokio::test]
async fn test_redis_watch_abort() {
    let store = redis_or_skip!();
    let key = unique("watch");
    store.set(&key, "1", None).await.unwrap();

    let session = store.watch(&key).await.unwrap();
    store.set(&key, "3", None).await.unwrap();
    assert!(!session.commit(TransactionOp::Set("2".to_string())).await.unwrap());
    assert_eq!(store.get(&key).await.unwrap(), Some("3".to_string()));

    let session = store.watch(&key).await.unwrap();
    assert!(session.commit(TransactionOp::Delete).await.unwrap());
    assert!(!store.exists(&key).await.unwrap());
}

#[tokio::test]
async fn test_redis_server_info() {
    let store = redis_or_skip!();
    let info = store.server_info().await.unwrap();
    assert!(info.version.is_some());
}
