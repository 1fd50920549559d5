//! Configuration loading tests
//!
//! Tests that mutate environment variables are ignored by default and must
//! run sequentially:
//!
//! ```bash
//! cargo test -p nsc-infrastructure --test unit config_tests -- --test-threads=1 --ignored
//! ```

use nsc_domain::ports::AtomicCache;
use nsc_infrastructure::config::loader::validate_app_config;
use nsc_infrastructure::config::{
    AppConfig, ConfigBuilder, ConfigLoader, StoreConfig, StoreProvider,
};
use nsc_infrastructure::create_cache;
use std::env;
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;

/// Helper to set env var safely
fn set_env(key: &str, value: &str) {
    // SAFETY: Tests must run with --test-threads=1
    unsafe {
        env::set_var(key, value);
    }
}

/// Helper to remove env var safely
fn remove_env(key: &str) {
    // SAFETY: Tests must run with --test-threads=1
    unsafe {
        env::remove_var(key);
    }
}

fn write_toml(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_defaults() {
    let config = AppConfig::default();

    assert_eq!(config.store.provider, StoreProvider::Redis);
    assert_eq!(config.store.host, "127.0.0.1");
    assert_eq!(config.store.port, 6379);
    assert_eq!(config.store.timeout(), None);
    assert_eq!(config.store.dbindex, None);
    assert_eq!(config.cache.namespace, "");
    assert_eq!(config.cache.default_ttl(), None);
    assert!(validate_app_config(&config).is_ok());
}

#[test]
fn test_load_from_toml_file() {
    let file = write_toml(
        r#"
[store]
host = "cache.internal"
port = 6380
timeout = 1.5
dbindex = 2

[cache]
namespace = "svc:"
default_ttl_secs = 60

[logging]
level = "debug"
"#,
    );

    let config = ConfigLoader::new()
        .with_env_prefix("NSC_TEST_TOML")
        .with_config_path(file.path())
        .load()
        .unwrap();

    assert_eq!(config.store.host, "cache.internal");
    assert_eq!(config.store.port, 6380);
    assert_eq!(config.store.timeout(), Some(Duration::from_millis(1500)));
    assert_eq!(config.store.dbindex, Some(2));
    assert_eq!(config.cache.namespace, "svc:");
    assert_eq!(config.cache.default_ttl(), Some(Duration::from_secs(60)));
    assert_eq!(config.logging.level, "debug");

    let redis = config.store.redis();
    assert_eq!(redis.url(), "redis://cache.internal:6380/2");
    assert_eq!(redis.timeout, Some(Duration::from_millis(1500)));
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let config = ConfigLoader::new()
        .with_env_prefix("NSC_TEST_MISSING")
        .with_config_path("/nonexistent/nscache.toml")
        .load()
        .unwrap();

    assert_eq!(config.store.port, 6379);
}

#[test]
fn test_invalid_values_are_rejected() {
    let file = write_toml("[store]\nport = 0\n");
    let result = ConfigLoader::new()
        .with_env_prefix("NSC_TEST_INVALID")
        .with_config_path(file.path())
        .load();
    assert!(result.is_err());

    let file = write_toml("[logging]\nlevel = \"loud\"\n");
    let result = ConfigLoader::new()
        .with_env_prefix("NSC_TEST_INVALID")
        .with_config_path(file.path())
        .load();
    assert!(result.is_err());

    let file = write_toml("[store]\nprovider = \"etcd\"\n");
    let result = ConfigLoader::new()
        .with_env_prefix("NSC_TEST_INVALID")
        .with_config_path(file.path())
        .load();
    assert!(result.is_err());
}

#[test]
fn test_validation_rules() {
    let mut config = AppConfig::default();
    config.store.timeout = -1.0;
    assert!(validate_app_config(&config).is_err());

    config.store.timeout = f64::NAN;
    assert!(validate_app_config(&config).is_err());

    config.store.timeout = 0.0;
    config.store.watch_pool_size = 0;
    assert!(validate_app_config(&config).is_err());

    config.store.watch_pool_size = 1;
    config.store.dbindex = Some(-1);
    assert!(validate_app_config(&config).is_err());

    // Connection settings do not matter for the memory provider
    config.store.provider = StoreProvider::Memory;
    config.store.port = 0;
    assert!(validate_app_config(&config).is_ok());
}

#[test]
fn test_oversized_timeout_is_rejected_without_panicking() {
    let mut config = AppConfig::default();
    config.store.timeout = 1e30;
    assert!(validate_app_config(&config).is_err());
    assert_eq!(config.store.timeout(), None);

    config.store.timeout = f64::INFINITY;
    assert_eq!(config.store.timeout(), None);

    let file = write_toml("[store]\ntimeout = 1e30\n");
    let result = ConfigLoader::new()
        .with_env_prefix("NSC_TEST_HUGE_TIMEOUT")
        .with_config_path(file.path())
        .load();
    assert!(result.is_err());
}

#[test]
fn test_save_and_reload() {
    let config = ConfigBuilder::new()
        .with_store(StoreConfig {
            provider: StoreProvider::Memory,
            ..StoreConfig::default()
        })
        .with_namespace("saved:")
        .build();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nscache.toml");

    let loader = ConfigLoader::new().with_env_prefix("NSC_TEST_SAVE");
    loader.save_to_file(&config, &path).unwrap();
    let reloaded = loader.with_config_path(&path).load().unwrap();

    assert_eq!(reloaded.store.provider, StoreProvider::Memory);
    assert_eq!(reloaded.cache.namespace, "saved:");
}

#[tokio::test]
async fn test_create_cache_from_config() {
    let config = ConfigBuilder::new()
        .with_store(StoreConfig {
            provider: StoreProvider::Memory,
            ..StoreConfig::default()
        })
        .with_namespace("built:")
        .build();

    let cache = create_cache(&config).await.unwrap();

    assert_eq!(cache.namespace().as_str(), "built:");
    assert_eq!(cache.store().provider_name(), "memory");
    assert!(cache.add("k", &serde_json::json!(1), None).await.unwrap());
}

/// Verify env vars with NSC__ prefix override file values
#[test]
#[ignore = "requires --test-threads=1 due to env var mutations"]
fn test_env_overrides_file() {
    let file = write_toml("[store]\nport = 6380\n");
    set_env("NSC__STORE__PORT", "7000");
    set_env("NSC__STORE__WATCH_POOL_SIZE", "9");
    set_env("NSC__CACHE__NAMESPACE", "env:");

    let config = ConfigLoader::new()
        .with_config_path(file.path())
        .load()
        .expect("Should load config");

    assert_eq!(config.store.port, 7000);
    assert_eq!(config.store.watch_pool_size, 9);
    assert_eq!(config.cache.namespace, "env:");

    remove_env("NSC__STORE__PORT");
    remove_env("NSC__STORE__WATCH_POOL_SIZE");
    remove_env("NSC__CACHE__NAMESPACE");
}
