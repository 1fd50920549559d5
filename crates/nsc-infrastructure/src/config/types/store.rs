//! Store configuration types

use crate::constants::*;
use nsc_providers::constants::{REDIS_DEFAULT_HOST, REDIS_DEFAULT_PORT, REDIS_WATCH_POOL_SIZE};
use nsc_providers::store::RedisStoreConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Store providers
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreProvider {
    /// Remote store (Redis)
    Redis,
    /// Process-local store
    ///
    /// Deleted keys leave tombstones that are only reclaimed by an explicit
    /// purge, so memory grows with the number of distinct keys written.
    Memory,
}

/// Store connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Store provider
    pub provider: StoreProvider,

    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Connect/command timeout in seconds; 0 means unlimited
    pub timeout: f64,

    /// Logical database selector
    pub dbindex: Option<i64>,

    /// Idle dedicated connections kept for compare-and-set/delete
    pub watch_pool_size: usize,
}

impl StoreConfig {
    /// Timeout as a duration, `None` when unlimited
    pub fn timeout(&self) -> Option<Duration> {
        // Negative, non-finite and overflowing values fall back to unlimited
        Duration::try_from_secs_f64(self.timeout)
            .ok()
            .filter(|timeout| !timeout.is_zero())
    }

    /// Settings for the Redis provider
    pub fn redis(&self) -> RedisStoreConfig {
        RedisStoreConfig {
            host: self.host.clone(),
            port: self.port,
            timeout: self.timeout(),
            dbindex: self.dbindex,
            watch_pool_size: self.watch_pool_size,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            provider: StoreProvider::Redis,
            host: REDIS_DEFAULT_HOST.to_string(),
            port: REDIS_DEFAULT_PORT,
            timeout: STORE_DEFAULT_TIMEOUT_SECS,
            dbindex: None,
            watch_pool_size: REDIS_WATCH_POOL_SIZE,
        }
    }
}
