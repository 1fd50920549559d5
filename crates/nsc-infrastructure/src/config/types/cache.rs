//! Cache configuration types

use crate::constants::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Prefix prepended to every key
    pub namespace: String,

    /// TTL in seconds applied when a write names none; 0 means no expiry
    pub default_ttl_secs: u64,
}

impl CacheConfig {
    /// Default TTL as a duration, `None` when writes should not expire
    pub fn default_ttl(&self) -> Option<Duration> {
        (self.default_ttl_secs > 0).then(|| Duration::from_secs(self.default_ttl_secs))
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            namespace: CACHE_DEFAULT_NAMESPACE.to_string(),
            default_ttl_secs: CACHE_DEFAULT_TTL_SECS,
        }
    }
}
