//! Main application configuration

use super::{CacheConfig, LoggingConfig, StoreConfig};
use serde::{Deserialize, Serialize};

/// Root configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Backing store connection
    #[serde(default)]
    pub store: StoreConfig,
    /// Cache behaviour
    #[serde(default)]
    pub cache: CacheConfig,
    /// Logging
    #[serde(default)]
    pub logging: LoggingConfig,
}
