//! Infrastructure layer constants
//!
//! Contains constants that are part of the infrastructure implementation.
//! Cache semantics constants are defined in `nsc_domain::constants`, store
//! defaults in `nsc_providers::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "nscache.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "nscache";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "NSC";

/// Separator between nested keys in environment variables (`NSC__STORE__PORT`)
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// STORE CONSTANTS
// ============================================================================

/// Store timeout in seconds; 0 means unlimited
pub const STORE_DEFAULT_TIMEOUT_SECS: f64 = 0.0;

// ============================================================================
// CACHE CONSTANTS
// ============================================================================

/// Default cache namespace (no prefix)
pub const CACHE_DEFAULT_NAMESPACE: &str = "";

/// Default TTL in seconds for CLI writes; 0 means no expiry
pub const CACHE_DEFAULT_TTL_SECS: u64 = 0;

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the log filter
pub const LOG_FILTER_ENV: &str = "NSC_LOG";

/// Maximum number of rotated log files to keep
pub const LOG_MAX_FILES: usize = 5;

/// Log file name prefix when the configured path has none
pub const LOG_FILE_PREFIX: &str = "nscache";
