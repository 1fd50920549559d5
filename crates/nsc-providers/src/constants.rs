//! Provider Constants
//!
//! Constants specific to store implementations. Cache semantics constants
//! live in `nsc_domain::constants`.

// ============================================================================
// REDIS STORE CONSTANTS
// ============================================================================

/// Provider name reported by the Redis store
pub const REDIS_PROVIDER_NAME: &str = "redis";

/// Default Redis host
pub const REDIS_DEFAULT_HOST: &str = "127.0.0.1";

/// Default Redis port
pub const REDIS_DEFAULT_PORT: u16 = 6379;

/// Idle dedicated connections kept for watch sessions
pub const REDIS_WATCH_POOL_SIZE: usize = 4;

/// `INFO server` field carrying the server version
pub const REDIS_VERSION_FIELD: &str = "redis_version";

/// `INFO server` field present only on Valkey servers
pub const VALKEY_VERSION_FIELD: &str = "valkey_version";

// ============================================================================
// IN-MEMORY STORE CONSTANTS
// ============================================================================

/// Provider name reported by the in-memory store
pub const MEMORY_PROVIDER_NAME: &str = "memory";

/// Page size used when a scan asks for a count of 0
pub const MEMORY_SCAN_DEFAULT_COUNT: usize = 10;
