//! Domain layer constants
//!
//! Constants that shape cache semantics. Connection and configuration
//! defaults live in `nsc_infrastructure::constants`.

// ============================================================================
// KEY QUALIFICATION CONSTANTS
// ============================================================================

/// Wildcard appended to a qualified prefix to form a scan pattern
pub const SCAN_WILDCARD: &str = "*";

/// Characters with special meaning in store glob patterns
pub const GLOB_METACHARACTERS: [char; 5] = ['*', '?', '[', ']', '\\'];

// ============================================================================
// CACHE OPERATION CONSTANTS
// ============================================================================

/// Default step for `inc` / `dec`
pub const DEFAULT_COUNTER_STEP: i64 = 1;

/// Number of keys requested per scan round-trip while clearing
pub const CLEAR_SCAN_BATCH: usize = 100;

/// Scan cursor value that starts an iteration and signals its completion
pub const SCAN_CURSOR_START: u64 = 0;

// ============================================================================
// AVAILABILITY CONSTANTS
// ============================================================================

/// Oldest store server version the cache can run against (SCAN support)
pub const MIN_SERVER_VERSION: (u32, u32, u32) = (2, 8, 0);
