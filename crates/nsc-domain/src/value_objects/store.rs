//! Store-level value objects

use crate::constants::SCAN_CURSOR_START;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One page of a cursor-based scan
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanPage {
    /// Cursor for the next call, `0` once the iteration is complete
    pub cursor: u64,
    /// Qualified keys returned by this round-trip (may be empty mid-scan)
    pub keys: Vec<String>,
}

impl ScanPage {
    /// Whether the scan is finished
    pub fn is_last(&self) -> bool {
        self.cursor == SCAN_CURSOR_START
    }
}

/// Write executed by a watched transaction on commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionOp {
    /// Overwrite the watched key with an encoded value (no expiry)
    Set(String),
    /// Delete the watched key
    Delete,
}

/// Store server version as `major.minor.patch`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ServerVersion {
    /// Major version
    pub major: u32,
    /// Minor version
    pub minor: u32,
    /// Patch version
    pub patch: u32,
}

impl ServerVersion {
    /// Create a version
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parse `x`, `x.y` or `x.y.z`; trailing non-numeric parts are ignored
    pub fn parse(raw: &str) -> Option<Self> {
        let mut parts = raw.trim().split('.').map(|part| {
            let digits: String = part.chars().take_while(char::is_ascii_digit).collect();
            digits.parse::<u32>().ok()
        });
        let major = parts.next()??;
        let minor = parts.next().flatten().unwrap_or(0);
        let patch = parts.next().flatten().unwrap_or(0);
        Some(Self::new(major, minor, patch))
    }
}

impl From<(u32, u32, u32)> for ServerVersion {
    fn from((major, minor, patch): (u32, u32, u32)) -> Self {
        Self::new(major, minor, patch)
    }
}

impl fmt::Display for ServerVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Identity of the store behind a provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreInfo {
    /// Server software name (e.g. "redis")
    pub name: String,
    /// Server version, when the server reports one
    pub version: Option<ServerVersion>,
}

/// Outcome of a bulk clear
///
/// Clearing is best-effort: failed scan or delete round-trips are counted
/// here and logged, never returned as errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearReport {
    /// Number of keys the store reported as deleted
    pub removed: u64,
    /// Number of scan/delete round-trips that failed
    pub failed_batches: u64,
    /// Whether the scan ran to its final cursor
    pub complete: bool,
}

impl ClearReport {
    /// Whether every matching key is known to be gone
    pub fn is_clean(&self) -> bool {
        self.complete && self.failed_batches == 0
    }
}
