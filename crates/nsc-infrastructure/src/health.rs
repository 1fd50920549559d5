//! Store availability probe
//!
//! A store is usable when it answers `server_info` and reports a version at
//! least [`MIN_SERVER_VERSION`]. Stores that report no version (the
//! in-memory provider) have nothing to check and count as up.

use crate::logging::log_health_check;
use nsc_domain::constants::MIN_SERVER_VERSION;
use nsc_domain::ports::KeyValueStore;
use nsc_domain::value_objects::{ServerVersion, StoreInfo};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Health status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Store reachable and recent enough
    Up,
    /// Store reachable but too old for the cache's commands
    Degraded,
    /// Store unreachable
    Down,
}

impl HealthStatus {
    /// Check if the status indicates the store is usable
    pub fn is_healthy(&self) -> bool {
        matches!(self, Self::Up)
    }

    /// Check if the store answered at all (healthy or degraded)
    pub fn is_operational(&self) -> bool {
        matches!(self, Self::Up | Self::Degraded)
    }
}

/// Individual health check result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheck {
    /// Name of the health check
    pub name: String,
    /// Current status
    pub status: HealthStatus,
    /// Timestamp of last check
    pub timestamp: chrono::DateTime<chrono::Utc>,
    /// Response time in milliseconds
    pub response_time_ms: u64,
    /// Optional error message
    pub error: Option<String>,
    /// Store identity, when the store answered
    pub details: Option<serde_json::Value>,
}

impl HealthCheck {
    /// Create a successful health check
    pub fn healthy<S: Into<String>>(name: S) -> Self {
        Self::with_status(name, HealthStatus::Up, None)
    }

    /// Create a failed health check
    pub fn failed<S: Into<String>>(name: S, error: Option<String>) -> Self {
        Self::with_status(name, HealthStatus::Down, error)
    }

    /// Create a degraded health check
    pub fn degraded<S: Into<String>>(name: S, reason: Option<String>) -> Self {
        Self::with_status(name, HealthStatus::Degraded, reason)
    }

    fn with_status<S: Into<String>>(name: S, status: HealthStatus, error: Option<String>) -> Self {
        Self {
            name: name.into(),
            status,
            timestamp: chrono::Utc::now(),
            response_time_ms: 0,
            error,
            details: None,
        }
    }

    /// Set response time
    pub fn with_response_time(mut self, duration: Duration) -> Self {
        self.response_time_ms = duration.as_millis() as u64;
        self
    }

    /// Set additional details
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// Whether a reported version satisfies [`MIN_SERVER_VERSION`]
pub fn version_supported(version: Option<ServerVersion>) -> bool {
    version.is_none_or(|v| v >= ServerVersion::from(MIN_SERVER_VERSION))
}

/// Probe a store and classify the answer
pub async fn check_store(store: &dyn KeyValueStore) -> HealthCheck {
    let name = store.provider_name().to_string();
    let started = Instant::now();
    let check = match store.server_info().await {
        Ok(info) => classify(&name, &info),
        Err(e) => HealthCheck::failed(&name, Some(e.to_string())),
    };
    let check = check.with_response_time(started.elapsed());

    log_health_check(&check.name, check.status.is_healthy(), check.error.as_deref());
    check
}

fn classify(name: &str, info: &StoreInfo) -> HealthCheck {
    let check = if version_supported(info.version) {
        HealthCheck::healthy(name)
    } else {
        HealthCheck::degraded(
            name,
            Some(format!(
                "{} {} is older than the required {}",
                info.name,
                info.version.map(|v| v.to_string()).unwrap_or_default(),
                ServerVersion::from(MIN_SERVER_VERSION)
            )),
        )
    };
    check.with_details(serde_json::json!({
        "server": info.name,
        "version": info.version.map(|v| v.to_string()),
    }))
}
