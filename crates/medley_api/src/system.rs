//! System status and dependency health payloads.

use crate::de::u64_lenient;
use serde::{Deserialize, Serialize};

/// Backend process state, `GET /api/v1/system/status`.
///
/// Refreshed on a fixed cadence by the synchronization layer; never
/// user-mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemStatus {
    /// Overall process state.
    pub system_status: SystemState,
    /// Backend version string.
    #[serde(default)]
    pub version: String,
    /// Process start time, backend-local ISO string.
    #[serde(default)]
    pub startup_time: Option<String>,
    /// Number of scan operations currently running.
    #[serde(deserialize_with = "u64_lenient", default)]
    pub active_scans: u64,
    /// Total files the backend has indexed.
    #[serde(deserialize_with = "u64_lenient", default)]
    pub total_files_indexed: u64,
    /// Total directories the backend has indexed.
    #[serde(deserialize_with = "u64_lenient", default)]
    pub total_directories: u64,
    /// Seconds since the backend started.
    #[serde(deserialize_with = "u64_lenient", default)]
    pub uptime_seconds: u64,
}

/// Backend process state values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SystemState {
    /// Backend is up and serving.
    Running,
    /// Backend is still initializing.
    Starting,
    /// Backend reports itself stopped.
    Stopped,
    /// Any state this client does not recognize.
    #[default]
    #[serde(other)]
    Unknown,
}

/// Dependency health, `GET /health` (unversioned).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Overall health verdict.
    pub status: HealthState,
    /// Per-dependency connection state. Absent when the health probe
    /// itself errored, in which case every dependency reads Unknown.
    #[serde(default)]
    pub databases: DatabaseHealth,
}

/// Overall health verdict values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
    /// Every dependency is connected.
    Healthy,
    /// At least one dependency is down.
    Unhealthy,
    /// The health probe itself failed.
    Error,
    /// Any verdict this client does not recognize.
    #[default]
    #[serde(other)]
    Unknown,
}

/// Connection state of each backend datastore.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DatabaseHealth {
    /// Cache store.
    #[serde(default)]
    pub redis: DependencyState,
    /// Document store.
    #[serde(default)]
    pub mongodb: DependencyState,
    /// Relational store.
    #[serde(default)]
    pub mysql: DependencyState,
}

/// Connection state values for a single dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyState {
    /// Probe succeeded.
    Connected,
    /// Probe failed.
    Disconnected,
    /// Not reported.
    #[default]
    #[serde(other)]
    Unknown,
}

impl HealthStatus {
    /// True when every dependency reports connected.
    pub fn all_connected(&self) -> bool {
        let d = &self.databases;
        [d.redis, d.mongodb, d.mysql]
            .iter()
            .all(|s| *s == DependencyState::Connected)
    }
}
