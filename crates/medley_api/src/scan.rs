//! Scan operation payloads.

use crate::de::{bool_lenient, u64_lenient};
use serde::{Deserialize, Serialize};

/// In-flight and recent scan operations, `GET /api/v1/scan/status`.
///
/// Status transitions are backend-owned; this side only observes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanStatus {
    /// Number of operations currently running.
    #[serde(deserialize_with = "u64_lenient", default)]
    pub active_scans: u64,
    /// Operations in start order, most recent last.
    #[serde(default)]
    pub scans: Vec<ScanOperation>,
}

/// One scan operation record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanOperation {
    /// Backend-assigned operation id.
    pub scan_id: String,
    /// Root being scanned.
    pub path: String,
    /// Start time, backend-local ISO string.
    #[serde(default)]
    pub started_at: String,
    /// Current state.
    pub status: ScanState,
    /// Files processed so far. The backend stores this counter in its
    /// cache store and emits it as a string; normalized here.
    #[serde(deserialize_with = "u64_lenient", default)]
    pub files_processed: u64,
    /// Whether already-indexed files are re-read. Emitted as a
    /// Python-stringified bool; normalized here.
    #[serde(deserialize_with = "bool_lenient", default)]
    pub deep_scan: bool,
    /// Last checkpoint time, when the scanner has written one.
    #[serde(default)]
    pub last_checkpoint: Option<String>,
    /// Failure detail, set only when `status` is `Failed`.
    #[serde(default)]
    pub error: Option<String>,
}

/// Scan operation states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanState {
    /// The scanner is walking this root.
    Running,
    /// The walk finished.
    Completed,
    /// The walk aborted; see `error`.
    Failed,
}

/// Body for `POST /api/v1/scan/start`. An empty body scans every
/// configured library.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StartScan {
    /// Scan only this path instead of all configured libraries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Re-read files that are already indexed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deep_scan: Option<bool>,
}

impl StartScan {
    /// Request scanning a single path.
    pub fn path(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            deep_scan: None,
        }
    }

    /// Sets the deep-scan flag.
    pub fn with_deep_scan(mut self, deep: bool) -> Self {
        self.deep_scan = Some(deep);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_status_normalizes_stringly_fields() {
        let json = r#"{
            "active_scans": 1,
            "scans": [{
                "scan_id": "scan:1709290000",
                "path": "/media/music",
                "started_at": "2024-03-01T10:06:40",
                "status": "running",
                "files_processed": "42",
                "deep_scan": "False"
            }]
        }"#;
        let status: ScanStatus = serde_json::from_str(json).unwrap();
        assert_eq!(status.active_scans, 1);
        assert_eq!(status.scans.len(), 1);
        let op = &status.scans[0];
        assert_eq!(op.status, ScanState::Running);
        assert_eq!(op.files_processed, 42);
        assert!(!op.deep_scan);
        assert!(op.error.is_none());
    }

    #[test]
    fn failed_scan_carries_error() {
        let json = r#"{
            "active_scans": 0,
            "scans": [{
                "scan_id": "scan:1709290001",
                "path": "/media/missing",
                "started_at": "2024-03-01T10:10:00",
                "status": "failed",
                "files_processed": 0,
                "deep_scan": true,
                "error": "path not found"
            }]
        }"#;
        let status: ScanStatus = serde_json::from_str(json).unwrap();
        let op = &status.scans[0];
        assert_eq!(op.status, ScanState::Failed);
        assert_eq!(op.error.as_deref(), Some("path not found"));
    }

    #[test]
    fn empty_scan_status() {
        let status: ScanStatus = serde_json::from_str(r#"{"active_scans": 0}"#).unwrap();
        assert!(status.scans.is_empty());
    }

    #[test]
    fn start_scan_body() {
        assert_eq!(serde_json::to_string(&StartScan::default()).unwrap(), "{}");
        let req = StartScan::path("/media/music").with_deep_scan(true);
        assert_eq!(
            serde_json::to_string(&req).unwrap(),
            r#"{"path":"/media/music","deep_scan":true}"#
        );
    }
}
