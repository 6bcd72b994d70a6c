//! Library path configuration payloads.

use serde::{Deserialize, Serialize};

/// A configured scan root, `GET /api/v1/libraries`.
///
/// Ids are server-assigned and unique; the client never invents one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LibraryPath {
    /// Server-assigned identifier.
    pub id: u64,
    /// Filesystem path of the scan root.
    pub path: String,
    /// Optional display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Whether scans include this root.
    #[serde(default)]
    pub scan_enabled: bool,
    /// Whether scans of this root re-read files already indexed.
    #[serde(default)]
    pub deep_scan: bool,
    /// What kind of content the root holds.
    #[serde(default)]
    pub path_type: PathType,
    /// Whether detected duplicates under this root are deleted without
    /// operator confirmation.
    #[serde(default)]
    pub auto_delete_duplicates: bool,
    /// Whether the lower-quality copy is the one chosen for deletion.
    #[serde(default)]
    pub delete_lower_quality: bool,
    /// Quality score below which a file is a deletion candidate.
    #[serde(default)]
    pub quality_threshold: f64,
    /// Comma-separated format preference list, best first.
    #[serde(default)]
    pub preferred_formats: String,
    /// Deletion priority, 0-100. Higher loses ties.
    #[serde(default)]
    pub deletion_priority: u32,
    /// Creation time, backend-local ISO string.
    #[serde(default)]
    pub created_at: String,
    /// Last update time, backend-local ISO string.
    #[serde(default)]
    pub updated_at: String,
}

/// Content category of a library root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathType {
    /// Single-artist albums.
    Album,
    /// Various-artist compilations.
    Compilation,
    /// Recently added material.
    Recent,
    /// Anything else.
    #[default]
    General,
}

/// Body for `POST /api/v1/libraries`. Only `path` is required; omitted
/// fields take server-side defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewLibraryPath {
    /// Filesystem path of the new scan root.
    pub path: String,
    /// Optional display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Whether scans include this root.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scan_enabled: Option<bool>,
    /// Whether scans re-read already-indexed files.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deep_scan: Option<bool>,
    /// Content category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path_type: Option<PathType>,
    /// Delete detected duplicates without confirmation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_delete_duplicates: Option<bool>,
    /// Prefer deleting the lower-quality copy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete_lower_quality: Option<bool>,
    /// Quality score below which a file is a deletion candidate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality_threshold: Option<f64>,
    /// Comma-separated format preference list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_formats: Option<String>,
    /// Deletion priority, 0-100.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deletion_priority: Option<u32>,
}

impl NewLibraryPath {
    /// Creates a request with only the required path set.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: None,
            scan_enabled: None,
            deep_scan: None,
            path_type: None,
            auto_delete_duplicates: None,
            delete_lower_quality: None,
            quality_threshold: None,
            preferred_formats: None,
            deletion_priority: None,
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets whether scans include this root.
    pub fn with_scan_enabled(mut self, enabled: bool) -> Self {
        self.scan_enabled = Some(enabled);
        self
    }

    /// Sets whether scans re-read already-indexed files.
    pub fn with_deep_scan(mut self, deep: bool) -> Self {
        self.deep_scan = Some(deep);
        self
    }

    /// Sets the content category.
    pub fn with_path_type(mut self, path_type: PathType) -> Self {
        self.path_type = Some(path_type);
        self
    }
}

/// Body for `PUT /api/v1/libraries/{id}`. Every field is optional; only
/// the fields present in the body are changed server-side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LibraryPathUpdate {
    /// New filesystem path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// New display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New scan-enabled flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scan_enabled: Option<bool>,
    /// New deep-scan flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deep_scan: Option<bool>,
    /// New content category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path_type: Option<PathType>,
    /// New auto-delete flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_delete_duplicates: Option<bool>,
    /// New lower-quality preference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete_lower_quality: Option<bool>,
    /// New quality threshold.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality_threshold: Option<f64>,
    /// New format preference list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_formats: Option<String>,
    /// New deletion priority.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deletion_priority: Option<u32>,
}

impl LibraryPathUpdate {
    /// True when no field is set; the backend treats such an update as a
    /// no-op, so callers may skip the request entirely.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn library_path_decodes() {
        let json = r#"{
            "id": 3,
            "path": "/media/music",
            "name": "Music",
            "scan_enabled": true,
            "deep_scan": false,
            "path_type": "album",
            "auto_delete_duplicates": false,
            "delete_lower_quality": true,
            "quality_threshold": 0.8,
            "preferred_formats": "flac,mp3",
            "deletion_priority": 50,
            "created_at": "2024-01-01T10:00:00",
            "updated_at": "2024-02-01T10:00:00"
        }"#;
        let lib: LibraryPath = serde_json::from_str(json).unwrap();
        assert_eq!(lib.id, 3);
        assert_eq!(lib.path_type, PathType::Album);
        assert_eq!(lib.deletion_priority, 50);
    }

    #[test]
    fn new_library_serializes_only_set_fields() {
        let req = NewLibraryPath::new("/media/music").with_deep_scan(true);
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["path"], "/media/music");
        assert_eq!(json["deep_scan"], true);
        assert!(json.get("name").is_none());
        assert!(json.get("quality_threshold").is_none());
    }

    #[test]
    fn empty_update_detected() {
        assert!(LibraryPathUpdate::default().is_empty());
        let update = LibraryPathUpdate {
            scan_enabled: Some(false),
            ..Default::default()
        };
        assert!(!update.is_empty());
        let json = serde_json::to_string(&update).unwrap();
        assert_eq!(json, r#"{"scan_enabled":false}"#);
    }
}
