//! File and duplicate statistics payloads.

use crate::de::u64_lenient;
use serde::{Deserialize, Serialize};

/// Aggregate file counts and sizes, `GET /api/v1/stats`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileStatistics {
    /// Total indexed files.
    #[serde(deserialize_with = "u64_lenient", default)]
    pub total_files: u64,
    /// Total indexed directories.
    #[serde(deserialize_with = "u64_lenient", default)]
    pub total_directories: u64,
    /// Per-category breakdown.
    #[serde(default)]
    pub by_category: Vec<CategoryStats>,
}

/// One file-category aggregate. The backend groups by category in its
/// document store, so the label arrives under the aggregation key `_id`
/// and is null for uncategorized files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryStats {
    /// Category label, absent for uncategorized files.
    #[serde(rename = "_id", default)]
    pub category: Option<String>,
    /// Files in this category.
    #[serde(deserialize_with = "u64_lenient", default)]
    pub count: u64,
    /// Summed size in bytes.
    #[serde(deserialize_with = "u64_lenient", default)]
    pub total_size: u64,
}

impl CategoryStats {
    /// Display label, substituting a fixed name for the null category.
    pub fn label(&self) -> &str {
        self.category.as_deref().unwrap_or("uncategorized")
    }
}

/// Aggregate duplicate-detection results, `GET /api/v1/duplicates/stats`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DuplicateStats {
    /// Distinct groups of duplicate files.
    #[serde(deserialize_with = "u64_lenient", default)]
    pub duplicate_groups: u64,
    /// Files that belong to some duplicate group.
    #[serde(deserialize_with = "u64_lenient", default)]
    pub duplicate_files: u64,
    /// Files currently marked for deletion.
    #[serde(deserialize_with = "u64_lenient", default)]
    pub deletion_candidates: u64,
    /// Files marked best-of-group.
    #[serde(deserialize_with = "u64_lenient", default)]
    pub best_quality_files: u64,
}

/// Files marked for deletion, `GET /api/v1/duplicates/candidates`.
///
/// Candidate records are backend-shaped documents the console renders
/// as-is, so they stay untyped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeletionCandidates {
    /// Candidate documents.
    #[serde(default)]
    pub deletion_candidates: Vec<serde_json::Value>,
    /// Number of candidates returned.
    #[serde(deserialize_with = "u64_lenient", default)]
    pub total_count: u64,
}

/// Duplicate groups, `GET /api/v1/duplicates/groups`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DuplicateGroups {
    /// Group documents.
    #[serde(default)]
    pub duplicate_groups: Vec<serde_json::Value>,
    /// Grouping method the backend used.
    #[serde(default)]
    pub method: String,
    /// Number of groups returned.
    #[serde(deserialize_with = "u64_lenient", default)]
    pub total_groups: u64,
}

/// How the backend groups duplicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupingMethod {
    /// Acoustic fingerprint match.
    #[default]
    Fingerprint,
    /// Content hash match.
    Hash,
}

impl GroupingMethod {
    /// Query-parameter form.
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupingMethod::Fingerprint => "fingerprint",
            GroupingMethod::Hash => "hash",
        }
    }
}

impl std::str::FromStr for GroupingMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fingerprint" => Ok(GroupingMethod::Fingerprint),
            "hash" => Ok(GroupingMethod::Hash),
            other => Err(format!("unknown grouping method: {other:?}")),
        }
    }
}
