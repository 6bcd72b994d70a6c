//! # Medley API Types
//!
//! Wire types for the Medley media-indexing backend's REST contract.
//!
//! This crate holds the typed payloads exchanged with the backend:
//! snapshot bodies for the read endpoints, mutation bodies for the write
//! endpoints, the `{message}` acknowledgement and the `{detail}` error
//! body. It carries no transport or caching logic.
//!
//! ## Decode-boundary normalization
//!
//! The backend emits a handful of fields with inconsistent encodings
//! (`files_processed` arrives as a string inside scan records but as a
//! number elsewhere; `deep_scan` arrives as `"True"`/`"False"` strings).
//! These are normalized to plain `u64`/`bool` while decoding, so nothing
//! downstream ever sees the inconsistency.

mod de;
mod library;
mod message;
mod scan;
mod stats;
mod system;

pub use library::{LibraryPath, LibraryPathUpdate, NewLibraryPath, PathType};
pub use message::{ErrorBody, Message};
pub use scan::{ScanOperation, ScanState, ScanStatus, StartScan};
pub use stats::{
    CategoryStats, DeletionCandidates, DuplicateGroups, DuplicateStats, FileStatistics,
    GroupingMethod,
};
pub use system::{
    DatabaseHealth, DependencyState, HealthState, HealthStatus, SystemState, SystemStatus,
};
