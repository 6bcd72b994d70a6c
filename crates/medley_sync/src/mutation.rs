//! Mutation kinds and the fixed mutation-to-invalidation table.

use crate::family::ResourceFamily;

/// The six write operations the console can issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    /// `POST /libraries`
    CreateLibrary,
    /// `PUT /libraries/{id}`
    UpdateLibrary,
    /// `DELETE /libraries/{id}`
    DeleteLibrary,
    /// `POST /scan/start`
    StartScan,
    /// `POST /scan/stop`
    StopScan,
    /// `POST /duplicates/detect`
    DetectDuplicates,
}

impl MutationKind {
    /// The cache families a successful mutation of this kind stales.
    ///
    /// This table is the single source of coupling between mutations and
    /// unrelated families (scan mutations touch SystemStatus because the
    /// active-scan count lives in both snapshots). Keep it declarative;
    /// its totality is asserted by the tests below.
    pub fn invalidates(&self) -> &'static [ResourceFamily] {
        match self {
            MutationKind::CreateLibrary
            | MutationKind::UpdateLibrary
            | MutationKind::DeleteLibrary => &[ResourceFamily::Libraries],
            MutationKind::StartScan | MutationKind::StopScan => {
                &[ResourceFamily::ScanStatus, ResourceFamily::SystemStatus]
            }
            MutationKind::DetectDuplicates => &[ResourceFamily::DuplicateStats],
        }
    }

    /// Success notification text used when the server ack carries no
    /// message of its own.
    pub fn success_fallback(&self) -> &'static str {
        match self {
            MutationKind::CreateLibrary => "Library path created successfully",
            MutationKind::UpdateLibrary => "Library path updated successfully",
            MutationKind::DeleteLibrary => "Library path deleted successfully",
            MutationKind::StartScan => "Scan started",
            MutationKind::StopScan => "Scan stop requested",
            MutationKind::DetectDuplicates => "Duplicate detection started",
        }
    }

    /// Failure notification text used when the server provided no
    /// structured detail.
    pub fn failure_fallback(&self) -> &'static str {
        match self {
            MutationKind::CreateLibrary => "Failed to create library path",
            MutationKind::UpdateLibrary => "Failed to update library path",
            MutationKind::DeleteLibrary => "Failed to delete library path",
            MutationKind::StartScan => "Failed to start scan",
            MutationKind::StopScan => "Failed to stop scan",
            MutationKind::DetectDuplicates => "Failed to start duplicate detection",
        }
    }
}

/// What a mutation settled to.
///
/// Mutations never return `Err`: failures surface here and through the
/// notifier, so rendering code has nothing to catch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationOutcome {
    /// Whether the backend accepted the mutation.
    pub success: bool,
    /// The notification text that was emitted.
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_KINDS: [MutationKind; 6] = [
        MutationKind::CreateLibrary,
        MutationKind::UpdateLibrary,
        MutationKind::DeleteLibrary,
        MutationKind::StartScan,
        MutationKind::StopScan,
        MutationKind::DetectDuplicates,
    ];

    #[test]
    fn scan_mutations_invalidate_scan_and_system_only() {
        for kind in [MutationKind::StartScan, MutationKind::StopScan] {
            assert_eq!(
                kind.invalidates(),
                &[ResourceFamily::ScanStatus, ResourceFamily::SystemStatus]
            );
        }
    }

    #[test]
    fn library_mutations_invalidate_libraries_only() {
        for kind in [
            MutationKind::CreateLibrary,
            MutationKind::UpdateLibrary,
            MutationKind::DeleteLibrary,
        ] {
            assert_eq!(kind.invalidates(), &[ResourceFamily::Libraries]);
        }
    }

    #[test]
    fn detect_invalidates_duplicate_stats_only() {
        assert_eq!(
            MutationKind::DetectDuplicates.invalidates(),
            &[ResourceFamily::DuplicateStats]
        );
    }

    #[test]
    fn table_is_total() {
        for kind in ALL_KINDS {
            assert!(!kind.invalidates().is_empty());
            assert!(!kind.success_fallback().is_empty());
            assert!(!kind.failure_fallback().is_empty());
        }
    }

    #[test]
    fn no_mutation_touches_health_or_file_stats() {
        for kind in ALL_KINDS {
            assert!(!kind.invalidates().contains(&ResourceFamily::Health));
            assert!(!kind.invalidates().contains(&ResourceFamily::FileStats));
        }
    }
}
