//! Resource families and their polling cadence.

use std::time::Duration;

/// The six remote data categories the cache tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceFamily {
    /// Backend process state.
    SystemStatus,
    /// Dependency health.
    Health,
    /// Configured scan roots.
    Libraries,
    /// In-flight and recent scan operations.
    ScanStatus,
    /// Aggregate file statistics.
    FileStats,
    /// Aggregate duplicate-detection results.
    DuplicateStats,
}

impl ResourceFamily {
    /// Every family, in a fixed order.
    pub const ALL: [ResourceFamily; 6] = [
        ResourceFamily::SystemStatus,
        ResourceFamily::Health,
        ResourceFamily::Libraries,
        ResourceFamily::ScanStatus,
        ResourceFamily::FileStats,
        ResourceFamily::DuplicateStats,
    ];

    /// Stable name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            ResourceFamily::SystemStatus => "system_status",
            ResourceFamily::Health => "health",
            ResourceFamily::Libraries => "libraries",
            ResourceFamily::ScanStatus => "scan_status",
            ResourceFamily::FileStats => "file_stats",
            ResourceFamily::DuplicateStats => "duplicate_stats",
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            ResourceFamily::SystemStatus => 0,
            ResourceFamily::Health => 1,
            ResourceFamily::Libraries => 2,
            ResourceFamily::ScanStatus => 3,
            ResourceFamily::FileStats => 4,
            ResourceFamily::DuplicateStats => 5,
        }
    }
}

/// Per-family staleness tolerance.
///
/// The cadence is the interval after which a cached snapshot is eligible
/// for background refresh; it trades freshness against request volume.
/// Scan status is tightest because operators watch progress live;
/// library configuration changes only through this console, so it is
/// refreshed on demand and after its own mutations rather than polled.
#[derive(Debug, Clone)]
pub struct PollPolicy {
    /// SystemStatus cadence.
    pub system_status: Duration,
    /// Health cadence.
    pub health: Duration,
    /// Libraries cadence; `None` means on demand only.
    pub libraries: Option<Duration>,
    /// ScanStatus cadence.
    pub scan_status: Duration,
    /// FileStats cadence.
    pub file_stats: Duration,
    /// DuplicateStats cadence.
    pub duplicate_stats: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            system_status: Duration::from_secs(5),
            health: Duration::from_secs(30),
            libraries: None,
            scan_status: Duration::from_secs(2),
            file_stats: Duration::from_secs(10),
            duplicate_stats: Duration::from_secs(30),
        }
    }
}

impl PollPolicy {
    /// Cadence for the given family; `None` means on demand only.
    pub fn cadence(&self, family: ResourceFamily) -> Option<Duration> {
        match family {
            ResourceFamily::SystemStatus => Some(self.system_status),
            ResourceFamily::Health => Some(self.health),
            ResourceFamily::Libraries => self.libraries,
            ResourceFamily::ScanStatus => Some(self.scan_status),
            ResourceFamily::FileStats => Some(self.file_stats),
            ResourceFamily::DuplicateStats => Some(self.duplicate_stats),
        }
    }

    /// Overrides the ScanStatus cadence.
    pub fn with_scan_status(mut self, cadence: Duration) -> Self {
        self.scan_status = cadence;
        self
    }

    /// Overrides the SystemStatus cadence.
    pub fn with_system_status(mut self, cadence: Duration) -> Self {
        self.system_status = cadence;
        self
    }

    /// Enables periodic polling for the library collection.
    pub fn with_libraries(mut self, cadence: Duration) -> Self {
        self.libraries = Some(cadence);
        self
    }
}
