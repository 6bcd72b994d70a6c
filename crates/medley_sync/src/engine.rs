//! The synchronization engine.

use crate::cache::{CacheSlot, Snapshot};
use crate::family::{PollPolicy, ResourceFamily};
use crate::libraries::Libraries;
use crate::mutation::{MutationKind, MutationOutcome};
use crate::notify::Notifier;
use medley_api::{
    DeletionCandidates, DuplicateGroups, DuplicateStats, FileStatistics, GroupingMethod,
    HealthStatus, LibraryPathUpdate, Message, NewLibraryPath, ScanStatus, StartScan, SystemStatus,
};
use medley_client::{ClientResult, ResourceClient};
use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Watcher bookkeeping for one family.
#[derive(Default)]
struct FamilyWatch {
    watchers: AtomicUsize,
    polling: AtomicBool,
}

/// Keeps one watcher registered; dropping it deregisters. The family's
/// poll task exits on its next tick once no watchers remain.
pub struct WatchGuard {
    watch: Arc<FamilyWatch>,
}

impl Drop for WatchGuard {
    fn drop(&mut self) {
        self.watch.watchers.fetch_sub(1, Ordering::SeqCst);
    }
}

/// The synchronization engine: a process-wide cache of backend
/// snapshots plus the mutation write path.
///
/// Reads (`system_status`, `scan_status`, ...) return the cached
/// snapshot immediately and refresh in the background per the
/// [`PollPolicy`]; the `fetch_*` variants await the refresh instead,
/// for callers that need settled data. Mutations invalidate the
/// families declared by [`MutationKind::invalidates`] and report their
/// outcome through the [`Notifier`], never as `Err`.
///
/// All state is shared: any clone of the surrounding `Arc` may read,
/// watch or mutate, and no caller owns exclusive access.
pub struct SyncEngine<C: ResourceClient> {
    client: Arc<C>,
    notifier: Arc<dyn Notifier>,
    policy: PollPolicy,
    system_status: Arc<CacheSlot<SystemStatus>>,
    health: Arc<CacheSlot<HealthStatus>>,
    libraries: Arc<CacheSlot<Libraries>>,
    scan_status: Arc<CacheSlot<ScanStatus>>,
    file_stats: Arc<CacheSlot<FileStatistics>>,
    duplicate_stats: Arc<CacheSlot<DuplicateStats>>,
    watches: [Arc<FamilyWatch>; 6],
}

impl<C: ResourceClient + 'static> SyncEngine<C> {
    /// Creates an engine with the default polling policy.
    pub fn new(client: C, notifier: Arc<dyn Notifier>) -> Self {
        Self::with_policy(client, notifier, PollPolicy::default())
    }

    /// Creates an engine with a custom polling policy.
    pub fn with_policy(client: C, notifier: Arc<dyn Notifier>, policy: PollPolicy) -> Self {
        Self {
            client: Arc::new(client),
            notifier,
            policy,
            system_status: Arc::new(CacheSlot::new()),
            health: Arc::new(CacheSlot::new()),
            libraries: Arc::new(CacheSlot::new()),
            scan_status: Arc::new(CacheSlot::new()),
            file_stats: Arc::new(CacheSlot::new()),
            duplicate_stats: Arc::new(CacheSlot::new()),
            watches: std::array::from_fn(|_| Arc::new(FamilyWatch::default())),
        }
    }

    /// The polling policy in effect.
    pub fn policy(&self) -> &PollPolicy {
        &self.policy
    }

    // ---- read path -----------------------------------------------------

    /// SystemStatus snapshot; refreshes in the background per policy.
    pub fn system_status(&self) -> Snapshot<SystemStatus> {
        let client = Arc::clone(&self.client);
        self.read(ResourceFamily::SystemStatus, &self.system_status, move || async move {
            client.system_status().await
        })
    }

    /// HealthStatus snapshot; refreshes in the background per policy.
    pub fn health(&self) -> Snapshot<HealthStatus> {
        let client = Arc::clone(&self.client);
        self.read(ResourceFamily::Health, &self.health, move || async move {
            client.health().await
        })
    }

    /// Library collection snapshot; fetched on demand only.
    pub fn libraries(&self) -> Snapshot<Libraries> {
        let client = Arc::clone(&self.client);
        self.read(ResourceFamily::Libraries, &self.libraries, move || async move {
            client.libraries().await.map(Libraries::from)
        })
    }

    /// ScanStatus snapshot; refreshes in the background per policy.
    pub fn scan_status(&self) -> Snapshot<ScanStatus> {
        let client = Arc::clone(&self.client);
        self.read(ResourceFamily::ScanStatus, &self.scan_status, move || async move {
            client.scan_status().await
        })
    }

    /// FileStatistics snapshot; refreshes in the background per policy.
    pub fn file_stats(&self) -> Snapshot<FileStatistics> {
        let client = Arc::clone(&self.client);
        self.read(ResourceFamily::FileStats, &self.file_stats, move || async move {
            client.file_stats().await
        })
    }

    /// DuplicateStats snapshot; refreshes in the background per policy.
    pub fn duplicate_stats(&self) -> Snapshot<DuplicateStats> {
        let client = Arc::clone(&self.client);
        self.read(
            ResourceFamily::DuplicateStats,
            &self.duplicate_stats,
            move || async move { client.duplicate_stats().await },
        )
    }

    /// Like `system_status`, but awaits the refresh when one is due.
    pub async fn fetch_system_status(&self) -> Snapshot<SystemStatus> {
        let client = Arc::clone(&self.client);
        self.fetch(ResourceFamily::SystemStatus, &self.system_status, move || async move {
            client.system_status().await
        })
        .await
    }

    /// Like `health`, but awaits the refresh when one is due.
    pub async fn fetch_health(&self) -> Snapshot<HealthStatus> {
        let client = Arc::clone(&self.client);
        self.fetch(ResourceFamily::Health, &self.health, move || async move {
            client.health().await
        })
        .await
    }

    /// Like `libraries`, but awaits the refresh when one is due.
    pub async fn fetch_libraries(&self) -> Snapshot<Libraries> {
        let client = Arc::clone(&self.client);
        self.fetch(ResourceFamily::Libraries, &self.libraries, move || async move {
            client.libraries().await.map(Libraries::from)
        })
        .await
    }

    /// Like `scan_status`, but awaits the refresh when one is due.
    pub async fn fetch_scan_status(&self) -> Snapshot<ScanStatus> {
        let client = Arc::clone(&self.client);
        self.fetch(ResourceFamily::ScanStatus, &self.scan_status, move || async move {
            client.scan_status().await
        })
        .await
    }

    /// Like `file_stats`, but awaits the refresh when one is due.
    pub async fn fetch_file_stats(&self) -> Snapshot<FileStatistics> {
        let client = Arc::clone(&self.client);
        self.fetch(ResourceFamily::FileStats, &self.file_stats, move || async move {
            client.file_stats().await
        })
        .await
    }

    /// Like `duplicate_stats`, but awaits the refresh when one is due.
    pub async fn fetch_duplicate_stats(&self) -> Snapshot<DuplicateStats> {
        let client = Arc::clone(&self.client);
        self.fetch(
            ResourceFamily::DuplicateStats,
            &self.duplicate_stats,
            move || async move { client.duplicate_stats().await },
        )
        .await
    }

    // ---- write path ----------------------------------------------------

    /// Creates a library path.
    pub async fn create_library(&self, library: NewLibraryPath) -> MutationOutcome {
        let result = self.client.create_library(&library).await;
        self.settle(MutationKind::CreateLibrary, result)
    }

    /// Updates a library path.
    pub async fn update_library(&self, id: u64, update: LibraryPathUpdate) -> MutationOutcome {
        let result = self.client.update_library(id, &update).await;
        self.settle(MutationKind::UpdateLibrary, result)
    }

    /// Deletes a library path.
    pub async fn delete_library(&self, id: u64) -> MutationOutcome {
        let result = self.client.delete_library(id).await;
        self.settle(MutationKind::DeleteLibrary, result)
    }

    /// Starts a scan.
    pub async fn start_scan(&self, request: StartScan) -> MutationOutcome {
        let result = self.client.start_scan(&request).await;
        self.settle(MutationKind::StartScan, result)
    }

    /// Stops all scans.
    pub async fn stop_scan(&self) -> MutationOutcome {
        let result = self.client.stop_scan().await;
        self.settle(MutationKind::StopScan, result)
    }

    /// Triggers duplicate detection.
    pub async fn detect_duplicates(&self, auto_mark: bool) -> MutationOutcome {
        let result = self.client.detect_duplicates(auto_mark).await;
        self.settle(MutationKind::DetectDuplicates, result)
    }

    // ---- uncached passthroughs -----------------------------------------

    /// Deletion candidates; on-demand, never cached.
    pub async fn deletion_candidates(&self, limit: u32) -> ClientResult<DeletionCandidates> {
        self.client.deletion_candidates(limit).await
    }

    /// Duplicate groups; on-demand, never cached.
    pub async fn duplicate_groups(
        &self,
        method: GroupingMethod,
        limit: u32,
    ) -> ClientResult<DuplicateGroups> {
        self.client.duplicate_groups(method, limit).await
    }

    // ---- invalidation and watching -------------------------------------

    /// Marks a family so its next read fetches fresh data. Never
    /// refetches synchronously.
    pub fn invalidate(&self, family: ResourceFamily) {
        debug!(family = family.name(), "cache invalidated");
        match family {
            ResourceFamily::SystemStatus => self.system_status.invalidate(),
            ResourceFamily::Health => self.health.invalidate(),
            ResourceFamily::Libraries => self.libraries.invalidate(),
            ResourceFamily::ScanStatus => self.scan_status.invalidate(),
            ResourceFamily::FileStats => self.file_stats.invalidate(),
            ResourceFamily::DuplicateStats => self.duplicate_stats.invalidate(),
        }
    }

    /// Registers a watcher on a family. While at least one guard is
    /// alive the family is polled at its cadence; the poll task stops
    /// after the last guard drops. Families without a cadence get a
    /// single on-demand read instead of a loop.
    pub fn watch(&self, family: ResourceFamily) -> WatchGuard {
        let watch = Arc::clone(&self.watches[family.index()]);
        watch.watchers.fetch_add(1, Ordering::SeqCst);

        match self.policy.cadence(family) {
            None => self.poke(family),
            Some(cadence) => {
                if !watch.polling.swap(true, Ordering::SeqCst) {
                    self.spawn_poll(family, cadence, Arc::clone(&watch));
                }
            }
        }

        WatchGuard { watch }
    }

    // ---- internals -----------------------------------------------------

    /// Read contract: return the cached snapshot now, refresh in the
    /// background when the slot is stale and no fetch is in flight.
    fn read<T, F, Fut>(
        &self,
        family: ResourceFamily,
        slot: &Arc<CacheSlot<T>>,
        fetch: F,
    ) -> Snapshot<T>
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = ClientResult<T>> + Send + 'static,
    {
        if let Some(token) = slot.begin_fetch(self.policy.cadence(family)) {
            let slot = Arc::clone(slot);
            let future = fetch();
            tokio::spawn(async move {
                let result = future.await;
                if let Err(err) = &result {
                    warn!(family = family.name(), error = %err, "background refresh failed");
                }
                slot.complete(token, result);
            });
        }
        slot.snapshot()
    }

    /// Awaited read: same staleness rules, but the refresh (if due)
    /// completes before the snapshot is returned.
    async fn fetch<T, F, Fut>(
        &self,
        family: ResourceFamily,
        slot: &Arc<CacheSlot<T>>,
        fetch: F,
    ) -> Snapshot<T>
    where
        T: Send + Sync,
        F: FnOnce() -> Fut,
        Fut: Future<Output = ClientResult<T>>,
    {
        if let Some(token) = slot.begin_fetch(self.policy.cadence(family)) {
            let result = fetch().await;
            if let Err(err) = &result {
                warn!(family = family.name(), error = %err, "refresh failed");
            }
            slot.complete(token, result);
        }
        slot.snapshot()
    }

    /// Applies the write contract to a finished mutation: on success
    /// invalidate the declared families, then notify; on failure leave
    /// the cache untouched and notify with the server detail when the
    /// backend provided one.
    fn settle(&self, kind: MutationKind, result: ClientResult<Message>) -> MutationOutcome {
        match result {
            Ok(ack) => {
                for family in kind.invalidates() {
                    self.invalidate(*family);
                }
                let message = if ack.message.is_empty() {
                    kind.success_fallback().to_string()
                } else {
                    ack.message
                };
                self.notifier.success(&message);
                MutationOutcome {
                    success: true,
                    message,
                }
            }
            Err(err) => {
                let message = err
                    .server_detail()
                    .map(str::to_string)
                    .unwrap_or_else(|| kind.failure_fallback().to_string());
                self.notifier.error(&message);
                MutationOutcome {
                    success: false,
                    message,
                }
            }
        }
    }

    /// Triggers the family's read path, discarding the snapshot.
    fn poke(&self, family: ResourceFamily) {
        match family {
            ResourceFamily::SystemStatus => {
                let _ = self.system_status();
            }
            ResourceFamily::Health => {
                let _ = self.health();
            }
            ResourceFamily::Libraries => {
                let _ = self.libraries();
            }
            ResourceFamily::ScanStatus => {
                let _ = self.scan_status();
            }
            ResourceFamily::FileStats => {
                let _ = self.file_stats();
            }
            ResourceFamily::DuplicateStats => {
                let _ = self.duplicate_stats();
            }
        }
    }

    fn spawn_poll(&self, family: ResourceFamily, cadence: Duration, watch: Arc<FamilyWatch>) {
        let client = Arc::clone(&self.client);
        match family {
            ResourceFamily::SystemStatus => poll_loop(
                family,
                cadence,
                watch,
                Arc::clone(&self.system_status),
                move || {
                    let client = Arc::clone(&client);
                    async move { client.system_status().await }
                },
            ),
            ResourceFamily::Health => poll_loop(
                family,
                cadence,
                watch,
                Arc::clone(&self.health),
                move || {
                    let client = Arc::clone(&client);
                    async move { client.health().await }
                },
            ),
            ResourceFamily::Libraries => poll_loop(
                family,
                cadence,
                watch,
                Arc::clone(&self.libraries),
                move || {
                    let client = Arc::clone(&client);
                    async move { client.libraries().await.map(Libraries::from) }
                },
            ),
            ResourceFamily::ScanStatus => poll_loop(
                family,
                cadence,
                watch,
                Arc::clone(&self.scan_status),
                move || {
                    let client = Arc::clone(&client);
                    async move { client.scan_status().await }
                },
            ),
            ResourceFamily::FileStats => poll_loop(
                family,
                cadence,
                watch,
                Arc::clone(&self.file_stats),
                move || {
                    let client = Arc::clone(&client);
                    async move { client.file_stats().await }
                },
            ),
            ResourceFamily::DuplicateStats => poll_loop(
                family,
                cadence,
                watch,
                Arc::clone(&self.duplicate_stats),
                move || {
                    let client = Arc::clone(&client);
                    async move { client.duplicate_stats().await }
                },
            ),
        }
    }
}

/// Polls one family at its cadence until no watcher remains.
///
/// The loop only claims the slot when the entry is actually stale, so a
/// watcher and an on-demand reader never double-fetch. Dropping the last
/// guard stops the loop at its next tick; an in-flight request is left
/// to complete and land in the shared cache.
fn poll_loop<T, F, Fut>(
    family: ResourceFamily,
    cadence: Duration,
    watch: Arc<FamilyWatch>,
    slot: Arc<CacheSlot<T>>,
    fetch: F,
) where
    T: Send + Sync + 'static,
    F: Fn() -> Fut + Send + 'static,
    Fut: Future<Output = ClientResult<T>> + Send + 'static,
{
    tokio::spawn(async move {
        debug!(family = family.name(), "polling started");
        loop {
            if watch.watchers.load(Ordering::SeqCst) == 0 {
                watch.polling.store(false, Ordering::SeqCst);
                // A watcher may have arrived between the check and the
                // store; reclaim the poller role if so.
                if watch.watchers.load(Ordering::SeqCst) > 0
                    && !watch.polling.swap(true, Ordering::SeqCst)
                {
                    continue;
                }
                break;
            }

            if let Some(token) = slot.begin_fetch(Some(cadence)) {
                let result = fetch().await;
                if let Err(err) = &result {
                    warn!(family = family.name(), error = %err, "poll refresh failed");
                }
                slot.complete(token, result);
            }

            tokio::time::sleep(cadence).await;
        }
        debug!(family = family.name(), "polling stopped");
    });
}
