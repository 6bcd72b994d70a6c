//! A scripted resource client for tests.

use crate::client::ResourceClient;
use crate::error::{ClientError, ClientResult};
use async_trait::async_trait;
use medley_api::{
    DeletionCandidates, DuplicateGroups, DuplicateStats, FileStatistics, GroupingMethod,
    HealthStatus, LibraryPath, LibraryPathUpdate, Message, NewLibraryPath, ScanStatus, StartScan,
    SystemStatus,
};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};

/// Scripted responses for one operation, with a call counter.
///
/// One-shot responses queued with [`Script::push`] are consumed in order;
/// once the queue is empty the standing response set with
/// [`Script::respond`] answers every call. An unscripted call fails with
/// a decode error naming the operation.
pub struct Script<T> {
    name: &'static str,
    queue: Mutex<VecDeque<ClientResult<T>>>,
    standing: Mutex<Option<ClientResult<T>>>,
    calls: AtomicU64,
}

impl<T: Clone> Script<T> {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            queue: Mutex::new(VecDeque::new()),
            standing: Mutex::new(None),
            calls: AtomicU64::new(0),
        }
    }

    /// Sets the standing response answering every call.
    pub fn respond(&self, result: ClientResult<T>) {
        *self.standing.lock() = Some(result);
    }

    /// Queues a one-shot response consumed before the standing one.
    pub fn push(&self, result: ClientResult<T>) {
        self.queue.lock().push_back(result);
    }

    /// Number of calls made so far.
    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }

    fn next(&self) -> ClientResult<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(result) = self.queue.lock().pop_front() {
            return result;
        }
        self.standing
            .lock()
            .clone()
            .unwrap_or_else(|| Err(ClientError::Decode(format!("no scripted response for {}", self.name))))
    }
}

/// A [`ResourceClient`] whose every operation is a [`Script`].
///
/// Mirrors the backend contract without a network; the synchronization
/// layer's test suite drives its cache logic against this.
pub struct MockResourceClient {
    /// Script for `system_status`.
    pub system_status: Script<SystemStatus>,
    /// Script for `health`.
    pub health: Script<HealthStatus>,
    /// Script for `libraries`.
    pub libraries: Script<Vec<LibraryPath>>,
    /// Script for `create_library`.
    pub create_library: Script<Message>,
    /// Script for `update_library`.
    pub update_library: Script<Message>,
    /// Script for `delete_library`.
    pub delete_library: Script<Message>,
    /// Script for `scan_status`.
    pub scan_status: Script<ScanStatus>,
    /// Script for `start_scan`.
    pub start_scan: Script<Message>,
    /// Script for `stop_scan`.
    pub stop_scan: Script<Message>,
    /// Script for `file_stats`.
    pub file_stats: Script<FileStatistics>,
    /// Script for `duplicate_stats`.
    pub duplicate_stats: Script<DuplicateStats>,
    /// Script for `detect_duplicates`.
    pub detect_duplicates: Script<Message>,
    /// Script for `deletion_candidates`.
    pub deletion_candidates: Script<DeletionCandidates>,
    /// Script for `duplicate_groups`.
    pub duplicate_groups: Script<DuplicateGroups>,
}

impl MockResourceClient {
    /// Creates a mock with nothing scripted.
    pub fn new() -> Self {
        Self {
            system_status: Script::new("system_status"),
            health: Script::new("health"),
            libraries: Script::new("libraries"),
            create_library: Script::new("create_library"),
            update_library: Script::new("update_library"),
            delete_library: Script::new("delete_library"),
            scan_status: Script::new("scan_status"),
            start_scan: Script::new("start_scan"),
            stop_scan: Script::new("stop_scan"),
            file_stats: Script::new("file_stats"),
            duplicate_stats: Script::new("duplicate_stats"),
            detect_duplicates: Script::new("detect_duplicates"),
            deletion_candidates: Script::new("deletion_candidates"),
            duplicate_groups: Script::new("duplicate_groups"),
        }
    }
}

impl Default for MockResourceClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ResourceClient for MockResourceClient {
    async fn system_status(&self) -> ClientResult<SystemStatus> {
        self.system_status.next()
    }

    async fn health(&self) -> ClientResult<HealthStatus> {
        self.health.next()
    }

    async fn libraries(&self) -> ClientResult<Vec<LibraryPath>> {
        self.libraries.next()
    }

    async fn create_library(&self, _library: &NewLibraryPath) -> ClientResult<Message> {
        self.create_library.next()
    }

    async fn update_library(&self, _id: u64, _update: &LibraryPathUpdate) -> ClientResult<Message> {
        self.update_library.next()
    }

    async fn delete_library(&self, _id: u64) -> ClientResult<Message> {
        self.delete_library.next()
    }

    async fn scan_status(&self) -> ClientResult<ScanStatus> {
        self.scan_status.next()
    }

    async fn start_scan(&self, _request: &StartScan) -> ClientResult<Message> {
        self.start_scan.next()
    }

    async fn stop_scan(&self) -> ClientResult<Message> {
        self.stop_scan.next()
    }

    async fn file_stats(&self) -> ClientResult<FileStatistics> {
        self.file_stats.next()
    }

    async fn duplicate_stats(&self) -> ClientResult<DuplicateStats> {
        self.duplicate_stats.next()
    }

    async fn detect_duplicates(&self, _auto_mark: bool) -> ClientResult<Message> {
        self.detect_duplicates.next()
    }

    async fn deletion_candidates(&self, _limit: u32) -> ClientResult<DeletionCandidates> {
        self.deletion_candidates.next()
    }

    async fn duplicate_groups(
        &self,
        _method: GroupingMethod,
        _limit: u32,
    ) -> ClientResult<DuplicateGroups> {
        self.duplicate_groups.next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unscripted_operation_errors() {
        let mock = MockResourceClient::new();
        let err = mock.stop_scan().await.unwrap_err();
        assert!(matches!(err, ClientError::Decode(ref m) if m.contains("stop_scan")));
        assert_eq!(mock.stop_scan.calls(), 1);
    }

    #[tokio::test]
    async fn one_shot_responses_consumed_before_standing() {
        let mock = MockResourceClient::new();
        mock.start_scan.respond(Ok(Message::new("standing")));
        mock.start_scan.push(Err(ClientError::server(400, "busy")));

        assert!(mock.start_scan(&StartScan::default()).await.is_err());
        let msg = mock.start_scan(&StartScan::default()).await.unwrap();
        assert_eq!(msg.message, "standing");
        assert_eq!(mock.start_scan.calls(), 2);
    }
}
