//! Integration tests for the synchronization engine, driven by a
//! scripted client under a paused clock.

use medley_api::{Message, NewLibraryPath, ScanStatus, StartScan, SystemStatus};
use medley_client::{ClientError, MockResourceClient};
use medley_sync::{MemoryNotifier, Notification, ResourceFamily, SyncEngine};
use std::sync::Arc;
use std::time::Duration;

fn scan_status_payload() -> ScanStatus {
    serde_json::from_str(
        r#"{
            "active_scans": 1,
            "scans": [{
                "scan_id": "scan:1709290000",
                "path": "/media/music",
                "started_at": "2024-03-01T10:06:40",
                "status": "running",
                "files_processed": "42",
                "deep_scan": "False"
            }]
        }"#,
    )
    .unwrap()
}

fn system_status_payload() -> SystemStatus {
    serde_json::from_str(
        r#"{"system_status": "running", "version": "2.0.0", "active_scans": 1}"#,
    )
    .unwrap()
}

fn library_payload(id: u64, path: &str) -> medley_api::LibraryPath {
    serde_json::from_value(serde_json::json!({"id": id, "path": path})).unwrap()
}

struct Fixture {
    mock: Arc<MockResourceClient>,
    notifier: Arc<MemoryNotifier>,
    engine: SyncEngine<Arc<MockResourceClient>>,
}

fn fixture() -> Fixture {
    let mock = Arc::new(MockResourceClient::new());
    let notifier = Arc::new(MemoryNotifier::new());
    let engine = SyncEngine::new(Arc::clone(&mock), notifier.clone());
    Fixture {
        mock,
        notifier,
        engine,
    }
}

/// Lets spawned background refreshes run to completion.
async fn drain() {
    for _ in 0..32 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test(start_paused = true)]
async fn first_access_is_pending_then_populated() {
    let f = fixture();
    f.mock.scan_status.respond(Ok(scan_status_payload()));

    let snap = f.engine.scan_status();
    assert!(snap.is_empty());
    assert!(snap.is_fetching);

    drain().await;
    let snap = f.engine.scan_status();
    let data = snap.data.unwrap();
    assert_eq!(data.active_scans, 1);
    assert_eq!(data.scans[0].files_processed, 42);
    assert_eq!(f.mock.scan_status.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn reads_within_cadence_share_one_fetch() {
    let f = fixture();
    f.mock.scan_status.respond(Ok(scan_status_payload()));

    let first = f.engine.fetch_scan_status().await;
    tokio::time::advance(Duration::from_secs(1)).await;
    let second = f.engine.scan_status();

    assert_eq!(f.mock.scan_status.calls(), 1);
    assert!(Arc::ptr_eq(
        first.data.as_ref().unwrap(),
        second.data.as_ref().unwrap()
    ));
}

#[tokio::test(start_paused = true)]
async fn read_past_cadence_refreshes_in_background() {
    let f = fixture();
    f.mock.scan_status.respond(Ok(scan_status_payload()));

    f.engine.fetch_scan_status().await;
    tokio::time::advance(Duration::from_secs(3)).await;

    // The stale read still returns the old snapshot immediately.
    let stale = f.engine.scan_status();
    assert!(!stale.is_empty());
    assert!(stale.is_fetching);

    drain().await;
    assert_eq!(f.mock.scan_status.calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn invalidation_forces_exactly_one_fetch() {
    let f = fixture();
    f.mock.scan_status.respond(Ok(scan_status_payload()));

    f.engine.fetch_scan_status().await;
    f.engine.invalidate(ResourceFamily::ScanStatus);

    // Two concurrent reads inside the cadence window: single flight.
    let a = f.engine.scan_status();
    let b = f.engine.scan_status();
    assert!(a.is_fetching && b.is_fetching);

    drain().await;
    assert_eq!(f.mock.scan_status.calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn failed_refresh_keeps_last_known_good() {
    let f = fixture();
    f.mock.scan_status.respond(Ok(scan_status_payload()));

    let before = f.engine.fetch_scan_status().await;
    f.engine.invalidate(ResourceFamily::ScanStatus);
    f.mock
        .scan_status
        .push(Err(ClientError::transport("connection refused")));

    let after = f.engine.fetch_scan_status().await;
    assert!(Arc::ptr_eq(
        before.data.as_ref().unwrap(),
        after.data.as_ref().unwrap()
    ));
    assert!(after.error.is_some());
    assert_eq!(f.mock.scan_status.calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn create_library_invalidates_libraries_and_nothing_else() {
    let f = fixture();
    f.mock.libraries.respond(Ok(vec![library_payload(1, "/media/music")]));
    f.mock.scan_status.respond(Ok(scan_status_payload()));
    f.mock.create_library.respond(Ok(Message::new("created")));

    f.engine.fetch_libraries().await;
    f.engine.fetch_scan_status().await;

    let outcome = f
        .engine
        .create_library(NewLibraryPath::new("/media/music"))
        .await;
    assert!(outcome.success);
    assert_eq!(outcome.message, "created");
    assert_eq!(
        f.notifier.last().unwrap(),
        Notification::Success("created".into())
    );

    // Libraries refetch despite no cadence having elapsed.
    f.engine.fetch_libraries().await;
    assert_eq!(f.mock.libraries.calls(), 2);

    // Scan status was not touched.
    f.engine.fetch_scan_status().await;
    assert_eq!(f.mock.scan_status.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn start_scan_invalidates_scan_and_system_status() {
    let f = fixture();
    f.mock.scan_status.respond(Ok(scan_status_payload()));
    f.mock.system_status.respond(Ok(system_status_payload()));
    f.mock.libraries.respond(Ok(vec![]));
    f.mock.start_scan.respond(Ok(Message::new("Started scanning /media/music")));

    f.engine.fetch_scan_status().await;
    f.engine.fetch_system_status().await;
    f.engine.fetch_libraries().await;

    let outcome = f.engine.start_scan(StartScan::path("/media/music")).await;
    assert!(outcome.success);
    assert_eq!(outcome.message, "Started scanning /media/music");

    f.engine.fetch_scan_status().await;
    f.engine.fetch_system_status().await;
    f.engine.fetch_libraries().await;
    assert_eq!(f.mock.scan_status.calls(), 2);
    assert_eq!(f.mock.system_status.calls(), 2);
    assert_eq!(f.mock.libraries.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn detect_duplicates_invalidates_duplicate_stats_only() {
    let f = fixture();
    f.mock.duplicate_stats.respond(Ok(Default::default()));
    f.mock.file_stats.respond(Ok(serde_json::from_str(r#"{"total_files": 1}"#).unwrap()));
    f.mock
        .detect_duplicates
        .respond(Ok(Message::new("Started duplicate detection (analysis only)")));

    f.engine.fetch_duplicate_stats().await;
    f.engine.fetch_file_stats().await;

    let outcome = f.engine.detect_duplicates(false).await;
    assert!(outcome.success);

    f.engine.fetch_duplicate_stats().await;
    f.engine.fetch_file_stats().await;
    assert_eq!(f.mock.duplicate_stats.calls(), 2);
    assert_eq!(f.mock.file_stats.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn failed_mutation_leaves_cache_untouched_and_notifies_detail() {
    let f = fixture();
    f.mock.scan_status.respond(Ok(scan_status_payload()));
    f.mock
        .start_scan
        .respond(Err(ClientError::server(404, "path not found")));

    let before = f.engine.fetch_scan_status().await;

    let outcome = f.engine.start_scan(StartScan::default()).await;
    assert!(!outcome.success);
    assert_eq!(outcome.message, "path not found");
    assert_eq!(
        f.notifier.last().unwrap(),
        Notification::Error("path not found".into())
    );

    // No invalidation happened: the cached snapshot still serves.
    let after = f.engine.fetch_scan_status().await;
    assert!(Arc::ptr_eq(
        before.data.as_ref().unwrap(),
        after.data.as_ref().unwrap()
    ));
    assert_eq!(f.mock.scan_status.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn transport_failure_falls_back_to_fixed_text() {
    let f = fixture();
    f.mock
        .stop_scan
        .respond(Err(ClientError::timeout("deadline exceeded")));

    let outcome = f.engine.stop_scan().await;
    assert!(!outcome.success);
    assert_eq!(outcome.message, "Failed to stop scan");
}

#[tokio::test(start_paused = true)]
async fn empty_ack_message_falls_back_to_fixed_text() {
    let f = fixture();
    f.mock.delete_library.respond(Ok(Message::default()));

    let outcome = f.engine.delete_library(7).await;
    assert!(outcome.success);
    assert_eq!(outcome.message, "Library path deleted successfully");
}

#[tokio::test(start_paused = true)]
async fn watcher_polls_at_cadence_until_last_guard_drops() {
    let f = fixture();
    f.mock.scan_status.respond(Ok(scan_status_payload()));

    let guard = f.engine.watch(ResourceFamily::ScanStatus);
    drain().await;
    assert_eq!(f.mock.scan_status.calls(), 1);

    tokio::time::advance(Duration::from_secs(2)).await;
    drain().await;
    assert_eq!(f.mock.scan_status.calls(), 2);

    tokio::time::advance(Duration::from_secs(2)).await;
    drain().await;
    assert_eq!(f.mock.scan_status.calls(), 3);

    drop(guard);
    tokio::time::advance(Duration::from_secs(20)).await;
    drain().await;
    assert_eq!(f.mock.scan_status.calls(), 3);
}

#[tokio::test(start_paused = true)]
async fn second_watcher_does_not_double_poll() {
    let f = fixture();
    f.mock.scan_status.respond(Ok(scan_status_payload()));

    let a = f.engine.watch(ResourceFamily::ScanStatus);
    let b = f.engine.watch(ResourceFamily::ScanStatus);
    drain().await;
    assert_eq!(f.mock.scan_status.calls(), 1);

    tokio::time::advance(Duration::from_secs(2)).await;
    drain().await;
    assert_eq!(f.mock.scan_status.calls(), 2);

    // One guard remains: polling continues.
    drop(a);
    tokio::time::advance(Duration::from_secs(2)).await;
    drain().await;
    assert_eq!(f.mock.scan_status.calls(), 3);

    drop(b);
    tokio::time::advance(Duration::from_secs(20)).await;
    drain().await;
    assert_eq!(f.mock.scan_status.calls(), 3);
}

#[tokio::test(start_paused = true)]
async fn watching_an_on_demand_family_fetches_once() {
    let f = fixture();
    f.mock.libraries.respond(Ok(vec![library_payload(1, "/media/music")]));

    let _guard = f.engine.watch(ResourceFamily::Libraries);
    drain().await;
    assert_eq!(f.mock.libraries.calls(), 1);

    tokio::time::advance(Duration::from_secs(3600)).await;
    drain().await;
    assert_eq!(f.mock.libraries.calls(), 1);
}
