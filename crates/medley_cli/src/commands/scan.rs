//! Scan command implementations.

use super::{report, require_data};
use medley_api::{ScanState, StartScan};
use medley_client::ResourceClient;
use medley_sync::SyncEngine;
use std::error::Error;

/// Starts a scan of one path or of every configured library.
pub async fn start<C: ResourceClient + 'static>(
    engine: &SyncEngine<C>,
    path: Option<String>,
    deep: bool,
) -> Result<(), Box<dyn Error>> {
    let mut request = match path {
        Some(path) => StartScan::path(path),
        None => StartScan::default(),
    };
    if deep {
        request = request.with_deep_scan(true);
    }

    report(engine.start_scan(request).await)
}

/// Stops all scan operations.
pub async fn stop<C: ResourceClient + 'static>(engine: &SyncEngine<C>) -> Result<(), Box<dyn Error>> {
    report(engine.stop_scan().await)
}

/// Shows current and recent scan operations.
pub async fn status<C: ResourceClient + 'static>(
    engine: &SyncEngine<C>,
) -> Result<(), Box<dyn Error>> {
    let status = require_data("scan status", engine.fetch_scan_status().await)?;

    println!("active scans: {}", status.active_scans);
    for op in &status.scans {
        let state = match op.status {
            ScanState::Running => "running",
            ScanState::Completed => "completed",
            ScanState::Failed => "FAILED",
        };
        print!(
            "  {:<40} {state:<10} {:>8} files  started {}",
            op.path, op.files_processed, op.started_at
        );
        if let Some(err) = &op.error {
            print!("  ({err})");
        }
        println!();
    }

    Ok(())
}
