//! Live dashboard: polls status and scan progress until interrupted.

use medley_api::ScanState;
use medley_client::ResourceClient;
use medley_sync::{ResourceFamily, SyncEngine};
use std::error::Error;
use std::time::Duration;

/// Runs the watch command.
pub async fn run<C: ResourceClient + 'static>(engine: &SyncEngine<C>) -> Result<(), Box<dyn Error>> {
    // Watch guards keep the background polling alive; cadences come
    // from the engine's policy, not from the render interval.
    let _system = engine.watch(ResourceFamily::SystemStatus);
    let _scans = engine.watch(ResourceFamily::ScanStatus);

    println!("watching scans (ctrl-c to stop)");

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    let mut ticker = tokio::time::interval(Duration::from_secs(2));

    loop {
        tokio::select! {
            _ = &mut ctrl_c => break,
            _ = ticker.tick() => render(engine),
        }
    }

    println!();
    Ok(())
}

fn render<C: ResourceClient + 'static>(engine: &SyncEngine<C>) {
    let system = engine.system_status();
    let scans = engine.scan_status();

    let active = system
        .data
        .as_ref()
        .map(|s| s.active_scans.to_string())
        .unwrap_or_else(|| "?".into());

    let mut line = format!("active: {active}");

    if let Some(status) = scans.data.as_ref() {
        for op in status.scans.iter().filter(|op| op.status == ScanState::Running) {
            line.push_str(&format!("  |  {} {} files", op.path, op.files_processed));
        }
    }

    if scans.error.is_some() || system.error.is_some() {
        line.push_str("  [stale: refresh failing]");
    }

    println!("{line}");
}
