//! Health command implementation.

use super::require_data;
use medley_api::DependencyState;
use medley_client::ResourceClient;
use medley_sync::SyncEngine;
use std::error::Error;

/// Runs the health command.
pub async fn run<C: ResourceClient + 'static>(engine: &SyncEngine<C>) -> Result<(), Box<dyn Error>> {
    let health = require_data("health", engine.fetch_health().await)?;

    println!("overall:  {:?}", health.status);
    println!("redis:    {}", mark(health.databases.redis));
    println!("mongodb:  {}", mark(health.databases.mongodb));
    println!("mysql:    {}", mark(health.databases.mysql));

    Ok(())
}

fn mark(state: DependencyState) -> &'static str {
    match state {
        DependencyState::Connected => "connected",
        DependencyState::Disconnected => "DISCONNECTED",
        DependencyState::Unknown => "unknown",
    }
}
