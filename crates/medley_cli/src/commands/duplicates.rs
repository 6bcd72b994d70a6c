//! Duplicate detection command implementations.

use super::{report, require_data};
use medley_api::GroupingMethod;
use medley_client::ResourceClient;
use medley_sync::SyncEngine;
use std::error::Error;

/// Shows duplicate statistics.
pub async fn stats<C: ResourceClient + 'static>(
    engine: &SyncEngine<C>,
) -> Result<(), Box<dyn Error>> {
    let stats = require_data("duplicate statistics", engine.fetch_duplicate_stats().await)?;

    println!("duplicate groups:     {}", stats.duplicate_groups);
    println!("duplicate files:      {}", stats.duplicate_files);
    println!("deletion candidates:  {}", stats.deletion_candidates);
    println!("best quality files:   {}", stats.best_quality_files);

    Ok(())
}

/// Starts duplicate detection.
pub async fn detect<C: ResourceClient + 'static>(
    engine: &SyncEngine<C>,
    auto_mark: bool,
) -> Result<(), Box<dyn Error>> {
    report(engine.detect_duplicates(auto_mark).await)
}

/// Shows files marked for deletion.
pub async fn candidates<C: ResourceClient + 'static>(
    engine: &SyncEngine<C>,
    limit: u32,
) -> Result<(), Box<dyn Error>> {
    let result = engine
        .deletion_candidates(limit)
        .await
        .map_err(|e| format!("failed to fetch deletion candidates: {e}"))?;

    println!("deletion candidates: {}", result.total_count);
    for candidate in &result.deletion_candidates {
        println!("{}", serde_json::to_string_pretty(candidate)?);
    }

    Ok(())
}

/// Shows duplicate groups.
pub async fn groups<C: ResourceClient + 'static>(
    engine: &SyncEngine<C>,
    method: &str,
    limit: u32,
) -> Result<(), Box<dyn Error>> {
    let method: GroupingMethod = method.parse()?;
    let result = engine
        .duplicate_groups(method, limit)
        .await
        .map_err(|e| format!("failed to fetch duplicate groups: {e}"))?;

    println!("{} groups ({})", result.total_groups, result.method);
    for group in &result.duplicate_groups {
        println!("{}", serde_json::to_string_pretty(group)?);
    }

    Ok(())
}
