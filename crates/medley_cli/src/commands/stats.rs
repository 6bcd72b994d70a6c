//! File statistics command implementation.

use super::{format_size, require_data};
use medley_client::ResourceClient;
use medley_sync::SyncEngine;
use std::error::Error;

/// Runs the stats command.
pub async fn run<C: ResourceClient + 'static>(
    engine: &SyncEngine<C>,
    format: &str,
) -> Result<(), Box<dyn Error>> {
    let stats = require_data("file statistics", engine.fetch_file_stats().await)?;

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&*stats)?),
        _ => {
            println!("files:        {}", stats.total_files);
            println!("directories:  {}", stats.total_directories);
            if !stats.by_category.is_empty() {
                println!("by category:");
                for cat in &stats.by_category {
                    println!(
                        "  {:<16} {:>10}  {:>10}",
                        cat.label(),
                        cat.count,
                        format_size(cat.total_size)
                    );
                }
            }
        }
    }

    Ok(())
}
