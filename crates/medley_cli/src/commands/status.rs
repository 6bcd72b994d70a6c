//! Status command implementation.

use super::require_data;
use medley_client::ResourceClient;
use medley_sync::SyncEngine;
use std::error::Error;

/// Runs the status command.
pub async fn run<C: ResourceClient + 'static>(
    engine: &SyncEngine<C>,
    format: &str,
) -> Result<(), Box<dyn Error>> {
    let status = require_data("system status", engine.fetch_system_status().await)?;

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&*status)?),
        _ => {
            println!("status:        {:?}", status.system_status);
            println!("version:       {}", status.version);
            if let Some(startup) = &status.startup_time {
                println!("started:       {startup}");
            }
            println!("uptime:        {}", format_uptime(status.uptime_seconds));
            println!("active scans:  {}", status.active_scans);
            println!("files:         {}", status.total_files_indexed);
            println!("directories:   {}", status.total_directories);
        }
    }

    Ok(())
}

fn format_uptime(seconds: u64) -> String {
    let days = seconds / 86_400;
    let hours = (seconds % 86_400) / 3_600;
    let minutes = (seconds % 3_600) / 60;
    if days > 0 {
        format!("{days}d {hours}h {minutes}m")
    } else if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m {}s", seconds % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uptime_formatting() {
        assert_eq!(format_uptime(59), "0m 59s");
        assert_eq!(format_uptime(3_660), "1h 1m");
        assert_eq!(format_uptime(90_000), "1d 1h 0m");
    }
}
