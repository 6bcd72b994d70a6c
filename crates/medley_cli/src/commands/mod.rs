//! Console command implementations.

pub mod duplicates;
pub mod health;
pub mod libraries;
pub mod scan;
pub mod stats;
pub mod status;
pub mod watch;

use medley_sync::{MutationOutcome, Snapshot};
use std::error::Error;
use std::sync::Arc;

/// Unwraps a fetched snapshot for display. Stale data with a failed
/// refresh is still shown, with a warning on stderr; no data at all is
/// a command failure.
pub(crate) fn require_data<T>(
    what: &str,
    snapshot: Snapshot<T>,
) -> Result<Arc<T>, Box<dyn Error>> {
    if let Some(err) = &snapshot.error {
        if snapshot.data.is_some() {
            eprintln!("warning: {what} refresh failed ({err}); showing last known data");
        } else {
            return Err(format!("failed to fetch {what}: {err}").into());
        }
    }
    snapshot
        .data
        .ok_or_else(|| format!("no data for {what}").into())
}

/// Prints a settled mutation and converts failure into a command error.
pub(crate) fn report(outcome: MutationOutcome) -> Result<(), Box<dyn Error>> {
    if outcome.success {
        println!("{}", outcome.message);
        Ok(())
    } else {
        Err(outcome.message.into())
    }
}

/// Formats a byte count for humans.
pub(crate) fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_format_with_binary_units() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KiB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.0 MiB");
        assert_eq!(format_size(3 * 1024 * 1024 * 1024), "3.0 GiB");
    }
}
