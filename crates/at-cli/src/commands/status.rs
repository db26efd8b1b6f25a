//! Status command: current presence of every employee.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::Local;

use at_core::Tracker;
use at_db::Database;

use crate::Config;

/// Prints presence recovered from today's summaries.
///
/// This reads the same recovery path the watch loop uses at startup, so it
/// reflects the last persisted transition rather than a live scan.
pub fn run<W: Write>(writer: &mut W, db: Database, config: &Config, json: bool) -> Result<()> {
    let tracker = Tracker::new(db, config.tick_config(), Local::now().naive_local())
        .context("failed to recover tracker state")?;
    let statuses = tracker.current_status()?;

    if json {
        serde_json::to_writer_pretty(&mut *writer, &statuses)?;
        writeln!(writer)?;
        return Ok(());
    }

    if statuses.is_empty() {
        writeln!(writer, "No employees registered.")?;
        return Ok(());
    }

    writeln!(writer, "{:<24} {:<18} {:<10} {}", "Name", "MAC", "Status", "Time In")?;
    for status in statuses {
        let time_in = status
            .time_in
            .map_or_else(|| "-".to_string(), |t| t.format("%H:%M:%S").to_string());
        writeln!(
            writer,
            "{:<24} {:<18} {:<10} {time_in}",
            status.name,
            status.mac.as_str(),
            status.status.as_str(),
        )?;
    }
    Ok(())
}
