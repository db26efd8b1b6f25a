//! Events command: recent entries from the attendance log.

use std::io::Write;

use anyhow::Result;
use chrono::NaiveDate;

use at_db::Database;

pub fn run<W: Write>(
    writer: &mut W,
    db: &Database,
    date: Option<NaiveDate>,
    limit: usize,
) -> Result<()> {
    let rows = db.recent_events(date, limit)?;
    if rows.is_empty() {
        writeln!(writer, "No events recorded.")?;
        return Ok(());
    }

    for row in rows {
        let who = row
            .employee_name
            .unwrap_or_else(|| row.event.mac.to_string());
        writeln!(
            writer,
            "{}  {:<14} {who}",
            row.event.timestamp.format("%Y-%m-%d %H:%M:%S"),
            row.event.kind.as_str(),
        )?;
    }
    Ok(())
}
