//! Export command: one date's summaries as CSV.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;

use at_db::{Database, SummaryRow};

use super::util::{format_hms, format_opt_time};

const HEADERS: [&str; 8] = [
    "Name",
    "MAC Address",
    "Date",
    "Time In",
    "Time Out",
    "Total Break (HH:MM:SS)",
    "Total Work (HH:MM:SS)",
    "Status",
];

/// Writes summary rows as CSV, header included even when empty.
pub fn write_csv<W: Write>(writer: W, rows: &[SummaryRow]) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(HEADERS)?;
    for row in rows {
        let record = [
            row.employee_name.clone(),
            row.mac.to_string(),
            row.summary.date.format("%Y-%m-%d").to_string(),
            format_opt_time(row.summary.time_in),
            format_opt_time(row.summary.time_out),
            format_hms(row.summary.break_secs),
            format_hms(row.summary.work_secs),
            row.summary.status.as_str().to_string(),
        ];
        csv.write_record(&record)?;
    }
    csv.flush()?;
    Ok(())
}

pub fn run(db: &Database, date: NaiveDate, output: Option<&Path>) -> Result<()> {
    let rows = db.summaries_for_date(date)?;
    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            write_csv(file, &rows)?;
            println!("Exported {} rows to {}", rows.len(), path.display());
        }
        None => write_csv(std::io::stdout().lock(), &rows)?,
    }
    Ok(())
}
