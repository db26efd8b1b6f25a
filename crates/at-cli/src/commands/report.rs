//! Report command: one date's summaries as a table or JSON.

use std::io::Write;

use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;

use at_db::{Database, SummaryRow};

use super::util::{format_hms, format_opt_time};

#[derive(Serialize)]
struct ReportLine<'a> {
    name: &'a str,
    mac: &'a str,
    date: NaiveDate,
    time_in: String,
    time_out: String,
    break_duration: String,
    work_duration: String,
    status: &'a str,
}

fn line(row: &SummaryRow) -> ReportLine<'_> {
    ReportLine {
        name: &row.employee_name,
        mac: row.mac.as_str(),
        date: row.summary.date,
        time_in: format_opt_time(row.summary.time_in),
        time_out: format_opt_time(row.summary.time_out),
        break_duration: format_hms(row.summary.break_secs),
        work_duration: format_hms(row.summary.work_secs),
        status: row.summary.status.as_str(),
    }
}

pub fn run<W: Write>(writer: &mut W, db: &Database, date: NaiveDate, json: bool) -> Result<()> {
    let rows = db.summaries_for_date(date)?;

    if json {
        let lines: Vec<ReportLine<'_>> = rows.iter().map(line).collect();
        serde_json::to_writer_pretty(&mut *writer, &lines)?;
        writeln!(writer)?;
        return Ok(());
    }

    if rows.is_empty() {
        writeln!(writer, "No attendance recorded for {date}.")?;
        return Ok(());
    }

    writeln!(
        writer,
        "{:<24} {:<10} {:<10} {:<10} {:<10} {}",
        "Name", "Time In", "Time Out", "Break", "Work", "Status"
    )?;
    for row in &rows {
        let line = line(row);
        writeln!(
            writer,
            "{:<24} {:<10} {:<10} {:<10} {:<10} {}",
            line.name,
            line.time_in,
            line.time_out,
            line.break_duration,
            line.work_duration,
            line.status,
        )?;
    }
    Ok(())
}
