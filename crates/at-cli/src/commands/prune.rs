//! Prune command: enforce the retention window.

use anyhow::Result;
use chrono::{Days, Local};

use at_db::Database;

pub fn run(db: &mut Database, keep_days: u32) -> Result<()> {
    let cutoff = Local::now()
        .date_naive()
        .checked_sub_days(Days::new(u64::from(keep_days)))
        .unwrap_or(chrono::NaiveDate::MIN);
    let stats = db.prune_before(cutoff)?;
    println!(
        "Pruned {} events and {} summaries dated before {cutoff}.",
        stats.events, stats.summaries
    );
    Ok(())
}
