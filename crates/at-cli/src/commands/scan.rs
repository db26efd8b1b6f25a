//! Scan command: a single ARP snapshot with roster matching.

use anyhow::{Context, Result};

use at_core::AttendanceStore;
use at_db::Database;

use crate::arp;

pub fn run(db: &Database) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to initialize tokio runtime")?;
    let visible = runtime.block_on(arp::scan());

    if visible.is_empty() {
        println!("No devices visible.");
        return Ok(());
    }

    let mut macs: Vec<_> = visible.into_iter().collect();
    macs.sort();
    for mac in macs {
        match db.employee_by_mac(&mac)? {
            Some(employee) => println!("{mac}  {}", employee.name),
            None => println!("{mac}  -"),
        }
    }
    Ok(())
}
