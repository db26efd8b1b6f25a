//! Init command: create the database and report where it lives.

use anyhow::Result;

use at_db::Database;

use crate::Config;

pub fn run(db: &Database, config: &Config) -> Result<()> {
    // Opening already ran the idempotent schema init.
    let employees = db.list_employees(None)?;
    println!("Attendance database ready at {}", config.database_path.display());
    println!("Registered employees: {}", employees.len());
    if let Some(roster) = &config.roster_path {
        println!("Roster file: {}", roster.display());
    }
    Ok(())
}
