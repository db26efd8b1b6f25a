//! Roster management: add, list, remove, and bulk sync from a JSON file.

use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::Local;
use serde::Deserialize;

use at_core::{AttendanceStore, MacAddr, SummaryPatch};
use at_db::Database;

/// One roster file entry.
///
/// The file is a JSON array: `[{"name": "...", "mac_address": "...",
/// "picture": "..."}]` with `picture` optional. MAC addresses are
/// normalized on deserialization.
#[derive(Debug, Deserialize)]
pub struct RosterEntry {
    pub name: String,
    pub mac_address: MacAddr,
    #[serde(default)]
    pub picture: Option<String>,
}

pub fn add(db: &mut Database, name: &str, mac: &str, picture: Option<&str>) -> Result<()> {
    let mac = MacAddr::parse(mac).with_context(|| format!("invalid MAC address {mac:?}"))?;
    let employee = db
        .add_employee(name, &mac, picture)
        .context("failed to add employee (is the MAC already registered?)")?;
    println!("Added {} (id {}, {})", employee.name, employee.id, employee.mac);
    Ok(())
}

pub fn list(db: &Database, search: Option<&str>) -> Result<()> {
    let employees = db.list_employees(search)?;
    if employees.is_empty() {
        println!("No employees registered.");
        return Ok(());
    }
    println!("{:<6} {:<24} {}", "Id", "Name", "MAC");
    for employee in employees {
        println!("{:<6} {:<24} {}", employee.id, employee.name, employee.mac);
    }
    Ok(())
}

pub fn remove(db: &mut Database, id: i64) -> Result<()> {
    if db.delete_employee(id)? {
        println!("Removed employee {id}.");
        Ok(())
    } else {
        bail!("no employee with id {id}")
    }
}

/// Synchronizes the roster from a JSON file.
///
/// New MACs are registered, existing ones have their name and picture
/// refreshed, and every roster member gets today's summary seeded as Absent
/// so reports cover non-attendees. Employees missing from the file are left
/// alone; removal stays an explicit operation.
pub fn sync(db: &mut Database, path: &Path) -> Result<()> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read roster {}", path.display()))?;
    let roster: Vec<RosterEntry> = serde_json::from_str(&raw)
        .with_context(|| format!("malformed roster {}", path.display()))?;

    let today = Local::now().date_naive();
    let mut added = 0_usize;
    let mut updated = 0_usize;
    for entry in roster {
        let employee = match db.employee_by_mac(&entry.mac_address)? {
            Some(mut existing) => {
                if existing.name != entry.name || existing.picture != entry.picture {
                    existing.name = entry.name;
                    existing.picture = entry.picture;
                    db.update_employee(&existing)?;
                    updated += 1;
                }
                existing
            }
            None => {
                added += 1;
                db.add_employee(&entry.name, &entry.mac_address, entry.picture.as_deref())?
            }
        };
        // Seed today's row so absent employees still appear in reports.
        db.upsert_summary(employee.id, today, &SummaryPatch::default())?;
    }
    println!("Roster synced: {added} added, {updated} updated.");
    Ok(())
}
