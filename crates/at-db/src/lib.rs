//! Storage layer for the attendance tracker.
//!
//! Provides persistence for employees, the append-only attendance event log,
//! and the daily summary cache using `rusqlite`.
//!
//! # Thread Safety
//!
//! The [`Database`] type wraps a `rusqlite::Connection`, which is `Send` but
//! not `Sync`. For multi-threaded access wrap it (or the tracker owning it)
//! in a `Mutex`.
//!
//! # Schema
//!
//! Timestamps are stored as TEXT in `YYYY-MM-DD HH:MM:SS` local wall-clock
//! form, dates as `YYYY-MM-DD` and times of day as `HH:MM:SS`, so
//! lexicographic ordering matches chronological ordering and rows stay
//! human-readable. The event log is the source of truth; `daily_summaries`
//! is a cache recomputable from it.

use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rusqlite::{Connection, OptionalExtension, params};
use thiserror::Error;
use uuid::Uuid;

use at_core::event::{AttendanceEvent, EventKind, UnknownEventKind};
use at_core::mac::{InvalidMac, MacAddr};
use at_core::store::{AttendanceStore, Employee};
use at_core::summary::{DailySummary, DayStatus, SummaryPatch, UnknownDayStatus};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S";

/// Database errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// An error from the underlying database.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// A stored event timestamp failed to parse.
    #[error("invalid timestamp for event {event_id}: {value}")]
    EventTimestamp {
        event_id: String,
        value: String,
        #[source]
        source: chrono::ParseError,
    },
    /// A stored event kind is not one of the known kinds.
    #[error("unknown kind for event {event_id}: {source}")]
    EventKind {
        event_id: String,
        #[source]
        source: UnknownEventKind,
    },
    /// A stored MAC address failed normalization.
    #[error("invalid mac address in stored row: {0}")]
    Mac(#[from] InvalidMac),
    /// A summary date or time-of-day column failed to parse.
    #[error("malformed summary {field} for employee {employee_id}: {value}")]
    SummaryField {
        employee_id: i64,
        field: &'static str,
        value: String,
    },
    /// A stored summary status is not one of the known statuses.
    #[error("unknown status for employee {employee_id} on {date}: {source}")]
    SummaryStatus {
        employee_id: i64,
        date: String,
        #[source]
        source: UnknownDayStatus,
    },
}

/// Database connection wrapper.
///
/// See the [module documentation](self) for thread safety considerations.
pub struct Database {
    conn: Connection,
}

/// An event joined with the employee's display name, for listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRow {
    pub event: AttendanceEvent,
    /// `None` when the employee has since been deleted.
    pub employee_name: Option<String>,
}

/// A daily summary joined with the employee identity, for reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRow {
    pub employee_name: String,
    pub mac: MacAddr,
    pub summary: DailySummary,
}

/// Rows removed by a retention prune.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PruneStats {
    pub events: usize,
    pub summaries: usize,
}

impl Database {
    /// Opens a database at the given path, creating it if necessary.
    ///
    /// The schema is automatically initialized on first open.
    pub fn open(path: &Path) -> Result<Self, DbError> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Opens an in-memory database.
    ///
    /// Useful for testing. The database is destroyed when the connection closes.
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Initializes the database schema.
    ///
    /// This is idempotent - safe to call on an already-initialized database.
    fn init(&self) -> Result<(), DbError> {
        self.conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS employees (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                mac_address TEXT NOT NULL UNIQUE,
                picture TEXT
            );

            -- Append-only event log: the source of truth for all durations.
            -- timestamp: local wall-clock, 'YYYY-MM-DD HH:MM:SS'
            CREATE TABLE IF NOT EXISTS attendance_events (
                id TEXT PRIMARY KEY,
                employee_id INTEGER,
                mac_address TEXT NOT NULL,
                kind TEXT NOT NULL,
                timestamp TEXT NOT NULL,
                FOREIGN KEY (employee_id) REFERENCES employees(id) ON DELETE SET NULL
            );

            CREATE INDEX IF NOT EXISTS idx_events_timestamp ON attendance_events(timestamp);
            CREATE INDEX IF NOT EXISTS idx_events_employee_ts ON attendance_events(employee_id, timestamp);

            -- Materialized per-day cache, recomputable from attendance_events.
            CREATE TABLE IF NOT EXISTS daily_summaries (
                employee_id INTEGER NOT NULL,
                date TEXT NOT NULL,
                time_in TEXT,
                time_out TEXT,
                break_secs INTEGER NOT NULL DEFAULT 0,
                work_secs INTEGER NOT NULL DEFAULT 0,
                status TEXT NOT NULL DEFAULT 'Absent',
                PRIMARY KEY (employee_id, date),
                FOREIGN KEY (employee_id) REFERENCES employees(id) ON DELETE CASCADE
            );

            CREATE INDEX IF NOT EXISTS idx_summaries_date ON daily_summaries(date);
            ",
        )?;
        Ok(())
    }

    /// Registers an employee. The MAC address must be unique.
    pub fn add_employee(
        &mut self,
        name: &str,
        mac: &MacAddr,
        picture: Option<&str>,
    ) -> Result<Employee, DbError> {
        self.conn.execute(
            "INSERT INTO employees (name, mac_address, picture) VALUES (?1, ?2, ?3)",
            params![name, mac.as_str(), picture],
        )?;
        Ok(Employee {
            id: self.conn.last_insert_rowid(),
            name: name.to_string(),
            mac: mac.clone(),
            picture: picture.map(str::to_string),
        })
    }

    /// Updates an employee record. Returns false when the id is unknown.
    pub fn update_employee(&mut self, employee: &Employee) -> Result<bool, DbError> {
        let changed = self.conn.execute(
            "UPDATE employees SET name = ?2, mac_address = ?3, picture = ?4 WHERE id = ?1",
            params![
                employee.id,
                employee.name,
                employee.mac.as_str(),
                employee.picture
            ],
        )?;
        Ok(changed > 0)
    }

    /// Removes an employee. Their events are kept (unlinked); their
    /// summaries are cascade-deleted. Returns false when the id is unknown.
    pub fn delete_employee(&mut self, id: i64) -> Result<bool, DbError> {
        let changed = self
            .conn
            .execute("DELETE FROM employees WHERE id = ?1", params![id])?;
        Ok(changed > 0)
    }

    pub fn employee_by_id(&self, id: i64) -> Result<Option<Employee>, DbError> {
        self.conn
            .query_row(
                "SELECT id, name, mac_address, picture FROM employees WHERE id = ?1",
                params![id],
                employee_from_row,
            )
            .optional()?
            .transpose()
    }

    /// Lists employees ordered by name, optionally filtered by a
    /// case-insensitive substring of the name or MAC address.
    pub fn list_employees(&self, search: Option<&str>) -> Result<Vec<Employee>, DbError> {
        let mut stmt = self.conn.prepare(
            "
            SELECT id, name, mac_address, picture
            FROM employees
            WHERE ?1 IS NULL
               OR name LIKE '%' || ?1 || '%'
               OR mac_address LIKE '%' || ?1 || '%'
            ORDER BY name ASC, id ASC
            ",
        )?;
        let rows = stmt.query_map(params![search], employee_from_row)?;
        let mut employees = Vec::new();
        for row in rows {
            employees.push(row??);
        }
        Ok(employees)
    }

    /// Lists recent events joined with employee names, newest first.
    pub fn recent_events(
        &self,
        date: Option<NaiveDate>,
        limit: usize,
    ) -> Result<Vec<EventRow>, DbError> {
        let date = date.map(|d| d.format(DATE_FORMAT).to_string());
        let mut stmt = self.conn.prepare(
            "
            SELECT e.id, e.employee_id, e.mac_address, e.kind, e.timestamp, emp.name
            FROM attendance_events e
            LEFT JOIN employees emp ON emp.id = e.employee_id
            WHERE ?1 IS NULL OR e.timestamp LIKE ?1 || '%'
            ORDER BY e.timestamp DESC, e.id DESC
            LIMIT ?2
            ",
        )?;
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = stmt.query_map(params![date, limit], |row| {
            let name: Option<String> = row.get(5)?;
            Ok((raw_event_from_row(row)?, name))
        })?;
        let mut events = Vec::new();
        for row in rows {
            let (raw, employee_name) = row?;
            events.push(EventRow {
                event: raw.into_event()?,
                employee_name,
            });
        }
        Ok(events)
    }

    /// All summaries for one date joined with employee identity, ordered by
    /// employee name.
    pub fn summaries_for_date(&self, date: NaiveDate) -> Result<Vec<SummaryRow>, DbError> {
        let mut stmt = self.conn.prepare(
            "
            SELECT s.employee_id, s.date, s.time_in, s.time_out,
                   s.break_secs, s.work_secs, s.status,
                   emp.name, emp.mac_address
            FROM daily_summaries s
            JOIN employees emp ON emp.id = s.employee_id
            WHERE s.date = ?1
            ORDER BY emp.name ASC, emp.id ASC
            ",
        )?;
        let rows = stmt.query_map(params![date.format(DATE_FORMAT).to_string()], |row| {
            let name: String = row.get(7)?;
            let mac: String = row.get(8)?;
            Ok((raw_summary_from_row(row)?, name, mac))
        })?;
        let mut summaries = Vec::new();
        for row in rows {
            let (raw, employee_name, mac) = row?;
            summaries.push(SummaryRow {
                employee_name,
                mac: MacAddr::parse(&mac)?,
                summary: raw.into_summary()?,
            });
        }
        Ok(summaries)
    }

    /// Deletes events and summaries dated strictly before `cutoff`.
    pub fn prune_before(&mut self, cutoff: NaiveDate) -> Result<PruneStats, DbError> {
        let cutoff = cutoff.format(DATE_FORMAT).to_string();
        let tx = self.conn.transaction()?;
        let events = tx.execute(
            "DELETE FROM attendance_events WHERE timestamp < ?1",
            params![cutoff],
        )?;
        let summaries = tx.execute(
            "DELETE FROM daily_summaries WHERE date < ?1",
            params![cutoff],
        )?;
        tx.commit()?;
        let stats = PruneStats { events, summaries };
        tracing::debug!(
            events = stats.events,
            summaries = stats.summaries,
            %cutoff,
            "pruned retention window"
        );
        Ok(stats)
    }
}

impl AttendanceStore for Database {
    type Error = DbError;

    fn employees(&self) -> Result<Vec<Employee>, DbError> {
        self.list_employees(None)
    }

    fn employee_by_mac(&self, mac: &MacAddr) -> Result<Option<Employee>, DbError> {
        self.conn
            .query_row(
                "SELECT id, name, mac_address, picture FROM employees WHERE mac_address = ?1",
                params![mac.as_str()],
                employee_from_row,
            )
            .optional()?
            .transpose()
    }

    fn log_event(
        &mut self,
        employee_id: Option<i64>,
        mac: &MacAddr,
        kind: EventKind,
        timestamp: NaiveDateTime,
    ) -> Result<AttendanceEvent, DbError> {
        let id = Uuid::new_v4().to_string();
        self.conn.execute(
            "
            INSERT INTO attendance_events (id, employee_id, mac_address, kind, timestamp)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ",
            params![
                id,
                employee_id,
                mac.as_str(),
                kind.as_str(),
                timestamp.format(TIMESTAMP_FORMAT).to_string(),
            ],
        )?;
        Ok(AttendanceEvent {
            id,
            employee_id,
            mac: mac.clone(),
            kind,
            timestamp,
        })
    }

    fn summary(
        &self,
        employee_id: i64,
        date: NaiveDate,
    ) -> Result<Option<DailySummary>, DbError> {
        self.conn
            .query_row(
                "
                SELECT employee_id, date, time_in, time_out, break_secs, work_secs, status
                FROM daily_summaries
                WHERE employee_id = ?1 AND date = ?2
                ",
                params![employee_id, date.format(DATE_FORMAT).to_string()],
                raw_summary_from_row,
            )
            .optional()?
            .map(RawSummary::into_summary)
            .transpose()
    }

    fn upsert_summary(
        &mut self,
        employee_id: i64,
        date: NaiveDate,
        patch: &SummaryPatch,
    ) -> Result<(), DbError> {
        // Unpopulated patch fields pass NULL and leave the column untouched.
        self.conn.execute(
            "
            INSERT INTO daily_summaries
                (employee_id, date, time_in, time_out, break_secs, work_secs, status)
            VALUES
                (?1, ?2, ?3, ?4, COALESCE(?5, 0), COALESCE(?6, 0), COALESCE(?7, 'Absent'))
            ON CONFLICT(employee_id, date) DO UPDATE SET
                time_in = COALESCE(?3, time_in),
                time_out = COALESCE(?4, time_out),
                break_secs = COALESCE(?5, break_secs),
                work_secs = COALESCE(?6, work_secs),
                status = COALESCE(?7, status)
            ",
            params![
                employee_id,
                date.format(DATE_FORMAT).to_string(),
                patch.time_in.map(|t| t.format(TIME_FORMAT).to_string()),
                patch.time_out.map(|t| t.format(TIME_FORMAT).to_string()),
                patch.break_secs,
                patch.work_secs,
                patch.status.map(|s| s.as_str()),
            ],
        )?;
        Ok(())
    }

    fn events_for_day(
        &self,
        employee_id: i64,
        date: NaiveDate,
    ) -> Result<Vec<AttendanceEvent>, DbError> {
        let mut stmt = self.conn.prepare(
            "
            SELECT id, employee_id, mac_address, kind, timestamp
            FROM attendance_events
            WHERE employee_id = ?1 AND timestamp LIKE ?2 || '%'
            ORDER BY timestamp ASC, id ASC
            ",
        )?;
        let rows = stmt.query_map(
            params![employee_id, date.format(DATE_FORMAT).to_string()],
            raw_event_from_row,
        )?;
        let mut events = Vec::new();
        for row in rows {
            events.push(row?.into_event()?);
        }
        Ok(events)
    }
}

fn employee_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Result<Employee, DbError>> {
    let mac: String = row.get(2)?;
    Ok(match MacAddr::parse(&mac) {
        Ok(mac) => Ok(Employee {
            id: row.get(0)?,
            name: row.get(1)?,
            mac,
            picture: row.get(3)?,
        }),
        Err(err) => Err(DbError::Mac(err)),
    })
}

/// Event columns as stored, before domain parsing.
struct RawEvent {
    id: String,
    employee_id: Option<i64>,
    mac: String,
    kind: String,
    timestamp: String,
}

impl RawEvent {
    fn into_event(self) -> Result<AttendanceEvent, DbError> {
        let kind = self
            .kind
            .parse::<EventKind>()
            .map_err(|source| DbError::EventKind {
                event_id: self.id.clone(),
                source,
            })?;
        let timestamp = NaiveDateTime::parse_from_str(&self.timestamp, TIMESTAMP_FORMAT).map_err(
            |source| DbError::EventTimestamp {
                event_id: self.id.clone(),
                value: self.timestamp.clone(),
                source,
            },
        )?;
        Ok(AttendanceEvent {
            id: self.id,
            employee_id: self.employee_id,
            mac: MacAddr::parse(&self.mac)?,
            kind,
            timestamp,
        })
    }
}

fn raw_event_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawEvent> {
    Ok(RawEvent {
        id: row.get(0)?,
        employee_id: row.get(1)?,
        mac: row.get(2)?,
        kind: row.get(3)?,
        timestamp: row.get(4)?,
    })
}

/// Summary columns as stored, before domain parsing.
struct RawSummary {
    employee_id: i64,
    date: String,
    time_in: Option<String>,
    time_out: Option<String>,
    break_secs: i64,
    work_secs: i64,
    status: String,
}

impl RawSummary {
    fn into_summary(self) -> Result<DailySummary, DbError> {
        let date = NaiveDate::parse_from_str(&self.date, DATE_FORMAT).map_err(|_| {
            DbError::SummaryField {
                employee_id: self.employee_id,
                field: "date",
                value: self.date.clone(),
            }
        })?;
        let time_in = self
            .time_in
            .as_deref()
            .map(|t| parse_time_of_day(self.employee_id, "time_in", t))
            .transpose()?;
        let time_out = self
            .time_out
            .as_deref()
            .map(|t| parse_time_of_day(self.employee_id, "time_out", t))
            .transpose()?;
        let status = self
            .status
            .parse::<DayStatus>()
            .map_err(|source| DbError::SummaryStatus {
                employee_id: self.employee_id,
                date: self.date.clone(),
                source,
            })?;
        Ok(DailySummary {
            employee_id: self.employee_id,
            date,
            time_in,
            time_out,
            break_secs: self.break_secs,
            work_secs: self.work_secs,
            status,
        })
    }
}

fn parse_time_of_day(
    employee_id: i64,
    field: &'static str,
    value: &str,
) -> Result<NaiveTime, DbError> {
    NaiveTime::parse_from_str(value, TIME_FORMAT).map_err(|_| DbError::SummaryField {
        employee_id,
        field,
        value: value.to_string(),
    })
}

fn raw_summary_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawSummary> {
    Ok(RawSummary {
        employee_id: row.get(0)?,
        date: row.get(1)?,
        time_in: row.get(2)?,
        time_out: row.get(3)?,
        break_secs: row.get(4)?,
        work_secs: row.get(5)?,
        status: row.get(6)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mac(s: &str) -> MacAddr {
        MacAddr::parse(s).unwrap()
    }

    fn at(h: u32, m: u32) -> NaiveDateTime {
        date().and_hms_opt(h, m, 0).unwrap()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
    }

    fn table_columns(db: &Database, table: &str) -> Vec<String> {
        let mut stmt = db
            .conn
            .prepare(&format!("PRAGMA table_info({table})"))
            .unwrap();
        stmt.query_map([], |row| row.get::<_, String>(1))
            .unwrap()
            .map(Result::unwrap)
            .collect()
    }

    #[test]
    fn schema_has_expected_columns() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(
            table_columns(&db, "employees"),
            ["id", "name", "mac_address", "picture"]
        );
        assert_eq!(
            table_columns(&db, "attendance_events"),
            ["id", "employee_id", "mac_address", "kind", "timestamp"]
        );
        assert_eq!(
            table_columns(&db, "daily_summaries"),
            [
                "employee_id",
                "date",
                "time_in",
                "time_out",
                "break_secs",
                "work_secs",
                "status"
            ]
        );
    }

    #[test]
    fn init_is_idempotent() {
        let db = Database::open_in_memory().unwrap();
        db.init().unwrap();
    }

    #[test]
    fn open_persists_across_connections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("attendance.db");
        {
            let mut db = Database::open(&path).unwrap();
            db.add_employee("Dana", &mac("aa-bb-cc-dd-ee-ff"), None)
                .unwrap();
        }
        let db = Database::open(&path).unwrap();
        assert_eq!(db.list_employees(None).unwrap().len(), 1);
    }

    #[test]
    fn add_and_look_up_employees() {
        let mut db = Database::open_in_memory().unwrap();
        let dana = db
            .add_employee("Dana", &mac("aa-bb-cc-dd-ee-ff"), Some("dana.png"))
            .unwrap();
        db.add_employee("Alex", &mac("11-22-33-44-55-66"), None)
            .unwrap();

        let found = db.employee_by_mac(&mac("AA:BB:CC:DD:EE:FF")).unwrap();
        assert_eq!(found.as_ref().map(|e| e.id), Some(dana.id));
        assert_eq!(found.unwrap().picture.as_deref(), Some("dana.png"));

        // Ordered by name.
        let names: Vec<String> = db
            .list_employees(None)
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, ["Alex", "Dana"]);

        let filtered = db.list_employees(Some("dan")).unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "Dana");

        // MAC substrings match too, against the canonical dashed form.
        let filtered = db.list_employees(Some("bb-cc")).unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "Dana");

        assert!(db.list_employees(Some("zz")).unwrap().is_empty());
    }

    #[test]
    fn duplicate_mac_is_rejected() {
        let mut db = Database::open_in_memory().unwrap();
        db.add_employee("Dana", &mac("aa-bb-cc-dd-ee-ff"), None)
            .unwrap();
        let err = db.add_employee("Alex", &mac("AA:BB:CC:DD:EE:FF"), None);
        assert!(matches!(err, Err(DbError::Sqlite(_))));
    }

    #[test]
    fn update_and_delete_employee() {
        let mut db = Database::open_in_memory().unwrap();
        let mut dana = db
            .add_employee("Dana", &mac("aa-bb-cc-dd-ee-ff"), None)
            .unwrap();
        dana.name = "Dana Q".to_string();
        assert!(db.update_employee(&dana).unwrap());
        assert_eq!(
            db.employee_by_id(dana.id).unwrap().unwrap().name,
            "Dana Q"
        );

        assert!(db.delete_employee(dana.id).unwrap());
        assert!(!db.delete_employee(dana.id).unwrap());
        assert!(db.employee_by_id(dana.id).unwrap().is_none());
    }

    #[test]
    fn events_for_day_are_ordered_and_scoped() {
        let mut db = Database::open_in_memory().unwrap();
        let dana = db
            .add_employee("Dana", &mac("aa-bb-cc-dd-ee-ff"), None)
            .unwrap();

        // Inserted out of order; a different day and employee are excluded.
        db.log_event(Some(dana.id), &dana.mac, EventKind::BreakStart, at(12, 0))
            .unwrap();
        db.log_event(Some(dana.id), &dana.mac, EventKind::TimeIn, at(9, 0))
            .unwrap();
        db.log_event(
            Some(dana.id),
            &dana.mac,
            EventKind::TimeIn,
            date().succ_opt().unwrap().and_hms_opt(9, 0, 0).unwrap(),
        )
        .unwrap();
        db.log_event(None, &mac("11-22-33-44-55-66"), EventKind::TimeIn, at(9, 30))
            .unwrap();

        let events = db.events_for_day(dana.id, date()).unwrap();
        let kinds: Vec<EventKind> = events.iter().map(|e| e.kind).collect();
        assert_eq!(kinds, [EventKind::TimeIn, EventKind::BreakStart]);
        assert_eq!(events[0].timestamp, at(9, 0));
        assert_eq!(events[0].mac, dana.mac);
    }

    #[test]
    fn upsert_summary_applies_only_populated_fields() {
        let mut db = Database::open_in_memory().unwrap();
        let dana = db
            .add_employee("Dana", &mac("aa-bb-cc-dd-ee-ff"), None)
            .unwrap();

        // An empty patch seeds an Absent row.
        db.upsert_summary(dana.id, date(), &SummaryPatch::default())
            .unwrap();
        let summary = db.summary(dana.id, date()).unwrap().unwrap();
        assert_eq!(summary.status, DayStatus::Absent);
        assert_eq!(summary.work_secs, 0);
        assert!(summary.time_in.is_none());

        db.upsert_summary(
            dana.id,
            date(),
            &SummaryPatch {
                time_in: Some(at(9, 0).time()),
                status: Some(DayStatus::Present),
                ..SummaryPatch::default()
            },
        )
        .unwrap();

        // A later partial patch leaves time_in untouched.
        db.upsert_summary(
            dana.id,
            date(),
            &SummaryPatch {
                break_secs: Some(1800),
                status: Some(DayStatus::OnBreak),
                ..SummaryPatch::default()
            },
        )
        .unwrap();

        let summary = db.summary(dana.id, date()).unwrap().unwrap();
        assert_eq!(summary.time_in, Some(at(9, 0).time()));
        assert_eq!(summary.break_secs, 1800);
        assert_eq!(summary.status, DayStatus::OnBreak);
        assert_eq!(db.summaries_for_date(date()).unwrap().len(), 1);
    }

    #[test]
    fn recent_events_join_names_and_respect_limit() {
        let mut db = Database::open_in_memory().unwrap();
        let dana = db
            .add_employee("Dana", &mac("aa-bb-cc-dd-ee-ff"), None)
            .unwrap();
        db.log_event(Some(dana.id), &dana.mac, EventKind::TimeIn, at(9, 0))
            .unwrap();
        db.log_event(Some(dana.id), &dana.mac, EventKind::BreakStart, at(12, 0))
            .unwrap();
        db.log_event(None, &mac("11-22-33-44-55-66"), EventKind::TimeIn, at(10, 0))
            .unwrap();

        let rows = db.recent_events(Some(date()), 2).unwrap();
        assert_eq!(rows.len(), 2);
        // Newest first.
        assert_eq!(rows[0].event.kind, EventKind::BreakStart);
        assert_eq!(rows[0].employee_name.as_deref(), Some("Dana"));
        assert_eq!(rows[1].employee_name, None);

        let other_day = db
            .recent_events(Some(date().succ_opt().unwrap()), 10)
            .unwrap();
        assert!(other_day.is_empty());
    }

    #[test]
    fn summaries_for_date_join_employee_identity() {
        let mut db = Database::open_in_memory().unwrap();
        let dana = db
            .add_employee("Dana", &mac("aa-bb-cc-dd-ee-ff"), None)
            .unwrap();
        db.upsert_summary(
            dana.id,
            date(),
            &SummaryPatch {
                time_in: Some(at(9, 0).time()),
                status: Some(DayStatus::Present),
                ..SummaryPatch::default()
            },
        )
        .unwrap();

        let rows = db.summaries_for_date(date()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].employee_name, "Dana");
        assert_eq!(rows[0].mac, dana.mac);
        assert_eq!(rows[0].summary.time_in, Some(at(9, 0).time()));
    }

    #[test]
    fn prune_removes_only_rows_before_cutoff() {
        let mut db = Database::open_in_memory().unwrap();
        let dana = db
            .add_employee("Dana", &mac("aa-bb-cc-dd-ee-ff"), None)
            .unwrap();
        let old_day = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        db.log_event(
            Some(dana.id),
            &dana.mac,
            EventKind::TimeIn,
            old_day.and_hms_opt(9, 0, 0).unwrap(),
        )
        .unwrap();
        db.log_event(Some(dana.id), &dana.mac, EventKind::TimeIn, at(9, 0))
            .unwrap();
        db.upsert_summary(dana.id, old_day, &SummaryPatch::default())
            .unwrap();
        db.upsert_summary(dana.id, date(), &SummaryPatch::default())
            .unwrap();

        let stats = db.prune_before(date()).unwrap();
        assert_eq!(stats, PruneStats { events: 1, summaries: 1 });
        assert_eq!(db.events_for_day(dana.id, date()).unwrap().len(), 1);
        assert!(db.summary(dana.id, date()).unwrap().is_some());
        assert!(db.summary(dana.id, old_day).unwrap().is_none());
    }

    #[test]
    fn deleting_employee_keeps_events_unlinked() {
        let mut db = Database::open_in_memory().unwrap();
        let dana = db
            .add_employee("Dana", &mac("aa-bb-cc-dd-ee-ff"), None)
            .unwrap();
        db.log_event(Some(dana.id), &dana.mac, EventKind::TimeIn, at(9, 0))
            .unwrap();
        db.upsert_summary(dana.id, date(), &SummaryPatch::default())
            .unwrap();
        db.delete_employee(dana.id).unwrap();

        let rows = db.recent_events(Some(date()), 10).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].event.employee_id, None);
        assert!(db.summaries_for_date(date()).unwrap().is_empty());
    }
}
