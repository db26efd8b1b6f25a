//! The storage seam consumed by the tick engine.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::event::{AttendanceEvent, EventKind};
use crate::mac::MacAddr;
use crate::summary::{DailySummary, SummaryPatch};

/// An employee identity record.
///
/// The MAC address is the natural key correlated against network snapshots;
/// `id` is the stable foreign key used everywhere else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub mac: MacAddr,
    pub picture: Option<String>,
}

/// Persistence operations the [`Tracker`](crate::tracker::Tracker) needs.
///
/// The event log is append-only: `log_event` must durably insert before
/// returning, since the tracker advances in-memory state only after the
/// write succeeds. Implementations report failures through their own error
/// type, which the tracker surfaces unchanged to the tick caller.
pub trait AttendanceStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// All known employees.
    fn employees(&self) -> Result<Vec<Employee>, Self::Error>;

    /// Looks up an employee by normalized MAC address.
    fn employee_by_mac(&self, mac: &MacAddr) -> Result<Option<Employee>, Self::Error>;

    /// Appends an event to the log and returns the stored record.
    fn log_event(
        &mut self,
        employee_id: Option<i64>,
        mac: &MacAddr,
        kind: EventKind,
        timestamp: NaiveDateTime,
    ) -> Result<AttendanceEvent, Self::Error>;

    /// The summary row for (employee, date), if one exists.
    fn summary(&self, employee_id: i64, date: NaiveDate)
    -> Result<Option<DailySummary>, Self::Error>;

    /// Creates or partially updates the summary row for (employee, date).
    /// Only the populated patch fields change; at most one row exists per
    /// (employee, date).
    fn upsert_summary(
        &mut self,
        employee_id: i64,
        date: NaiveDate,
        patch: &SummaryPatch,
    ) -> Result<(), Self::Error>;

    /// The employee's events for one date, in non-decreasing timestamp order.
    fn events_for_day(
        &self,
        employee_id: i64,
        date: NaiveDate,
    ) -> Result<Vec<AttendanceEvent>, Self::Error>;
}
