//! The tick engine: reconciles network snapshots against presence state.
//!
//! One [`Tracker`] owns the per-employee presence map and drives every state
//! transition. Each tick compares the snapshot's visibility against the
//! previous state, appends the resulting events to the log, and refreshes
//! the daily summary. Writes follow log-then-apply: an event is durably
//! inserted before the in-memory state advances, so a crash between the log
//! write and the summary refresh is recoverable by replaying the log.

use std::collections::{HashMap, HashSet};

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::config::TickConfig;
use crate::durations::replay;
use crate::event::{AttendanceEvent, EventKind};
use crate::mac::MacAddr;
use crate::presence::PresenceState;
use crate::store::{AttendanceStore, Employee};
use crate::summary::{DayStatus, SummaryPatch};

/// Snapshot of one employee's presence for the dashboard layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployeeStatus {
    pub id: i64,
    pub name: String,
    pub mac: MacAddr,
    pub present: bool,
    pub on_break: bool,
    pub last_seen: Option<NaiveDateTime>,
    pub time_in: Option<NaiveDateTime>,
    pub status: DayStatus,
}

/// Presence state machine plus time accounting over an [`AttendanceStore`].
///
/// Single-writer: callers must not interleave `run_tick` with other
/// mutations of the same store.
pub struct Tracker<S> {
    store: S,
    config: TickConfig,
    /// Calendar date the presence map belongs to; states reset on rollover.
    day: NaiveDate,
    states: HashMap<MacAddr, PresenceState>,
}

impl<S: AttendanceStore> Tracker<S> {
    /// Creates a tracker and recovers presence state from today's summaries.
    ///
    /// Recovery trusts the cached summary instead of replaying per-employee
    /// event logs: a `Present` summary restores an open session (with
    /// `last_seen` optimistically set to now), a `Timed Out` summary keeps
    /// the terminal cutoff state, and anything else starts fully absent. A
    /// break in progress at crash time is indistinguishable from absence
    /// and is not restored; this accuracy loss is accepted to keep startup
    /// cheap.
    pub fn new(store: S, config: TickConfig, now: NaiveDateTime) -> Result<Self, S::Error> {
        let mut tracker = Self {
            store,
            config,
            day: now.date(),
            states: HashMap::new(),
        };
        tracker.recover(now)?;
        Ok(tracker)
    }

    fn recover(&mut self, now: NaiveDateTime) -> Result<(), S::Error> {
        let today = now.date();
        for employee in self.store.employees()? {
            let state = match self.store.summary(employee.id, today)? {
                Some(summary) if summary.status == DayStatus::Present => PresenceState {
                    present: true,
                    last_seen: Some(now),
                    time_in: summary.time_in.map(|t| today.and_time(t)),
                    ..PresenceState::default()
                },
                Some(summary) if summary.status == DayStatus::TimedOut => PresenceState {
                    timed_out: true,
                    ..PresenceState::default()
                },
                _ => PresenceState::default(),
            };
            self.states.insert(employee.mac, state);
        }
        Ok(())
    }

    /// Runs one tick against the wall clock.
    pub fn run_tick(&mut self, visible: &HashSet<MacAddr>) -> Result<Vec<AttendanceEvent>, S::Error> {
        self.run_tick_at(visible, chrono::Local::now().naive_local())
    }

    /// Runs one tick at an explicit observation time.
    ///
    /// `visible` is the set of MACs currently reachable; MACs that do not
    /// belong to any employee are ignored. Returns the events fired this
    /// tick. On a persistence failure the failing employee's state does not
    /// advance and the error surfaces to the caller; recovery is the next
    /// tick's comparison against the stale state.
    pub fn run_tick_at(
        &mut self,
        visible: &HashSet<MacAddr>,
        now: NaiveDateTime,
    ) -> Result<Vec<AttendanceEvent>, S::Error> {
        let today = now.date();
        if today != self.day {
            tracing::debug!(%today, "date rolled over, resetting presence states");
            self.states.clear();
            self.day = today;
        }

        let mut fired = Vec::new();
        for employee in self.store.employees()? {
            let mut state = self
                .states
                .get(&employee.mac)
                .cloned()
                .unwrap_or_default();
            let visible_now = visible.contains(&employee.mac);
            let events = self.step_employee(&employee, &mut state, visible_now, now)?;
            for event in &events {
                tracing::info!(
                    employee = %employee.name,
                    mac = %employee.mac,
                    kind = %event.kind,
                    timestamp = %event.timestamp,
                    "attendance event"
                );
            }
            self.states.insert(employee.mac, state);
            fired.extend(events);
        }
        Ok(fired)
    }

    /// Applies the transition rules for one employee on one tick.
    ///
    /// At most one non-cutoff event fires, plus at most one forced cutoff.
    /// The cutoff is decided on the pre-tick state; when it fires it
    /// supersedes the ordinary transition for that tick (an employee who
    /// disappears after the cutoff gets the timeout, not a break).
    fn step_employee(
        &mut self,
        employee: &Employee,
        state: &mut PresenceState,
        visible: bool,
        now: NaiveDateTime,
    ) -> Result<Vec<AttendanceEvent>, S::Error> {
        if state.timed_out {
            // Only reached when the timeout tick fully persisted: a failed
            // write discards the tick's state, so the stale summary triggers
            // the cutoff again next tick and replay absorbs the duplicate
            // logged event.
            return Ok(Vec::new());
        }

        let today = now.date();
        let cutoff_at = today.and_time(self.config.cutoff);
        // Inclusive comparison: a tick landing exactly on the cutoff fires.
        if now >= cutoff_at
            && state.time_in.is_some()
            && !state.on_break
            && !self.summary_timed_out(employee.id, today)?
        {
            // An arrival logged after the cutoff is closed out at its own
            // time-in, so the log stays monotone within the day.
            let fired_at = match state.time_in {
                Some(time_in) if time_in > cutoff_at => time_in,
                _ => cutoff_at,
            };
            let event = self.store.log_event(
                Some(employee.id),
                &employee.mac,
                EventKind::ForcedTimeout,
                fired_at,
            )?;
            state.apply(EventKind::ForcedTimeout, fired_at);
            let totals = replay(&self.store.events_for_day(employee.id, today)?, now);
            self.store.upsert_summary(
                employee.id,
                today,
                &SummaryPatch {
                    time_out: Some(fired_at.time()),
                    work_secs: Some(totals.work_secs),
                    status: Some(DayStatus::TimedOut),
                    ..SummaryPatch::default()
                },
            )?;
            return Ok(vec![event]);
        }

        let mut fired = Vec::new();
        if let Some(kind) = state.transition(visible) {
            let event = self
                .store
                .log_event(Some(employee.id), &employee.mac, kind, now)?;
            let patch = self.summary_patch(employee.id, kind, now)?;
            state.apply(kind, now);
            self.store.upsert_summary(employee.id, today, &patch)?;
            fired.push(event);
        }
        if visible {
            state.last_seen = Some(now);
        }
        Ok(fired)
    }

    /// The summary fields a fired event changes. Status values reflect the
    /// post-transition state.
    fn summary_patch(
        &self,
        employee_id: i64,
        kind: EventKind,
        now: NaiveDateTime,
    ) -> Result<SummaryPatch, S::Error> {
        let today = now.date();
        let patch = match kind {
            EventKind::TimeIn => {
                let has_time_in = self
                    .store
                    .summary(employee_id, today)?
                    .and_then(|s| s.time_in)
                    .is_some();
                SummaryPatch {
                    time_in: (!has_time_in).then(|| now.time()),
                    status: Some(DayStatus::Present),
                    ..SummaryPatch::default()
                }
            }
            EventKind::BreakStart => SummaryPatch::status(DayStatus::OnBreak),
            EventKind::BreakEnd => {
                let totals = replay(&self.store.events_for_day(employee_id, today)?, now);
                SummaryPatch {
                    break_secs: Some(totals.break_secs),
                    status: Some(DayStatus::Present),
                    ..SummaryPatch::default()
                }
            }
            EventKind::TimeOut | EventKind::ForcedTimeout => {
                let totals = replay(&self.store.events_for_day(employee_id, today)?, now);
                SummaryPatch {
                    time_out: Some(now.time()),
                    work_secs: Some(totals.work_secs),
                    status: Some(if kind == EventKind::ForcedTimeout {
                        DayStatus::TimedOut
                    } else {
                        DayStatus::Absent
                    }),
                    ..SummaryPatch::default()
                }
            }
        };
        Ok(patch)
    }

    fn summary_timed_out(&self, employee_id: i64, date: NaiveDate) -> Result<bool, S::Error> {
        Ok(self
            .store
            .summary(employee_id, date)?
            .is_some_and(|s| s.status == DayStatus::TimedOut))
    }

    /// Current presence of every known employee, for the dashboard layer.
    pub fn current_status(&self) -> Result<Vec<EmployeeStatus>, S::Error> {
        let mut statuses = Vec::new();
        for employee in self.store.employees()? {
            let state = self
                .states
                .get(&employee.mac)
                .cloned()
                .unwrap_or_default();
            statuses.push(EmployeeStatus {
                id: employee.id,
                name: employee.name,
                mac: employee.mac,
                present: state.present,
                on_break: state.on_break,
                last_seen: state.last_seen,
                time_in: state.time_in,
                status: state.display_status(),
            });
        }
        Ok(statuses)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    #[must_use]
    pub const fn config(&self) -> &TickConfig {
        &self.config
    }

    /// Consumes the tracker, returning the store.
    pub fn into_store(self) -> S {
        self.store
    }
}
