//! Duration accounting: replays one employee/day's event log into totals.

use chrono::NaiveDateTime;

use crate::event::{AttendanceEvent, EventKind};

/// Cumulative totals derived from one employee's events for one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DayTotals {
    /// First `time_in` of the day.
    pub first_in: Option<NaiveDateTime>,
    /// Last `time_out` or `forced_timeout` of the day.
    pub last_out: Option<NaiveDateTime>,
    pub break_secs: i64,
    pub work_secs: i64,
}

/// Replays `events` (one employee, one calendar date, non-decreasing
/// timestamp order) into cumulative work/break seconds.
///
/// When the day is still open (a first time-in exists, no time-out yet, not
/// on break) the interval from the last event up to `now` counts as work in
/// progress, so the result depends on the observation time until the day is
/// closed. Callers must treat mid-day results as provisional and recompute
/// before finalizing a day's record.
///
/// Durations are whole seconds, truncating, and never negative.
#[must_use]
pub fn replay(events: &[AttendanceEvent], now: NaiveDateTime) -> DayTotals {
    let mut totals = DayTotals::default();
    let mut last_event: Option<NaiveDateTime> = None;
    let mut on_break = false;

    for event in events {
        let at = event.timestamp;
        match event.kind {
            EventKind::TimeIn => {
                if totals.first_in.is_none() {
                    totals.first_in = Some(at);
                }
                on_break = false;
            }
            EventKind::TimeOut | EventKind::ForcedTimeout => {
                if !on_break {
                    if let Some(last) = last_event {
                        totals.work_secs += elapsed_secs(last, at);
                    }
                }
                totals.last_out = Some(at);
                on_break = false;
            }
            EventKind::BreakStart => {
                if !on_break {
                    if let Some(last) = last_event {
                        totals.work_secs += elapsed_secs(last, at);
                    }
                }
                on_break = true;
            }
            EventKind::BreakEnd => {
                if on_break {
                    if let Some(last) = last_event {
                        totals.break_secs += elapsed_secs(last, at);
                    }
                }
                on_break = false;
            }
        }
        last_event = Some(at);
    }

    // Open-ended session: still accruing work time up to the observation.
    if totals.first_in.is_some() && totals.last_out.is_none() && !on_break {
        if let Some(last) = last_event {
            totals.work_secs += elapsed_secs(last, now);
        }
    }

    totals
}

fn elapsed_secs(from: NaiveDateTime, to: NaiveDateTime) -> i64 {
    (to - from).num_seconds().max(0)
}
