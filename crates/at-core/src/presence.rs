//! Per-employee presence state and the tick transition rules.
//!
//! The transition decision is a pure function of the previous state and the
//! current snapshot's visibility; the [`Tracker`](crate::tracker::Tracker)
//! applies it with log-then-apply ordering and handles the forced cutoff.

use chrono::NaiveDateTime;

use crate::event::EventKind;
use crate::summary::DayStatus;

/// In-memory presence state for one employee, reset on date rollover.
///
/// Transient: exists only to avoid replaying the full event log on every
/// tick. Reconstructible from the daily summary at startup, with documented
/// accuracy loss (a break in progress does not survive a restart).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PresenceState {
    pub present: bool,
    pub last_seen: Option<NaiveDateTime>,
    pub time_in: Option<NaiveDateTime>,
    pub on_break: bool,
    pub break_start: Option<NaiveDateTime>,
    /// Terminal sub-state reached only via the forced cutoff. While set, no
    /// automatic transition fires for the remainder of the day.
    pub timed_out: bool,
}

impl PresenceState {
    /// The non-cutoff transition (if any) for this tick.
    ///
    /// Rules in priority order, first match wins; at most one non-cutoff
    /// event per employee per tick. Disappearance while present is always a
    /// break; explicit time-outs are only produced by the forced cutoff.
    #[must_use]
    pub fn transition(&self, visible: bool) -> Option<EventKind> {
        if self.timed_out {
            return None;
        }
        if visible && !self.present && !self.on_break {
            Some(EventKind::TimeIn)
        } else if self.present && !visible && !self.on_break {
            Some(EventKind::BreakStart)
        } else if !self.present && visible && self.on_break {
            Some(EventKind::BreakEnd)
        } else {
            None
        }
    }

    /// Advances the state for a fired event. Called only after the event has
    /// been durably logged.
    pub fn apply(&mut self, kind: EventKind, at: NaiveDateTime) {
        match kind {
            EventKind::TimeIn => {
                self.present = true;
                self.last_seen = Some(at);
                if self.time_in.is_none() {
                    self.time_in = Some(at);
                }
                self.on_break = false;
                self.break_start = None;
            }
            EventKind::BreakStart => {
                self.present = false;
                self.last_seen = Some(at);
                self.on_break = true;
                self.break_start = Some(at);
            }
            EventKind::BreakEnd => {
                self.present = true;
                self.last_seen = Some(at);
                self.on_break = false;
                self.break_start = None;
            }
            EventKind::TimeOut => {
                self.present = false;
                self.last_seen = Some(at);
                self.on_break = false;
                self.break_start = None;
            }
            EventKind::ForcedTimeout => {
                self.present = false;
                self.last_seen = Some(at);
                self.on_break = false;
                self.break_start = None;
                self.timed_out = true;
            }
        }
    }

    /// Post-transition status as shown on the dashboard and written to the
    /// daily summary.
    #[must_use]
    pub const fn display_status(&self) -> DayStatus {
        if self.timed_out {
            DayStatus::TimedOut
        } else if self.present {
            DayStatus::Present
        } else if self.on_break {
            DayStatus::OnBreak
        } else {
            DayStatus::Absent
        }
    }
}
