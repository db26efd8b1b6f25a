//! Attendance events: the append-only facts everything else is derived from.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::mac::MacAddr;

/// The kind of attendance event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    TimeIn,
    /// An explicit end-of-presence event. Never emitted automatically by the
    /// state machine (disappearance is treated as a break); kept for manual
    /// corrections and historical logs.
    TimeOut,
    BreakStart,
    BreakEnd,
    /// End-of-day cutoff applied to an employee still marked present.
    ForcedTimeout,
}

/// The input was not a recognized event kind.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown event kind: {0:?}")]
pub struct UnknownEventKind(pub String);

impl EventKind {
    /// String representation for storage.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TimeIn => "time_in",
            Self::TimeOut => "time_out",
            Self::BreakStart => "break_start",
            Self::BreakEnd => "break_end",
            Self::ForcedTimeout => "forced_timeout",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EventKind {
    type Err = UnknownEventKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "time_in" => Ok(Self::TimeIn),
            "time_out" => Ok(Self::TimeOut),
            "break_start" => Ok(Self::BreakStart),
            "break_end" => Ok(Self::BreakEnd),
            "forced_timeout" => Ok(Self::ForcedTimeout),
            _ => Err(UnknownEventKind(s.to_string())),
        }
    }
}

/// A logged attendance event.
///
/// Immutable once written; removed only by retention pruning. `employee_id`
/// is `None` when the MAC did not resolve to an employee at log time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceEvent {
    pub id: String,
    pub employee_id: Option<i64>,
    pub mac: MacAddr,
    pub kind: EventKind,
    /// Local wall-clock time of the observation.
    pub timestamp: NaiveDateTime,
}

impl AttendanceEvent {
    /// Calendar date the event belongs to.
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_roundtrip() {
        for kind in [
            EventKind::TimeIn,
            EventKind::TimeOut,
            EventKind::BreakStart,
            EventKind::BreakEnd,
            EventKind::ForcedTimeout,
        ] {
            let parsed: EventKind = kind.as_str().parse().unwrap();
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn kind_serde_matches_as_str() {
        for kind in [EventKind::TimeIn, EventKind::ForcedTimeout] {
            let value = serde_json::to_value(kind).unwrap();
            assert_eq!(value.as_str().unwrap(), kind.as_str());
        }
    }

    #[test]
    fn kind_rejects_unknown() {
        assert!("timeout_5pm".parse::<EventKind>().is_err());
    }

    #[test]
    fn event_date_derives_from_timestamp() {
        let event = AttendanceEvent {
            id: "evt-1".to_string(),
            employee_id: Some(1),
            mac: MacAddr::parse("f8-98-b9-7f-fe-0d").unwrap(),
            kind: EventKind::TimeIn,
            timestamp: NaiveDate::from_ymd_opt(2025, 3, 14)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
        };
        assert_eq!(event.date(), NaiveDate::from_ymd_opt(2025, 3, 14).unwrap());
    }
}
