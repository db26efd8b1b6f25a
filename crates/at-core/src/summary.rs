//! Daily attendance summaries: the cached per-day aggregate.
//!
//! A summary row is a materialized view over one employee's event log for one
//! calendar date. It is refreshed on every state transition and is always
//! recomputable from the log; it is never the source of truth for durations.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Attendance status for one employee on one calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DayStatus {
    #[default]
    Absent,
    Present,
    #[serde(rename = "On Break")]
    OnBreak,
    /// Terminal for the day: reached only via the forced cutoff. No further
    /// automatic transitions occur until the date rolls over.
    #[serde(rename = "Timed Out")]
    TimedOut,
}

/// The input was not a recognized day status.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown day status: {0:?}")]
pub struct UnknownDayStatus(pub String);

impl DayStatus {
    /// Human-readable form, also used for storage.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Absent => "Absent",
            Self::Present => "Present",
            Self::OnBreak => "On Break",
            Self::TimedOut => "Timed Out",
        }
    }
}

impl std::fmt::Display for DayStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DayStatus {
    type Err = UnknownDayStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Absent" => Ok(Self::Absent),
            "Present" => Ok(Self::Present),
            "On Break" => Ok(Self::OnBreak),
            "Timed Out" => Ok(Self::TimedOut),
            _ => Err(UnknownDayStatus(s.to_string())),
        }
    }
}

/// One employee's cached attendance aggregate for one calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySummary {
    pub employee_id: i64,
    pub date: NaiveDate,
    /// First time-in of the day, if any.
    pub time_in: Option<NaiveTime>,
    /// Last time-out of the day; `None` while the day is still open.
    pub time_out: Option<NaiveTime>,
    pub break_secs: i64,
    pub work_secs: i64,
    pub status: DayStatus,
}

/// Partial update for a summary row: only the populated fields are written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryPatch {
    pub time_in: Option<NaiveTime>,
    pub time_out: Option<NaiveTime>,
    pub break_secs: Option<i64>,
    pub work_secs: Option<i64>,
    pub status: Option<DayStatus>,
}

impl SummaryPatch {
    /// A patch that only changes the status.
    #[must_use]
    pub fn status(status: DayStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_roundtrip() {
        for status in [
            DayStatus::Absent,
            DayStatus::Present,
            DayStatus::OnBreak,
            DayStatus::TimedOut,
        ] {
            let parsed: DayStatus = status.as_str().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn status_rejects_unknown() {
        assert!("Gone Fishing".parse::<DayStatus>().is_err());
    }

    #[test]
    fn patch_default_is_empty() {
        assert_eq!(SummaryPatch::default(), SummaryPatch { ..Default::default() });
        let patch = SummaryPatch::status(DayStatus::Present);
        assert_eq!(patch.status, Some(DayStatus::Present));
        assert!(patch.time_in.is_none() && patch.work_secs.is_none());
    }
}
