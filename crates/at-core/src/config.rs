//! Tick configuration with load-time sanitization.

use std::time::Duration;

use chrono::NaiveTime;

/// Settings driving the scan-and-reconcile loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickConfig {
    /// Interval between scans.
    pub scan_interval: Duration,
    /// Wall-clock time after which any still-present employee is forcibly
    /// timed out for the day.
    pub cutoff: NaiveTime,
}

impl TickConfig {
    pub const DEFAULT_SCAN_INTERVAL_SECS: u64 = 60;
    pub const DEFAULT_CUTOFF_HOUR: u32 = 17;
    pub const DEFAULT_CUTOFF_MINUTE: u32 = 0;

    /// Builds a config from raw settings, substituting the default for any
    /// out-of-range value. Malformed settings are rejected here, at load
    /// time, and never reach the tick loop.
    #[must_use]
    pub fn sanitized(scan_interval_secs: i64, cutoff_hour: u32, cutoff_minute: u32) -> Self {
        let interval = match u64::try_from(scan_interval_secs) {
            Ok(secs) if secs > 0 => secs,
            _ => {
                tracing::warn!(
                    scan_interval_secs,
                    "invalid scan interval, using default of {}s",
                    Self::DEFAULT_SCAN_INTERVAL_SECS
                );
                Self::DEFAULT_SCAN_INTERVAL_SECS
            }
        };
        let cutoff = NaiveTime::from_hms_opt(cutoff_hour, cutoff_minute, 0).unwrap_or_else(|| {
            tracing::warn!(cutoff_hour, cutoff_minute, "invalid cutoff time, using default");
            default_cutoff()
        });
        Self {
            scan_interval: Duration::from_secs(interval),
            cutoff,
        }
    }
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            scan_interval: Duration::from_secs(Self::DEFAULT_SCAN_INTERVAL_SECS),
            cutoff: default_cutoff(),
        }
    }
}

fn default_cutoff() -> NaiveTime {
    NaiveTime::from_hms_opt(TickConfig::DEFAULT_CUTOFF_HOUR, TickConfig::DEFAULT_CUTOFF_MINUTE, 0)
        .expect("default cutoff is a valid time")
}
