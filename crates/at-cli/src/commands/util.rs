//! Shared formatting helpers for command output.

use chrono::NaiveTime;

/// Formats a second count as `HH:MM:SS`. Negative counts clamp to zero.
#[must_use]
pub fn format_hms(secs: i64) -> String {
    let secs = secs.max(0);
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

/// Formats an optional time of day, using `-` for absent values.
#[must_use]
pub fn format_opt_time(time: Option<NaiveTime>) -> String {
    time.map_or_else(|| "-".to_string(), |t| t.format("%H:%M:%S").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_second_counts() {
        assert_eq!(format_hms(0), "00:00:00");
        assert_eq!(format_hms(27_000), "07:30:00");
        assert_eq!(format_hms(1800), "00:30:00");
        assert_eq!(format_hms(-5), "00:00:00");
    }

    #[test]
    fn formats_optional_times() {
        assert_eq!(format_opt_time(None), "-");
        let nine = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        assert_eq!(format_opt_time(Some(nine)), "09:00:00");
    }
}
