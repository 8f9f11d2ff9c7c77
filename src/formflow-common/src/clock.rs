//! Time-of-day parsing and date/time merging.

use chrono::{NaiveDate, NaiveDateTime, Timelike};

/// Parse an `HH:MM` string.
///
/// Missing or malformed components default to zero and out-of-range
/// components are clamped into range, so a partial entry like `"14"`
/// or `"14:"` applies 14:00 instead of failing.
pub fn parse_hhmm(raw: &str) -> (u32, u32) {
    let mut parts = raw.splitn(2, ':');
    let hours = parts
        .next()
        .and_then(|p| p.trim().parse::<u32>().ok())
        .unwrap_or(0)
        .min(23);
    let minutes = parts
        .next()
        .and_then(|p| p.trim().parse::<u32>().ok())
        .unwrap_or(0)
        .min(59);
    (hours, minutes)
}

/// Apply a time of day to an existing value, leaving the date intact.
pub fn apply_time(value: NaiveDateTime, hours: u32, minutes: u32) -> NaiveDateTime {
    value
        .with_hour(hours)
        .and_then(|v| v.with_minute(minutes))
        .and_then(|v| v.with_second(0))
        .unwrap_or(value)
}

/// Combine a picked calendar date with the time of a previous value.
///
/// When there is no previous value the time components are zeroed.
pub fn with_time_of(date: NaiveDate, previous: Option<NaiveDateTime>) -> NaiveDateTime {
    let (hours, minutes) = previous
        .map(|p| (p.hour(), p.minute()))
        .unwrap_or((0, 0));
    date.and_hms_opt(hours, minutes, 0)
        .unwrap_or_else(|| date.and_hms_opt(0, 0, 0).expect("midnight is valid"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M").expect("valid datetime")
    }

    #[test]
    fn parse_hhmm_handles_partial_input() {
        assert_eq!(parse_hhmm("14:05"), (14, 5));
        assert_eq!(parse_hhmm("14:5"), (14, 5));
        assert_eq!(parse_hhmm("14"), (14, 0));
        assert_eq!(parse_hhmm("x"), (0, 0));
        assert_eq!(parse_hhmm(""), (0, 0));
        assert_eq!(parse_hhmm("99:99"), (23, 59));
    }

    #[test]
    fn apply_time_keeps_date() {
        let v = apply_time(dt("2024-02-02T00:00"), 14, 5);
        assert_eq!(v, dt("2024-02-02T14:05"));
    }

    #[test]
    fn picking_a_date_preserves_existing_time() {
        let previous = Some(dt("2024-01-01T10:30"));
        let date = NaiveDate::from_ymd_opt(2024, 2, 2).expect("valid date");
        assert_eq!(with_time_of(date, previous), dt("2024-02-02T10:30"));
        assert_eq!(with_time_of(date, None), dt("2024-02-02T00:00"));
    }

    #[test]
    fn date_then_time_never_reverts_the_date() {
        // 2024-01-01T10:30, pick 2024-02-02, then type 14:05.
        let start = dt("2024-01-01T10:30");
        let picked = with_time_of(
            NaiveDate::from_ymd_opt(2024, 2, 2).expect("valid date"),
            Some(start),
        );
        let (h, m) = parse_hhmm("14:05");
        assert_eq!(apply_time(picked, h, m), dt("2024-02-02T14:05"));
    }
}
