//! Rolling training weeks anchored on the first completed workout
//!
//! Week 0 starts at the anchor and every week is exactly seven days long,
//! independent of calendar weeks or local time zones.

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AnalyticsError;

const WEEK_MS: i64 = 7 * 24 * 60 * 60 * 1000;

/// Half-open window `[start, end)` of one rolling week
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollingWeekWindow {
    pub week_number: u32,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl RollingWeekWindow {
    pub fn start_iso(&self) -> String {
        to_iso(self.start)
    }

    pub fn end_iso(&self) -> String {
        to_iso(self.end)
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at < self.end
    }
}

/// Canonical timestamp format: millisecond precision, `Z` suffix
pub fn to_iso(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parses an RFC 3339 timestamp into UTC
pub fn parse_iso(field: &'static str, value: &str) -> Result<DateTime<Utc>, AnalyticsError> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|d| d.with_timezone(&Utc))
        .map_err(|_| AnalyticsError::InvalidTimestamp {
            field,
            value: value.to_string(),
        })
}

/// Window containing `current`, counted in whole weeks from `anchor`.
///
/// A `current` before the anchor clamps to week 0.
pub fn rolling_week_window_at(current: DateTime<Utc>, anchor: DateTime<Utc>) -> RollingWeekWindow {
    let elapsed_ms = (current - anchor).num_milliseconds().max(0);
    let week_number = elapsed_ms / WEEK_MS;
    let start = anchor + Duration::milliseconds(week_number * WEEK_MS);

    RollingWeekWindow {
        week_number: u32::try_from(week_number).unwrap_or(u32::MAX),
        start,
        end: start + Duration::milliseconds(WEEK_MS),
    }
}

/// String form of [`rolling_week_window_at`]; fails on unparseable timestamps
pub fn get_rolling_week_window(
    current_iso: &str,
    anchor_iso: &str,
) -> Result<RollingWeekWindow, AnalyticsError> {
    let current = parse_iso("current", current_iso)?;
    let anchor = parse_iso("anchor", anchor_iso)?;
    Ok(rolling_week_window_at(current, anchor))
}

/// Rejects empty or inverted `[start, end)` ranges
pub fn check_window(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<(), AnalyticsError> {
    if end <= start {
        return Err(AnalyticsError::NonPositiveWindow {
            start: to_iso(start),
            end: to_iso(end),
        });
    }
    Ok(())
}

/// Fractional weeks between `anchor` and `current`, clamped at zero
pub fn weeks_between(anchor: DateTime<Utc>, current: DateTime<Utc>) -> f64 {
    let elapsed_ms = (current - anchor).num_milliseconds().max(0);
    elapsed_ms as f64 / WEEK_MS as f64
}

/// Completed sessions against the weekly plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Adherence {
    pub completed: u32,
    pub planned: u32,
    /// `completed / planned`; may exceed 1.0 for bonus sessions
    pub ratio: f64,
}

/// Weekly adherence; a plan with zero sessions is a caller error
pub fn weekly_adherence(completed: u32, planned: u32) -> Result<Adherence, AnalyticsError> {
    if planned == 0 {
        return Err(AnalyticsError::NonPositivePlan { planned });
    }

    Ok(Adherence {
        completed,
        planned,
        ratio: f64::from(completed) / f64::from(planned),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const ANCHOR: &str = "2024-01-01T00:00:00.000Z";

    #[test]
    fn test_anchor_is_week_zero() {
        let window = get_rolling_week_window(ANCHOR, ANCHOR).unwrap();
        assert_eq!(window.week_number, 0);
        assert_eq!(window.start_iso(), ANCHOR);
        assert_eq!(window.end_iso(), "2024-01-08T00:00:00.000Z");
    }

    #[test]
    fn test_week_two() {
        let window = get_rolling_week_window("2024-01-15T00:00:01.000Z", ANCHOR).unwrap();
        assert_eq!(window.week_number, 2);
        assert_eq!(window.start_iso(), "2024-01-15T00:00:00.000Z");
        assert_eq!(window.end_iso(), "2024-01-22T00:00:00.000Z");
    }

    #[test]
    fn test_last_millisecond_of_week() {
        let window = get_rolling_week_window("2024-01-07T23:59:59.999Z", ANCHOR).unwrap();
        assert_eq!(window.week_number, 0);

        let window = get_rolling_week_window("2024-01-08T00:00:00.000Z", ANCHOR).unwrap();
        assert_eq!(window.week_number, 1);
    }

    #[test]
    fn test_before_anchor_clamps_to_week_zero() {
        let window = get_rolling_week_window("2023-12-01T12:00:00.000Z", ANCHOR).unwrap();
        assert_eq!(window.week_number, 0);
        assert_eq!(window.start_iso(), ANCHOR);
    }

    #[test]
    fn test_window_is_seven_days() {
        let window = get_rolling_week_window("2024-03-17T08:30:00+03:00", ANCHOR).unwrap();
        assert_eq!(window.end - window.start, Duration::days(7));
        assert!(window.contains(parse_iso("t", "2024-03-17T05:30:00Z").unwrap()));
        assert!(!window.contains(window.end));
    }

    #[test]
    fn test_offset_anchor_keeps_instant() {
        let window =
            get_rolling_week_window("2024-01-01T10:00:00Z", "2024-01-01T09:00:00+02:00").unwrap();
        assert_eq!(window.start_iso(), "2024-01-01T07:00:00.000Z");
    }

    #[test]
    fn test_invalid_timestamps() {
        let err = get_rolling_week_window("not a date", ANCHOR).unwrap_err();
        assert_eq!(
            err,
            AnalyticsError::InvalidTimestamp { field: "current", value: "not a date".to_string() }
        );
        assert!(get_rolling_week_window(ANCHOR, "").is_err());
    }

    #[test]
    fn test_idempotent() {
        let a = get_rolling_week_window("2024-02-11T13:14:15.161Z", ANCHOR).unwrap();
        let b = get_rolling_week_window("2024-02-11T13:14:15.161Z", ANCHOR).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_weeks_between() {
        let anchor = parse_iso("anchor", ANCHOR).unwrap();
        let later = anchor + Duration::days(21);
        assert!((weeks_between(anchor, later) - 3.0).abs() < 1e-9);
        assert_eq!(weeks_between(later, anchor), 0.0);
    }

    #[test]
    fn test_check_window() {
        let start = parse_iso("start", ANCHOR).unwrap();
        assert!(check_window(start, start + Duration::days(7)).is_ok());
        assert_eq!(
            check_window(start, start).unwrap_err(),
            AnalyticsError::NonPositiveWindow {
                start: ANCHOR.to_string(),
                end: ANCHOR.to_string(),
            }
        );
        assert!(check_window(start + Duration::days(1), start).is_err());
    }

    #[test]
    fn test_adherence() {
        let adherence = weekly_adherence(2, 4).unwrap();
        assert!((adherence.ratio - 0.5).abs() < 1e-9);

        let bonus = weekly_adherence(4, 3).unwrap();
        assert!(bonus.ratio > 1.0);
    }

    #[test]
    fn test_adherence_zero_plan_fails() {
        assert_eq!(
            weekly_adherence(3, 0).unwrap_err(),
            AnalyticsError::NonPositivePlan { planned: 0 }
        );
    }
}
