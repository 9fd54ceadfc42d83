// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting and calendar-day math.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// UTC calendar day of a timestamp, ignoring time of day.
pub fn calendar_day(date: DateTime<Utc>) -> NaiveDate {
    date.date_naive()
}

/// True when `later` falls on the calendar day right after `earlier`.
pub fn is_previous_day(earlier: NaiveDate, later: NaiveDate) -> bool {
    later.pred_opt() == Some(earlier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_uses_z_suffix() {
        let date = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        assert_eq!(format_utc_rfc3339(date), "2024-01-15T10:30:00Z");
    }

    #[test]
    fn test_calendar_day_ignores_time_of_day() {
        let morning = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 1).unwrap();
        let night = Utc.with_ymd_and_hms(2024, 1, 15, 23, 59, 59).unwrap();
        assert_eq!(calendar_day(morning), calendar_day(night));
    }

    #[test]
    fn test_is_previous_day_across_month_boundary() {
        let jan31 = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        let feb1 = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        assert!(is_previous_day(jan31, feb1));
        assert!(!is_previous_day(feb1, jan31));
        assert!(!is_previous_day(jan31, jan31));
    }
}
