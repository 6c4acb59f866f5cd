//! Utilities for date formatting and filter date ranges

use chrono::{Datelike, Duration, NaiveDate, Utc};

/// Format ISO date string to DD.MM.YYYY format
/// Example: "2025-03-15" or "2025-03-15T14:02:26Z" -> "15.03.2025"
pub fn format_date(date_str: &str) -> String {
    let date_part = date_str.split('T').next().unwrap_or(date_str);
    if let Some((year, rest)) = date_part.split_once('-') {
        if let Some((month, day)) = rest.split_once('-') {
            return format!("{}.{}.{}", day, month, year);
        }
    }
    date_str.to_string()
}

/// First day of the month `date` belongs to
pub fn month_start_of(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// First and last day of the month `date` belongs to
pub fn month_range(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = month_start_of(date);
    let next_month_start = if start.month() == 12 {
        NaiveDate::from_ymd_opt(start.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(start.year(), start.month() + 1, 1)
    };
    let end = next_month_start
        .map(|d| d - Duration::days(1))
        .unwrap_or(start);
    (start, end)
}

/// Default filter range: first day of the current month through today,
/// both in yyyy-mm-dd form
pub fn current_month_range() -> (String, String) {
    let today = Utc::now().date_naive();
    (
        month_start_of(today).format("%Y-%m-%d").to_string(),
        today.format("%Y-%m-%d").to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2025-03-15"), "15.03.2025");
        assert_eq!(format_date("2025-03-15T14:02:26.123Z"), "15.03.2025");
        assert_eq!(format_date("invalid"), "invalid");
    }

    #[test]
    fn test_month_start() {
        let d = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
        assert_eq!(month_start_of(d), NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());

        let first = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert_eq!(month_start_of(first), first);
    }

    #[test]
    fn test_month_range_regular_month() {
        let d = NaiveDate::from_ymd_opt(2025, 4, 10).unwrap();
        let (start, end) = month_range(d);
        assert_eq!(start, NaiveDate::from_ymd_opt(2025, 4, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2025, 4, 30).unwrap());
    }

    #[test]
    fn test_month_range_december() {
        let d = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        let (start, end) = month_range(d);
        assert_eq!(start, NaiveDate::from_ymd_opt(2025, 12, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());
    }
}
