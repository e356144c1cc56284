//! Calendar helpers: sampling today's date, the default due date, parsing
//! human-friendly due input and formatting dates for display.

use chrono::{Datelike, Duration, Local, NaiveDate};

/// Days from creation until a task without an explicit due date is due.
pub const DEFAULT_DUE_DAYS: i64 = 7;

/// Today's local calendar date. Sampled on every call, never cached.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Due date assigned to a task added on `today` without one.
pub fn default_due_date(today: NaiveDate) -> NaiveDate {
    today + Duration::days(DEFAULT_DUE_DAYS)
}

/// Parse human-readable due date input relative to `today`.
///
/// Supports:
/// - "today", "tomorrow", "yesterday"
/// - "next monday", "this friday", bare weekday names and their short forms
/// - "this weekend", "end of week", "end of month"
/// - "in 3d", "in 2w", "in 1m"
/// - "YYYY-MM-DD" format
pub fn parse_due_input(s: &str, today: NaiveDate) -> Option<NaiveDate> {
    let s = s.trim().to_lowercase();

    match s.as_str() {
        "today" => return Some(today),
        "tomorrow" => return Some(today + Duration::days(1)),
        "yesterday" => return Some(today - Duration::days(1)),
        "end of week" | "eow" => {
            let (_, end) = start_end_of_week(today);
            return Some(end);
        }
        "end of month" | "eom" => {
            let (year, month) = if today.month() == 12 {
                (today.year() + 1, 1)
            } else {
                (today.year(), today.month() + 1)
            };
            let first_of_next = NaiveDate::from_ymd_opt(year, month, 1)?;
            return Some(first_of_next - Duration::days(1));
        }
        "this weekend" | "weekend" => {
            let days_until_saturday = (5 + 7 - today.weekday().num_days_from_monday()) % 7;
            return Some(today + Duration::days(i64::from(days_until_saturday)));
        }
        _ => {}
    }

    if let Some(rest) = s.strip_prefix("in ") {
        return parse_offset(rest.trim()).map(|d| today + d);
    }

    if let Some(day) = s.strip_prefix("next ").and_then(weekday_index) {
        let ahead = days_ahead(today, day);
        return Some(today + Duration::days(if ahead == 0 { 7 } else { ahead + 7 }));
    }

    if let Some(day) = s.strip_prefix("this ").and_then(weekday_index).or_else(|| weekday_index(&s)) {
        return Some(today + Duration::days(days_ahead(today, day)));
    }

    NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()
}

/// "3d", "2w", "1m" (30 days per month).
fn parse_offset(s: &str) -> Option<Duration> {
    let unit = s.chars().last()?;
    let n: i64 = s[..s.len() - unit.len_utf8()].trim().parse().ok()?;
    match unit {
        'd' => Some(Duration::days(n)),
        'w' => Some(Duration::weeks(n)),
        'm' => Some(Duration::days(n * 30)),
        _ => None,
    }
}

/// Monday-based index for a full or three-letter weekday name.
fn weekday_index(name: &str) -> Option<u32> {
    const NAMES: [&str; 7] = ["monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday"];
    NAMES
        .iter()
        .position(|full| *full == name || (name.len() == 3 && full.starts_with(name)))
        .map(|i| i as u32)
}

fn days_ahead(today: NaiveDate, target: u32) -> i64 {
    i64::from((target + 7 - today.weekday().num_days_from_monday()) % 7)
}

/// Calculate the start and end dates of the ISO week (Monday to Sunday) containing `today`.
pub fn start_end_of_week(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let weekday = i64::from(today.weekday().num_days_from_monday());
    let start = today - Duration::days(weekday);
    (start, start + Duration::days(6))
}

/// Short display form of a due date: "Oct 21", or "No due date".
pub fn format_due(due: Option<NaiveDate>) -> String {
    match due {
        Some(d) => d.format("%b %-d").to_string(),
        None => "No due date".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // A Wednesday.
    fn wed() -> NaiveDate {
        ymd(2024, 3, 13)
    }

    #[test]
    fn default_due_is_one_week_out() {
        assert_eq!(default_due_date(ymd(2024, 12, 28)), ymd(2025, 1, 4));
    }

    #[test]
    fn parses_relative_words() {
        assert_eq!(parse_due_input("today", wed()), Some(wed()));
        assert_eq!(parse_due_input(" Tomorrow ", wed()), Some(ymd(2024, 3, 14)));
        assert_eq!(parse_due_input("yesterday", wed()), Some(ymd(2024, 3, 12)));
        assert_eq!(parse_due_input("eow", wed()), Some(ymd(2024, 3, 17)));
        assert_eq!(parse_due_input("end of month", wed()), Some(ymd(2024, 3, 31)));
        assert_eq!(parse_due_input("end of month", ymd(2024, 12, 5)), Some(ymd(2024, 12, 31)));
        assert_eq!(parse_due_input("weekend", wed()), Some(ymd(2024, 3, 16)));
    }

    #[test]
    fn parses_offsets() {
        assert_eq!(parse_due_input("in 3d", wed()), Some(ymd(2024, 3, 16)));
        assert_eq!(parse_due_input("in 2w", wed()), Some(ymd(2024, 3, 27)));
        assert_eq!(parse_due_input("in 1m", wed()), Some(ymd(2024, 4, 12)));
        assert_eq!(parse_due_input("in xd", wed()), None);
        assert_eq!(parse_due_input("in ", wed()), None);
    }

    #[test]
    fn parses_weekdays() {
        assert_eq!(parse_due_input("friday", wed()), Some(ymd(2024, 3, 15)));
        assert_eq!(parse_due_input("fri", wed()), Some(ymd(2024, 3, 15)));
        assert_eq!(parse_due_input("this wed", wed()), Some(wed()));
        assert_eq!(parse_due_input("next wednesday", wed()), Some(ymd(2024, 3, 20)));
        assert_eq!(parse_due_input("next monday", wed()), Some(ymd(2024, 3, 25)));
    }

    #[test]
    fn parses_iso_and_rejects_noise() {
        assert_eq!(parse_due_input("2024-06-01", wed()), Some(ymd(2024, 6, 1)));
        assert_eq!(parse_due_input("someday", wed()), None);
        assert_eq!(parse_due_input("", wed()), None);
    }

    #[test]
    fn formats_due_dates() {
        assert_eq!(format_due(Some(ymd(2024, 10, 21))), "Oct 21");
        assert_eq!(format_due(Some(ymd(2024, 3, 5))), "Mar 5");
        assert_eq!(format_due(None), "No due date");
    }
}
