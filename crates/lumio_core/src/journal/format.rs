//! Display strings for the home, journal and write screens.

use crate::model::date_key::{local_date_for_millis_in, parse_date_key};
use chrono::{DateTime, Datelike, Local, NaiveDate, TimeZone, Timelike, Utc};

/// Default snippet length on journal cards.
pub const PREVIEW_SNIPPET_MAX_CHARS: usize = 120;

const SHORT_DAY_NAMES: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
const LONG_DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];
const SHORT_MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Home greeting for a local hour (0..24).
pub fn greeting_for_hour(hour: u32) -> &'static str {
    match hour {
        5..=11 => "Good morning",
        12..=16 => "Good afternoon",
        _ => "Good evening",
    }
}

/// Home greeting for the current local hour.
pub fn greeting() -> &'static str {
    greeting_for_hour(Local::now().hour())
}

/// `"Mon, Jan 11"`.
pub fn format_short_date(date: NaiveDate) -> String {
    format!(
        "{}, {} {}",
        SHORT_DAY_NAMES[date.weekday().num_days_from_monday() as usize],
        SHORT_MONTH_NAMES[date.month0() as usize],
        date.day()
    )
}

/// Section header for a date key. Unparseable keys are shown verbatim.
pub fn format_day_header(date_key: &str) -> String {
    parse_date_key(date_key).map_or_else(|| date_key.to_string(), format_short_date)
}

/// Write screen header, `"Sunday · Jan 11"`.
pub fn format_journal_date(date: NaiveDate) -> String {
    format!(
        "{} \u{b7} {} {}",
        LONG_DAY_NAMES[date.weekday().num_days_from_monday() as usize],
        SHORT_MONTH_NAMES[date.month0() as usize],
        date.day()
    )
}

/// Optional mood line shown on the write screen; mid-day hours have none.
pub fn time_of_day_context(hour: u32) -> Option<&'static str> {
    match hour {
        5..=7 => Some("Early morning"),
        8..=16 => None,
        17..=20 => Some("Evening"),
        21..=23 => Some("Late evening"),
        _ => Some("Late night"),
    }
}

/// 12-hour clock time of an instant in the given zone, `"10:41 PM"`.
pub fn format_time_in<Tz: TimeZone>(tz: &Tz, epoch_ms: i64) -> String {
    let time = DateTime::<Utc>::from_timestamp_millis(epoch_ms)
        .unwrap_or_default()
        .with_timezone(tz);
    let (is_pm, hour12) = time.hour12();
    format!(
        "{hour12}:{:02} {}",
        time.minute(),
        if is_pm { "PM" } else { "AM" }
    )
}

/// 12-hour clock time in device-local time.
pub fn format_time(epoch_ms: i64) -> String {
    format_time_in(&Local, epoch_ms)
}

/// Local day of an instant, for headers built from timestamps.
pub fn local_date(epoch_ms: i64) -> NaiveDate {
    local_date_for_millis_in(&Local, epoch_ms)
}

/// Card preview of entry content.
///
/// Trimmed content that fits is returned whole. Longer content is cut at the
/// last `.` or newline within the first `max_chars` when that break lies past
/// 60% of the limit, otherwise hard-cut with `...` appended.
pub fn preview_snippet(content: &str, max_chars: usize) -> String {
    let trimmed = content.trim();
    if trimmed.chars().count() <= max_chars {
        return trimmed.to_string();
    }

    let head: String = trimmed.chars().take(max_chars).collect();
    let break_at = head
        .char_indices()
        .filter(|(_, ch)| *ch == '.' || *ch == '\n')
        .map(|(byte_index, _)| (byte_index, head[..byte_index].chars().count()))
        .last();

    match break_at {
        Some((byte_index, char_index)) if char_index * 10 > max_chars * 6 => {
            head[..=byte_index].to_string()
        }
        _ => format!("{head}..."),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        format_day_header, format_journal_date, format_time_in, greeting_for_hour,
        preview_snippet, time_of_day_context,
    };
    use chrono::{NaiveDate, Utc};

    #[test]
    fn greeting_covers_all_hours() {
        assert_eq!(greeting_for_hour(5), "Good morning");
        assert_eq!(greeting_for_hour(12), "Good afternoon");
        assert_eq!(greeting_for_hour(17), "Good evening");
        assert_eq!(greeting_for_hour(2), "Good evening");
    }

    #[test]
    fn headers_use_short_names() {
        assert_eq!(format_day_header("2026-01-11"), "Sun, Jan 11");
        assert_eq!(format_day_header("not-a-date"), "not-a-date");
        let date = NaiveDate::from_ymd_opt(2026, 1, 11).unwrap();
        assert_eq!(format_journal_date(date), "Sunday \u{b7} Jan 11");
    }

    #[test]
    fn time_context_boundaries() {
        assert_eq!(time_of_day_context(4), Some("Late night"));
        assert_eq!(time_of_day_context(5), Some("Early morning"));
        assert_eq!(time_of_day_context(8), None);
        assert_eq!(time_of_day_context(17), Some("Evening"));
        assert_eq!(time_of_day_context(23), Some("Late evening"));
    }

    #[test]
    fn format_time_uses_twelve_hour_clock() {
        // 2024-01-10T22:41:00Z
        assert_eq!(format_time_in(&Utc, 1_704_926_460_000), "10:41 PM");
        // 2024-01-10T00:05:00Z
        assert_eq!(format_time_in(&Utc, 1_704_845_100_000), "12:05 AM");
    }

    #[test]
    fn snippet_prefers_sentence_break() {
        let content = format!("{}. tail that keeps going", "a".repeat(80));
        let snippet = preview_snippet(&content, 100);
        assert_eq!(snippet, format!("{}.", "a".repeat(80)));
    }

    #[test]
    fn snippet_hard_cuts_without_late_break() {
        let content = format!("short. {}", "b".repeat(200));
        let snippet = preview_snippet(&content, 50);
        assert!(snippet.ends_with("..."));
        assert_eq!(snippet.chars().count(), 53);
    }

    #[test]
    fn snippet_keeps_short_content_whole() {
        assert_eq!(preview_snippet("  hello  ", 120), "hello");
        let multibyte = "é".repeat(130);
        assert_eq!(preview_snippet(&multibyte, 120).chars().count(), 123);
    }
}
