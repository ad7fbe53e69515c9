//! Canonical calendar-day keys (`YYYY-MM-DD`).
//!
//! Every module that groups, marks or looks up entries by day goes through
//! these helpers so the string format cannot drift between producers and
//! consumers.

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};

const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// Formats a key from a year, a zero-indexed month and a day of month.
pub fn format_date_key(year: i32, month0: u32, day: u32) -> String {
    format!("{year:04}-{:02}-{day:02}", month0 + 1)
}

/// Formats a key for a calendar date.
pub fn date_key_for(date: NaiveDate) -> String {
    date.format(DATE_KEY_FORMAT).to_string()
}

/// Local calendar day of an epoch-millisecond instant in the given zone.
///
/// Out-of-range instants collapse to the Unix epoch.
pub fn local_date_for_millis_in<Tz: TimeZone>(tz: &Tz, epoch_ms: i64) -> NaiveDate {
    DateTime::<Utc>::from_timestamp_millis(epoch_ms)
        .unwrap_or_default()
        .with_timezone(tz)
        .date_naive()
}

/// Key of the calendar day containing `epoch_ms` in the given zone.
pub fn date_key_for_millis_in<Tz: TimeZone>(tz: &Tz, epoch_ms: i64) -> String {
    date_key_for(local_date_for_millis_in(tz, epoch_ms))
}

/// Key of the device-local calendar day containing `epoch_ms`.
pub fn date_key_for_millis(epoch_ms: i64) -> String {
    date_key_for_millis_in(&Local, epoch_ms)
}

/// Key of the current device-local day.
pub fn today_date_key() -> String {
    date_key_for(Local::now().date_naive())
}

/// Parses a strictly formatted key. Returns `None` for anything that is not
/// a zero-padded `YYYY-MM-DD` naming a real day.
pub fn parse_date_key(value: &str) -> Option<NaiveDate> {
    let bytes = value.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    NaiveDate::parse_from_str(value, DATE_KEY_FORMAT).ok()
}

/// Current time in epoch milliseconds.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::{date_key_for_millis_in, format_date_key, parse_date_key};
    use chrono::{FixedOffset, NaiveDate, Utc};

    #[test]
    fn format_date_key_pads_month_and_day() {
        assert_eq!(format_date_key(2024, 0, 5), "2024-01-05");
        assert_eq!(format_date_key(2024, 11, 31), "2024-12-31");
    }

    #[test]
    fn millis_are_bucketed_in_the_given_zone() {
        // 2024-01-10T23:30:00Z
        let ms = 1_704_929_400_000;
        assert_eq!(date_key_for_millis_in(&Utc, ms), "2024-01-10");
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(date_key_for_millis_in(&plus_two, ms), "2024-01-11");
    }

    #[test]
    fn parse_date_key_is_strict() {
        assert_eq!(
            parse_date_key("2024-02-29"),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
        assert_eq!(parse_date_key("2023-02-29"), None);
        assert_eq!(parse_date_key("2024-1-05"), None);
        assert_eq!(parse_date_key("2024/01/05"), None);
        assert_eq!(parse_date_key(""), None);
    }
}
