//! Month grid layout for the journal calendar.
//!
//! Weeks start on Monday. A month renders as `first_day_offset` blank cells
//! followed by one cell per day; the UI wraps the flat list into 7 columns and
//! leaves the tail of the last row empty.

use crate::model::date_key::format_date_key;
use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Column headers, Monday first.
pub const WEEKDAY_LABELS: [&str; 7] = ["M", "T", "W", "T", "F", "S", "S"];

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A `(year, zero-indexed month)` position with wrapping navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MonthCursor {
    pub year: i32,
    /// 0 = January .. 11 = December.
    pub month0: u32,
}

impl MonthCursor {
    /// Builds a cursor; months past December roll into following years.
    ///
    /// The year saturates at `i32::MAX` instead of overflowing.
    pub fn new(year: i32, month0: u32) -> Self {
        Self {
            year: year.saturating_add((month0 / 12) as i32),
            month0: month0 % 12,
        }
    }

    /// Same position with `month0` folded into `0..=11`; fields are public
    /// and deserializable, so callers may hand over any value.
    fn normalized(self) -> Self {
        Self::new(self.year, self.month0)
    }

    /// Month containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month0())
    }

    /// Month containing the device-local current day.
    pub fn current() -> Self {
        Self::containing(Local::now().date_naive())
    }

    pub fn prev(self) -> Self {
        let this = self.normalized();
        if this.month0 == 0 {
            Self {
                year: this.year.saturating_sub(1),
                month0: 11,
            }
        } else {
            Self {
                year: this.year,
                month0: this.month0 - 1,
            }
        }
    }

    pub fn next(self) -> Self {
        let this = self.normalized();
        if this.month0 == 11 {
            Self {
                year: this.year.saturating_add(1),
                month0: 0,
            }
        } else {
            Self {
                year: this.year,
                month0: this.month0 + 1,
            }
        }
    }

    /// Header label such as `"February 2024"`.
    pub fn label(self) -> String {
        let this = self.normalized();
        format!("{} {}", MONTH_NAMES[this.month0 as usize], this.year)
    }

    fn first_day(self) -> Option<NaiveDate> {
        let this = self.normalized();
        NaiveDate::from_ymd_opt(this.year, this.month0 + 1, 1)
    }
}

/// One real day in the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDay {
    pub day: u32,
    pub date_key: String,
    pub has_entry: bool,
    pub is_today: bool,
    pub is_selected: bool,
}

/// Grid cell: leading padding or a day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CalendarCell {
    Blank,
    Day(CalendarDay),
}

impl CalendarCell {
    pub fn as_day(&self) -> Option<&CalendarDay> {
        match self {
            Self::Blank => None,
            Self::Day(day) => Some(day),
        }
    }
}

/// Fully computed month grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarMonth {
    pub cursor: MonthCursor,
    /// Blank cells before day 1, in `0..=6`.
    pub first_day_offset: u32,
    pub days_in_month: u32,
    pub cells: Vec<CalendarCell>,
}

impl CalendarMonth {
    /// Cells split into rows of 7; the last row may be shorter.
    pub fn weeks(&self) -> impl Iterator<Item = &[CalendarCell]> {
        self.cells.chunks(WEEKDAY_LABELS.len())
    }
}

/// Result of tapping a day cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarTap {
    /// Day has an entry; select it.
    Select(String),
    /// Day has no entry; the UI offers to write one.
    NoEntry(String),
}

/// Number of days in the month: the day before the first of the next month.
pub fn days_in_month(year: i32, month0: u32) -> u32 {
    MonthCursor::new(year, month0)
        .next()
        .first_day()
        .and_then(|first| first.pred_opt())
        .map_or(0, |last| last.day())
}

/// Weekday of day 1 with Monday = 0 .. Sunday = 6.
pub fn first_day_offset(year: i32, month0: u32) -> u32 {
    MonthCursor::new(year, month0)
        .first_day()
        .map_or(0, |first| first.weekday().num_days_from_monday())
}

/// Lays out one month.
///
/// `today` is the caller's local date; `selected` is a date key.
pub fn calendar_grid(
    cursor: MonthCursor,
    marked_dates: &BTreeSet<String>,
    selected: Option<&str>,
    today: NaiveDate,
) -> CalendarMonth {
    let cursor = cursor.normalized();
    let offset = first_day_offset(cursor.year, cursor.month0);
    let days = days_in_month(cursor.year, cursor.month0);

    let mut cells = Vec::with_capacity((offset + days) as usize);
    cells.extend((0..offset).map(|_| CalendarCell::Blank));
    for day in 1..=days {
        let date_key = format_date_key(cursor.year, cursor.month0, day);
        cells.push(CalendarCell::Day(CalendarDay {
            day,
            has_entry: marked_dates.contains(&date_key),
            is_today: today.year() == cursor.year
                && today.month0() == cursor.month0
                && today.day() == day,
            is_selected: selected == Some(date_key.as_str()),
            date_key,
        }));
    }

    CalendarMonth {
        cursor,
        first_day_offset: offset,
        days_in_month: days,
        cells,
    }
}

/// `calendar_grid` against the device-local current day.
pub fn calendar_grid_today(
    cursor: MonthCursor,
    marked_dates: &BTreeSet<String>,
    selected: Option<&str>,
) -> CalendarMonth {
    calendar_grid(cursor, marked_dates, selected, Local::now().date_naive())
}

/// Resolves a tap on a day cell.
pub fn tap_day(date_key: &str, marked_dates: &BTreeSet<String>) -> CalendarTap {
    if marked_dates.contains(date_key) {
        CalendarTap::Select(date_key.to_string())
    } else {
        CalendarTap::NoEntry(date_key.to_string())
    }
}
