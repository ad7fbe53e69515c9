//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `lumio_core` linkage.
//! - Print the current month grid and one companion reply for eyeballing.

use lumio_core::{
    calendar_grid_today, generate_novi_response, CalendarCell, MonthCursor, WEEKDAY_LABELS,
};
use std::collections::BTreeSet;

fn main() {
    println!("lumio_core ping={}", lumio_core::ping());
    println!("lumio_core version={}", lumio_core::core_version());

    let month = calendar_grid_today(MonthCursor::current(), &BTreeSet::new(), None);
    println!();
    println!("{}", month.cursor.label());
    let header = WEEKDAY_LABELS.map(|label| format!("{label:>3}"));
    println!("{}", header.join(""));
    for week in month.weeks() {
        let row = week
            .iter()
            .map(|cell| match cell {
                CalendarCell::Blank => "   ".to_string(),
                CalendarCell::Day(day) if day.is_today => format!("{:>2}*", day.day),
                CalendarCell::Day(day) => format!("{:>3}", day.day),
            })
            .collect::<String>();
        println!("{row}");
    }

    println!();
    println!("novi> {}", generate_novi_response("I need clarity"));
}
