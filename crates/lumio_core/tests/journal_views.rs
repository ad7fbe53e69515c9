use chrono::NaiveDate;
use lumio_core::{
    calendar_grid, first_day_offset, get_marked_dates, group_entries_by_local_date, tap_day,
    CalendarCell, CalendarTap, JournalEntry, MonthCursor,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::{BTreeSet, HashSet};

fn random_entries(rng: &mut StdRng, count: usize) -> Vec<JournalEntry> {
    (0..count)
        .map(|index| {
            let created_at = rng.gen_range(0..1_000);
            JournalEntry {
                id: format!("e{index}"),
                content: String::new(),
                date: format!("2024-0{}-{:02}", rng.gen_range(1..=3), rng.gen_range(1..=28)),
                created_at,
                updated_at: created_at,
            }
        })
        .collect()
}

#[test]
fn grouping_preserves_ids_and_orders_buckets() {
    let mut rng = StdRng::seed_from_u64(2024);
    for round in 0..50 {
        let entries = random_entries(&mut rng, 1 + round * 3);
        let grouped = group_entries_by_local_date(&entries);

        let mut input_ids: Vec<&str> = entries.iter().map(|e| e.id.as_str()).collect();
        let mut output_ids: Vec<&str> = grouped
            .iter()
            .flat_map(|bucket| bucket.entries.iter().map(|e| e.id.as_str()))
            .collect();
        input_ids.sort_unstable();
        output_ids.sort_unstable();
        assert_eq!(input_ids, output_ids);

        for pair in grouped.windows(2) {
            assert!(pair[0].date > pair[1].date);
        }
        for bucket in &grouped {
            assert!(bucket.entries.iter().all(|e| e.date == bucket.date));
            for pair in bucket.entries.windows(2) {
                assert!(pair[0].created_at >= pair[1].created_at);
            }
        }

        let marked = get_marked_dates(&entries);
        let distinct: HashSet<&str> = entries.iter().map(|e| e.date.as_str()).collect();
        assert!(marked.len() <= entries.len());
        assert_eq!(marked.len(), distinct.len());
        assert_eq!(marked.len(), grouped.len());
    }
}

#[test]
fn calendar_emits_offset_plus_days_cells() {
    let today = NaiveDate::from_ymd_opt(2024, 2, 14).unwrap();
    let mut cursor = MonthCursor::new(2023, 0);
    for _ in 0..36 {
        let month = calendar_grid(cursor, &BTreeSet::new(), None, today);
        assert!(month.first_day_offset <= 6);
        assert_eq!(
            month.cells.len() as u32,
            month.first_day_offset + month.days_in_month
        );
        let blanks = month
            .cells
            .iter()
            .take_while(|cell| matches!(cell, CalendarCell::Blank))
            .count() as u32;
        assert_eq!(blanks, month.first_day_offset);
        cursor = cursor.next();
    }
}

#[test]
fn february_2024_and_january_2024_layouts() {
    let today = NaiveDate::from_ymd_opt(2024, 2, 14).unwrap();
    let february = calendar_grid(MonthCursor::new(2024, 1), &BTreeSet::new(), None, today);
    assert_eq!(february.days_in_month, 29);
    // 2024-02-01 is a Thursday.
    assert_eq!(february.first_day_offset, 3);

    assert_eq!(first_day_offset(2024, 0), 0);
    let january = calendar_grid(MonthCursor::new(2024, 0), &BTreeSet::new(), None, today);
    assert_eq!(january.cells[0].as_day().map(|d| d.day), Some(1));
    assert_eq!(january.weeks().count(), 5);
}

#[test]
fn calendar_marks_entries_today_and_selection() {
    let marked: BTreeSet<String> = ["2024-02-03".to_string(), "2024-02-14".to_string()]
        .into_iter()
        .collect();
    let today = NaiveDate::from_ymd_opt(2024, 2, 14).unwrap();
    let month = calendar_grid(MonthCursor::new(2024, 1), &marked, Some("2024-02-03"), today);

    let days: Vec<_> = month.cells.iter().filter_map(CalendarCell::as_day).collect();
    let third = days.iter().find(|d| d.day == 3).unwrap();
    assert_eq!(third.date_key, "2024-02-03");
    assert!(third.has_entry && third.is_selected && !third.is_today);

    let fourteenth = days.iter().find(|d| d.day == 14).unwrap();
    assert!(fourteenth.has_entry && fourteenth.is_today && !fourteenth.is_selected);

    assert_eq!(days.iter().filter(|d| d.has_entry).count(), 2);
    assert_eq!(days.iter().filter(|d| d.is_today).count(), 1);

    let other_month = calendar_grid(MonthCursor::new(2024, 2), &marked, None, today);
    assert!(other_month
        .cells
        .iter()
        .filter_map(CalendarCell::as_day)
        .all(|d| !d.is_today && !d.has_entry));
}

#[test]
fn tapping_days_selects_or_offers_writing() {
    let marked: BTreeSet<String> = ["2024-02-03".to_string()].into_iter().collect();
    assert_eq!(
        tap_day("2024-02-03", &marked),
        CalendarTap::Select("2024-02-03".to_string())
    );
    assert_eq!(
        tap_day("2024-02-04", &marked),
        CalendarTap::NoEntry("2024-02-04".to_string())
    );
}

#[test]
fn calendar_keys_match_entry_keys() {
    let entry = JournalEntry::new_at("x", 1_704_888_000_000);
    let marked = get_marked_dates(std::slice::from_ref(&entry));
    let date = lumio_core::parse_date_key(&entry.date).unwrap();
    let month = calendar_grid(MonthCursor::containing(date), &marked, None, date);
    let marked_cells: Vec<_> = month
        .cells
        .iter()
        .filter_map(CalendarCell::as_day)
        .filter(|d| d.has_entry)
        .collect();
    assert_eq!(marked_cells.len(), 1);
    assert!(marked_cells[0].is_today);
}
