//! Date bucketing of journal entries.

use crate::model::entry::JournalEntry;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Entries sharing one calendar-day key, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupedEntry {
    pub date: String,
    pub entries: Vec<JournalEntry>,
}

/// Partitions entries by their `date` key.
///
/// Buckets are ordered by date descending; inside a bucket entries are
/// ordered by `created_at` descending, ties keeping input order. No entry is
/// dropped or duplicated.
pub fn group_entries_by_local_date(entries: &[JournalEntry]) -> Vec<GroupedEntry> {
    let mut buckets: BTreeMap<&str, Vec<JournalEntry>> = BTreeMap::new();
    for entry in entries {
        buckets
            .entry(entry.date.as_str())
            .or_default()
            .push(entry.clone());
    }

    buckets
        .into_iter()
        .rev()
        .map(|(date, mut entries)| {
            entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            GroupedEntry {
                date: date.to_string(),
                entries,
            }
        })
        .collect()
}

/// Distinct date keys that carry at least one entry.
pub fn get_marked_dates(entries: &[JournalEntry]) -> BTreeSet<String> {
    entries.iter().map(|entry| entry.date.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::{get_marked_dates, group_entries_by_local_date};
    use crate::model::entry::JournalEntry;

    fn entry(id: &str, date: &str, created_at: i64) -> JournalEntry {
        JournalEntry {
            id: id.to_string(),
            content: String::new(),
            date: date.to_string(),
            created_at,
            updated_at: created_at,
        }
    }

    #[test]
    fn groups_example_entries() {
        let entries = vec![
            entry("a", "2024-01-10", 100),
            entry("b", "2024-01-10", 200),
            entry("c", "2024-01-09", 50),
        ];

        let grouped = group_entries_by_local_date(&entries);
        let shape: Vec<(&str, Vec<&str>)> = grouped
            .iter()
            .map(|bucket| {
                (
                    bucket.date.as_str(),
                    bucket.entries.iter().map(|e| e.id.as_str()).collect(),
                )
            })
            .collect();
        assert_eq!(
            shape,
            vec![("2024-01-10", vec!["b", "a"]), ("2024-01-09", vec!["c"])]
        );
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(group_entries_by_local_date(&[]).is_empty());
        assert!(get_marked_dates(&[]).is_empty());
    }

    #[test]
    fn equal_timestamps_keep_input_order() {
        let entries = vec![
            entry("first", "2024-03-01", 10),
            entry("second", "2024-03-01", 10),
        ];
        let grouped = group_entries_by_local_date(&entries);
        let ids: Vec<&str> = grouped[0].entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second"]);
    }

    #[test]
    fn marked_dates_are_distinct() {
        let entries = vec![
            entry("a", "2024-01-10", 1),
            entry("b", "2024-01-10", 2),
            entry("c", "2023-12-31", 3),
        ];
        let marked = get_marked_dates(&entries);
        assert_eq!(marked.len(), 2);
        assert!(marked.contains("2024-01-10"));
        assert!(marked.contains("2023-12-31"));
    }
}
