//! Journal repository over the single JSON-array slot.
//!
//! # Responsibility
//! - Provide entry CRUD on top of `keys::JOURNAL_ENTRIES`.
//! - Own the draft slot of the write screen.
//!
//! # Invariants
//! - The persisted array is sorted by `createdAt` descending after every save.
//! - Saving an existing id overwrites the whole record (no field merge).
//! - An entry may not move onto a calendar day owned by another entry; an
//!   edit that keeps its stored day is always accepted, even on legacy blobs
//!   holding several entries for that day.
//! - A blob that fails to decode is never overwritten by a mutation.

use crate::kv::{keys, KeyValueStore};
use crate::model::entry::JournalEntry;
use crate::repo::{RepoError, RepoResult};

/// Repository interface for journal entries and the write-screen draft.
pub trait JournalRepository {
    /// Inserts or replaces one entry by id.
    fn save_entry(&self, entry: &JournalEntry) -> RepoResult<()>;
    /// Returns every entry, newest first. Empty when nothing is stored.
    fn list_entries(&self) -> RepoResult<Vec<JournalEntry>>;
    /// Returns the first entry with `id`.
    fn get_entry(&self, id: &str) -> RepoResult<Option<JournalEntry>>;
    /// Returns the first entry whose `date` equals `date_key`.
    fn get_entry_by_date(&self, date_key: &str) -> RepoResult<Option<JournalEntry>>;
    /// Removes the entry with `id`. Returns whether anything was removed.
    fn delete_entry(&self, id: &str) -> RepoResult<bool>;
    /// Stores the unstructured draft text.
    fn save_draft(&self, content: &str) -> RepoResult<()>;
    /// Loads the draft text.
    fn get_draft(&self) -> RepoResult<Option<String>>;
    /// Drops the draft slot.
    fn clear_draft(&self) -> RepoResult<()>;
}

/// Journal repository backed by any `KeyValueStore`.
pub struct KvJournalRepository<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> KvJournalRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Gives back the wrapped store.
    pub fn into_inner(self) -> S {
        self.store
    }
}

impl<S: KeyValueStore> JournalRepository for KvJournalRepository<S> {
    fn save_entry(&self, entry: &JournalEntry) -> RepoResult<()> {
        entry.validate()?;

        self.store
            .update_item(keys::JOURNAL_ENTRIES, |current| -> RepoResult<_> {
                let mut entries = decode_entries(current.as_deref())?;
                let index = entries.iter().position(|existing| existing.id == entry.id);
                let claims_new_day = index.map_or(true, |i| entries[i].date != entry.date);
                if claims_new_day {
                    if let Some(owner) = entries
                        .iter()
                        .find(|other| other.date == entry.date && other.id != entry.id)
                    {
                        return Err(RepoError::DateOccupied {
                            date: entry.date.clone(),
                            existing_id: owner.id.clone(),
                        });
                    }
                }
                match index {
                    Some(i) => entries[i] = entry.clone(),
                    None => entries.push(entry.clone()),
                }
                sort_newest_first(&mut entries);
                encode_entries(&entries).map(Some)
            })
    }

    fn list_entries(&self) -> RepoResult<Vec<JournalEntry>> {
        let raw = self.store.get_item(keys::JOURNAL_ENTRIES)?;
        decode_entries(raw.as_deref())
    }

    fn get_entry(&self, id: &str) -> RepoResult<Option<JournalEntry>> {
        Ok(self
            .list_entries()?
            .into_iter()
            .find(|entry| entry.id == id))
    }

    fn get_entry_by_date(&self, date_key: &str) -> RepoResult<Option<JournalEntry>> {
        Ok(self
            .list_entries()?
            .into_iter()
            .find(|entry| entry.date == date_key))
    }

    fn delete_entry(&self, id: &str) -> RepoResult<bool> {
        let mut removed = false;
        self.store
            .update_item(keys::JOURNAL_ENTRIES, |current| -> RepoResult<_> {
                let mut entries = decode_entries(current.as_deref())?;
                let before = entries.len();
                entries.retain(|entry| entry.id != id);
                if entries.len() == before {
                    return Ok(None);
                }
                removed = true;
                encode_entries(&entries).map(Some)
            })?;
        Ok(removed)
    }

    fn save_draft(&self, content: &str) -> RepoResult<()> {
        Ok(self.store.set_item(keys::JOURNAL_DRAFT, content)?)
    }

    fn get_draft(&self) -> RepoResult<Option<String>> {
        Ok(self.store.get_item(keys::JOURNAL_DRAFT)?)
    }

    fn clear_draft(&self) -> RepoResult<()> {
        Ok(self.store.remove_item(keys::JOURNAL_DRAFT)?)
    }
}

/// Sorts by `created_at` descending. Stable, so equal timestamps keep their
/// relative order.
pub fn sort_newest_first(entries: &mut [JournalEntry]) {
    entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

fn decode_entries(raw: Option<&str>) -> RepoResult<Vec<JournalEntry>> {
    match raw {
        None => Ok(Vec::new()),
        Some(text) if text.trim().is_empty() => Ok(Vec::new()),
        Some(text) => serde_json::from_str(text)
            .map_err(|err| RepoError::InvalidData(format!("journal entries blob: {err}"))),
    }
}

fn encode_entries(entries: &[JournalEntry]) -> RepoResult<String> {
    serde_json::to_string(entries)
        .map_err(|err| RepoError::InvalidData(format!("cannot encode journal entries: {err}")))
}
