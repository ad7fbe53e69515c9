//! Journal use-case facade.
//!
//! # Responsibility
//! - Provide entry CRUD with "never fails" semantics for screens.
//! - Offer the grouped/marked projections the journal tab renders.
//! - Run `WriteSession` effects.
//!
//! # Invariants
//! - Read failures become empty collections or `None`.
//! - Write failures are logged and reported as `false`, never panics.

use crate::flow::write_session::WriteEffect;
use crate::journal::grouping::{get_marked_dates, group_entries_by_local_date, GroupedEntry};
use crate::model::date_key::today_date_key;
use crate::model::entry::JournalEntry;
use crate::repo::journal_repo::JournalRepository;
use log::{debug, error, info};
use std::collections::BTreeSet;

/// Journal facade over a repository implementation.
pub struct JournalStore<R: JournalRepository> {
    repo: R,
}

impl<R: JournalRepository> JournalStore<R> {
    /// Creates a facade using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Borrows the repository for callers that need raw `RepoResult`s.
    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Inserts or replaces `entry` by id. Returns whether it was persisted.
    pub fn save_entry(&self, entry: &JournalEntry) -> bool {
        match self.repo.save_entry(entry) {
            Ok(()) => {
                info!(
                    "event=journal_save module=journal status=ok entry_id={} date={} chars={}",
                    entry.id,
                    entry.date,
                    entry.content.chars().count()
                );
                true
            }
            Err(err) => {
                error!(
                    "event=journal_save module=journal status=error entry_id={} date={} error={}",
                    entry.id, entry.date, err
                );
                false
            }
        }
    }

    /// Every entry, newest first; empty on any failure.
    pub fn get_all_entries(&self) -> Vec<JournalEntry> {
        self.repo.list_entries().unwrap_or_else(|err| {
            error!("event=journal_load module=journal status=error error={err}");
            Vec::new()
        })
    }

    pub fn get_entry_by_id(&self, id: &str) -> Option<JournalEntry> {
        self.repo.get_entry(id).unwrap_or_else(|err| {
            error!("event=journal_get module=journal status=error entry_id={id} error={err}");
            None
        })
    }

    /// First stored entry on `date_key`.
    pub fn get_entry_by_date(&self, date_key: &str) -> Option<JournalEntry> {
        self.repo.get_entry_by_date(date_key).unwrap_or_else(|err| {
            error!(
                "event=journal_get_by_date module=journal status=error date={date_key} error={err}"
            );
            None
        })
    }

    /// Today's entry, the one the write screen edits.
    pub fn get_today_entry(&self) -> Option<JournalEntry> {
        self.get_entry_by_date(&today_date_key())
    }

    /// Removes an entry; absent ids are a no-op. Returns whether the call
    /// completed without a storage error.
    pub fn delete_entry(&self, id: &str) -> bool {
        match self.repo.delete_entry(id) {
            Ok(removed) => {
                info!(
                    "event=journal_delete module=journal status=ok entry_id={id} removed={removed}"
                );
                true
            }
            Err(err) => {
                error!(
                    "event=journal_delete module=journal status=error entry_id={id} error={err}"
                );
                false
            }
        }
    }

    /// Entries bucketed by day for the journal tab.
    pub fn grouped_entries(&self) -> Vec<GroupedEntry> {
        group_entries_by_local_date(&self.get_all_entries())
    }

    /// Days carrying an entry, for calendar dots.
    pub fn marked_dates(&self) -> BTreeSet<String> {
        get_marked_dates(&self.get_all_entries())
    }

    pub fn save_draft(&self, content: &str) {
        if let Err(err) = self.repo.save_draft(content) {
            error!("event=draft_save module=journal status=error error={err}");
        }
    }

    pub fn get_draft(&self) -> Option<String> {
        self.repo.get_draft().unwrap_or_else(|err| {
            error!("event=draft_load module=journal status=error error={err}");
            None
        })
    }

    pub fn clear_draft(&self) {
        if let Err(err) = self.repo.clear_draft() {
            error!("event=draft_clear module=journal status=error error={err}");
        }
    }

    /// Runs an effect emitted by `WriteSession`.
    pub fn run_effect(&self, effect: WriteEffect) -> bool {
        match effect {
            WriteEffect::Save(entry) => {
                debug!("event=autosave module=journal entry_id={}", entry.id);
                self.save_entry(&entry)
            }
        }
    }
}
