//! Journal entry model.
//!
//! # Responsibility
//! - Define the record stored in the journal entries JSON array.
//! - Derive the calendar-day key from the creation instant.
//!
//! # Invariants
//! - `id` is opaque, non-blank and never reused for another entry.
//! - Entries built here get `date` from the local calendar day of
//!   `created_at`; a stored `date` is kept as-is on later edits, so a session
//!   that crosses midnight keeps editing the same day.
//! - `updated_at >= created_at`.

use crate::model::date_key::{date_key_for_millis_in, now_millis, parse_date_key};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Opaque entry identifier.
pub type EntryId = String;

/// Validation failures for entries headed to storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryValidationError {
    BlankId,
    MalformedDateKey(String),
    InvalidTimestamps {
        created_at: i64,
        updated_at: i64,
    },
}

impl Display for EntryValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankId => write!(f, "entry id must not be blank"),
            Self::MalformedDateKey(value) => {
                write!(f, "entry date `{value}` is not a YYYY-MM-DD key")
            }
            Self::InvalidTimestamps {
                created_at,
                updated_at,
            } => write!(
                f,
                "updatedAt ({updated_at}) must be >= createdAt ({created_at})"
            ),
        }
    }
}

impl Error for EntryValidationError {}

/// One journal note tied to a calendar day.
///
/// Field names serialize in camelCase to stay compatible with blobs written
/// by the mobile shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub id: EntryId,
    pub content: String,
    /// Local calendar day key, `YYYY-MM-DD`.
    pub date: String,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Unix epoch milliseconds.
    pub updated_at: i64,
}

impl JournalEntry {
    /// Creates an entry stamped with the current time.
    pub fn new(content: impl Into<String>) -> Self {
        Self::new_at(content, now_millis())
    }

    /// Creates an entry with a generated id, created and updated at `now_ms`.
    pub fn new_at(content: impl Into<String>, now_ms: i64) -> Self {
        Self::with_id(new_entry_id(), content, now_ms)
    }

    /// Creates an entry with a caller-provided id.
    ///
    /// `date` is always derived from `created_at` in device-local time, so
    /// callers cannot produce a day key that disagrees with the timestamp.
    pub fn with_id(id: impl Into<EntryId>, content: impl Into<String>, created_at: i64) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            date: date_key_for_millis_in(&Local, created_at),
            created_at,
            updated_at: created_at,
        }
    }

    /// Replaces the whole content and bumps `updated_at`.
    ///
    /// `updated_at` never moves before `created_at`, even with a skewed clock.
    pub fn touch(&mut self, content: impl Into<String>, now_ms: i64) {
        self.content = content.into();
        self.updated_at = now_ms.max(self.created_at);
    }

    /// Checks the shape of the record before it is written.
    ///
    /// `date` is not compared with `created_at`: records written by the
    /// mobile shell may legitimately carry a later day than their creation
    /// instant.
    pub fn validate(&self) -> Result<(), EntryValidationError> {
        if self.id.trim().is_empty() {
            return Err(EntryValidationError::BlankId);
        }
        if parse_date_key(&self.date).is_none() {
            return Err(EntryValidationError::MalformedDateKey(self.date.clone()));
        }
        if self.updated_at < self.created_at {
            return Err(EntryValidationError::InvalidTimestamps {
                created_at: self.created_at,
                updated_at: self.updated_at,
            });
        }
        Ok(())
    }
}

/// Generates a fresh opaque entry id.
pub fn new_entry_id() -> EntryId {
    format!("entry_{}", Uuid::new_v4().simple())
}
