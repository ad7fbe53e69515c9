//! Repository layer over key-value slots.
//!
//! # Responsibility
//! - Map domain records to and from their persisted string form.
//! - Report every failure as a typed `RepoError`; swallowing errors is the
//!   job of the facades in `crate::service`.
//!
//! # Invariants
//! - Entry writes call `JournalEntry::validate()` before touching storage.
//! - Every journal mutation is one atomic read-modify-write of the blob.

use crate::kv::KvError;
use crate::model::entry::{EntryId, EntryValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod journal_repo;
pub mod session_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for journal and session persistence.
#[derive(Debug)]
pub enum RepoError {
    Validation(EntryValidationError),
    Store(KvError),
    /// Persisted blob cannot be decoded or encoded.
    InvalidData(String),
    /// A different entry already owns this calendar day.
    DateOccupied {
        date: String,
        existing_id: EntryId,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted journal data: {message}"),
            Self::DateOccupied { date, existing_id } => {
                write!(f, "date {date} already has entry {existing_id}")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::InvalidData(_) => None,
            Self::DateOccupied { .. } => None,
        }
    }
}

impl From<EntryValidationError> for RepoError {
    fn from(value: EntryValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<KvError> for RepoError {
    fn from(value: KvError) -> Self {
        Self::Store(value)
    }
}
