//! SQLite file behind the key-value slots.
//!
//! The schema is a single `kv_items(key, value, updated_at)` table; every
//! journal entry, the draft and the session flags live in rows of it as
//! opaque strings (see `crate::kv::keys`). This module only knows how to open
//! the file and bring that table up to date.
//!
//! # Invariants
//! - Schema version lives in `PRAGMA user_version`; a file written by a newer
//!   app build is refused rather than read with the wrong layout.
//! - Connections wait on a busy timeout instead of failing fast, because the
//!   kv store takes `IMMEDIATE` write locks.
//! - No slot is read or written before migrations succeed.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure opening or migrating the kv database.
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// The file was migrated by a newer build than this one.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "sqlite: {err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "kv database is at schema v{db_version}, this build supports up to v{latest_supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
