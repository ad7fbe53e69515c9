//! Key-value slots backing every persisted piece of app state.
//!
//! # Responsibility
//! - Define the string-to-string storage contract consumed by repositories.
//! - Provide SQLite-backed and in-memory implementations.
//!
//! # Invariants
//! - Values are opaque strings; structure (JSON, flags) is owned by callers.
//! - `update_item` is the only read-modify-write primitive, and it is atomic
//!   with respect to every other writer of the same store.
//! - Multi-key `set_items`/`remove_items` apply all keys or none.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory_store;
mod sqlite_store;

pub use memory_store::MemoryKvStore;
pub use sqlite_store::SqliteKvStore;

/// Storage keys used by the app. Kept identical to the ones written by the
/// mobile shell so existing installs keep their data.
pub mod keys {
    /// JSON array of journal entries.
    pub const JOURNAL_ENTRIES: &str = "@lumio:journal_entries";
    /// Unstructured draft text of the write screen.
    pub const JOURNAL_DRAFT: &str = "@lumio:journal_draft";
    /// Local session token.
    pub const AUTH_TOKEN: &str = "@lumio:auth_token";
    /// Signed-in user email.
    pub const USER_EMAIL: &str = "@lumio:user_email";
    /// `"true"` / `"false"` new-user flag.
    pub const IS_NEW_USER: &str = "@lumio:is_new_user";
}

pub type KvResult<T> = Result<T, KvError>;

/// Error raised by a key-value backend.
#[derive(Debug)]
pub enum KvError {
    /// SQLite transport or schema failure.
    Db(DbError),
    /// Backend refused the operation (poisoned lock, read-only handle...).
    Unavailable(String),
}

impl Display for KvError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Unavailable(message) => write!(f, "key-value store unavailable: {message}"),
        }
    }
}

impl Error for KvError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Unavailable(_) => None,
        }
    }
}

impl From<DbError> for KvError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for KvError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// String key-value storage contract.
pub trait KeyValueStore {
    /// Returns the value stored under `key`, or `None` when the slot is empty.
    fn get_item(&self, key: &str) -> KvResult<Option<String>>;

    /// Writes every `(key, value)` pair, overwriting existing values.
    fn set_items(&self, items: &[(&str, &str)]) -> KvResult<()>;

    /// Removes every listed key. Missing keys are ignored.
    fn remove_items(&self, keys: &[&str]) -> KvResult<()>;

    /// Atomically reads `key`, hands the current value to `apply`, and writes
    /// back what it returns.
    ///
    /// `Ok(Some(value))` replaces the slot, `Ok(None)` leaves it untouched and
    /// an `Err` aborts without writing.
    fn update_item<E, F>(&self, key: &str, apply: F) -> Result<(), E>
    where
        E: From<KvError>,
        F: FnOnce(Option<String>) -> Result<Option<String>, E>;

    /// Writes a single slot.
    fn set_item(&self, key: &str, value: &str) -> KvResult<()> {
        self.set_items(&[(key, value)])
    }

    /// Removes a single slot.
    fn remove_item(&self, key: &str) -> KvResult<()> {
        self.remove_items(&[key])
    }
}

impl<S: KeyValueStore> KeyValueStore for &S {
    fn get_item(&self, key: &str) -> KvResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_items(&self, items: &[(&str, &str)]) -> KvResult<()> {
        (**self).set_items(items)
    }

    fn remove_items(&self, keys: &[&str]) -> KvResult<()> {
        (**self).remove_items(keys)
    }

    fn update_item<E, F>(&self, key: &str, apply: F) -> Result<(), E>
    where
        E: From<KvError>,
        F: FnOnce(Option<String>) -> Result<Option<String>, E>,
    {
        (**self).update_item(key, apply)
    }
}
