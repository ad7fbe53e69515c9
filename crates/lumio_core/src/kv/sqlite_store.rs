//! SQLite-backed key-value store.
//!
//! # Responsibility
//! - Persist slots in the `kv_items` table created by migration 1.
//! - Serialize read-modify-write cycles across connections.
//!
//! # Invariants
//! - `update_item` and multi-key writes run inside one `IMMEDIATE`
//!   transaction; a concurrent writer on the same file waits on the busy
//!   timeout instead of interleaving.

use super::{KeyValueStore, KvError, KvResult};
use crate::db::{open_db, open_db_in_memory, DbResult};
use rusqlite::{params, Connection, OptionalExtension, Transaction, TransactionBehavior};
use std::path::Path;

const UPSERT_SQL: &str = "INSERT INTO kv_items (key, value, updated_at)
     VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
     ON CONFLICT(key) DO UPDATE SET
        value = excluded.value,
        updated_at = excluded.updated_at;";

/// Key-value store owning one migrated SQLite connection.
pub struct SqliteKvStore {
    conn: Connection,
}

impl SqliteKvStore {
    /// Opens (and migrates) the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        Ok(Self {
            conn: open_db(path)?,
        })
    }

    /// Opens a fresh in-memory database.
    pub fn open_in_memory() -> DbResult<Self> {
        Ok(Self {
            conn: open_db_in_memory()?,
        })
    }

    /// Wraps a connection that has already been opened through `crate::db`.
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    /// Borrows the underlying connection, mainly for diagnostics and tests.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    fn begin_write(&self) -> KvResult<Transaction<'_>> {
        Ok(Transaction::new_unchecked(
            &self.conn,
            TransactionBehavior::Immediate,
        )?)
    }
}

impl KeyValueStore for SqliteKvStore {
    fn get_item(&self, key: &str) -> KvResult<Option<String>> {
        Ok(read_value(&self.conn, key)?)
    }

    fn set_items(&self, items: &[(&str, &str)]) -> KvResult<()> {
        let tx = self.begin_write()?;
        for (key, value) in items {
            tx.execute(UPSERT_SQL, params![key, value])?;
        }
        tx.commit()?;
        Ok(())
    }

    fn remove_items(&self, keys: &[&str]) -> KvResult<()> {
        let tx = self.begin_write()?;
        for key in keys {
            tx.execute("DELETE FROM kv_items WHERE key = ?1;", [key])?;
        }
        tx.commit()?;
        Ok(())
    }

    fn update_item<E, F>(&self, key: &str, apply: F) -> Result<(), E>
    where
        E: From<KvError>,
        F: FnOnce(Option<String>) -> Result<Option<String>, E>,
    {
        let tx = self.begin_write()?;
        let current = read_value(&tx, key).map_err(KvError::from)?;
        if let Some(next) = apply(current)? {
            tx.execute(UPSERT_SQL, params![key, next])
                .map_err(KvError::from)?;
        }
        tx.commit().map_err(KvError::from)?;
        Ok(())
    }
}

fn read_value(conn: &Connection, key: &str) -> rusqlite::Result<Option<String>> {
    conn.query_row(
        "SELECT value FROM kv_items WHERE key = ?1;",
        [key],
        |row| row.get(0),
    )
    .optional()
}
