//! SQLite-backed key-value storage.
//!
//! # Responsibility
//! - Persist key-value entries in the `kv_entries` table.
//! - Keep SQL details inside the storage boundary.
//!
//! # Invariants
//! - Only migrated connections are accepted.
//! - Each `set_item` is a single upsert statement.

use super::{KeyValueStorage, StorageError, StorageResult};
use crate::db::migrations::{latest_version, schema_version};
use crate::db::{open_db, open_db_in_memory};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// Key-value store over a migrated SQLite connection.
pub struct SqliteKvStorage {
    conn: Connection,
}

impl SqliteKvStorage {
    /// Wraps a connection returned by [`open_db`] or [`open_db_in_memory`].
    ///
    /// # Errors
    /// - `StorageError::SchemaNotReady` when migrations were not applied.
    pub fn try_new(conn: Connection) -> StorageResult<Self> {
        let found = schema_version(&conn)?;
        let expected = latest_version();
        if found < expected {
            return Err(StorageError::SchemaNotReady { found, expected });
        }
        Ok(Self { conn })
    }

    /// Opens (and migrates) the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        Self::try_new(open_db(path)?)
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory() -> StorageResult<Self> {
        Self::try_new(open_db_in_memory()?)
    }

    /// Borrows the underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl KeyValueStorage for SqliteKvStorage {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        self.conn
            .execute("DELETE FROM kv_entries WHERE key = ?1;", [key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::SqliteKvStorage;
    use crate::storage::{KeyValueStorage, StorageError};
    use rusqlite::Connection;

    #[test]
    fn upsert_replaces_value() {
        let storage = SqliteKvStorage::open_in_memory().unwrap();
        storage.set_item("theme", "light").unwrap();
        storage.set_item("theme", "dark").unwrap();
        assert_eq!(storage.get_item("theme").unwrap().as_deref(), Some("dark"));

        let rows: i64 = storage
            .connection()
            .query_row("SELECT COUNT(*) FROM kv_entries;", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[test]
    fn unmigrated_connection_is_rejected() {
        let conn = Connection::open_in_memory().unwrap();
        let err = SqliteKvStorage::try_new(conn).err().unwrap();
        assert!(matches!(
            err,
            StorageError::SchemaNotReady { found: 0, expected: 1 }
        ));
    }
}
