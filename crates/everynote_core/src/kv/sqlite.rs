//! SQLite-backed key-value store.
//!
//! # Responsibility
//! - Provide the durable, device-local adapter used in production.
//! - Map `get`/`set` onto a single upsert table.
//!
//! # Invariants
//! - The backing connection is migrated before any read or write.
//! - One writer at a time: the connection sits behind an async mutex.

use std::path::Path;

use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use tokio::sync::Mutex;

use super::{KeyValueStore, KvResult};
use crate::db::{open_db, open_db_in_memory};

/// Durable adapter storing each key in the `kv_entries` table.
pub struct SqliteKeyValueStore {
    conn: Mutex<Connection>,
}

impl SqliteKeyValueStore {
    /// Opens (or creates) the database file at `path` and migrates it.
    pub fn open(path: impl AsRef<Path>) -> KvResult<Self> {
        let conn = open_db(path)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// In-memory variant whose contents live only as long as this value.
    ///
    /// Useful for tests; it does not satisfy the restart-durability contract
    /// of the file-backed store.
    pub fn open_in_memory() -> KvResult<Self> {
        let conn = open_db_in_memory()?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

#[async_trait]
impl KeyValueStore for SqliteKeyValueStore {
    async fn get(&self, key: &str) -> KvResult<Option<String>> {
        let conn = self.conn.lock().await;
        let value = conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> KvResult<()> {
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO kv_entries (key, value, updated_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE
             SET value = excluded.value, updated_at = excluded.updated_at;",
            params![key, value, Utc::now().timestamp_millis()],
        )?;
        Ok(())
    }
}
