//! SQLite-backed slot store.
//!
//! # Responsibility
//! - Persist named slots as rows of the `kv_slots` table.
//! - Enforce an optional per-value byte quota before touching SQL.
//!
//! # Invariants
//! - Only migrated connections are accepted (`try_new`).
//! - A write replaces the whole slot value in one statement.
//! - `updated_at` holds unix epoch milliseconds.

use super::{SlotStore, StorageError, StorageResult};
use crate::db::migrations::{current_user_version, latest_version};
use crate::db::open_db;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

pub struct SqliteSlotStore {
    conn: Connection,
    quota_bytes: Option<usize>,
}

impl SqliteSlotStore {
    /// Wraps a connection that has already been opened through `crate::db`.
    ///
    /// # Errors
    /// - `UninitializedConnection` when the schema version does not match.
    pub fn try_new(conn: Connection) -> StorageResult<Self> {
        let actual_version = current_user_version(&conn)?;
        let expected_version = latest_version();
        if actual_version != expected_version {
            return Err(StorageError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }
        Ok(Self {
            conn,
            quota_bytes: None,
        })
    }

    /// Opens (and migrates) a database file as a slot store.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let conn = open_db(path)?;
        Self::try_new(conn)
    }

    /// Sets the maximum accepted value size in bytes.
    pub fn with_quota(mut self, quota_bytes: Option<usize>) -> Self {
        self.quota_bytes = quota_bytes;
        self
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl SlotStore for SqliteSlotStore {
    fn read_slot(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_slots WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write_slot(&mut self, key: &str, value: &str) -> StorageResult<()> {
        if let Some(quota) = self.quota_bytes {
            if value.len() > quota {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    size: value.len(),
                    quota,
                });
            }
        }

        self.conn.execute(
            "INSERT INTO kv_slots (key, value, updated_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value, Utc::now().timestamp_millis()],
        )?;
        Ok(())
    }
}
