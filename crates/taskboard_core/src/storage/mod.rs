//! Storage adapter over a key/value string store.
//!
//! # Responsibility
//! - Abstract the persistent key/value store behind `SlotStore`.
//! - Map the task sequence to and from one named slot as JSON text.
//!
//! # Invariants
//! - `TaskStorage::load` never fails; unreadable state degrades to empty.
//! - `TaskStorage::save` always reports write failures to the caller.
//! - A slot is written as a whole; there are no partial writes.

mod memory_slot;
mod sqlite_slot;

pub use memory_slot::MemorySlotStore;
pub use sqlite_slot::SqliteSlotStore;

use crate::db::DbError;
use crate::model::task::{Task, TaskId};
use log::{debug, info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Slot key used by earlier browser builds.
pub const DEFAULT_STORAGE_KEY: &str = "todoTasks";

pub type StorageResult<T> = Result<T, StorageError>;

/// Persistence failures raised by slot stores and `TaskStorage::save`.
#[derive(Debug)]
pub enum StorageError {
    Db(DbError),
    Serialize(serde_json::Error),
    /// Serialized value is larger than the store quota.
    QuotaExceeded {
        key: String,
        size: usize,
        quota: usize,
    },
    /// Connection schema is not at the version this build expects.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Backend refused the write for a reason of its own.
    WriteRejected(String),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "failed to serialize tasks: {err}"),
            Self::QuotaExceeded { key, size, quota } => write!(
                f,
                "storage quota exceeded for slot `{key}`: {size} bytes > {quota} bytes"
            ),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "slot connection not migrated: expected schema {expected_version}, found {actual_version}"
            ),
            Self::WriteRejected(message) => write!(f, "storage write rejected: {message}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialize(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// Persistent key/value string store.
pub trait SlotStore {
    /// Returns the slot text, or `None` when the slot was never written.
    fn read_slot(&self, key: &str) -> StorageResult<Option<String>>;
    /// Replaces the slot text.
    fn write_slot(&mut self, key: &str, value: &str) -> StorageResult<()>;
}

/// Task sequence persisted in one named slot.
pub struct TaskStorage<S: SlotStore> {
    store: S,
    key: String,
}

impl<S: SlotStore> TaskStorage<S> {
    /// Binds a slot store to `key`.
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Binds a slot store to [`DEFAULT_STORAGE_KEY`].
    pub fn with_default_key(store: S) -> Self {
        Self::new(store, DEFAULT_STORAGE_KEY)
    }

    pub fn key(&self) -> &str {
        self.key.as_str()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Loads the persisted sequence.
    ///
    /// Absent slot, read failure, or a slot that is not a JSON array all
    /// yield an empty sequence. Individual records that fail validation, or
    /// repeat an id already seen, are skipped.
    pub fn load(&self) -> Vec<Task> {
        let text = match self.store.read_slot(&self.key) {
            Ok(Some(text)) => text,
            Ok(None) => {
                debug!("event=storage_load module=storage status=empty reason=slot_absent");
                return Vec::new();
            }
            Err(err) => {
                warn!(
                    "event=storage_load module=storage status=degraded error_code=read_failed error={}",
                    err
                );
                return Vec::new();
            }
        };

        let records: Vec<serde_json::Value> = match serde_json::from_str(&text) {
            Ok(records) => records,
            Err(err) => {
                warn!(
                    "event=storage_load module=storage status=degraded error_code=parse_failed error={}",
                    err
                );
                return Vec::new();
            }
        };

        let total = records.len();
        let mut seen: HashSet<TaskId> = HashSet::with_capacity(total);
        let mut tasks = Vec::with_capacity(total);
        for (index, record) in records.into_iter().enumerate() {
            match serde_json::from_value::<Task>(record) {
                Ok(task) if seen.insert(task.id.clone()) => tasks.push(task),
                Ok(task) => warn!(
                    "event=storage_load module=storage status=skipped index={} reason=duplicate_id task_id={}",
                    index, task.id
                ),
                Err(err) => warn!(
                    "event=storage_load module=storage status=skipped index={} reason=invalid_record error={}",
                    index, err
                ),
            }
        }

        info!(
            "event=storage_load module=storage status=ok count={} skipped={}",
            tasks.len(),
            total - tasks.len()
        );
        tasks
    }

    /// Serializes and writes the whole sequence.
    ///
    /// # Errors
    /// - Serialization failure or any slot write failure.
    pub fn save(&mut self, tasks: &[Task]) -> StorageResult<()> {
        let text = serde_json::to_string(tasks)?;
        if let Err(err) = self.store.write_slot(&self.key, &text) {
            warn!(
                "event=storage_save module=storage status=error count={} bytes={} error={}",
                tasks.len(),
                text.len(),
                err
            );
            return Err(err);
        }
        debug!(
            "event=storage_save module=storage status=ok count={} bytes={}",
            tasks.len(),
            text.len()
        );
        Ok(())
    }
}
