//! In-memory slot store.
//!
//! Used by tests and by hosts that do not need durability. Supports the
//! same byte quota as the SQLite store plus a one-shot write failure switch.

use super::{SlotStore, StorageError, StorageResult};
use std::collections::BTreeMap;

#[derive(Debug, Default)]
pub struct MemorySlotStore {
    slots: BTreeMap<String, String>,
    quota_bytes: Option<usize>,
    fail_next_write: Option<String>,
}

impl MemorySlotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that rejects values larger than `quota_bytes`.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            quota_bytes: Some(quota_bytes),
            ..Self::default()
        }
    }

    /// Makes the next `write_slot` call fail with `WriteRejected(reason)`.
    pub fn fail_next_write(&mut self, reason: impl Into<String>) {
        self.fail_next_write = Some(reason.into());
    }

    /// Raw slot text, bypassing the adapter.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.slots.get(key).map(String::as_str)
    }
}

impl SlotStore for MemorySlotStore {
    fn read_slot(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.slots.get(key).cloned())
    }

    fn write_slot(&mut self, key: &str, value: &str) -> StorageResult<()> {
        if let Some(reason) = self.fail_next_write.take() {
            return Err(StorageError::WriteRejected(reason));
        }
        if let Some(quota) = self.quota_bytes {
            if value.len() > quota {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    size: value.len(),
                    quota,
                });
            }
        }
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
