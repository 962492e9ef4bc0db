//! In-memory key-value store.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::Result;
use crate::error::StorageError;
use crate::traits::KeyValueStore;

/// A process-local [`KeyValueStore`].
///
/// Used in tests and for sessions that should not outlive the process.
/// Writes or removals for chosen keys can be made to fail, to exercise
/// storage error paths.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
    failing_writes: Mutex<HashSet<String>>,
    failing_removes: Mutex<HashSet<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every later write of `key` fail.
    pub fn fail_writes_for(&self, key: &str) {
        self.failing_writes.lock().insert(key.to_string());
    }

    /// Make every later removal of `key` fail.
    pub fn fail_removes_for(&self, key: &str) {
        self.failing_removes.lock().insert(key.to_string());
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn injected(set: &Mutex<HashSet<String>>, key: &str, op: &str) -> Result<()> {
        if set.lock().contains(key) {
            return Err(StorageError::Io {
                key: key.to_string(),
                message: format!("{} rejected", op),
            }
            .into());
        }
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn write(&self, key: &str, value: &str) -> Result<()> {
        Self::injected(&self.failing_writes, key, "write")?;
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        Self::injected(&self.failing_removes, key, "remove")?;
        self.entries.lock().remove(key);
        Ok(())
    }
}
