//! In-memory key-value store used by tests and ephemeral sessions.

use std::sync::{Arc, Mutex, PoisonError};

use hashbrown::HashMap;

use super::{KvStore, PersistError, PersistResult};

#[derive(Debug, Default)]
struct Inner {
    entries: HashMap<String, String>,
    writes: u64,
    fail_writes: bool,
}

/// Shared-handle in-memory [`KvStore`].
///
/// Clones share the same underlying map, so a test can keep a handle to
/// state owned by the runtime and inspect what was written.
#[derive(Debug, Clone, Default)]
pub struct MemoryKv {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryKv {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> u64 {
        self.lock().writes
    }

    /// Snapshot of the value under `key`.
    pub fn value(&self, key: &str) -> Option<String> {
        self.lock().entries.get(key).cloned()
    }

    /// When enabled, subsequent writes fail with a storage error.
    pub fn fail_writes(&self, fail: bool) {
        self.lock().fail_writes = fail;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl KvStore for MemoryKv {
    fn get(&self, key: &str) -> PersistResult<Option<String>> {
        Ok(self.lock().entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> PersistResult<()> {
        let mut inner = self.lock();
        if inner.fail_writes {
            return Err(PersistError::Message(
                "simulated storage failure".to_string(),
            ));
        }
        inner.entries.insert(key.to_string(), value.to_string());
        inner.writes += 1;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> PersistResult<()> {
        let mut inner = self.lock();
        if inner.fail_writes {
            return Err(PersistError::Message(
                "simulated storage failure".to_string(),
            ));
        }
        inner.entries.remove(key);
        Ok(())
    }
}
