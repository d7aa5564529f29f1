use super::{KeyValueStore, StoreResult};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

/// Process-local store used by tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: RefCell<BTreeMap<String, Vec<u8>>>,
    writes: Cell<usize>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful `set` calls since creation.
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }

    /// Sorted list of keys currently holding a value.
    pub fn keys(&self) -> Vec<String> {
        self.entries.borrow().keys().cloned().collect()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> StoreResult<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_vec());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}
