//! In-memory session store

use std::collections::HashMap;

use parking_lot::RwLock;

use super::traits::{SessionStore, StoreResult};

/// Session store backed by a map in process memory
///
/// Values are lost when the store is dropped, which matches the lifetime of
/// a browser tab's session storage for a single dashboard run.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with initial values
    pub fn with_values(initial: HashMap<String, String>) -> Self {
        Self {
            values: RwLock::new(initial),
        }
    }

    pub fn len(&self) -> usize {
        self.values.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.values.write().clear();
    }
}

impl SessionStore for MemorySessionStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.values.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.values.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.values.write().remove(key);
        Ok(())
    }
}
