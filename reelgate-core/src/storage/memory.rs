use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use super::{KeyValueStore, StorageError, validate_key};

/// In-process store; clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: Arc<Mutex<HashMap<String, String>>>,
    writes: Arc<Mutex<usize>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with one value.
    pub fn with_value(key: &str, value: impl Into<String>) -> Self {
        let store = Self::new();
        lock(&store.values).insert(key.to_string(), value.into());
        store
    }

    /// Current value under `key`, bypassing the async interface.
    pub fn snapshot(&self, key: &str) -> Option<String> {
        lock(&self.values).get(key).cloned()
    }

    /// Number of successful `set` calls so far.
    pub fn write_count(&self) -> usize {
        *lock(&self.writes)
    }
}

// A panic while holding the lock cannot leave the map half-updated.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        validate_key(key)?;
        Ok(lock(&self.values).get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        lock(&self.values).insert(key.to_string(), value.to_string());
        *lock(&self.writes) += 1;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        lock(&self.values).remove(key);
        Ok(())
    }
}
