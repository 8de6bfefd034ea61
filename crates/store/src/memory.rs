//! In-memory secure store backed by a `HashMap` behind a `Mutex`.

use async_trait::async_trait;
use fedikit_types::{SecureStore, traits::Result};
use std::collections::HashMap;
use std::sync::Mutex;

/// An in-memory [`SecureStore`] implementation for testing and ephemeral use.
pub struct MemorySecureStore {
    /// Key-to-blob map.
    data: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemorySecureStore {
    /// Creates a new empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            data: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for MemorySecureStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SecureStore for MemorySecureStore {
    /// Loads the blob stored under `key`, if present.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.data.lock().unwrap().get(key).cloned())
    }

    /// Saves (or overwrites) the blob under `key`.
    async fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        self.data
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_vec());
        Ok(())
    }

    /// Removes the blob stored under `key`.
    async fn remove(&self, key: &str) -> Result<()> {
        self.data.lock().unwrap().remove(key);
        Ok(())
    }
}
