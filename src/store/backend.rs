use std::collections::HashMap;
use std::sync::RwLock;

use anyhow::Result;

/// Key-value storage boundary the conversation store writes through.
///
/// Shaped like browser extension storage: string keys, JSON string values,
/// best effort. Real backends live outside this crate; [`MemoryBackend`]
/// covers tests and embedding.
pub trait StorageBackend {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
    fn keys(&self) -> Result<Vec<String>>;
}

/// In-memory backend backed by a plain map.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .write()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.write().unwrap().remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        let mut keys: Vec<String> = self.entries.read().unwrap().keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}
