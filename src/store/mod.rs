//! Conversation persistence wrapper.
//!
//! Thin pass-through to a key-value [`StorageBackend`] with an owned
//! in-memory cache and a bounded retry on backend failures. The cache is an
//! explicit field, never module-global state.

mod backend;

pub use backend::{MemoryBackend, StorageBackend};

use std::collections::HashMap;
use std::sync::RwLock;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use log::warn;

use crate::models::Conversation;

const KEY_PREFIX: &str = "conversation:";
const MAX_ATTEMPTS: u32 = 3;
const RETRY_BACKOFF: Duration = Duration::from_millis(50);

pub struct ConversationStore<B: StorageBackend> {
    backend: B,
    cache: RwLock<HashMap<String, Conversation>>,
}

impl<B: StorageBackend> ConversationStore<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn save(&self, conversation: &Conversation) -> Result<()> {
        let key = storage_key(&conversation.id);
        let serialized = serde_json::to_string(conversation)
            .with_context(|| format!("failed to serialize conversation {}", conversation.id))?;

        with_retry(&format!("save {key}"), || {
            self.backend.set(&key, &serialized)
        })?;

        self.cache
            .write()
            .unwrap()
            .insert(conversation.id.clone(), conversation.clone());
        Ok(())
    }

    pub fn load(&self, id: &str) -> Result<Option<Conversation>> {
        if let Some(cached) = self.cache.read().unwrap().get(id) {
            return Ok(Some(cached.clone()));
        }

        let key = storage_key(id);
        let Some(serialized) = with_retry(&format!("load {key}"), || self.backend.get(&key))?
        else {
            return Ok(None);
        };

        let conversation: Conversation = serde_json::from_str(&serialized)
            .with_context(|| format!("corrupt conversation record under {key}"))?;
        self.cache
            .write()
            .unwrap()
            .insert(id.to_string(), conversation.clone());
        Ok(Some(conversation))
    }

    pub fn list(&self) -> Result<Vec<Conversation>> {
        let keys = with_retry("list keys", || self.backend.keys())?;
        let mut conversations = Vec::new();
        for key in keys {
            if let Some(id) = key.strip_prefix(KEY_PREFIX) {
                if let Some(conversation) = self.load(id)? {
                    conversations.push(conversation);
                }
            }
        }
        Ok(conversations)
    }

    pub fn delete(&self, id: &str) -> Result<()> {
        let key = storage_key(id);
        with_retry(&format!("delete {key}"), || self.backend.remove(&key))?;
        self.cache.write().unwrap().remove(id);
        Ok(())
    }
}

fn storage_key(id: &str) -> String {
    format!("{KEY_PREFIX}{id}")
}

fn with_retry<T>(what: &str, mut op: impl FnMut() -> Result<T>) -> Result<T> {
    let mut attempt = 1;
    loop {
        match op() {
            Ok(value) => return Ok(value),
            Err(err) if attempt < MAX_ATTEMPTS => {
                warn!("storage {what} failed (attempt {attempt}/{MAX_ATTEMPTS}): {err:#}");
                attempt += 1;
                thread::sleep(RETRY_BACKOFF);
            }
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("storage {what} failed after {MAX_ATTEMPTS} attempts"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Message;
    use anyhow::anyhow;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Backend that fails a fixed number of times before recovering.
    #[derive(Default)]
    struct FlakyBackend {
        inner: MemoryBackend,
        failures_left: AtomicU32,
        calls: AtomicU32,
    }

    impl FlakyBackend {
        fn failing(times: u32) -> Self {
            Self {
                failures_left: AtomicU32::new(times),
                ..Self::default()
            }
        }

        fn maybe_fail(&self) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self
                .failures_left
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok()
            {
                return Err(anyhow!("backend unavailable"));
            }
            Ok(())
        }
    }

    impl StorageBackend for FlakyBackend {
        fn get(&self, key: &str) -> Result<Option<String>> {
            self.maybe_fail()?;
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<()> {
            self.maybe_fail()?;
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<()> {
            self.maybe_fail()?;
            self.inner.remove(key)
        }

        fn keys(&self) -> Result<Vec<String>> {
            self.maybe_fail()?;
            self.inner.keys()
        }
    }

    fn sample_conversation() -> Conversation {
        Conversation::new(
            "standup",
            vec![Message {
                content: "what is the plan?".to_string(),
                author: Some("alice".to_string()),
                ..Message::default()
            }],
        )
    }

    #[test]
    fn save_load_round_trip() {
        let store = ConversationStore::new(MemoryBackend::new());
        let conversation = sample_conversation();
        store.save(&conversation).unwrap();

        let loaded = store.load(&conversation.id).unwrap().unwrap();
        assert_eq!(loaded.title, "standup");
        assert_eq!(loaded.messages.len(), 1);
        assert!(store.load("missing").unwrap().is_none());
    }

    #[test]
    fn list_returns_only_conversation_keys() {
        let backend = MemoryBackend::new();
        backend.set("settings:theme", "\"dark\"").unwrap();
        let store = ConversationStore::new(backend);
        store.save(&sample_conversation()).unwrap();
        store.save(&sample_conversation()).unwrap();

        assert_eq!(store.list().unwrap().len(), 2);
    }

    #[test]
    fn delete_evicts_cache_and_backend() {
        let store = ConversationStore::new(MemoryBackend::new());
        let conversation = sample_conversation();
        store.save(&conversation).unwrap();
        store.delete(&conversation.id).unwrap();
        assert!(store.load(&conversation.id).unwrap().is_none());
    }

    #[test]
    fn transient_backend_failures_are_retried() {
        let store = ConversationStore::new(FlakyBackend::failing(2));
        let conversation = sample_conversation();
        store.save(&conversation).unwrap();
        assert_eq!(store.backend.calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn persistent_backend_failures_surface() {
        let store = ConversationStore::new(FlakyBackend::failing(10));
        let err = store.save(&sample_conversation()).unwrap_err();
        assert!(err.to_string().contains("after 3 attempts"));
    }

    #[test]
    fn loads_are_served_from_cache_after_save() {
        let store = ConversationStore::new(FlakyBackend::failing(0));
        let conversation = sample_conversation();
        store.save(&conversation).unwrap();
        let calls_after_save = store.backend.calls.load(Ordering::SeqCst);

        store.load(&conversation.id).unwrap();
        assert_eq!(store.backend.calls.load(Ordering::SeqCst), calls_after_save);
    }
}
