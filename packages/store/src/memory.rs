use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::StoreError;
use crate::kv::KeyValueStore;

/// In-memory KeyValueStore for testing and as a fallback backend.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All keys currently holding a value, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries().keys().cloned().collect();
        keys.sort();
        keys
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, String>> {
        // A poisoned map still holds consistent strings; keep serving it.
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries().get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) {
        self.entries().insert(key.to_string(), value);
    }

    async fn remove(&self, key: &str) {
        self.entries().remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_remove() {
        let store = MemoryStore::new();
        assert!(store.get("news").await.unwrap().is_none());

        store.set("news", "[]".to_string()).await;
        assert_eq!(store.get("news").await.unwrap().as_deref(), Some("[]"));

        store.remove("news").await;
        assert!(store.get("news").await.unwrap().is_none());
        assert!(store.keys().is_empty());
    }

    #[tokio::test]
    async fn test_clones_share_entries() {
        let store = MemoryStore::new();
        let other = store.clone();

        store.set("incidents", "[1]".to_string()).await;
        assert_eq!(other.get("incidents").await.unwrap().as_deref(), Some("[1]"));

        other.set("news", "[]".to_string()).await;
        assert_eq!(store.keys(), vec!["incidents".to_string(), "news".to_string()]);
    }
}
