//! In-memory content store.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value as JsonValue;
use tokio::sync::RwLock;

/// Process-local key-value map.
///
/// Clones share the same map. Contents are lost when the process exits.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, JsonValue>>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the value stored under `key`.
    pub async fn get(&self, key: &str) -> Option<JsonValue> {
        self.entries.read().await.get(key).cloned()
    }

    /// Replace the value stored under `key`.
    pub async fn set(&self, key: &str, value: JsonValue) {
        self.entries.write().await.insert(key.to_owned(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_absent_key() {
        let store = MemoryStore::new();
        assert!(store.get("missing").await.is_none());
    }

    #[tokio::test]
    async fn test_overwrite_is_wholesale() {
        let store = MemoryStore::new();
        store
            .set("k", serde_json::json!({ "a": 1, "b": 2 }))
            .await;
        store.set("k", serde_json::json!({ "c": 3 })).await;

        assert_eq!(store.get("k").await, Some(serde_json::json!({ "c": 3 })));
    }

    #[tokio::test]
    async fn test_clones_share_entries() {
        let store = MemoryStore::new();
        let other = store.clone();
        store.set("k", serde_json::json!("v")).await;
        assert_eq!(other.get("k").await, Some(serde_json::json!("v")));
    }
}
