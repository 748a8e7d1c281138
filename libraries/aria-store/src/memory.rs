//! In-memory key-value backend

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use aria_core::{KeyValueStore, Result};

/// Non-durable [`KeyValueStore`] backed by a `HashMap`
///
/// Used by tests and by hosts that opt out of persistence.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, serde_json::Value>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| aria_core::AriaError::persistence("memory store poisoned"))?;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: serde_json::Value) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| aria_core::AriaError::persistence("memory store poisoned"))?;
        entries.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| aria_core::AriaError::persistence("memory store poisoned"))?;
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn set_get_remove_round_trip() {
        let store = MemoryStore::new();

        assert!(store.get("missing").await.unwrap().is_none());

        store.set("k", json!(["a", "b"])).await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), Some(json!(["a", "b"])));

        store.set("k", json!(42)).await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), Some(json!(42)));

        store.remove("k").await.unwrap();
        assert!(store.get("k").await.unwrap().is_none());
    }
}
