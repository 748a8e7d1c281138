//! JSON-file key-value backend

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::warn;

use aria_core::{KeyValueStore, Result};

/// Durable [`KeyValueStore`] persisting all keys to one JSON file
///
/// Every write rewrites the file through a sibling temp file and an
/// atomic rename, so a crash mid-write never corrupts prior state.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, serde_json::Value>>,
}

impl JsonFileStore {
    /// Open a store at `path`, loading existing contents
    ///
    /// A missing file starts empty. An unreadable or malformed file is
    /// treated as empty with a warning rather than failing the whole
    /// session; later writes recover the file.
    pub async fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match tokio::fs::read(&path).await {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(map) => map,
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "store file malformed, starting empty");
                    HashMap::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "store file unreadable, starting empty");
                HashMap::new()
            }
        };

        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn write_out(&self, entries: &HashMap<String, serde_json::Value>) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(entries)?;
        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: serde_json::Value) -> Result<()> {
        let mut entries = self.entries.lock().await;
        entries.insert(key.to_string(), value);
        self.write_out(&entries).await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.lock().await;
        entries.remove(key);
        self.write_out(&entries).await
    }

    async fn flush(&self) -> Result<()> {
        let entries = self.entries.lock().await;
        self.write_out(&entries).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("library.json");

        let store = JsonFileStore::open(&path).await;
        store.set("aria.favorites", json!(["s1", "s2"])).await.unwrap();
        drop(store);

        let store = JsonFileStore::open(&path).await;
        assert_eq!(
            store.get("aria.favorites").await.unwrap(),
            Some(json!(["s1", "s2"]))
        );
    }

    #[tokio::test]
    async fn missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().join("new.json")).await;
        assert!(store.get("anything").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn malformed_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        tokio::fs::write(&path, b"{not json").await.unwrap();

        let store = JsonFileStore::open(&path).await;
        assert!(store.get("aria.favorites").await.unwrap().is_none());

        // Writes recover the file
        store.set("k", json!(1)).await.unwrap();
        let store = JsonFileStore::open(&path).await;
        assert_eq!(store.get("k").await.unwrap(), Some(json!(1)));
    }

    #[tokio::test]
    async fn unreadable_path_starts_empty() {
        let dir = tempfile::tempdir().unwrap();

        // A directory fails to read as a file, which must not be fatal
        let store = JsonFileStore::open(dir.path()).await;
        assert!(store.get("aria.favorites").await.unwrap().is_none());
    }
}
