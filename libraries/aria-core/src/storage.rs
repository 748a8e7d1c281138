//! Persistence trait for the engine's key-value surface

use crate::error::Result;
use async_trait::async_trait;

/// Namespaced key -> JSON value persistence surface
///
/// This trait abstracts the durable store behind favorites, playlists,
/// recently-played history, and recent search terms. Implementations may
/// defer writes, but `flush` must make every prior `set` durable before
/// returning; the session facade flushes at teardown.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>>;

    /// Store `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: serde_json::Value) -> Result<()>;

    /// Remove the value stored under `key`
    async fn remove(&self, key: &str) -> Result<()>;

    /// Make all previous writes durable
    async fn flush(&self) -> Result<()> {
        Ok(())
    }
}
