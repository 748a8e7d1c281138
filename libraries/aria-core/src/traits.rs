//! External collaborator traits
//!
//! The engine consumes these through narrow interfaces; their internals
//! are irrelevant to engine correctness.

use crate::error::Result;
use crate::types::Song;
use async_trait::async_trait;

/// Ranked song search backend
///
/// Page-level concern: the engine itself never calls this, but its
/// favorites/recently-played model is shaped to interoperate with
/// results returned here, since there is no song-by-id endpoint.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Search for songs matching `query`, best matches first
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Song>>;
}

/// Out-of-band download/export service
///
/// Fire-and-forget from the engine's perspective: errors are surfaced
/// to the user but never retried automatically.
#[async_trait]
pub trait DownloadService: Send + Sync {
    /// Trigger an export/save of `song`
    async fn download(&self, song: &Song) -> Result<()>;
}
