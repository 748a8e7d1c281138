//! Lyrics retrieval trait

use async_trait::async_trait;

use crate::error::Result;

/// Asynchronous provider of raw lyrics text
///
/// `Ok(None)` means the provider definitively has no lyrics for the
/// song; errors are reserved for transport or provider failures. The
/// returned text may be plain lines or LRC.
#[async_trait]
pub trait LyricsSource: Send + Sync {
    /// Fetch raw lyrics text for a song
    async fn fetch(&self, song_id: &str) -> Result<Option<String>>;
}
