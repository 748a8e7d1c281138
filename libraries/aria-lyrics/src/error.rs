//! Error types for lyrics retrieval

use thiserror::Error;

/// Lyrics retrieval errors
///
/// Parsing never fails (malformed input degrades to plain lines); only
/// the provider can error.
#[derive(Debug, Error)]
pub enum LyricsError {
    /// The provider failed to respond or returned garbage
    #[error("Lyrics provider error: {0}")]
    Provider(String),
}

impl LyricsError {
    /// Create a provider error
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider(message.into())
    }
}

impl From<LyricsError> for aria_core::AriaError {
    fn from(err: LyricsError) -> Self {
        aria_core::AriaError::Other(err.to_string())
    }
}

/// Result type for lyrics operations
pub type Result<T> = std::result::Result<T, LyricsError>;
