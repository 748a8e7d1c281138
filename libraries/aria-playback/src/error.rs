//! Error types for queue and transport control

use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// No song is currently loaded
    #[error("No song loaded")]
    NoSongLoaded,

    /// Queue is empty
    #[error("Queue is empty")]
    QueueEmpty,

    /// Index out of bounds
    #[error("Index out of bounds: {0}")]
    IndexOutOfBounds(usize),

    /// The audio source for a song failed to load or play
    #[error("Audio source failed for song {song_id}: {message}")]
    Source {
        /// Id of the song whose source failed
        song_id: String,
        /// Underlying failure description
        message: String,
    },
}

impl PlaybackError {
    /// Create a source error attributed to a song
    pub fn source(song_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Source {
            song_id: song_id.into(),
            message: message.into(),
        }
    }
}

impl From<PlaybackError> for aria_core::AriaError {
    fn from(err: PlaybackError) -> Self {
        match err {
            PlaybackError::Source { song_id, message } => {
                aria_core::AriaError::playback(song_id, message)
            }
            other => aria_core::AriaError::Other(other.to_string()),
        }
    }
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
