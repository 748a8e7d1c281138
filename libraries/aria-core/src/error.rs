//! Core error types for Aria Player

use thiserror::Error;

/// Result type alias using `AriaError`
pub type Result<T> = std::result::Result<T, AriaError>;

/// Core error type for the Aria Player engine
#[derive(Error, Debug)]
pub enum AriaError {
    /// User-supplied name was blank after trimming
    #[error("Invalid name: {0:?}")]
    InvalidName(String),

    /// Referenced entity does not exist
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Kind of entity (e.g. "playlist")
        entity: String,
        /// Identifier that failed to resolve
        id: String,
    },

    /// Audio source failed to load or play
    #[error("Playback failed for song {song_id}: {message}")]
    Playback {
        /// Id of the song that could not be played
        song_id: String,
        /// Underlying failure description
        message: String,
    },

    /// Persistence surface unavailable or returned malformed data
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl AriaError {
    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Create a playback error for a specific song
    pub fn playback(song_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Playback {
            song_id: song_id.into(),
            message: message.into(),
        }
    }

    /// Create a persistence error
    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }
}
