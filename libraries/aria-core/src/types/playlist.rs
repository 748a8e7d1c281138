//! Playlist domain type

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user playlist
///
/// Holds song ids in user-significant order; duplicates are allowed and
/// entries are never pruned automatically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    /// Unique playlist identifier
    pub id: String,

    /// Playlist name
    pub name: String,

    /// Ordered song ids (duplicates allowed)
    #[serde(default)]
    pub song_ids: Vec<String>,
}

impl Playlist {
    /// Create a new empty playlist with a freshly generated id
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            song_ids: Vec::new(),
        }
    }

    /// Create a playlist with a specific id (for loading from persistence)
    pub fn with_id(id: impl Into<String>, name: impl Into<String>, song_ids: Vec<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            song_ids,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_playlist_is_empty_with_unique_id() {
        let a = Playlist::new("Road Trip");
        let b = Playlist::new("Road Trip");

        assert!(a.song_ids.is_empty());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn duplicates_allowed() {
        let mut playlist = Playlist::new("Mix");
        playlist.song_ids.push("s1".to_string());
        playlist.song_ids.push("s1".to_string());
        assert_eq!(playlist.song_ids.len(), 2);
    }
}
