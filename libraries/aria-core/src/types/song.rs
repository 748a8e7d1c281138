//! Song domain type

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// An immutable song record
///
/// Identity is `id` alone: two songs with equal ids are the same track
/// even if the other metadata differs between fetches. Duration is
/// unknown until the audio primitive resolves it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    /// Unique song identifier
    pub id: String,

    /// Song title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Album name
    pub album: String,

    /// Cover art URL
    pub cover_art_url: String,

    /// Audio stream URL
    pub audio_url: String,

    /// Track duration, once resolved from the audio primitive
    #[serde(default)]
    pub duration: Option<Duration>,
}

impl Song {
    /// Create a song with empty album/URL fields
    pub fn new(id: impl Into<String>, title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: artist.into(),
            album: String::new(),
            cover_art_url: String::new(),
            audio_url: String::new(),
            duration: None,
        }
    }

    /// Check identity against another song (by id)
    pub fn same_track(&self, other: &Song) -> bool {
        self.id == other.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_is_id_only() {
        let a = Song::new("s1", "Title A", "Artist A");
        let mut b = Song::new("s1", "Title B", "Artist B");
        b.duration = Some(Duration::from_secs(200));

        assert!(a.same_track(&b));
        assert_ne!(a, b);
    }

    #[test]
    fn serializes_camel_case() {
        let song = Song::new("s1", "Title", "Artist");
        let json = serde_json::to_value(&song).unwrap();
        assert!(json.get("coverArtUrl").is_some());
        assert!(json.get("audioUrl").is_some());
    }
}
