//! Serializable view of the whole player state

use std::time::Duration;

use serde::{Deserialize, Serialize};

use aria_core::Song;
use aria_lyrics::LyricsState;

/// Point-in-time view of the player, published after every change
///
/// Invariant: `is_playing` implies `current_song` is present.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSnapshot {
    /// The song bound to the transport, if any
    pub current_song: Option<Song>,

    /// Whether the current song is favorited
    pub is_current_favorite: bool,

    /// Whether audio is audibly running
    pub is_playing: bool,

    /// Playhead position within the current song
    pub position: Duration,

    /// Duration of the current song, once known
    pub duration: Option<Duration>,

    /// Volume level, 0-100 (preserved while muted)
    pub volume: u8,

    /// Whether output is muted
    pub is_muted: bool,

    /// Whether the queue is shuffled
    pub is_shuffled: bool,

    /// The queue in effective play order
    pub queue: Vec<Song>,

    /// Position of the current song within `queue`
    pub queue_index: Option<usize>,

    /// The song that plays after the current one
    pub up_next: Option<Song>,

    /// Whether the full-screen player is open
    pub is_expanded: bool,

    /// Whether the lyrics panel is shown
    pub show_lyrics: bool,

    /// Lyrics for the current song
    pub lyrics: LyricsState,
}
