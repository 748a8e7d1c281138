//! Displayable lyrics state for the session snapshot

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::parse::LyricLine;
use crate::sync::Lyrics;

/// Lyrics as the UI sees them for the current song
///
/// Mirrors the fetch lifecycle: loading, unavailable (no lines), or
/// loaded with a position-tracked active line.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LyricsState {
    /// Display lines for the current song
    pub lines: Vec<LyricLine>,

    /// Index into `lines` of the active line, if any
    pub current_line_index: Option<usize>,

    /// Whether a fetch is in flight
    pub is_loading: bool,
}

impl LyricsState {
    /// State while a fetch is in flight
    pub fn loading() -> Self {
        Self {
            is_loading: true,
            ..Self::default()
        }
    }

    /// State for a song with no lyrics
    pub fn unavailable() -> Self {
        Self::default()
    }

    /// State for loaded lyrics at a playhead position
    pub fn at_position(lyrics: &Lyrics, position: Duration, duration: Option<Duration>) -> Self {
        Self {
            lines: lyrics.lines().to_vec(),
            current_line_index: lyrics.active_line(position, duration),
            is_loading: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle_states() {
        assert!(LyricsState::loading().is_loading);
        assert!(LyricsState::loading().lines.is_empty());

        let unavailable = LyricsState::unavailable();
        assert!(!unavailable.is_loading);
        assert_eq!(unavailable.current_line_index, None);
    }

    #[test]
    fn tracks_active_line() {
        let lyrics = Lyrics::parse("a\nb");
        let state = LyricsState::at_position(
            &lyrics,
            Duration::from_secs(15),
            Some(Duration::from_secs(20)),
        );

        assert_eq!(state.lines.len(), 2);
        assert_eq!(state.current_line_index, Some(1));
        assert!(!state.is_loading);
    }
}
