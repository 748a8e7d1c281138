//! Aria Player - Lyrics
//!
//! Lyrics retrieval and position synchronization. Raw lyrics text is
//! parsed into lines ([`parse_lines`]); [`Lyrics`] picks a sync policy
//! from what the text carries (LRC timestamps when present, even time
//! slices otherwise) and maps a playhead position to the active line.
//!
//! Retrieval is abstracted behind [`LyricsSource`] so hosts can plug in
//! a web API, local files, or embedded tags.

mod error;
mod parse;
mod source;
mod state;
mod sync;

pub use error::{LyricsError, Result};
pub use parse::{parse_lines, LyricLine};
pub use source::LyricsSource;
pub use state::LyricsState;
pub use sync::{Lyrics, SyncPolicy};
