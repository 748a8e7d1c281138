//! Aria Player - Library Store
//!
//! User library state and its persistence: favorites, playlists,
//! recently-played history, and recent search terms.
//!
//! [`LibraryStore`] holds the in-memory state and writes through to a
//! [`KeyValueStore`](aria_core::KeyValueStore) on every mutation. Two
//! backends are provided: [`MemoryStore`] for tests and ephemeral
//! sessions, and [`JsonFileStore`] persisting to a single JSON file.

mod json_file;
mod library;
mod memory;

pub use json_file::JsonFileStore;
pub use library::{LibraryStore, RECENTLY_PLAYED_CAP, RECENT_SEARCHES_CAP};
pub use memory::MemoryStore;

/// Persistence keys used by [`LibraryStore`]
pub mod keys {
    /// Favorited song ids
    pub const FAVORITES: &str = "aria.favorites";
    /// User playlists
    pub const PLAYLISTS: &str = "aria.playlists";
    /// Recently played songs, most recent first
    pub const RECENTLY_PLAYED: &str = "aria.recently_played";
    /// Recent search terms, most recent first
    pub const RECENT_SEARCHES: &str = "aria.recent_searches";
}
