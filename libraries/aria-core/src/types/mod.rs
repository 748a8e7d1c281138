//! Domain types shared across the engine

mod playlist;
mod song;

pub use playlist::Playlist;
pub use song::Song;
