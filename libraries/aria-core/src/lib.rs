//! Aria Player Core
//!
//! Platform-agnostic core types, traits, and error handling for the Aria
//! Player engine.
//!
//! This crate defines:
//! - **Domain Types**: [`Song`], [`Playlist`]
//! - **Persistence**: the [`KeyValueStore`] trait (namespaced key -> JSON)
//! - **Collaborators**: [`SearchProvider`], [`DownloadService`]
//! - **Error Handling**: unified [`AriaError`] and [`Result`] types
//!
//! # Example
//!
//! ```rust
//! use aria_core::types::{Song, Playlist};
//!
//! let song = Song::new("s1", "Night Drive", "The Waveforms");
//! let playlist = Playlist::new("Road Trip");
//! assert!(playlist.song_ids.is_empty());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod storage;
pub mod traits;
pub mod types;

pub use error::{AriaError, Result};
pub use storage::KeyValueStore;
pub use traits::{DownloadService, SearchProvider};
pub use types::{Playlist, Song};
