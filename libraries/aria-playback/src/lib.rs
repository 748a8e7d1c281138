//! Aria Player - Queue and Transport
//!
//! Platform-agnostic playback primitives for the Aria Player engine:
//!
//! - Ordered/shufflable queue with canonical-order restoration
//! - Transport state machine over a single [`AudioOutput`] primitive
//! - Volume control (logarithmic, 0-100%, mute/unmute)
//!
//! # Architecture
//!
//! This crate never touches audio samples or the network. The audio
//! primitive is provided by the host through the [`AudioOutput`] trait;
//! the session facade (in `aria-session`) drives [`Queue`] and
//! [`Transport`] together.
//!
//! # Example
//!
//! ```rust
//! use aria_playback::Queue;
//! use aria_core::Song;
//!
//! let mut queue = Queue::new();
//! queue.set_queue(
//!     vec![
//!         Song::new("a", "First", "Artist"),
//!         Song::new("b", "Second", "Artist"),
//!     ],
//!     0,
//! );
//!
//! assert_eq!(queue.current_song().unwrap().id, "a");
//! assert_eq!(queue.next().unwrap().id, "b");
//! // Wraps around at the end (repeat-all semantics)
//! assert_eq!(queue.next().unwrap().id, "a");
//! ```

mod error;
mod output;
mod queue;
mod shuffle;
mod transport;
pub mod types;
mod volume;

pub use error::{PlaybackError, Result};
pub use output::{AudioOutput, OutputError};
pub use queue::Queue;
pub use transport::Transport;
pub use types::{PlayOrder, TransportState};
pub use volume::Volume;
