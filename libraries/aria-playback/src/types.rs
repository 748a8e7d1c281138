//! Core types for queue and transport control

use serde::{Deserialize, Serialize};

/// Play order for the queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayOrder {
    /// Canonical order
    #[default]
    Sequential,

    /// Derived random permutation of the canonical order
    Shuffled,
}

/// Transport state machine
///
/// `Idle -> Loading -> Ready <-> Playing <-> Paused -> Ended`; `Ended`
/// is consumed by the session facade to advance the queue, and any
/// state returns to `Idle` on explicit stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportState {
    /// No source bound
    #[default]
    Idle,

    /// Binding a new source
    Loading,

    /// Source bound, not yet started
    Ready,

    /// Audio running
    Playing,

    /// Paused mid-song
    Paused,

    /// Source reached its natural end
    Ended,
}

impl TransportState {
    /// Whether audio is audibly running
    pub fn is_playing(self) -> bool {
        self == Self::Playing
    }
}
