//! Transport state machine over an [`AudioOutput`]

use std::time::Duration;

use tracing::{debug, warn};

use aria_core::Song;

use crate::error::{PlaybackError, Result};
use crate::output::AudioOutput;
use crate::types::TransportState;
use crate::volume::Volume;

/// Polls to wait before assuming an unobserved seek has applied
const SEEK_POLL_BUDGET: u8 = 8;

/// A seek issued to the output but not yet observed as applied
#[derive(Debug, Clone, Copy)]
struct PendingSeek {
    target: Duration,

    /// Output playhead when the seek was issued
    origin: Duration,

    polls_left: u8,
}

/// Drives one [`AudioOutput`] through load/play/pause/seek
///
/// The transport owns the volume state and the currently bound song.
/// It is polled by the session tick: [`Transport::poll`] settles pending
/// seeks and detects natural end-of-song.
pub struct Transport {
    output: Box<dyn AudioOutput>,
    state: TransportState,
    volume: Volume,
    current_song: Option<Song>,

    /// Seek still being applied by the output
    ///
    /// While set, [`Transport::position`] reports the target instead of
    /// the output's playhead, so a seek reads back immediately even when
    /// the backend applies it asynchronously.
    pending_seek: Option<PendingSeek>,

    /// High-water mark of reported positions within the current track
    ///
    /// Backends may tick backwards by a frame; reported progress while
    /// playing never does. Reset on load and seek.
    high_water: std::cell::Cell<Duration>,
}

impl Transport {
    /// Create a transport over the given output
    pub fn new(output: Box<dyn AudioOutput>) -> Self {
        let mut transport = Self {
            output,
            state: TransportState::Idle,
            volume: Volume::default(),
            current_song: None,
            pending_seek: None,
            high_water: std::cell::Cell::new(Duration::ZERO),
        };
        transport.output.set_gain(transport.volume.gain());
        transport
    }

    /// Bind a song's audio source, replacing any current one
    ///
    /// Leaves the transport in `Ready`; the caller decides whether to
    /// start playback. On failure the transport falls back to `Idle`
    /// with no song bound.
    pub fn load(&mut self, song: Song) -> Result<()> {
        self.output.stop();
        self.state = TransportState::Loading;
        self.pending_seek = None;
        self.high_water.set(Duration::ZERO);

        if let Err(err) = self.output.load(&song.audio_url) {
            warn!(song_id = %song.id, error = %err, "failed to bind audio source");
            self.state = TransportState::Idle;
            self.current_song = None;
            return Err(PlaybackError::source(&song.id, err.to_string()));
        }

        debug!(song_id = %song.id, title = %song.title, "audio source bound");
        self.current_song = Some(song);
        self.state = TransportState::Ready;
        Ok(())
    }

    /// Start or resume playback
    pub fn play(&mut self) -> Result<()> {
        match self.state {
            TransportState::Ready | TransportState::Paused => {
                self.output.play();
                self.state = TransportState::Playing;
                Ok(())
            }
            TransportState::Playing => Ok(()),
            TransportState::Ended => {
                // Replaying a finished song restarts it from the top
                self.output.seek(Duration::ZERO);
                self.pending_seek = None;
                self.high_water.set(Duration::ZERO);
                self.output.play();
                self.state = TransportState::Playing;
                Ok(())
            }
            TransportState::Idle | TransportState::Loading => Err(PlaybackError::NoSongLoaded),
        }
    }

    /// Pause playback, retaining position
    ///
    /// A no-op in every state but `Playing`.
    pub fn pause(&mut self) {
        if self.state == TransportState::Playing {
            self.output.pause();
            self.state = TransportState::Paused;
        }
    }

    /// Stop playback and unbind the current song
    pub fn stop(&mut self) {
        self.output.stop();
        self.state = TransportState::Idle;
        self.current_song = None;
        self.pending_seek = None;
        self.high_water.set(Duration::ZERO);
    }

    /// Move the playhead, clamping to the song duration when known
    pub fn seek(&mut self, position: Duration) -> Result<()> {
        if self.current_song.is_none() {
            return Err(PlaybackError::NoSongLoaded);
        }

        let target = match self.duration() {
            Some(duration) => position.min(duration),
            None => position,
        };

        let origin = self.output.position();
        self.output.seek(target);
        self.pending_seek = Some(PendingSeek {
            target,
            origin,
            polls_left: SEEK_POLL_BUDGET,
        });
        self.high_water.set(target);

        // Seeking a finished song revives it in a resumable state
        if self.state == TransportState::Ended {
            self.state = TransportState::Paused;
        }
        Ok(())
    }

    /// Settle pending seeks and detect end-of-song
    ///
    /// Returns `true` exactly when the bound song has just played to its
    /// natural end; the caller advances the queue in response.
    pub fn poll(&mut self) -> bool {
        if let Some(mut pending) = self.pending_seek {
            let pos = self.output.position();
            // Natural progress only moves forward, so a forward seek has
            // applied once the playhead reaches the target and a backward
            // seek once it drops below its origin
            let applied = if pending.target >= pending.origin {
                pos >= pending.target
            } else {
                pos < pending.origin
            };
            if applied || pending.polls_left == 0 {
                self.pending_seek = None;
            } else {
                pending.polls_left -= 1;
                self.pending_seek = Some(pending);
            }
        }

        if self.state == TransportState::Playing && self.output.is_finished() {
            debug!("song reached natural end");
            self.state = TransportState::Ended;
            return true;
        }
        false
    }

    /// Current playhead position
    ///
    /// Reports a pending seek target until the output catches up, and
    /// never moves backwards within a track while playing.
    pub fn position(&self) -> Duration {
        if let Some(pending) = self.pending_seek {
            return pending.target;
        }
        if self.state == TransportState::Playing {
            let position = self.output.position().max(self.high_water.get());
            self.high_water.set(position);
            position
        } else {
            self.output.position()
        }
    }

    /// Duration of the bound song
    ///
    /// Prefers what the output reports over the song's metadata.
    pub fn duration(&self) -> Option<Duration> {
        self.output
            .duration()
            .or_else(|| self.current_song.as_ref().and_then(|s| s.duration))
    }

    /// Set the volume level (0-100), unmuting if muted
    pub fn set_volume(&mut self, level: u8) {
        self.volume.set_level(level);
        self.output.set_gain(self.volume.gain());
    }

    /// Toggle mute without losing the stored level
    pub fn toggle_mute(&mut self) {
        self.volume.toggle_mute();
        self.output.set_gain(self.volume.gain());
    }

    /// Current volume state
    pub fn volume(&self) -> Volume {
        self.volume
    }

    /// Current transport state
    pub fn state(&self) -> TransportState {
        self.state
    }

    /// The currently bound song
    pub fn current_song(&self) -> Option<&Song> {
        self.current_song.as_ref()
    }
}

impl std::fmt::Debug for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transport")
            .field("state", &self.state)
            .field("volume", &self.volume)
            .field("current_song", &self.current_song.as_ref().map(|s| &s.id))
            .field("pending_seek", &self.pending_seek)
            .finish_non_exhaustive()
    }
}
