//! Host-provided audio output primitive

use std::error::Error;
use std::time::Duration;

/// Boxed error from an output backend
pub type OutputError = Box<dyn Error + Send + Sync>;

/// A single audio output slot driven by [`Transport`](crate::Transport)
///
/// Implementations wrap whatever the host platform plays audio with (a
/// media element, an OS audio session, a decoder pipeline). The
/// contract is a single bound source at a time:
///
/// - [`load`](AudioOutput::load) replaces the bound source and resets
///   position to zero without starting playback
/// - position/duration queries are cheap and callable at any time
/// - [`is_finished`](AudioOutput::is_finished) latches true once the
///   bound source plays to its natural end, until the next `load`
pub trait AudioOutput: Send {
    /// Bind a new source by URL, replacing any current one
    fn load(&mut self, url: &str) -> Result<(), OutputError>;

    /// Start or resume playback of the bound source
    fn play(&mut self);

    /// Pause playback, retaining position
    fn pause(&mut self);

    /// Stop playback and release the bound source
    fn stop(&mut self);

    /// Move the playhead of the bound source
    ///
    /// Backends may complete this asynchronously; until then
    /// [`position`](AudioOutput::position) may still report the old
    /// playhead. [`Transport`](crate::Transport) masks that window.
    fn seek(&mut self, position: Duration);

    /// Apply a linear gain factor (0.0 = silence, 1.0 = unity)
    fn set_gain(&mut self, gain: f32);

    /// Current playhead position of the bound source
    fn position(&self) -> Duration;

    /// Total duration of the bound source, if known yet
    fn duration(&self) -> Option<Duration>;

    /// Whether the bound source has played to its natural end
    fn is_finished(&self) -> bool;
}
