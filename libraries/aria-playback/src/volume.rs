//! Volume control with logarithmic level-to-gain mapping

use serde::{Deserialize, Serialize};

/// Volume state: a 0-100 level plus an independent mute flag
///
/// The level is preserved across mute/unmute, so unmuting restores the
/// exact prior loudness.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Volume {
    level: u8,
    muted: bool,
}

impl Volume {
    /// Create a volume at the given level, unmuted
    pub fn new(level: u8) -> Self {
        Self {
            level: level.min(100),
            muted: false,
        }
    }

    /// Current level, 0-100
    ///
    /// Reports the stored level even while muted.
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Whether output is muted
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Set the level, clamping to 0-100
    ///
    /// Setting a level while muted unmutes, matching the expectation
    /// that dragging a volume slider produces sound.
    pub fn set_level(&mut self, level: u8) {
        self.level = level.min(100);
        self.muted = false;
    }

    /// Toggle mute without losing the stored level
    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    /// Linear gain factor for the current state
    ///
    /// Maps the 0-100 level onto a -60..0 dB range so the slider feels
    /// perceptually even; level 0 and mute are both full silence.
    pub fn gain(&self) -> f32 {
        if self.muted || self.level == 0 {
            return 0.0;
        }
        let db = (f32::from(self.level) - 100.0) * 0.6;
        10.0_f32.powf(db / 20.0)
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(70)
    }
}
