//! Position-to-line synchronization policies

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::parse::{parse_lines, LyricLine};

/// How playhead position maps to an active lyrics line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncPolicy {
    /// Split the song duration into equal slices, one per line
    ///
    /// Fallback for plain lyrics text with no timing information.
    EvenSplit,

    /// Follow per-line LRC timestamps
    Timestamped,
}

/// Parsed lyrics with a chosen sync policy
#[derive(Debug, Clone, PartialEq)]
pub struct Lyrics {
    lines: Vec<LyricLine>,
    policy: SyncPolicy,
}

impl Lyrics {
    /// Parse raw lyrics text, auto-detecting the sync policy
    ///
    /// If any line carries an LRC timestamp the timestamped lines are
    /// kept (sorted by start time) and untimestamped stragglers are
    /// discarded; otherwise all lines are kept under even-split.
    pub fn parse(raw: &str) -> Self {
        let mut lines = parse_lines(raw);

        if lines.iter().any(|l| l.timestamp.is_some()) {
            lines.retain(|l| l.timestamp.is_some());
            lines.sort_by_key(|l| l.timestamp);
            Self {
                lines,
                policy: SyncPolicy::Timestamped,
            }
        } else {
            Self {
                lines,
                policy: SyncPolicy::EvenSplit,
            }
        }
    }

    /// The parsed lines, in display order
    pub fn lines(&self) -> &[LyricLine] {
        &self.lines
    }

    /// The detected sync policy
    pub fn policy(&self) -> SyncPolicy {
        self.policy
    }

    /// Whether there is anything to display
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Index of the line active at `position`
    ///
    /// Timestamped: the last line whose start time is at or before the
    /// position; `None` before the first line starts. Even-split: the
    /// slice containing the position, clamped to the last line; `None`
    /// when the song duration is unknown or zero.
    pub fn active_line(&self, position: Duration, duration: Option<Duration>) -> Option<usize> {
        if self.lines.is_empty() {
            return None;
        }

        match self.policy {
            SyncPolicy::Timestamped => {
                let mut active = None;
                for (i, line) in self.lines.iter().enumerate() {
                    match line.timestamp {
                        Some(start) if start <= position => active = Some(i),
                        _ => break,
                    }
                }
                active
            }
            SyncPolicy::EvenSplit => {
                let duration = duration.filter(|d| !d.is_zero())?;
                let slice = duration.as_secs_f64() / self.lines.len() as f64;
                let index = (position.as_secs_f64() / slice) as usize;
                Some(index.min(self.lines.len() - 1))
            }
        }
    }
}
