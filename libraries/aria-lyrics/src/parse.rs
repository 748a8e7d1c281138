//! Lyrics text parsing, with LRC timestamp detection

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// One display line of lyrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LyricLine {
    /// Line text, trimmed
    pub text: String,

    /// Start time, when the source carried an LRC timestamp
    #[serde(default)]
    pub timestamp: Option<Duration>,
}

/// Parse raw lyrics text into lines
///
/// Blank lines are dropped. Leading LRC tags (`[mm:ss.xx]`) become line
/// timestamps; a line with several tags yields one entry per tag. LRC
/// metadata tags (`[ar:..]`, `[ti:..]`, anything non-temporal) are
/// stripped, which leaves metadata-only lines blank and therefore
/// dropped. Plain text with no tags parses to untimestamped lines.
pub fn parse_lines(raw: &str) -> Vec<LyricLine> {
    let mut lines = Vec::new();

    for raw_line in raw.lines() {
        let mut rest = raw_line.trim();
        let mut stamps = Vec::new();

        while let Some(stripped) = rest.strip_prefix('[') {
            let Some((tag, tail)) = stripped.split_once(']') else {
                break;
            };
            if let Some(stamp) = parse_timestamp(tag) {
                stamps.push(stamp);
            }
            rest = tail.trim_start();
        }

        if rest.is_empty() {
            continue;
        }

        if stamps.is_empty() {
            lines.push(LyricLine {
                text: rest.to_string(),
                timestamp: None,
            });
        } else {
            for stamp in stamps {
                lines.push(LyricLine {
                    text: rest.to_string(),
                    timestamp: Some(stamp),
                });
            }
        }
    }

    lines
}

/// Parse an LRC time tag body: `mm:ss`, `mm:ss.xx`, or `mm:ss.xxx`
fn parse_timestamp(tag: &str) -> Option<Duration> {
    let (minutes, seconds) = tag.split_once(':')?;
    let minutes: u64 = minutes.trim().parse().ok()?;
    let seconds: f64 = seconds.trim().parse().ok()?;
    if !(0.0..60.0).contains(&seconds) {
        return None;
    }
    Some(Duration::from_secs_f64(minutes as f64 * 60.0 + seconds))
}
