//! Orderable/shufflable play queue
//!
//! The queue keeps songs in canonical order and plays through a derived
//! `order` permutation. In sequential mode the permutation is the
//! identity; in shuffled mode it is a random permutation that pins the
//! current song, so toggling shuffle never interrupts playback and
//! toggling it off restores canonical order without reconstruction.

use crate::error::{PlaybackError, Result};
use crate::shuffle::shuffle_order;
use crate::types::PlayOrder;
use aria_core::Song;

/// Ordered play sequence with a shuffle projection
///
/// Invariants:
/// - `order` is always a permutation of `0..songs.len()`
/// - `current` is a valid index into `order`, or `None` iff the queue
///   is empty
#[derive(Debug, Clone)]
pub struct Queue {
    /// Songs in canonical (unshuffled) order
    songs: Vec<Song>,

    /// Effective order: canonical indices in play sequence
    order: Vec<usize>,

    /// Position in `order` of the current song
    current: Option<usize>,

    /// Current play order mode
    play_order: PlayOrder,
}

impl Queue {
    /// Create a new empty queue
    pub fn new() -> Self {
        Self {
            songs: Vec::new(),
            order: Vec::new(),
            current: None,
            play_order: PlayOrder::Sequential,
        }
    }

    /// Replace the queue and canonical order
    ///
    /// `start_index` out of range defaults to 0 for non-empty input.
    /// The play order mode is preserved; a shuffled queue re-derives its
    /// permutation around the starting song.
    pub fn set_queue(&mut self, songs: Vec<Song>, start_index: usize) {
        self.songs = songs;

        if self.songs.is_empty() {
            self.order = Vec::new();
            self.current = None;
            return;
        }

        let start = if start_index < self.songs.len() {
            start_index
        } else {
            0
        };

        match self.play_order {
            PlayOrder::Sequential => {
                self.order = (0..self.songs.len()).collect();
            }
            PlayOrder::Shuffled => {
                self.order = shuffle_order(self.songs.len(), start, start);
            }
        }
        self.current = Some(start);
    }

    /// Insert a song to play right after the current one
    pub fn enqueue_next(&mut self, song: Song) {
        let Some(cur) = self.current else {
            self.songs.push(song);
            self.order.push(0);
            self.current = Some(0);
            return;
        };

        let insert_canonical = self.order[cur] + 1;
        self.songs.insert(insert_canonical, song);

        // Re-point existing entries displaced by the canonical insert
        for o in &mut self.order {
            if *o >= insert_canonical {
                *o += 1;
            }
        }
        self.order.insert(cur + 1, insert_canonical);
    }

    /// Append a song to the end of the effective order
    pub fn enqueue_last(&mut self, song: Song) {
        self.songs.push(song);
        self.order.push(self.songs.len() - 1);
        if self.current.is_none() {
            self.current = Some(0);
        }
    }

    /// Toggle between sequential and shuffled order
    ///
    /// The currently playing song is unchanged in both directions:
    /// shuffling on pins it at its effective position and permutes the
    /// rest; shuffling off restores canonical order and relocates the
    /// current index to the song's canonical position.
    pub fn toggle_shuffle(&mut self) {
        match self.play_order {
            PlayOrder::Sequential => {
                self.play_order = PlayOrder::Shuffled;
                if let Some(cur) = self.current {
                    let pinned = self.order[cur];
                    self.order = shuffle_order(self.songs.len(), pinned, cur);
                }
            }
            PlayOrder::Shuffled => {
                self.play_order = PlayOrder::Sequential;
                let canonical = self.current.map(|cur| self.order[cur]);
                self.order = (0..self.songs.len()).collect();
                self.current = canonical;
            }
        }
    }

    /// Advance to the next song in effective order
    ///
    /// Wraps to the start at the end of the queue (repeat-all). Returns
    /// `None` only when the queue is empty.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<&Song> {
        let cur = self.current?;
        let next = (cur + 1) % self.order.len();
        self.current = Some(next);
        Some(&self.songs[self.order[next]])
    }

    /// Step back to the prior song in effective order
    ///
    /// Wraps to the end at the start of the queue, symmetric with
    /// [`Queue::next`]. The restart-vs-back threshold is the session
    /// facade's concern; this is raw index resolution.
    pub fn previous(&mut self) -> Option<&Song> {
        let cur = self.current?;
        let len = self.order.len();
        let prev = (cur + len - 1) % len;
        self.current = Some(prev);
        Some(&self.songs[self.order[prev]])
    }

    /// Peek at the upcoming song without advancing
    pub fn peek_next(&self) -> Option<&Song> {
        let cur = self.current?;
        let next = (cur + 1) % self.order.len();
        Some(&self.songs[self.order[next]])
    }

    /// Jump to a position in the effective order
    pub fn jump_to(&mut self, index: usize) -> Result<&Song> {
        if index >= self.order.len() {
            return Err(PlaybackError::IndexOutOfBounds(index));
        }
        self.current = Some(index);
        Ok(&self.songs[self.order[index]])
    }

    /// Remove the song at a position in the effective order
    ///
    /// Removing the current entry leaves the current index pointing at
    /// the following song (or the new last entry at the queue's end).
    pub fn remove(&mut self, index: usize) -> Option<Song> {
        if index >= self.order.len() {
            return None;
        }

        let canonical = self.order.remove(index);
        for o in &mut self.order {
            if *o > canonical {
                *o -= 1;
            }
        }
        let song = self.songs.remove(canonical);

        self.current = if self.order.is_empty() {
            None
        } else {
            self.current.map(|cur| {
                if index < cur {
                    cur - 1
                } else {
                    cur.min(self.order.len() - 1)
                }
            })
        };

        Some(song)
    }

    /// Clear the queue entirely
    pub fn clear(&mut self) {
        self.songs.clear();
        self.order.clear();
        self.current = None;
    }

    /// Get the current song
    pub fn current_song(&self) -> Option<&Song> {
        self.current.map(|cur| &self.songs[self.order[cur]])
    }

    /// Get the current position in the effective order
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// Songs in effective (mode-dependent) order
    pub fn songs_in_effective_order(&self) -> Vec<&Song> {
        self.order.iter().map(|&i| &self.songs[i]).collect()
    }

    /// Number of songs in the queue
    pub fn len(&self) -> usize {
        self.songs.len()
    }

    /// Check if the queue is empty
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    /// Current play order mode
    pub fn play_order(&self) -> PlayOrder {
        self.play_order
    }

    /// Check if the queue is shuffled
    pub fn is_shuffled(&self) -> bool {
        self.play_order == PlayOrder::Shuffled
    }
}

impl Default for Queue {
    fn default() -> Self {
        Self::new()
    }
}
