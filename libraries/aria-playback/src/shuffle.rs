//! Shuffle permutation for queue randomization
//!
//! Produces a permutation of canonical indices with one pinned entry, so
//! enabling shuffle never changes which song is currently playing.

use rand::seq::SliceRandom;
use rand::thread_rng;

/// Build a random permutation of `0..len` with `pinned` placed at `pinned_at`
///
/// All other indices are Fisher-Yates shuffled into the remaining slots.
pub(crate) fn shuffle_order(len: usize, pinned: usize, pinned_at: usize) -> Vec<usize> {
    debug_assert!(pinned < len && pinned_at < len);

    let mut rest: Vec<usize> = (0..len).filter(|&i| i != pinned).collect();
    let mut rng = thread_rng();
    rest.shuffle(&mut rng);

    let mut order = Vec::with_capacity(len);
    order.extend(rest.drain(..pinned_at));
    order.push(pinned);
    order.extend(rest);
    order
}
