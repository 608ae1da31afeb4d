//! Frame ordering and repetition.
//!
//! With `--cycle-themes`, frames are ordered by ascending average hue so the
//! slideshow sweeps through the colour wheel. The sort is stable: frames with
//! equal hue keep their discovery order. `--repeat N` plays the (possibly
//! reordered) sequence N times per GIF loop.

use crate::process::Frame;

/// Sort frames by ascending hue, keeping discovery order for ties.
///
/// Frames without a computed hue sort as 0°.
pub fn order_by_hue(frames: &mut [Frame]) {
    frames.sort_by(|a, b| a.hue.unwrap_or(0.0).total_cmp(&b.hue.unwrap_or(0.0)));
}

/// Frame indices in playback order: `0..count`, cycled `repeat` times.
///
/// A `repeat` of 0 plays the sequence once.
pub fn playback_order(count: usize, repeat: usize) -> Vec<usize> {
    (0..repeat.max(1)).flat_map(|_| 0..count).collect()
}
