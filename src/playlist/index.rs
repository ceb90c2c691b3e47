//! Pure index arithmetic for a playlist of `len` tracks.
//!
//! Every helper accepts any stored index, including stale ones, and returns
//! `0` for an empty playlist without dividing or indexing.

/// Clamp `index` into `[0, len)`, or `0` when empty.
pub fn clamp_index(index: usize, len: usize) -> usize {
    if len == 0 { 0 } else { index.min(len - 1) }
}

/// Step forward, wrapping from the last track to the first.
pub fn next_index(index: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let index = clamp_index(index, len);
    if index < len - 1 { index + 1 } else { 0 }
}

/// Step back, wrapping from the first track to the last.
pub fn previous_index(index: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let index = clamp_index(index, len);
    if index > 0 { index - 1 } else { len - 1 }
}

/// Index after the current track finished playing. Always wraps, so a
/// single-track playlist repeats.
pub fn ended_index(index: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    (clamp_index(index, len) + 1) % len
}
