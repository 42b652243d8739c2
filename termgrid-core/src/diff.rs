//! Buffer divergence detection.
//!
//! Finds the first index at which two buffer snapshots differ, which bounds
//! how much of the grid must be re-laid-out. The dominant mutation is a pure
//! append (output accumulation), which this makes O(appended length) instead
//! of O(total length). Anything that is not a pure suffix change is handled
//! conservatively by relaying out from the divergence point to the end.
//!
//! Only the common prefix is considered. A common suffix after a mid-buffer
//! edit is deliberately not reused: suffix reuse would change which cells
//! count as "the same" across updates, and consumers hold on to cells.

/// Length of the common prefix of `old` and `new`.
///
/// Returns 0 when they diverge immediately and `min(len)` when one is a
/// prefix of the other (including the equal case).
pub fn first_divergence(old: &[char], new: &[char]) -> usize {
    old.iter()
        .zip(new.iter())
        .take_while(|(a, b)| a == b)
        .count()
}
