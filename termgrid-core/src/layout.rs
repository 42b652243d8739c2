//! The character layout engine.
//!
//! Converts a span of the flat buffer into grid placements: one
//! [`CharacterInfo`] per buffer index, wrapping at the configured column
//! count, plus a synthetic sentinel entry at `buffer.len()` that marks the
//! caret-at-end position. The pass is pure: it computes where characters
//! land and never touches rows or cells.

use serde::{Deserialize, Serialize};

use crate::buffer::TextBuffer;
use crate::color::Color;
use crate::metrics::CharacterMetrics;
use crate::point::Point;

/// Character stored in the sentinel entry at `buffer.len()`.
pub const SENTINEL_CHAR: char = '\0';

/// Placement of a single buffer character on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterInfo {
    /// The character, or [`SENTINEL_CHAR`] for the caret-at-end entry.
    pub ch: char,
    /// Display columns this character occupies, always >= 1.
    pub volume: usize,
    /// Grid position of the primary column.
    pub point: Point,
    /// Index into the flat buffer.
    pub text_index: usize,
    pub foreground: Option<Color>,
    pub background: Option<Color>,
}

impl CharacterInfo {
    pub fn is_sentinel(&self) -> bool {
        self.ch == SENTINEL_CHAR
    }
}

/// Streaming layout over `[from_index, buffer.len()]`, sentinel inclusive.
///
/// Placement rules, in order, for the character at the running cursor:
/// 1. wrap to the next row when the volume does not fit the remaining
///    columns (an exact fit does not wrap),
/// 2. emit the placement,
/// 3. advance the cursor by the volume,
/// 4. force a wrap after a newline regardless of fit.
pub struct LayoutPass<'a> {
    buffer: &'a TextBuffer,
    metrics: &'a dyn CharacterMetrics,
    columns: usize,
    index: usize,
    x: usize,
    y: usize,
    done: bool,
}

impl<'a> LayoutPass<'a> {
    /// Start a pass at `from_index`, with the cursor at `start`, the
    /// running cursor position right after the character at
    /// `from_index - 1`, or `Point::ZERO` for a full relayout. `start.x`
    /// may equal the column count; the first placement wraps it.
    /// `columns` must be at least 1 (enforced by the grid).
    pub fn new(
        buffer: &'a TextBuffer,
        from_index: usize,
        columns: usize,
        start: Point,
        metrics: &'a dyn CharacterMetrics,
    ) -> Self {
        LayoutPass {
            buffer,
            metrics,
            columns,
            index: from_index.min(buffer.len()),
            x: start.x.max(0) as usize,
            y: start.y.max(0) as usize,
            done: false,
        }
    }

    fn place(&mut self, volume: usize) -> Point {
        // A volume larger than the column count still gets a row to itself;
        // wrapping only when x > 0 keeps that from looping.
        if self.x > 0 && self.x + volume > self.columns {
            self.x = 0;
            self.y += 1;
        }
        Point::new(self.x as i32, self.y as i32)
    }
}

impl<'a> Iterator for LayoutPass<'a> {
    type Item = CharacterInfo;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        if self.index >= self.buffer.len() {
            // Sentinel: the caret-at-end position, one column wide.
            let point = self.place(1);
            self.done = true;
            return Some(CharacterInfo {
                ch: SENTINEL_CHAR,
                volume: 1,
                point,
                text_index: self.index,
                foreground: None,
                background: None,
            });
        }

        let ch = self.buffer.chars()[self.index];
        let volume = self.metrics.volume(ch).max(1);
        let point = self.place(volume);

        let info = CharacterInfo {
            ch,
            volume,
            point,
            text_index: self.index,
            foreground: self.buffer.foreground_at(self.index),
            background: self.buffer.background_at(self.index),
        };

        self.x += volume;
        if ch == '\n' {
            self.x = 0;
            self.y += 1;
        }
        self.index += 1;

        Some(info)
    }
}
