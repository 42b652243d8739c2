//! A single display cell.
//!
//! Cells are owned by exactly one row at a fixed column and hold a
//! denormalized copy of the character placement that landed on them, plus
//! precomputed foreground/background rectangles in cell units so renderers
//! never re-derive geometry. A wide character occupies its primary cell;
//! the columns it overlaps become non-interactive continuation cells.

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::layout::CharacterInfo;
use crate::point::{Point, Rect};

/// What currently occupies a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CellState {
    /// Nothing to draw, nothing to hit-test.
    #[default]
    Empty,
    /// A character with its display volume (>= 1).
    Glyph { ch: char, volume: usize },
    /// Overlapped by a preceding wide glyph; blank and non-selectable.
    Continuation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    /// Fixed column of this cell within its row.
    index: usize,
    pub state: CellState,
    /// Grid position; `Point::INVALID` while empty.
    pub point: Point,
    /// Buffer index of the character occupying this cell.
    pub text_index: Option<usize>,
    pub foreground: Option<Color>,
    pub background: Option<Color>,
    pub foreground_rect: Rect,
    pub background_rect: Rect,
}

impl Cell {
    pub fn new(index: usize) -> Self {
        Cell {
            index,
            state: CellState::Empty,
            point: Point::INVALID,
            text_index: None,
            foreground: None,
            background: None,
            foreground_rect: Rect::EMPTY,
            background_rect: Rect::EMPTY,
        }
    }

    /// Column of this cell within its row.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Clear back to the empty state, keeping the column assignment.
    pub fn reset(&mut self) {
        self.state = CellState::Empty;
        self.point = Point::INVALID;
        self.text_index = None;
        self.foreground = None;
        self.background = None;
        self.foreground_rect = Rect::EMPTY;
        self.background_rect = Rect::EMPTY;
    }

    /// Reassign to a new column (pool reuse) and clear.
    pub fn reassign(&mut self, index: usize) {
        self.index = index;
        self.reset();
    }

    /// Write a character placement into this cell.
    pub fn apply(&mut self, info: &CharacterInfo) {
        self.state = CellState::Glyph {
            ch: info.ch,
            volume: info.volume,
        };
        self.point = info.point;
        self.text_index = Some(info.text_index);
        self.foreground = info.foreground;
        self.background = info.background;
        let extent = Rect::new(info.point.x, info.point.y, info.volume as i32, 1);
        self.foreground_rect = extent;
        self.background_rect = extent;
    }

    /// Mark as overlapped by a preceding wide glyph.
    pub fn mark_continuation(&mut self, point: Point) {
        self.reset();
        self.state = CellState::Continuation;
        self.point = point;
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.state, CellState::Empty)
    }

    pub fn is_continuation(&self) -> bool {
        matches!(self.state, CellState::Continuation)
    }

    /// The character drawn in this cell, if any.
    pub fn ch(&self) -> Option<char> {
        match self.state {
            CellState::Glyph { ch, .. } => Some(ch),
            _ => None,
        }
    }

    /// Display volume of the glyph in this cell (0 when not a glyph).
    pub fn volume(&self) -> usize {
        match self.state {
            CellState::Glyph { volume, .. } => volume,
            _ => 0,
        }
    }
}
