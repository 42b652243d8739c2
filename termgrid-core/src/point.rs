//! Grid coordinates and cell-space rectangles.
//!
//! A point addresses a display cell as (column, row). Ordering is row-major:
//! a point on an earlier row compares less than any point on a later row,
//! ties broken by column. This is the order text flows in, so selections and
//! iteration can use plain comparisons.

use serde::{Deserialize, Serialize};

/// A grid coordinate: `x` is the column, `y` is the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Marker for "no position" (e.g. a cell not backed by any character).
    pub const INVALID: Point = Point { x: -1, y: -1 };
    /// Top-left of the grid.
    pub const ZERO: Point = Point { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }

    pub fn is_valid(&self) -> bool {
        self.x >= 0 && self.y >= 0
    }
}

impl Default for Point {
    fn default() -> Self {
        Point::INVALID
    }
}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Point {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match self.y.cmp(&other.y) {
            std::cmp::Ordering::Equal => self.x.cmp(&other.x),
            ord => ord,
        }
    }
}

/// A rectangle in cell units, used for the precomputed foreground and
/// background extents of a cell. Renderers scale these by the font's cell
/// size; the layout core never deals in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const EMPTY: Rect = Rect {
        x: 0,
        y: 0,
        width: 0,
        height: 0,
    };

    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}
