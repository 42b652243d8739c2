//! Grid snapshots for deterministic testing and debugging.
//!
//! Captures the observable grid state (rows as text, caret, viewport) in a
//! serializable form, so a scenario can be asserted or diffed as JSON
//! without poking at individual cells.

use serde::{Deserialize, Serialize};

use crate::grid::Grid;
use crate::point::Point;

/// A snapshot of the grid's observable state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSnapshot {
    pub columns: usize,
    pub total_rows: usize,
    pub buffer_height: usize,
    pub visible_index: usize,
    pub cursor: Point,
    /// Row text with trailing blanks trimmed, top to bottom.
    pub lines: Vec<String>,
}

impl GridSnapshot {
    /// Serialize to pretty JSON (stable field order for diffs).
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl From<&Grid> for GridSnapshot {
    fn from(grid: &Grid) -> Self {
        GridSnapshot {
            columns: grid.columns(),
            total_rows: grid.total_rows(),
            buffer_height: grid.buffer_height(),
            visible_index: grid.visible_index(),
            cursor: grid.cursor_point(),
            lines: grid.rows().iter().map(|row| row.text()).collect(),
        }
    }
}
