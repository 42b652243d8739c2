//! A row of display cells.
//!
//! Rows own their cells and a spare-cell pool: narrowing the grid parks the
//! trailing cells instead of dropping them, widening takes them back. The
//! derived `is_empty` flag is cached behind a dirty bit and only recomputed
//! after the row was actually modified; the selection span is maintained by
//! the grid whenever the selection or the layout changes.

use crate::cell::Cell;
use crate::layout::CharacterInfo;
use crate::point::Point;
use crate::pool::Pool;

#[derive(Debug)]
pub struct Row {
    cells: Vec<Cell>,
    spare: Pool<Cell>,
    dirty: std::cell::Cell<bool>,
    cached_empty: std::cell::Cell<bool>,
    selected_span: Option<(usize, usize)>,
}

impl Row {
    pub fn new(columns: usize) -> Self {
        Row {
            cells: (0..columns).map(Cell::new).collect(),
            spare: Pool::new(),
            dirty: std::cell::Cell::new(false),
            cached_empty: std::cell::Cell::new(true),
            selected_span: None,
        }
    }

    /// Number of cells (the current column count).
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, column: usize) -> Option<&Cell> {
        self.cells.get(column)
    }

    pub fn cell_mut(&mut self, column: usize) -> Option<&mut Cell> {
        self.mark_modified();
        self.cells.get_mut(column)
    }

    /// Resize to `columns` cells, parking or reviving cells via the spare
    /// pool. Revived cells come back cleared and reassigned to their column.
    pub fn resize(&mut self, columns: usize) {
        if columns == self.cells.len() {
            return;
        }
        while self.cells.len() > columns {
            // Popped cells keep their contents; reassign clears on reuse.
            if let Some(cell) = self.cells.pop() {
                self.spare.put(cell);
            }
        }
        while self.cells.len() < columns {
            let index = self.cells.len();
            let mut cell = self.spare.take_or_else(|| Cell::new(index));
            cell.reassign(index);
            self.cells.push(cell);
        }
        self.mark_modified();
    }

    /// Write a character placement into this row. Columns overlapped by a
    /// wide glyph become continuation cells; a newline consumes its grid
    /// position but leaves the cell empty. Returns the first column after
    /// the placement.
    pub fn apply(&mut self, info: &CharacterInfo) -> usize {
        let x = info.point.x.max(0) as usize;
        if x >= self.cells.len() {
            return self.cells.len();
        }
        let end = (x + info.volume).min(self.cells.len());
        if info.ch == '\n' {
            self.cells[x].reset();
        } else {
            self.cells[x].apply(info);
            for column in (x + 1)..end {
                self.cells[column].mark_continuation(Point::new(column as i32, info.point.y));
            }
        }
        self.mark_modified();
        end
    }

    /// Clear every cell from `column` to the end of the row.
    pub fn reset_after(&mut self, column: usize) {
        for cell in self.cells.iter_mut().skip(column) {
            cell.reset();
        }
        self.mark_modified();
    }

    /// Clear the whole row, including its selection span.
    pub fn reset(&mut self) {
        for cell in &mut self.cells {
            cell.reset();
        }
        self.selected_span = None;
        self.mark_modified();
    }

    /// Invalidate cached derived flags.
    pub fn mark_modified(&self) {
        self.dirty.set(true);
    }

    /// Whether no cell in this row holds a character. Lazily recomputed
    /// only after the row was modified.
    pub fn is_empty(&self) -> bool {
        if self.dirty.get() {
            let empty = self.cells.iter().all(|cell| cell.ch().is_none());
            self.cached_empty.set(empty);
            self.dirty.set(false);
        }
        self.cached_empty.get()
    }

    /// Inclusive column span of this row that lies inside the active
    /// selection, if any. Maintained by the grid.
    pub fn selected_span(&self) -> Option<(usize, usize)> {
        self.selected_span
    }

    /// Whether any cell of this row is inside the active selection.
    pub fn is_selected(&self) -> bool {
        self.selected_span.is_some()
    }

    pub(crate) fn set_selected_span(&mut self, span: Option<(usize, usize)>) -> bool {
        if self.selected_span == span {
            return false;
        }
        self.selected_span = span;
        true
    }

    /// Visible text of this row: glyphs as-is, empty cells as spaces,
    /// continuation cells skipped, trailing blanks trimmed.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for cell in &self.cells {
            match cell.ch() {
                Some(ch) => out.push(ch),
                None if cell.is_continuation() => {}
                None => out.push(' '),
            }
        }
        out.trim_end().to_string()
    }
}
