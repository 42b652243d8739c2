//! The grid coordinator.
//!
//! Owns the rows, the character placements, the viewport, the selection and
//! the caret, and keeps them consistent with the external text buffer.
//! Mutations (text, column count, metrics) only mark state dirty; the
//! explicit [`Grid::update`] pass re-lays-out the smallest suffix that could
//! have changed, so many micro-mutations within one host tick coalesce into
//! a single pass. Events fire once per pass, after state is consistent.

use log::{debug, warn};
use thiserror::Error;

use crate::buffer::TextBuffer;
use crate::cell::Cell;
use crate::diff::first_divergence;
use crate::event::{GridEvent, ListenerId, Listeners};
use crate::layout::{CharacterInfo, LayoutPass, SENTINEL_CHAR};
use crate::metrics::{CharacterMetrics, UnicodeMetrics};
use crate::point::Point;
use crate::pool::Pool;
use crate::row::Row;
use crate::selection::{Range, Selection};
use crate::viewport::Viewport;

/// Configuration and range violations. These are contract errors, not
/// transient failures; nothing is retried and no partial state is committed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("column count must be at least 1, got {0}")]
    InvalidColumnCount(usize),
    #[error("buffer height must be at least 1, got {0}")]
    InvalidBufferHeight(usize),
    #[error("index {index} out of range, buffer length is {length}")]
    IndexOutOfRange { index: usize, length: usize },
}

pub struct Grid {
    columns: usize,
    metrics: Box<dyn CharacterMetrics>,
    rows: Vec<Row>,
    row_pool: Pool<Row>,
    /// One entry per buffer index plus the sentinel; never empty.
    infos: Vec<CharacterInfo>,
    /// Snapshot of the text the current layout was computed from.
    chars: Vec<char>,
    viewport: Viewport,
    selection: Selection,
    cursor_index: usize,
    cursor_point: Point,
    /// Set when column count or metrics changed; forces relayout from 0.
    needs_full_layout: bool,
    listeners: Listeners,
}

impl Grid {
    /// Create a grid using the Unicode width tables for glyph volumes.
    pub fn new(columns: usize, buffer_height: usize) -> Result<Self, GridError> {
        Self::with_metrics(columns, buffer_height, Box::new(UnicodeMetrics))
    }

    /// Create a grid with an explicit font/metrics collaborator.
    pub fn with_metrics(
        columns: usize,
        buffer_height: usize,
        metrics: Box<dyn CharacterMetrics>,
    ) -> Result<Self, GridError> {
        if columns == 0 {
            return Err(GridError::InvalidColumnCount(columns));
        }
        if buffer_height == 0 {
            return Err(GridError::InvalidBufferHeight(buffer_height));
        }
        let mut viewport = Viewport::new(buffer_height);
        viewport.set_total_rows(1);
        Ok(Grid {
            columns,
            metrics,
            rows: vec![Row::new(columns)],
            row_pool: Pool::new(),
            infos: vec![CharacterInfo {
                ch: SENTINEL_CHAR,
                volume: 1,
                point: Point::ZERO,
                text_index: 0,
                foreground: None,
                background: None,
            }],
            chars: Vec::new(),
            viewport,
            selection: Selection::new(),
            cursor_index: 0,
            cursor_point: Point::ZERO,
            needs_full_layout: false,
            listeners: Listeners::new(),
        })
    }

    // --- configuration -----------------------------------------------------

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn buffer_height(&self) -> usize {
        self.viewport.buffer_height()
    }

    /// Change the wrap width. Takes effect on the next [`update`](Self::update);
    /// every placement depends on it, so the whole buffer is re-laid-out.
    pub fn set_column_count(&mut self, columns: usize) -> Result<(), GridError> {
        if columns == 0 {
            warn!("rejected column count {columns}");
            return Err(GridError::InvalidColumnCount(columns));
        }
        if columns != self.columns {
            self.columns = columns;
            self.needs_full_layout = true;
        }
        Ok(())
    }

    /// Change the visible height. Wrapping is unaffected, so this only
    /// re-clamps the viewport.
    pub fn set_buffer_height(&mut self, buffer_height: usize) -> Result<(), GridError> {
        if buffer_height == 0 {
            warn!("rejected buffer height {buffer_height}");
            return Err(GridError::InvalidBufferHeight(buffer_height));
        }
        if self.viewport.set_buffer_height(buffer_height) {
            self.listeners.emit(GridEvent::VisibleIndexChanged);
        }
        Ok(())
    }

    /// Swap the font/metrics collaborator; glyph volumes may differ, so the
    /// next update re-lays-out everything.
    pub fn set_metrics(&mut self, metrics: Box<dyn CharacterMetrics>) {
        self.metrics = metrics;
        self.needs_full_layout = true;
    }

    /// Force a full relayout on the next update (explicit revalidation,
    /// e.g. after color annotations changed without the text changing).
    pub fn invalidate(&mut self) {
        self.needs_full_layout = true;
    }

    // --- the update pass ---------------------------------------------------

    /// Reconcile the grid with the buffer. Re-lays-out only the suffix from
    /// the first divergence against the previously applied text (the whole
    /// buffer after a column or metrics change), then clears stale trailing
    /// cells, re-clamps the viewport, and fires coalesced change events.
    /// Applying an unchanged configuration is a no-op and fires nothing.
    pub fn update(&mut self, buffer: &TextBuffer) {
        let divergence = first_divergence(&self.chars, buffer.chars());
        let text_changed = divergence != self.chars.len() || divergence != buffer.len();
        if !self.needs_full_layout && !text_changed {
            return;
        }

        let from_index = if self.needs_full_layout { 0 } else { divergence };
        // Resume from the running cursor after the last unchanged character;
        // the replaced character makes its own wrap decision. Resuming from
        // the point recorded at `from_index` would reuse the old one.
        let start = if from_index == 0 {
            Point::ZERO
        } else {
            let prev = &self.infos[from_index - 1];
            if prev.ch == '\n' {
                Point::new(0, prev.point.y + 1)
            } else {
                Point::new(prev.point.x + prev.volume as i32, prev.point.y)
            }
        };
        debug!(
            "relayout from index {} of {} chars ({} columns)",
            from_index,
            buffer.len(),
            self.columns
        );

        // Bring surviving rows to the current width before streaming.
        let columns = self.columns;
        for row in &mut self.rows {
            row.resize(columns);
        }

        // Stream placements into the store, tracking the last column
        // written per touched row. Rows are visited in order, one past the
        // current end at most.
        self.infos.truncate(from_index);
        let mut ends: Vec<(usize, usize)> = Vec::new();
        if from_index > 0 {
            // The resume row keeps its unchanged prefix, but everything from
            // the resume column on is stale until a new placement overwrites
            // it. Seed the row here: a wider replacement can wrap straight
            // past it without landing a single placement on it.
            ends.push((start.y.max(0) as usize, start.x.max(0) as usize));
        }
        let metrics = &*self.metrics;
        for info in LayoutPass::new(buffer, from_index, columns, start, metrics) {
            let y = info.point.y.max(0) as usize;
            while self.rows.len() <= y {
                let mut row = self.row_pool.take_or_else(|| Row::new(columns));
                row.reset();
                row.resize(columns);
                self.rows.push(row);
            }
            let end = if info.is_sentinel() {
                // The caret consumes no cell; stale cells from its column on
                // still have to go.
                info.point.x.max(0) as usize
            } else {
                self.rows[y].apply(&info)
            };
            match ends.last_mut() {
                Some(last) if last.0 == y => last.1 = last.1.max(end),
                _ => ends.push((y, end)),
            }
            self.infos.push(info);
        }

        // Clear everything beyond the last written column of each touched
        // row, so nothing from a previously longer buffer survives.
        for (y, end) in ends {
            self.rows[y].reset_after(end);
        }

        // Park rows past the sentinel's row in the pool.
        let total_rows = match self.infos.last() {
            Some(info) => info.point.y.max(0) as usize + 1,
            None => 1,
        };
        while self.rows.len() > total_rows {
            if let Some(mut row) = self.rows.pop() {
                row.reset();
                self.row_pool.put(row);
            }
        }

        self.chars = buffer.chars().to_vec();
        self.needs_full_layout = false;

        // The viewport keeps tailing the output if it was at the bottom.
        let was_at_bottom = self.viewport.is_at_bottom();
        let mut visible_moved = self.viewport.set_total_rows(total_rows);
        if was_at_bottom && self.viewport.scroll_to_bottom() {
            visible_moved = true;
        }

        self.cursor_index = self.cursor_index.min(buffer.len());
        let cursor_point = self.infos[self.cursor_index].point;
        let cursor_moved = cursor_point != self.cursor_point;
        self.cursor_point = cursor_point;

        // A selection reaching past the shrunken grid is dropped.
        let mut selection_changed = false;
        if let Some(range) = self.selection.range() {
            if range.end.y >= self.rows.len() as i32 {
                selection_changed = self.selection.clear();
            }
        }
        if self.refresh_selected_spans() {
            selection_changed = true;
        }

        if text_changed {
            self.listeners.emit(GridEvent::TextChanged);
        }
        self.listeners.emit(GridEvent::LayoutChanged);
        if visible_moved {
            self.listeners.emit(GridEvent::VisibleIndexChanged);
        }
        if selection_changed {
            self.listeners.emit(GridEvent::SelectionChanged);
        }
        if cursor_moved {
            self.listeners.emit(GridEvent::CursorPointChanged);
        }
    }

    // --- read access -------------------------------------------------------

    /// All live rows, `[0, total_rows)`.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// The rows inside the viewport.
    pub fn visible_rows(&self) -> &[Row] {
        &self.rows[self.viewport.visible_range()]
    }

    /// One placement per buffer index plus the caret sentinel.
    pub fn character_infos(&self) -> &[CharacterInfo] {
        &self.infos
    }

    pub fn total_rows(&self) -> usize {
        self.rows.len()
    }

    /// Cell lookup by grid point. `None` for out-of-grid probes; hit-testing
    /// is expected to miss.
    pub fn cell(&self, point: Point) -> Option<&Cell> {
        if !point.is_valid() {
            return None;
        }
        self.rows.get(point.y as usize)?.cell(point.x as usize)
    }

    // --- cursor & mapping --------------------------------------------------

    /// Grid point of a buffer index (`len` maps to the caret-at-end point).
    /// O(1) after layout.
    pub fn index_to_point(&self, index: usize) -> Option<Point> {
        self.infos.get(index).map(|info| info.point)
    }

    /// Buffer index whose primary column is exactly `point`. `None` when no
    /// character sits there (continuation columns included). O(n); only
    /// invoked on user interaction, never per frame.
    pub fn point_to_index(&self, point: Point) -> Option<usize> {
        self.infos.iter().position(|info| info.point == point)
    }

    /// Place the caret at a buffer index in `[0, len]`.
    pub fn set_cursor_index(&mut self, index: usize) -> Result<(), GridError> {
        if index >= self.infos.len() {
            return Err(GridError::IndexOutOfRange {
                index,
                length: self.chars.len(),
            });
        }
        self.cursor_index = index;
        let point = self.infos[index].point;
        if point != self.cursor_point {
            self.cursor_point = point;
            self.listeners.emit(GridEvent::CursorPointChanged);
        }
        Ok(())
    }

    pub fn cursor_index(&self) -> usize {
        self.cursor_index
    }

    pub fn cursor_point(&self) -> Point {
        self.cursor_point
    }

    // --- scrolling ---------------------------------------------------------

    pub fn visible_index(&self) -> usize {
        self.viewport.visible_index()
    }

    pub fn max_visible_index(&self) -> usize {
        self.viewport.max_visible_index()
    }

    /// Set the scroll offset; out-of-range values clamp (documented).
    pub fn set_visible_index(&mut self, index: usize) {
        let moved = self.viewport.set_visible_index(index);
        self.notify_scrolled(moved);
    }

    pub fn scroll(&mut self, delta: isize) {
        let moved = self.viewport.scroll(delta);
        self.notify_scrolled(moved);
    }

    pub fn line_up(&mut self) {
        let moved = self.viewport.line_up();
        self.notify_scrolled(moved);
    }

    pub fn line_down(&mut self) {
        let moved = self.viewport.line_down();
        self.notify_scrolled(moved);
    }

    pub fn page_up(&mut self) {
        let moved = self.viewport.page_up();
        self.notify_scrolled(moved);
    }

    pub fn page_down(&mut self) {
        let moved = self.viewport.page_down();
        self.notify_scrolled(moved);
    }

    pub fn scroll_to_top(&mut self) {
        let moved = self.viewport.scroll_to_top();
        self.notify_scrolled(moved);
    }

    pub fn scroll_to_bottom(&mut self) {
        let moved = self.viewport.scroll_to_bottom();
        self.notify_scrolled(moved);
    }

    fn notify_scrolled(&mut self, moved: bool) {
        if moved {
            self.listeners.emit(GridEvent::VisibleIndexChanged);
        }
    }

    // --- selection ---------------------------------------------------------

    /// Start a drag selection at `point`.
    pub fn begin_selection(&mut self, point: Point) {
        self.selection.begin(point);
        if self.refresh_selected_spans() {
            self.listeners.emit(GridEvent::SelectionChanged);
        }
    }

    /// Extend the active drag to `point`.
    pub fn update_selection(&mut self, point: Point) {
        if self.selection.update(point) {
            self.refresh_selected_spans();
            self.listeners.emit(GridEvent::SelectionChanged);
        }
    }

    /// Finish the drag, keeping the range.
    pub fn end_selection(&mut self) {
        self.selection.finish();
    }

    /// Select the whole grid.
    pub fn select_all(&mut self) {
        // End on the last row, past its last column; an end row equal to
        // the row count would read as reaching past the grid and be
        // dropped by the next update.
        self.selection.set(Range::new(
            Point::ZERO,
            Point::new(self.columns as i32, self.rows.len() as i32 - 1),
        ));
        self.refresh_selected_spans();
        self.listeners.emit(GridEvent::SelectionChanged);
    }

    pub fn clear_selection(&mut self) {
        let cleared = self.selection.clear();
        let spans = self.refresh_selected_spans();
        if cleared || spans {
            self.listeners.emit(GridEvent::SelectionChanged);
        }
    }

    /// Active selections (currently zero or one range).
    pub fn selections(&self) -> Vec<Range> {
        self.selection.range().into_iter().collect()
    }

    /// Cells covered by `range`: boundary rows partially, interior rows in
    /// full, in text-flow order.
    pub fn cells_in_range(&self, range: Range) -> impl Iterator<Item = &Cell> + '_ {
        let r = range.normalized();
        self.rows.iter().enumerate().flat_map(move |(y, row)| {
            match r.row_span(y, row.len()) {
                Some((start, end)) => &row.cells()[start..=end],
                None => &[][..],
            }
            .iter()
        })
    }

    /// Text of the active selection, rows joined with newlines and trailing
    /// blanks trimmed. Backs the widget's copy-to-clipboard.
    pub fn selection_text(&self) -> Option<String> {
        let range = self.selection.range()?;
        let mut lines = Vec::new();
        for (y, row) in self.rows.iter().enumerate() {
            let (start, end) = match range.row_span(y, row.len()) {
                Some(span) => span,
                None => continue,
            };
            let mut line = String::new();
            for cell in &row.cells()[start..=end] {
                match cell.ch() {
                    Some(ch) => line.push(ch),
                    None if cell.is_continuation() => {}
                    None => line.push(' '),
                }
            }
            lines.push(line.trim_end().to_string());
        }
        Some(lines.join("\n"))
    }

    fn refresh_selected_spans(&mut self) -> bool {
        let range = self.selection.range();
        let columns = self.columns;
        let mut changed = false;
        for (y, row) in self.rows.iter_mut().enumerate() {
            let span = range.and_then(|r| r.row_span(y, columns));
            if row.set_selected_span(span) {
                changed = true;
            }
        }
        changed
    }

    // --- events ------------------------------------------------------------

    pub fn subscribe(&mut self, listener: Box<dyn FnMut(GridEvent)>) -> ListenerId {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }
}

impl std::fmt::Debug for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Grid")
            .field("columns", &self.columns)
            .field("total_rows", &self.rows.len())
            .field("buffer_len", &self.chars.len())
            .field("visible_index", &self.viewport.visible_index())
            .finish()
    }
}
