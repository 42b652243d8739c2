//! Range selection over the grid.
//!
//! A selection is a pair of grid points; normalization orders them so
//! iteration always proceeds top-to-bottom, left-to-right regardless of the
//! drag direction. Containment follows text flow: interior rows are covered
//! in full, boundary rows partially.

use serde::{Deserialize, Serialize};

use crate::point::Point;

/// A span between two grid points, endpoints inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub begin: Point,
    pub end: Point,
}

impl Range {
    pub fn new(begin: Point, end: Point) -> Self {
        Range { begin, end }
    }

    /// Reorder so `begin <= end` in row-major order.
    pub fn normalized(&self) -> Range {
        if self.begin <= self.end {
            *self
        } else {
            Range {
                begin: self.end,
                end: self.begin,
            }
        }
    }

    /// Whether `point` falls inside this range in text-flow order.
    pub fn contains(&self, point: Point) -> bool {
        let r = self.normalized();
        r.begin <= point && point <= r.end
    }

    /// Column span of row `y` covered by this range, inclusive, where
    /// `columns` is the grid width. `None` when the row is outside.
    pub fn row_span(&self, y: usize, columns: usize) -> Option<(usize, usize)> {
        let r = self.normalized();
        let y = y as i32;
        if y < r.begin.y || y > r.end.y || columns == 0 {
            return None;
        }
        let start = if y == r.begin.y {
            r.begin.x.max(0) as usize
        } else {
            0
        };
        let end = if y == r.end.y {
            (r.end.x.max(0) as usize).min(columns - 1)
        } else {
            columns - 1
        };
        if start > end {
            return None;
        }
        Some((start, end))
    }
}

/// Drag-driven selection state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    anchor: Option<Point>,
    cursor: Option<Point>,
    dragging: bool,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a drag at `point`.
    pub fn begin(&mut self, point: Point) {
        self.anchor = Some(point);
        self.cursor = Some(point);
        self.dragging = true;
    }

    /// Extend the drag to `point`. Ignored when no drag is active.
    pub fn update(&mut self, point: Point) -> bool {
        if !self.dragging || self.cursor == Some(point) {
            return false;
        }
        self.cursor = Some(point);
        true
    }

    /// Finish the drag, keeping the selected range.
    pub fn finish(&mut self) {
        self.dragging = false;
    }

    /// Select an explicit range (e.g. select-all).
    pub fn set(&mut self, range: Range) {
        let r = range.normalized();
        self.anchor = Some(r.begin);
        self.cursor = Some(r.end);
        self.dragging = false;
    }

    pub fn clear(&mut self) -> bool {
        let had = self.range().is_some();
        self.anchor = None;
        self.cursor = None;
        self.dragging = false;
        had
    }

    /// The selected range, normalized. `None` when nothing is selected.
    pub fn range(&self) -> Option<Range> {
        match (self.anchor, self.cursor) {
            (Some(a), Some(c)) if a != c || !self.dragging => {
                Some(Range::new(a, c).normalized())
            }
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.range().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_orders_endpoints() {
        let r = Range::new(Point::new(5, 3), Point::new(2, 1)).normalized();
        assert_eq!(r.begin, Point::new(2, 1));
        assert_eq!(r.end, Point::new(5, 3));
    }

    #[test]
    fn test_contains_follows_text_flow() {
        let r = Range::new(Point::new(2, 1), Point::new(5, 3));
        assert!(r.contains(Point::new(2, 1)));
        assert!(r.contains(Point::new(70, 1)));
        assert!(r.contains(Point::new(0, 2)));
        assert!(r.contains(Point::new(5, 3)));
        assert!(!r.contains(Point::new(1, 1)));
        assert!(!r.contains(Point::new(6, 3)));
        assert!(!r.contains(Point::new(0, 0)));
    }

    #[test]
    fn test_row_span() {
        let r = Range::new(Point::new(2, 1), Point::new(5, 2));
        assert_eq!(r.row_span(0, 10), None);
        assert_eq!(r.row_span(1, 10), Some((2, 9)));
        assert_eq!(r.row_span(2, 10), Some((0, 5)));
        assert_eq!(r.row_span(3, 10), None);
    }

    #[test]
    fn test_row_span_single_row() {
        let r = Range::new(Point::new(7, 4), Point::new(3, 4));
        assert_eq!(r.row_span(4, 10), Some((3, 7)));
    }

    #[test]
    fn test_drag_lifecycle() {
        let mut sel = Selection::new();
        assert!(sel.is_empty());
        sel.begin(Point::new(3, 0));
        // A zero-width drag in progress selects nothing yet.
        assert!(sel.is_empty());
        assert!(sel.update(Point::new(0, 2)));
        let r = sel.range().unwrap();
        assert_eq!(r.begin, Point::new(3, 0));
        assert_eq!(r.end, Point::new(0, 2));
        sel.finish();
        assert!(!sel.is_empty());
        assert!(sel.clear());
        assert!(sel.is_empty());
        assert!(!sel.clear());
    }

    #[test]
    fn test_update_without_drag_ignored() {
        let mut sel = Selection::new();
        assert!(!sel.update(Point::new(1, 1)));
        assert!(sel.is_empty());
    }

    #[test]
    fn test_set_explicit_range() {
        let mut sel = Selection::new();
        sel.set(Range::new(Point::new(4, 4), Point::new(0, 0)));
        let r = sel.range().unwrap();
        assert_eq!(r.begin, Point::ZERO);
        assert_eq!(r.end, Point::new(4, 4));
    }
}
