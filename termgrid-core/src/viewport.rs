//! Scrollback viewport.
//!
//! Maps the total logical row count onto a fixed visible height.
//! `visible_index` is the topmost visible row and is always clamped into
//! `[0, max_visible_index]`; setting it out of range is a documented clamp,
//! not an error, because scroll input routinely overshoots.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    visible_index: usize,
    buffer_height: usize,
    total_rows: usize,
}

impl Viewport {
    pub fn new(buffer_height: usize) -> Self {
        Viewport {
            visible_index: 0,
            buffer_height,
            total_rows: 0,
        }
    }

    pub fn visible_index(&self) -> usize {
        self.visible_index
    }

    pub fn buffer_height(&self) -> usize {
        self.buffer_height
    }

    pub fn total_rows(&self) -> usize {
        self.total_rows
    }

    /// Largest valid `visible_index`.
    pub fn max_visible_index(&self) -> usize {
        self.total_rows.saturating_sub(self.buffer_height)
    }

    /// Whether the viewport shows the tail of the content.
    pub fn is_at_bottom(&self) -> bool {
        self.visible_index == self.max_visible_index()
    }

    /// Rows currently visible, as a half-open index range into the store.
    pub fn visible_range(&self) -> std::ops::Range<usize> {
        let end = (self.visible_index + self.buffer_height).min(self.total_rows);
        self.visible_index..end
    }

    /// Update the total row count, re-clamping the offset.
    /// Returns true when `visible_index` moved.
    pub fn set_total_rows(&mut self, total_rows: usize) -> bool {
        self.total_rows = total_rows;
        self.clamp()
    }

    /// Update the visible height, re-clamping the offset.
    /// Returns true when `visible_index` moved.
    pub fn set_buffer_height(&mut self, buffer_height: usize) -> bool {
        self.buffer_height = buffer_height;
        self.clamp()
    }

    /// Set the scroll offset, clamping into range.
    /// Returns true when `visible_index` moved.
    pub fn set_visible_index(&mut self, index: usize) -> bool {
        let clamped = index.min(self.max_visible_index());
        if clamped == self.visible_index {
            return false;
        }
        self.visible_index = clamped;
        true
    }

    /// Scroll by a signed row delta.
    pub fn scroll(&mut self, delta: isize) -> bool {
        let target = self.visible_index.saturating_add_signed(delta);
        self.set_visible_index(target)
    }

    pub fn line_up(&mut self) -> bool {
        self.scroll(-1)
    }

    pub fn line_down(&mut self) -> bool {
        self.scroll(1)
    }

    pub fn page_up(&mut self) -> bool {
        self.scroll(-(self.buffer_height as isize))
    }

    pub fn page_down(&mut self) -> bool {
        self.scroll(self.buffer_height as isize)
    }

    pub fn scroll_to_top(&mut self) -> bool {
        self.set_visible_index(0)
    }

    pub fn scroll_to_bottom(&mut self) -> bool {
        self.set_visible_index(self.max_visible_index())
    }

    fn clamp(&mut self) -> bool {
        let max = self.max_visible_index();
        if self.visible_index > max {
            self.visible_index = max;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport(total: usize, height: usize) -> Viewport {
        let mut v = Viewport::new(height);
        v.set_total_rows(total);
        v
    }

    #[test]
    fn test_max_visible_index() {
        let v = viewport(50, 20);
        assert_eq!(v.max_visible_index(), 30);
        let v = viewport(10, 20);
        assert_eq!(v.max_visible_index(), 0);
    }

    #[test]
    fn test_set_visible_index_clamps() {
        let mut v = viewport(50, 20);
        assert!(v.set_visible_index(31));
        assert_eq!(v.visible_index(), 30);
        assert!(!v.set_visible_index(30));
        assert_eq!(v.visible_index(), 30);
    }

    #[test]
    fn test_scroll_and_lines() {
        let mut v = viewport(50, 20);
        assert!(v.line_down());
        assert_eq!(v.visible_index(), 1);
        assert!(v.line_up());
        assert_eq!(v.visible_index(), 0);
        assert!(!v.line_up());
        assert!(v.scroll(100));
        assert_eq!(v.visible_index(), 30);
    }

    #[test]
    fn test_pages() {
        let mut v = viewport(50, 20);
        assert!(v.page_down());
        assert_eq!(v.visible_index(), 20);
        assert!(v.page_down());
        assert_eq!(v.visible_index(), 30);
        assert!(v.page_up());
        assert_eq!(v.visible_index(), 10);
    }

    #[test]
    fn test_top_bottom() {
        let mut v = viewport(50, 20);
        assert!(v.scroll_to_bottom());
        assert!(v.is_at_bottom());
        assert_eq!(v.visible_index(), 30);
        assert!(v.scroll_to_top());
        assert_eq!(v.visible_index(), 0);
    }

    #[test]
    fn test_shrink_total_reclamps() {
        let mut v = viewport(50, 20);
        v.set_visible_index(30);
        assert!(v.set_total_rows(25));
        assert_eq!(v.visible_index(), 5);
        assert!(!v.set_total_rows(100));
        assert_eq!(v.visible_index(), 5);
    }

    #[test]
    fn test_visible_range() {
        let mut v = viewport(50, 20);
        assert_eq!(v.visible_range(), 0..20);
        v.set_visible_index(30);
        assert_eq!(v.visible_range(), 30..50);
        let v = viewport(5, 20);
        assert_eq!(v.visible_range(), 0..5);
    }
}
