//! End-to-end scenarios exercising the public API the way the widget does:
//! append output, resize, scroll, select, copy.

use std::cell::RefCell;
use std::rc::Rc;

use termgrid_core::{
    CharacterMetrics, Grid, GridEvent, GridSnapshot, MonospaceMetrics, NamedColor, Point, Range,
    TextBuffer,
};

fn mono_grid(columns: usize, height: usize) -> Grid {
    Grid::with_metrics(columns, height, Box::new(MonospaceMetrics)).unwrap()
}

#[test]
fn prompt_and_output_accumulate() {
    let mut grid = mono_grid(80, 24);
    let mut buffer = TextBuffer::new();

    buffer.push_styled("$ ", Some(NamedColor::Green.into()), None);
    buffer.push_str("ls\n");
    grid.update(&buffer);
    assert_eq!(grid.rows()[0].text(), "$ ls");

    buffer.push_str("README.md\n");
    buffer.push_styled("$ ", Some(NamedColor::Green.into()), None);
    grid.update(&buffer);

    let snap = GridSnapshot::from(&grid);
    assert_eq!(snap.lines, vec!["$ ls", "README.md", "$"]);
    assert_eq!(
        grid.cell(Point::ZERO).unwrap().foreground,
        Some(NamedColor::Green.into())
    );
    assert_eq!(grid.cell(Point::new(2, 0)).unwrap().foreground, None);
}

#[test]
fn caret_tracks_prompt_end() {
    let mut grid = mono_grid(80, 24);
    let mut buffer = TextBuffer::new();
    buffer.push_str("$ ech");
    grid.update(&buffer);
    grid.set_cursor_index(buffer.len()).unwrap();
    assert_eq!(grid.cursor_point(), Point::new(5, 0));

    buffer.push_str("o hi");
    grid.update(&buffer);
    // The caret index survived; re-place it at the new end.
    grid.set_cursor_index(buffer.len()).unwrap();
    assert_eq!(grid.cursor_point(), Point::new(9, 0));
}

#[test]
fn long_output_scrolls_and_follows_tail() {
    let mut grid = mono_grid(10, 5);
    let mut buffer = TextBuffer::new();
    for i in 0..20 {
        buffer.push_str(&format!("line {i}\n"));
    }
    grid.update(&buffer);
    // 20 newline-terminated lines plus the caret row.
    assert_eq!(grid.total_rows(), 21);
    assert_eq!(grid.max_visible_index(), 16);
    assert_eq!(grid.visible_index(), 16);
    assert_eq!(grid.visible_rows()[0].text(), "line 16");

    // Scroll back, append more: the offset stays put.
    grid.scroll_to_top();
    buffer.push_str("more\n");
    grid.update(&buffer);
    assert_eq!(grid.visible_index(), 0);
    assert_eq!(grid.visible_rows()[0].text(), "line 0");

    grid.page_down();
    assert_eq!(grid.visible_index(), 5);
}

#[test]
fn narrowing_rewraps_everything() {
    let mut grid = mono_grid(20, 24);
    let buffer = TextBuffer::from("the quick brown fox jumps");
    grid.update(&buffer);
    assert_eq!(grid.total_rows(), 2);

    grid.set_column_count(10).unwrap();
    grid.update(&buffer);
    assert_eq!(grid.total_rows(), 3);
    assert_eq!(grid.rows()[0].text(), "the quick");
    assert_eq!(grid.index_to_point(10), Some(Point::new(0, 1)));
}

#[test]
fn clearing_the_buffer_resets_the_grid() {
    let mut grid = mono_grid(10, 5);
    grid.update(&TextBuffer::from("some\nold\ncontent here"));
    assert!(grid.total_rows() > 1);

    grid.update(&TextBuffer::new());
    assert_eq!(grid.total_rows(), 1);
    assert!(grid.rows()[0].is_empty());
    assert_eq!(grid.visible_index(), 0);
    assert_eq!(grid.cursor_point(), Point::ZERO);
}

#[test]
fn drag_selection_copies_text() {
    let mut grid = mono_grid(80, 24);
    grid.update(&TextBuffer::from("first line\nsecond line\nthird"));

    // Drag bottom-up; normalization straightens it out.
    grid.begin_selection(Point::new(5, 1));
    grid.update_selection(Point::new(2, 0));
    grid.end_selection();

    let ranges = grid.selections();
    assert_eq!(ranges.len(), 1);
    assert_eq!(ranges[0].begin, Point::new(2, 0));
    assert_eq!(ranges[0].end, Point::new(5, 1));
    assert_eq!(grid.selection_text().unwrap(), "rst line\nsecond");

    grid.clear_selection();
    assert!(grid.selection_text().is_none());
}

#[test]
fn select_all_spans_the_grid() {
    let mut grid = mono_grid(80, 24);
    grid.update(&TextBuffer::from("alpha\nbeta"));
    grid.select_all();
    assert_eq!(grid.selection_text().unwrap(), "alpha\nbeta");
}

#[test]
fn wide_glyph_cells_in_range_skip_continuations() {
    struct WideDigits;
    impl CharacterMetrics for WideDigits {
        fn volume(&self, ch: char) -> usize {
            if ch.is_ascii_digit() {
                2
            } else {
                1
            }
        }
    }
    let mut grid = Grid::with_metrics(20, 24, Box::new(WideDigits)).unwrap();
    grid.update(&TextBuffer::from("a1b"));

    let cells: Vec<_> = grid
        .cells_in_range(Range::new(Point::new(0, 0), Point::new(4, 0)))
        .collect();
    let text: String = cells.iter().filter_map(|cell| cell.ch()).collect();
    assert_eq!(text, "a1b");
    assert!(cells[2].is_continuation());
}

#[test]
fn events_fire_once_per_update_pass() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut grid = mono_grid(10, 5);
    let sink = Rc::clone(&seen);
    grid.subscribe(Box::new(move |event| sink.borrow_mut().push(event)));

    let mut buffer = TextBuffer::new();
    for i in 0..10 {
        buffer.push_str(&format!("{i}\n"));
    }
    // Many appended lines, one update pass.
    grid.update(&buffer);

    let events = seen.borrow();
    for event in [
        GridEvent::TextChanged,
        GridEvent::LayoutChanged,
        GridEvent::VisibleIndexChanged,
    ] {
        assert_eq!(
            events.iter().filter(|e| **e == event).count(),
            1,
            "{event:?} should fire exactly once"
        );
    }
}
