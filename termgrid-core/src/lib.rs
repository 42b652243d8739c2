//! Termgrid Core
//!
//! The presentation core of a terminal-style text widget:
//! - Incremental layout of a flat, append-mostly text buffer into a
//!   fixed-width, variable-height grid of display cells
//! - Divergence-based diffing so appends cost only the appended suffix
//! - Pooled rows and cells that survive resizes
//! - Scrollback viewport, caret mapping, and range selection
//!
//! Rendering, fonts, and input stay outside; this crate has no GUI
//! dependencies and is fully testable headlessly.

pub mod buffer;
pub mod cell;
pub mod color;
pub mod diff;
pub mod event;
pub mod grid;
pub mod layout;
pub mod metrics;
pub mod point;
pub mod pool;
pub mod row;
pub mod selection;
pub mod snapshot;
pub mod viewport;

pub use buffer::TextBuffer;
pub use cell::{Cell, CellState};
pub use color::{Color, NamedColor, Rgb};
pub use event::{GridEvent, ListenerId};
pub use grid::{Grid, GridError};
pub use layout::{CharacterInfo, LayoutPass, SENTINEL_CHAR};
pub use metrics::{CharacterMetrics, MonospaceMetrics, UnicodeMetrics};
pub use point::{Point, Rect};
pub use row::Row;
pub use selection::{Range, Selection};
pub use snapshot::GridSnapshot;
pub use viewport::Viewport;
