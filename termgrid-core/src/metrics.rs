//! Character display-width lookup.
//!
//! The layout engine asks the font/metrics collaborator how many display
//! columns a character occupies (its "volume"). The trait seam keeps the
//! core free of font dependencies: the widget plugs in a metrics object
//! backed by its glyph tables, tests plug in fixed-width doubles.

/// Resolves how many display columns a character occupies.
pub trait CharacterMetrics {
    /// Display volume of `ch`, always at least 1.
    fn volume(&self, ch: char) -> usize;
}

/// Metrics backed by the Unicode width tables. CJK and other wide glyphs
/// report volume 2; control characters and zero-width combiners are clamped
/// to 1 so every buffer index owns at least one grid position.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeMetrics;

impl CharacterMetrics for UnicodeMetrics {
    fn volume(&self, ch: char) -> usize {
        use unicode_width::UnicodeWidthChar;
        ch.width().unwrap_or(1).max(1)
    }
}

/// Every character occupies exactly one column. Deterministic double for
/// tests that must not depend on the Unicode tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonospaceMetrics;

impl CharacterMetrics for MonospaceMetrics {
    fn volume(&self, _ch: char) -> usize {
        1
    }
}
