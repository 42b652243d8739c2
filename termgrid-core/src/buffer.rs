//! The flat text buffer with per-character color annotations.
//!
//! The buffer is owned by the terminal collaborator (output plus prompt,
//! concatenated). The grid treats it as a read-only snapshot on every
//! update pass; all indices are character indices, and the two annotation
//! vectors stay parallel to the character vector at all times.

use serde::{Deserialize, Serialize};

use crate::color::Color;

/// Flat text plus parallel optional foreground/background annotations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextBuffer {
    chars: Vec<char>,
    foreground: Vec<Option<Color>>,
    background: Vec<Option<Color>>,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of characters (not bytes).
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Append text with default (unannotated) colors.
    pub fn push_str(&mut self, text: &str) {
        self.push_styled(text, None, None);
    }

    /// Append text carrying the given annotations on every character.
    pub fn push_styled(&mut self, text: &str, fg: Option<Color>, bg: Option<Color>) {
        for ch in text.chars() {
            self.chars.push(ch);
            self.foreground.push(fg);
            self.background.push(bg);
        }
    }

    /// Replace the whole content, dropping all annotations.
    pub fn set_text(&mut self, text: &str) {
        self.clear();
        self.push_str(text);
    }

    /// Truncate to `len` characters. No-op if already shorter.
    pub fn truncate(&mut self, len: usize) {
        self.chars.truncate(len);
        self.foreground.truncate(len);
        self.background.truncate(len);
    }

    pub fn clear(&mut self) {
        self.chars.clear();
        self.foreground.clear();
        self.background.clear();
    }

    pub fn char_at(&self, index: usize) -> Option<char> {
        self.chars.get(index).copied()
    }

    pub fn foreground_at(&self, index: usize) -> Option<Color> {
        self.foreground.get(index).copied().flatten()
    }

    pub fn background_at(&self, index: usize) -> Option<Color> {
        self.background.get(index).copied().flatten()
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }
}

impl From<&str> for TextBuffer {
    fn from(text: &str) -> Self {
        let mut buffer = TextBuffer::new();
        buffer.push_str(text);
        buffer
    }
}
