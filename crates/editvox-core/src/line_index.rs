//! Logical line index for plain-text fields.
//!
//! Backed by a [`Rope`] so line lookups are O(log N). All offsets are UTF-16 code units, the
//! unit hosts use for field selections. The index is rebuilt only when the field value actually
//! changes; caret-only events reuse it.

use ropey::Rope;

/// Logical line index over a field value.
#[derive(Debug, Clone, Default)]
pub struct LineIndex {
    rope: Rope,
}

impl LineIndex {
    /// Create an empty line index.
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    /// Build a line index from text.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// Replace the indexed text. Returns `false` (and keeps the current rope) if `text` is
    /// unchanged.
    pub fn update(&mut self, text: &str) -> bool {
        if self.rope == text {
            return false;
        }
        self.rope = Rope::from_str(text);
        true
    }

    /// Length of the indexed text in UTF-16 code units.
    pub fn len_utf16(&self) -> usize {
        self.rope.len_utf16_cu()
    }

    /// Number of logical lines (a trailing line break starts an empty last line).
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Line containing the UTF-16 `offset` (clamped to the text).
    pub fn line_index(&self, offset: usize) -> usize {
        let offset = offset.min(self.rope.len_utf16_cu());
        self.rope.char_to_line(self.rope.utf16_cu_to_char(offset))
    }

    /// UTF-16 offset of the first character of `line` (clamped to the last line).
    pub fn line_start(&self, line: usize) -> usize {
        let line = self.clamp_line(line);
        self.rope.char_to_utf16_cu(self.rope.line_to_char(line))
    }

    /// UTF-16 offset just before the line break ending `line`, or the text end on the last line.
    pub fn line_end(&self, line: usize) -> usize {
        let line = self.clamp_line(line);
        let start = self.rope.line_to_char(line);
        let end = start + self.line_text(line).chars().count();
        self.rope.char_to_utf16_cu(end)
    }

    /// Text of `line` without its line break.
    pub fn line_text(&self, line: usize) -> String {
        let mut text = self.line_text_with_break(line);
        let trimmed = strip_line_break(&text).len();
        text.truncate(trimmed);
        text
    }

    /// Text of `line` including its line break, if any.
    pub fn line_text_with_break(&self, line: usize) -> String {
        self.rope.line(self.clamp_line(line)).to_string()
    }

    fn clamp_line(&self, line: usize) -> usize {
        line.min(self.rope.len_lines().saturating_sub(1))
    }
}

fn strip_line_break(text: &str) -> &str {
    if let Some(stripped) = text.strip_suffix("\r\n") {
        return stripped;
    }
    match text.chars().last() {
        Some('\n' | '\r' | '\u{000B}' | '\u{000C}' | '\u{0085}' | '\u{2028}' | '\u{2029}') => {
            let mut chars = text.chars();
            chars.next_back();
            chars.as_str()
        }
        _ => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_bounds() {
        let index = LineIndex::from_text("one\ntwo\r\n\nfour");
        assert_eq!(index.line_count(), 4);
        assert_eq!(index.line_index(0), 0);
        assert_eq!(index.line_index(4), 1);
        assert_eq!(index.line_start(1), 4);
        assert_eq!(index.line_end(1), 7);
        assert_eq!(index.line_text(2), "");
        assert_eq!(index.line_text_with_break(1), "two\r\n");
        assert_eq!(index.line_end(3), 14);
    }

    #[test]
    fn test_utf16_offsets() {
        let index = LineIndex::from_text("😀a\nb");
        assert_eq!(index.len_utf16(), 5);
        assert_eq!(index.line_index(3), 0);
        assert_eq!(index.line_index(4), 1);
        assert_eq!(index.line_start(1), 4);
        assert_eq!(index.line_end(0), 3);
    }

    #[test]
    fn test_update_skips_equal_text() {
        let mut index = LineIndex::from_text("abc");
        assert!(!index.update("abc"));
        assert!(index.update("abc\n"));
        assert_eq!(index.line_count(), 2);
        assert_eq!(index.line_index(99), 1);
    }
}
