//! UTF-16 offset helpers.
//!
//! Hosts report cursor offsets in UTF-16 code units of a node's own text, while Rust strings
//! are UTF-8. Every offset that crosses the public API of this crate is a UTF-16 offset; these
//! helpers translate them to byte positions. Offsets past the end are clamped, and an offset
//! that falls inside a surrogate pair snaps down to the start of that character.

use unicode_segmentation::UnicodeSegmentation;

/// Length of `text` in UTF-16 code units.
pub fn utf16_len(text: &str) -> usize {
    text.encode_utf16().count()
}

/// Converts a UTF-16 offset into a byte offset on a character boundary.
pub fn utf16_to_byte(text: &str, offset: usize) -> usize {
    let mut units = 0;
    for (byte, ch) in text.char_indices() {
        let next = units + ch.len_utf16();
        if next > offset {
            return byte;
        }
        units = next;
    }
    text.len()
}

/// Returns the `start..end` UTF-16 range of `text`, clamped to its bounds.
pub fn utf16_slice(text: &str, start: usize, end: usize) -> &str {
    let start_byte = utf16_to_byte(text, start);
    let end_byte = utf16_to_byte(text, end.max(start));
    &text[start_byte..end_byte]
}

/// Returns the text from UTF-16 `start` to the end.
pub fn utf16_suffix(text: &str, start: usize) -> &str {
    &text[utf16_to_byte(text, start)..]
}

/// Returns the text up to UTF-16 `end`.
pub fn utf16_prefix(text: &str, end: usize) -> &str {
    &text[..utf16_to_byte(text, end)]
}

/// Returns the grapheme cluster that starts at (or contains) UTF-16 `offset`.
///
/// Returns an empty string at or past the end of `text`.
pub fn grapheme_at(text: &str, offset: usize) -> &str {
    let byte = utf16_to_byte(text, offset);
    text.grapheme_indices(true)
        .find(|(start, g)| byte < start + g.len())
        .map(|(_, g)| g)
        .unwrap_or("")
}

/// Returns `true` if `text` is non-empty and contains only whitespace.
pub fn is_whitespace_only(text: &str) -> bool {
    !text.is_empty() && text.chars().all(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf16_len_counts_surrogate_pairs() {
        assert_eq!(utf16_len("abc"), 3);
        assert_eq!(utf16_len("a👋b"), 4);
        assert_eq!(utf16_len("你好"), 2);
    }

    #[test]
    fn test_slice_clamps_and_snaps() {
        assert_eq!(utf16_slice("hello", 1, 3), "el");
        assert_eq!(utf16_slice("hello", 3, 99), "lo");
        assert_eq!(utf16_slice("hello", 4, 2), "");
        // Offset 2 lands inside the emoji's surrogate pair.
        assert_eq!(utf16_slice("a👋b", 0, 2), "a");
        assert_eq!(utf16_slice("a👋b", 1, 3), "👋");
    }

    #[test]
    fn test_byte_offsets_on_cjk() {
        let text = "你好x";
        assert_eq!(utf16_to_byte(text, 2), 6);
        assert_eq!(utf16_to_byte(text, 9), text.len());
    }

    #[test]
    fn test_grapheme_at() {
        assert_eq!(grapheme_at("hello", 1), "e");
        assert_eq!(grapheme_at("hello", 5), "");
        assert_eq!(grapheme_at("e\u{301}x", 0), "e\u{301}");
    }

    #[test]
    fn test_whitespace_only() {
        assert!(is_whitespace_only("  \t"));
        assert!(!is_whitespace_only(""));
        assert!(!is_whitespace_only(" a "));
    }
}
