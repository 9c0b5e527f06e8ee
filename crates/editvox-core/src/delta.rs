//! Single-edit text deltas.
//!
//! Hosts report a field's new value, not the edit that produced it. [`TextDelta::between`]
//! recovers the one contiguous edit that turns the previous value into the new one, using the
//! caret positions to decide where a run of repeated characters was edited.

use crate::text::utf16_len;

/// A single text edit expressed in UTF-16 offsets.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextDelta {
    /// Start offset of the edit in both values.
    pub start: usize,
    /// Exact deleted text (may be empty).
    pub deleted_text: String,
    /// Exact inserted text (may be empty).
    pub inserted_text: String,
}

impl TextDelta {
    /// Computes the edit between `old` and `new`.
    ///
    /// The common prefix never extends past either caret (`old_caret`, `new_caret`), so typing
    /// `"a"` after `"a"` is reported as an insertion at the caret rather than at the end. The
    /// common suffix is taken from what remains.
    pub fn between(old: &str, old_caret: usize, new: &str, new_caret: usize) -> Self {
        let bound = old_caret.min(new_caret);
        let mut prefix_units = 0;
        let mut prefix_bytes = 0;
        for (a, b) in old.chars().zip(new.chars()) {
            if a != b || prefix_units + a.len_utf16() > bound {
                break;
            }
            prefix_units += a.len_utf16();
            prefix_bytes += a.len_utf8();
        }

        let old_rest = &old[prefix_bytes..];
        let new_rest = &new[prefix_bytes..];
        let suffix_bytes: usize = old_rest
            .chars()
            .rev()
            .zip(new_rest.chars().rev())
            .take_while(|(a, b)| a == b)
            .map(|(a, _)| a.len_utf8())
            .sum();

        Self {
            start: prefix_units,
            deleted_text: old_rest[..old_rest.len() - suffix_bytes].to_string(),
            inserted_text: new_rest[..new_rest.len() - suffix_bytes].to_string(),
        }
    }

    /// Returns `true` if the values were equal.
    pub fn is_empty(&self) -> bool {
        self.deleted_text.is_empty() && self.inserted_text.is_empty()
    }

    /// Length of `deleted_text` in UTF-16 code units.
    pub fn deleted_len(&self) -> usize {
        utf16_len(&self.deleted_text)
    }

    /// Length of `inserted_text` in UTF-16 code units.
    pub fn inserted_len(&self) -> usize {
        utf16_len(&self.inserted_text)
    }

    /// Exclusive end offset in the old value.
    pub fn end(&self) -> usize {
        self.start.saturating_add(self.deleted_len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typing_repeated_character() {
        let delta = TextDelta::between("a", 1, "aa", 2);
        assert_eq!(delta.start, 1);
        assert_eq!(delta.inserted_text, "a");
        assert!(delta.deleted_text.is_empty());
    }

    #[test]
    fn test_backspace_in_middle() {
        let delta = TextDelta::between("abcd", 2, "acd", 1);
        assert_eq!(delta.start, 1);
        assert_eq!(delta.deleted_text, "b");
        assert_eq!(delta.end(), 2);
    }

    #[test]
    fn test_replacement_with_surrogates() {
        let delta = TextDelta::between("x😀y", 3, "x🎉y", 3);
        assert_eq!(delta.start, 1);
        assert_eq!(delta.deleted_text, "😀");
        assert_eq!(delta.inserted_text, "🎉");
        assert_eq!(delta.inserted_len(), 2);
    }

    #[test]
    fn test_equal_values() {
        assert!(TextDelta::between("same", 0, "same", 4).is_empty());
    }
}
