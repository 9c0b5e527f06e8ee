//! Character-range annotations attached to a container's text.
//!
//! Markers are produced by the host (spell checker, grammar checker). This crate only signals
//! when the selection enters or leaves a marked range.

use std::fmt;

/// Marker categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MarkerKind {
    /// Misspelled word.
    Spelling,
    /// Grammar error.
    Grammar,
}

/// A half-open UTF-16 range (`start..end`) of a container's text carrying a marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker {
    /// Marker category.
    pub kind: MarkerKind,
    /// Range start (inclusive), relative to the container text.
    pub start: usize,
    /// Range end (exclusive), relative to the container text.
    pub end: usize,
}

impl Marker {
    /// Create a new marker.
    pub fn new(kind: MarkerKind, start: usize, end: usize) -> Self {
        Self { kind, start, end }
    }

    /// Whether the marker covers the selection `start..end`.
    ///
    /// For a caret (`start == end`) the marker must contain the character after the caret.
    pub fn covers(&self, start: usize, end: usize) -> bool {
        if start == end {
            self.start <= start && start < self.end
        } else {
            self.start < end && start < self.end
        }
    }
}

/// The selection entered or left a marked range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerChange {
    /// Marker category.
    pub kind: MarkerKind,
    /// `true` when entering, `false` when leaving.
    pub entered: bool,
}

impl fmt::Display for MarkerChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.kind, self.entered) {
            (MarkerKind::Spelling, true) => write!(f, "Misspelled"),
            (MarkerKind::Spelling, false) => write!(f, "Leaving misspelled"),
            (MarkerKind::Grammar, true) => write!(f, "Grammar error"),
            (MarkerKind::Grammar, false) => write!(f, "Leaving grammar error"),
        }
    }
}
