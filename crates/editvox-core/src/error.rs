//! Error types.

use thiserror::Error;

/// Failures while processing an edit event.
///
/// These never reach the host: [`EditingSession`](crate::EditingSession) logs them and skips
/// the event, leaving the previous state in place.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EditError {
    /// The editable region reports no selection.
    #[error("No selection in editable region")]
    NoSelection,

    /// A node the event depends on was removed from the tree.
    #[error("Node is no longer part of the tree")]
    StaleNode,

    /// The event target is not the editable currently being tracked.
    #[error("Event target is not the tracked editable")]
    NotTracked,
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EditError>;
