#![warn(missing_docs)]
//! Editvox Core - Headless Edit-Session Tracker
//!
//! # Overview
//!
//! `editvox-core` follows the selection and content of an editable region in a host's
//! accessibility tree and turns every change into speech utterances and a braille line. It
//! never renders anything itself: the host reads the tree through [`TreeAdapter`] and receives
//! feedback through [`SpeechOutput`] and [`BrailleOutput`].
//!
//! # Core Features
//!
//! - **Logical Lines**: lines are rebuilt from possibly broken "on-line" links, with sibling
//!   fallbacks and cycle guards
//! - **Stable Comparisons**: line identity survives host re-renders through container offsets
//!   and ancestor path recovery
//! - **Change Classification**: a priority-ordered rule list decides between caret moves,
//!   typing, selection extension and jumps
//! - **Style Transitions**: only attributes that changed since the last announcement are
//!   reported
//! - **Plain Fields**: a rope-backed fallback for single-node text fields
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  EditingSession (events, renderers)         │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  SelectionDiffEngine / PlainTextHandler     │  ← Change Classification
//! ├─────────────────────────────────────────────┤
//! │  StyleTracker / EditableTextState           │  ← Description
//! ├─────────────────────────────────────────────┤
//! │  LineLocator / EditableLine                 │  ← Logical Lines
//! ├─────────────────────────────────────────────┤
//! │  TreeAdapter (host tree)                    │  ← Tree Access
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use editvox_core::{
//!     ArenaTree, BrailleLine, BrailleOutput, EditConfig, EditingSession, EventKind, NodeRole,
//!     QueueMode, SpeechOutput, SpeechProperties,
//! };
//!
//! #[derive(Default)]
//! struct Spoken(Vec<String>);
//!
//! impl SpeechOutput for Spoken {
//!     fn speak(&mut self, text: &str, _: QueueMode, _: Option<&SpeechProperties>) {
//!         self.0.push(text.to_string());
//!     }
//! }
//!
//! #[derive(Default)]
//! struct Display(Option<BrailleLine>);
//!
//! impl BrailleOutput for Display {
//!     fn write_braille_line(&mut self, line: &BrailleLine) {
//!         self.0 = Some(line.clone());
//!     }
//! }
//!
//! let mut tree = ArenaTree::new();
//! let field = tree.add_root(NodeRole::TextField);
//! tree.set_rich_editable(field, true).unwrap();
//! let text = tree.append_child(field, NodeRole::StaticText).unwrap();
//! let line = tree.append_text(text, NodeRole::InlineTextBox, "hello").unwrap();
//! tree.set_caret(field, line, 0).unwrap();
//! tree.set_focus(Some(field));
//!
//! let mut session = EditingSession::new(EditConfig::default(), Spoken::default(), Display::default());
//! session.on_focusable_editable_found(&tree, field);
//!
//! tree.set_caret(field, line, 1).unwrap();
//! session.on_event(&tree, EventKind::SelectionChanged, field);
//!
//! assert_eq!(session.speech().0, vec!["e"]);
//! assert_eq!(session.braille().0.as_ref().map(|b| b.cursor_start), Some(1));
//! ```
//!
//! # Module Description
//!
//! - [`tree`] - Host tree capability trait and traversal helpers
//! - [`arena`] - In-memory reference tree
//! - [`line`] - Logical line construction and comparison
//! - [`engine`] - Rich editable state machine
//! - [`session`] - Event surface and renderer delivery
//! - [`output`] - Feedback model and renderer traits

pub mod arena;
pub mod config;
mod cursor;
pub mod delta;
pub mod describe;
pub mod engine;
pub mod error;
pub mod line;
pub mod line_index;
pub mod marker;
mod narrate;
pub mod output;
pub mod plain;
mod recovery;
pub mod session;
pub mod style;
mod text;
pub mod transition;
pub mod tree;

pub use arena::{ArenaTree, NodeId};
pub use config::EditConfig;
pub use cursor::{Cursor, Selection, SelectionDirection};
pub use delta::TextDelta;
pub use describe::{EditableTextState, TextChangeEvent};
pub use engine::{EventOutcome, SelectionDiffEngine};
pub use error::EditError;
pub use line::{ContainerSpan, EditableLine, LineLocator, LineSegment, text_between};
pub use line_index::LineIndex;
pub use marker::{Marker, MarkerChange, MarkerKind};
pub use output::{
    BrailleLine, BrailleOutput, Feedback, Message, Personality, QueueMode, SpeechOutput,
    SpeechProperties, StyledSpan, Utterance,
};
pub use plain::PlainTextHandler;
pub use recovery::PathRecovery;
pub use session::{EditingSession, EventKind};
pub use style::{Color, StyleAttribute, StyleChange, StyleTracker, StyleValue, TextStyle};
pub use transition::Transition;
pub use tree::{Direction, NodeRole, TreeAdapter};
