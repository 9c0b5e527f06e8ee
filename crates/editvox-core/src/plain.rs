//! Fallback handling for plain (single node) text fields.

use std::fmt;
use std::hash::Hash;

use crate::describe::{EditableTextState, TextChangeEvent};
use crate::error::{EditError, Result};
use crate::output::Feedback;
use crate::tree::{TreeAdapter, offset_within};

/// Tracks a plain text field: the whole field text is the value, and every event is described
/// with the plain-text rules of [`EditableTextState`].
#[derive(Debug, Clone)]
pub struct PlainTextHandler<N> {
    node: N,
    state: Option<EditableTextState>,
}

impl<N> PlainTextHandler<N>
where
    N: Copy + Eq + Hash + fmt::Debug,
{
    /// Create a handler for the field `node`.
    pub fn new(node: N) -> Self {
        Self { node, state: None }
    }

    /// The tracked field.
    pub fn node(&self) -> N {
        self.node
    }

    /// Last seen value and selection.
    pub fn state(&self) -> Option<&EditableTextState> {
        self.state.as_ref()
    }

    /// Forget the last seen value.
    pub fn reset(&mut self) {
        self.state = None;
    }

    /// Process the field's current value and selection. The first call only seeds state.
    pub fn process<T>(&mut self, tree: &T, reading_continuously: bool) -> Result<Feedback>
    where
        T: TreeAdapter<Node = N> + ?Sized,
    {
        if !tree.is_valid(self.node) {
            return Err(EditError::StaleNode);
        }
        let value = tree.text(self.node).unwrap_or_default().into_owned();
        let selection = tree.selection(self.node).ok_or(EditError::NoSelection)?;
        let (start, end) = selection.ordered(tree);
        let start = offset_within(tree, self.node, start.node, start.offset).unwrap_or(0);
        let end = offset_within(tree, self.node, end.node, end.offset).unwrap_or(start);
        let event = TextChangeEvent::new(value, start, end);

        let mut feedback = Feedback::default();
        let speak = !reading_continuously && !tree.braille_only(self.node);
        let state = match self.state.take() {
            Some(mut state) => {
                if speak {
                    state.changed(event, &mut feedback);
                } else {
                    state.sync(event);
                }
                state
            }
            None => EditableTextState::new(event),
        };
        feedback.braille = Some(state.braille_line());
        self.state = Some(state);
        Ok(feedback)
    }
}
