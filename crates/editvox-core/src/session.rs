//! Inbound event surface.
//!
//! An [`EditingSession`] follows one focused editable at a time. The host announces the
//! editable with [`EditingSession::on_focusable_editable_found`], forwards tree events with
//! [`EditingSession::on_event`], and calls [`EditingSession::end_session`] when focus leaves.
//! Feedback goes straight to the speech and braille renderers the session owns.

use std::fmt;
use std::hash::Hash;

use log::debug;

use crate::config::EditConfig;
use crate::engine::SelectionDiffEngine;
use crate::error::{EditError, Result};
use crate::output::{BrailleOutput, Feedback, SpeechOutput};
use crate::plain::PlainTextHandler;
use crate::transition::Transition;
use crate::tree::TreeAdapter;

/// Tree events relevant to edit tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// The editable gained focus.
    FocusChanged,
    /// Text inside the editable changed.
    TextChanged,
    /// The selection inside the editable changed.
    SelectionChanged,
    /// The value of a plain field changed.
    ValueChanged,
}

#[derive(Debug)]
enum Handler<N> {
    Rich(SelectionDiffEngine<N>),
    Plain(PlainTextHandler<N>),
}

#[derive(Debug)]
struct Tracked<N> {
    node: N,
    handler: Handler<N>,
}

/// Edit tracking for the focused editable.
#[derive(Debug)]
pub struct EditingSession<N, S, B> {
    config: EditConfig,
    speech: S,
    braille: B,
    tracked: Option<Tracked<N>>,
    reading_continuously: bool,
}

impl<N, S, B> EditingSession<N, S, B>
where
    N: Copy + Eq + Hash + fmt::Debug,
    S: SpeechOutput,
    B: BrailleOutput,
{
    /// Create a session delivering feedback to `speech` and `braille`.
    pub fn new(config: EditConfig, speech: S, braille: B) -> Self {
        Self {
            config,
            speech,
            braille,
            tracked: None,
            reading_continuously: false,
        }
    }

    /// Session options.
    pub fn config(&self) -> &EditConfig {
        &self.config
    }

    /// Speech renderer.
    pub fn speech(&self) -> &S {
        &self.speech
    }

    /// Mutable speech renderer.
    pub fn speech_mut(&mut self) -> &mut S {
        &mut self.speech
    }

    /// Braille renderer.
    pub fn braille(&self) -> &B {
        &self.braille
    }

    /// Mutable braille renderer.
    pub fn braille_mut(&mut self) -> &mut B {
        &mut self.braille
    }

    /// The editable being tracked.
    pub fn tracked_node(&self) -> Option<N> {
        self.tracked.as_ref().map(|tracked| tracked.node)
    }

    /// Whether `node` is tracked with the rich line engine.
    pub fn is_rich(&self) -> bool {
        matches!(
            self.tracked.as_ref().map(|tracked| &tracked.handler),
            Some(Handler::Rich(_))
        )
    }

    /// Suppress speech while the host reads continuously. Braille keeps following the
    /// selection.
    pub fn set_reading_continuously(&mut self, reading: bool) {
        self.reading_continuously = reading;
    }

    /// Start tracking `node`, replacing any previous session state, and show its current
    /// line in braille.
    pub fn on_focusable_editable_found<T>(&mut self, tree: &T, node: N) -> Option<Transition>
    where
        T: TreeAdapter<Node = N> + ?Sized,
    {
        let handler = if self.config.rich_text && tree.is_rich_editable(node) {
            Handler::Rich(SelectionDiffEngine::new(node, self.config))
        } else {
            Handler::Plain(PlainTextHandler::new(node))
        };
        debug!("tracking editable {:?}", node);
        self.tracked = Some(Tracked { node, handler });
        self.dispatch(tree)
    }

    /// Handle a tree event. Events for anything but the tracked, focused, editable node are
    /// ignored.
    ///
    /// Returns the transition taken by the rich engine, if it ran.
    pub fn on_event<T>(&mut self, tree: &T, kind: EventKind, target: N) -> Option<Transition>
    where
        T: TreeAdapter<Node = N> + ?Sized,
    {
        if self.tracked_node() != Some(target) {
            debug!("ignoring {:?} on {:?}: {}", kind, target, EditError::NotTracked);
            return None;
        }
        if !tree.is_focused(target) || !tree.is_editable(target) {
            debug!("ignoring {:?} on {:?}: not a focused editable", kind, target);
            return None;
        }
        self.dispatch(tree)
    }

    /// Stop tracking and discard all state.
    pub fn end_session(&mut self) {
        if let Some(tracked) = self.tracked.take() {
            debug!("stopped tracking editable {:?}", tracked.node);
        }
    }

    fn dispatch<T>(&mut self, tree: &T) -> Option<Transition>
    where
        T: TreeAdapter<Node = N> + ?Sized,
    {
        match self.run(tree) {
            Ok((transition, feedback)) => {
                feedback.deliver(&mut self.speech, &mut self.braille);
                transition
            }
            Err(err) => {
                debug!("edit event skipped: {}", err);
                None
            }
        }
    }

    fn run<T>(&mut self, tree: &T) -> Result<(Option<Transition>, Feedback)>
    where
        T: TreeAdapter<Node = N> + ?Sized,
    {
        let tracked = self.tracked.as_mut().ok_or(EditError::NotTracked)?;
        match &mut tracked.handler {
            Handler::Rich(engine) => {
                let outcome = engine.process(tree, self.reading_continuously)?;
                Ok((Some(outcome.transition), outcome.feedback))
            }
            Handler::Plain(handler) => {
                let feedback = handler.process(tree, self.reading_continuously)?;
                Ok((None, feedback))
            }
        }
    }
}
