//! Per-event state machine for rich editables.
//!
//! [`SelectionDiffEngine::process`] reads the current selection of the tracked region, builds
//! the lines around it, classifies the change against the previous event (see
//! [`Transition`]) and renders the matching description. The previous state is replaced only
//! when an event is processed successfully.

use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;

use log::{debug, trace};

use crate::config::EditConfig;
use crate::describe::{EditableTextState, TextChangeEvent};
use crate::error::{EditError, Result};
use crate::line::{EditableLine, LineLocator, text_between};
use crate::marker::{Marker, MarkerChange};
use crate::narrate;
use crate::output::{Feedback, Message, Personality};
use crate::style::StyleTracker;
use crate::text::grapheme_at;
use crate::transition::{RuleContext, Transition, classify};
use crate::tree::{TreeAdapter, offset_within};

/// Result of one processed event.
#[derive(Debug, Clone, PartialEq)]
pub struct EventOutcome {
    /// How the event was classified.
    pub transition: Transition,
    /// What to speak and show.
    pub feedback: Feedback,
}

#[derive(Debug, Clone)]
struct LineState<N> {
    line: EditableLine<N>,
    start_line: EditableLine<N>,
    end_line: EditableLine<N>,
    text: EditableTextState,
    styles: StyleTracker,
}

/// Tracks one rich editable region across events.
#[derive(Debug, Clone)]
pub struct SelectionDiffEngine<N> {
    root: N,
    config: EditConfig,
    state: Option<LineState<N>>,
}

impl<N> SelectionDiffEngine<N>
where
    N: Copy + Eq + Hash + fmt::Debug,
{
    /// Create an engine for the region rooted at `root`.
    pub fn new(root: N, config: EditConfig) -> Self {
        Self {
            root,
            config,
            state: None,
        }
    }

    /// Root of the tracked region.
    pub fn root(&self) -> N {
        self.root
    }

    /// Line produced by the last processed event.
    pub fn current_line(&self) -> Option<&EditableLine<N>> {
        self.state.as_ref().map(|state| &state.line)
    }

    /// Forget all previous state. The next event is treated as the first.
    pub fn reset(&mut self) {
        self.state = None;
    }

    /// Process the region's current selection and content.
    ///
    /// With `reading_continuously` set (or on a braille-only region) nothing is spoken, but
    /// state and braille still follow the selection.
    pub fn process<T>(&mut self, tree: &T, reading_continuously: bool) -> Result<EventOutcome>
    where
        T: TreeAdapter<Node = N> + ?Sized,
    {
        if !tree.is_valid(self.root) {
            return Err(EditError::StaleNode);
        }
        let selection = tree.selection(self.root).ok_or(EditError::NoSelection)?;
        let (start, end) = selection.deep_equivalent(tree).ordered(tree);
        if !tree.is_valid(start.node) || !tree.is_valid(end.node) {
            return Err(EditError::StaleNode);
        }

        let locator = LineLocator::new(tree);
        let start_line = locator.point_line(start);
        let end_line = locator.point_line(end);
        let speech_suppressed = reading_continuously || tree.braille_only(self.root);

        let Some(prev) = &self.state else {
            let line = locator.compute_line(start, end, false);
            let mut styles = StyleTracker::new();
            styles.diff(&tree.style(line.start().node));
            marker_changes(tree, &line, &mut styles);
            let feedback = Feedback {
                braille: Some(narrate::braille_line(tree, &line)),
                ..Feedback::default()
            };
            self.state = Some(LineState {
                text: EditableTextState::new(line_event(&line)),
                line,
                start_line,
                end_line,
                styles,
            });
            return Ok(EventOutcome {
                transition: Transition::Initial,
                feedback,
            });
        };

        let base_on_start = prev.end_line.is_same_line_and_selection(&end_line, tree);
        if base_on_start && prev.start_line.is_same_line_and_selection(&start_line, tree) {
            trace!("selection unchanged");
            return Ok(EventOutcome {
                transition: Transition::Unchanged,
                feedback: Feedback::default(),
            });
        }

        let cur = locator.compute_line(start, end, base_on_start);
        let transition = classify(&RuleContext {
            tree,
            root: self.root,
            cur: &cur,
            prev: &prev.line,
            start_line: &start_line,
            end_line: &end_line,
            prev_start_line: &prev.start_line,
            prev_end_line: &prev.end_line,
            speech_suppressed,
        });
        debug!("edit event classified as {:?}", transition);

        let mut next = prev.clone();
        let mut feedback = Feedback::default();
        self.describe(tree, transition, &cur, &mut next, &mut feedback);

        let style_changes = next.styles.diff(&tree.style(cur.start().node));
        let markers = marker_changes(tree, &cur, &mut next.styles);
        if !speech_suppressed {
            if self.config.verbose_styles {
                for announcement in style_changes.iter().filter_map(|change| change.announcement()) {
                    feedback.speak_with(announcement, Personality::Annotation);
                }
            }
            if self.config.announce_markers {
                for change in &markers {
                    feedback.speak_with(change.to_string(), Personality::Annotation);
                }
            }
        }
        feedback.style_changes = style_changes;
        feedback.marker_changes = markers;
        feedback.braille = Some(narrate::braille_line(tree, &cur));

        next.text.sync(line_event(&cur));
        next.line = cur;
        next.start_line = start_line;
        next.end_line = end_line;
        self.state = Some(next);

        Ok(EventOutcome {
            transition,
            feedback,
        })
    }

    fn describe<T>(
        &self,
        tree: &T,
        transition: Transition,
        cur: &EditableLine<N>,
        next: &mut LineState<N>,
        feedback: &mut Feedback,
    ) where
        T: TreeAdapter<Node = N> + ?Sized,
    {
        let prev = &next.line;
        match transition {
            Transition::IntraLine if cur.has_text_selection() => {
                let moved_forward = cur.start().compare(&prev.start(), tree) == Some(Ordering::Greater);
                if !prev.has_text_selection() && cur.has_collapsed_selection() && moved_forward {
                    let grapheme = grapheme_at(cur.text(), cur.start_offset());
                    if !grapheme.is_empty() {
                        feedback.speak(grapheme);
                    }
                } else {
                    next.text.changed(line_event(cur), feedback);
                }
            }
            Transition::IntraLine => narrate::describe_range(tree, cur.start(), cur.end(), feedback),
            Transition::TextChanged => {
                let before = EditableTextState::new(container_event(prev));
                before.describe_text_changed(&container_event(cur), feedback);
            }
            Transition::NoText => narrate::describe_range(tree, cur.start(), cur.end(), feedback),
            Transition::ExtendFromAnchor { forward, grew } => {
                let (was, now) = if forward {
                    (prev.end(), cur.end())
                } else {
                    (prev.start(), cur.start())
                };
                let (from, to) = match was.compare(&now, tree) {
                    Some(Ordering::Greater) => (now, was),
                    _ => (was, now),
                };
                let delta = text_between(tree, from, to);
                if !delta.is_empty() {
                    feedback.speak(delta);
                }
                feedback.say(if grew {
                    Message::Selected
                } else {
                    Message::Unselected
                });
            }
            Transition::FullSelection => {
                let selected = text_between(tree, cur.start(), cur.end());
                if !selected.is_empty() {
                    feedback.speak(selected);
                }
                feedback.say(Message::Selected);
            }
            Transition::Jump => narrate::speak_line(tree, self.root, cur, prev, feedback),
            Transition::Initial | Transition::Unchanged | Transition::BrailleOnly => {}
        }
    }
}

/// The line text and the selection within it.
fn line_event<N: Copy + Eq + Hash>(line: &EditableLine<N>) -> TextChangeEvent {
    TextChangeEvent::new(line.text(), line.start_offset(), line.end_offset())
}

/// The start container's text and the selection within it. An end in another container is
/// treated as a caret at the start.
fn container_event<N: Copy + Eq + Hash>(line: &EditableLine<N>) -> TextChangeEvent {
    let end = if line.end_container() == line.start_container() {
        line.local_end_offset()
    } else {
        line.local_start_offset()
    };
    TextChangeEvent::new(line.start_container_text(), line.local_start_offset(), end)
}

/// Diffs the markers covering the selection, in start-container offsets. Markers attached to
/// the start leaf itself are shifted into the container's coordinates.
fn marker_changes<T>(
    tree: &T,
    line: &EditableLine<T::Node>,
    styles: &mut StyleTracker,
) -> Vec<MarkerChange>
where
    T: TreeAdapter + ?Sized,
{
    let container = line.start_container();
    let leaf = line.start().node;
    let mut markers = tree.markers(container);
    if leaf != container {
        let shift = offset_within(tree, container, leaf, 0).unwrap_or(0);
        markers.extend(
            tree.markers(leaf)
                .into_iter()
                .map(|m| Marker::new(m.kind, m.start + shift, m.end + shift)),
        );
    }
    let end = if line.end_container() == container {
        line.local_end_offset()
    } else {
        tree.text_len(container)
    };
    styles.diff_markers(&markers, line.local_start_offset(), end)
}
