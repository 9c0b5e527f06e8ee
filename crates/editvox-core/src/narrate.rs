//! Speech and braille rendering of lines and node ranges.

use std::collections::HashSet;

use crate::cursor::Cursor;
use crate::line::EditableLine;
use crate::output::{BrailleLine, Feedback, Message, StyledSpan};
use crate::text::utf16_slice;
use crate::tree::{NodeRole, TreeAdapter, ancestors, next_leaf};

/// Speaks every leaf from `start` to `end`: its text followed by its role label, if any.
pub(crate) fn describe_range<T>(
    tree: &T,
    start: Cursor<T::Node>,
    end: Cursor<T::Node>,
    feedback: &mut Feedback,
) where
    T: TreeAdapter + ?Sized,
{
    let before = feedback.utterances.len();
    let mut node = start.node;
    loop {
        let role = tree.role(node);
        if role == NodeRole::LineBreak {
            feedback.speak("\n");
        } else {
            if let Some(text) = tree.text(node).filter(|text| !text.is_empty()) {
                feedback.speak(text.into_owned());
            }
            if let Some(label) = role.label() {
                feedback.speak(label);
            }
        }
        if node == end.node {
            break;
        }
        match next_leaf(tree, node) {
            Some(next) => node = next,
            None => break,
        }
    }
    if feedback.utterances.len() == before {
        feedback.say(Message::Blank);
    }
}

/// Speaks `line` container by container. Containers that were not part of `previous` also get
/// the labels of their labeled ancestors below `root` ("Link", "Heading 2", ...).
pub(crate) fn speak_line<T>(
    tree: &T,
    root: T::Node,
    line: &EditableLine<T::Node>,
    previous: &EditableLine<T::Node>,
    feedback: &mut Feedback,
) where
    T: TreeAdapter + ?Sized,
{
    let known: HashSet<T::Node> = previous
        .containers()
        .iter()
        .flat_map(|span| ancestors(tree, span.node))
        .collect();
    let mut labeled = HashSet::new();

    let before = feedback.utterances.len();
    for span in line.containers() {
        let text = utf16_slice(line.text(), span.start, span.end);
        if !text.is_empty() {
            feedback.speak(text);
        }
        for ancestor in ancestors(tree, span.node)
            .into_iter()
            .rev()
            .take_while(|node| *node != root)
        {
            if known.contains(&ancestor) || !labeled.insert(ancestor) {
                continue;
            }
            if let Some(label) = tree.role(ancestor).label() {
                feedback.speak(label);
            }
        }
    }
    if feedback.utterances.len() == before {
        feedback.say(Message::Blank);
    }
}

/// Braille content for `line`: its text, the styled runs of its leaves and the selection.
pub(crate) fn braille_line<T>(tree: &T, line: &EditableLine<T::Node>) -> BrailleLine
where
    T: TreeAdapter + ?Sized,
{
    let mut spans: Vec<StyledSpan> = Vec::new();
    for segment in line.segments() {
        if segment.start == segment.end {
            continue;
        }
        let style = tree.style(segment.node);
        if style.is_plain() {
            continue;
        }
        match spans.last_mut() {
            Some(last) if last.end == segment.start && last.style == style => last.end = segment.end,
            _ => spans.push(StyledSpan {
                start: segment.start,
                end: segment.end,
                style,
            }),
        }
    }
    BrailleLine {
        text: line.text().to_string(),
        spans,
        cursor_start: line.start_offset(),
        cursor_end: line.end_offset(),
    }
}
