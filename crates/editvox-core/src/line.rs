//! Logical lines over a tree of text nodes.
//!
//! A line is the run of leaves the host renders on one visual line. [`LineLocator`] builds an
//! [`EditableLine`] by seeding with a *base* leaf and extending backward and forward through
//! [`TreeAdapter::line_neighbor`]. The result is an immutable snapshot: the tree may change
//! under it at any time, so comparisons between lines go through container identity, local
//! offsets and [`PathRecovery`] rather than through cached node text.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::hash::Hash;

use log::trace;

use crate::cursor::Cursor;
use crate::recovery::PathRecovery;
use crate::text::{utf16_len, utf16_prefix, utf16_slice, utf16_suffix};
use crate::tree::{Direction, TreeAdapter, compare_nodes, next_leaf, offset_within};

/// A leaf's range of [`EditableLine::text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSegment<N> {
    /// The leaf.
    pub node: N,
    /// Start of the leaf's text within the line text.
    pub start: usize,
    /// End of the leaf's text within the line text.
    pub end: usize,
}

/// A consecutive run of segments sharing one container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerSpan<N> {
    /// The container.
    pub node: N,
    /// Start of the run within the line text.
    pub start: usize,
    /// End of the run within the line text.
    pub end: usize,
    /// Offset of the run's first character within the container's own text.
    pub container_offset: usize,
}

/// Snapshot of the logical line around a selection.
///
/// All offsets are UTF-16 code units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditableLine<N> {
    start: Cursor<N>,
    end: Cursor<N>,
    text: String,
    segments: Vec<LineSegment<N>>,
    containers: Vec<ContainerSpan<N>>,

    line_start: N,
    line_end: N,
    line_start_container: N,
    line_end_container: N,
    local_line_start_container_offset: usize,
    local_line_end_container_offset: usize,
    line_start_recovery: PathRecovery<N>,

    start_container: N,
    end_container: N,
    start_container_text: String,

    start_offset: usize,
    end_offset: usize,
    local_start_offset: usize,
    local_end_offset: usize,
    container_start_offset: usize,
    container_end_offset: usize,

    start_is_text: bool,
    end_is_text: bool,
}

/// Builds [`EditableLine`]s from cursors.
#[derive(Debug)]
pub struct LineLocator<'a, T: ?Sized> {
    tree: &'a T,
}

impl<'a, T> LineLocator<'a, T>
where
    T: TreeAdapter + ?Sized,
{
    /// Create a locator over `tree`.
    pub fn new(tree: &'a T) -> Self {
        Self { tree }
    }

    /// A collapsed line at `cursor`.
    pub fn point_line(&self, cursor: Cursor<T::Node>) -> EditableLine<T::Node> {
        self.compute_line(cursor, cursor, false)
    }

    /// The line holding a selection.
    ///
    /// Both endpoints are normalized to their deep equivalents and ordered. The line is built
    /// around the later endpoint unless `base_on_start` is set. An endpoint that is not part
    /// of the resulting line resolves to the line's start (for the start endpoint) or end (for
    /// the end endpoint).
    pub fn compute_line(
        &self,
        anchor: Cursor<T::Node>,
        focus: Cursor<T::Node>,
        base_on_start: bool,
    ) -> EditableLine<T::Node> {
        let tree = self.tree;
        let anchor = anchor.deep_equivalent(tree);
        let focus = focus.deep_equivalent(tree);
        let (start, end) = match anchor.compare(&focus, tree) {
            Some(Ordering::Greater) => (focus, anchor),
            _ => (anchor, focus),
        };
        let base = if base_on_start { start.node } else { end.node };
        let leaves = self.collect_line(base);

        let mut text = String::new();
        let mut segments = Vec::with_capacity(leaves.len());
        for &leaf in &leaves {
            let leaf_text = tree.text(leaf).unwrap_or_default();
            let begin = utf16_len(&text);
            text.push_str(&leaf_text);
            segments.push(LineSegment {
                node: leaf,
                start: begin,
                end: begin + utf16_len(&leaf_text),
            });
        }
        let len = utf16_len(&text);

        let mut containers: Vec<ContainerSpan<T::Node>> = Vec::new();
        for segment in &segments {
            let container = tree.container_of(segment.node);
            match containers.last_mut() {
                Some(span) if span.node == container => span.end = segment.end,
                _ => containers.push(ContainerSpan {
                    node: container,
                    start: segment.start,
                    end: segment.end,
                    container_offset: offset_within(tree, container, segment.node, 0).unwrap_or(0),
                }),
            }
        }

        let line_start = leaves.first().copied().unwrap_or(base);
        let line_end = leaves.last().copied().unwrap_or(base);
        let line_start_container = tree.container_of(line_start);
        let line_end_container = tree.container_of(line_end);
        let local_line_start_container_offset =
            offset_within(tree, line_start_container, line_start, 0).unwrap_or(0);
        let local_line_end_container_offset =
            offset_within(tree, line_end_container, line_end, tree.text_len(line_end)).unwrap_or(0);

        let start_container = tree.container_of(start.node);
        let end_container = tree.container_of(end.node);
        let start_container_text = tree
            .text(start_container)
            .map(Cow::into_owned)
            .unwrap_or_default();

        let start_offset = segment_offset(&segments, start).unwrap_or(0).min(len);
        let end_offset = segment_offset(&segments, end).unwrap_or(len).min(len);

        EditableLine {
            start,
            end,
            segments,
            line_start,
            line_end,
            line_start_container,
            line_end_container,
            local_line_start_container_offset,
            local_line_end_container_offset,
            line_start_recovery: PathRecovery::new(tree, line_start_container),
            start_container,
            end_container,
            start_container_text,
            start_offset,
            end_offset: end_offset.max(start_offset),
            local_start_offset: offset_within(tree, start_container, start.node, start.offset)
                .unwrap_or(start.offset),
            local_end_offset: offset_within(tree, end_container, end.node, end.offset)
                .unwrap_or(end.offset),
            container_start_offset: containers
                .iter()
                .find(|span| span.node == start_container)
                .map_or(0, |span| span.start),
            container_end_offset: containers
                .iter()
                .rev()
                .find(|span| span.node == end_container)
                .map_or(len, |span| span.end),
            containers,
            text,
            start_is_text: tree.role(start.node).is_text(),
            end_is_text: tree.role(end.node).is_text(),
        }
    }

    /// Leaves on the same line as `base`, in order.
    fn collect_line(&self, base: T::Node) -> Vec<T::Node> {
        let mut visited = HashSet::from([base]);

        let mut before = Vec::new();
        let mut node = base;
        while let Some(prev) = self.tree.line_neighbor(node, Direction::Backward) {
            if !visited.insert(prev) {
                trace!("on-line links loop back to {:?}", prev);
                break;
            }
            before.push(prev);
            node = prev;
        }

        let mut leaves: Vec<T::Node> = before.into_iter().rev().collect();
        leaves.push(base);

        node = base;
        while let Some(next) = self.tree.line_neighbor(node, Direction::Forward) {
            if !visited.insert(next) {
                trace!("on-line links loop back to {:?}", next);
                break;
            }
            leaves.push(next);
            node = next;
        }
        leaves
    }
}

fn segment_offset<N: Copy + Eq>(segments: &[LineSegment<N>], cursor: Cursor<N>) -> Option<usize> {
    segments
        .iter()
        .find(|segment| segment.node == cursor.node)
        .map(|segment| (segment.start + cursor.offset).min(segment.end))
}

impl<N: Copy + Eq + Hash> EditableLine<N> {
    /// Selection start, on the deepest equivalent node.
    pub fn start(&self) -> Cursor<N> {
        self.start
    }

    /// Selection end, on the deepest equivalent node.
    pub fn end(&self) -> Cursor<N> {
        self.end
    }

    /// Concatenated text of the line's leaves.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Per-leaf ranges of [`EditableLine::text`].
    pub fn segments(&self) -> &[LineSegment<N>] {
        &self.segments
    }

    /// Per-container ranges of [`EditableLine::text`].
    pub fn containers(&self) -> &[ContainerSpan<N>] {
        &self.containers
    }

    /// First leaf on the line.
    pub fn line_start(&self) -> N {
        self.line_start
    }

    /// Last leaf on the line.
    pub fn line_end(&self) -> N {
        self.line_end
    }

    /// Container of the first leaf on the line.
    pub fn line_start_container(&self) -> N {
        self.line_start_container
    }

    /// Container of the last leaf on the line.
    pub fn line_end_container(&self) -> N {
        self.line_end_container
    }

    /// Where the line starts within [`EditableLine::line_start_container`]'s text.
    pub fn local_line_start_container_offset(&self) -> usize {
        self.local_line_start_container_offset
    }

    /// Where the line ends within [`EditableLine::line_end_container`]'s text.
    pub fn local_line_end_container_offset(&self) -> usize {
        self.local_line_end_container_offset
    }

    /// Container of the selection start.
    pub fn start_container(&self) -> N {
        self.start_container
    }

    /// Container of the selection end.
    pub fn end_container(&self) -> N {
        self.end_container
    }

    /// Text of [`EditableLine::start_container`] when the line was built.
    pub fn start_container_text(&self) -> &str {
        &self.start_container_text
    }

    /// Selection start within the line text.
    pub fn start_offset(&self) -> usize {
        self.start_offset
    }

    /// Selection end within the line text.
    pub fn end_offset(&self) -> usize {
        self.end_offset
    }

    /// Selection start within the start container's text.
    pub fn local_start_offset(&self) -> usize {
        self.local_start_offset
    }

    /// Selection end within the end container's text.
    pub fn local_end_offset(&self) -> usize {
        self.local_end_offset
    }

    /// Where the start container's text begins within the line text.
    pub fn container_start_offset(&self) -> usize {
        self.container_start_offset
    }

    /// Where the end container's text ends within the line text.
    pub fn container_end_offset(&self) -> usize {
        self.container_end_offset
    }

    /// Whether the selection is a caret.
    pub fn has_collapsed_selection(&self) -> bool {
        self.start == self.end
    }

    /// Whether both endpoints sit on text nodes.
    pub fn has_text_selection(&self) -> bool {
        self.start_is_text && self.end_is_text
    }

    /// Selected part of the line text.
    pub fn selected_text(&self) -> &str {
        utf16_slice(&self.text, self.start_offset, self.end_offset)
    }

    /// Whether `other` covers the same visual line.
    ///
    /// Matches on the line's start container and offset, on its end container and offset, or
    /// on the start container re-resolved through its remembered path, so a line stays equal
    /// to itself after the host replaces its start container.
    pub fn is_same_line<T>(&self, other: &Self, tree: &T) -> bool
    where
        T: TreeAdapter<Node = N> + ?Sized,
    {
        if self.line_start_container == other.line_start_container
            && self.local_line_start_container_offset == other.local_line_start_container_offset
        {
            return true;
        }
        if self.line_end_container == other.line_end_container
            && self.local_line_end_container_offset == other.local_line_end_container_offset
        {
            return true;
        }
        if self.local_line_start_container_offset != other.local_line_start_container_offset {
            return false;
        }
        match (
            self.line_start_recovery.resolve(tree),
            other.line_start_recovery.resolve(tree),
        ) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    /// Same line, same selection offsets and same text.
    pub fn is_same_line_and_selection<T>(&self, other: &Self, tree: &T) -> bool
    where
        T: TreeAdapter<Node = N> + ?Sized,
    {
        self.is_same_line(other, tree)
            && self.start_offset == other.start_offset
            && self.end_offset == other.end_offset
            && self.text == other.text
    }

    /// Whether this line comes before `other` in document order.
    pub fn is_before_line<T>(&self, other: &Self, tree: &T) -> bool
    where
        T: TreeAdapter<Node = N> + ?Sized,
    {
        if self.is_same_line(other, tree) {
            return false;
        }
        if self.line_start_container == other.line_start_container {
            return self.local_line_start_container_offset < other.local_line_start_container_offset;
        }
        compare_nodes(tree, self.line_start_container, other.line_start_container)
            == Some(Ordering::Less)
    }

    /// Whether the line still exists in `tree`.
    ///
    /// Re-derives the first and last leaf from the line containers and their offsets and checks
    /// that on-line links connect them in at least one direction.
    pub fn is_valid_line<T>(&self, tree: &T) -> bool
    where
        T: TreeAdapter<Node = N> + ?Sized,
    {
        if !tree.is_valid(self.line_start_container) || !tree.is_valid(self.line_end_container) {
            return false;
        }
        let first = leaf_at(tree, self.line_start_container, self.local_line_start_container_offset);
        let last_offset = if self.line_end_container == self.line_start_container
            && self.local_line_end_container_offset <= self.local_line_start_container_offset
        {
            self.local_line_start_container_offset
        } else {
            self.local_line_end_container_offset.saturating_sub(1)
        };
        let last = leaf_at(tree, self.line_end_container, last_offset);

        reaches(tree, first, last, Direction::Forward) || reaches(tree, last, first, Direction::Backward)
    }
}

/// The leaf holding `offset` of `node`'s text. A boundary between two children belongs to the
/// later one.
fn leaf_at<T: TreeAdapter + ?Sized>(tree: &T, mut node: T::Node, mut offset: usize) -> T::Node {
    while let Some(mut child) = tree.first_child(node) {
        loop {
            let len = tree.text_len(child);
            match tree.next_sibling(child) {
                Some(next) if offset >= len => {
                    offset -= len;
                    child = next;
                }
                _ => break,
            }
        }
        node = child;
    }
    node
}

fn reaches<T: TreeAdapter + ?Sized>(
    tree: &T,
    from: T::Node,
    to: T::Node,
    direction: Direction,
) -> bool {
    let mut visited = HashSet::from([from]);
    let mut node = from;
    loop {
        if node == to {
            return true;
        }
        match tree.line_neighbor(node, direction) {
            Some(next) if visited.insert(next) => node = next,
            _ => return false,
        }
    }
}

/// Text between two cursors, crossing leaf boundaries.
///
/// Takes the rest of `from`'s node, the full text of every leaf strictly between, and the
/// beginning of `to`'s node; non-empty pieces are joined with a single space. Returns an empty
/// string if either node is gone or `to` does not follow `from`.
pub fn text_between<T>(tree: &T, from: Cursor<T::Node>, to: Cursor<T::Node>) -> String
where
    T: TreeAdapter + ?Sized,
{
    if !tree.is_valid(from.node) || !tree.is_valid(to.node) {
        return String::new();
    }
    let from_text = tree.text(from.node).unwrap_or_default();
    if from.node == to.node {
        return utf16_slice(&from_text, from.offset, to.offset).to_string();
    }

    let mut pieces = vec![utf16_suffix(&from_text, from.offset).to_string()];
    let mut node = from.node;
    loop {
        match next_leaf(tree, node) {
            Some(next) if next == to.node => break,
            Some(next) => {
                pieces.push(tree.text(next).map(Cow::into_owned).unwrap_or_default());
                node = next;
            }
            None => return String::new(),
        }
    }
    let to_text = tree.text(to.node).unwrap_or_default();
    pieces.push(utf16_prefix(&to_text, to.offset).to_string());

    pieces
        .into_iter()
        .filter(|piece| !piece.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
