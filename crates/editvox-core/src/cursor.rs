//! Cursors and selections over host tree nodes.

use std::cmp::Ordering;

use crate::tree::{NodeRole, TreeAdapter, child_at, compare_nodes, last_descendant};

/// A position inside a node: `offset` counts UTF-16 code units of the node's own text.
///
/// On a [`StaticText`](crate::NodeRole::StaticText) container the offset is a text offset into
/// the container's text; on any other non-leaf node it is a child index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cursor<N> {
    /// Owning node.
    pub node: N,
    /// Offset within the node.
    pub offset: usize,
}

impl<N: Copy + Eq> Cursor<N> {
    /// Create a new cursor.
    pub fn new(node: N, offset: usize) -> Self {
        Self { node, offset }
    }

    /// The equivalent position on the deepest leaf.
    ///
    /// Text offsets on static texts are carried into the child that contains them; a position
    /// exactly between two children belongs to the later one. Child indices past the end map to
    /// the end of the last descendant leaf. At the leaf the offset is clamped to its text.
    pub fn deep_equivalent<T>(self, tree: &T) -> Self
    where
        T: TreeAdapter<Node = N> + ?Sized,
    {
        let mut node = self.node;
        let mut offset = self.offset;
        while let Some(first) = tree.first_child(node) {
            if tree.role(node) == NodeRole::StaticText {
                let mut child = first;
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
            } else if let Some(child) = child_at(tree, node, offset) {
                node = child;
                offset = 0;
            } else {
                node = last_descendant(tree, node);
                offset = tree.text_len(node);
                break;
            }
        }
        Self {
            node,
            offset: offset.min(tree.text_len(node)),
        }
    }

    /// Document order of two cursors, or `None` if they live in different trees.
    pub fn compare<T>(&self, other: &Self, tree: &T) -> Option<Ordering>
    where
        T: TreeAdapter<Node = N> + ?Sized,
    {
        match compare_nodes(tree, self.node, other.node)? {
            Ordering::Equal => Some(self.offset.cmp(&other.offset)),
            order => Some(order),
        }
    }
}

/// Direction of a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionDirection {
    /// The focus is at or after the anchor.
    Forward,
    /// The focus is before the anchor.
    Backward,
}

/// A two-endpoint selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Selection<N> {
    /// The fixed endpoint.
    pub anchor: Cursor<N>,
    /// The moving endpoint.
    pub focus: Cursor<N>,
}

impl<N: Copy + Eq> Selection<N> {
    /// Create a new selection.
    pub fn new(anchor: Cursor<N>, focus: Cursor<N>) -> Self {
        Self { anchor, focus }
    }

    /// A caret at `cursor`.
    pub fn collapsed(cursor: Cursor<N>) -> Self {
        Self {
            anchor: cursor,
            focus: cursor,
        }
    }

    /// Whether anchor and focus are equal.
    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }

    /// Both endpoints replaced by their deep equivalents.
    pub fn deep_equivalent<T>(&self, tree: &T) -> Self
    where
        T: TreeAdapter<Node = N> + ?Sized,
    {
        Self {
            anchor: self.anchor.deep_equivalent(tree),
            focus: self.focus.deep_equivalent(tree),
        }
    }

    /// Direction of the selection. Endpoints in unrelated trees count as forward.
    pub fn direction<T>(&self, tree: &T) -> SelectionDirection
    where
        T: TreeAdapter<Node = N> + ?Sized,
    {
        match self.anchor.compare(&self.focus, tree) {
            Some(Ordering::Greater) => SelectionDirection::Backward,
            _ => SelectionDirection::Forward,
        }
    }

    /// Endpoints in document order: `(start, end)`.
    pub fn ordered<T>(&self, tree: &T) -> (Cursor<N>, Cursor<N>)
    where
        T: TreeAdapter<Node = N> + ?Sized,
    {
        match self.direction(tree) {
            SelectionDirection::Forward => (self.anchor, self.focus),
            SelectionDirection::Backward => (self.focus, self.anchor),
        }
    }
}
