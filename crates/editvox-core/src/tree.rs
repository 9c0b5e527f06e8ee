//! Read-only view over the host's text-bearing tree.
//!
//! The host owns the tree and may reparent or remove nodes between events; this crate only
//! ever reads it through [`TreeAdapter`]. Node handles are plain copyable ids, so every cached
//! value built from the tree must be re-validated (see [`TreeAdapter::is_valid`]).
//!
//! # On-line links
//!
//! Hosts link the leaves that render on one visual line with previous/next "on-line"
//! pointers. These links are advisory: they can be missing or asymmetric. Line construction
//! only calls [`TreeAdapter::line_neighbor`], which follows the links when present and falls
//! back to sibling chains that still agree with them.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;

use crate::cursor::Selection;
use crate::marker::Marker;
use crate::style::TextStyle;
use crate::text::utf16_len;

/// Node roles relevant to edit tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeRole {
    /// Root of an editable region.
    TextField,
    /// Block-level container (paragraph, div).
    Paragraph,
    /// A run of text whose children are inline text boxes.
    StaticText,
    /// Leaf fragment of a static text on one visual line.
    InlineTextBox,
    /// Hard line break leaf.
    LineBreak,
    /// Link container.
    Link,
    /// Heading container with its level.
    Heading(u8),
    /// List item container.
    ListItem,
    /// Non-text leaf.
    Image,
    /// Anything else.
    Generic,
}

impl NodeRole {
    /// Whether nodes of this role carry text the user edits.
    pub fn is_text(self) -> bool {
        matches!(
            self,
            NodeRole::StaticText | NodeRole::InlineTextBox | NodeRole::LineBreak
        )
    }

    /// Spoken role label for roles worth announcing alongside their text.
    pub fn label(self) -> Option<String> {
        match self {
            NodeRole::Link => Some("Link".to_string()),
            NodeRole::Heading(level) => Some(format!("Heading {}", level)),
            NodeRole::ListItem => Some("List item".to_string()),
            NodeRole::Image => Some("Image".to_string()),
            _ => None,
        }
    }
}

/// Traversal direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards the start of the document.
    Backward,
    /// Towards the end of the document.
    Forward,
}

/// Capability interface implemented once per host tree type.
pub trait TreeAdapter {
    /// Node handle.
    type Node: Copy + Eq + Hash + fmt::Debug;

    /// Whether `node` still exists in the tree.
    fn is_valid(&self, node: Self::Node) -> bool;

    /// Role of `node`.
    fn role(&self, node: Self::Node) -> NodeRole;

    /// Text of `node`. For containers this is the text of their whole subtree.
    fn text(&self, node: Self::Node) -> Option<Cow<'_, str>>;

    /// Parent of `node`.
    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    /// First child of `node`.
    fn first_child(&self, node: Self::Node) -> Option<Self::Node>;

    /// Last child of `node`.
    fn last_child(&self, node: Self::Node) -> Option<Self::Node>;

    /// Previous sibling of `node`.
    fn previous_sibling(&self, node: Self::Node) -> Option<Self::Node>;

    /// Next sibling of `node`.
    fn next_sibling(&self, node: Self::Node) -> Option<Self::Node>;

    /// Previous leaf on the same visual line, as reported by the host.
    fn previous_on_line(&self, node: Self::Node) -> Option<Self::Node>;

    /// Next leaf on the same visual line, as reported by the host.
    fn next_on_line(&self, node: Self::Node) -> Option<Self::Node>;

    /// Selection inside the editable region rooted at `root`.
    fn selection(&self, root: Self::Node) -> Option<Selection<Self::Node>>;

    /// Whether `node` has input focus.
    fn is_focused(&self, node: Self::Node) -> bool;

    /// Whether `node` is editable.
    fn is_editable(&self, node: Self::Node) -> bool;

    /// Whether `node` is a rich (multi-node) editable region.
    fn is_rich_editable(&self, _node: Self::Node) -> bool {
        false
    }

    /// Whether selection changes in `node` should only be shown in braille.
    fn braille_only(&self, _node: Self::Node) -> bool {
        false
    }

    /// Formatting of `node`.
    fn style(&self, _node: Self::Node) -> TextStyle {
        TextStyle::default()
    }

    /// Spelling/grammar markers of `node`, relative to its text.
    fn markers(&self, _node: Self::Node) -> Vec<Marker> {
        Vec::new()
    }

    /// Length of `node`'s text in UTF-16 code units.
    fn text_len(&self, node: Self::Node) -> usize {
        self.text(node).map_or(0, |text| utf16_len(&text))
    }

    /// Whether `node` has no children.
    fn is_leaf(&self, node: Self::Node) -> bool {
        self.first_child(node).is_none()
    }

    /// Nearest non-leaf ancestor of a leaf, or the node itself for non-leaves and orphans.
    fn container_of(&self, node: Self::Node) -> Self::Node {
        if self.is_leaf(node) {
            self.parent(node).unwrap_or(node)
        } else {
            node
        }
    }

    /// The neighboring leaf on the same line.
    ///
    /// Follows the host's on-line link when it points at a live node. Otherwise accepts the
    /// adjacent sibling's nearest descendant only if that descendant links back to `node`.
    fn line_neighbor(&self, node: Self::Node, direction: Direction) -> Option<Self::Node> {
        match direction {
            Direction::Backward => {
                if let Some(prev) = self.previous_on_line(node).filter(|n| self.is_valid(*n)) {
                    return Some(prev);
                }
                let sibling = self.previous_sibling(node)?;
                let candidate = last_descendant(self, sibling);
                (self.next_on_line(candidate) == Some(node)).then_some(candidate)
            }
            Direction::Forward => {
                if let Some(next) = self.next_on_line(node).filter(|n| self.is_valid(*n)) {
                    return Some(next);
                }
                let sibling = self.next_sibling(node)?;
                let candidate = first_descendant(self, sibling);
                (self.previous_on_line(candidate) == Some(node)).then_some(candidate)
            }
        }
    }
}

/// Deepest first descendant of `node` (the node itself for leaves).
pub fn first_descendant<T: TreeAdapter + ?Sized>(tree: &T, mut node: T::Node) -> T::Node {
    while let Some(child) = tree.first_child(node) {
        node = child;
    }
    node
}

/// Deepest last descendant of `node` (the node itself for leaves).
pub fn last_descendant<T: TreeAdapter + ?Sized>(tree: &T, mut node: T::Node) -> T::Node {
    while let Some(child) = tree.last_child(node) {
        node = child;
    }
    node
}

/// Next leaf after `node` in document order.
pub fn next_leaf<T: TreeAdapter + ?Sized>(tree: &T, mut node: T::Node) -> Option<T::Node> {
    loop {
        if let Some(sibling) = tree.next_sibling(node) {
            return Some(first_descendant(tree, sibling));
        }
        node = tree.parent(node)?;
    }
}

/// Previous leaf before `node` in document order.
pub fn previous_leaf<T: TreeAdapter + ?Sized>(tree: &T, mut node: T::Node) -> Option<T::Node> {
    loop {
        if let Some(sibling) = tree.previous_sibling(node) {
            return Some(last_descendant(tree, sibling));
        }
        node = tree.parent(node)?;
    }
}

/// Ancestors of `node` from the root down to and including `node`.
pub fn ancestors<T: TreeAdapter + ?Sized>(tree: &T, node: T::Node) -> Vec<T::Node> {
    let mut chain = vec![node];
    let mut current = node;
    while let Some(parent) = tree.parent(current) {
        chain.push(parent);
        current = parent;
    }
    chain.reverse();
    chain
}

/// Number of previous siblings of `node`.
pub fn index_in_parent<T: TreeAdapter + ?Sized>(tree: &T, node: T::Node) -> usize {
    let mut index = 0;
    let mut current = node;
    while let Some(prev) = tree.previous_sibling(current) {
        index += 1;
        current = prev;
    }
    index
}

/// The `index`-th child of `parent`.
pub fn child_at<T: TreeAdapter + ?Sized>(tree: &T, parent: T::Node, index: usize) -> Option<T::Node> {
    let mut child = tree.first_child(parent)?;
    for _ in 0..index {
        child = tree.next_sibling(child)?;
    }
    Some(child)
}

/// Document order of two nodes. Ancestors order before their descendants.
///
/// Returns `None` when the nodes do not share a root.
pub fn compare_nodes<T: TreeAdapter + ?Sized>(
    tree: &T,
    a: T::Node,
    b: T::Node,
) -> Option<Ordering> {
    if a == b {
        return Some(Ordering::Equal);
    }
    let chain_a = ancestors(tree, a);
    let chain_b = ancestors(tree, b);
    if chain_a.first() != chain_b.first() {
        return None;
    }
    let shared = chain_a
        .iter()
        .zip(&chain_b)
        .take_while(|(x, y)| x == y)
        .count();
    match (chain_a.get(shared), chain_b.get(shared)) {
        (None, _) => Some(Ordering::Less),
        (_, None) => Some(Ordering::Greater),
        (Some(x), Some(y)) => Some(index_in_parent(tree, *x).cmp(&index_in_parent(tree, *y))),
    }
}

/// UTF-16 length of the text of the siblings before `node`.
pub fn text_before_in_parent<T: TreeAdapter + ?Sized>(tree: &T, node: T::Node) -> usize {
    let mut total = 0;
    let mut current = node;
    while let Some(prev) = tree.previous_sibling(current) {
        total += tree.text_len(prev);
        current = prev;
    }
    total
}

/// UTF-16 length of the text of the siblings after `node`.
pub fn text_after_in_parent<T: TreeAdapter + ?Sized>(tree: &T, node: T::Node) -> usize {
    let mut total = 0;
    let mut current = node;
    while let Some(next) = tree.next_sibling(current) {
        total += tree.text_len(next);
        current = next;
    }
    total
}

/// Offset of `offset` in `node` measured in the text of its ancestor `within`.
///
/// Returns `None` if `within` is not an ancestor-or-self of `node`.
pub fn offset_within<T: TreeAdapter + ?Sized>(
    tree: &T,
    within: T::Node,
    node: T::Node,
    offset: usize,
) -> Option<usize> {
    let mut total = offset;
    let mut current = node;
    while current != within {
        total += text_before_in_parent(tree, current);
        current = tree.parent(current)?;
    }
    Some(total)
}
