//! In-memory tree implementing [`TreeAdapter`].
//!
//! Nodes live in a slot arena addressed by generational [`NodeId`]s: removing a node bumps its
//! slot's generation, so ids held by a stale [`EditableLine`](crate::EditableLine) stop
//! resolving instead of silently pointing at a reused slot.

use std::borrow::Cow;
use std::collections::HashMap;

use crate::cursor::{Cursor, Selection};
use crate::error::{EditError, Result};
use crate::marker::Marker;
use crate::style::TextStyle;
use crate::tree::{NodeRole, TreeAdapter};

/// Handle of a node in an [`ArenaTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

#[derive(Debug, Clone)]
struct NodeData {
    role: NodeRole,
    text: String,
    style: Option<TextStyle>,
    markers: Vec<Marker>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    previous_on_line: Option<NodeId>,
    next_on_line: Option<NodeId>,
    editable: bool,
    rich_editable: bool,
    braille_only: bool,
}

impl NodeData {
    fn new(role: NodeRole, parent: Option<NodeId>) -> Self {
        Self {
            role,
            text: String::new(),
            style: None,
            markers: Vec::new(),
            parent,
            children: Vec::new(),
            previous_on_line: None,
            next_on_line: None,
            editable: false,
            rich_editable: false,
            braille_only: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
struct Slot {
    generation: u32,
    data: Option<NodeData>,
}

/// A mutable tree of text-bearing nodes.
///
/// Leaves carry text; a container's text is the concatenation of its children's text. Styles
/// are inherited from the nearest styled ancestor, and editability from the nearest editable
/// one.
#[derive(Debug, Clone, Default)]
pub struct ArenaTree {
    slots: Vec<Slot>,
    free: Vec<u32>,
    focus: Option<NodeId>,
    selections: HashMap<NodeId, Selection<NodeId>>,
}

impl ArenaTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.data.is_some()).count()
    }

    /// Returns `true` if the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Add a parentless node.
    pub fn add_root(&mut self, role: NodeRole) -> NodeId {
        self.alloc(NodeData::new(role, None))
    }

    /// Append a new child to `parent`.
    pub fn append_child(&mut self, parent: NodeId, role: NodeRole) -> Result<NodeId> {
        let index = self.node(parent)?.children.len();
        self.insert_child(parent, index, role)
    }

    /// Append a new leaf with `text` to `parent`.
    pub fn append_text(&mut self, parent: NodeId, role: NodeRole, text: &str) -> Result<NodeId> {
        let child = self.append_child(parent, role)?;
        self.set_text(child, text)?;
        Ok(child)
    }

    /// Insert a new child at `index` among `parent`'s children (clamped to the end).
    pub fn insert_child(&mut self, parent: NodeId, index: usize, role: NodeRole) -> Result<NodeId> {
        self.node(parent)?;
        let child = self.alloc(NodeData::new(role, Some(parent)));
        let children = &mut self.node_mut(parent)?.children;
        let index = index.min(children.len());
        children.insert(index, child);
        Ok(child)
    }

    /// Remove `node` and its whole subtree. Ids of removed nodes become invalid.
    pub fn remove(&mut self, node: NodeId) -> Result<()> {
        let parent = self.node(node)?.parent;
        if let Some(parent) = parent {
            self.node_mut(parent)?.children.retain(|child| *child != node);
        }
        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            let Some(slot) = self.slots.get_mut(id.index as usize) else {
                continue;
            };
            if slot.generation != id.generation {
                continue;
            }
            if let Some(data) = slot.data.take() {
                stack.extend(data.children);
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(id.index);
            }
            self.selections.remove(&id);
            if self.focus == Some(id) {
                self.focus = None;
            }
        }
        Ok(())
    }

    /// Replace the text of a leaf.
    pub fn set_text(&mut self, node: NodeId, text: &str) -> Result<()> {
        self.node_mut(node)?.text = text.to_string();
        Ok(())
    }

    /// Set the style of `node` and, unless overridden, its descendants.
    pub fn set_style(&mut self, node: NodeId, style: TextStyle) -> Result<()> {
        self.node_mut(node)?.style = Some(style);
        Ok(())
    }

    /// Replace the markers of `node`.
    pub fn set_markers(&mut self, node: NodeId, markers: Vec<Marker>) -> Result<()> {
        self.node_mut(node)?.markers = markers;
        Ok(())
    }

    /// Mark `node` (and its subtree) editable.
    pub fn set_editable(&mut self, node: NodeId, editable: bool) -> Result<()> {
        self.node_mut(node)?.editable = editable;
        Ok(())
    }

    /// Mark `node` as a rich editable region. Rich regions are editable.
    pub fn set_rich_editable(&mut self, node: NodeId, rich: bool) -> Result<()> {
        let data = self.node_mut(node)?;
        data.rich_editable = rich;
        data.editable |= rich;
        Ok(())
    }

    /// Restrict selection feedback in `node` to braille.
    pub fn set_braille_only(&mut self, node: NodeId, braille_only: bool) -> Result<()> {
        self.node_mut(node)?.braille_only = braille_only;
        Ok(())
    }

    /// Set the selection reported for the editable region rooted at `root`.
    pub fn set_selection(&mut self, root: NodeId, selection: Selection<NodeId>) -> Result<()> {
        self.node(root)?;
        self.selections.insert(root, selection);
        Ok(())
    }

    /// Place a caret at `offset` in `node` for the region rooted at `root`.
    pub fn set_caret(&mut self, root: NodeId, node: NodeId, offset: usize) -> Result<()> {
        self.set_selection(root, Selection::collapsed(Cursor::new(node, offset)))
    }

    /// Move input focus.
    pub fn set_focus(&mut self, node: Option<NodeId>) {
        self.focus = node;
    }

    /// Link `nodes` as one visual line, in order.
    pub fn link_line(&mut self, nodes: &[NodeId]) -> Result<()> {
        for (i, &node) in nodes.iter().enumerate() {
            let previous = i.checked_sub(1).map(|p| nodes[p]);
            let next = nodes.get(i + 1).copied();
            let data = self.node_mut(node)?;
            data.previous_on_line = previous;
            data.next_on_line = next;
        }
        Ok(())
    }

    /// Override the next-on-line link of `node`.
    pub fn set_next_on_line(&mut self, node: NodeId, next: Option<NodeId>) -> Result<()> {
        self.node_mut(node)?.next_on_line = next;
        Ok(())
    }

    /// Override the previous-on-line link of `node`.
    pub fn set_previous_on_line(&mut self, node: NodeId, previous: Option<NodeId>) -> Result<()> {
        self.node_mut(node)?.previous_on_line = previous;
        Ok(())
    }

    fn alloc(&mut self, data: NodeData) -> NodeId {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.data = Some(data);
            return NodeId {
                index,
                generation: slot.generation,
            };
        }
        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            data: Some(data),
        });
        NodeId {
            index,
            generation: 0,
        }
    }

    fn get(&self, id: NodeId) -> Option<&NodeData> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.data.as_ref())
    }

    fn node(&self, id: NodeId) -> Result<&NodeData> {
        self.get(id).ok_or(EditError::StaleNode)
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut NodeData> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.data.as_mut())
            .ok_or(EditError::StaleNode)
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        if let Some(data) = self.get(id) {
            if data.children.is_empty() {
                out.push_str(&data.text);
            } else {
                for child in &data.children {
                    self.collect_text(*child, out);
                }
            }
        }
    }

    fn sibling(&self, id: NodeId, step: isize) -> Option<NodeId> {
        let parent = self.get(self.get(id)?.parent?)?;
        let position = parent.children.iter().position(|child| *child == id)?;
        let target = position.checked_add_signed(step)?;
        parent.children.get(target).copied()
    }
}

impl TreeAdapter for ArenaTree {
    type Node = NodeId;

    fn is_valid(&self, node: NodeId) -> bool {
        self.get(node).is_some()
    }

    fn role(&self, node: NodeId) -> NodeRole {
        self.get(node).map_or(NodeRole::Generic, |data| data.role)
    }

    fn text(&self, node: NodeId) -> Option<Cow<'_, str>> {
        let data = self.get(node)?;
        if data.children.is_empty() {
            return Some(Cow::Borrowed(&data.text));
        }
        let mut text = String::new();
        self.collect_text(node, &mut text);
        Some(Cow::Owned(text))
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.get(node)?.parent
    }

    fn first_child(&self, node: NodeId) -> Option<NodeId> {
        self.get(node)?.children.first().copied()
    }

    fn last_child(&self, node: NodeId) -> Option<NodeId> {
        self.get(node)?.children.last().copied()
    }

    fn previous_sibling(&self, node: NodeId) -> Option<NodeId> {
        self.sibling(node, -1)
    }

    fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        self.sibling(node, 1)
    }

    fn previous_on_line(&self, node: NodeId) -> Option<NodeId> {
        self.get(node)?.previous_on_line
    }

    fn next_on_line(&self, node: NodeId) -> Option<NodeId> {
        self.get(node)?.next_on_line
    }

    fn selection(&self, root: NodeId) -> Option<Selection<NodeId>> {
        self.get(root)?;
        self.selections.get(&root).copied()
    }

    fn is_focused(&self, node: NodeId) -> bool {
        self.is_valid(node) && self.focus == Some(node)
    }

    fn is_editable(&self, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            match self.get(id) {
                Some(data) if data.editable => return true,
                Some(data) => current = data.parent,
                None => return false,
            }
        }
        false
    }

    fn is_rich_editable(&self, node: NodeId) -> bool {
        self.get(node).is_some_and(|data| data.rich_editable)
    }

    fn braille_only(&self, node: NodeId) -> bool {
        self.get(node).is_some_and(|data| data.braille_only)
    }

    fn style(&self, node: NodeId) -> TextStyle {
        let mut current = Some(node);
        while let Some(id) = current {
            let Some(data) = self.get(id) else {
                break;
            };
            if let Some(style) = &data.style {
                return style.clone();
            }
            current = data.parent;
        }
        TextStyle::default()
    }

    fn markers(&self, node: NodeId) -> Vec<Marker> {
        self.get(node).map_or_else(Vec::new, |data| data.markers.clone())
    }
}
