//! Re-resolving a node after the tree has been mutated.
//!
//! A [`PathRecovery`] remembers the ancestor chain of a node together with the child index
//! taken at each step. When the node itself has been removed (for example because the host
//! rebuilt a paragraph's static text), the path is replayed from the deepest ancestor that is
//! still alive, which usually lands on the replacement node.

use crate::tree::{TreeAdapter, ancestors, child_at, index_in_parent};

/// Remembered location of a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathRecovery<N> {
    node: N,
    /// Root-first `(ancestor, index of the next step within it)` pairs.
    path: Vec<(N, usize)>,
}

impl<N: Copy + Eq> PathRecovery<N> {
    /// Record the current location of `node`.
    pub fn new<T>(tree: &T, node: N) -> Self
    where
        T: TreeAdapter<Node = N> + ?Sized,
    {
        let chain = ancestors(tree, node);
        let path = chain
            .windows(2)
            .map(|pair| (pair[0], index_in_parent(tree, pair[1])))
            .collect();
        Self { node, path }
    }

    /// The node this recovery was created for.
    pub fn original(&self) -> N {
        self.node
    }

    /// The original node if it is still valid, otherwise the node now found at the remembered
    /// path below the deepest surviving ancestor.
    ///
    /// Returns `None` when the path can no longer be replayed to its full depth, for example
    /// after the host removed the only child of a surviving ancestor.
    pub fn resolve<T>(&self, tree: &T) -> Option<N>
    where
        T: TreeAdapter<Node = N> + ?Sized,
    {
        if tree.is_valid(self.node) {
            return Some(self.node);
        }
        let deepest = self.path.iter().rposition(|(node, _)| tree.is_valid(*node))?;
        self.path[deepest..]
            .iter()
            .try_fold(self.path[deepest].0, |current, (_, index)| {
                child_at(tree, current, *index)
            })
    }
}
