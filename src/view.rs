//! Read-only handles onto a built [`SuffixTree`].
//!
//! These are what traversals and queries hand out, and the whole surface a
//! renderer or other external consumer needs: identifiers, labels, the tree
//! shape and suffix links. None of them can mutate the tree.

use crate::suffix_tree::{Span, SuffixTree};
use crate::symbol::Symbol;
use crate::tree::{EdgeKey, NodeKey};
use std::fmt;
use std::ops::Range;

/// A node of a [`SuffixTree`].
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    tree: &'a SuffixTree,
    key: NodeKey,
}

impl<'a> NodeRef<'a> {
    pub(crate) fn new(tree: &'a SuffixTree, key: NodeKey) -> Self {
        Self { tree, key }
    }

    pub fn key(&self) -> NodeKey {
        self.key
    }

    /// Identifier, unique within this tree; the root is 0.
    pub fn id(&self) -> u32 {
        self.tree.arena.node(self.key).id()
    }

    /// The string spelled from the root to this node. Leaf labels end in the
    /// rendered sentinel.
    pub fn path_label(&self) -> &'a str {
        self.tree.path_label(self.key)
    }

    /// Length of the path label in symbols.
    pub fn depth(&self) -> usize {
        self.tree.arena.node(self.key).data().depth
    }

    pub fn is_root(&self) -> bool {
        self.tree.arena.is_root(self.key)
    }

    pub fn is_leaf(&self) -> bool {
        self.tree.arena.is_leaf(self.key)
    }

    pub fn parent_edge(&self) -> Option<EdgeRef<'a>> {
        let tree = self.tree;
        tree.arena
            .parent_edge(self.key)
            .map(|key| EdgeRef::new(tree, key))
    }

    /// Set on every internal node except the root.
    pub fn suffix_link(&self) -> Option<NodeRef<'a>> {
        let tree = self.tree;
        tree.arena
            .node(self.key)
            .data()
            .suffix_link
            .map(|key| NodeRef::new(tree, key))
    }

    /// Outgoing edges in key order.
    pub fn children(&self) -> impl Iterator<Item = EdgeRef<'a>> + 'a {
        let tree = self.tree;
        tree.arena
            .node(self.key)
            .children()
            .map(move |(_, key)| EdgeRef::new(tree, key))
    }

    /// For a leaf, the offset of the suffix it ends; `None` elsewhere.
    pub fn suffix_index(&self) -> Option<usize> {
        self.is_leaf()
            .then(|| self.tree.text.len() - self.depth())
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.key == other.key
    }
}

impl Eq for NodeRef<'_> {}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id())
            .field("label", &self.path_label())
            .finish()
    }
}

/// An edge of a [`SuffixTree`].
#[derive(Clone, Copy)]
pub struct EdgeRef<'a> {
    tree: &'a SuffixTree,
    key: EdgeKey,
}

impl<'a> EdgeRef<'a> {
    pub(crate) fn new(tree: &'a SuffixTree, key: EdgeKey) -> Self {
        Self { tree, key }
    }

    fn span(&self) -> &'a Span {
        self.tree.arena.edge(self.key).data()
    }

    /// First symbol of the label.
    pub fn key(&self) -> Symbol {
        *self.tree.arena.edge(self.key).key()
    }

    /// Label as a range of the indexed text (sentinel at index `len()`).
    pub fn range(&self) -> Range<usize> {
        self.span().range()
    }

    pub fn len(&self) -> usize {
        self.span().len()
    }

    pub fn is_empty(&self) -> bool {
        self.span().len() == 0
    }

    /// The label text, rendered once and cached.
    pub fn label(&self) -> &'a str {
        self.tree.edge_label(self.span())
    }

    pub fn source(&self) -> NodeRef<'a> {
        NodeRef::new(self.tree, self.tree.arena.edge(self.key).source())
    }

    pub fn target(&self) -> NodeRef<'a> {
        NodeRef::new(self.tree, self.tree.arena.edge(self.key).target())
    }
}

impl PartialEq for EdgeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.key == other.key
    }
}

impl Eq for EdgeRef<'_> {}

impl fmt::Debug for EdgeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let range = self.range();
        write!(
            f,
            "EdgeRef({}..{} {:?}, {} -> {})",
            range.start,
            range.end,
            self.label(),
            self.source().id(),
            self.target().id()
        )
    }
}
