use crate::suffix_tree::{Arena, SuffixTree};
use crate::symbol::Symbol;
use crate::text::TextBuffer;
use crate::tree::{EdgeKey, NodeKey};
use std::cell::OnceCell;
use std::ops::Range;

/// A position in the tree: `depth` symbols down the edge keyed `edge` from
/// `node`, or `node` itself when `depth` is zero.
///
/// Serves both as Ukkonen's active point and as the result of a query. A
/// string that is not in the tree has no reference; callers see `None`.
#[derive(Debug, Clone)]
pub(crate) struct CanonicalRef {
    node: NodeKey,
    edge: Option<Symbol>,
    depth: usize,
    rendered: OnceCell<String>,
}

impl CanonicalRef {
    /// A reference ending on `node`.
    pub(crate) fn at(node: NodeKey) -> Self {
        Self {
            node,
            edge: None,
            depth: 0,
            rendered: OnceCell::new(),
        }
    }

    pub(crate) fn node(&self) -> NodeKey {
        self.node
    }

    pub(crate) fn edge_key(&self) -> Option<Symbol> {
        self.edge
    }

    pub(crate) fn depth(&self) -> usize {
        self.depth
    }

    pub(crate) fn ends_on_node(&self) -> bool {
        self.depth == 0
    }

    /// The edge the reference ends on, if it ends mid-edge.
    pub(crate) fn edge(&self, arena: &Arena) -> Option<EdgeKey> {
        if self.ends_on_node() {
            return None;
        }
        let key = self.edge.expect("mid-edge reference without an edge key");
        let edge = arena
            .child(self.node, &key)
            .expect("reference names an edge its node does not have");
        Some(edge)
    }

    /// Extends by `input` if the result is in the tree.
    ///
    /// Returns whether it was found; on failure the reference is unchanged.
    pub(crate) fn try_extend(
        &mut self,
        arena: &Arena,
        text: &TextBuffer,
        input: &[Symbol],
    ) -> bool {
        let saved = (self.node, self.edge, self.depth);
        if self.walk(arena, text, input) {
            if !input.is_empty() {
                self.rendered = OnceCell::new();
            }
            true
        } else {
            (self.node, self.edge, self.depth) = saved;
            false
        }
    }

    /// Extends by `input`, consuming the reference; `None` if not found.
    pub(crate) fn extended(
        mut self,
        arena: &Arena,
        text: &TextBuffer,
        input: &[Symbol],
    ) -> Option<Self> {
        if self.walk(arena, text, input) {
            self.rendered = OnceCell::new();
            Some(self)
        } else {
            None
        }
    }

    fn walk(&mut self, arena: &Arena, text: &TextBuffer, mut input: &[Symbol]) -> bool {
        while let Some(&first) = input.first() {
            if self.ends_on_node() {
                if arena.child(self.node, &first).is_none() {
                    return false;
                }
                self.edge = Some(first);
            }
            let key = self.edge.expect("mid-edge reference without an edge key");
            let edge = arena
                .child(self.node, &key)
                .expect("reference names an edge its node does not have");
            let span = arena.edge(edge).data();

            // Symbols left on this edge past the current point.
            let pivot = span.len() - self.depth;
            let (snippet, rest) = input.split_at(pivot.min(input.len()));
            let from = span.start + self.depth;
            if text.slice(from..from + snippet.len()) != snippet {
                return false;
            }

            if snippet.len() == pivot {
                self.node = arena.edge(edge).target();
                self.edge = None;
                self.depth = 0;
            } else {
                self.depth += snippet.len();
                debug_assert!(rest.is_empty());
            }
            input = rest;
        }
        true
    }

    /// Walks `range` of the text down from the current node by edge lengths
    /// alone. The range must spell a string present below this node.
    pub(crate) fn descend(
        mut self,
        arena: &Arena,
        text: &TextBuffer,
        mut range: Range<usize>,
    ) -> Self {
        assert!(self.ends_on_node(), "descend must start on a node");
        while !range.is_empty() {
            let key = text.at(range.start);
            let edge = arena
                .child(self.node, &key)
                .expect("suffix walk ran off the tree");
            let len = arena.edge(edge).data().len();
            if len <= range.len() {
                self.node = arena.edge(edge).target();
                range.start += len;
            } else {
                self.edge = Some(key);
                self.depth = range.len();
                break;
            }
        }
        self.rendered = OnceCell::new();
        self
    }

    /// The string from the root to this point.
    pub(crate) fn render(&self, tree: &SuffixTree) -> &str {
        self.rendered.get_or_init(|| {
            let mut out = tree.path_label(self.node).to_owned();
            if let Some(edge) = self.edge(&tree.arena) {
                let start = tree.arena.edge(edge).data().start;
                out.push_str(&tree.text.render(start..start + self.depth));
            }
            out
        })
    }
}
