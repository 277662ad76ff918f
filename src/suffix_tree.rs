use crate::construct::Construction;
use crate::symbol::Symbol;
use crate::text::TextBuffer;
use crate::tree::{NodeKey, Tree};
use crate::view::NodeRef;
use std::ops::Range;
use std::sync::OnceLock;
use tracing::debug;

/// Arena instantiation used by the suffix tree: edges keyed by their first
/// symbol, labelled by a span of the text.
pub(crate) type Arena = Tree<Symbol, SuffixNode, Span>;

/// Per-node payload.
#[derive(Debug)]
pub(crate) struct SuffixNode {
    /// Length of the path label, fixed when the node is created.
    pub(crate) depth: usize,
    pub(crate) suffix_link: Option<NodeKey>,
    label: OnceLock<String>,
}

impl SuffixNode {
    pub(crate) fn new(depth: usize) -> Self {
        Self {
            depth,
            suffix_link: None,
            label: OnceLock::new(),
        }
    }
}

/// Edge label: the half-open range `[start, end)` of the text buffer.
#[derive(Debug)]
pub(crate) struct Span {
    pub(crate) start: usize,
    pub(crate) end: usize,
    label: OnceLock<String>,
}

impl Span {
    pub(crate) fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self {
            start,
            end,
            label: OnceLock::new(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.end - self.start
    }

    pub(crate) fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Drops the first `cut - start` symbols; used when the edge is split.
    pub(crate) fn advance_to(&mut self, cut: usize) {
        assert!(
            self.start < cut && cut < self.end,
            "split point must fall strictly inside the edge"
        );
        self.start = cut;
        self.label = OnceLock::new();
    }
}

/// Build-time configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildOptions {
    /// When false (the default), text and queries are lower-cased before use.
    pub case_sensitive: bool,
}

impl BuildOptions {
    pub fn case_sensitive() -> Self {
        Self {
            case_sensitive: true,
        }
    }

    pub fn case_insensitive() -> Self {
        Self {
            case_sensitive: false,
        }
    }
}

/// Suffix tree over a single text, built online with Ukkonen's algorithm.
///
/// The text is terminated by a sentinel symbol so that every suffix ends at
/// its own leaf. Once built the tree never changes; it is `Send + Sync` and
/// can serve queries from several threads. Derived labels are computed on
/// first use through `OnceLock`.
///
/// ```
/// use suffixtree_rs::SuffixTree;
///
/// let tree = SuffixTree::build("banana", true);
/// let mut hits: Vec<usize> = tree.find("ana").collect();
/// hits.sort();
/// assert_eq!(hits, vec![1, 3]);
/// ```
#[derive(Debug)]
pub struct SuffixTree {
    pub(crate) text: TextBuffer,
    pub(crate) arena: Arena,
}

impl SuffixTree {
    /// Builds the tree for `text`. Never fails; the empty string yields a
    /// root with a single sentinel leaf.
    pub fn build(text: &str, case_sensitive: bool) -> Self {
        Self::with_options(text, BuildOptions { case_sensitive })
    }

    pub fn with_options(text: &str, options: BuildOptions) -> Self {
        let text = TextBuffer::new(text, options.case_sensitive);
        let mut arena = Arena::new(SuffixNode::new(0));
        Construction::new(&mut arena, &text).run();

        debug!(
            text_length = text.text_len(),
            nodes = arena.node_count(),
            edges = arena.edge_count(),
            case_sensitive = options.case_sensitive,
            "suffix tree built"
        );
        Self { text, arena }
    }

    /// The indexed text as given: no case folding, no sentinel.
    pub fn text(&self) -> &str {
        self.text.original()
    }

    pub fn case_sensitive(&self) -> bool {
        self.text.case_sensitive()
    }

    /// Number of characters indexed (sentinel excluded).
    pub fn len(&self) -> usize {
        self.text.text_len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.text_len() == 0
    }

    pub fn root(&self) -> NodeRef<'_> {
        NodeRef::new(self, self.arena.root())
    }

    pub fn node_by_id(&self, id: u32) -> Option<NodeRef<'_>> {
        self.arena.find_id(id).map(|key| NodeRef::new(self, key))
    }

    /// Pre-order walk over all nodes, children in edge-key order.
    pub fn dfs(&self) -> impl Iterator<Item = NodeRef<'_>> + '_ {
        self.arena
            .dfs(self.arena.root())
            .map(move |key| NodeRef::new(self, key))
    }

    /// Level-order walk over all nodes, children in edge-key order.
    pub fn bfs(&self) -> impl Iterator<Item = NodeRef<'_>> + '_ {
        self.arena
            .bfs(self.arena.root())
            .map(move |key| NodeRef::new(self, key))
    }

    pub fn stats(&self) -> TreeStats {
        let root = self.arena.root();
        let mut leaves = 0;
        let mut internal_nodes = 0;
        for key in self.arena.dfs(root) {
            if self.arena.is_leaf(key) {
                leaves += 1;
            } else if key != root {
                internal_nodes += 1;
            }
        }

        TreeStats {
            text_length: self.len(),
            nodes: self.arena.node_count(),
            internal_nodes,
            leaves,
            edges: self.arena.edge_count(),
        }
    }

    /// Path label of `node`, rendered once and cached.
    ///
    /// Labels along any root path are contiguous in the text, so the label is
    /// the `depth` symbols ending where the parent edge ends.
    pub(crate) fn path_label(&self, node: NodeKey) -> &str {
        let data = self.arena.node(node).data();
        data.label.get_or_init(|| match self.arena.parent_edge(node) {
            None => String::new(),
            Some(edge) => {
                let end = self.arena.edge(edge).data().end;
                self.text.render(end - data.depth..end)
            }
        })
    }

    pub(crate) fn edge_label<'s>(&self, span: &'s Span) -> &'s str {
        span.label.get_or_init(|| self.text.render(span.range()))
    }
}

/// Shape of a built tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeStats {
    /// Characters indexed, sentinel excluded
    pub text_length: usize,
    /// All nodes, root included
    pub nodes: usize,
    /// Branching nodes other than the root
    pub internal_nodes: usize,
    /// One per suffix, the empty suffix included
    pub leaves: usize,
    pub edges: usize,
}
