use crate::reference::CanonicalRef;
use crate::suffix_tree::{Arena, Span, SuffixNode};
use crate::symbol::Symbol;
use crate::text::TextBuffer;
use crate::tree::NodeKey;
use tracing::trace;

/// Mutable state of one Ukkonen run.
///
/// Bundles the arena being built with the text and the active point so the
/// phases can borrow them side by side.
pub(crate) struct Construction<'a> {
    arena: &'a mut Arena,
    text: &'a TextBuffer,
    active: CanonicalRef,
}

impl<'a> Construction<'a> {
    pub(crate) fn new(arena: &'a mut Arena, text: &'a TextBuffer) -> Self {
        let active = CanonicalRef::at(arena.root());
        Self {
            arena,
            text,
            active,
        }
    }

    /// Runs one phase per symbol, sentinel included.
    pub(crate) fn run(mut self) {
        for phase in 0..self.text.len() {
            let symbol = self.text.at(phase);

            // Already implicitly present: nothing to insert this phase.
            if self.active.try_extend(self.arena, self.text, &[symbol]) {
                continue;
            }

            if !self.active.ends_on_node() {
                let node = split_edge(self.arena, self.text, &self.active);
                self.active = CanonicalRef::at(node);
            }

            self.insert_suffixes(symbol, phase);
        }
    }

    /// Adds leaves for `symbol` along the suffix-link chain from the active
    /// node, stopping at the root or once the extension is already present.
    ///
    /// Every hop moves to a strictly shallower node, so the loop ends.
    fn insert_suffixes(&mut self, symbol: Symbol, phase: usize) {
        loop {
            debug_assert!(self.active.ends_on_node());
            let node = self.active.node();
            self.add_leaf(node, symbol, phase);

            if node == self.arena.root() {
                return;
            }

            let next = match self.arena.node(node).data().suffix_link {
                Some(link) => link,
                None => {
                    let link = self.locate_suffix(node);
                    self.arena.node_data_mut(node).suffix_link = Some(link);
                    trace!(
                        from = self.arena.node(node).id(),
                        to = self.arena.node(link).id(),
                        "suffix link"
                    );
                    link
                }
            };

            self.active = CanonicalRef::at(next);
            if self.active.try_extend(self.arena, self.text, &[symbol]) {
                return;
            }
        }
    }

    fn add_leaf(&mut self, parent: NodeKey, symbol: Symbol, phase: usize) {
        let end = self.text.len();
        let depth = self.arena.node(parent).data().depth + (end - phase);
        let leaf = self.arena.insert_node(SuffixNode::new(depth));
        self.arena
            .add_child(parent, symbol, leaf, Span::new(phase, end))
            .expect("active node already has an edge for the inserted symbol");
    }

    /// Finds the node whose label is `node`'s label minus its first symbol,
    /// splitting an edge if that string currently ends mid-edge.
    fn locate_suffix(&mut self, node: NodeKey) -> NodeKey {
        let root = self.arena.root();
        let edge = self
            .arena
            .parent_edge(node)
            .expect("non-root node has a parent edge");
        let parent = self.arena.edge(edge).source();
        let span = self.arena.edge(edge).data().range();

        // Internal nodes are linked in the chain that creates them, so any
        // non-root parent already has its link.
        let (base, range) = if parent == root {
            (root, span.start + 1..span.end)
        } else {
            let link = self
                .arena
                .node(parent)
                .data()
                .suffix_link
                .expect("internal parent already has a suffix link");
            (link, span)
        };

        let target = CanonicalRef::at(base).descend(self.arena, self.text, range);
        if target.ends_on_node() {
            target.node()
        } else {
            split_edge(self.arena, self.text, &target)
        }
    }
}

/// Creates an internal node at `at`, which must lie strictly inside an edge.
///
/// The edge keeps its destination and is re-homed below the new node; a new
/// upper edge covering the first `at.depth()` symbols takes its place.
fn split_edge(arena: &mut Arena, text: &TextBuffer, at: &CanonicalRef) -> NodeKey {
    let edge = at
        .edge(arena)
        .expect("cannot split at a reference that ends on a node");
    let start = arena.edge(edge).data().start;
    let cut = start + at.depth();
    let depth = arena.node(at.node()).data().depth + at.depth();

    let mid = arena.insert_node(SuffixNode::new(depth));
    arena.edge_data_mut(edge).advance_to(cut);
    arena
        .interpose(edge, mid, Span::new(start, cut), text.at(cut))
        .expect("freshly inserted node is detached");

    trace!(node = arena.node(mid).id(), depth, "split edge");
    mid
}

#[cfg(test)]
mod tests {
    use crate::SuffixTree;

    /// Checks structural invariants of a finished tree.
    fn assert_well_formed(tree: &SuffixTree) {
        for node in tree.dfs() {
            if let Some(edge) = node.parent_edge() {
                assert_eq!(edge.target(), node);
                assert_eq!(
                    edge.label().chars().next(),
                    Some(edge.key().as_char()),
                    "edge key must be the first symbol of its label"
                );
                assert_eq!(
                    node.depth(),
                    edge.source().depth() + edge.len(),
                    "depth must accumulate along edges"
                );
            }
            if node.is_root() || node.is_leaf() {
                assert!(node.suffix_link().is_none());
                continue;
            }

            assert!(node.children().count() >= 2, "{:?} does not branch", node);
            let link = node
                .suffix_link()
                .unwrap_or_else(|| panic!("{:?} has no suffix link", node));
            let expected: String = node.path_label().chars().skip(1).collect();
            assert_eq!(link.path_label(), expected);
        }
    }

    #[test]
    fn test_scenarios_well_formed() {
        for text in [
            "",
            "a",
            "aa",
            "aaaa",
            "abab",
            "banana",
            "mississippi",
            "babacacb",
            "peeper",
            "abcabxabcd",
            "dedododeeodo",
            "VALARMORGHULISDOHAERIS",
        ] {
            assert_well_formed(&SuffixTree::build(text, true));
            assert_well_formed(&SuffixTree::build(text, false));
        }
    }

    /// Every text over {a, b, c} up to length 7, so each suffix-link lookup
    /// path (root parent, linked parent, split on arrival) is exercised.
    #[test]
    fn test_exhaustive_small_texts_well_formed() {
        let mut texts = vec![String::new()];
        for _ in 0..7 {
            let longer: Vec<String> = texts
                .iter()
                .filter(|t| t.len() == texts.last().map_or(0, |l| l.len()))
                .flat_map(|t| ['a', 'b', 'c'].map(|c| format!("{t}{c}")))
                .collect();
            texts.extend(longer);
        }
        assert_eq!(texts.len(), (0..=7).map(|n| 3usize.pow(n)).sum::<usize>());

        for text in &texts {
            let tree = SuffixTree::build(text, true);
            assert_well_formed(&tree);
            assert_eq!(tree.stats().leaves, text.len() + 1, "{text}");
        }
    }

    #[test]
    fn test_banana_shape() {
        let tree = SuffixTree::build("banana", true);
        let labels: Vec<&str> = tree.dfs().map(|n| n.path_label()).collect();
        assert_eq!(
            labels,
            vec![
                "", "$", "a", "a$", "ana", "ana$", "anana$", "banana$", "na", "na$", "nana$",
            ]
        );

        let stats = tree.stats();
        assert_eq!(stats.leaves, 7);
        assert_eq!(stats.internal_nodes, 3);
    }

    #[test]
    fn test_suffix_links_of_banana() {
        let tree = SuffixTree::build("banana", true);
        let link_of = |label: &str| {
            tree.dfs()
                .find(|n| n.path_label() == label)
                .and_then(|n| n.suffix_link())
                .map(|n| n.path_label().to_string())
        };
        assert_eq!(link_of("ana").as_deref(), Some("na"));
        assert_eq!(link_of("na").as_deref(), Some("a"));
        assert_eq!(link_of("a").as_deref(), Some(""));
    }
}
