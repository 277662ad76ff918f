use crate::reference::CanonicalRef;
use crate::suffix_tree::{Arena, Span, SuffixNode, SuffixTree};
use crate::symbol::Symbol;
use crate::tree::Dfs;
use crate::view::{EdgeRef, NodeRef};
use std::fmt;

impl SuffixTree {
    /// Locates `pattern` in the tree.
    ///
    /// Returns `None` when the pattern does not occur. The pattern is folded
    /// the same way as the text.
    pub fn traverse(&self, pattern: &str) -> Option<Match<'_>> {
        let symbols = self.text.pattern(pattern);
        CanonicalRef::at(self.arena.root())
            .extended(&self.arena, &self.text, &symbols)
            .map(|point| Match { tree: self, point })
    }

    /// Start offsets of every occurrence of `pattern`, counted in chars.
    ///
    /// The iterator is lazy and walks the subtree below the match. Offsets
    /// come out in edge-key order, not sorted. An empty pattern occurs at
    /// every offset from 0 through `len()`.
    pub fn find(&self, pattern: &str) -> Occurrences<'_> {
        match self.traverse(pattern) {
            Some(found) => found.occurrences(),
            None => Occurrences {
                arena: &self.arena,
                text_len: self.text.len(),
                walk: None,
            },
        }
    }

    pub fn contains(&self, pattern: &str) -> bool {
        self.traverse(pattern).is_some()
    }
}

/// Where a pattern ends in the tree: on a node or partway down an edge.
#[derive(Clone)]
pub struct Match<'a> {
    tree: &'a SuffixTree,
    point: CanonicalRef,
}

impl<'a> Match<'a> {
    pub fn ends_on_node(&self) -> bool {
        self.point.ends_on_node()
    }

    /// The deepest node on the path to the match.
    pub fn node(&self) -> NodeRef<'a> {
        NodeRef::new(self.tree, self.point.node())
    }

    /// The edge the match ends on, if it ends mid-edge.
    pub fn edge(&self) -> Option<EdgeRef<'a>> {
        self.point
            .edge(&self.tree.arena)
            .map(|key| EdgeRef::new(self.tree, key))
    }

    pub fn edge_key(&self) -> Option<Symbol> {
        if self.point.ends_on_node() {
            None
        } else {
            self.point.edge_key()
        }
    }

    /// Symbols consumed along `edge()`; 0 when the match ends on a node.
    pub fn depth(&self) -> usize {
        self.point.depth()
    }

    /// The node whose subtree holds every occurrence: `node()` when the match
    /// ends on it, otherwise the far end of `edge()`.
    pub fn subtree(&self) -> NodeRef<'a> {
        match self.edge() {
            Some(edge) => edge.target(),
            None => self.node(),
        }
    }

    /// The matched string as stored in the tree (case folded if the tree is).
    pub fn as_str(&self) -> &str {
        self.point.render(self.tree)
    }

    /// Narrows the match by appending `more`. Leaves the match untouched and
    /// returns false if the longer string does not occur.
    pub fn try_extend(&mut self, more: &str) -> bool {
        let symbols = self.tree.text.pattern(more);
        self.point
            .try_extend(&self.tree.arena, &self.tree.text, &symbols)
    }

    pub fn occurrences(&self) -> Occurrences<'a> {
        let tree = self.tree;
        Occurrences {
            arena: &tree.arena,
            text_len: tree.text.len(),
            walk: Some(tree.arena.dfs(self.subtree().key())),
        }
    }
}

impl fmt::Debug for Match<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Match")
            .field("node", &self.node().id())
            .field("edge", &self.edge_key())
            .field("depth", &self.depth())
            .field("text", &self.as_str())
            .finish()
    }
}

/// Iterator returned by [`SuffixTree::find`].
pub struct Occurrences<'a> {
    arena: &'a Arena,
    /// Text length with the sentinel; a leaf at depth `d` ends the suffix
    /// starting at `text_len - d`.
    text_len: usize,
    walk: Option<Dfs<'a, Symbol, SuffixNode, Span>>,
}

impl Iterator for Occurrences<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let arena = self.arena;
        let text_len = self.text_len;
        self.walk.as_mut()?.find_map(|key| {
            let node = arena.node(key);
            node.is_leaf().then(|| text_len - node.data().depth)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(tree: &SuffixTree, pattern: &str) -> Vec<usize> {
        let mut hits: Vec<usize> = tree.find(pattern).collect();
        hits.sort_unstable();
        hits
    }

    #[test]
    fn test_banana() {
        let tree = SuffixTree::build("banana", true);
        assert_eq!(sorted(&tree, "ana"), vec![1, 3]);
        assert_eq!(sorted(&tree, "banana"), vec![0]);
        assert_eq!(sorted(&tree, "a"), vec![1, 3, 5]);
        assert_eq!(sorted(&tree, "nab"), Vec::<usize>::new());
    }

    #[test]
    fn test_mississippi() {
        let tree = SuffixTree::build("mississippi", true);
        assert_eq!(sorted(&tree, "si"), vec![3, 6]);
        assert_eq!(sorted(&tree, "Si"), Vec::<usize>::new());
        assert_eq!(sorted(&tree, "issi"), vec![1, 4]);
        assert_eq!(sorted(&tree, "ppi"), vec![8]);
    }

    #[test]
    fn test_case_insensitive() {
        let tree = SuffixTree::build("Ghaffaari", false);
        assert_eq!(sorted(&tree, "GhAf"), vec![0]);
        assert_eq!(sorted(&tree, "AA"), vec![5]);
        assert!(tree.contains("gHAFFAARI"));
    }

    #[test]
    fn test_other_scenarios() {
        let tree = SuffixTree::build("babacacb", true);
        assert_eq!(sorted(&tree, "cacb"), vec![4]);

        let tree = SuffixTree::build("peeper", true);
        assert_eq!(sorted(&tree, "e"), vec![1, 2, 4]);

        let tree = SuffixTree::build("VALARMORGHULISDOHAERIS", false);
        assert_eq!(sorted(&tree, "MORGH"), vec![5]);
    }

    #[test]
    fn test_pattern_longer_than_text() {
        let tree = SuffixTree::build("abc", true);
        assert_eq!(sorted(&tree, "abcd"), Vec::<usize>::new());
        assert!(tree.traverse("abcd").is_none());
    }

    #[test]
    fn test_empty_pattern() {
        let tree = SuffixTree::build("abc", true);
        assert_eq!(sorted(&tree, ""), vec![0, 1, 2, 3]);

        let empty = SuffixTree::build("", true);
        assert_eq!(sorted(&empty, ""), vec![0]);
        assert_eq!(sorted(&empty, "a"), Vec::<usize>::new());
    }

    #[test]
    fn test_sentinel_never_matches() {
        let tree = SuffixTree::build("abc", true);
        assert!(!tree.contains("$"));
        assert!(!tree.contains("c$"));

        let tree = SuffixTree::build("a$b", true);
        assert_eq!(sorted(&tree, "$"), vec![1]);
        assert_eq!(sorted(&tree, "a$b"), vec![0]);
        assert_eq!(sorted(&tree, "b$"), Vec::<usize>::new());
    }

    #[test]
    fn test_match_on_node_and_edge() {
        let tree = SuffixTree::build("banana", true);

        let on_node = tree.traverse("ana").expect("ana occurs");
        assert!(on_node.ends_on_node());
        assert_eq!(on_node.edge(), None);
        assert_eq!(on_node.edge_key(), None);
        assert_eq!(on_node.depth(), 0);
        assert_eq!(on_node.subtree(), on_node.node());
        assert_eq!(on_node.as_str(), "ana");

        let on_edge = tree.traverse("anan").expect("anan occurs");
        assert!(!on_edge.ends_on_node());
        assert_eq!(on_edge.node(), on_node.node());
        assert_eq!(on_edge.edge_key(), Some(Symbol::Char('n')));
        assert_eq!(on_edge.depth(), 1);
        assert_eq!(on_edge.subtree().path_label(), "anana$");
        assert_eq!(on_edge.as_str(), "anan");
        assert_eq!(on_edge.occurrences().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_match_try_extend() {
        let tree = SuffixTree::build("mississippi", true);
        let mut found = tree.traverse("is").expect("is occurs");
        assert_eq!(found.as_str(), "is");

        assert!(!found.try_extend("x"));
        assert_eq!(found.as_str(), "is");

        assert!(found.try_extend("sip"));
        assert_eq!(found.as_str(), "issip");
        assert_eq!(found.occurrences().collect::<Vec<_>>(), vec![4]);
    }

    #[test]
    fn test_match_folds_extension() {
        let tree = SuffixTree::build("Ghaffaari", false);
        let mut found = tree.traverse("G").expect("g occurs");
        assert!(found.try_extend("HAF"));
        assert_eq!(found.as_str(), "ghaf");
    }

    #[test]
    fn test_find_is_recomputed_each_call() {
        let tree = SuffixTree::build("abab", true);
        let first: Vec<usize> = tree.find("ab").collect();
        let second: Vec<usize> = tree.find("ab").collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn test_concurrent_queries() {
        let tree = SuffixTree::build("mississippi", true);
        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    let mut hits: Vec<usize> = tree.find("ss").collect();
                    hits.sort_unstable();
                    assert_eq!(hits, vec![2, 5]);
                    let labels = tree.dfs().map(|n| n.path_label().len()).sum::<usize>();
                    assert!(labels > 0);
                });
            }
        });
    }
}
