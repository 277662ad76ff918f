//! # Suffix tree - exact substring search over a fixed text
//!
//! A Rust implementation of Ukkonen's online suffix tree construction.
//!
//! The tree is built once, in time linear in the text, and then answers
//! substring queries in time proportional to the pattern length plus the
//! number of occurrences reported:
//! 1. **Locate**: walk the pattern down from the root to a node or an edge
//! 2. **Enumerate**: every leaf below that point is one occurrence
//!
//! ## Example
//!
//! ```
//! use suffixtree_rs::SuffixTree;
//!
//! let tree = SuffixTree::build("mississippi", true);
//!
//! let mut hits: Vec<usize> = tree.find("si").collect();
//! hits.sort();
//! assert_eq!(hits, vec![3, 6]);
//!
//! assert!(tree.find("Si").next().is_none());
//! println!("{} leaves", tree.stats().leaves);
//! ```
//!
//! ## Structure
//!
//! - Nodes and edges live in a generic arena [`Tree`] using generational
//!   indices (SlotMap); parent back-references and suffix links are handles
//! - Edge labels are ranges into the text, never copies
//! - A sentinel [`Symbol`] ends the text so every suffix owns a leaf

mod construct;
mod id_gen;
mod query;
mod reference;
mod suffix_tree;
mod symbol;
mod text;
mod tree;
mod view;


pub use query::{Match, Occurrences};
pub use suffix_tree::{BuildOptions, SuffixTree, TreeStats};
pub use symbol::{Symbol, SENTINEL};
pub use tree::{Bfs, Dfs, Edge, EdgeKey, Node, NodeKey, Tree, TreeError};
pub use view::{EdgeRef, NodeRef};
