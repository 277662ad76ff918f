use crate::id_gen::IdGenerator;
use ahash::AHashMap as HashMap;
use slotmap::{new_key_type, SlotMap};
use std::collections::{BTreeMap, VecDeque};
use std::fmt::Debug;
use thiserror::Error;

new_key_type! {
    /// Handle to a node stored in a [`Tree`].
    pub struct NodeKey;

    /// Handle to an edge stored in a [`Tree`].
    pub struct EdgeKey;
}

/// Misuse of the [`Tree`] wiring API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("node handle does not belong to this tree")]
    UnknownNode,

    #[error("node {id} already has an edge keyed {key}")]
    KeyOccupied { id: u32, key: String },

    #[error("node {id} is already wired into the tree")]
    NotDetached { id: u32 },

    #[error("attaching node {id} would create a cycle")]
    Cycle { id: u32 },
}

/// A node: its keyed children, its single incoming edge, and a payload.
#[derive(Debug)]
pub struct Node<K, N> {
    id: u32,
    children: BTreeMap<K, EdgeKey>,
    parent: Option<EdgeKey>,
    data: N,
}

impl<K, N> Node<K, N> {
    /// Identifier, unique within the owning tree.
    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn data(&self) -> &N {
        &self.data
    }

    pub fn parent_edge(&self) -> Option<EdgeKey> {
        self.parent
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Outgoing edges in ascending key order.
    pub fn children(&self) -> impl DoubleEndedIterator<Item = (&K, EdgeKey)> + '_ {
        self.children.iter().map(|(k, &e)| (k, e))
    }
}

/// An edge owning its destination. `key` is its entry in the source's map.
#[derive(Debug)]
pub struct Edge<K, E> {
    key: K,
    src: NodeKey,
    dst: NodeKey,
    data: E,
}

impl<K, E> Edge<K, E> {
    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn source(&self) -> NodeKey {
        self.src
    }

    pub fn target(&self) -> NodeKey {
        self.dst
    }

    pub fn data(&self) -> &E {
        &self.data
    }
}

/// Arena-backed rooted tree with ordered, keyed edges.
///
/// All nodes and edges live in two slot maps owned by the tree, so parent
/// back-references and cross links are plain handles. Wiring happens only
/// through [`Tree::add_child`] and [`Tree::interpose`], which keep the
/// parent/child back-references consistent.
#[derive(Debug)]
pub struct Tree<K, N, E> {
    nodes: SlotMap<NodeKey, Node<K, N>>,
    edges: SlotMap<EdgeKey, Edge<K, E>>,
    id_index: HashMap<u32, NodeKey>,
    id_gen: IdGenerator,
    root: NodeKey,
}

impl<K: Ord + Clone + Debug, N, E> Tree<K, N, E> {
    /// Creates a tree holding only a root.
    pub fn new(root_data: N) -> Self {
        let mut nodes = SlotMap::with_key();
        let mut id_gen = IdGenerator::new();
        let mut id_index = HashMap::new();

        let id = id_gen.get();
        let root = nodes.insert(Node {
            id,
            children: BTreeMap::new(),
            parent: None,
            data: root_data,
        });
        id_index.insert(id, root);

        Self {
            nodes,
            edges: SlotMap::with_key(),
            id_index,
            id_gen,
            root,
        }
    }

    /// Creates a detached node; wire it in with [`Tree::add_child`].
    pub fn insert_node(&mut self, data: N) -> NodeKey {
        let id = self.id_gen.get();
        let key = self.nodes.insert(Node {
            id,
            children: BTreeMap::new(),
            parent: None,
            data,
        });
        self.id_index.insert(id, key);
        key
    }

    pub fn root(&self) -> NodeKey {
        self.root
    }

    /// Panics on a handle from another tree.
    pub fn node(&self, key: NodeKey) -> &Node<K, N> {
        &self.nodes[key]
    }

    pub fn get_node(&self, key: NodeKey) -> Option<&Node<K, N>> {
        self.nodes.get(key)
    }

    /// Panics on a handle from another tree.
    pub fn node_data_mut(&mut self, key: NodeKey) -> &mut N {
        &mut self.nodes[key].data
    }

    /// Panics on a handle from another tree.
    pub fn edge(&self, key: EdgeKey) -> &Edge<K, E> {
        &self.edges[key]
    }

    /// Panics on a handle from another tree.
    pub fn edge_data_mut(&mut self, key: EdgeKey) -> &mut E {
        &mut self.edges[key].data
    }

    /// Looks up a node by its identifier.
    pub fn find_id(&self, id: u32) -> Option<NodeKey> {
        self.id_index.get(&id).copied()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// The outgoing edge of `node` keyed `key`.
    ///
    /// Panics on a handle from another tree, as do the other node queries
    /// below; only [`Tree::add_child`] and [`Tree::interpose`] report one as
    /// [`TreeError::UnknownNode`].
    pub fn child(&self, node: NodeKey, key: &K) -> Option<EdgeKey> {
        self.nodes[node].children.get(key).copied()
    }

    /// Child nodes of `node` in ascending key order.
    ///
    /// Panics on a handle from another tree.
    pub fn children(&self, node: NodeKey) -> impl DoubleEndedIterator<Item = NodeKey> + '_ {
        self.nodes[node]
            .children
            .values()
            .map(move |&e| self.edges[e].dst)
    }

    /// Panics on a handle from another tree.
    pub fn parent_edge(&self, node: NodeKey) -> Option<EdgeKey> {
        self.nodes[node].parent
    }

    /// Panics on a handle from another tree.
    pub fn is_root(&self, node: NodeKey) -> bool {
        self.nodes[node].is_root()
    }

    /// Panics on a handle from another tree.
    pub fn is_leaf(&self, node: NodeKey) -> bool {
        self.nodes[node].is_leaf()
    }

    /// Connects the detached node `destination` below `parent` under `key`.
    ///
    /// An occupied key is an error rather than a silent overwrite, since
    /// overwriting would orphan the previous child's back-reference.
    pub fn add_child(
        &mut self,
        parent: NodeKey,
        key: K,
        destination: NodeKey,
        data: E,
    ) -> Result<EdgeKey, TreeError> {
        let parent_node = self.nodes.get(parent).ok_or(TreeError::UnknownNode)?;
        let parent_id = parent_node.id;
        let occupied = parent_node.children.contains_key(&key);
        let dst = self.nodes.get(destination).ok_or(TreeError::UnknownNode)?;

        if destination == self.root || dst.parent.is_some() {
            return Err(TreeError::NotDetached { id: dst.id });
        }
        // A childless detached node cannot be an ancestor of `parent`.
        if parent == destination || (!dst.is_leaf() && self.top_of(parent) == destination) {
            return Err(TreeError::Cycle { id: dst.id });
        }
        if occupied {
            return Err(TreeError::KeyOccupied {
                id: parent_id,
                key: format!("{key:?}"),
            });
        }

        let edge = self.edges.insert(Edge {
            key: key.clone(),
            src: parent,
            dst: destination,
            data,
        });
        self.nodes[parent].children.insert(key, edge);
        self.nodes[destination].parent = Some(edge);
        Ok(edge)
    }

    /// Splices the fresh node `mid` into the middle of `edge`.
    ///
    /// A new edge carrying `upper` takes over `edge`'s key in the source's map
    /// and leads to `mid`; `edge` itself moves below `mid` under `lower_key`
    /// and keeps its destination. Returns the new upper edge.
    pub fn interpose(
        &mut self,
        edge: EdgeKey,
        mid: NodeKey,
        upper: E,
        lower_key: K,
    ) -> Result<EdgeKey, TreeError> {
        let (key, src) = {
            let e = self.edges.get(edge).ok_or(TreeError::UnknownNode)?;
            (e.key.clone(), e.src)
        };
        let mid_node = self.nodes.get(mid).ok_or(TreeError::UnknownNode)?;
        if mid == self.root || mid_node.parent.is_some() || !mid_node.is_leaf() {
            return Err(TreeError::NotDetached { id: mid_node.id });
        }

        let upper_edge = self.edges.insert(Edge {
            key: key.clone(),
            src,
            dst: mid,
            data: upper,
        });
        self.nodes[src].children.insert(key, upper_edge);
        self.nodes[mid].parent = Some(upper_edge);

        let lower = &mut self.edges[edge];
        lower.src = mid;
        lower.key = lower_key.clone();
        self.nodes[mid].children.insert(lower_key, edge);

        Ok(upper_edge)
    }

    /// Pre-order depth-first walk from `start`, children in key order.
    /// Panics on the first step if `start` belongs to another tree.
    pub fn dfs(&self, start: NodeKey) -> Dfs<'_, K, N, E> {
        Dfs {
            tree: self,
            stack: vec![start],
        }
    }

    /// Level-order walk from `start`, children in key order.
    pub fn bfs(&self, start: NodeKey) -> Bfs<'_, K, N, E> {
        Bfs {
            tree: self,
            queue: VecDeque::from([start]),
        }
    }

    fn top_of(&self, mut node: NodeKey) -> NodeKey {
        while let Some(e) = self.nodes[node].parent {
            node = self.edges[e].src;
        }
        node
    }
}

/// Iterator returned by [`Tree::dfs`].
pub struct Dfs<'a, K, N, E> {
    tree: &'a Tree<K, N, E>,
    stack: Vec<NodeKey>,
}

impl<'a, K: Ord + Clone + Debug, N, E> Iterator for Dfs<'a, K, N, E> {
    type Item = NodeKey;

    fn next(&mut self) -> Option<NodeKey> {
        let node = self.stack.pop()?;
        // Pushed in reverse so the smallest key is popped first.
        self.stack.extend(self.tree.children(node).rev());
        Some(node)
    }
}

/// Iterator returned by [`Tree::bfs`].
pub struct Bfs<'a, K, N, E> {
    tree: &'a Tree<K, N, E>,
    queue: VecDeque<NodeKey>,
}

impl<'a, K: Ord + Clone + Debug, N, E> Iterator for Bfs<'a, K, N, E> {
    type Item = NodeKey;

    fn next(&mut self) -> Option<NodeKey> {
        let node = self.queue.pop_front()?;
        self.queue.extend(self.tree.children(node));
        Some(node)
    }
}
