//! ## Tree structure
//!
//! The node/entry ownership graph, realized as an arena: the tree owns a
//! single `Vec<Node<P>>` and nodes reference each other by index
//! ([`NodeId`]) rather than through `Rc<RefCell<_>>`. There is no
//! deletion in scope, so the arena only ever grows — no free-list is
//! needed.

use crate::error::TreeError;
use crate::geometry::{union_all, Rect};
use crate::rstar::InsertCache;

/// Index of a [`Node`] within a [`Tree`]'s arena.
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize)
)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

/// What an [`Entry`] references: a user payload (leaf entries) or a child
/// node (internal entries).
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize)
)]
#[derive(Debug, Clone)]
pub enum EntryKind<P> {
    Leaf(P),
    Internal(NodeId),
}

/// A `(rect, payload-or-child)` record stored in a [`Node`].
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize)
)]
#[derive(Debug, Clone)]
pub struct Entry<P> {
    pub rect: Rect,
    pub kind: EntryKind<P>,
}

impl<P> Entry<P> {
    pub fn leaf(rect: Rect, payload: P) -> Self {
        Entry {
            rect,
            kind: EntryKind::Leaf(payload),
        }
    }

    pub fn internal(rect: Rect, child: NodeId) -> Self {
        Entry {
            rect,
            kind: EntryKind::Internal(child),
        }
    }

    /// True iff this entry references a user payload rather than a child node.
    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, EntryKind::Leaf(_))
    }

    pub fn payload(&self) -> Option<&P> {
        match &self.kind {
            EntryKind::Leaf(p) => Some(p),
            EntryKind::Internal(_) => None,
        }
    }

    pub fn child(&self) -> Option<NodeId> {
        match &self.kind {
            EntryKind::Leaf(_) => None,
            EntryKind::Internal(id) => Some(*id),
        }
    }
}

/// A node in the tree: either a leaf (entries reference payloads) or
/// internal (entries reference child nodes).
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize)
)]
#[derive(Debug, Clone)]
pub struct Node<P> {
    pub is_leaf: bool,
    pub parent: Option<NodeId>,
    pub entries: Vec<Entry<P>>,
}

impl<P> Node<P> {
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// Insertion/split strategy a [`Tree`] is parameterised by.
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize)
)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Guttman,
    RStar,
}

/// An in-memory 2D R-tree spatial index.
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize)
)]
#[derive(Debug, Clone)]
pub struct Tree<P> {
    pub(crate) arena: Vec<Node<P>>,
    pub(crate) root: NodeId,
    pub max_entries: usize,
    pub min_entries: usize,
    pub strategy: Strategy,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub(crate) insert_cache: Option<InsertCache>,
}

impl<P> Tree<P> {
    /// Builds an empty tree: a single leaf root with zero entries.
    ///
    /// `min_entries` defaults to `ceil(max_entries / 2)` when `None`.
    pub fn new(
        max_entries: usize,
        min_entries: Option<usize>,
        strategy: Strategy,
    ) -> Result<Self, TreeError> {
        let min_entries = min_entries.unwrap_or_else(|| max_entries.div_ceil(2));
        if max_entries < 2 || min_entries == 0 || 2 * min_entries > max_entries + 1 {
            return Err(TreeError::Configuration {
                max_entries,
                min_entries,
            });
        }
        let root = Node {
            is_leaf: true,
            parent: None,
            entries: Vec::new(),
        };
        tracing::info!(max_entries, min_entries, ?strategy, "created tree");
        Ok(Tree {
            arena: vec![root],
            root: NodeId(0),
            max_entries,
            min_entries,
            strategy,
            insert_cache: None,
        })
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node<P> {
        &self.arena[id.0]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node<P> {
        &mut self.arena[id.0]
    }

    /// `union_all` of a node's entry rects, or `None` if it has no entries
    /// (only possible for an empty root).
    pub fn bounding_rect(&self, id: NodeId) -> Option<Rect> {
        let entries = &self.node(id).entries;
        if entries.is_empty() {
            None
        } else {
            Some(union_all(entries.iter().map(|e| &e.rect)))
        }
    }

    /// The index of the unique entry in `node`'s parent whose child is `node`.
    ///
    /// # Panics
    ///
    /// Panics (invariant violation) if `node` is the root, or if no such
    /// entry exists.
    pub fn parent_entry_index(&self, id: NodeId) -> usize {
        let parent = self
            .node(id)
            .parent
            .expect("parent_entry_index called on the root");
        self.node(parent)
            .entries
            .iter()
            .position(|e| e.child() == Some(id))
            .expect("invariant violation: node has no parent entry referencing it")
    }

    pub(crate) fn push_node(&mut self, node: Node<P>) -> NodeId {
        self.arena.push(node);
        NodeId(self.arena.len() - 1)
    }

    /// Splits `node` into two sibling nodes holding `g1`/`g2` respectively,
    /// repointing the parent links of any child nodes referenced from
    /// either group before returning.
    pub(crate) fn perform_node_split(
        &mut self,
        node_id: NodeId,
        g1: Vec<Entry<P>>,
        g2: Vec<Entry<P>>,
    ) -> NodeId {
        let is_leaf = self.node(node_id).is_leaf;
        let parent = self.node(node_id).parent;
        self.node_mut(node_id).entries = g1;
        let sibling_id = self.push_node(Node {
            is_leaf,
            parent,
            entries: g2,
        });
        self.fix_children(node_id);
        self.fix_children(sibling_id);
        if let Some(cache) = self.insert_cache.as_mut() {
            cache.invalidate_levels();
        }
        tracing::debug!(?node_id, ?sibling_id, "split node");
        sibling_id
    }

    /// Repoints `entry.child.parent` to `node_id` for every internal entry
    /// of `node_id`. No-op on leaf nodes.
    fn fix_children(&mut self, node_id: NodeId) {
        if self.node(node_id).is_leaf {
            return;
        }
        let children: Vec<NodeId> = self
            .node(node_id)
            .entries
            .iter()
            .filter_map(|e| e.child())
            .collect();
        for child in children {
            self.node_mut(child).parent = Some(node_id);
        }
    }

    /// Creates a new root whose entries point at the current root and
    /// `sibling`, used after the root itself splits.
    pub(crate) fn grow_tree(&mut self, sibling: NodeId) {
        let old_root = self.root;
        let old_rect = self
            .bounding_rect(old_root)
            .expect("invariant violation: empty root during grow_tree");
        let sibling_rect = self
            .bounding_rect(sibling)
            .expect("invariant violation: empty sibling during grow_tree");
        let new_root = self.push_node(Node {
            is_leaf: false,
            parent: None,
            entries: vec![
                Entry::internal(old_rect, old_root),
                Entry::internal(sibling_rect, sibling),
            ],
        });
        self.node_mut(old_root).parent = Some(new_root);
        self.node_mut(sibling).parent = Some(new_root);
        self.root = new_root;
        if let Some(cache) = self.insert_cache.as_mut() {
            cache.invalidate_levels();
        }
        tracing::debug!(?new_root, "grew tree, new root added");
    }

    /// Number of nodes in the tree (including the root).
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tree_is_a_single_empty_leaf() {
        let tree: Tree<&str> = Tree::new(4, None, Strategy::Guttman).unwrap();
        assert!(tree.node(tree.root()).is_leaf);
        assert!(tree.node(tree.root()).is_root());
        assert!(tree.node(tree.root()).entries.is_empty());
        assert_eq!(tree.bounding_rect(tree.root()), None);
    }

    #[test]
    fn test_default_min_entries_is_ceil_half() {
        let tree: Tree<&str> = Tree::new(7, None, Strategy::Guttman).unwrap();
        assert_eq!(tree.min_entries, 4);
    }

    #[test]
    fn test_rejects_max_entries_below_two() {
        let err = Tree::<&str>::new(1, None, Strategy::Guttman).unwrap_err();
        assert!(matches!(err, TreeError::Configuration { .. }));
    }

    #[test]
    fn test_rejects_min_entries_above_half_max() {
        let err = Tree::<&str>::new(4, Some(3), Strategy::Guttman).unwrap_err();
        assert!(matches!(err, TreeError::Configuration { .. }));
    }
}
