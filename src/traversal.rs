//! ## Traversal API
//!
//! Depth-first and level-order iteration over tree nodes, with an optional
//! pruning predicate (returning `false` for a node excludes its entire
//! subtree). Both are lazy: built on an explicit work stack/queue rather
//! than eager recursion, so a consumer can stop after the first match
//! without visiting the rest.

use crate::tree::{NodeId, Tree};

/// Depth-first traversal: visits a node, then each child subtree in entry
/// order.
pub struct Traversal<'a, P, F> {
    tree: &'a Tree<P>,
    stack: Vec<NodeId>,
    condition: Option<F>,
}

impl<'a, P, F> Traversal<'a, P, F>
where
    F: Fn(NodeId) -> bool,
{
    pub(crate) fn new(tree: &'a Tree<P>, start: NodeId, condition: Option<F>) -> Self {
        Traversal {
            tree,
            stack: vec![start],
            condition,
        }
    }
}

impl<'a, P, F> Iterator for Traversal<'a, P, F>
where
    F: Fn(NodeId) -> bool,
{
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let node_id = self.stack.pop()?;
        if let Some(cond) = &self.condition {
            if !cond(node_id) {
                return self.next();
            }
        }
        let node = self.tree.node(node_id);
        if !node.is_leaf {
            for entry in node.entries.iter().rev() {
                if let Some(child) = entry.child() {
                    self.stack.push(child);
                }
            }
        }
        Some(node_id)
    }
}

/// Level-order (breadth-first) traversal: yields `(node, level)` pairs with
/// the root at level 0.
pub struct LevelOrder<'a, P, F> {
    tree: &'a Tree<P>,
    queue: std::collections::VecDeque<(NodeId, usize)>,
    condition: Option<F>,
}

impl<'a, P, F> LevelOrder<'a, P, F>
where
    F: Fn(NodeId) -> bool,
{
    pub(crate) fn new(tree: &'a Tree<P>, start: NodeId, condition: Option<F>) -> Self {
        let mut queue = std::collections::VecDeque::new();
        queue.push_back((start, 0));
        LevelOrder {
            tree,
            queue,
            condition,
        }
    }
}

impl<'a, P, F> Iterator for LevelOrder<'a, P, F>
where
    F: Fn(NodeId) -> bool,
{
    type Item = (NodeId, usize);

    fn next(&mut self) -> Option<(NodeId, usize)> {
        let (node_id, level) = self.queue.pop_front()?;
        if let Some(cond) = &self.condition {
            if !cond(node_id) {
                return self.next();
            }
        }
        let node = self.tree.node(node_id);
        if !node.is_leaf {
            for entry in &node.entries {
                if let Some(child) = entry.child() {
                    self.queue.push_back((child, level + 1));
                }
            }
        }
        Some((node_id, level))
    }
}

impl<P> Tree<P> {
    /// Depth-first traversal from the root. `condition(node)` returning
    /// `false` prunes that node's entire subtree.
    pub fn traverse<F>(&self, condition: Option<F>) -> Traversal<'_, P, F>
    where
        F: Fn(NodeId) -> bool,
    {
        Traversal::new(self, self.root(), condition)
    }

    /// Level-order traversal from the root, yielding `(node, level)`.
    pub fn traverse_level_order<F>(&self, condition: Option<F>) -> LevelOrder<'_, P, F>
    where
        F: Fn(NodeId) -> bool,
    {
        LevelOrder::new(self, self.root(), condition)
    }

    /// All nodes, grouped by depth from the root (root is `levels[0]`).
    pub fn get_levels(&self) -> Vec<Vec<NodeId>> {
        let mut levels: Vec<Vec<NodeId>> = Vec::new();
        for (node_id, level) in self.traverse_level_order(None::<fn(NodeId) -> bool>) {
            if levels.len() <= level {
                levels.push(Vec::new());
            }
            levels[level].push(node_id);
        }
        levels
    }

    /// Every node in the tree, depth-first.
    pub fn get_nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.traverse(None::<fn(NodeId) -> bool>)
    }

    /// Every leaf node in the tree.
    pub fn get_leaves(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.get_nodes().filter(|id| self.node(*id).is_leaf)
    }

    /// Every leaf entry in the tree (in depth-first leaf order).
    pub fn get_leaf_entries(&self) -> impl Iterator<Item = &crate::tree::Entry<P>> {
        self.get_leaves()
            .collect::<Vec<_>>()
            .into_iter()
            .flat_map(move |id| self.node(id).entries.iter())
    }
}
