//! ## Shared insert / adjust
//!
//! The top-level insert driver, parameterised by strategy, and the
//! adjust-tree pass that refits bounding rectangles and propagates split
//! nodes upward after a leaf-level insert.

use crate::geometry::{union_all, Rect};
use crate::guttman;
use crate::rstar;
use crate::tree::{Entry, NodeId, Strategy, Tree};

impl<P> Tree<P> {
    /// Inserts `payload` with bounding rectangle `rect`, descending to a
    /// leaf via the tree's strategy, splitting/reinserting on overflow, and
    /// refitting ancestors. Returns the rect of the newly created entry.
    pub fn insert(&mut self, payload: P, rect: Rect) -> Rect {
        tracing::info!(?rect, "insert");
        let leaf = self.choose_leaf(rect);
        self.node_mut(leaf).entries.push(Entry::leaf(rect, payload));

        let sibling = if self.node(leaf).entries.len() > self.max_entries {
            self.overflow(leaf)
        } else {
            None
        };
        self.adjust_tree(leaf, sibling);
        self.insert_cache = None;
        rect
    }

    fn choose_leaf(&self, rect: Rect) -> NodeId {
        match self.strategy {
            Strategy::Guttman => guttman::choose_leaf(self, rect),
            Strategy::RStar => rstar::choose_leaf(self, rect),
        }
    }

    /// Handles a node that now holds `max_entries + 1` entries. Returns the
    /// new sibling node if the node was split, or `None` if the overflow
    /// was absorbed by reinsertion.
    fn overflow(&mut self, node: NodeId) -> Option<NodeId> {
        match self.strategy {
            Strategy::Guttman => Some(guttman::split(self, node)),
            Strategy::RStar => rstar::overflow(self, node),
        }
    }

    /// Ascends from `node` to the root, refitting bounding rectangles and
    /// propagating a pending split sibling, growing a new root if the
    /// current root itself overflows.
    pub(crate) fn adjust_tree(&mut self, node: NodeId, mut split_sibling: Option<NodeId>) {
        let mut current = node;
        loop {
            if self.node(current).is_root() {
                break;
            }
            let parent = self.node(current).parent.unwrap();
            let idx = self.parent_entry_index(current);
            let refit = union_all(self.node(current).entries.iter().map(|e| &e.rect));
            self.node_mut(parent).entries[idx].rect = refit;

            if let Some(sibling) = split_sibling {
                let sibling_rect = self
                    .bounding_rect(sibling)
                    .expect("invariant violation: empty split sibling");
                self.node_mut(parent)
                    .entries
                    .push(Entry::internal(sibling_rect, sibling));
                split_sibling = if self.node(parent).entries.len() > self.max_entries {
                    self.overflow(parent)
                } else {
                    None
                };
            }
            current = parent;
        }

        if let Some(sibling) = split_sibling {
            self.grow_tree(sibling);
        }
    }
}
