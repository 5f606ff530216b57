//! ## R* strategy
//!
//! Least-overlap/area-enlargement leaf choice, axis+index split selection
//! over all candidate distributions, and forced reinsertion with a
//! per-insert, per-level memoised cache.
//!
//! The cache numbers levels **from the leaf** (leaf = 0, increasing toward
//! the root). Numbering from the root breaks once the tree grows mid-insert
//! during reinsertion-triggered cascades; see `DESIGN.md`.

use std::collections::HashMap;

use crate::geometry::{approx_eq, union_all, Rect};
use crate::tree::{Entry, NodeId, Tree};

/// Scratch state for one top-level `insert` call. Constructed lazily on
/// the first overflow, cleared when the insert returns.
#[derive(Debug, Clone, Default)]
pub(crate) struct InsertCache {
    /// `levels[0]` = leaf nodes, increasing toward the root. `None` when
    /// stale (invalidated by a split) and due for a rebuild.
    levels: Option<Vec<Vec<NodeId>>>,
    /// Which levels have already had their one permitted reinsertion this
    /// top-level insert.
    reinsert_done: HashMap<usize, bool>,
}

impl InsertCache {
    pub(crate) fn new() -> Self {
        InsertCache::default()
    }

    pub(crate) fn invalidate_levels(&mut self) {
        self.levels = None;
    }
}

fn ensure_levels<P>(tree: &mut Tree<P>) {
    if tree.insert_cache.is_none() {
        tree.insert_cache = Some(InsertCache::new());
    }
    if tree.insert_cache.as_ref().unwrap().levels.is_none() {
        let mut levels = tree.get_levels();
        levels.reverse();
        tree.insert_cache.as_mut().unwrap().levels = Some(levels);
    }
}

fn level_of<P>(tree: &mut Tree<P>, node: NodeId) -> usize {
    ensure_levels(tree);
    tree.insert_cache
        .as_ref()
        .unwrap()
        .levels
        .as_ref()
        .unwrap()
        .iter()
        .position(|nodes| nodes.contains(&node))
        .expect("invariant violation: node missing from level table")
}

/// Overlap-enlargement of `entries[idx]` against `new_rect`: the change in
/// summed pairwise intersection area with its siblings.
fn overlap_enlargement<P>(entries: &[Entry<P>], idx: usize, new_rect: Rect) -> f64 {
    let target = entries[idx].rect;
    let expanded = target.union(&new_rect);
    let mut pre = 0.0;
    let mut post = 0.0;
    for (j, e) in entries.iter().enumerate() {
        if j == idx {
            continue;
        }
        pre += target.intersection_area(&e.rect);
        post += expanded.intersection_area(&e.rect);
    }
    post - pre
}

/// Descends from the root. At each non-leaf node: overlap-enlargement if
/// its children are leaves, area-enlargement otherwise. Returns the root
/// immediately if it is itself a leaf.
pub(crate) fn choose_leaf<P>(tree: &Tree<P>, rect: Rect) -> NodeId {
    let mut current = tree.root();
    if tree.node(current).is_leaf {
        return current;
    }
    loop {
        let entries = &tree.node(current).entries;
        let children_are_leaves = entries.iter().all(|e| {
            let child = e
                .child()
                .expect("invariant violation: non-leaf node holds a leaf entry");
            tree.node(child).is_leaf
        });

        let score_of = |idx: usize| -> f64 {
            if children_are_leaves {
                overlap_enlargement(entries, idx, rect)
            } else {
                entries[idx].rect.enlargement(&rect)
            }
        };

        let mut best = 0;
        let mut best_score = score_of(0);
        let mut best_area = entries[0].rect.area();
        for idx in 1..entries.len() {
            let score = score_of(idx);
            let area = entries[idx].rect.area();
            let better = if approx_eq(score, best_score) {
                area < best_area
            } else {
                score < best_score
            };
            if better {
                best = idx;
                best_score = score;
                best_area = area;
            }
        }
        let next = entries[best].child().unwrap();
        if tree.node(next).is_leaf {
            return next;
        }
        current = next;
    }
}

/// One candidate distribution of `M+1` entries into two groups, indexed
/// into the original entry slice.
struct Distribution {
    group1: Vec<usize>,
    group2: Vec<usize>,
    rect1: Rect,
    rect2: Rect,
    overlap: f64,
    perimeter: f64,
}

fn candidate_distributions(
    rects: &[Rect],
    sort_key: impl Fn(&Rect) -> f64,
    min_entries: usize,
    max_entries: usize,
) -> Vec<Distribution> {
    let mut order: Vec<usize> = (0..rects.len()).collect();
    order.sort_by_key(|&i| ordered_float::OrderedFloat(sort_key(&rects[i])));

    let upper = max_entries as isize - 2 * min_entries as isize + 3;
    let mut out = Vec::new();
    if upper < 1 {
        return out;
    }
    for k in 1..=upper {
        let split_at = min_entries as isize - 1 + k;
        if split_at < 1 || split_at as usize >= order.len() {
            continue;
        }
        let split_at = split_at as usize;
        let group1 = order[..split_at].to_vec();
        let group2 = order[split_at..].to_vec();
        let rect1 = union_all(group1.iter().map(|&i| &rects[i]));
        let rect2 = union_all(group2.iter().map(|&i| &rects[i]));
        let overlap = rect1.intersection_area(&rect2);
        let perimeter = rect1.perimeter() + rect2.perimeter();
        out.push(Distribution {
            group1,
            group2,
            rect1,
            rect2,
            overlap,
            perimeter,
        });
    }
    out
}

fn is_equivalent(a: &Distribution, b: &Distribution) -> bool {
    let mut a1 = a.group1.clone();
    a1.sort_unstable();
    let mut a2 = a.group2.clone();
    a2.sort_unstable();
    let mut b1 = b.group1.clone();
    b1.sort_unstable();
    let mut b2 = b.group2.clone();
    b2.sort_unstable();
    (a1 == b1 && a2 == b2) || (a1 == b2 && a2 == b1)
}

/// Deduplicates distributions by unordered-pair-of-sets equality, keeping
/// the first representative of each equivalence class (insertion order).
fn dedup_distributions(dists: Vec<Distribution>) -> Vec<Distribution> {
    let mut unique: Vec<Distribution> = Vec::new();
    'outer: for d in dists {
        for u in &unique {
            if is_equivalent(&d, u) {
                continue 'outer;
            }
        }
        unique.push(d);
    }
    unique
}

/// Axis+index split of an overflowing node (`max_entries + 1` entries).
/// Invoked either from the general overflow path (root, or a level's
/// second overflow this insert) or directly from forced reinsertion.
pub(crate) fn split<P>(tree: &mut Tree<P>, node: NodeId) -> NodeId {
    let min_entries = tree.min_entries;
    let max_entries = tree.max_entries;
    let taken = std::mem::take(&mut tree.node_mut(node).entries);
    let rects: Vec<Rect> = taken.iter().map(|e| e.rect).collect();

    let mut x_dists = candidate_distributions(&rects, |r| r.min_x, min_entries, max_entries);
    x_dists.extend(candidate_distributions(&rects, |r| r.max_x, min_entries, max_entries));
    let mut y_dists = candidate_distributions(&rects, |r| r.min_y, min_entries, max_entries);
    y_dists.extend(candidate_distributions(&rects, |r| r.max_y, min_entries, max_entries));

    let x_perimeter_sum: f64 = x_dists.iter().map(|d| d.perimeter).sum();
    let y_perimeter_sum: f64 = y_dists.iter().map(|d| d.perimeter).sum();
    // tie -> x
    let chosen = if x_perimeter_sum <= y_perimeter_sum {
        x_dists
    } else {
        y_dists
    };
    let unique = dedup_distributions(chosen);

    let mut best: Option<&Distribution> = None;
    for d in &unique {
        let better = match best {
            None => true,
            Some(b) => {
                if !approx_eq(d.overlap, b.overlap) {
                    d.overlap < b.overlap
                } else {
                    (d.rect1.area() + d.rect2.area()) < (b.rect1.area() + b.rect2.area())
                }
            }
        };
        if better {
            best = Some(d);
        }
    }
    let best = best.expect("invariant violation: no candidate distributions for R* split");
    let g1_idx = best.group1.clone();
    let g2_idx = best.group2.clone();

    let mut slots: Vec<Option<Entry<P>>> = taken.into_iter().map(Some).collect();
    let g1: Vec<Entry<P>> = g1_idx.into_iter().map(|i| slots[i].take().unwrap()).collect();
    let g2: Vec<Entry<P>> = g2_idx.into_iter().map(|i| slots[i].take().unwrap()).collect();

    let sibling = tree.perform_node_split(node, g1, g2);
    tracing::debug!(?node, ?sibling, "r* split");
    sibling
}

fn dist_sq(a: (f64, f64), b: (f64, f64)) -> f64 {
    (a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)
}

/// Finds the best node at `level` (from the leaf) to receive `rect`,
/// scored the same way `choose_leaf` would score that tier, evaluated
/// over the entries of nodes one level up (the parents of level-`level`
/// nodes).
fn choose_target_at_level<P>(
    tree: &Tree<P>,
    rect: Rect,
    level: usize,
    levels: &[Vec<NodeId>],
) -> NodeId {
    let parent_nodes = &levels[level + 1];
    let leaf_level = level == 0;

    let mut best: Option<(NodeId, f64, f64)> = None;
    for &parent in parent_nodes {
        let entries = &tree.node(parent).entries;
        for (idx, entry) in entries.iter().enumerate() {
            let score = if leaf_level {
                overlap_enlargement(entries, idx, rect)
            } else {
                entry.rect.enlargement(&rect)
            };
            let area = entry.rect.area();
            let better = match &best {
                None => true,
                Some((_, best_score, best_area)) => {
                    if !approx_eq(score, *best_score) {
                        score < *best_score
                    } else {
                        area < *best_area
                    }
                }
            };
            if better {
                best = Some((
                    entry
                        .child()
                        .expect("invariant violation: level table entry missing child"),
                    score,
                    area,
                ));
            }
        }
    }
    best.expect("invariant violation: no candidate nodes at target level").0
}

/// Handles an overflowing non-root node: the node's first overflow at its
/// level this top-level insert triggers reinsertion; a second overflow at
/// the same level (or an overflowing root) always splits.
pub(crate) fn overflow<P>(tree: &mut Tree<P>, node: NodeId) -> Option<NodeId> {
    if tree.node(node).is_root() {
        return Some(split(tree, node));
    }
    let level = level_of(tree, node);
    let already_reinserted = tree
        .insert_cache
        .as_ref()
        .and_then(|c| c.reinsert_done.get(&level).copied())
        .unwrap_or(false);

    if already_reinserted {
        Some(split(tree, node))
    } else {
        tree.insert_cache
            .as_mut()
            .unwrap()
            .reinsert_done
            .insert(level, true);
        reinsert(tree, node, level);
        None
    }
}

/// Removes the 30% of `node`'s entries closest to its centroid and
/// reinserts them, closest-first, at `level`.
fn reinsert<P>(tree: &mut Tree<P>, node: NodeId, level: usize) {
    let node_rect = tree
        .bounding_rect(node)
        .expect("invariant violation: empty node during forced reinsertion");
    let centroid = node_rect.centroid();

    let mut entries = std::mem::take(&mut tree.node_mut(node).entries);
    entries.sort_by_key(|e| ordered_float::OrderedFloat(dist_sq(e.rect.centroid(), centroid)));
    let count_to_remove = (0.3 * entries.len() as f64).ceil() as usize;
    let removed: Vec<Entry<P>> = entries.drain(0..count_to_remove).collect();
    tree.node_mut(node).entries = entries;

    if !tree.node(node).is_root() {
        let parent = tree.node(node).parent.unwrap();
        let idx = tree.parent_entry_index(node);
        let refit = union_all(tree.node(node).entries.iter().map(|e| &e.rect));
        tree.node_mut(parent).entries[idx].rect = refit;
    }

    tracing::debug!(?node, level, removed = removed.len(), "forced reinsertion");
    for entry in removed {
        reinsert_entry(tree, entry, level);
    }
}

/// Reinserts a single previously-removed entry at `level`, splitting
/// directly (bypassing the general overflow path) if the target overflows.
fn reinsert_entry<P>(tree: &mut Tree<P>, entry: Entry<P>, level: usize) {
    ensure_levels(tree);
    let levels = tree
        .insert_cache
        .as_ref()
        .unwrap()
        .levels
        .as_ref()
        .unwrap()
        .clone();
    let target = choose_target_at_level(tree, entry.rect, level, &levels);
    tree.node_mut(target).entries.push(entry);

    if tree.node(target).entries.len() > tree.max_entries {
        let sibling = split(tree, target);
        tree.adjust_tree(target, Some(sibling));
    } else {
        tree.adjust_tree(target, None);
    }
}
