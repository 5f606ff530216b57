//! ## Guttman strategy
//!
//! The original R-tree insertion strategy: least-area-enlargement leaf
//! choice and quadratic split (pick seeds, pick next, min-fill
//! enforcement).

use crate::geometry::{approx_eq, Rect};
use crate::tree::{Entry, NodeId, Tree};

/// Descends from the root choosing, at each non-leaf node, the entry
/// minimising `union(entry.rect, rect).area() - entry.rect.area()`; ties
/// are broken by smaller current area.
pub(crate) fn choose_leaf<P>(tree: &Tree<P>, rect: Rect) -> NodeId {
    let mut current = tree.root();
    while !tree.node(current).is_leaf {
        let entries = &tree.node(current).entries;
        let mut best = 0;
        let mut best_enlargement = entries[0].rect.enlargement(&rect);
        let mut best_area = entries[0].rect.area();
        for (idx, entry) in entries.iter().enumerate().skip(1) {
            let enlargement = entry.rect.enlargement(&rect);
            let area = entry.rect.area();
            let better = if approx_eq(enlargement, best_enlargement) {
                area < best_area
            } else {
                enlargement < best_enlargement
            };
            if better {
                best = idx;
                best_enlargement = enlargement;
                best_area = area;
            }
        }
        current = entries[best]
            .child()
            .expect("invariant violation: non-leaf node holds a leaf entry");
    }
    current
}

/// Quadratic split of an overflowing node (`max_entries + 1` entries).
pub(crate) fn split<P>(tree: &mut Tree<P>, node: NodeId) -> NodeId {
    let min_entries = tree.min_entries;
    let taken = std::mem::take(&mut tree.node_mut(node).entries);
    let rects: Vec<Rect> = taken.iter().map(|e| e.rect).collect();
    let mut slots: Vec<Option<Entry<P>>> = taken.into_iter().map(Some).collect();

    let (seed1, seed2) = pick_seeds(&rects);
    let mut g1 = vec![slots[seed1].take().unwrap()];
    let mut g2 = vec![slots[seed2].take().unwrap()];
    let mut g1_rect = rects[seed1];
    let mut g2_rect = rects[seed2];
    let mut remaining: Vec<usize> = (0..rects.len())
        .filter(|&i| i != seed1 && i != seed2)
        .collect();

    while !remaining.is_empty() {
        let g1_needed = min_entries.saturating_sub(g1.len());
        let g2_needed = min_entries.saturating_sub(g2.len());

        if g1_needed > 0 && g1_needed == remaining.len() && g2_needed != remaining.len() {
            for i in remaining.drain(..) {
                g1.push(slots[i].take().unwrap());
            }
            break;
        }
        if g2_needed > 0 && g2_needed == remaining.len() && g1_needed != remaining.len() {
            for i in remaining.drain(..) {
                g2.push(slots[i].take().unwrap());
            }
            break;
        }

        let pos = pick_next(&rects, &remaining, &g1_rect, &g2_rect);
        let idx = remaining.remove(pos);
        let r = rects[idx];
        let d1 = g1_rect.enlargement(&r);
        let d2 = g2_rect.enlargement(&r);
        let goes_to_g1 = if !approx_eq(d1, d2) {
            d1 < d2
        } else if !approx_eq(g1_rect.area(), g2_rect.area()) {
            g1_rect.area() < g2_rect.area()
        } else {
            g1.len() <= g2.len()
        };

        if goes_to_g1 {
            g1_rect = g1_rect.union(&r);
            g1.push(slots[idx].take().unwrap());
        } else {
            g2_rect = g2_rect.union(&r);
            g2.push(slots[idx].take().unwrap());
        }
    }

    tree.perform_node_split(node, g1, g2)
}

/// Chooses the pair of entries maximising wasted area: the first strict
/// maximum over all unordered pairs, in input order.
fn pick_seeds(rects: &[Rect]) -> (usize, usize) {
    let mut best = (0, 1);
    let mut best_waste = f64::NEG_INFINITY;
    for i in 0..rects.len() {
        for j in (i + 1)..rects.len() {
            let waste = rects[i].union(&rects[j]).area() - rects[i].area() - rects[j].area();
            if waste > best_waste {
                best_waste = waste;
                best = (i, j);
            }
        }
    }
    best
}

/// Among `remaining` (indices into `rects`), picks the position (into
/// `remaining`) of the entry maximising `|d1 - d2|`, the first strict
/// maximum in iteration order.
fn pick_next(rects: &[Rect], remaining: &[usize], g1_rect: &Rect, g2_rect: &Rect) -> usize {
    let mut best_pos = 0;
    let mut best_diff = f64::NEG_INFINITY;
    for (pos, &idx) in remaining.iter().enumerate() {
        let r = rects[idx];
        let d1 = g1_rect.enlargement(&r);
        let d2 = g2_rect.enlargement(&r);
        let diff = (d1 - d2).abs();
        if diff > best_diff {
            best_diff = diff;
            best_pos = pos;
        }
    }
    best_pos
}
