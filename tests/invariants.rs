#[path = "shared.rs"]
mod shared;
use shared::*;

use planartree::geometry::union_all;
use planartree::tree::{Strategy, Tree};

/// Checks invariants 1-3 from the testable-properties section: fill factor,
/// parent-entry bounding rect correctness, and the unique-parent-entry link.
fn assert_structural_invariants<P>(tree: &Tree<P>) {
    for node in tree.get_nodes() {
        if !tree.node(node).is_root() {
            let n = tree.node(node).entries.len();
            assert!(
                n >= tree.min_entries && n <= tree.max_entries,
                "node {node:?} has {n} entries, outside [{}, {}]",
                tree.min_entries,
                tree.max_entries
            );

            let idx = tree.parent_entry_index(node);
            let parent = tree.node(node).parent.unwrap();
            let claimed_rect = tree.node(parent).entries[idx].rect;
            let actual_rect = tree.bounding_rect(node).unwrap();
            assert_eq!(
                claimed_rect, actual_rect,
                "parent entry rect for {node:?} does not equal the union of its children"
            );
        }
    }
}

fn assert_leaves_at_same_depth<P>(tree: &Tree<P>) {
    let levels = tree.get_levels();
    let leaf_level = levels.len() - 1;
    for leaf in tree.get_leaves() {
        let depth = levels.iter().position(|lvl| lvl.contains(&leaf)).unwrap();
        assert_eq!(depth, leaf_level, "leaf {leaf:?} is not at the deepest level");
    }
}

fn run_invariant_suite(strategy: Strategy) {
    let mut tree: Tree<usize> = Tree::new(5, Some(2), strategy).unwrap();
    let rects = grid_rects(75, 9);
    for (i, rect) in rects.iter().enumerate() {
        tree.insert(i, *rect);
    }

    assert_structural_invariants(&tree);
    assert_leaves_at_same_depth(&tree);

    let mut payloads: Vec<usize> = tree.get_leaf_entries().map(|e| *e.payload().unwrap()).collect();
    payloads.sort();
    assert_eq!(payloads, (0..75).collect::<Vec<_>>(), "invariant 5: every payload appears exactly once");

    let expected = union_all(rects.iter());
    assert_eq!(
        tree.bounding_rect(tree.root()),
        Some(expected),
        "invariant 6: root bounding rect equals the union of all inserted rects"
    );
}

#[test]
fn test_guttman_invariants_hold_after_many_inserts() {
    run_invariant_suite(Strategy::Guttman);
}

#[test]
fn test_rstar_invariants_hold_after_many_inserts() {
    run_invariant_suite(Strategy::RStar);
}

#[test]
fn test_single_entry_tree_invariants() {
    let mut tree: Tree<&str> = Tree::new(4, None, Strategy::RStar).unwrap();
    tree.insert("solo", planartree::geometry::Rect::new(0.0, 0.0, 1.0, 1.0));
    assert_structural_invariants(&tree);
    assert_eq!(tree.get_leaf_entries().count(), 1);
}
