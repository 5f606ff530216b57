//! Property-based tests for the R* strategy, including forced reinsertion.

use proptest::prelude::*;

use planartree::geometry::{union_all, Rect};
use planartree::tree::{Strategy, Tree};

prop_compose! {
    fn arb_rect()(x in -100.0..100.0, y in -100.0..100.0, w in 0.1..20.0, h in 0.1..20.0) -> Rect {
        Rect::new(x, y, x + w, y + h)
    }
}

proptest! {
    #[test]
    fn test_rstar_leaf_fill_factor_and_payload_uniqueness(
        rects in prop::collection::vec(arb_rect(), 1..100)
    ) {
        let mut tree: Tree<usize> = Tree::new(6, Some(2), Strategy::RStar).unwrap();
        for (i, rect) in rects.iter().enumerate() {
            tree.insert(i, *rect);
        }

        for leaf in tree.get_leaves() {
            let n = tree.node(leaf).entries.len();
            prop_assert!(n >= tree.min_entries || tree.node(leaf).is_root());
            prop_assert!(n <= tree.max_entries);
        }

        let mut payloads: Vec<usize> = tree.get_leaf_entries().map(|e| *e.payload().unwrap()).collect();
        payloads.sort();
        prop_assert_eq!(payloads, (0..rects.len()).collect::<Vec<_>>());
    }

    #[test]
    fn test_rstar_root_bounds_every_inserted_rect(
        rects in prop::collection::vec(arb_rect(), 1..80)
    ) {
        let mut tree: Tree<usize> = Tree::new(5, None, Strategy::RStar).unwrap();
        for (i, rect) in rects.iter().enumerate() {
            tree.insert(i, *rect);
        }
        let expected = union_all(rects.iter());
        prop_assert_eq!(tree.bounding_rect(tree.root()), Some(expected));
    }

    #[test]
    fn test_rstar_leaves_stay_at_equal_depth(
        rects in prop::collection::vec(arb_rect(), 1..90)
    ) {
        let mut tree: Tree<usize> = Tree::new(4, Some(2), Strategy::RStar).unwrap();
        for (i, rect) in rects.iter().enumerate() {
            tree.insert(i, *rect);
        }
        let levels = tree.get_levels();
        let leaf_level = levels.len() - 1;
        for leaf in tree.get_leaves() {
            let depth = levels.iter().position(|lvl| lvl.contains(&leaf)).unwrap();
            prop_assert_eq!(depth, leaf_level);
        }
    }
}
