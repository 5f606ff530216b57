//! Construct an R*-tree, insert enough rectangles to trigger a forced
//! reinsertion and a split, then run a point query.

use planartree::geometry::Rect;
use planartree::tree::{Strategy, Tree};

fn main() {
    let mut tree: Tree<usize> = Tree::new(4, None, Strategy::RStar).unwrap();

    for i in 0..25 {
        let x = (i % 5) as f64 * 3.0;
        let y = (i / 5) as f64 * 3.0;
        tree.insert(i, Rect::new(x, y, x + 1.0, y + 1.0));
    }

    println!("tree has {} node(s) across {} level(s)", tree.node_count(), tree.get_levels().len());

    let hits: Vec<usize> = tree
        .query((0.5, 0.5))
        .unwrap()
        .filter_map(|e| e.payload().copied())
        .collect();
    println!("entries covering (0.5, 0.5): {hits:?}");
}
