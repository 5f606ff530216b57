//! Construct a Guttman R-tree, insert a handful of rectangles, query a
//! region, and print the matching payloads.

use planartree::geometry::Rect;
use planartree::tree::{Strategy, Tree};

fn main() {
    let mut tree: Tree<&str> = Tree::new(4, None, Strategy::Guttman).unwrap();

    tree.insert("warehouse", Rect::new(0.0, 0.0, 5.0, 5.0));
    tree.insert("depot", Rect::new(1.0, 1.0, 3.0, 3.0));
    tree.insert("yard", Rect::new(4.0, 4.0, 6.0, 6.0));
    tree.insert("port", Rect::new(8.0, 8.0, 10.0, 10.0));
    tree.insert("dock", Rect::new(9.0, 9.0, 10.0, 10.0));

    println!("tree has {} node(s)", tree.node_count());

    let hits: Vec<&str> = tree
        .query((0.0, 0.0, 6.0, 6.0))
        .unwrap()
        .filter_map(|e| e.payload().copied())
        .collect();
    println!("entries overlapping [0,0,6,6]: {hits:?}");

    for (node, level) in tree.traverse_level_order(None::<fn(_) -> bool>) {
        println!("level {level}: node with {} entries", tree.node(node).entries.len());
    }
}
