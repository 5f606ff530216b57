//! An in-memory, two-dimensional R-tree spatial index supporting both the
//! original Guttman insertion/split strategy and the R*-tree variant.
//!
//! ```
//! use planartree::geometry::Rect;
//! use planartree::tree::{Strategy, Tree};
//!
//! let mut tree: Tree<&str> = Tree::new(4, None, Strategy::RStar).unwrap();
//! tree.insert("a", Rect::new(0.0, 0.0, 1.0, 1.0));
//! tree.insert("b", Rect::new(5.0, 5.0, 6.0, 6.0));
//!
//! let hits: Vec<_> = tree.query((0.5, 0.5)).unwrap().collect();
//! assert_eq!(hits.len(), 1);
//! ```

pub mod error;
pub mod geometry;
mod guttman;
mod insert;
pub mod location;
mod logging;
mod query;
mod rstar;
pub mod traversal;
pub mod tree;

pub use error::TreeError;
pub use geometry::Rect;
pub use location::Location;
pub use tree::{Entry, EntryKind, Node, NodeId, Strategy, Tree};
