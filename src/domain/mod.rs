//! Domain layer: the AVL tree and its text renderings
//!
//! No I/O, no configuration; every tree operation is total.

pub mod outline;
pub mod render;
pub mod shape;
pub mod tree;

pub use outline::TreeOutline;
pub use render::{TreeRenderer, EMPTY_TREE};
pub use shape::{Shape, Slot};
pub use tree::{AvlTree, Node};
