//! AVL tree with a grid-based text renderer.
//!
//! [`AvlTree`] keeps keys balanced on insert and remove; [`TreeRenderer`] draws the
//! tree's shape as lines of text. The `avltree` binary wraps both in an interactive
//! menu.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;

pub use domain::{AvlTree, Node, Shape, Slot, TreeOutline, TreeRenderer, EMPTY_TREE};
