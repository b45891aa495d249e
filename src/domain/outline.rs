use std::fmt::Display;

use termtree::Tree;
use tracing::instrument;

use crate::domain::render::EMPTY_TREE;
use crate::domain::tree::{AvlTree, Node};

/// Placeholder label for the missing side of a node with one child.
pub const NO_CHILD: &str = "-";

/// Indented outline view, the alternative to the grid drawing.
pub trait TreeOutline {
    fn to_outline(&self) -> Tree<String>;
}

impl<T: Display> TreeOutline for AvlTree<T> {
    #[instrument(level = "debug", skip_all)]
    fn to_outline(&self) -> Tree<String> {
        match self.root() {
            Some(root) => node_outline(root),
            None => Tree::new(EMPTY_TREE.to_string()),
        }
    }
}

fn node_outline<T: Display>(node: &Node<T>) -> Tree<String> {
    let mut tree = Tree::new(node.key().to_string());
    if node.left().is_none() && node.right().is_none() {
        return tree;
    }

    // Both sides are listed so left and right stay distinguishable
    for child in [node.left(), node.right()] {
        tree.push(match child {
            Some(child) => node_outline(child),
            None => Tree::new(NO_CHILD.to_string()),
        });
    }
    tree
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outline_lists_both_sides() {
        let tree: AvlTree<i32> = [2, 1].into_iter().collect();
        let outline = tree.to_outline();
        assert_eq!(outline.root, "2");
        let labels: Vec<&str> = outline.leaves.iter().map(|l| l.root.as_str()).collect();
        assert_eq!(labels, vec!["1", NO_CHILD]);
    }

    #[test]
    fn empty_outline_is_sentinel() {
        let tree: AvlTree<i32> = AvlTree::new();
        assert_eq!(tree.to_outline().root, EMPTY_TREE);
        assert!(tree.to_outline().leaves.is_empty());
    }
}
