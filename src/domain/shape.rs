//! Complete-binary-tree shape of an [`AvlTree`], one level per depth.

use std::fmt::Display;

use tracing::instrument;

use crate::domain::tree::{AvlTree, Node};

/// One position of the complete binary tree layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot {
    /// A node occupies the position; holds the key's display form.
    Present(String),
    /// No node at this position.
    Absent,
}

impl Slot {
    pub fn is_present(&self) -> bool {
        matches!(self, Slot::Present(_))
    }

    pub fn value(&self) -> Option<&str> {
        match self {
            Slot::Present(value) => Some(value),
            Slot::Absent => None,
        }
    }
}

/// Level `d` holds exactly `2^d` slots, left to right. Absent positions are kept as
/// placeholders so a slot at column `c` always has its children at `2c` and `2c + 1`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Shape {
    levels: Vec<Vec<Slot>>,
}

impl Shape {
    #[instrument(level = "debug", skip_all)]
    pub fn of<T: Display>(tree: &AvlTree<T>) -> Self {
        let depth = tree.height();
        let mut levels: Vec<Vec<Slot>> = (0..depth).map(|d| Vec::with_capacity(1 << d)).collect();
        if depth > 0 {
            collect(tree.root(), 0, &mut levels);
        }
        Self { levels }
    }

    pub fn from_levels(levels: Vec<Vec<Slot>>) -> Self {
        Self { levels }
    }

    pub fn levels(&self) -> &[Vec<Slot>] {
        &self.levels
    }

    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Widest key, in characters.
    pub fn max_value_width(&self) -> usize {
        self.levels
            .iter()
            .flatten()
            .filter_map(Slot::value)
            .map(|v| v.chars().count())
            .max()
            .unwrap_or(0)
    }
}

// Pre-order walk; visiting left before right keeps every level in layout order.
// Absent nodes still recurse so their placeholder children are emitted.
fn collect<T: Display>(node: Option<&Node<T>>, depth: usize, levels: &mut [Vec<Slot>]) {
    levels[depth].push(match node {
        Some(n) => Slot::Present(n.key().to_string()),
        None => Slot::Absent,
    });

    if depth + 1 < levels.len() {
        collect(node.and_then(Node::left), depth + 1, levels);
        collect(node.and_then(Node::right), depth + 1, levels);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn present(v: &str) -> Slot {
        Slot::Present(v.to_string())
    }

    #[test]
    fn empty_tree_has_no_levels() {
        let tree: AvlTree<i32> = AvlTree::new();
        let shape = Shape::of(&tree);
        assert!(shape.is_empty());
        assert_eq!(shape.max_value_width(), 0);
    }

    #[test]
    fn levels_double_in_size() {
        let tree: AvlTree<i32> = (1..=10).collect();
        let shape = Shape::of(&tree);
        assert_eq!(shape.depth(), tree.height());
        for (d, level) in shape.levels().iter().enumerate() {
            assert_eq!(level.len(), 1 << d);
        }
    }

    #[test]
    fn absent_positions_are_kept() {
        let tree: AvlTree<i32> = [2, 1, 3, 4].into_iter().collect();
        let shape = Shape::of(&tree);
        assert_eq!(
            shape.levels(),
            &[
                vec![present("2")],
                vec![present("1"), present("3")],
                vec![Slot::Absent, Slot::Absent, Slot::Absent, present("4")],
            ]
        );
        assert_eq!(shape.max_value_width(), 1);
    }
}
