//! Self-balancing AVL tree over a totally ordered key type.
//!
//! Every recursive insert/remove call returns the (possibly rotated) root of the
//! subtree it was handed; the caller stores it back into its own child slot.
//! Nodes are exclusively owned by their parent, so there are no parent pointers.

use std::cmp::Ordering;
use std::fmt;

use tracing::{debug, instrument, trace};

use crate::domain::render::TreeRenderer;
use crate::domain::shape::Shape;

type Link<T> = Option<Box<Node<T>>>;

/// A single tree node. The stored height is the height of its own subtree (leaf = 1).
#[derive(Debug, Clone)]
pub struct Node<T> {
    key: T,
    height: usize,
    left: Link<T>,
    right: Link<T>,
}

impl<T> Node<T> {
    fn new(key: T) -> Self {
        Self {
            key,
            height: 1,
            left: None,
            right: None,
        }
    }

    pub fn key(&self) -> &T {
        &self.key
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn left(&self) -> Option<&Node<T>> {
        self.left.as_deref()
    }

    pub fn right(&self) -> Option<&Node<T>> {
        self.right.as_deref()
    }

    /// height(left) - height(right)
    pub fn balance_factor(&self) -> isize {
        link_height(&self.left) as isize - link_height(&self.right) as isize
    }

    fn update_height(&mut self) {
        self.height = 1 + link_height(&self.left).max(link_height(&self.right));
    }
}

fn link_height<T>(link: &Link<T>) -> usize {
    link.as_ref().map_or(0, |n| n.height)
}

/// AVL tree: |height(left) - height(right)| <= 1 at every node.
///
/// Duplicate inserts and removals of absent keys are silent no-ops.
#[derive(Debug, Clone)]
pub struct AvlTree<T> {
    root: Link<T>,
    len: usize,
}

impl<T> Default for AvlTree<T> {
    fn default() -> Self {
        Self { root: None, len: 0 }
    }
}

impl<T> AvlTree<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(&self) -> Option<&Node<T>> {
        self.root.as_deref()
    }

    /// Stored height of the root; 0 for an empty tree.
    pub fn height(&self) -> usize {
        link_height(&self.root)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }
}

impl<T: Ord> AvlTree<T> {
    #[instrument(level = "debug", skip_all)]
    pub fn insert(&mut self, value: T) {
        let mut inserted = false;
        self.root = Some(Self::insert_node(self.root.take(), value, &mut inserted));
        if inserted {
            self.len += 1;
        } else {
            debug!("key already present, insert ignored");
        }
    }

    /// Inserts every value left to right, same as calling `insert` for each.
    pub fn insert_all<I: IntoIterator<Item = T>>(&mut self, values: I) {
        for value in values {
            self.insert(value);
        }
    }

    #[instrument(level = "debug", skip_all)]
    pub fn remove(&mut self, value: &T) {
        let mut removed = false;
        self.root = Self::remove_node(self.root.take(), value, &mut removed);
        if removed {
            self.len -= 1;
        } else {
            debug!("key not present, remove ignored");
        }
    }

    /// Returns the node holding `value`, if any.
    pub fn search(&self, value: &T) -> Option<&Node<T>> {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match value.cmp(&node.key) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return Some(node),
            };
        }
        None
    }

    pub fn contains(&self, value: &T) -> bool {
        self.search(value).is_some()
    }

    fn insert_node(link: Link<T>, value: T, inserted: &mut bool) -> Box<Node<T>> {
        let mut node = match link {
            None => {
                *inserted = true;
                return Box::new(Node::new(value));
            }
            Some(node) => node,
        };

        match value.cmp(&node.key) {
            Ordering::Less => {
                node.left = Some(Self::insert_node(node.left.take(), value, inserted))
            }
            Ordering::Greater => {
                node.right = Some(Self::insert_node(node.right.take(), value, inserted))
            }
            Ordering::Equal => return node,
        }

        rebalance(node)
    }

    fn remove_node(link: Link<T>, value: &T, removed: &mut bool) -> Link<T> {
        let mut node = link?;

        match value.cmp(&node.key) {
            Ordering::Less => node.left = Self::remove_node(node.left.take(), value, removed),
            Ordering::Greater => node.right = Self::remove_node(node.right.take(), value, removed),
            Ordering::Equal => {
                *removed = true;
                match (node.left.take(), node.right.take()) {
                    (left, None) => return left,
                    (None, right) => return right,
                    (Some(left), Some(right)) => {
                        let (rest, successor) = take_min(right);
                        node.key = successor;
                        node.left = Some(left);
                        node.right = rest;
                    }
                }
            }
        }

        Some(rebalance(node))
    }
}

/// Unlinks the leftmost node of `node`'s subtree, returning the remaining subtree and its key.
fn take_min<T>(mut node: Box<Node<T>>) -> (Link<T>, T) {
    match node.left.take() {
        None => {
            let Node { key, right, .. } = *node;
            (right, key)
        }
        Some(left) => {
            let (rest, min) = take_min(left);
            node.left = rest;
            (Some(rebalance(node)), min)
        }
    }
}

fn rotate_right<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    let Some(mut pivot) = node.left.take() else {
        return node;
    };
    node.left = pivot.right.take();
    node.update_height();
    pivot.right = Some(node);
    pivot.update_height();
    pivot
}

fn rotate_left<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    let Some(mut pivot) = node.right.take() else {
        return node;
    };
    node.right = pivot.left.take();
    node.update_height();
    pivot.left = Some(node);
    pivot.update_height();
    pivot
}

/// Recomputes `node`'s height and applies one of the four AVL cases when it is out of balance.
fn rebalance<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    node.update_height();
    let balance = node.balance_factor();

    if balance > 1 {
        if node.left.as_ref().is_some_and(|l| l.balance_factor() < 0) {
            trace!("left-right case");
            node.left = node.left.take().map(rotate_left);
        } else {
            trace!("left-left case");
        }
        return rotate_right(node);
    }

    if balance < -1 {
        if node.right.as_ref().is_some_and(|r| r.balance_factor() > 0) {
            trace!("right-left case");
            node.right = node.right.take().map(rotate_right);
        } else {
            trace!("right-right case");
        }
        return rotate_left(node);
    }

    node
}

impl<T: fmt::Display> AvlTree<T> {
    /// Draws the tree as text lines, root first.
    pub fn render(&self) -> Vec<String> {
        TreeRenderer::render(&Shape::of(self))
    }
}

impl<T: fmt::Display> fmt::Display for AvlTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render().join("\n"))
    }
}

impl<T: Ord> Extend<T> for AvlTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.insert_all(iter);
    }
}

impl<T: Ord> FromIterator<T> for AvlTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.insert_all(iter);
        tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Walks the whole tree checking order, balance and stored heights. Returns the node count.
    fn check<T: Ord>(link: &Link<T>, lower: Option<&T>, upper: Option<&T>) -> usize {
        let Some(node) = link else {
            return 0;
        };
        if let Some(lower) = lower {
            assert!(node.key > *lower, "BST order violated");
        }
        if let Some(upper) = upper {
            assert!(node.key < *upper, "BST order violated");
        }
        assert!(node.balance_factor().abs() <= 1, "node out of balance");
        assert_eq!(
            node.height,
            1 + link_height(&node.left).max(link_height(&node.right)),
            "stale height"
        );
        1 + check(&node.left, lower, Some(&node.key)) + check(&node.right, Some(&node.key), upper)
    }

    fn assert_avl<T: Ord>(tree: &AvlTree<T>) {
        assert_eq!(check(&tree.root, None, None), tree.len());
    }

    #[test]
    fn new_tree_is_empty() {
        let tree: AvlTree<i32> = AvlTree::new();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.height(), 0);
        assert!(tree.root().is_none());
    }

    #[test]
    fn single_rotations_restore_balance() {
        let mut tree = AvlTree::new();
        tree.insert_all([10, 20, 30]);
        let root = tree.root().unwrap();
        assert_eq!(*root.key(), 20);
        assert_eq!(root.height(), 2);

        let mut tree = AvlTree::new();
        tree.insert_all([30, 20, 10]);
        assert_eq!(*tree.root().unwrap().key(), 20);
        assert_avl(&tree);
    }

    #[test]
    fn double_rotations_restore_balance() {
        let mut tree = AvlTree::new();
        tree.insert_all([30, 10, 20]);
        assert_eq!(*tree.root().unwrap().key(), 20);
        assert_avl(&tree);

        let mut tree = AvlTree::new();
        tree.insert_all([10, 30, 20]);
        assert_eq!(*tree.root().unwrap().key(), 20);
        assert_avl(&tree);
    }

    #[test]
    fn rotation_moves_inner_subtree() {
        // double rotation lifts 30; its right subtree 35 moves under 40
        let mut tree = AvlTree::new();
        tree.insert_all([20, 10, 40, 30, 50, 35]);
        let root = tree.root().unwrap();
        assert_eq!(*root.key(), 30);
        assert_eq!(*root.right().unwrap().left().unwrap().key(), 35);
        assert_avl(&tree);
    }

    #[test]
    fn remove_two_children_uses_in_order_successor() {
        let mut tree = AvlTree::new();
        tree.insert_all([50, 30, 70, 20, 40, 60, 80, 65]);
        tree.remove(&50);
        assert_eq!(*tree.root().unwrap().key(), 60);
        assert!(!tree.contains(&50));
        assert!(tree.contains(&65));
        assert_avl(&tree);
    }

    #[test]
    fn remove_rebalances_with_double_rotation() {
        let mut tree = AvlTree::new();
        tree.insert_all([30, 10, 40, 20]);
        tree.remove(&40);
        let root = tree.root().unwrap();
        assert_eq!(*root.key(), 20);
        assert_eq!(*root.left().unwrap().key(), 10);
        assert_eq!(*root.right().unwrap().key(), 30);
        assert_avl(&tree);
    }

    #[test]
    fn remove_prefers_single_rotation_on_tie() {
        let mut tree = AvlTree::new();
        tree.insert_all([30, 20, 40, 10, 25]);
        tree.remove(&40);
        let root = tree.root().unwrap();
        assert_eq!(*root.key(), 20);
        assert_eq!(*root.right().unwrap().key(), 30);
        assert_eq!(*root.right().unwrap().left().unwrap().key(), 25);
        assert_avl(&tree);
    }

    #[test]
    fn len_tracks_effective_operations() {
        let mut tree = AvlTree::new();
        tree.insert_all([5, 3, 5, 8, 3]);
        assert_eq!(tree.len(), 3);
        tree.remove(&4);
        assert_eq!(tree.len(), 3);
        tree.remove(&5);
        assert_eq!(tree.len(), 2);
        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
    }

    #[test]
    fn mixed_sequence_keeps_invariants() {
        let mut tree = AvlTree::new();
        for i in 0..200 {
            tree.insert((i * 37) % 211);
            assert_avl(&tree);
        }
        for i in 0..150 {
            tree.remove(&((i * 53) % 211));
            assert_avl(&tree);
        }
    }

    #[test]
    fn collects_from_iterator() {
        let tree: AvlTree<i32> = (1..=7).collect();
        assert_eq!(tree.len(), 7);
        assert_eq!(tree.height(), 3);
        assert_eq!(*tree.root().unwrap().key(), 4);

        let mut tree = tree;
        tree.extend([8, 9]);
        assert_eq!(tree.len(), 9);
        assert_avl(&tree);
    }
}
