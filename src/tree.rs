//! An ordered multiset implemented with an AVL tree.

use std::cmp::{self, Ordering};
use std::fmt;
use std::iter::FromIterator;

use crate::error::EmptyTreeError;

/// A self-balancing binary search tree.
///
/// Stores values in binary-search-tree order and keeps the heights of every
/// node's subtrees within one of each other by rotating after each update,
/// so that search, insertion and removal all run in O(log n).
///
/// Duplicate values are kept; ties are routed right on insertion, so the
/// container behaves as an ordered multiset.
///
/// ```
/// use avl_tree::AvlTree;
/// let mut tree = AvlTree::new();
/// tree.insert(2);
/// tree.insert(1);
/// tree.insert(3);
/// assert!(tree.contains(&2));
/// assert_eq!(tree.min(), Ok(&1));
/// tree.remove(&2);
/// assert!(!tree.contains(&2));
/// ```
#[derive(Clone)]
pub struct AvlTree<T: Ord> {
    root: Link<T>,
    num_nodes: usize,
}

#[derive(Clone)]
struct Node<T> {
    value: T,
    left: Link<T>,
    right: Link<T>,
    height: usize,
}

type Link<T> = Option<Box<Node<T>>>;

/// An in-order iterator over the values of a tree.
///
/// The stack holds the path to the next value; descendants to the right of
/// a stacked node have not been visited yet.
pub struct Iter<'a, T> {
    stack: Vec<&'a Node<T>>,
}

impl<T: Ord> AvlTree<T> {
    /// Creates an empty tree.
    /// No memory is allocated until the first value is inserted.
    pub fn new() -> Self {
        Self {
            root: None,
            num_nodes: 0,
        }
    }

    /// Returns true if the tree contains no values.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the number of values in the tree.
    pub fn len(&self) -> usize {
        self.num_nodes
    }

    /// Returns the height of the tree: the number of nodes on the longest
    /// path from the root to a leaf, or zero for an empty tree.
    pub fn height(&self) -> usize {
        height(&self.root)
    }

    /// Clears the tree, deallocating all memory.
    pub fn clear(&mut self) {
        self.root = None;
        self.num_nodes = 0;
    }

    /// Returns true if the tree contains a value equal to the given one.
    pub fn contains(&self, value: &T) -> bool {
        let mut current = &self.root;
        while let Some(node) = current {
            current = match value.cmp(&node.value) {
                Ordering::Equal => return true,
                Ordering::Less => &node.left,
                Ordering::Greater => &node.right,
            };
        }
        false
    }

    /// Returns a reference to the smallest value in the tree.
    /// Fails if the tree is empty.
    pub fn min(&self) -> Result<&T, EmptyTreeError> {
        let mut node = self.root.as_deref().ok_or(EmptyTreeError)?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Ok(&node.value)
    }

    /// Returns a reference to the largest value in the tree.
    /// Fails if the tree is empty.
    pub fn max(&self) -> Result<&T, EmptyTreeError> {
        let mut node = self.root.as_deref().ok_or(EmptyTreeError)?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Ok(&node.value)
    }

    /// Inserts a value into the tree.
    /// A value equal to one already present is kept; ties descend right.
    pub fn insert(&mut self, value: T) {
        self.root = Some(insert_at(self.root.take(), value));
        self.num_nodes += 1;
    }

    /// Removes one occurrence of a value from the tree.
    /// Returns whether the value was previously in the tree; removing an
    /// absent value leaves the tree unchanged.
    pub fn remove(&mut self, value: &T) -> bool {
        let (root, removed) = remove_at(self.root.take(), value);
        self.root = root;
        if removed {
            debug_assert!(self.num_nodes >= 1);
            self.num_nodes -= 1;
        }
        removed
    }

    /// Gets an iterator over the values of the tree, in ascending order.
    pub fn iter(&self) -> Iter<'_, T> {
        let mut iter = Iter { stack: Vec::new() };
        iter.push_left_spine(&self.root);
        iter
    }

    /// Returns the values of the tree in ascending order.
    pub fn inorder(&self) -> Vec<&T> {
        let mut values = Vec::with_capacity(self.num_nodes);
        traverse(&self.root, &mut |_| {}, &mut |value| values.push(value));
        values
    }

    /// Returns the values of the tree in pre-order (node before subtrees).
    pub fn preorder(&self) -> Vec<&T> {
        let mut values = Vec::with_capacity(self.num_nodes);
        traverse(&self.root, &mut |value| values.push(value), &mut |_| {});
        values
    }

    /// Returns the values of the tree in post-order (subtrees before node).
    pub fn postorder(&self) -> Vec<&T> {
        let mut values = Vec::with_capacity(self.num_nodes);
        postorder_at(&self.root, &mut values);
        values
    }

    #[cfg(any(test, feature = "consistency_check"))]
    pub fn check_consistency(&self) {
        let (height, num_nodes) = check_node(&self.root, None, None);
        assert_eq!(height, self.height());
        assert_eq!(num_nodes, self.num_nodes);
    }
}

fn height<T>(link: &Link<T>) -> usize {
    match link {
        None => 0,
        Some(node) => node.height,
    }
}

fn insert_at<T: Ord>(link: Link<T>, value: T) -> Box<Node<T>> {
    match link {
        None => Box::new(Node::new(value)),
        Some(mut node) => {
            // Ties go right so that duplicate values are kept.
            if value < node.value {
                node.left = Some(insert_at(node.left.take(), value));
            } else {
                node.right = Some(insert_at(node.right.take(), value));
            }
            rebalance(node)
        }
    }
}

fn remove_at<T: Ord>(link: Link<T>, value: &T) -> (Link<T>, bool) {
    let mut node = match link {
        None => return (None, false),
        Some(node) => node,
    };
    let removed = match value.cmp(&node.value) {
        Ordering::Less => {
            let (left, removed) = remove_at(node.left.take(), value);
            node.left = left;
            removed
        }
        Ordering::Greater => {
            let (right, removed) = remove_at(node.right.take(), value);
            node.right = right;
            removed
        }
        Ordering::Equal => match (node.left.take(), node.right.take()) {
            (None, None) => return (None, true),
            (Some(child), None) | (None, Some(child)) => return (Some(child), true),
            (Some(left), Some(right)) => {
                // Two children: promote the in-order successor's value into
                // this node and remove the successor from the right subtree.
                // The successor has no left child, so its removal reduces to
                // the leaf or one-child case.
                let (right, successor) = take_min(right);
                node.value = successor;
                node.left = Some(left);
                node.right = right;
                true
            }
        },
    };
    (Some(rebalance(node)), removed)
}

/// Unlinks the smallest node of a subtree, rebalancing along the descent
/// path, and returns the remaining subtree together with the removed value.
fn take_min<T: Ord>(mut node: Box<Node<T>>) -> (Link<T>, T) {
    match node.left.take() {
        Some(left) => {
            let (left, min) = take_min(left);
            node.left = left;
            (Some(rebalance(node)), min)
        }
        None => {
            let node = *node;
            (node.right, node.value)
        }
    }
}

/// Restores the AVL condition at the given subtree root if necessary and
/// adjusts its height. The initial imbalance must not exceed +2 or -2, which
/// always holds after a single insert or remove in a subtree. Whether a
/// single or a double rotation is needed is decided by the balance factor of
/// the taller child. Returns the new subtree root.
fn rebalance<T: Ord>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    node.adjust_height();
    let balance = node.balance();
    debug_assert!((-2..=2).contains(&balance));
    if balance > 1 {
        // Rebalance right
        let left = node.left.take().unwrap();
        node.left = Some(if left.balance() < 0 {
            rotate_left(left)
        } else {
            left
        });
        rotate_right(node)
    } else if balance < -1 {
        // Rebalance left
        let right = node.right.take().unwrap();
        node.right = Some(if right.balance() > 0 {
            rotate_right(right)
        } else {
            right
        });
        rotate_left(node)
    } else {
        node
    }
}

fn rotate_left<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    let mut pivot = node.right.take().unwrap();
    node.right = pivot.left.take();
    // Heights must be recomputed child before parent.
    node.adjust_height();
    pivot.left = Some(node);
    pivot.adjust_height();
    pivot
}

fn rotate_right<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    let mut pivot = node.left.take().unwrap();
    node.left = pivot.right.take();
    node.adjust_height();
    pivot.right = Some(node);
    pivot.adjust_height();
    pivot
}

fn traverse<'a, T, Pre, In>(link: &'a Link<T>, preorder: &mut Pre, inorder: &mut In)
where
    Pre: FnMut(&'a T),
    In: FnMut(&'a T),
{
    if let Some(node) = link {
        preorder(&node.value);
        traverse(&node.left, preorder, inorder);
        inorder(&node.value);
        traverse(&node.right, preorder, inorder);
    }
}

fn postorder_at<'a, T>(link: &'a Link<T>, values: &mut Vec<&'a T>) {
    if let Some(node) = link {
        postorder_at(&node.left, values);
        postorder_at(&node.right, values);
        values.push(&node.value);
    }
}

#[cfg(any(test, feature = "consistency_check"))]
fn check_node<T: Ord>(link: &Link<T>, min: Option<&T>, max: Option<&T>) -> (usize, usize) {
    match link {
        None => (0, 0),
        Some(node) => {
            // Check binary search tree ordering. Ties are routed right on
            // insertion but rotations can carry an equal value into a left
            // subtree, so both bounds are inclusive.
            if let Some(min) = min {
                assert!(node.value >= *min);
            }
            if let Some(max) = max {
                assert!(node.value <= *max);
            }

            let (left_height, left_nodes) = check_node(&node.left, min, Some(&node.value));
            let (right_height, right_nodes) = check_node(&node.right, Some(&node.value), max);

            // Check cached height
            assert_eq!(node.height, 1 + cmp::max(left_height, right_height));

            // Check AVL condition (near balance)
            assert!(left_height <= right_height + 1);
            assert!(right_height <= left_height + 1);

            (node.height, left_nodes + right_nodes + 1)
        }
    }
}

impl<T: Ord> Default for AvlTree<T> {
    /// Creates an empty tree.
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> PartialEq for AvlTree<T> {
    fn eq(&self, other: &Self) -> bool {
        self.num_nodes == other.num_nodes && self.iter().eq(other.iter())
    }
}

impl<T: Ord> Eq for AvlTree<T> {}

impl<T: Ord> FromIterator<T> for AvlTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        for value in iter {
            tree.insert(value);
        }
        tree
    }
}

impl<T: Ord> Extend<T> for AvlTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: Ord + fmt::Debug> fmt::Debug for AvlTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<'a, T: Ord> IntoIterator for &'a AvlTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> Iter<'a, T> {
    fn push_left_spine(&mut self, mut link: &'a Link<T>) {
        while let Some(node) = link {
            self.stack.push(node);
            link = &node.left;
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;
    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(&node.right);
        Some(&node.value)
    }
}

impl<T> Node<T> {
    fn new(value: T) -> Self {
        Self {
            value,
            left: None,
            right: None,
            height: 1,
        }
    }

    fn balance(&self) -> isize {
        height(&self.left) as isize - height(&self.right) as isize
    }

    fn adjust_height(&mut self) {
        self.height = 1 + cmp::max(height(&self.left), height(&self.right));
    }
}
