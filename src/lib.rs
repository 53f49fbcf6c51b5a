//! A self-balancing binary search tree (AVL tree).
//!
//! The tree keeps the heights of every node's left and right subtrees within
//! one of each other, giving O(log n) search, insertion and removal.
//! Duplicate values are permitted — ties are routed right on insertion — so
//! the container behaves as an ordered multiset.
//!
//! ```
//! use avl_tree::AvlTree;
//!
//! let mut tree: AvlTree<i32> = [10, 20, 30, 40, 50, 25].into_iter().collect();
//! assert_eq!(tree.inorder(), [&10, &20, &25, &30, &40, &50]);
//! assert_eq!(tree.min(), Ok(&10));
//!
//! tree.remove(&30);
//! assert!(!tree.contains(&30));
//! ```

mod error;
mod tree;

pub use error::EmptyTreeError;
pub use tree::{AvlTree, Iter};
