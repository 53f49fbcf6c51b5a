//! Error types reported by tree queries.

use thiserror::Error;

/// Returned by [`min`] and [`max`] when the tree has no values.
///
/// [`min`]: crate::AvlTree::min
/// [`max`]: crate::AvlTree::max
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("the tree is empty")]
pub struct EmptyTreeError;
