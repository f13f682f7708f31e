use thiserror::Error;

/// Errors reported by the mutating and counting operations of a [`Tree`][crate::Tree].
///
/// None of these leave the tree in a modified state: every check happens before any structural
/// change is made.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    /// `insert` was called with a key the tree already holds.
    #[error("key is already present in the tree")]
    DuplicateKey,
    /// `remove` was called with a key the tree doesn't hold.
    #[error("key was not found in the tree")]
    NotFound,
    /// `range` was called with a lower bound greater than its upper bound.
    #[error("range lower bound is greater than its upper bound")]
    InvalidRange,
}
