//! This crate exposes an order-statistics tree: a self-balancing Binary Search Tree (BST) that
//! can also count its keys by order.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` will typically store
//! some sort of value (the value that was inserted, for example) and will
//! sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    value less than its own value.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    value greater than its own value.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching for values in the tree takes `O(height)` (where `height` is defined as the longest
//! path from the root `Node` to a leaf `Node`).
//!
//! ## AVL trees
//!
//! [`Tree`] keeps its height at `O(lg N)` by keeping, at every `Node`, the heights of the two
//! subtrees within one of each other. Insertions and deletions that break this are repaired on
//! the way back up to the root with rotations.
//!
//! ## Order statistics
//!
//! Every `Node` also records how many `Node`s its subtree holds. That lets [`Tree::rank`],
//! [`Tree::range`] and [`Tree::select`] answer in `O(lg N)` by adding up subtree sizes along a
//! single root-to-leaf path rather than visiting every key.
//!
//! ```
//! use order_stat_tree::Tree;
//!
//! let mut tree = Tree::new();
//! for key in [5, 1, 3, 4] {
//!     tree.insert(key).unwrap();
//! }
//!
//! assert_eq!(tree.range(&1, &5), Ok(4));
//! assert_eq!(tree.rank(&4), 2);
//! assert_eq!(tree.select(2), Some(&4));
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

mod augment;
mod balance;
mod error;
mod iter;
mod node;
mod tree;
mod validate;

pub use error::TreeError;
pub use iter::Iter;
pub use node::NodeId;
pub use tree::Tree;
pub use validate::InvariantViolation;
