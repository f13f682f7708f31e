//! A full check of the tree's invariants, for tests and debugging. Nothing on a mutation path calls
//! this: it visits every node, so it is `O(n)`.

use std::cmp::Ordering;

use thiserror::Error;

use crate::node::NodeId;
use crate::Tree;

/// The first broken invariant [`Tree::validate`] came across.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InvariantViolation {
    /// The root node has a parent link.
    #[error("root {root:?} has a parent")]
    RootHasParent {
        /// The root node.
        root: NodeId,
    },
    /// A child's parent link doesn't point back at the node holding the child.
    #[error("{child:?} is a child of {parent:?} but doesn't link back to it")]
    ParentLink {
        /// The node holding the child.
        parent: NodeId,
        /// The child with the wrong parent link.
        child: NodeId,
    },
    /// A key is not strictly between the keys of the ancestors it sits between.
    #[error("{node:?} is out of order relative to its ancestors")]
    Order {
        /// The misplaced node.
        node: NodeId,
    },
    /// The heights of a node's subtrees differ by more than one.
    #[error("{node:?} has balance factor {balance}")]
    Unbalanced {
        /// The unbalanced node.
        node: NodeId,
        /// `height(right) - height(left)`.
        balance: isize,
    },
    /// A stored height doesn't match the one derived from the node's children.
    #[error("{node:?} stores height {stored} but its children imply {expected}")]
    Height {
        /// The node with the stale height.
        node: NodeId,
        /// The height stored in the node.
        stored: usize,
        /// `1 + max(height(left), height(right))`.
        expected: usize,
    },
    /// A stored size doesn't match the one derived from the node's children.
    #[error("{node:?} stores size {stored} but its children imply {expected}")]
    Size {
        /// The node with the stale size.
        node: NodeId,
        /// The size stored in the node.
        stored: usize,
        /// `1 + size(left) + size(right)`.
        expected: usize,
    },
    /// Nodes are allocated that the root doesn't reach.
    #[error("{live} nodes are allocated but the root reaches {reachable}")]
    Unreachable {
        /// Allocated nodes.
        live: usize,
        /// Nodes in the tree hanging from the root.
        reachable: usize,
    },
}

impl<K, C> Tree<K, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    /// Checks every invariant of the tree: parent links agree with child links, keys are in
    /// order tree-wide, every node is balanced, and every stored height and size is what its
    /// children imply.
    ///
    /// # Examples
    ///
    /// ```
    /// use order_stat_tree::Tree;
    ///
    /// let tree: Tree<_> = (0..100).collect();
    /// assert_eq!(tree.validate(), Ok(()));
    /// ```
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        let Some(root) = self.nodes.root() else {
            return self.check_reachable(0);
        };
        if self.nodes[root].parent.is_some() {
            return Err(InvariantViolation::RootHasParent { root });
        }

        self.check_subtree(root, None, None)?;
        self.check_reachable(self.nodes[root].size)
    }

    fn check_reachable(&self, reachable: usize) -> Result<(), InvariantViolation> {
        let live = self.nodes.live();
        if live == reachable {
            Ok(())
        } else {
            Err(InvariantViolation::Unreachable { live, reachable })
        }
    }

    /// Checks the subtree at `id`, all of whose keys must lie strictly between `lower` and
    /// `upper`.
    fn check_subtree(
        &self,
        id: NodeId,
        lower: Option<&K>,
        upper: Option<&K>,
    ) -> Result<(), InvariantViolation> {
        let node = &self.nodes[id];

        let above_lower = lower.is_none_or(|lower| (self.cmp)(lower, &node.key).is_lt());
        let below_upper = upper.is_none_or(|upper| (self.cmp)(&node.key, upper).is_lt());
        if !(above_lower && below_upper) {
            return Err(InvariantViolation::Order { node: id });
        }

        for child in [node.left, node.right].into_iter().flatten() {
            if self.nodes[child].parent != Some(id) {
                return Err(InvariantViolation::ParentLink { parent: id, child });
            }
        }

        if let Some(left) = node.left {
            self.check_subtree(left, lower, Some(&node.key))?;
        }
        if let Some(right) = node.right {
            self.check_subtree(right, Some(&node.key), upper)?;
        }

        // The children are known to be consistent now, so their stored values can be trusted.
        let left = self.nodes.summary(node.left);
        let right = self.nodes.summary(node.right);

        let expected = left.height.max(right.height) + 1;
        if node.height != expected {
            return Err(InvariantViolation::Height {
                node: id,
                stored: node.height,
                expected,
            });
        }

        let expected = left.size + right.size + 1;
        if node.size != expected {
            return Err(InvariantViolation::Size {
                node: id,
                stored: node.size,
                expected,
            });
        }

        let balance = self.nodes.balance_factor(id);
        if balance.abs() > 1 {
            return Err(InvariantViolation::Unbalanced { node: id, balance });
        }

        Ok(())
    }
}
