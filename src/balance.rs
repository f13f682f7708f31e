//! Rotations and the upward rebalancing walk that keep the tree an AVL tree.
//!
//! See <https://en.wikipedia.org/wiki/AVL_tree#Rebalancing> for terminology.

use tracing::trace;

use crate::node::{Arena, NodeId};

impl<K> Arena<K> {
    /// The difference in height between the right and left subtrees of `id`.
    pub(crate) fn balance_factor(&self, id: NodeId) -> isize {
        let node = &self[id];
        self.height(node.right) as isize - self.height(node.left) as isize
    }

    /// Walks from `from` up to the root, recomputing each node's augmentation and rotating
    /// wherever the heights of its children differ by two.
    pub(crate) fn retrace(&mut self, from: Option<NodeId>) {
        let mut current = from;
        while let Some(id) = current {
            self.fix(id);
            let subtree_root = self.balance(id);
            current = self[subtree_root].parent;
        }
    }

    /// Restores the balance of `id`, whose children must already be balanced and current.
    /// Returns the node now at the top of this subtree.
    fn balance(&mut self, id: NodeId) -> NodeId {
        let node = &self[id];
        match (self.balance_factor(id), node.left, node.right) {
            (n, _, Some(right)) if n >= 2 => {
                if self.height(self[right].right) >= self.height(self[right].left) {
                    self.rotate_left(id)
                } else {
                    self.rotate_right(right);
                    self.rotate_left(id)
                }
            }
            (n, Some(left), _) if n <= -2 => {
                if self.height(self[left].left) >= self.height(self[left].right) {
                    self.rotate_right(id)
                } else {
                    self.rotate_left(left);
                    self.rotate_right(id)
                }
            }
            _ => id,
        }
    }

    /// Rotate `old_root` to the right. This moves the left child up vertically and `old_root`
    /// down vertically. Used to rebalance the tree when the left child is too tall. As such, it
    /// must only be called when there _is_ a left child.
    ///
    /// ## Panics
    ///
    /// When called on a node without a left child.
    ///
    /// # Diagram
    ///
    /// ```text
    ///    Option<parent>            Option<parent>
    ///      /                         /
    ///   old_root                  new_root
    ///    /     \                  /     \
    /// new_root  z     rotate ->  x    old_root
    ///  / \                               /  \
    /// x   y                             y    z
    /// ```
    pub(crate) fn rotate_right(&mut self, old_root: NodeId) -> NodeId {
        let new_root = self[old_root].left.expect("Rotate right => left child");
        let slot = self.slot_of(old_root);
        let inner = self[new_root].right;
        trace!(old_root = old_root.0, new_root = new_root.0, "rotating right");

        self[old_root].left = inner;
        if let Some(inner) = inner {
            self[inner].parent = Some(old_root);
        }
        self[new_root].right = Some(old_root);
        self[old_root].parent = Some(new_root);
        self.set_slot(slot, Some(new_root));

        // `old_root` is now the child so its augmentation has to be current first.
        self.fix(old_root);
        self.fix(new_root);
        new_root
    }

    /// Mirror image of [`Arena::rotate_right`]: the right child moves up.
    ///
    /// ## Panics
    ///
    /// When called on a node without a right child.
    pub(crate) fn rotate_left(&mut self, old_root: NodeId) -> NodeId {
        let new_root = self[old_root].right.expect("Rotate left => right child");
        let slot = self.slot_of(old_root);
        let inner = self[new_root].left;
        trace!(old_root = old_root.0, new_root = new_root.0, "rotating left");

        self[old_root].right = inner;
        if let Some(inner) = inner {
            self[inner].parent = Some(old_root);
        }
        self[new_root].left = Some(old_root);
        self[old_root].parent = Some(new_root);
        self.set_slot(slot, Some(new_root));

        self.fix(old_root);
        self.fix(new_root);
        new_root
    }
}
