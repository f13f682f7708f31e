//! Per-node augmentation and the strategies that keep it current.
//!
//! Every strategy derives some field of a node from its children's [`Summary`]. The rebalancing
//! walk and the rotations call [`Augmentation::recompute`] on each node they touch, children first,
//! so adding a field means adding a strategy here rather than touching the tree code.

use crate::node::Node;

/// The augmentation values of a subtree. An absent subtree is `Summary::default()`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Summary {
    pub(crate) height: usize,
    pub(crate) size: usize,
}

/// Recomputes part of a node's augmentation from the summaries of its two children.
pub(crate) trait Recompute {
    fn recompute<K>(node: &mut Node<K>, left: Summary, right: Summary);
}

/// Longest path from the node to a leaf, counting nodes.
pub(crate) struct Height;

impl Recompute for Height {
    fn recompute<K>(node: &mut Node<K>, left: Summary, right: Summary) {
        node.height = left.height.max(right.height) + 1;
    }
}

/// Number of nodes in the subtree.
pub(crate) struct Size;

impl Recompute for Size {
    fn recompute<K>(node: &mut Node<K>, left: Summary, right: Summary) {
        node.size = left.size + right.size + 1;
    }
}

impl<A, B> Recompute for (A, B)
where
    A: Recompute,
    B: Recompute,
{
    fn recompute<K>(node: &mut Node<K>, left: Summary, right: Summary) {
        A::recompute(node, left, right);
        B::recompute(node, left, right);
    }
}

/// Everything a tree node carries.
pub(crate) type Augmentation = (Height, Size);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Arena;

    #[test]
    fn leaf_summary() {
        let arena = Arena::<u8>::new();
        assert_eq!(arena.summary(None), Summary::default());
    }

    #[test]
    fn combined_strategy_sets_both_fields() {
        let mut tree = crate::Tree::new();
        tree.insert(2).unwrap();
        let one = tree.insert(1).unwrap();
        let mut node = tree.nodes[one].clone();

        let left = Summary { height: 3, size: 5 };
        let right = Summary { height: 1, size: 1 };
        <Augmentation as Recompute>::recompute(&mut node, left, right);

        assert_eq!(node.height, 4);
        assert_eq!(node.size, 7);
    }
}
