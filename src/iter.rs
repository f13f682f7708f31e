use std::iter::FusedIterator;

use crate::node::{Arena, NodeId};

/// An in-order iterator over the keys of a [`Tree`][crate::Tree], created by
/// [`Tree::iter`][crate::Tree::iter] and [`Tree::keys_in`][crate::Tree::keys_in].
///
/// Starts at the minimum and follows successor links, so the whole walk is `O(n)` even though a
/// single step can take `O(lg N)`.
pub struct Iter<'a, K> {
    nodes: &'a Arena<K>,
    next: Option<NodeId>,
    remaining: usize,
}

impl<'a, K> Iter<'a, K> {
    pub(crate) fn new(nodes: &'a Arena<K>, len: usize) -> Self {
        Self::starting_at(nodes, nodes.root().map(|root| nodes.find_min(root)), len)
    }

    /// Yields `len` keys in order, the first being the one held by `first`.
    pub(crate) fn starting_at(nodes: &'a Arena<K>, first: Option<NodeId>, len: usize) -> Self {
        Self {
            nodes,
            next: first,
            remaining: len,
        }
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.next?;
        self.next = self.nodes.successor(id);
        self.remaining -= 1;
        Some(&self.nodes[id].key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {}

impl<K> FusedIterator for Iter<'_, K> {}
