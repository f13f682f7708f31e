//! A self-balancing, size-augmented BST (an order-statistics AVL tree) holding a set of unique
//! keys.
//!
//! # Examples
//!
//! ```
//! use order_stat_tree::{Tree, TreeError};
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert_eq!(tree.find(&1), None);
//!
//! tree.insert(1).unwrap();
//! assert!(tree.contains(&1));
//!
//! // Keys are unique.
//! assert_eq!(tree.insert(1), Err(TreeError::DuplicateKey));
//!
//! // Counting is logarithmic too.
//! tree.insert(4).unwrap();
//! tree.insert(9).unwrap();
//! assert_eq!(tree.rank(&5), 2);
//! assert_eq!(tree.range(&2, &9), Ok(2));
//!
//! // Removing a key hands it back.
//! assert_eq!(tree.remove(&1), Ok(1));
//! assert_eq!(tree.find(&1), None);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::mem;

use tracing::{debug, trace};

use crate::error::TreeError;
use crate::iter::Iter;
use crate::node::{Arena, NodeId, Search, Slot, Subtree};

/// An AVL tree whose nodes also track the size of their subtree. This can be used for inserting,
/// finding, and removing keys, and for counting keys by order in logarithmic time.
///
/// Keys are ordered by the comparator the tree was built with: [`Ord`] for [`Tree::new`] or any
/// total order passed to [`Tree::with_comparator`].
#[derive(Clone)]
pub struct Tree<K, C = fn(&K, &K) -> Ordering> {
    pub(crate) nodes: Arena<K>,
    pub(crate) cmp: C,
}

impl<K> Default for Tree<K>
where
    K: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Tree<K>
where
    K: Ord,
{
    /// Generate a new, empty `Tree` ordered by `K`'s [`Ord`] implementation.
    pub fn new() -> Self {
        Self::with_comparator(K::cmp)
    }
}

impl<K, C> fmt::Debug for Tree<K, C>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let root = self.nodes.root().map(|id| Subtree {
            nodes: &self.nodes,
            id,
        });
        f.debug_struct("Tree").field("root", &root).finish()
    }
}

impl<K, C> Tree<K, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    /// Generate a new, empty `Tree` ordered by `cmp`, which must be a total order.
    ///
    /// # Examples
    ///
    /// ```
    /// use order_stat_tree::Tree;
    ///
    /// let mut tree = Tree::with_comparator(|a: &i32, b: &i32| b.cmp(a));
    /// for key in [1, 3, 2] {
    ///     tree.insert(key).unwrap();
    /// }
    ///
    /// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [3, 2, 1]);
    /// assert_eq!(tree.min(), Some(&3));
    /// ```
    pub fn with_comparator(cmp: C) -> Self {
        Self {
            nodes: Arena::new(),
            cmp,
        }
    }

    /// The number of keys in the tree.
    pub fn len(&self) -> usize {
        self.nodes.size(self.nodes.root())
    }

    /// Whether the tree holds no keys at all.
    pub fn is_empty(&self) -> bool {
        self.nodes.root().is_none()
    }

    /// Removes every key. Handles into the tree are invalidated.
    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    /// Potentially finds the node holding the given key. If no node has the key, `None` is
    /// returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use order_stat_tree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// let handle = tree.insert(1).unwrap();
    ///
    /// assert_eq!(tree.find(&1), Some(handle));
    /// assert_eq!(tree.get(handle), Some(&1));
    /// assert_eq!(tree.find(&42), None);
    /// ```
    pub fn find(&self, key: &K) -> Option<NodeId> {
        match self.nodes.search(key, &self.cmp) {
            Search::Found(id) => Some(id),
            Search::Vacant(_) => None,
        }
    }

    /// Whether the tree holds `key`.
    pub fn contains(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// The key held by the node `handle` names. Returns `None` for a handle whose node has been
    /// removed, as long as no later insert has reused its storage: a reused handle names whichever
    /// key was inserted into it.
    pub fn get(&self, handle: NodeId) -> Option<&K> {
        self.nodes.get(handle).map(|node| &node.key)
    }

    /// Inserts `key` into the tree and returns a handle to its node. Inserting a key the tree
    /// already holds fails with [`TreeError::DuplicateKey`] and leaves the tree untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use order_stat_tree::{Tree, TreeError};
    ///
    /// let mut tree = Tree::new();
    ///
    /// let handle = tree.insert(1).unwrap();
    /// assert_eq!(tree.get(handle), Some(&1));
    ///
    /// assert_eq!(tree.insert(1), Err(TreeError::DuplicateKey));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K) -> Result<NodeId, TreeError> {
        match self.nodes.search(&key, &self.cmp) {
            Search::Found(existing) => {
                debug!(node = existing.0, "rejecting duplicate key");
                Err(TreeError::DuplicateKey)
            }
            Search::Vacant(slot) => {
                let id = self.nodes.insert_under(slot, key);
                trace!(node = id.0, "attached new leaf");
                self.nodes.retrace(self.nodes[id].parent);
                Ok(id)
            }
        }
    }

    /// Removes `key` from the tree and returns it. If the tree doesn't hold the key this fails
    /// with [`TreeError::NotFound`] and nothing changes.
    ///
    /// A node with two children isn't unlinked itself: it takes its successor's key and the
    /// successor's node, which has at most one child, is spliced out instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use order_stat_tree::{Tree, TreeError};
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1).unwrap();
    ///
    /// assert_eq!(tree.remove(&1), Ok(1));
    /// assert_eq!(tree.remove(&1), Err(TreeError::NotFound));
    /// assert!(tree.is_empty());
    /// ```
    pub fn remove(&mut self, key: &K) -> Result<K, TreeError> {
        let Some(target) = self.find(key) else {
            debug!("key to remove is absent");
            return Err(TreeError::NotFound);
        };

        let node = &self.nodes[target];
        let (removed, retrace_from) = match (node.left, node.right) {
            (Some(_), Some(_)) => {
                let successor = self
                    .nodes
                    .successor(target)
                    .expect("A node with a right child has a successor");
                trace!(
                    node = target.0,
                    successor = successor.0,
                    "moving successor key up"
                );
                let (spliced, parent) = self.nodes.splice_out(successor);
                let removed = mem::replace(&mut self.nodes[target].key, spliced.key);
                (removed, parent)
            }
            _ => {
                trace!(node = target.0, "splicing out");
                let (spliced, parent) = self.nodes.splice_out(target);
                (spliced.key, parent)
            }
        };

        self.nodes.retrace(retrace_from);
        Ok(removed)
    }

    /// The number of keys strictly less than `key`, whether or not `key` itself is present.
    ///
    /// # Examples
    ///
    /// ```
    /// use order_stat_tree::Tree;
    ///
    /// let tree: Tree<_> = [10, 20, 30].into_iter().collect();
    ///
    /// assert_eq!(tree.rank(&5), 0);
    /// assert_eq!(tree.rank(&20), 1);
    /// assert_eq!(tree.rank(&25), 2);
    /// assert_eq!(tree.rank(&99), 3);
    /// ```
    pub fn rank(&self, key: &K) -> usize {
        self.count_before(self.nodes.root(), key, false)
    }

    /// The number of keys in the inclusive range `[lo, hi]`. Fails with
    /// [`TreeError::InvalidRange`] when `lo` is greater than `hi`.
    ///
    /// # Examples
    ///
    /// ```
    /// use order_stat_tree::{Tree, TreeError};
    ///
    /// let tree: Tree<_> = [1, 3, 4, 5].into_iter().collect();
    ///
    /// assert_eq!(tree.range(&1, &5), Ok(4));
    /// assert_eq!(tree.range(&2, &2), Ok(0));
    /// assert_eq!(tree.range(&5, &1), Err(TreeError::InvalidRange));
    /// ```
    pub fn range(&self, lo: &K, hi: &K) -> Result<usize, TreeError> {
        if (self.cmp)(lo, hi) == Ordering::Greater {
            return Err(TreeError::InvalidRange);
        }

        let root = self.nodes.root();
        Ok(self.count_before(root, hi, true) - self.count_before(root, lo, false))
    }

    /// Visits the keys in the inclusive range `[lo, hi]` in ascending order. Fails with
    /// [`TreeError::InvalidRange`] when `lo` is greater than `hi`.
    ///
    /// Finding the first key is `O(lg N)` and each following key is reached through successor
    /// links, so listing `m` keys costs `O(lg N + m)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use order_stat_tree::{Tree, TreeError};
    ///
    /// let tree: Tree<_> = [1, 3, 4, 5, 8].into_iter().collect();
    ///
    /// let keys: Vec<_> = tree.keys_in(&2, &5).unwrap().copied().collect();
    /// assert_eq!(keys, [3, 4, 5]);
    /// assert_eq!(tree.keys_in(&6, &7).unwrap().len(), 0);
    /// assert!(matches!(tree.keys_in(&5, &1), Err(TreeError::InvalidRange)));
    /// ```
    pub fn keys_in(&self, lo: &K, hi: &K) -> Result<Iter<'_, K>, TreeError> {
        let count = self.range(lo, hi)?;
        Ok(Iter::starting_at(&self.nodes, self.lower_bound(lo), count))
    }

    /// Counts the keys of the subtree at `id` that come before `key`, and `key` itself too when
    /// `inclusive` is set.
    fn count_before(&self, id: Option<NodeId>, key: &K, inclusive: bool) -> usize {
        let Some(id) = id else {
            return 0;
        };
        let node = &self.nodes[id];
        match (self.cmp)(key, &node.key) {
            Ordering::Less => self.count_before(node.left, key, inclusive),
            Ordering::Equal => self.nodes.size(node.left) + usize::from(inclusive),
            Ordering::Greater => {
                1 + self.nodes.size(node.left) + self.count_before(node.right, key, inclusive)
            }
        }
    }

    /// The key at position `index` in sorted order, counting from 0. This is the inverse of
    /// [`Tree::rank`] for keys the tree holds.
    ///
    /// # Examples
    ///
    /// ```
    /// use order_stat_tree::Tree;
    ///
    /// let tree: Tree<_> = [10, 20, 30].into_iter().collect();
    ///
    /// assert_eq!(tree.select(0), Some(&10));
    /// assert_eq!(tree.select(2), Some(&30));
    /// assert_eq!(tree.select(3), None);
    /// ```
    pub fn select(&self, index: usize) -> Option<&K> {
        self.select_from(self.nodes.root(), index)
            .map(|id| &self.nodes[id].key)
    }

    fn select_from(&self, id: Option<NodeId>, index: usize) -> Option<NodeId> {
        let id = id?;
        let node = &self.nodes[id];
        let left_size = self.nodes.size(node.left);
        match index.cmp(&left_size) {
            Ordering::Less => self.select_from(node.left, index),
            Ordering::Equal => Some(id),
            Ordering::Greater => self.select_from(node.right, index - left_size - 1),
        }
    }

    /// The smallest key in the tree.
    pub fn min(&self) -> Option<&K> {
        self.nodes
            .root()
            .map(|root| &self.nodes[self.nodes.find_min(root)].key)
    }

    /// The largest key in the tree.
    pub fn max(&self) -> Option<&K> {
        self.nodes
            .root()
            .map(|root| &self.nodes[self.nodes.find_max(root)].key)
    }

    /// The smallest key strictly greater than `key`. `key` itself doesn't have to be present.
    ///
    /// # Examples
    ///
    /// ```
    /// use order_stat_tree::Tree;
    ///
    /// let tree: Tree<_> = [10, 20, 30].into_iter().collect();
    ///
    /// assert_eq!(tree.successor(&10), Some(&20));
    /// assert_eq!(tree.successor(&15), Some(&20));
    /// assert_eq!(tree.successor(&30), None);
    /// ```
    pub fn successor(&self, key: &K) -> Option<&K> {
        let next = match self.lower_bound(key) {
            Some(id) if (self.cmp)(&self.nodes[id].key, key).is_eq() => self.nodes.successor(id),
            other => other,
        };
        next.map(|id| &self.nodes[id].key)
    }

    /// The node holding the smallest key that isn't less than `key`.
    fn lower_bound(&self, key: &K) -> Option<NodeId> {
        match self.nodes.search(key, &self.cmp) {
            Search::Found(id) => Some(id),
            // `key` would be the left child of `parent`, so `parent` comes right after it.
            Search::Vacant(Slot::Left(parent)) => Some(parent),
            Search::Vacant(Slot::Right(parent)) => self.nodes.successor(parent),
            Search::Vacant(Slot::Root) => None,
        }
    }

    /// The largest key strictly less than `key`. `key` itself doesn't have to be present.
    pub fn predecessor(&self, key: &K) -> Option<&K> {
        let prev = match self.nodes.search(key, &self.cmp) {
            Search::Found(id) => self.nodes.predecessor(id),
            Search::Vacant(Slot::Right(parent)) => Some(parent),
            Search::Vacant(Slot::Left(parent)) => self.nodes.predecessor(parent),
            Search::Vacant(Slot::Root) => None,
        };
        prev.map(|id| &self.nodes[id].key)
    }

    /// Visits the keys in ascending order.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter::new(&self.nodes, self.len())
    }
}

impl<'a, K, C> IntoIterator for &'a Tree<K, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Keys that are already present are skipped.
impl<K, C> Extend<K> for Tree<K, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            let _ = self.insert(key);
        }
    }
}

impl<K> FromIterator<K> for Tree<K>
where
    K: Ord,
{
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}
