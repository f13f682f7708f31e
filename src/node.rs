//! Nodes and the structural primitives the [`Tree`][crate::Tree] is built from.
//!
//! Nodes live in an [`Arena`] and refer to one another by [`NodeId`]. A node's `left` and `right`
//! links are the owning edges of the tree. `parent` is a plain back-reference used to walk upwards
//! (retracing after a mutation, finding a successor) and never decides when a node is freed.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Index, IndexMut};

use crate::augment::{Augmentation, Recompute, Summary};

/// A handle to a node of a [`Tree`][crate::Tree], as returned by
/// [`Tree::insert`][crate::Tree::insert] and [`Tree::find`][crate::Tree::find].
///
/// A handle stays valid until its node is destroyed. Removing a key whose node has two children
/// moves the successor's key into that node, so the handle that named the removed key then names
/// the successor key, and the successor's old handle is dead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

#[derive(Clone)]
pub(crate) struct Node<K> {
    pub(crate) key: K,
    pub(crate) parent: Option<NodeId>,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,

    /// How many levels are in the subtree rooted at this node.
    /// A node with no children has a height of 1.
    pub(crate) height: usize,
    /// How many nodes are in the subtree rooted at this node, itself included.
    pub(crate) size: usize,
}

impl<K> Node<K> {
    fn leaf(key: K, parent: Option<NodeId>) -> Self {
        Self {
            key,
            parent,
            left: None,
            right: None,
            height: 1,
            size: 1,
        }
    }

    pub(crate) fn summary(&self) -> Summary {
        Summary {
            height: self.height,
            size: self.size,
        }
    }
}

/// The place a node hangs from. `Root` is the slot above the root node and stands in for a
/// sentinel parent, so replacing the root is no different from replacing any other child.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Slot {
    Root,
    Left(NodeId),
    Right(NodeId),
}

impl Slot {
    fn parent(self) -> Option<NodeId> {
        match self {
            Slot::Root => None,
            Slot::Left(parent) | Slot::Right(parent) => Some(parent),
        }
    }
}

/// The outcome of descending the tree looking for a key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Search {
    /// The key is held by this node.
    Found(NodeId),
    /// The key is absent. This is the empty slot it would be attached to.
    Vacant(Slot),
}

/// Storage for the nodes of one tree plus the handle of its root.
#[derive(Clone)]
pub(crate) struct Arena<K> {
    slots: Vec<Option<Node<K>>>,
    free: Vec<usize>,
    root: Option<NodeId>,
}

impl<K> Index<NodeId> for Arena<K> {
    type Output = Node<K>;

    fn index(&self, id: NodeId) -> &Node<K> {
        self.slots[id.0].as_ref().expect("Node handles in the tree are live")
    }
}

impl<K> IndexMut<NodeId> for Arena<K> {
    fn index_mut(&mut self, id: NodeId) -> &mut Node<K> {
        self.slots[id.0].as_mut().expect("Node handles in the tree are live")
    }
}

impl<K> Arena<K> {
    pub(crate) fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            root: None,
        }
    }

    pub(crate) fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub(crate) fn get(&self, id: NodeId) -> Option<&Node<K>> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    /// The number of nodes currently allocated, whether or not they are reachable from the root.
    pub(crate) fn live(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.root = None;
    }

    fn alloc(&mut self, node: Node<K>) -> NodeId {
        match self.free.pop() {
            Some(index) => {
                self.slots[index] = Some(node);
                NodeId(index)
            }
            None => {
                self.slots.push(Some(node));
                NodeId(self.slots.len() - 1)
            }
        }
    }

    fn dealloc(&mut self, id: NodeId) -> Node<K> {
        let node = self.slots[id.0]
            .take()
            .expect("Only live nodes are spliced out");
        self.free.push(id.0);
        node
    }

    /// The augmentation of a possibly absent subtree. Absent subtrees have height and size 0.
    pub(crate) fn summary(&self, id: Option<NodeId>) -> Summary {
        id.map_or_else(Summary::default, |id| self[id].summary())
    }

    pub(crate) fn height(&self, id: Option<NodeId>) -> usize {
        self.summary(id).height
    }

    pub(crate) fn size(&self, id: Option<NodeId>) -> usize {
        self.summary(id).size
    }

    /// Recomputes the augmentation of `id` from its children, which must already be current.
    pub(crate) fn fix(&mut self, id: NodeId) {
        let left = self.summary(self[id].left);
        let right = self.summary(self[id].right);
        <Augmentation as Recompute>::recompute(&mut self[id], left, right);
    }

    /// The slot `id` currently occupies.
    pub(crate) fn slot_of(&self, id: NodeId) -> Slot {
        match self[id].parent {
            None => Slot::Root,
            Some(parent) if self[parent].left == Some(id) => Slot::Left(parent),
            Some(parent) => Slot::Right(parent),
        }
    }

    /// Hangs `child` (or nothing) from `slot`, retargeting the child's parent link to match.
    pub(crate) fn set_slot(&mut self, slot: Slot, child: Option<NodeId>) {
        match slot {
            Slot::Root => self.root = child,
            Slot::Left(parent) => self[parent].left = child,
            Slot::Right(parent) => self[parent].right = child,
        }
        if let Some(child) = child {
            self[child].parent = slot.parent();
        }
    }

    pub(crate) fn search<F>(&self, key: &K, cmp: &F) -> Search
    where
        F: Fn(&K, &K) -> Ordering,
    {
        match self.root {
            Some(root) => self.search_from(root, key, cmp),
            None => Search::Vacant(Slot::Root),
        }
    }

    fn search_from<F>(&self, id: NodeId, key: &K, cmp: &F) -> Search
    where
        F: Fn(&K, &K) -> Ordering,
    {
        let node = &self[id];
        match cmp(key, &node.key) {
            Ordering::Less => match node.left {
                Some(left) => self.search_from(left, key, cmp),
                None => Search::Vacant(Slot::Left(id)),
            },
            Ordering::Equal => Search::Found(id),
            Ordering::Greater => match node.right {
                Some(right) => self.search_from(right, key, cmp),
                None => Search::Vacant(Slot::Right(id)),
            },
        }
    }

    /// Attaches a new leaf holding `key` to the vacant `slot`. The leaf's ancestors are left
    /// for the caller to retrace.
    pub(crate) fn insert_under(&mut self, slot: Slot, key: K) -> NodeId {
        let id = self.alloc(Node::leaf(key, slot.parent()));
        self.set_slot(slot, Some(id));
        id
    }

    /// Detaches `id`, which must have at most one child, by hanging that child from `id`'s slot.
    /// Returns the detached node and its former parent, where retracing should begin.
    pub(crate) fn splice_out(&mut self, id: NodeId) -> (Node<K>, Option<NodeId>) {
        let node = &self[id];
        debug_assert!(
            node.left.is_none() || node.right.is_none(),
            "Only nodes with at most one child can be spliced out"
        );
        let child = node.left.or(node.right);
        let slot = self.slot_of(id);

        self.set_slot(slot, child);
        (self.dealloc(id), slot.parent())
    }

    /// The node with the smallest key in the subtree rooted at `id`.
    pub(crate) fn find_min(&self, id: NodeId) -> NodeId {
        match self[id].left {
            Some(left) => self.find_min(left),
            None => id,
        }
    }

    /// The node with the largest key in the subtree rooted at `id`.
    pub(crate) fn find_max(&self, id: NodeId) -> NodeId {
        match self[id].right {
            Some(right) => self.find_max(right),
            None => id,
        }
    }

    /// The node holding the next larger key, if any.
    pub(crate) fn successor(&self, id: NodeId) -> Option<NodeId> {
        if let Some(right) = self[id].right {
            return Some(self.find_min(right));
        }

        let mut current = id;
        while let Slot::Right(parent) = self.slot_of(current) {
            current = parent;
        }
        self[current].parent
    }

    /// The node holding the next smaller key, if any.
    pub(crate) fn predecessor(&self, id: NodeId) -> Option<NodeId> {
        if let Some(left) = self[id].left {
            return Some(self.find_max(left));
        }

        let mut current = id;
        while let Slot::Left(parent) = self.slot_of(current) {
            current = parent;
        }
        self[current].parent
    }
}

/// Borrowed view of a subtree so nested nodes can be printed with `{:?}`.
pub(crate) struct Subtree<'a, K> {
    pub(crate) nodes: &'a Arena<K>,
    pub(crate) id: NodeId,
}

impl<K> fmt::Debug for Subtree<'_, K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = &self.nodes[self.id];
        let child = |id: Option<NodeId>| {
            id.map(|id| Subtree {
                nodes: self.nodes,
                id,
            })
        };
        f.debug_struct("Node")
            .field("key", &node.key)
            .field("height", &node.height)
            .field("size", &node.size)
            .field("left", &child(node.left))
            .field("right", &child(node.right))
            .finish()
    }
}
