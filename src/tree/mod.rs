//! The red-black tree engine.
//!
//! [`RbTree`] stores keys in an arena of nodes linked by index. Every absent
//! parent or child link points to a shared, permanently black sentinel slot,
//! so the rebalancing code reads colors and links without checking for
//! absence first.
//!
//! # Handles
//!
//! [`RbTree::insert`], [`RbTree::find`], [`RbTree::min`] and friends return
//! a [`NodeId`]. A handle names one occupant of one slot of one tree. It is
//! only *meaningful* until the next mutation (erasing a node with two
//! children moves a key between slots), but it is always *safe* to present:
//! a handle whose node is gone is rejected with [`Error::StaleNode`], and a
//! handle from another tree with [`Error::ForeignNode`].
use core::{
    cmp::Ordering,
    fmt,
    sync::atomic::{AtomicUsize, Ordering as AtomicOrdering},
};

use self::node::{Arena, Link, NIL};

mod erase;
mod insert;
pub(crate) mod node;
mod query;
mod rotate;
pub mod validate;

pub use self::query::Iter;


/// A total order on keys.
///
/// The tree never assumes anything beyond what this trait reports. Keys that
/// compare [`Ordering::Equal`] are all kept: a newly inserted key descends to
/// the right of every equal key, so equal keys appear in insertion order.
pub trait KeyOrder<K> {
    /// Compare `a` with `b`. Must be a total order and must not change for
    /// keys that are stored in a tree.
    fn cmp_key(&self, a: &K, b: &K) -> Ordering;
}

/// Orders keys by their [`Ord`] implementation.
#[derive(Debug, Default, Copy, Clone)]
pub struct NaturalOrder;

impl<K: Ord> KeyOrder<K> for NaturalOrder {
    #[inline]
    fn cmp_key(&self, a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}

/// Orders keys by a comparison closure.
///
/// ```
/// use redblack::{OrderBy, RbTree};
///
/// let mut tree = RbTree::with_order(OrderBy(|a: &i32, b: &i32| b.cmp(a)));
/// tree.insert(1);
/// tree.insert(3);
/// tree.insert(2);
/// assert_eq!(tree.to_vec(), [3, 2, 1]);
/// ```
#[derive(Debug, Default, Copy, Clone)]
pub struct OrderBy<F>(pub F);

impl<K, F: Fn(&K, &K) -> Ordering> KeyOrder<K> for OrderBy<F> {
    #[inline]
    fn cmp_key(&self, a: &K, b: &K) -> Ordering {
        (self.0)(a, b)
    }
}

/// A handle to a node of an [`RbTree`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct NodeId {
    tree: usize,
    link: Link,
    stamp: u64,
}

/// Indicates that a [`NodeId`] could not be used with a tree.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "std", derive(thiserror::Error))]
pub enum Error {
    /// The node was erased (or the tree was cleared) after the handle was
    /// obtained.
    #[cfg_attr(
        feature = "std",
        error("node handle refers to a node that no longer exists")
    )]
    StaleNode,
    /// The handle was obtained from a different tree.
    #[cfg_attr(feature = "std", error("node handle belongs to a different tree"))]
    ForeignNode,
}

static NEXT_TREE_ID: AtomicUsize = AtomicUsize::new(0);

/// A red-black tree holding keys of type `K` ordered by `O`.
///
/// Duplicate keys are allowed; see [`KeyOrder`] for how they are placed.
///
/// # Allocation
///
/// Nodes are allocated from an internal arena. Running out of memory aborts
/// the process like any other collection in `alloc` does.
pub struct RbTree<K, O = NaturalOrder> {
    arena: Arena<K>,
    root: Link,
    order: O,
    id: usize,
    next_stamp: u64,
}

impl<K: Ord> RbTree<K> {
    /// Construct an empty tree.
    #[inline]
    pub fn new() -> Self {
        Self::with_order(NaturalOrder)
    }

    /// Construct an empty tree with room for `capacity` nodes.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_order(capacity, NaturalOrder)
    }
}

impl<K: Ord> Default for RbTree<K> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K, O: KeyOrder<K>> RbTree<K, O> {
    /// Construct an empty tree ordered by `order`.
    #[inline]
    pub fn with_order(order: O) -> Self {
        Self::with_capacity_and_order(0, order)
    }

    /// Construct an empty tree ordered by `order` with room for `capacity`
    /// nodes.
    pub fn with_capacity_and_order(capacity: usize, order: O) -> Self {
        Self {
            arena: Arena::with_capacity(capacity),
            root: NIL,
            order,
            id: NEXT_TREE_ID.fetch_add(1, AtomicOrdering::Relaxed),
            next_stamp: 1,
        }
    }

    /// Get the ordering used by this tree.
    #[inline]
    pub fn order(&self) -> &O {
        &self.order
    }
}

impl<K, O> RbTree<K, O> {
    /// The number of keys in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root == NIL
    }

    /// Release every node, returning how many were released. The tree stays
    /// usable. All outstanding handles become stale.
    ///
    /// The nodes are released bottom-up by walking parent links, so this
    /// needs neither recursion nor a stack.
    pub fn clear(&mut self) -> usize {
        let mut released = 0;
        let mut node = self.root;
        while node != NIL {
            let [left, right] = self.arena[node].children;
            if left != NIL {
                node = left;
                continue;
            }
            if right != NIL {
                node = right;
                continue;
            }

            // `node` is a leaf now. Detach it from its parent and free it.
            let parent = self.arena[node].parent;
            if parent != NIL {
                let side = self.arena.side_of(node);
                self.arena[parent].children[side as usize] = NIL;
            }
            drop(self.arena.release(node));
            released += 1;
            node = parent;
        }
        self.root = NIL;

        debug_assert_eq!(self.arena.len(), 0, "teardown missed some nodes");
        log::trace!("cleared tree {}: released {} nodes", self.id, released);
        released
    }

    /// Release every node, then the sentinel and the tree itself. Returns
    /// the number of keyed nodes released.
    pub fn destroy(mut self) -> usize {
        self.clear()
    }

    /// Convert a link into a handle.
    #[inline]
    fn handle(&self, link: Link) -> NodeId {
        debug_assert_ne!(link, NIL, "the sentinel never escapes as a node");
        NodeId {
            tree: self.id,
            link,
            stamp: self.arena[link].stamp,
        }
    }

    /// Convert a handle back into a link, checking that it's still valid.
    fn resolve(&self, id: NodeId) -> Result<Link, Error> {
        if id.tree != self.id {
            log::debug!(
                "rejecting {:?}: it belongs to tree {}, not {}",
                id,
                id.tree,
                self.id
            );
            return Err(Error::ForeignNode);
        }
        match self.arena.get(id.link) {
            Some(node) if node.stamp == id.stamp => Ok(id.link),
            _ => {
                log::debug!("rejecting {:?}: the node no longer exists", id);
                Err(Error::StaleNode)
            }
        }
    }

    /// Allocate a fresh stamp for a new node.
    #[inline]
    fn take_stamp(&mut self) -> u64 {
        let stamp = self.next_stamp;
        self.next_stamp += 1;
        stamp
    }
}

impl<K: fmt::Debug, O> fmt::Debug for RbTree<K, O> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
