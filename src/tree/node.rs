//! Node storage.
//!
//! All nodes of a tree live in one [`Slab`]. Links between nodes are slab
//! indices, and slot [`NIL`] is permanently occupied by the sentinel, a
//! black, keyless node that stands in for every absent parent or child.
//! Reading the color of any link, including `NIL`, is therefore always
//! valid.
use core::ops::{Index, IndexMut};
use slab::Slab;

/// An index into [`Arena`].
pub(crate) type Link = usize;

/// The sentinel's slot.
pub(crate) const NIL: Link = 0;

/// `children[false as usize]` is the left child, `children[true as usize]`
/// the right one.
pub(crate) type IsRightChild = bool;

/// The color of a node.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Color {
    Black,
    Red,
}

pub(crate) struct Node<K> {
    pub(crate) children: [Link; 2],
    pub(crate) parent: Link,
    pub(crate) color: Color,
    /// Distinguishes successive occupants of the same slot.
    pub(crate) stamp: u64,
    /// `None` only for the sentinel.
    key: Option<K>,
}

impl<K> Node<K> {
    const fn sentinel() -> Self {
        Self {
            children: [NIL, NIL],
            parent: NIL,
            color: Color::Black,
            stamp: 0,
            key: None,
        }
    }

    #[inline]
    pub(crate) fn child(&self, side: IsRightChild) -> Link {
        self.children[side as usize]
    }
}

pub(crate) struct Arena<K> {
    slots: Slab<Node<K>>,
}

impl<K> Arena<K> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        let mut slots = Slab::with_capacity(capacity.saturating_add(1));
        let nil = slots.insert(Node::sentinel());
        debug_assert_eq!(nil, NIL);
        Self { slots }
    }

    /// Allocate a detached red node.
    pub(crate) fn alloc(&mut self, key: K, stamp: u64) -> Link {
        let link = self.slots.insert(Node {
            children: [NIL, NIL],
            parent: NIL,
            color: Color::Red,
            stamp,
            key: Some(key),
        });
        debug_assert_ne!(link, NIL);
        link
    }

    /// Free a real node, returning its key. The caller must have unlinked
    /// it already.
    pub(crate) fn release(&mut self, link: Link) -> K {
        debug_assert_ne!(link, NIL, "the sentinel is never released on its own");
        match self.slots.remove(link).key {
            Some(key) => key,
            None => unreachable!("slot {} holds no key", link),
        }
    }

    /// The number of real nodes.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.slots.len() - 1
    }

    /// Look up an occupied real slot.
    #[inline]
    pub(crate) fn get(&self, link: Link) -> Option<&Node<K>> {
        if link == NIL {
            None
        } else {
            self.slots.get(link)
        }
    }

    #[inline]
    pub(crate) fn color(&self, link: Link) -> Color {
        self.slots[link].color
    }

    #[inline]
    pub(crate) fn is_red(&self, link: Link) -> bool {
        self.color(link) == Color::Red
    }

    /// Which side of its parent `link` hangs on. Only meaningful for a link
    /// whose parent is real.
    #[inline]
    pub(crate) fn side_of(&self, link: Link) -> IsRightChild {
        let parent = self.slots[link].parent;
        self.slots[parent].children[1] == link
    }

    /// The key of a real node. The sentinel is never compared.
    #[inline]
    pub(crate) fn key(&self, link: Link) -> &K {
        debug_assert_ne!(link, NIL, "attempted to read the sentinel's key");
        match &self.slots[link].key {
            Some(key) => key,
            None => unreachable!("slot {} holds no key", link),
        }
    }

    /// Exchange the keys held by two real nodes.
    pub(crate) fn swap_keys(&mut self, a: Link, b: Link) {
        debug_assert!(a != NIL && b != NIL);
        let b_key = self.slots[b].key.take();
        let a_key = core::mem::replace(&mut self.slots[a].key, b_key);
        self.slots[b].key = a_key;
    }

    /// Follow `side` children from `link` until the next one is `NIL`.
    pub(crate) fn edge(&self, mut link: Link, side: IsRightChild) -> Link {
        debug_assert_ne!(link, NIL);
        loop {
            let child = self.slots[link].child(side);
            if child == NIL {
                return link;
            }
            link = child;
        }
    }

    /// The in-order neighbour of `link` in direction `side` (`true` for the
    /// successor), or `NIL` if there's none.
    pub(crate) fn next(&self, mut link: Link, side: IsRightChild) -> Link {
        let child = self.slots[link].child(side);
        if child != NIL {
            return self.edge(child, !side);
        }

        loop {
            let parent = self.slots[link].parent;
            if parent == NIL || self.slots[parent].child(!side) == link {
                return parent;
            }
            link = parent;
        }
    }
}

impl<K> Index<Link> for Arena<K> {
    type Output = Node<K>;

    #[inline]
    fn index(&self, link: Link) -> &Self::Output {
        &self.slots[link]
    }
}

impl<K> IndexMut<Link> for Arena<K> {
    #[inline]
    fn index_mut(&mut self, link: Link) -> &mut Self::Output {
        &mut self.slots[link]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_occupies_slot_zero() {
        let arena = Arena::<u32>::with_capacity(0);
        assert_eq!(arena.len(), 0);
        assert_eq!(arena.color(NIL), Color::Black);
        assert!(arena.get(NIL).is_none());
        assert_eq!(arena[NIL].children, [NIL, NIL]);
    }

    #[test]
    fn alloc_links_to_sentinel() {
        let mut arena = Arena::with_capacity(4);
        let a = arena.alloc(7u32, 1);
        assert_ne!(a, NIL);
        assert_eq!(arena[a].children, [NIL, NIL]);
        assert_eq!(arena[a].parent, NIL);
        assert_eq!(arena.color(a), Color::Red);
        assert_eq!(*arena.key(a), 7);
        assert_eq!(arena.len(), 1);

        assert_eq!(arena.release(a), 7);
        assert_eq!(arena.len(), 0);
        assert!(arena.get(a).is_none());
    }

    #[test]
    fn swap_keys() {
        let mut arena = Arena::with_capacity(2);
        let a = arena.alloc("a", 1);
        let b = arena.alloc("b", 2);
        arena.swap_keys(a, b);
        assert_eq!(*arena.key(a), "b");
        assert_eq!(*arena.key(b), "a");
    }
}
