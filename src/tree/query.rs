use alloc::vec::Vec;
use core::{cmp::Ordering, iter::FusedIterator};

use super::{
    node::{Arena, IsRightChild, Link, NIL},
    KeyOrder, NodeId, RbTree,
};

impl<K, O: KeyOrder<K>> RbTree<K, O> {
    /// Find a node holding a key equal to `key`.
    ///
    /// If there are several, this returns the first one met while descending
    /// from the root, which is not necessarily the first one in order.
    pub fn find(&self, key: &K) -> Option<NodeId> {
        let mut cursor = self.root;
        while cursor != NIL {
            cursor = match self.order.cmp_key(key, self.arena.key(cursor)) {
                Ordering::Equal => return Some(self.handle(cursor)),
                Ordering::Less => self.arena[cursor].child(false),
                Ordering::Greater => self.arena[cursor].child(true),
            };
        }
        None
    }

    /// Find the first node whose key is not less than `key`.
    pub fn lower_bound(&self, key: &K) -> Option<NodeId> {
        let mut found = NIL;
        let mut cursor = self.root;
        while cursor != NIL {
            if self.order.cmp_key(self.arena.key(cursor), key) == Ordering::Less {
                cursor = self.arena[cursor].child(true);
            } else {
                found = cursor;
                cursor = self.arena[cursor].child(false);
            }
        }
        self.link_to_handle(found)
    }
}

impl<K, O> RbTree<K, O> {
    /// Get the node with the minimum key. Returns `None` if the tree is
    /// empty.
    #[inline]
    pub fn min(&self) -> Option<NodeId> {
        self.extreme(false)
    }

    /// Get the node with the maximum key. Returns `None` if the tree is
    /// empty.
    #[inline]
    pub fn max(&self) -> Option<NodeId> {
        self.extreme(true)
    }

    fn extreme(&self, side: IsRightChild) -> Option<NodeId> {
        if self.root == NIL {
            None
        } else {
            Some(self.handle(self.arena.edge(self.root, side)))
        }
    }

    /// Get the key held by a node. Returns `None` if `id` is stale or
    /// belongs to another tree.
    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&K> {
        self.resolve(id).ok().map(|link| self.arena.key(link))
    }

    /// Get the in-order successor of a node.
    #[inline]
    pub fn successor(&self, id: NodeId) -> Option<NodeId> {
        let link = self.resolve(id).ok()?;
        self.link_to_handle(self.arena.next(link, true))
    }

    /// Get the in-order predecessor of a node.
    #[inline]
    pub fn predecessor(&self, id: NodeId) -> Option<NodeId> {
        let link = self.resolve(id).ok()?;
        self.link_to_handle(self.arena.next(link, false))
    }

    #[inline]
    fn link_to_handle(&self, link: Link) -> Option<NodeId> {
        (link != NIL).then(|| self.handle(link))
    }

    /// Iterate over the keys in order.
    #[inline]
    pub fn iter(&self) -> Iter<'_, K> {
        let (front, back) = if self.root == NIL {
            (NIL, NIL)
        } else {
            (
                self.arena.edge(self.root, false),
                self.arena.edge(self.root, true),
            )
        };
        Iter {
            arena: &self.arena,
            front,
            back,
            remaining: self.len(),
        }
    }

    /// Copy the keys into `out` in order, stopping when `out` is full.
    /// Returns the number of keys written.
    pub fn to_array(&self, out: &mut [K]) -> usize
    where
        K: Clone,
    {
        let mut written = 0;
        for (slot, key) in out.iter_mut().zip(self.iter()) {
            slot.clone_from(key);
            written += 1;
        }
        written
    }

    /// Collect the keys into a `Vec` in order.
    pub fn to_vec(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.iter().cloned().collect()
    }

    /// The number of nodes on the longest path from the root to a leaf.
    pub fn height(&self) -> usize {
        fn height_of<K>(arena: &Arena<K>, link: Link) -> usize {
            if link == NIL {
                0
            } else {
                let [left, right] = arena[link].children;
                1 + height_of(arena, left).max(height_of(arena, right))
            }
        }
        height_of(&self.arena, self.root)
    }
}

impl<'a, K, O> IntoIterator for &'a RbTree<K, O> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An in-order iterator over the keys of an [`RbTree`], created by
/// [`RbTree::iter`].
pub struct Iter<'a, K> {
    arena: &'a Arena<K>,
    front: Link,
    back: Link,
    remaining: usize,
}

impl<K> Clone for Iter<'_, K> {
    #[inline]
    fn clone(&self) -> Self {
        Self { ..*self }
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let link = self.front;
        self.front = self.arena.next(link, true);
        self.remaining -= 1;
        Some(self.arena.key(link))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K> DoubleEndedIterator for Iter<'_, K> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let link = self.back;
        self.back = self.arena.next(link, false);
        self.remaining -= 1;
        Some(self.arena.key(link))
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {}

impl<K> FusedIterator for Iter<'_, K> {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::prelude::v1::*;

    #[test]
    fn empty_tree_queries() {
        let tree = RbTree::<i64>::new();
        assert_eq!(tree.min(), None);
        assert_eq!(tree.max(), None);
        assert_eq!(tree.find(&0), None);
        assert_eq!(tree.lower_bound(&0), None);
        assert_eq!(tree.iter().next(), None);
        assert_eq!(tree.height(), 0);
        let mut out = [0i64; 4];
        assert_eq!(tree.to_array(&mut out), 0);
    }

    #[test]
    fn min_max_find() {
        let tree = rbtree![50, 20, 80, 10, 30, 70, 90, 25];
        assert_eq!(tree.get(tree.min().unwrap()), Some(&10));
        assert_eq!(tree.get(tree.max().unwrap()), Some(&90));
        assert_eq!(tree.get(tree.find(&25).unwrap()), Some(&25));
        assert_eq!(tree.find(&26), None);
        assert_eq!(tree.find(&5), None);
        assert_eq!(tree.find(&95), None);
    }

    #[test]
    fn to_array_truncates() {
        let tree = rbtree![5, 3, 8, 1, 4, 7, 9];

        let mut short = [0; 3];
        assert_eq!(tree.to_array(&mut short), 3);
        assert_eq!(short, [1, 3, 4]);

        let mut long = [-1; 10];
        assert_eq!(tree.to_array(&mut long), 7);
        assert_eq!(long, [1, 3, 4, 5, 7, 8, 9, -1, -1, -1]);

        let mut none: [i32; 0] = [];
        assert_eq!(tree.to_array(&mut none), 0);
    }

    #[test]
    fn neighbours() {
        let tree = rbtree![2, 4, 6, 8];
        let four = tree.find(&4).unwrap();
        assert_eq!(tree.get(tree.successor(four).unwrap()), Some(&6));
        assert_eq!(tree.get(tree.predecessor(four).unwrap()), Some(&2));
        assert_eq!(tree.successor(tree.max().unwrap()), None);
        assert_eq!(tree.predecessor(tree.min().unwrap()), None);
    }

    #[test]
    fn lower_bound() {
        let tree = rbtree![2, 4, 4, 6, 8];
        assert_eq!(tree.get(tree.lower_bound(&1).unwrap()), Some(&2));
        assert_eq!(tree.get(tree.lower_bound(&3).unwrap()), Some(&4));
        assert_eq!(tree.get(tree.lower_bound(&8).unwrap()), Some(&8));
        assert_eq!(tree.lower_bound(&9), None);

        // The first of the duplicates
        let first_four = tree.lower_bound(&4).unwrap();
        assert_eq!(tree.get(tree.predecessor(first_four).unwrap()), Some(&2));
    }

    #[test]
    fn iter_both_ends() {
        let tree = rbtree![3, 1, 4, 1, 5, 9, 2, 6];
        let mut it = tree.iter();
        assert_eq!(it.len(), 8);
        assert_eq!(it.next(), Some(&1));
        assert_eq!(it.next_back(), Some(&9));
        assert_eq!(it.next(), Some(&1));
        assert_eq!(it.next_back(), Some(&6));
        assert_eq!(it.len(), 4);
        assert_eq!(it.collect::<Vec<_>>(), [&2, &3, &4, &5]);

        let rev: Vec<_> = tree.iter().rev().copied().collect();
        assert_eq!(rev, [9, 6, 5, 4, 3, 2, 1, 1]);
    }
}
