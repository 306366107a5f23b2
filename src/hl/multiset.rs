//! Provides an ordered multiset.
use core::fmt;

use crate::tree::{Iter, KeyOrder, NaturalOrder, RbTree};

#[cfg(test)]
mod tests;

/// An ordered collection of keys that may contain duplicates.
///
/// Unlike [`RbTree`], this type does not expose node handles; keys are
/// looked up and removed by value.
///
/// ```
/// use redblack::hl::multiset::RbMultiSet;
///
/// let mut set: RbMultiSet<_> = [4, 1, 4, 2].into_iter().collect();
/// assert_eq!(set.count(&4), 2);
/// assert_eq!(set.remove(&4), Some(4));
/// assert_eq!(set.pop_first(), Some(1));
/// assert_eq!(set.iter().copied().collect::<Vec<_>>(), [2, 4]);
/// ```
pub struct RbMultiSet<K, O = NaturalOrder> {
    tree: RbTree<K, O>,
}

impl<K: Ord> RbMultiSet<K> {
    #[inline]
    pub fn new() -> Self {
        Self {
            tree: RbTree::new(),
        }
    }
}

impl<K: Ord> Default for RbMultiSet<K> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K, O: KeyOrder<K>> RbMultiSet<K, O> {
    /// Construct an empty set ordered by `order`.
    #[inline]
    pub fn with_order(order: O) -> Self {
        Self {
            tree: RbTree::with_order(order),
        }
    }

    /// Add `key` after every key equal to it.
    #[inline]
    pub fn insert(&mut self, key: K) {
        self.tree.insert(key);
    }

    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.tree.find(key).is_some()
    }

    /// Count the keys equal to `key`.
    pub fn count(&self, key: &K) -> usize {
        let mut count = 0;
        let mut cursor = self.tree.lower_bound(key);
        while let Some(id) = cursor {
            match self.tree.get(id) {
                Some(found) if self.tree.order().cmp_key(found, key).is_eq() => count += 1,
                _ => break,
            }
            cursor = self.tree.successor(id);
        }
        count
    }

    /// Remove one key equal to `key` and return it.
    pub fn remove(&mut self, key: &K) -> Option<K> {
        let id = self.tree.find(key)?;
        self.tree.erase(id).ok()
    }
}

impl<K, O> RbMultiSet<K, O> {
    #[inline]
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Get the smallest key.
    #[inline]
    pub fn first(&self) -> Option<&K> {
        self.tree.min().and_then(|id| self.tree.get(id))
    }

    /// Get the largest key.
    #[inline]
    pub fn last(&self) -> Option<&K> {
        self.tree.max().and_then(|id| self.tree.get(id))
    }

    /// Remove the smallest key. Among equal keys, the earliest inserted one
    /// goes first.
    pub fn pop_first(&mut self) -> Option<K> {
        let id = self.tree.min()?;
        self.tree.erase(id).ok()
    }

    /// Remove the largest key. Among equal keys, the latest inserted one
    /// goes first.
    pub fn pop_last(&mut self) -> Option<K> {
        let id = self.tree.max()?;
        self.tree.erase(id).ok()
    }

    #[inline]
    pub fn iter(&self) -> Iter<'_, K> {
        self.tree.iter()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Get the underlying tree.
    #[inline]
    pub fn as_tree(&self) -> &RbTree<K, O> {
        &self.tree
    }
}

impl<K: Ord> FromIterator<K> for RbMultiSet<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut this = Self::new();
        this.extend(iter);
        this
    }
}

impl<K, O: KeyOrder<K>> Extend<K> for RbMultiSet<K, O> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<'a, K, O> IntoIterator for &'a RbMultiSet<K, O> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: fmt::Debug, O> fmt::Debug for RbMultiSet<K, O> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
