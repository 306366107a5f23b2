use core::cmp::Ordering;

use super::{
    node::{Color, IsRightChild, Link, NIL},
    KeyOrder, NodeId, RbTree,
};

impl<K, O: KeyOrder<K>> RbTree<K, O> {
    /// Insert `key` into the tree, returning a handle to its node.
    ///
    /// If there are keys equal to the given one, the new key is placed after
    /// all of them.
    pub fn insert(&mut self, key: K) -> NodeId {
        // Find the initial place for the new node. Nothing is modified until
        // the descent is complete, so a panicking `cmp_key` leaves the tree
        // intact.
        let mut parent = NIL;
        let mut side: IsRightChild = false;
        let mut cursor = self.root;
        while cursor != NIL {
            parent = cursor;
            side = self.order.cmp_key(&key, self.arena.key(cursor)) != Ordering::Less;
            cursor = self.arena[cursor].child(side);
        }

        let stamp = self.take_stamp();
        let node = self.arena.alloc(key, stamp);
        self.arena[node].parent = parent;
        if parent == NIL {
            self.root = node;
        } else {
            self.arena[parent].children[side as usize] = node;
        }

        self.insert_fixup(node);

        NodeId {
            tree: self.id,
            link: node,
            stamp,
        }
    }

    /// Restore the color invariant after linking the red node `node`.
    fn insert_fixup(&mut self, mut node: Link) {
        // If `node` is the root, its parent is the sentinel, which is black
        while self.arena.is_red(self.arena[node].parent) {
            let parent = self.arena[node].parent;

            // `parent` is red, so it's not the root, and `grandparent` is
            // real and black.
            let grandparent = self.arena[parent].parent;
            debug_assert_ne!(grandparent, NIL);
            debug_assert_eq!(self.arena.color(grandparent), Color::Black);

            let parent_side = self.arena.side_of(parent);
            let uncle = self.arena[grandparent].child(!parent_side);

            if self.arena.is_red(uncle) {
                // Both `parent` and `uncle` are red. Repaint them to black
                // and `grandparent` to red. (This doesn't change
                // `grandparent`'s subtree's black height.) `grandparent` might
                // now violate the color invariant, so iterate again from
                // there.
                self.arena[parent].color = Color::Black;
                self.arena[uncle].color = Color::Black;
                self.arena[grandparent].color = Color::Red;
                node = grandparent;
                continue;
            }

            // `uncle` is black. If `node` is an inner grandchild, turn it
            // into an outer one first.
            if self.arena[parent].child(!parent_side) == node {
                node = parent;
                self.rotate(node, parent_side);
            }

            // `node` is now an outer grandchild. Push `grandparent` down to
            // `uncle`'s side and recolor.
            let parent = self.arena[node].parent;
            self.arena[parent].color = Color::Black;
            self.arena[grandparent].color = Color::Red;
            self.rotate(grandparent, !parent_side);
        }

        let root = self.root;
        self.arena[root].color = Color::Black;
    }
}
