use super::{
    node::{Color, Link, NIL},
    Error, NodeId, RbTree,
};

impl<K, O> RbTree<K, O> {
    /// Remove the key referenced by `id` from the tree and return it.
    ///
    /// If the node has two children, its in-order successor's key is moved
    /// into it and the successor's slot is freed instead. In that case `id`
    /// stays valid (now referring to the successor's key) and the
    /// successor's handle becomes stale. Don't rely on handles across
    /// mutations.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ForeignNode`] if `id` belongs to a different tree
    /// and [`Error::StaleNode`] if its node no longer exists. The tree is
    /// not modified in either case.
    pub fn erase(&mut self, id: NodeId) -> Result<K, Error> {
        let target = self.resolve(id)?;

        // The node that physically leaves the tree. It has at most one real
        // child.
        let removed = {
            let [left, right] = self.arena[target].children;
            if left != NIL && right != NIL {
                let successor = self.arena.edge(right, false);
                self.arena.swap_keys(target, successor);
                successor
            } else {
                target
            }
        };

        let [left, right] = self.arena[removed].children;
        debug_assert!(left == NIL || right == NIL);
        let child = if left != NIL { left } else { right };
        let removed_color = self.arena.color(removed);

        // When `child` is the sentinel, this sets the sentinel's parent link,
        // which is how the fixup knows where to start.
        self.transplant(removed, child);

        if removed_color == Color::Black {
            // Paths through `child` are now one black node short
            self.erase_fixup(child);
        }

        self.arena[NIL].parent = NIL;

        Ok(self.arena.release(removed))
    }

    /// Restore the black height invariant after a black node was spliced
    /// out above `node`.
    fn erase_fixup(&mut self, mut node: Link) {
        while node != self.root && !self.arena.is_red(node) {
            //       parent
            //        /   \
            //       /     \
            //     node  sibling
            //            /   \
            //           /     \
            //        near     far
            //
            let parent = self.arena[node].parent;

            // `sibling` must be real because of the black height invariant,
            // so this is not confused by `node` being the sentinel
            let side = self.arena[parent].children[1] == node;
            let mut sibling = self.arena[parent].child(!side);
            debug_assert_ne!(sibling, NIL);

            if self.arena.is_red(sibling) {
                // Move `sibling` up. `parent` adopts `near`, which is black,
                // so we fall into one of the black-sibling cases below.
                self.arena[sibling].color = Color::Black;
                self.arena[parent].color = Color::Red;
                self.rotate(parent, side);
                sibling = self.arena[parent].child(!side);
            }

            let near = self.arena[sibling].child(side);
            let far = self.arena[sibling].child(!side);

            if !self.arena.is_red(near) && !self.arena.is_red(far) {
                // Repaint `sibling` to red. This rectifies the black height
                // difference between `node` and `sibling`. However, `parent`
                // still has one less black height than the rest of the tree.
                self.arena[sibling].color = Color::Red;
                node = parent;
                continue;
            }

            if !self.arena.is_red(far) {
                // Move `near` to `sibling`'s position. `sibling` (now the far
                // nephew) is red.
                self.arena[near].color = Color::Black;
                self.arena[sibling].color = Color::Red;
                self.rotate(sibling, !side);
                sibling = self.arena[parent].child(!side);
            }

            // Move `sibling` to `parent`'s position. The far nephew's black
            // makes up for the black node we lost.
            let far = self.arena[sibling].child(!side);
            self.arena[sibling].color = self.arena.color(parent);
            self.arena[parent].color = Color::Black;
            self.arena[far].color = Color::Black;
            self.rotate(parent, side);
            node = self.root;
        }

        self.arena[node].color = Color::Black;
    }
}
