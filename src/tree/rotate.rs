//! Local restructuring primitives shared by insertion and erasure.
use super::{
    node::{IsRightChild, Link, NIL},
    RbTree,
};

impl<K, O> RbTree<K, O> {
    /// Promote `node`'s right child into `node`'s position.
    #[inline]
    #[cfg_attr(not(test), allow(dead_code))]
    pub(crate) fn rotate_left(&mut self, node: Link) {
        self.rotate(node, false);
    }

    /// Promote `node`'s left child into `node`'s position.
    #[inline]
    #[cfg_attr(not(test), allow(dead_code))]
    pub(crate) fn rotate_right(&mut self, node: Link) {
        self.rotate(node, true);
    }

    /// Rotate a node. `dir` specifies `node`'s position after rotation.
    ///
    /// Colors are left untouched, and so is the in-order sequence.
    pub(crate) fn rotate(&mut self, node: Link, dir: IsRightChild) {
        let idir = (!dir) as usize;
        let dir = dir as usize;

        //          node            new_root
        //          /  \            /  \
        //         /    \          /    \
        //  new_root    y   ==>   x     node
        //    /  \                      /  \
        //   x  mid                    mid  y

        let new_root = self.arena[node].children[idir];
        debug_assert_ne!(new_root, NIL, "post-rotation root does not exist");

        let mid = self.arena[new_root].children[dir];
        self.arena[node].children[idir] = mid;
        // The sentinel's parent link is reserved for erasure
        if mid != NIL {
            self.arena[mid].parent = node;
        }

        let parent = self.arena[node].parent;
        self.arena[new_root].parent = parent;
        if parent == NIL {
            self.root = new_root;
        } else {
            let side = self.arena.side_of(node);
            self.arena[parent].children[side as usize] = new_root;
        }

        self.arena[new_root].children[dir] = node;
        self.arena[node].parent = new_root;
    }

    /// Put `replacement` in `node`'s place. `node`'s own links are left as
    /// they are.
    ///
    /// `replacement`'s parent link is set even if it's the sentinel; erasure
    /// relies on this to find where its fixup starts.
    pub(crate) fn transplant(&mut self, node: Link, replacement: Link) {
        let parent = self.arena[node].parent;
        if parent == NIL {
            self.root = replacement;
        } else {
            let side = self.arena.side_of(node);
            self.arena[parent].children[side as usize] = replacement;
        }
        self.arena[replacement].parent = parent;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::node::Color;
    use std::prelude::v1::*;

    /// `(key, left key, right key, parent key)` in order
    fn shape(tree: &RbTree<u32>) -> Vec<(u32, Option<u32>, Option<u32>, Option<u32>)> {
        let key = |link: Link| (link != NIL).then(|| *tree.arena.key(link));
        let mut out = Vec::new();
        let mut link = if tree.root == NIL {
            NIL
        } else {
            tree.arena.edge(tree.root, false)
        };
        while link != NIL {
            let node = &tree.arena[link];
            out.push((
                *tree.arena.key(link),
                key(node.children[0]),
                key(node.children[1]),
                key(node.parent),
            ));
            link = tree.arena.next(link, true);
        }
        out
    }

    #[test]
    fn rotate_left_then_right() {
        let tree0 = rbtree![2, 1, 3];
        let mut tree = rbtree![2, 1, 3];
        let colors: Vec<Color> = {
            let mut link = tree.arena.edge(tree.root, false);
            let mut colors = Vec::new();
            while link != NIL {
                colors.push(tree.arena.color(link));
                link = tree.arena.next(link, true);
            }
            colors
        };

        let root = tree.root;
        tree.rotate_left(root);
        assert_eq!(*tree.arena.key(tree.root), 3);
        assert_eq!(
            shape(&tree),
            [
                (1, None, None, Some(2)),
                (2, Some(1), None, Some(3)),
                (3, Some(2), None, None),
            ]
        );
        assert_eq!(tree.arena[NIL].parent, NIL);

        let root = tree.root;
        tree.rotate_right(root);
        assert_eq!(shape(&tree), shape(&tree0));

        // Rotations never recolor
        let mut link = tree.arena.edge(tree.root, false);
        for color in colors {
            assert_eq!(tree.arena.color(link), color);
            link = tree.arena.next(link, true);
        }
    }

    #[test]
    fn rotate_moves_middle_subtree() {
        let mut tree = rbtree![4, 2, 6, 1, 3];
        let two = tree.find(&2).unwrap().link;
        let four = tree.root;
        tree.rotate_right(four);
        assert_eq!(tree.root, two);
        assert_eq!(
            shape(&tree),
            [
                (1, None, None, Some(2)),
                (2, Some(1), Some(4), None),
                (3, None, None, Some(4)),
                (4, Some(3), Some(6), Some(2)),
                (6, None, None, Some(4)),
            ]
        );
    }

    #[test]
    fn transplant_sentinel_records_parent() {
        let mut tree = rbtree![2, 1, 3];
        let three = tree.find(&3).unwrap().link;
        let two = tree.root;
        tree.transplant(three, NIL);
        assert_eq!(tree.arena[two].children[1], NIL);
        assert_eq!(tree.arena[NIL].parent, two);
        tree.arena[NIL].parent = NIL;
    }
}
