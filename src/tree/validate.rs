//! Structural self-check.
use core::cmp::Ordering;

use super::{
    node::{Color, Link, NIL},
    KeyOrder, RbTree,
};

/// A red-black tree invariant found broken by [`RbTree::validate`].
///
/// Node positions are reported as in-order ranks.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "std", derive(thiserror::Error))]
pub enum InvariantViolation {
    #[cfg_attr(feature = "std", error("the sentinel is not black"))]
    SentinelNotBlack,
    #[cfg_attr(feature = "std", error("the sentinel's links were left modified"))]
    SentinelLinked,
    #[cfg_attr(feature = "std", error("the root is not black"))]
    RootNotBlack,
    #[cfg_attr(feature = "std", error("the root has a parent"))]
    RootHasParent,
    #[cfg_attr(feature = "std", error("node #{rank} does not point back to its parent"))]
    ParentMismatch { rank: usize },
    #[cfg_attr(feature = "std", error("red node #{rank} has a red parent"))]
    RedRedEdge { rank: usize },
    #[cfg_attr(
        feature = "std",
        error("node #{rank} has subtrees of black height {left} and {right}")
    )]
    BlackHeightMismatch {
        rank: usize,
        left: usize,
        right: usize,
    },
    #[cfg_attr(feature = "std", error("node #{rank} is ordered before its predecessor"))]
    OutOfOrder { rank: usize },
    #[cfg_attr(
        feature = "std",
        error("{reachable} nodes are reachable from the root, but the tree holds {len}")
    )]
    CountMismatch { reachable: usize, len: usize },
}

struct Walk<'a, K, O> {
    tree: &'a RbTree<K, O>,
    /// The number of nodes visited so far, i.e., the next in-order rank.
    visited: usize,
    prev: Link,
}

impl<K, O: KeyOrder<K>> RbTree<K, O> {
    /// Check every structural invariant of the tree.
    ///
    /// This visits every node. On success, returns the black height of the
    /// root: the number of black nodes on any path from the root down to the
    /// sentinel, counting the sentinel but not the root.
    pub fn validate(&self) -> Result<usize, InvariantViolation> {
        let nil = &self.arena[NIL];
        if nil.color != Color::Black {
            return Err(InvariantViolation::SentinelNotBlack);
        }
        if nil.parent != NIL || nil.children != [NIL, NIL] {
            return Err(InvariantViolation::SentinelLinked);
        }

        if self.root != NIL {
            if self.arena.color(self.root) != Color::Black {
                return Err(InvariantViolation::RootNotBlack);
            }
            if self.arena[self.root].parent != NIL {
                return Err(InvariantViolation::RootHasParent);
            }
        }

        let mut walk = Walk {
            tree: self,
            visited: 0,
            prev: NIL,
        };
        let black_height = walk.node(self.root)?;

        if walk.visited != self.len() {
            return Err(InvariantViolation::CountMismatch {
                reachable: walk.visited,
                len: self.len(),
            });
        }

        Ok(black_height - 1)
    }
}

impl<K, O: KeyOrder<K>> Walk<'_, K, O> {
    /// Validate the subtree rooted by `link`, returning its black height
    /// counting `link` itself.
    fn node(&mut self, link: Link) -> Result<usize, InvariantViolation> {
        if link == NIL {
            return Ok(1);
        }
        let tree = self.tree;
        let node = &tree.arena[link];

        // A cycle would make us visit more nodes than there are
        if self.visited >= tree.len() {
            return Err(InvariantViolation::CountMismatch {
                reachable: self.visited + 1,
                len: tree.len(),
            });
        }

        for child in node.children {
            if child != NIL && tree.arena[child].parent != link {
                return Err(InvariantViolation::ParentMismatch {
                    rank: self.visited,
                });
            }
        }

        let left = self.node(node.children[0])?;

        let rank = self.visited;
        self.visited += 1;
        if node.color == Color::Red && tree.arena.is_red(node.parent) {
            return Err(InvariantViolation::RedRedEdge { rank });
        }
        if self.prev != NIL
            && tree
                .order
                .cmp_key(tree.arena.key(self.prev), tree.arena.key(link))
                == Ordering::Greater
        {
            return Err(InvariantViolation::OutOfOrder { rank });
        }
        self.prev = link;

        let right = self.node(node.children[1])?;

        if left != right {
            return Err(InvariantViolation::BlackHeightMismatch { rank, left, right });
        }

        Ok(left + (node.color == Color::Black) as usize)
    }
}
