//! High-level ordered containers built on [`RbTree`](crate::RbTree).
pub mod multiset;
