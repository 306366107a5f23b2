#![doc = include_str!("../README.md")]
#![no_std]

extern crate alloc;
#[cfg(any(test, feature = "std"))]
#[macro_use]
extern crate std;

#[macro_use]
mod macros;
pub mod hl;
pub mod tree;

pub use self::tree::{
    validate::InvariantViolation, Error, KeyOrder, NaturalOrder, NodeId, OrderBy, RbTree,
};
