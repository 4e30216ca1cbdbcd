//! Resolved Go type model.
//!
//! This crate is the hand-off point between the resolver and the code
//! generator: the resolver lowers syntax trees into these value types, and
//! the generator renders them back out as Go source. Nothing here borrows
//! from the source text, so the model can outlive the files it came from.

mod interface;
mod types;

pub use interface::{Interface, Method};
pub use types::{BasicKind, ChanDir, Named, Param, Signature, StructField, Type, Underlying};
