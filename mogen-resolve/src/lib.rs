//! Package loading and type resolution.
//!
//! Bridges the syntax crate and the IR: loads the single Go package named by
//! the CLI patterns, lowers its type declarations, flattens embedded
//! interfaces, and discovers the exported interfaces mock generation runs
//! over.

mod error;
mod loader;
mod resolver;

pub use error::{ResolveError, Result};
pub use loader::{Package, SourceFile, load};
pub use resolver::Resolver;
