//! Go mock source emission.
//!
//! Turns resolved interfaces into mock declarations: a hook struct per
//! interface plus delegating methods, assembled into a formatted, re-checked
//! Go file.

pub mod builder;
mod error;
mod field;
mod function;
mod gofile;
mod mock;
mod structure;
mod types;

pub use error::{Error, Result};
pub use field::{
    Field, FieldList, Formatter, call_args, call_args_variadic, declarative_params,
    declarative_params_variadic, declarative_results, zero_value_results,
};
pub use function::{BodyEmitter, FuncGen, Receiver};
pub use gofile::GoFile;
pub use mock::MockGen;
pub use structure::StructGen;
pub use types::{signature_string, type_string, zero_value};
