//! Low-level code emission.

mod code_builder;

pub use code_builder::CodeBuilder;
