//! Generation errors.

use miette::Diagnostic;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("duplicate field name '{name}'")]
    #[diagnostic(code(mogen::codegen::duplicate_field))]
    DuplicateFieldName { name: String },

    #[error("variadic signature but the final parameter '{name}' is not slice-shaped")]
    #[diagnostic(code(mogen::codegen::invalid_variadic))]
    InvalidVariadicArgument { name: String },

    #[error("function '{name}' has no receiver; only methods can be emitted")]
    #[diagnostic(code(mogen::codegen::unsupported_receiver))]
    UnsupportedReceiver { name: String },

    #[error("format pass failed: {0}")]
    #[diagnostic(code(mogen::codegen::format))]
    Format(String),

    #[error("generated source failed to re-parse")]
    #[diagnostic(code(mogen::codegen::check))]
    Check {
        #[source]
        source: mogen_syntax::SyntaxError,
    },
}
