//! Parse diagnostics.

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use crate::token::{Span, Token};

/// A lexing or parsing failure, pointing at the offending bytes.
///
/// The parser works on bare text, so the error carries only the span; callers
/// that know the file attach a `NamedSource` when they report it.
#[derive(Debug, Clone, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(mogen::syntax))]
pub struct SyntaxError {
    pub message: String,
    #[label("here")]
    pub span: SourceSpan,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self { message: message.into(), span: span.into() }
    }

    pub(crate) fn expected(what: &str, found: &Token) -> Self {
        Self::new(
            format!("expected {what}, found {}", found.kind.describe()),
            found.span,
        )
    }
}
