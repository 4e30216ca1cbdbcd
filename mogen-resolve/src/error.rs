//! Load and resolution errors.

use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Boxed to keep `Result` small; the large variants carry full source text
/// for diagnostics.
pub type Result<T> = std::result::Result<T, Box<ResolveError>>;

#[derive(Debug, Error, Diagnostic)]
pub enum ResolveError {
    #[error("no Go files found for the given patterns")]
    #[diagnostic(
        code(mogen::load::not_found),
        help("pass .go files or directories that contain them")
    )]
    NotFound,

    #[error("patterns resolve to more than one package: {names}")]
    #[diagnostic(
        code(mogen::load::multiple_packages),
        help("restrict the patterns to files of a single package")
    )]
    MultiplePackages { names: String },

    #[error("failed to read '{path}'")]
    #[diagnostic(code(mogen::load::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {filename}")]
    #[diagnostic(code(mogen::syntax::parse))]
    Parse {
        filename: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: SourceSpan,
        message: String,
    },

    #[error("type '{name}' is declared more than once")]
    #[diagnostic(code(mogen::resolve::duplicate_type))]
    DuplicateType {
        name: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("second declaration")]
        span: SourceSpan,
    },

    #[error("unknown type '{name}'")]
    #[diagnostic(
        code(mogen::resolve::unknown_type),
        help("only types declared in the loaded package and predeclared types resolve")
    )]
    UnknownType {
        name: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("not declared in this package")]
        span: SourceSpan,
    },

    #[error("unknown package qualifier '{name}'")]
    #[diagnostic(code(mogen::resolve::unknown_import))]
    UnknownImport {
        name: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("no import binds this name")]
        span: SourceSpan,
    },

    #[error("cannot resolve embedded interface '{name}'")]
    #[diagnostic(
        code(mogen::resolve::unresolved_embedding),
        help("interfaces embedded from other packages need that package's source, which is not loaded")
    )]
    UnresolvedEmbedding {
        name: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("embedded here")]
        span: SourceSpan,
    },

    #[error("embedded type '{name}' is not an interface")]
    #[diagnostic(code(mogen::resolve::embedded_not_interface))]
    EmbeddedNotInterface {
        name: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("embedded here")]
        span: SourceSpan,
    },

    #[error("duplicate method '{name}'")]
    #[diagnostic(
        code(mogen::resolve::duplicate_method),
        help("embedded interfaces may only repeat a method when the signatures are identical")
    )]
    DuplicateMethod {
        name: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("conflicts with an earlier method")]
        span: SourceSpan,
    },

    #[error("invalid recursive type '{name}'")]
    #[diagnostic(code(mogen::resolve::recursive_type))]
    RecursiveType {
        name: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("refers back to itself")]
        span: SourceSpan,
    },
}
