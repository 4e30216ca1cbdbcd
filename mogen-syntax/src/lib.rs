//! Parsing for the Go declaration subset the mock generator consumes.
//!
//! The generator only needs package clauses, imports, and type declarations.
//! Function bodies and var/const initializers are skipped at the byte level
//! (balanced braces, string- and comment-aware), so arbitrary Go files can be
//! fed in without carrying a full statement grammar.

mod ast;
mod errors;
mod lexer;
mod parser;
mod token;

pub use ast::{
    ChanDir, FieldDecl, File, FuncTypeExpr, Ident, ImportSpec, InterfaceTypeExpr, MethodDecl,
    ParamDecl, TypeDecl, TypeExpr, TypeExprKind,
};
pub use errors::SyntaxError;
pub use lexer::Lexer;
pub use parser::parse_file;
pub use token::{Span, Token, TokenKind};
