//! Syntax tree for the parsed declaration subset.

use crate::token::Span;

/// A parsed source file: package clause, imports, type declarations.
///
/// Function, var, and const declarations are skipped during parsing and do
/// not appear here.
#[derive(Debug, Clone)]
pub struct File {
    pub package: Ident,
    pub imports: Vec<ImportSpec>,
    pub decls: Vec<TypeDecl>,
}

#[derive(Debug, Clone)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

impl Ident {
    /// Go exportedness: the first character is upper case.
    pub fn is_exported(&self) -> bool {
        self.name.chars().next().is_some_and(char::is_uppercase)
    }
}

#[derive(Debug, Clone)]
pub struct ImportSpec {
    pub alias: Option<Ident>,
    pub path: String,
    pub span: Span,
}

impl ImportSpec {
    /// The default package qualifier: the last segment of the import path.
    pub fn path_qualifier(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    /// The name this import binds in the file scope: the alias when present,
    /// the last path segment otherwise.
    pub fn local_name(&self) -> &str {
        match &self.alias {
            Some(alias) => &alias.name,
            None => self.path_qualifier(),
        }
    }
}

/// `type Name T` or `type Name = T`.
#[derive(Debug, Clone)]
pub struct TypeDecl {
    pub name: Ident,
    pub alias: bool,
    pub ty: TypeExpr,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct TypeExpr {
    pub kind: TypeExprKind,
    pub span: Span,
}

impl TypeExpr {
    pub fn ident(ident: Ident) -> Self {
        let span = ident.span;
        Self { kind: TypeExprKind::Ident(ident), span }
    }
}

#[derive(Debug, Clone)]
pub enum TypeExprKind {
    Ident(Ident),
    Selector { pkg: Ident, name: Ident },
    Slice(Box<TypeExpr>),
    Array { len: String, elem: Box<TypeExpr> },
    Pointer(Box<TypeExpr>),
    Map { key: Box<TypeExpr>, value: Box<TypeExpr> },
    Chan { dir: ChanDir, elem: Box<TypeExpr> },
    Func(FuncTypeExpr),
    Struct(Vec<FieldDecl>),
    Interface(InterfaceTypeExpr),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChanDir {
    Both,
    Send,
    Recv,
}

#[derive(Debug, Clone)]
pub struct FuncTypeExpr {
    pub params: Vec<ParamDecl>,
    pub results: Vec<ParamDecl>,
    pub variadic: bool,
}

/// One parameter or result; `name` is `None` in unnamed lists.
#[derive(Debug, Clone)]
pub struct ParamDecl {
    pub name: Option<Ident>,
    pub ty: TypeExpr,
}

/// One struct field; `names` is empty for embedded fields.
#[derive(Debug, Clone)]
pub struct FieldDecl {
    pub names: Vec<Ident>,
    pub ty: TypeExpr,
    pub tag: Option<String>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct InterfaceTypeExpr {
    pub embedded: Vec<TypeExpr>,
    pub methods: Vec<MethodDecl>,
}

#[derive(Debug, Clone)]
pub struct MethodDecl {
    pub name: Ident,
    pub sig: FuncTypeExpr,
    pub span: Span,
}
