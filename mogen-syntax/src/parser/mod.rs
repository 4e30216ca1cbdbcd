//! Recursive-descent parser over the token stream.
//!
//! Single-token lookahead; `type` declarations are parsed fully, `func`,
//! `var`, and `const` declarations are skipped at the byte level through the
//! lexer's raw-skip routines.

mod types;

use crate::ast::{File, Ident, ImportSpec, TypeDecl};
use crate::errors::SyntaxError;
use crate::lexer::Lexer;
use crate::token::{Span, Token, TokenKind};

/// Parses one Go source file down to its declaration skeleton.
pub fn parse_file(src: &str) -> Result<File, SyntaxError> {
    Parser::new(src)?.file()
}

pub(crate) struct Parser<'src> {
    lexer: Lexer<'src>,
    current: Token,
    last_span: Span,
}

impl<'src> Parser<'src> {
    fn new(src: &'src str) -> Result<Self, SyntaxError> {
        let mut lexer = Lexer::new(src);
        let current = lexer.next_token()?;
        Ok(Self { lexer, current, last_span: Span::new(0, 0) })
    }

    pub(crate) fn at(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    /// Consumes the current token and returns it.
    pub(crate) fn bump(&mut self) -> Result<Token, SyntaxError> {
        let next = self.lexer.next_token()?;
        let tok = std::mem::replace(&mut self.current, next);
        self.last_span = tok.span;
        Ok(tok)
    }

    pub(crate) fn eat(&mut self, kind: TokenKind) -> Result<bool, SyntaxError> {
        if self.at(kind) {
            self.bump()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub(crate) fn expect(&mut self, kind: TokenKind) -> Result<Token, SyntaxError> {
        if self.at(kind) {
            self.bump()
        } else {
            Err(SyntaxError::expected(kind.describe(), &self.current))
        }
    }

    pub(crate) fn ident(&mut self) -> Result<Ident, SyntaxError> {
        let tok = self.expect(TokenKind::Ident)?;
        Ok(Ident { name: tok.text, span: tok.span })
    }

    pub(crate) fn skip_semis(&mut self) -> Result<(), SyntaxError> {
        while self.at(TokenKind::Semi) {
            self.bump()?;
        }
        Ok(())
    }

    fn file(&mut self) -> Result<File, SyntaxError> {
        self.skip_semis()?;
        self.expect(TokenKind::Package)?;
        let package = self.ident()?;
        if !self.at(TokenKind::Eof) {
            self.expect(TokenKind::Semi)?;
        }

        let mut imports = Vec::new();
        let mut decls = Vec::new();
        loop {
            self.skip_semis()?;
            match self.current.kind {
                TokenKind::Eof => break,
                TokenKind::Import => {
                    self.bump()?;
                    self.import_decl(&mut imports)?;
                }
                TokenKind::Type => {
                    self.bump()?;
                    self.type_decl(&mut decls)?;
                }
                TokenKind::Func => {
                    // Skipped wholesale; mock generation never looks inside.
                    self.lexer.skip_func_decl()?;
                    self.advance_after_skip()?;
                }
                TokenKind::Var | TokenKind::Const => {
                    self.lexer.skip_decl_tail()?;
                    self.advance_after_skip()?;
                }
                _ => {
                    return Err(SyntaxError::expected(
                        "top-level declaration",
                        &self.current,
                    ));
                }
            }
        }
        Ok(File { package, imports, decls })
    }

    /// Refreshes `current` after the lexer raw-skipped past it.
    fn advance_after_skip(&mut self) -> Result<(), SyntaxError> {
        self.current = self.lexer.next_token()?;
        Ok(())
    }

    fn import_decl(&mut self, out: &mut Vec<ImportSpec>) -> Result<(), SyntaxError> {
        if self.eat(TokenKind::LParen)? {
            loop {
                self.skip_semis()?;
                if self.eat(TokenKind::RParen)? {
                    break;
                }
                out.push(self.import_spec()?);
                if !self.at(TokenKind::RParen) {
                    self.expect(TokenKind::Semi)?;
                }
            }
        } else {
            out.push(self.import_spec()?);
        }
        Ok(())
    }

    fn import_spec(&mut self) -> Result<ImportSpec, SyntaxError> {
        if self.at(TokenKind::Dot) {
            return Err(SyntaxError::new(
                "dot imports are not supported",
                self.current.span,
            ));
        }
        let alias = if self.at(TokenKind::Ident) {
            Some(self.ident()?)
        } else {
            None
        };
        let tok = self.expect(TokenKind::StringLit)?;
        Ok(ImportSpec { alias, path: tok.text, span: tok.span })
    }

    fn type_decl(&mut self, out: &mut Vec<TypeDecl>) -> Result<(), SyntaxError> {
        if self.eat(TokenKind::LParen)? {
            loop {
                self.skip_semis()?;
                if self.eat(TokenKind::RParen)? {
                    break;
                }
                out.push(self.type_spec()?);
                if !self.at(TokenKind::RParen) {
                    self.expect(TokenKind::Semi)?;
                }
            }
        } else {
            out.push(self.type_spec()?);
        }
        Ok(())
    }

    fn type_spec(&mut self) -> Result<TypeDecl, SyntaxError> {
        let name = self.ident()?;
        let alias = self.eat(TokenKind::Assign)?;
        let ty = self.parse_type()?;
        let span = name.span.to(ty.span);
        Ok(TypeDecl { name, alias, ty, span })
    }

    pub(crate) fn type_expr_span(&self, start: Span) -> Span {
        start.to(self.last_span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::TypeExprKind;

    fn parse(src: &str) -> File {
        parse_file(src).expect("parse")
    }

    #[test]
    fn parses_package_clause_and_imports() {
        let file = parse(
            "package util\n\nimport (\n\t\"io\"\n\tmyfmt \"fmt\"\n\t_ \"net/http/pprof\"\n)\nimport \"strings\"\n",
        );
        assert_eq!(file.package.name, "util");
        let paths: Vec<_> = file.imports.iter().map(|i| i.path.as_str()).collect();
        assert_eq!(paths, ["io", "fmt", "net/http/pprof", "strings"]);
        assert_eq!(file.imports[1].local_name(), "myfmt");
        assert_eq!(file.imports[1].path_qualifier(), "fmt");
        assert_eq!(file.imports[2].local_name(), "_");
    }

    #[test]
    fn parses_interface_with_methods_and_embedding() {
        let file = parse(
            "package util\nimport \"io\"\ntype Buffer interface {\n\tio.Writer\n\tReader\n\tReset()\n\tWrite(p []byte) (n int, err error)\n}\n",
        );
        assert_eq!(file.decls.len(), 1);
        let decl = &file.decls[0];
        assert_eq!(decl.name.name, "Buffer");
        let TypeExprKind::Interface(iface) = &decl.ty.kind else {
            panic!("expected interface type");
        };
        assert_eq!(iface.embedded.len(), 2);
        assert_eq!(iface.methods.len(), 2);
        assert_eq!(iface.methods[0].name.name, "Reset");
        let write = &iface.methods[1];
        assert_eq!(write.name.name, "Write");
        assert_eq!(write.sig.params.len(), 1);
        assert_eq!(write.sig.params[0].name.as_ref().unwrap().name, "p");
        assert_eq!(write.sig.results.len(), 2);
        assert!(!write.sig.variadic);
    }

    #[test]
    fn parses_grouped_type_declarations() {
        let file = parse(
            "package util\ntype (\n\tA int\n\tB = string\n\tC []byte\n)\n",
        );
        assert_eq!(file.decls.len(), 3);
        assert!(!file.decls[0].alias);
        assert!(file.decls[1].alias);
        assert!(matches!(file.decls[2].ty.kind, TypeExprKind::Slice(_)));
    }

    #[test]
    fn parses_struct_fields_tags_and_embedding() {
        let file = parse(
            "package util\ntype User struct {\n\tID, Age int64\n\tName string `json:\"name\"`\n\t*Account\n\tfmt.Stringer\n}\n",
        );
        let TypeExprKind::Struct(fields) = &file.decls[0].ty.kind else {
            panic!("expected struct type");
        };
        assert_eq!(fields.len(), 4);
        assert_eq!(fields[0].names.len(), 2);
        assert_eq!(fields[1].tag.as_deref(), Some("json:\"name\""));
        assert!(fields[2].names.is_empty());
        assert!(fields[3].names.is_empty());
    }

    #[test]
    fn skips_functions_vars_and_consts() {
        let file = parse(
            "package util\n\nconst answer = 42\n\nvar (\n\tx = []int{1, 2}\n\ty = \"}\"\n)\n\nfunc (s *Server) Greet(name string) string {\n\treturn \"hi \" + name\n}\n\ntype Greeter interface {\n\tGreet(name string) string\n}\n",
        );
        assert_eq!(file.decls.len(), 1);
        assert_eq!(file.decls[0].name.name, "Greeter");
    }

    #[test]
    fn parses_variadic_signatures() {
        let file = parse(
            "package util\ntype Logger interface {\n\tLogf(format string, args ...interface {\n})\n}\n",
        );
        let TypeExprKind::Interface(iface) = &file.decls[0].ty.kind else {
            panic!("expected interface");
        };
        let sig = &iface.methods[0].sig;
        assert!(sig.variadic);
        assert_eq!(sig.params.len(), 2);
        assert_eq!(sig.params[1].name.as_ref().unwrap().name, "args");
    }

    #[test]
    fn parses_grouped_parameter_names() {
        let file = parse(
            "package util\ntype Adder interface {\n\tAdd(a, b int) (sum int)\n}\n",
        );
        let TypeExprKind::Interface(iface) = &file.decls[0].ty.kind else {
            panic!("expected interface");
        };
        let sig = &iface.methods[0].sig;
        assert_eq!(sig.params.len(), 2);
        assert_eq!(sig.params[0].name.as_ref().unwrap().name, "a");
        assert_eq!(sig.params[1].name.as_ref().unwrap().name, "b");
        assert_eq!(sig.results[0].name.as_ref().unwrap().name, "sum");
    }

    #[test]
    fn parses_unnamed_parameter_lists() {
        let file = parse(
            "package util\ntype Sink interface {\n\tConsume(int, string) error\n}\n",
        );
        let TypeExprKind::Interface(iface) = &file.decls[0].ty.kind else {
            panic!("expected interface");
        };
        let sig = &iface.methods[0].sig;
        assert_eq!(sig.params.len(), 2);
        assert!(sig.params[0].name.is_none());
        assert!(sig.params[1].name.is_none());
        assert_eq!(sig.results.len(), 1);
    }

    #[test]
    fn rejects_dot_imports() {
        let err = parse_file("package util\nimport . \"fmt\"\n").unwrap_err();
        assert!(err.message.contains("dot imports"));
    }

    #[test]
    fn rejects_type_parameters() {
        let err =
            parse_file("package util\ntype Box[T any] struct {\n\tv T\n}\n").unwrap_err();
        assert!(err.message.contains("type parameters"));
    }

    #[test]
    fn rejects_stray_tokens() {
        let err = parse_file("package util\nreturn\n").unwrap_err();
        assert!(err.message.contains("top-level declaration"));
    }
}
