//! Type expression grammar.

use crate::ast::{
    ChanDir, FieldDecl, FuncTypeExpr, InterfaceTypeExpr, MethodDecl, ParamDecl, TypeExpr,
    TypeExprKind,
};
use crate::errors::SyntaxError;
use crate::token::TokenKind;

use super::Parser;

impl Parser<'_> {
    pub(crate) fn parse_type(&mut self) -> Result<TypeExpr, SyntaxError> {
        let start = self.current.span;
        let kind = match self.current.kind {
            TokenKind::Ident => {
                let name = self.ident()?;
                if self.eat(TokenKind::Dot)? {
                    let sel = self.ident()?;
                    TypeExprKind::Selector { pkg: name, name: sel }
                } else {
                    TypeExprKind::Ident(name)
                }
            }
            TokenKind::LBracket => {
                self.bump()?;
                if self.eat(TokenKind::RBracket)? {
                    TypeExprKind::Slice(Box::new(self.parse_type()?))
                } else if self.at(TokenKind::IntLit) {
                    let len = self.bump()?.text;
                    self.expect(TokenKind::RBracket)?;
                    TypeExprKind::Array { len, elem: Box::new(self.parse_type()?) }
                } else if self.at(TokenKind::Ident) {
                    // Constant array length; anything more is a generic
                    // declaration, which is out of scope.
                    let len = self.ident()?;
                    if self.eat(TokenKind::RBracket)? {
                        TypeExprKind::Array {
                            len: len.name,
                            elem: Box::new(self.parse_type()?),
                        }
                    } else {
                        return Err(SyntaxError::new(
                            "expected ']' after array length (type parameters are not supported)",
                            self.current.span,
                        ));
                    }
                } else {
                    return Err(SyntaxError::expected("array length or ']'", &self.current));
                }
            }
            TokenKind::Star => {
                self.bump()?;
                TypeExprKind::Pointer(Box::new(self.parse_type()?))
            }
            TokenKind::Map => {
                self.bump()?;
                self.expect(TokenKind::LBracket)?;
                let key = Box::new(self.parse_type()?);
                self.expect(TokenKind::RBracket)?;
                let value = Box::new(self.parse_type()?);
                TypeExprKind::Map { key, value }
            }
            TokenKind::Chan => {
                self.bump()?;
                let dir = if self.eat(TokenKind::Arrow)? {
                    ChanDir::Send
                } else {
                    ChanDir::Both
                };
                TypeExprKind::Chan { dir, elem: Box::new(self.parse_type()?) }
            }
            TokenKind::Arrow => {
                self.bump()?;
                self.expect(TokenKind::Chan)?;
                TypeExprKind::Chan {
                    dir: ChanDir::Recv,
                    elem: Box::new(self.parse_type()?),
                }
            }
            TokenKind::Func => {
                self.bump()?;
                TypeExprKind::Func(self.func_signature()?)
            }
            TokenKind::Struct => {
                self.bump()?;
                TypeExprKind::Struct(self.struct_body()?)
            }
            TokenKind::Interface => {
                self.bump()?;
                TypeExprKind::Interface(self.interface_body()?)
            }
            _ => return Err(SyntaxError::expected("type", &self.current)),
        };
        Ok(TypeExpr { kind, span: self.type_expr_span(start) })
    }

    fn at_type_start(&self) -> bool {
        matches!(
            self.current.kind,
            TokenKind::Ident
                | TokenKind::LBracket
                | TokenKind::Star
                | TokenKind::Map
                | TokenKind::Chan
                | TokenKind::Arrow
                | TokenKind::Func
                | TokenKind::Struct
                | TokenKind::Interface
        )
    }

    /// `(params) results` as used by method declarations and func types.
    pub(crate) fn func_signature(&mut self) -> Result<FuncTypeExpr, SyntaxError> {
        let (params, variadic) = self.param_list()?;
        let results = self.result_list()?;
        Ok(FuncTypeExpr { params, results, variadic })
    }

    /// A parenthesized parameter list.
    ///
    /// Go's grammar makes `(a, b string)` (names) and `(int, string)` (bare
    /// types) look identical until the list ends, so identifiers are buffered
    /// until an entry settles which one the list is.
    fn param_list(&mut self) -> Result<(Vec<ParamDecl>, bool), SyntaxError> {
        self.expect(TokenKind::LParen)?;
        let mut entries: Vec<ParamDecl> = Vec::new();
        let mut pending: Vec<crate::ast::Ident> = Vec::new();
        let mut variadic = false;
        loop {
            if self.eat(TokenKind::RParen)? {
                for id in pending.drain(..) {
                    entries.push(ParamDecl { name: None, ty: TypeExpr::ident(id) });
                }
                break;
            }
            if variadic {
                return Err(SyntaxError::new(
                    "can only use '...' with the final parameter",
                    self.current.span,
                ));
            }
            if self.at(TokenKind::Ellipsis) {
                self.bump()?;
                if !pending.is_empty() {
                    return Err(SyntaxError::new(
                        "can only use '...' with the final parameter",
                        self.current.span,
                    ));
                }
                let ty = self.parse_type()?;
                entries.push(ParamDecl { name: None, ty });
                variadic = true;
            } else if self.at(TokenKind::Ident) {
                let first = self.ident()?;
                match self.current.kind {
                    TokenKind::Comma => {
                        pending.push(first);
                        self.bump()?;
                        continue;
                    }
                    TokenKind::RParen => {
                        for id in pending.drain(..) {
                            entries.push(ParamDecl { name: None, ty: TypeExpr::ident(id) });
                        }
                        entries.push(ParamDecl { name: None, ty: TypeExpr::ident(first) });
                    }
                    TokenKind::Dot => {
                        self.bump()?;
                        let sel = self.ident()?;
                        for id in pending.drain(..) {
                            entries.push(ParamDecl { name: None, ty: TypeExpr::ident(id) });
                        }
                        let span = first.span.to(sel.span);
                        entries.push(ParamDecl {
                            name: None,
                            ty: TypeExpr {
                                kind: TypeExprKind::Selector { pkg: first, name: sel },
                                span,
                            },
                        });
                    }
                    TokenKind::Ellipsis => {
                        self.bump()?;
                        if !pending.is_empty() {
                            return Err(SyntaxError::new(
                                "can only use '...' with the final parameter",
                                self.current.span,
                            ));
                        }
                        let ty = self.parse_type()?;
                        entries.push(ParamDecl { name: Some(first), ty });
                        variadic = true;
                    }
                    _ if self.at_type_start() => {
                        let ty = self.parse_type()?;
                        for id in pending.drain(..) {
                            entries.push(ParamDecl { name: Some(id), ty: ty.clone() });
                        }
                        entries.push(ParamDecl { name: Some(first), ty });
                    }
                    _ => {
                        return Err(SyntaxError::expected(
                            "type, ',' or ')'",
                            &self.current,
                        ));
                    }
                }
            } else if self.at_type_start() {
                for id in pending.drain(..) {
                    entries.push(ParamDecl { name: None, ty: TypeExpr::ident(id) });
                }
                let ty = self.parse_type()?;
                entries.push(ParamDecl { name: None, ty });
            } else {
                return Err(SyntaxError::expected("parameter", &self.current));
            }
            if !self.at(TokenKind::RParen) {
                self.expect(TokenKind::Comma)?;
            }
        }
        Ok((entries, variadic))
    }

    fn result_list(&mut self) -> Result<Vec<ParamDecl>, SyntaxError> {
        if self.at(TokenKind::LParen) {
            let (results, variadic) = self.param_list()?;
            if variadic {
                return Err(SyntaxError::new(
                    "cannot use '...' in results",
                    self.current.span,
                ));
            }
            Ok(results)
        } else if self.at_type_start() {
            let ty = self.parse_type()?;
            Ok(vec![ParamDecl { name: None, ty }])
        } else {
            Ok(Vec::new())
        }
    }

    fn struct_body(&mut self) -> Result<Vec<FieldDecl>, SyntaxError> {
        self.expect(TokenKind::LBrace)?;
        let mut fields = Vec::new();
        loop {
            self.skip_semis()?;
            if self.eat(TokenKind::RBrace)? {
                break;
            }
            let start = self.current.span;
            let field = if self.at(TokenKind::Star) {
                self.bump()?;
                let ty = self.parse_type()?;
                let span = self.type_expr_span(start);
                FieldDecl {
                    names: Vec::new(),
                    ty: TypeExpr { kind: TypeExprKind::Pointer(Box::new(ty)), span },
                    tag: self.opt_tag()?,
                    span,
                }
            } else if self.at(TokenKind::Ident) {
                let first = self.ident()?;
                match self.current.kind {
                    TokenKind::Dot => {
                        self.bump()?;
                        let sel = self.ident()?;
                        let span = first.span.to(sel.span);
                        FieldDecl {
                            names: Vec::new(),
                            ty: TypeExpr {
                                kind: TypeExprKind::Selector { pkg: first, name: sel },
                                span,
                            },
                            tag: self.opt_tag()?,
                            span,
                        }
                    }
                    TokenKind::Semi | TokenKind::RBrace => {
                        let span = first.span;
                        FieldDecl {
                            names: Vec::new(),
                            ty: TypeExpr::ident(first),
                            tag: None,
                            span,
                        }
                    }
                    TokenKind::StringLit => {
                        let span = first.span;
                        FieldDecl {
                            names: Vec::new(),
                            ty: TypeExpr::ident(first),
                            tag: self.opt_tag()?,
                            span,
                        }
                    }
                    TokenKind::Comma => {
                        let mut names = vec![first];
                        while self.eat(TokenKind::Comma)? {
                            names.push(self.ident()?);
                        }
                        let ty = self.parse_type()?;
                        let span = self.type_expr_span(start);
                        FieldDecl { names, ty, tag: self.opt_tag()?, span }
                    }
                    _ if self.at_type_start() => {
                        let ty = self.parse_type()?;
                        let span = self.type_expr_span(start);
                        FieldDecl { names: vec![first], ty, tag: self.opt_tag()?, span }
                    }
                    _ => return Err(SyntaxError::expected("field type", &self.current)),
                }
            } else {
                return Err(SyntaxError::expected("struct field", &self.current));
            };
            fields.push(field);
            if !self.at(TokenKind::RBrace) {
                self.expect(TokenKind::Semi)?;
            }
        }
        Ok(fields)
    }

    fn interface_body(&mut self) -> Result<InterfaceTypeExpr, SyntaxError> {
        self.expect(TokenKind::LBrace)?;
        let mut embedded = Vec::new();
        let mut methods = Vec::new();
        loop {
            self.skip_semis()?;
            if self.eat(TokenKind::RBrace)? {
                break;
            }
            if !self.at(TokenKind::Ident) {
                return Err(SyntaxError::expected(
                    "method or embedded interface",
                    &self.current,
                ));
            }
            let name = self.ident()?;
            match self.current.kind {
                TokenKind::LParen => {
                    let start = name.span;
                    let sig = self.func_signature()?;
                    let span = self.type_expr_span(start);
                    methods.push(MethodDecl { name, sig, span });
                }
                TokenKind::Dot => {
                    self.bump()?;
                    let sel = self.ident()?;
                    let span = name.span.to(sel.span);
                    embedded.push(TypeExpr {
                        kind: TypeExprKind::Selector { pkg: name, name: sel },
                        span,
                    });
                }
                _ => embedded.push(TypeExpr::ident(name)),
            }
            if !self.at(TokenKind::RBrace) {
                self.expect(TokenKind::Semi)?;
            }
        }
        Ok(InterfaceTypeExpr { embedded, methods })
    }

    fn opt_tag(&mut self) -> Result<Option<String>, SyntaxError> {
        if self.at(TokenKind::StringLit) {
            Ok(Some(self.bump()?.text))
        } else {
            Ok(None)
        }
    }
}
