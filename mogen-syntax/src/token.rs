//! Tokens and source spans.

/// A half-open byte range into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// The span covering both `self` and `other`.
    pub fn to(self, other: Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }

    pub fn len(self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(self) -> bool {
        self.start == self.end
    }
}

impl From<Span> for miette::SourceSpan {
    fn from(span: Span) -> Self {
        (span.start, span.end.saturating_sub(span.start)).into()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Ident,
    IntLit,
    StringLit,
    // Keywords
    Package,
    Import,
    Type,
    Struct,
    Interface,
    Func,
    Map,
    Chan,
    Var,
    Const,
    // Punctuation
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Star,
    Comma,
    Dot,
    Semi,
    Ellipsis,
    Arrow,
    Assign,
    Eof,
}

impl TokenKind {
    /// Human-readable name used in diagnostics.
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::Ident => "identifier",
            TokenKind::IntLit => "integer literal",
            TokenKind::StringLit => "string literal",
            TokenKind::Package => "'package'",
            TokenKind::Import => "'import'",
            TokenKind::Type => "'type'",
            TokenKind::Struct => "'struct'",
            TokenKind::Interface => "'interface'",
            TokenKind::Func => "'func'",
            TokenKind::Map => "'map'",
            TokenKind::Chan => "'chan'",
            TokenKind::Var => "'var'",
            TokenKind::Const => "'const'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::Star => "'*'",
            TokenKind::Comma => "','",
            TokenKind::Dot => "'.'",
            TokenKind::Semi => "';'",
            TokenKind::Ellipsis => "'...'",
            TokenKind::Arrow => "'<-'",
            TokenKind::Assign => "'='",
            TokenKind::Eof => "end of file",
        }
    }

    pub(crate) fn keyword(ident: &str) -> Option<TokenKind> {
        let kind = match ident {
            "package" => TokenKind::Package,
            "import" => TokenKind::Import,
            "type" => TokenKind::Type,
            "struct" => TokenKind::Struct,
            "interface" => TokenKind::Interface,
            "func" => TokenKind::Func,
            "map" => TokenKind::Map,
            "chan" => TokenKind::Chan,
            "var" => TokenKind::Var,
            "const" => TokenKind::Const,
            _ => return None,
        };
        Some(kind)
    }
}

/// One lexed token.
///
/// `text` carries the identifier spelling, the raw integer literal, or the
/// decoded string contents; it is empty for punctuation and keywords.
#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span) -> Self {
        Self { kind, text: text.into(), span }
    }
}
