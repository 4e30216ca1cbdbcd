//! Hand-written lexer with Go's automatic semicolon insertion.
//!
//! Besides regular tokenization it offers raw skipping routines the parser
//! uses to step over function bodies and var/const declarations without
//! understanding them.

use crate::errors::SyntaxError;
use crate::token::{Span, Token, TokenKind};

pub struct Lexer<'src> {
    src: &'src str,
    pos: usize,
    /// Last significant token kind, drives semicolon insertion at newlines.
    prev: Option<TokenKind>,
}

/// Token kinds after which a newline inserts a semicolon.
fn wants_semi(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Ident
            | TokenKind::IntLit
            | TokenKind::StringLit
            | TokenKind::RParen
            | TokenKind::RBracket
            | TokenKind::RBrace
    )
}

/// Go integer literal shapes: decimal, `0x`/`0o`/`0b` prefixed, with `_`
/// separators.
fn is_int_literal(text: &str) -> bool {
    let (digits, radix) = match text.as_bytes() {
        [b'0', b'x' | b'X', rest @ ..] => (rest, 16),
        [b'0', b'o' | b'O', rest @ ..] => (rest, 8),
        [b'0', b'b' | b'B', rest @ ..] => (rest, 2),
        _ => (text.as_bytes(), 10),
    };
    !digits.is_empty() && digits.iter().all(|&b| b == b'_' || (b as char).is_digit(radix))
}

fn is_ident_start(ch: char) -> bool {
    ch == '_' || ch.is_alphabetic()
}

fn is_ident_continue(ch: char) -> bool {
    ch == '_' || ch.is_alphanumeric()
}

impl<'src> Lexer<'src> {
    pub fn new(src: &'src str) -> Self {
        Self { src, pos: 0, prev: None }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        let mut chars = self.src[self.pos..].chars();
        chars.next();
        chars.next()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn eat(&mut self, ch: char) -> bool {
        if self.peek() == Some(ch) {
            self.pos += ch.len_utf8();
            true
        } else {
            false
        }
    }

    fn token(&mut self, kind: TokenKind, text: impl Into<String>, start: usize) -> Token {
        self.prev = Some(kind);
        Token::new(kind, text, Span::new(start, self.pos))
    }

    /// The next token, with semicolons inserted at newlines per Go's rules.
    pub fn next_token(&mut self) -> Result<Token, SyntaxError> {
        loop {
            let Some(ch) = self.peek() else {
                // Rule 1 also applies when the final newline is omitted.
                if self.prev.is_some_and(wants_semi) {
                    self.prev = Some(TokenKind::Semi);
                    return Ok(Token::new(
                        TokenKind::Semi,
                        "",
                        Span::new(self.pos, self.pos),
                    ));
                }
                return Ok(Token::new(TokenKind::Eof, "", Span::new(self.pos, self.pos)));
            };
            match ch {
                ' ' | '\t' | '\r' => {
                    self.bump();
                }
                '\n' => {
                    if self.prev.is_some_and(wants_semi) {
                        let start = self.pos;
                        self.bump();
                        self.prev = Some(TokenKind::Semi);
                        return Ok(Token::new(TokenKind::Semi, "", Span::new(start, self.pos)));
                    }
                    self.bump();
                }
                '/' if self.peek_second() == Some('/') => {
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.bump();
                    }
                }
                '/' if self.peek_second() == Some('*') => {
                    // A block comment spanning lines counts as a newline.
                    if self.skip_block_comment()? && self.prev.is_some_and(wants_semi) {
                        self.prev = Some(TokenKind::Semi);
                        return Ok(Token::new(
                            TokenKind::Semi,
                            "",
                            Span::new(self.pos, self.pos),
                        ));
                    }
                }
                _ => break,
            }
        }

        let start = self.pos;
        let ch = self.peek().unwrap();
        if is_ident_start(ch) {
            while self.peek().is_some_and(is_ident_continue) {
                self.bump();
            }
            let text = &self.src[start..self.pos];
            return Ok(match TokenKind::keyword(text) {
                Some(kw) => self.token(kw, "", start),
                None => self.token(TokenKind::Ident, text.to_owned(), start),
            });
        }
        if ch.is_ascii_digit() {
            // Only used as array lengths; hex/octal/binary and `_`
            // separators accepted.
            while self
                .peek()
                .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
            {
                self.bump();
            }
            let text = &self.src[start..self.pos];
            if !is_int_literal(text) {
                return Err(SyntaxError::new(
                    format!("malformed integer literal '{text}'"),
                    Span::new(start, self.pos),
                ));
            }
            let text = text.to_owned();
            return Ok(self.token(TokenKind::IntLit, text, start));
        }

        self.bump();
        let tok = match ch {
            '(' => self.token(TokenKind::LParen, "", start),
            ')' => self.token(TokenKind::RParen, "", start),
            '{' => self.token(TokenKind::LBrace, "", start),
            '}' => self.token(TokenKind::RBrace, "", start),
            '[' => self.token(TokenKind::LBracket, "", start),
            ']' => self.token(TokenKind::RBracket, "", start),
            '*' => self.token(TokenKind::Star, "", start),
            ',' => self.token(TokenKind::Comma, "", start),
            ';' => self.token(TokenKind::Semi, "", start),
            '=' => self.token(TokenKind::Assign, "", start),
            '.' => {
                if self.peek() == Some('.') && self.peek_second() == Some('.') {
                    self.bump();
                    self.bump();
                    self.token(TokenKind::Ellipsis, "", start)
                } else {
                    self.token(TokenKind::Dot, "", start)
                }
            }
            '<' => {
                if self.eat('-') {
                    self.token(TokenKind::Arrow, "", start)
                } else {
                    return Err(SyntaxError::new(
                        "unexpected character '<'",
                        Span::new(start, self.pos),
                    ));
                }
            }
            '"' => {
                let text = self.lex_interpreted_string(start)?;
                self.token(TokenKind::StringLit, text, start)
            }
            '`' => {
                let text = self.lex_raw_string(start)?;
                self.token(TokenKind::StringLit, text, start)
            }
            other => {
                return Err(SyntaxError::new(
                    format!("unexpected character {other:?}"),
                    Span::new(start, self.pos),
                ));
            }
        };
        Ok(tok)
    }

    fn lex_interpreted_string(&mut self, start: usize) -> Result<String, SyntaxError> {
        let mut text = String::new();
        loop {
            let Some(ch) = self.bump() else {
                return Err(SyntaxError::new(
                    "unterminated string literal",
                    Span::new(start, self.pos),
                ));
            };
            match ch {
                '"' => return Ok(text),
                '\n' => {
                    return Err(SyntaxError::new(
                        "newline in string literal",
                        Span::new(start, self.pos),
                    ));
                }
                '\\' => {
                    let Some(esc) = self.bump() else {
                        return Err(SyntaxError::new(
                            "unterminated string literal",
                            Span::new(start, self.pos),
                        ));
                    };
                    match esc {
                        'n' => text.push('\n'),
                        't' => text.push('\t'),
                        'r' => text.push('\r'),
                        '0' => text.push('\0'),
                        '\\' => text.push('\\'),
                        '\'' => text.push('\''),
                        '"' => text.push('"'),
                        other => {
                            return Err(SyntaxError::new(
                                format!("unsupported escape sequence '\\{other}'"),
                                Span::new(start, self.pos),
                            ));
                        }
                    }
                }
                other => text.push(other),
            }
        }
    }

    fn lex_raw_string(&mut self, start: usize) -> Result<String, SyntaxError> {
        let mut text = String::new();
        loop {
            let Some(ch) = self.bump() else {
                return Err(SyntaxError::new(
                    "unterminated raw string literal",
                    Span::new(start, self.pos),
                ));
            };
            if ch == '`' {
                return Ok(text);
            }
            text.push(ch);
        }
    }

    /// Skips `/* ... */`; returns whether it contained a newline.
    fn skip_block_comment(&mut self) -> Result<bool, SyntaxError> {
        let start = self.pos;
        self.bump(); // '/'
        self.bump(); // '*'
        let mut saw_newline = false;
        loop {
            match self.bump() {
                Some('\n') => saw_newline = true,
                Some('*') if self.peek() == Some('/') => {
                    self.bump();
                    return Ok(saw_newline);
                }
                Some(_) => {}
                None => {
                    return Err(SyntaxError::new(
                        "unterminated block comment",
                        Span::new(start, self.pos),
                    ));
                }
            }
        }
    }

    /// Consumes a string, raw string, or rune literal starting at `open`,
    /// which has already been bumped.
    fn skip_literal(&mut self, open: char, start: usize) -> Result<(), SyntaxError> {
        if open == '`' {
            loop {
                match self.bump() {
                    Some('`') => return Ok(()),
                    Some(_) => {}
                    None => {
                        return Err(SyntaxError::new(
                            "unterminated raw string literal",
                            Span::new(start, self.pos),
                        ));
                    }
                }
            }
        }
        loop {
            match self.bump() {
                Some('\\') => {
                    self.bump();
                }
                Some(ch) if ch == open => return Ok(()),
                Some('\n') => {
                    return Err(SyntaxError::new(
                        "unterminated literal",
                        Span::new(start, self.pos),
                    ));
                }
                Some(_) => {}
                None => {
                    return Err(SyntaxError::new(
                        "unterminated literal",
                        Span::new(start, self.pos),
                    ));
                }
            }
        }
    }

    /// Raw comment handling shared by the skip routines. Returns true when a
    /// comment was consumed.
    fn skip_comment_raw(&mut self) -> Result<bool, SyntaxError> {
        if self.peek() == Some('/') {
            match self.peek_second() {
                Some('/') => {
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.bump();
                    }
                    return Ok(true);
                }
                Some('*') => {
                    self.skip_block_comment()?;
                    return Ok(true);
                }
                _ => {}
            }
        }
        Ok(false)
    }

    /// Skips a whole function declaration, starting right after the `func`
    /// keyword. Consumes the balanced body block when there is one, or stops
    /// at the end of the line for body-less declarations.
    pub fn skip_func_decl(&mut self) -> Result<(), SyntaxError> {
        let start = self.pos;
        let mut paren = 0i32;
        let mut bracket = 0i32;
        let mut curly = 0i32;
        let mut in_body = false;
        loop {
            if self.skip_comment_raw()? {
                continue;
            }
            let Some(ch) = self.peek() else {
                if in_body || paren > 0 || bracket > 0 {
                    return Err(SyntaxError::new(
                        "unterminated function declaration",
                        Span::new(start, self.pos),
                    ));
                }
                return Ok(());
            };
            match ch {
                '"' | '`' | '\'' => {
                    self.bump();
                    self.skip_literal(ch, self.pos)?;
                    continue;
                }
                '(' => paren += 1,
                ')' => paren -= 1,
                '[' => bracket += 1,
                ']' => bracket -= 1,
                '{' => {
                    if paren == 0 && bracket == 0 && curly == 0 {
                        in_body = true;
                    }
                    curly += 1;
                }
                '}' => {
                    curly -= 1;
                    if in_body && curly == 0 {
                        self.bump();
                        self.prev = Some(TokenKind::RBrace);
                        return Ok(());
                    }
                }
                '\n' | ';' if paren == 0 && bracket == 0 && curly == 0 => {
                    self.bump();
                    self.prev = None;
                    return Ok(());
                }
                _ => {}
            }
            self.bump();
        }
    }

    /// Skips the remainder of a var/const declaration, starting right after
    /// the keyword: either a parenthesized group or everything up to the end
    /// of the (possibly bracket-continued) line.
    pub fn skip_decl_tail(&mut self) -> Result<(), SyntaxError> {
        loop {
            if self.skip_comment_raw()? {
                continue;
            }
            match self.peek() {
                Some(' ' | '\t' | '\r') => {
                    self.bump();
                }
                _ => break,
            }
        }
        if self.peek() == Some('(') {
            self.bump();
            return self.skip_balanced_group();
        }

        let start = self.pos;
        let mut paren = 0i32;
        let mut bracket = 0i32;
        let mut curly = 0i32;
        loop {
            if self.skip_comment_raw()? {
                continue;
            }
            let Some(ch) = self.peek() else {
                if paren > 0 || bracket > 0 || curly > 0 {
                    return Err(SyntaxError::new(
                        "unterminated declaration",
                        Span::new(start, self.pos),
                    ));
                }
                return Ok(());
            };
            match ch {
                '"' | '`' | '\'' => {
                    self.bump();
                    self.skip_literal(ch, self.pos)?;
                    continue;
                }
                '\n' | ';' if paren == 0 && bracket == 0 && curly == 0 => {
                    self.bump();
                    self.prev = None;
                    return Ok(());
                }
                '(' => paren += 1,
                ')' => paren -= 1,
                '[' => bracket += 1,
                ']' => bracket -= 1,
                '{' => curly += 1,
                '}' => curly -= 1,
                _ => {}
            }
            self.bump();
        }
    }

    /// Skips to the `)` matching an already-consumed `(`.
    fn skip_balanced_group(&mut self) -> Result<(), SyntaxError> {
        let start = self.pos;
        let mut depth = 1i32;
        loop {
            if self.skip_comment_raw()? {
                continue;
            }
            let Some(ch) = self.peek() else {
                return Err(SyntaxError::new(
                    "unterminated declaration group",
                    Span::new(start, self.pos),
                ));
            };
            match ch {
                '"' | '`' | '\'' => {
                    self.bump();
                    self.skip_literal(ch, self.pos)?;
                    continue;
                }
                '(' => depth += 1,
                ')' => {
                    depth -= 1;
                    if depth == 0 {
                        self.bump();
                        self.prev = Some(TokenKind::RParen);
                        return Ok(());
                    }
                }
                _ => {}
            }
            self.bump();
        }
    }
}
