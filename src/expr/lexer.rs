//! Predicate expression tokenizer: infix arithmetic/comparison/logic over
//! literals and `$`/`@`-prefixed path references.

use crate::cursor::{Cursor, SliceCursor};
use crate::token::Token;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExprKind {
    LParen,
    RParen,
    Number,
    PathRef,
    Bool,
    Null,
    Str,
    Eq,
    Neq,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
    Not,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,
    Eof,
    Error,
}

pub type ExprToken<'a> = Token<ExprKind, &'a [u8]>;

pub struct ExprLexer<'a> {
    cursor: SliceCursor<'a>,
    finished: bool,
}

impl<'a> ExprLexer<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self {
            cursor: SliceCursor::new(input),
            finished: false,
        }
    }

    pub fn next_token(&mut self) -> Option<ExprToken<'a>> {
        if self.finished {
            return None;
        }
        self.cursor.skip_whitespace();
        let tok = self.lex_one();
        if matches!(tok.kind, ExprKind::Eof | ExprKind::Error) {
            self.finished = true;
        }
        Some(tok)
    }

    fn error(&mut self) -> ExprToken<'a> {
        let pos = self.cursor.position();
        Token::new(ExprKind::Error, pos, self.cursor.emit())
    }

    fn single(&mut self, kind: ExprKind) -> ExprToken<'a> {
        let pos = self.cursor.position();
        self.cursor.take();
        Token::new(kind, pos, self.cursor.emit())
    }

    fn lex_one(&mut self) -> ExprToken<'a> {
        let pos = self.cursor.position();
        match self.cursor.peek() {
            None => Token::new(ExprKind::Eof, pos, self.cursor.emit()),
            Some(b'(') => self.single(ExprKind::LParen),
            Some(b')') => self.single(ExprKind::RParen),
            Some(b'+') => self.single(ExprKind::Plus),
            Some(b'-') => self.single(ExprKind::Minus),
            Some(b'*') => self.single(ExprKind::Star),
            Some(b'/') => self.single(ExprKind::Slash),
            Some(b'%') => self.single(ExprKind::Percent),
            Some(b'^') => self.single(ExprKind::Caret),
            Some(b'!') => self.single(ExprKind::Not),
            Some(b'=') => {
                self.cursor.take();
                if self.cursor.peek() == Some(b'=') {
                    self.cursor.take();
                    Token::new(ExprKind::Eq, pos, self.cursor.emit())
                } else {
                    self.error()
                }
            }
            Some(b'<') => {
                self.cursor.take();
                if self.cursor.peek() == Some(b'=') {
                    self.cursor.take();
                    Token::new(ExprKind::Le, pos, self.cursor.emit())
                } else {
                    Token::new(ExprKind::Lt, pos, self.cursor.emit())
                }
            }
            Some(b'>') => {
                self.cursor.take();
                if self.cursor.peek() == Some(b'=') {
                    self.cursor.take();
                    Token::new(ExprKind::Ge, pos, self.cursor.emit())
                } else {
                    Token::new(ExprKind::Gt, pos, self.cursor.emit())
                }
            }
            Some(b'&') => {
                self.cursor.take();
                if self.cursor.peek() == Some(b'&') {
                    self.cursor.take();
                    Token::new(ExprKind::And, pos, self.cursor.emit())
                } else {
                    self.error()
                }
            }
            Some(b'|') => {
                self.cursor.take();
                if self.cursor.peek() == Some(b'|') {
                    self.cursor.take();
                    Token::new(ExprKind::Or, pos, self.cursor.emit())
                } else {
                    self.error()
                }
            }
            Some(b'"') => self.lex_string(),
            Some(c) if c.is_ascii_digit() => self.lex_number(),
            Some(b'$') | Some(b'@') => self.lex_path_ref(),
            Some(b't') => self.lex_keyword(b"true", ExprKind::Bool),
            Some(b'f') => self.lex_keyword(b"false", ExprKind::Bool),
            Some(b'n') => self.lex_keyword(b"null", ExprKind::Null),
            _ => self.error(),
        }
    }

    fn lex_string(&mut self) -> ExprToken<'a> {
        let pos = self.cursor.position();
        self.cursor.take();
        loop {
            match self.cursor.take() {
                None => return self.error(),
                Some(b'\\') => {
                    if self.cursor.take().is_none() {
                        return self.error();
                    }
                }
                Some(b'"') => break,
                Some(_) => {}
            }
        }
        Token::new(ExprKind::Str, pos, self.cursor.emit())
    }

    fn lex_number(&mut self) -> ExprToken<'a> {
        let pos = self.cursor.position();
        while matches!(self.cursor.peek(), Some(c) if c.is_ascii_digit()) {
            self.cursor.take();
        }
        if self.cursor.peek() == Some(b'.') {
            self.cursor.take();
            while matches!(self.cursor.peek(), Some(c) if c.is_ascii_digit()) {
                self.cursor.take();
            }
        }
        if matches!(self.cursor.peek(), Some(b'e' | b'E')) {
            self.cursor.take();
            if matches!(self.cursor.peek(), Some(b'+' | b'-')) {
                self.cursor.take();
            }
            while matches!(self.cursor.peek(), Some(c) if c.is_ascii_digit()) {
                self.cursor.take();
            }
        }
        Token::new(ExprKind::Number, pos, self.cursor.emit())
    }

    /// A `$`/`@`-rooted path reference: runs to the next unquoted space or
    /// end of input, honoring quoted segments so a bracketed key can
    /// contain spaces.
    fn lex_path_ref(&mut self) -> ExprToken<'a> {
        let pos = self.cursor.position();
        self.cursor.take();
        let mut in_quotes = false;
        loop {
            match self.cursor.peek() {
                None => break,
                Some(b'"') => {
                    in_quotes = !in_quotes;
                    self.cursor.take();
                }
                Some(b' ') if !in_quotes => break,
                Some(_) => {
                    self.cursor.take();
                }
            }
        }
        Token::new(ExprKind::PathRef, pos, self.cursor.emit())
    }

    fn lex_keyword(&mut self, word: &'static [u8], kind: ExprKind) -> ExprToken<'a> {
        let pos = self.cursor.position();
        for &want in word {
            match self.cursor.take() {
                Some(got) if got == want => {}
                _ => return self.error(),
            }
        }
        Token::new(kind, pos, self.cursor.emit())
    }
}
