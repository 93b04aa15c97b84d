//! Path expression tokenizer (C4).
//!
//! Grammar (see the crate's external interface docs):
//! `path := '$' step*`, `step := '.' (key | '*') | '[' subscript ']' | '+'`,
//! `subscript := integer | '*' | integer ':' integer`.

use crate::cursor::{Cursor, SliceCursor};
use crate::token::Token;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    Root,
    Period,
    BracketLeft,
    BracketRight,
    Key,
    Wildcard,
    Index,
    Colon,
    Value,
    Eof,
    Error,
}

pub type PathToken<'a> = Token<PathKind, &'a [u8]>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Root,
    AfterElement,
    Key,
    ArrayIndexStart,
    ArrayAfterIndex,
    ArrayIndexSecond,
    ArrayClose,
    AfterValue,
    Done,
}

pub struct PathLexer<'a> {
    cursor: SliceCursor<'a>,
    state: State,
    finished: bool,
}

impl<'a> PathLexer<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self {
            cursor: SliceCursor::new(input),
            state: State::Root,
            finished: false,
        }
    }

    pub fn next_token(&mut self) -> Option<PathToken<'a>> {
        if self.finished {
            return None;
        }
        let tok = match self.state {
            State::Root => self.step_root(),
            State::AfterElement => self.step_after_element(),
            State::Key => self.step_key(),
            State::ArrayIndexStart => self.step_array_index_start(),
            State::ArrayAfterIndex => self.step_array_after_index(),
            State::ArrayIndexSecond => self.step_array_index_second(),
            State::ArrayClose => self.step_array_close(),
            State::AfterValue => self.step_after_value(),
            State::Done => unreachable!(),
        };
        if matches!(tok.kind, PathKind::Eof | PathKind::Error) {
            self.finished = true;
        }
        Some(tok)
    }

    fn error(&mut self) -> PathToken<'a> {
        let pos = self.cursor.position();
        self.state = State::Done;
        Token::new(PathKind::Error, pos, self.cursor.emit())
    }

    fn single(&mut self, kind: PathKind) -> PathToken<'a> {
        let pos = self.cursor.position();
        self.cursor.take();
        Token::new(kind, pos, self.cursor.emit())
    }

    fn eof_token(&mut self) -> PathToken<'a> {
        let pos = self.cursor.position();
        self.state = State::Done;
        Token::new(PathKind::Eof, pos, self.cursor.emit())
    }

    fn step_root(&mut self) -> PathToken<'a> {
        match self.cursor.peek() {
            Some(b'$') => {
                let tok = self.single(PathKind::Root);
                self.state = State::AfterElement;
                tok
            }
            _ => self.error(),
        }
    }

    fn step_after_element(&mut self) -> PathToken<'a> {
        match self.cursor.peek() {
            Some(b'.') => {
                let tok = self.single(PathKind::Period);
                self.state = State::Key;
                tok
            }
            Some(b'[') => {
                let tok = self.single(PathKind::BracketLeft);
                self.state = State::ArrayIndexStart;
                tok
            }
            Some(b'+') => {
                let tok = self.single(PathKind::Value);
                self.state = State::AfterValue;
                tok
            }
            None => self.eof_token(),
            _ => self.error(),
        }
    }

    fn step_key(&mut self) -> PathToken<'a> {
        match self.cursor.peek() {
            Some(b'*') => {
                let tok = self.single(PathKind::Wildcard);
                self.state = State::AfterElement;
                tok
            }
            Some(b'"') => {
                let pos = self.cursor.position();
                self.cursor.take(); // opening quote
                self.cursor.ignore(); // exclude it from the lexeme
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
                let raw = self.cursor.emit();
                let body = &raw[..raw.len() - 1]; // drop the closing quote
                self.state = State::AfterElement;
                Token::new(PathKind::Key, pos, body)
            }
            Some(c) if c != b'.' && c != b'[' && c != b'+' => {
                let pos = self.cursor.position();
                while matches!(self.cursor.peek(), Some(c) if c != b'.' && c != b'[' && c != b'+')
                {
                    self.cursor.take();
                }
                self.state = State::AfterElement;
                Token::new(PathKind::Key, pos, self.cursor.emit())
            }
            _ => self.error(),
        }
    }

    fn lex_digits(&mut self) -> Option<&'a [u8]> {
        if !matches!(self.cursor.peek(), Some(c) if c.is_ascii_digit()) {
            return None;
        }
        while matches!(self.cursor.peek(), Some(c) if c.is_ascii_digit()) {
            self.cursor.take();
        }
        Some(self.cursor.emit())
    }

    fn step_array_index_start(&mut self) -> PathToken<'a> {
        if self.cursor.peek() == Some(b'*') {
            let tok = self.single(PathKind::Wildcard);
            self.state = State::ArrayClose;
            return tok;
        }
        let pos = self.cursor.position();
        match self.lex_digits() {
            Some(digits) => {
                self.state = State::ArrayAfterIndex;
                Token::new(PathKind::Index, pos, digits)
            }
            None => self.error(),
        }
    }

    fn step_array_after_index(&mut self) -> PathToken<'a> {
        match self.cursor.peek() {
            Some(b':') => {
                let tok = self.single(PathKind::Colon);
                self.state = State::ArrayIndexSecond;
                tok
            }
            Some(b']') => {
                let tok = self.single(PathKind::BracketRight);
                self.state = State::AfterElement;
                tok
            }
            _ => self.error(),
        }
    }

    fn step_array_index_second(&mut self) -> PathToken<'a> {
        let pos = self.cursor.position();
        match self.lex_digits() {
            Some(digits) => {
                self.state = State::ArrayClose;
                Token::new(PathKind::Index, pos, digits)
            }
            None => self.error(),
        }
    }

    fn step_array_close(&mut self) -> PathToken<'a> {
        match self.cursor.peek() {
            Some(b']') => {
                let tok = self.single(PathKind::BracketRight);
                self.state = State::AfterElement;
                tok
            }
            _ => self.error(),
        }
    }

    fn step_after_value(&mut self) -> PathToken<'a> {
        match self.cursor.peek() {
            None => self.eof_token(),
            _ => self.error(),
        }
    }
}
