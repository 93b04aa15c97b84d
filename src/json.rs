//! The JSON tokenizer (C2 driver + C3 grammar).
//!
//! A flat state machine, not a recursive-descent parser: nesting is tracked
//! in an explicit `containers` scratch stack rather than the call stack, so
//! that `next_token` can suspend between any two tokens and resume later.
//! This is the enum-and-dispatch redesign of the cooperative
//! state-machine-function style: one state variable, one stack, no
//! heap-allocated continuations.

use alloc::vec::Vec;

use crate::cursor::Cursor;
use crate::token::{JsonKind, JsonToken};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ContainerKind {
    Object,
    Array,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Root,
    ObjectAfterOpen,
    ObjectColon,
    ObjectValue,
    ObjectAfterValue,
    ArrayAfterOpen,
    ArrayAfterValue,
    RootEnd,
    Done,
}

enum ValueStart<B> {
    Literal(JsonToken<B>),
    OpenObject(JsonToken<B>),
    OpenArray(JsonToken<B>),
}

/// Pull-based JSON tokenizer: one call to [`JsonLexer::next_token`] returns
/// exactly one token, or `None` once an `Eof`/`Error` token has already been
/// handed back.
pub struct JsonLexer<C: Cursor> {
    cursor: C,
    state: State,
    containers: Vec<ContainerKind>,
    finished: bool,
}

impl<C: Cursor> JsonLexer<C> {
    pub fn new(cursor: C) -> Self {
        Self {
            cursor,
            state: State::Root,
            containers: Vec::new(),
            finished: false,
        }
    }

    pub fn next_token(&mut self) -> Option<JsonToken<C::Bytes>> {
        if self.finished {
            return None;
        }
        self.cursor.skip_whitespace();
        let tok = match self.state {
            State::Root => self.step_root(),
            State::ObjectAfterOpen => self.step_object_after_open(),
            State::ObjectColon => self.step_object_colon(),
            State::ObjectValue => self.step_object_value(),
            State::ObjectAfterValue => self.step_object_after_value(),
            State::ArrayAfterOpen => self.step_array_after_open(),
            State::ArrayAfterValue => self.step_array_after_value(),
            State::RootEnd => self.step_root_end(),
            State::Done => unreachable!("finished flag guards Done"),
        };
        if matches!(tok.kind, JsonKind::Eof | JsonKind::Error) {
            self.finished = true;
        }
        log::trace!("json::next_token: emitted {:?} at byte {}", tok.kind, tok.pos);
        Some(tok)
    }

    fn error(&mut self, message: &str) -> JsonToken<C::Bytes> {
        let pos = self.cursor.position();
        self.state = State::Done;
        log::debug!("json lex error at byte {pos}: {message}");
        JsonToken::new(JsonKind::Error, pos, self.cursor.emit())
    }

    fn single(&mut self, kind: JsonKind) -> JsonToken<C::Bytes> {
        let pos = self.cursor.position();
        self.cursor.take();
        JsonToken::new(kind, pos, self.cursor.emit())
    }

    fn step_root(&mut self) -> JsonToken<C::Bytes> {
        match self.cursor.peek() {
            Some(b'{') => {
                let tok = self.single(JsonKind::LBrace);
                self.containers.push(ContainerKind::Object);
                self.state = State::ObjectAfterOpen;
                tok
            }
            Some(b'[') => {
                let tok = self.single(JsonKind::LBracket);
                self.containers.push(ContainerKind::Array);
                self.state = State::ArrayAfterOpen;
                tok
            }
            _ => self.error("expected '{' or '[' at document root"),
        }
    }

    fn step_object_after_open(&mut self) -> JsonToken<C::Bytes> {
        match self.cursor.peek() {
            Some(b'"') => match self.lex_quoted() {
                Ok(tok) => {
                    self.state = State::ObjectColon;
                    JsonToken::new(JsonKind::Key, tok.0, tok.1)
                }
                Err(_) => self.error("unterminated key string"),
            },
            Some(b'}') => {
                let tok = self.single(JsonKind::RBrace);
                self.state = self.pop_container();
                tok
            }
            _ => self.error("expected object key or '}'"),
        }
    }

    fn step_object_colon(&mut self) -> JsonToken<C::Bytes> {
        match self.cursor.peek() {
            Some(b':') => {
                let tok = self.single(JsonKind::Colon);
                self.state = State::ObjectValue;
                tok
            }
            _ => self.error("expected ':'"),
        }
    }

    fn step_object_value(&mut self) -> JsonToken<C::Bytes> {
        match self.lex_value_start() {
            Ok(ValueStart::Literal(tok)) => {
                self.state = State::ObjectAfterValue;
                tok
            }
            Ok(ValueStart::OpenObject(tok)) => {
                self.containers.push(ContainerKind::Object);
                self.state = State::ObjectAfterOpen;
                tok
            }
            Ok(ValueStart::OpenArray(tok)) => {
                self.containers.push(ContainerKind::Array);
                self.state = State::ArrayAfterOpen;
                tok
            }
            Err(msg) => self.error(msg),
        }
    }

    fn step_object_after_value(&mut self) -> JsonToken<C::Bytes> {
        match self.cursor.peek() {
            Some(b',') => {
                let tok = self.single(JsonKind::Comma);
                self.state = State::ObjectAfterOpen;
                tok
            }
            Some(b'}') => {
                let tok = self.single(JsonKind::RBrace);
                self.state = self.pop_container();
                tok
            }
            _ => self.error("expected ',' or '}'"),
        }
    }

    fn step_array_after_open(&mut self) -> JsonToken<C::Bytes> {
        match self.cursor.peek() {
            Some(b']') => {
                let tok = self.single(JsonKind::RBracket);
                self.state = self.pop_container();
                tok
            }
            _ => match self.lex_value_start() {
                Ok(ValueStart::Literal(tok)) => {
                    self.state = State::ArrayAfterValue;
                    tok
                }
                Ok(ValueStart::OpenObject(tok)) => {
                    self.containers.push(ContainerKind::Object);
                    self.state = State::ObjectAfterOpen;
                    tok
                }
                Ok(ValueStart::OpenArray(tok)) => {
                    self.containers.push(ContainerKind::Array);
                    self.state = State::ArrayAfterOpen;
                    tok
                }
                Err(msg) => self.error(msg),
            },
        }
    }

    fn step_array_after_value(&mut self) -> JsonToken<C::Bytes> {
        match self.cursor.peek() {
            Some(b',') => {
                let tok = self.single(JsonKind::Comma);
                self.state = State::ArrayAfterOpen;
                tok
            }
            Some(b']') => {
                let tok = self.single(JsonKind::RBracket);
                self.state = self.pop_container();
                tok
            }
            _ => self.error("expected ',' or ']'"),
        }
    }

    fn step_root_end(&mut self) -> JsonToken<C::Bytes> {
        match self.cursor.peek() {
            None => {
                let pos = self.cursor.position();
                JsonToken::new(JsonKind::Eof, pos, self.cursor.emit())
            }
            _ => self.error("unexpected trailing data after root value"),
        }
    }

    fn pop_container(&mut self) -> State {
        self.containers.pop();
        match self.containers.last() {
            None => State::RootEnd,
            Some(ContainerKind::Object) => State::ObjectAfterValue,
            Some(ContainerKind::Array) => State::ArrayAfterValue,
        }
    }

    fn lex_value_start(&mut self) -> Result<ValueStart<C::Bytes>, &'static str> {
        let pos = self.cursor.position();
        match self.cursor.peek() {
            Some(b'"') => {
                let (pos, bytes) = self.lex_quoted().map_err(|_| "unterminated string")?;
                Ok(ValueStart::Literal(JsonToken::new(JsonKind::Str, pos, bytes)))
            }
            Some(c) if c == b'-' || c.is_ascii_digit() => {
                self.lex_number().map(|bytes| ValueStart::Literal(JsonToken::new(JsonKind::Num, pos, bytes)))
            }
            Some(b't') => self
                .expect_literal(b"true")
                .map(|bytes| ValueStart::Literal(JsonToken::new(JsonKind::True, pos, bytes))),
            Some(b'f') => self
                .expect_literal(b"false")
                .map(|bytes| ValueStart::Literal(JsonToken::new(JsonKind::False, pos, bytes))),
            Some(b'n') => self
                .expect_literal(b"null")
                .map(|bytes| ValueStart::Literal(JsonToken::new(JsonKind::Null, pos, bytes))),
            Some(b'{') => {
                self.cursor.take();
                Ok(ValueStart::OpenObject(JsonToken::new(JsonKind::LBrace, pos, self.cursor.emit())))
            }
            Some(b'[') => {
                self.cursor.take();
                Ok(ValueStart::OpenArray(JsonToken::new(JsonKind::LBracket, pos, self.cursor.emit())))
            }
            _ => Err("expected a value"),
        }
    }

    /// Lexes a quoted string (escapes consume the following byte
    /// unconditionally). Returns the starting position and the emitted
    /// bytes, quotes included.
    fn lex_quoted(&mut self) -> Result<(usize, C::Bytes), ()> {
        let pos = self.cursor.position();
        self.cursor.take(); // opening quote
        loop {
            match self.cursor.take() {
                None => return Err(()),
                Some(b'\\') => {
                    if self.cursor.take().is_none() {
                        return Err(());
                    }
                }
                Some(b'"') => break,
                Some(_) => {}
            }
        }
        Ok((pos, self.cursor.emit()))
    }

    fn lex_number(&mut self) -> Result<C::Bytes, &'static str> {
        if self.cursor.peek() == Some(b'-') {
            self.cursor.take();
        }
        if !matches!(self.cursor.peek(), Some(c) if c.is_ascii_digit()) {
            return Err("expected digit after '-'");
        }
        while matches!(self.cursor.peek(), Some(c) if c.is_ascii_digit()) {
            self.cursor.take();
        }
        if self.cursor.peek() == Some(b'.') {
            self.cursor.take();
            if !matches!(self.cursor.peek(), Some(c) if c.is_ascii_digit()) {
                return Err("expected digit after '.'");
            }
            while matches!(self.cursor.peek(), Some(c) if c.is_ascii_digit()) {
                self.cursor.take();
            }
        }
        if matches!(self.cursor.peek(), Some(b'e' | b'E')) {
            self.cursor.take();
            if matches!(self.cursor.peek(), Some(b'+' | b'-')) {
                self.cursor.take();
            }
            if !matches!(self.cursor.peek(), Some(c) if c.is_ascii_digit()) {
                return Err("expected digit in exponent");
            }
            while matches!(self.cursor.peek(), Some(c) if c.is_ascii_digit()) {
                self.cursor.take();
            }
        }
        Ok(self.cursor.emit())
    }

    fn expect_literal(&mut self, literal: &'static [u8]) -> Result<C::Bytes, &'static str> {
        for &want in literal {
            match self.cursor.take() {
                Some(got) if got == want => {}
                _ => return Err("malformed literal"),
            }
        }
        Ok(self.cursor.emit())
    }
}
