//! Structural evaluator (C7) and the pull-based result driver (C9).
//!
//! Walks the token stream once, maintaining a location stack and a
//! per-array previous-index counter stack, and feeds every token to each
//! live [`QueryState`] after updating that stack. No tree is ever built:
//! the only state carried between tokens is these small stacks plus each
//! query's own match progress.

use alloc::collections::VecDeque;
use alloc::vec::Vec;

use crate::cursor::Cursor;
use crate::error::EvalError;
use crate::eval::location::{ContainerKind, LocStep, Location};
use crate::eval::query::QueryState;
use crate::eval::result::MatchResult;
use crate::json::JsonLexer;
use crate::path::CompiledPath;
use crate::token::JsonKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Root,
    ObjectAfterOpen,
    ObjectColon,
    ObjectValue,
    ObjectAfterValue,
    ArrayAfterOpen,
    ArrayValue,
    ArrayAfterValue,
    RootEnd,
    Done,
}

/// Drives a single pass over a JSON document, pulling one [`MatchResult`]
/// at a time out of however many compiled paths were registered.
pub struct Evaluator<C: Cursor> {
    lexer: JsonLexer<C>,
    state: State,
    depth_stack: Vec<ContainerKind>,
    location: Location,
    prev_index_stack: Vec<i64>,
    pending_key: Option<Vec<u8>>,
    queries: Vec<QueryState>,
    results: VecDeque<MatchResult>,
    error: Option<EvalError>,
    done: bool,
}

impl<C: Cursor> Evaluator<C> {
    pub(crate) fn new(cursor: C, paths: Vec<CompiledPath>) -> Self {
        Self {
            lexer: JsonLexer::new(cursor),
            state: State::Root,
            depth_stack: Vec::new(),
            location: Location::new(),
            prev_index_stack: Vec::new(),
            pending_key: None,
            queries: paths.into_iter().map(QueryState::new).collect(),
            results: VecDeque::new(),
            error: None,
            done: false,
        }
    }

    /// The fatal error that stopped evaluation, if any. Once set, `next`
    /// will keep returning `None` and any partially captured values for
    /// in-flight queries are discarded.
    pub fn error(&self) -> Option<&EvalError> {
        self.error.as_ref()
    }

    /// Pull the next matched value, or `None` once the document is
    /// exhausted or a fatal error stopped evaluation early.
    pub fn next(&mut self) -> Option<MatchResult> {
        loop {
            if let Some(r) = self.results.pop_front() {
                return Some(r);
            }
            if self.done {
                return None;
            }
            self.pump();
        }
    }

    fn pump(&mut self) {
        let token = match self.lexer.next_token() {
            None => {
                self.done = true;
                return;
            }
            Some(t) => t,
        };

        if token.kind == JsonKind::Error {
            self.error = Some(EvalError::Lex(crate::error::LexError::new(
                token.pos,
                "malformed JSON input",
            )));
            self.done = true;
            return;
        }

        if let Err(e) = self.step(token.kind, token.pos, &token.value) {
            log::debug!("structural evaluation stopped: {e}");
            self.error = Some(e);
            self.done = true;
            return;
        }

        for q in &mut self.queries {
            if let Some(result) = q.on_token(&self.location, token.kind, &token.value) {
                self.results.push_back(result);
            }
        }

        if self.state == State::Done {
            self.done = true;
        }
    }

    fn step(&mut self, kind: JsonKind, pos: usize, value: &[u8]) -> Result<(), EvalError> {
        match self.state {
            State::Root => match kind {
                JsonKind::LBrace => {
                    self.depth_stack.push(ContainerKind::Object);
                    self.state = State::ObjectAfterOpen;
                }
                JsonKind::LBracket => {
                    self.depth_stack.push(ContainerKind::Array);
                    self.prev_index_stack.push(-1);
                    self.state = State::ArrayAfterOpen;
                }
                _ => return Err(EvalError::unexpected("'{' or '['", pos)),
            },
            State::ObjectAfterOpen => match kind {
                JsonKind::Key => {
                    // Key token value includes its surrounding quotes; strip them.
                    self.record_key(value);
                    self.state = State::ObjectColon;
                }
                JsonKind::RBrace => self.pop_right(),
                _ => return Err(EvalError::unexpected("an object key or '}'", pos)),
            },
            State::ObjectColon => match kind {
                JsonKind::Colon => self.state = State::ObjectValue,
                _ => return Err(EvalError::unexpected("':'", pos)),
            },
            State::ObjectValue => {
                let key = self.pending_key.take().unwrap_or_default();
                self.location.push(LocStep::Key(key));
                self.dispatch_value(kind, pos, State::ObjectAfterValue)?;
            }
            State::ObjectAfterValue => {
                self.location.pop();
                match kind {
                    JsonKind::Comma => self.state = State::ObjectAfterOpen,
                    JsonKind::RBrace => self.pop_right(),
                    _ => return Err(EvalError::unexpected("',' or '}'", pos)),
                }
            }
            State::ArrayAfterOpen => match kind {
                JsonKind::RBracket => self.pop_right(),
                _ => self.array_value(kind, pos)?,
            },
            State::ArrayValue => self.array_value(kind, pos)?,
            State::ArrayAfterValue => match kind {
                JsonKind::Comma => {
                    self.location.pop();
                    self.state = State::ArrayValue;
                }
                JsonKind::RBracket => {
                    self.location.pop();
                    self.pop_right();
                }
                _ => return Err(EvalError::unexpected("',' or ']'", pos)),
            },
            State::RootEnd => match kind {
                JsonKind::Eof => self.state = State::Done,
                _ => return Err(EvalError::BadStructure { pos }),
            },
            State::Done => {}
        }
        Ok(())
    }

    /// Records a pending object key's raw bytes, stripped of quotes.
    fn record_key(&mut self, raw_with_quotes: &[u8]) {
        let stripped = if raw_with_quotes.len() >= 2 {
            &raw_with_quotes[1..raw_with_quotes.len() - 1]
        } else {
            raw_with_quotes
        };
        self.pending_key = Some(stripped.to_vec());
    }

    fn dispatch_value(&mut self, kind: JsonKind, pos: usize, leaf_next: State) -> Result<(), EvalError> {
        match kind {
            JsonKind::LBrace => {
                self.depth_stack.push(ContainerKind::Object);
                self.state = State::ObjectAfterOpen;
            }
            JsonKind::LBracket => {
                self.depth_stack.push(ContainerKind::Array);
                self.prev_index_stack.push(-1);
                self.state = State::ArrayAfterOpen;
            }
            JsonKind::Str | JsonKind::Num | JsonKind::True | JsonKind::False | JsonKind::Null => {
                self.state = leaf_next;
            }
            _ => return Err(EvalError::unexpected("a value", pos)),
        }
        Ok(())
    }

    fn array_value(&mut self, kind: JsonKind, pos: usize) -> Result<(), EvalError> {
        let slot = self
            .prev_index_stack
            .last_mut()
            .expect("array_value only runs inside an array");
        *slot += 1;
        let idx = *slot as u32;
        self.location.push(LocStep::Index(idx));
        self.dispatch_value(kind, pos, State::ArrayAfterValue)
    }

    fn pop_right(&mut self) {
        let closed = self.depth_stack.pop();
        if closed == Some(ContainerKind::Array) {
            self.prev_index_stack.pop();
        }
        self.state = match self.depth_stack.last() {
            None => State::RootEnd,
            Some(ContainerKind::Object) => State::ObjectAfterValue,
            Some(ContainerKind::Array) => State::ArrayAfterValue,
        };
    }
}
