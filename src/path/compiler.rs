//! Path compiler (C6): folds the path token stream into a flat list of
//! [`Operator`]s plus a trailing capture flag.
//!
//! `Name` and the bracket-list form share one match rule (membership in a
//! byte-string set), so they are unified here into a single `Operator::Name`
//! carrying a set with one or more entries. Likewise a single index `[n]`
//! and a range `[lo:hi]` share one rule (`lo <= n < hi`), so both compile to
//! `Operator::Index`, a single index being the range `[n, n+1)`.

use alloc::collections::BTreeSet;
use alloc::vec::Vec;

use super::lexer::{PathKind, PathLexer};
use crate::error::PathCompileError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operator {
    Name(BTreeSet<Vec<u8>>),
    NameWild,
    Index { lo: u32, hi_excl: u32 },
    IndexWild,
}

/// A path expression compiled once, evaluated against many documents or
/// reused across an entire streamed evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledPath {
    pub operators: Vec<Operator>,
    pub capture_value: bool,
}

pub fn compile(path: &str) -> Result<CompiledPath, PathCompileError> {
    let mut lexer = PathLexer::new(path.as_bytes());
    let mut operators = Vec::new();
    let mut capture_value = false;

    match lexer.next_token() {
        Some(t) if t.kind == PathKind::Root => {}
        _ => return Err(PathCompileError::MissingRoot),
    }

    loop {
        let tok = lexer
            .next_token()
            .ok_or_else(|| PathCompileError::UnexpectedToken {
                expected: "a path step or end of input",
                pos: path.len(),
            })?;
        match tok.kind {
            PathKind::Eof => break,
            PathKind::Period => {
                let next = lexer.next_token().ok_or(PathCompileError::UnexpectedToken {
                    expected: "a key or '*' after '.'",
                    pos: tok.pos,
                })?;
                match next.kind {
                    PathKind::Key => {
                        let mut set = BTreeSet::new();
                        set.insert(next.value.to_vec());
                        operators.push(Operator::Name(set));
                    }
                    PathKind::Wildcard => operators.push(Operator::NameWild),
                    PathKind::Error => {
                        return Err(PathCompileError::UnexpectedToken {
                            expected: "a key or '*' after '.'",
                            pos: next.pos,
                        })
                    }
                    _ => {
                        return Err(PathCompileError::UnexpectedToken {
                            expected: "a key or '*' after '.'",
                            pos: next.pos,
                        })
                    }
                }
            }
            PathKind::BracketLeft => {
                let sub = lexer.next_token().ok_or(PathCompileError::UnclosedBracket { pos: tok.pos })?;
                if sub.kind == PathKind::Error {
                    return Err(PathCompileError::UnclosedBracket { pos: tok.pos });
                }
                match sub.kind {
                    PathKind::Wildcard => {
                        operators.push(Operator::IndexWild);
                        expect_bracket_right(&mut lexer, tok.pos)?;
                    }
                    PathKind::Index => {
                        let lo = parse_index(sub.value)?;
                        let after = lexer.next_token().ok_or(PathCompileError::UnclosedBracket { pos: tok.pos })?;
                        match after.kind {
                            PathKind::BracketRight => {
                                operators.push(Operator::Index { lo, hi_excl: lo.saturating_add(1) });
                            }
                            PathKind::Colon => {
                                let hi_tok = lexer.next_token().ok_or(PathCompileError::UnclosedBracket { pos: tok.pos })?;
                                if hi_tok.kind != PathKind::Index {
                                    return Err(PathCompileError::UnclosedBracket { pos: tok.pos });
                                }
                                let hi = parse_index(hi_tok.value)?;
                                operators.push(Operator::Index { lo, hi_excl: hi });
                                expect_bracket_right(&mut lexer, tok.pos)?;
                            }
                            _ => return Err(PathCompileError::UnclosedBracket { pos: tok.pos }),
                        }
                    }
                    _ => {
                        return Err(PathCompileError::UnexpectedToken {
                            expected: "an integer or '*' inside '['",
                            pos: sub.pos,
                        })
                    }
                }
            }
            PathKind::Value => {
                capture_value = true;
                let after = lexer.next_token().ok_or(PathCompileError::UnexpectedToken {
                    expected: "end of input after '+'",
                    pos: tok.pos,
                })?;
                if after.kind != PathKind::Eof {
                    return Err(PathCompileError::ValueNotTerminal { pos: after.pos });
                }
                break;
            }
            PathKind::Error => {
                return Err(PathCompileError::UnexpectedToken {
                    expected: "a valid path step",
                    pos: tok.pos,
                })
            }
            _ => {
                return Err(PathCompileError::UnexpectedToken {
                    expected: "'.', '[', or '+'",
                    pos: tok.pos,
                })
            }
        }
    }

    Ok(CompiledPath {
        operators,
        capture_value,
    })
}

fn expect_bracket_right(lexer: &mut PathLexer<'_>, open_pos: usize) -> Result<(), PathCompileError> {
    match lexer.next_token() {
        Some(t) if t.kind == PathKind::BracketRight => Ok(()),
        _ => Err(PathCompileError::UnclosedBracket { pos: open_pos }),
    }
}

fn parse_index(digits: &[u8]) -> Result<u32, PathCompileError> {
    let s = core::str::from_utf8(digits).map_err(|_| PathCompileError::UnexpectedToken {
        expected: "an integer",
        pos: 0,
    })?;
    s.parse::<u32>().map_err(|_| PathCompileError::UnexpectedToken {
        expected: "an integer that fits in 32 bits",
        pos: 0,
    })
}
