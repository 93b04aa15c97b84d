//! Error types for every stage of the pipeline: lexing, path compilation,
//! expression evaluation, and structural evaluation.

use alloc::string::String;
use core::fmt;

/// Byte offset into whichever input produced the error.
pub type BytePos = usize;

/// A lexing failure, shared by the JSON, path, and expression tokenizers.
///
/// Surfaced to callers as a sentinel error token carrying this message and
/// position, per the wire form in the specification's error handling design.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    pub pos: BytePos,
    pub message: String,
}

impl LexError {
    pub(crate) fn new(pos: BytePos, message: impl Into<String>) -> Self {
        Self {
            pos,
            message: message.into(),
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (at byte {})", self.message, self.pos)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LexError {}

/// Failure compiling a path expression string into a [`crate::path::CompiledPath`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathCompileError {
    Lex(LexError),
    MissingRoot,
    UnexpectedToken { expected: &'static str, pos: BytePos },
    UnclosedBracket { pos: BytePos },
    ValueNotTerminal { pos: BytePos },
}

impl fmt::Display for PathCompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lex(e) => write!(f, "malformed path: {e}"),
            Self::MissingRoot => write!(f, "path must start with '$'"),
            Self::UnexpectedToken { expected, pos } => {
                write!(f, "expected {expected} (at byte {pos})")
            }
            Self::UnclosedBracket { pos } => write!(f, "unclosed '[' (opened at byte {pos})"),
            Self::ValueNotTerminal { pos } => {
                write!(f, "'+' must be the last step in a path (at byte {pos})")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PathCompileError {}

/// Failure compiling or evaluating a predicate expression (the C5 sub-language).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExprError {
    Lex(LexError),
    MismatchedParens,
    BadExpression,
    FinalValueNotBool,
    NotEnoughOperands(&'static str),
    BadOperandType {
        expected: &'static str,
        op: &'static str,
    },
    BadValueForType {
        value: String,
        type_name: &'static str,
    },
    ValueNotFound(String),
    ValuesCannotBeCompared,
    PathValueBadType,
    DivideByZero,
}

impl fmt::Display for ExprError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lex(e) => write!(f, "malformed expression: {e}"),
            Self::MismatchedParens => write!(f, "mismatched parentheses"),
            Self::BadExpression => write!(f, "bad expression"),
            Self::FinalValueNotBool => write!(f, "expression evaluated to a non-bool"),
            Self::NotEnoughOperands(op) => write!(f, "not enough operands for operation {op:?}"),
            Self::BadOperandType { expected, op } => {
                write!(f, "operand type expected to be {expected:?} for operation {op:?}")
            }
            Self::BadValueForType { value, type_name } => {
                write!(f, "bad value {value:?} for type {type_name:?}")
            }
            Self::ValueNotFound(path) => write!(f, "value not found for path reference {path:?}"),
            Self::ValuesCannotBeCompared => write!(f, "values cannot be compared"),
            Self::PathValueBadType => write!(f, "value found at end of path cannot be compared"),
            Self::DivideByZero => write!(f, "cannot divide by zero"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ExprError {}

/// Fatal failure during structural evaluation of the JSON document (C7/C8).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    Lex(LexError),
    UnexpectedToken { expected: &'static str, pos: BytePos },
    BadStructure { pos: BytePos },
}

impl EvalError {
    pub(crate) fn unexpected(expected: &'static str, pos: BytePos) -> Self {
        Self::UnexpectedToken { expected, pos }
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lex(e) => write!(f, "{e}"),
            Self::UnexpectedToken { expected, pos } => {
                write!(f, "expected {expected} (at byte {pos})")
            }
            Self::BadStructure { pos } => write!(f, "unexpected trailing data (at byte {pos})"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EvalError {}
