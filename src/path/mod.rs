//! Path expression grammar: lexing (C4) and compiling (C6) `$.foo[*]+`
//! style path strings into [`CompiledPath`]s the evaluator matches against.

mod compiler;
mod lexer;

pub use compiler::{compile, CompiledPath, Operator};
pub use lexer::{PathKind, PathLexer, PathToken};
