//! Predicate expression sub-language (C5): a standalone infix
//! arithmetic/comparison/logic evaluator over literals and path
//! references, exposed for callers to combine with path matching — the
//! external path grammar defines no filter-step syntax that wires this in
//! automatically.

mod eval;
mod lexer;
mod parser;

pub use eval::{evaluate, PathValue, PathValueKind, PathValues, Value};
pub use lexer::{ExprKind, ExprLexer, ExprToken};
