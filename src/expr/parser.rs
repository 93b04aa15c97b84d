//! Shunting-yard: turns the infix token stream into postfix (RPN) order
//! for the stack evaluator in [`super::eval`].

use alloc::vec::Vec;

use super::lexer::{ExprKind, ExprLexer, ExprToken};
use crate::error::ExprError;

/// Binding power: higher binds tighter. `!` is unary and right-associative;
/// everything else here is left-associative.
fn precedence(kind: ExprKind) -> Option<u8> {
    match kind {
        ExprKind::And | ExprKind::Or => Some(1),
        ExprKind::Eq | ExprKind::Neq => Some(2),
        ExprKind::Lt | ExprKind::Le | ExprKind::Gt | ExprKind::Ge => Some(3),
        ExprKind::Plus | ExprKind::Minus => Some(4),
        ExprKind::Star | ExprKind::Slash | ExprKind::Percent => Some(5),
        ExprKind::Caret => Some(6),
        ExprKind::Not => Some(7),
        _ => None,
    }
}

fn is_right_associative(kind: ExprKind) -> bool {
    matches!(kind, ExprKind::Not | ExprKind::Caret)
}

pub(crate) fn to_postfix<'a>(text: &'a [u8]) -> Result<Vec<ExprToken<'a>>, ExprError> {
    let mut lexer = ExprLexer::new(text);
    let mut output = Vec::new();
    let mut operators: Vec<ExprToken<'a>> = Vec::new();
    let mut paren_depth: i32 = 0;

    loop {
        let tok = lexer.next_token().ok_or(ExprError::BadExpression)?;
        match tok.kind {
            ExprKind::Eof => break,
            ExprKind::Error => {
                return Err(ExprError::Lex(crate::error::LexError::new(
                    tok.pos,
                    "malformed expression token",
                )))
            }
            ExprKind::Number | ExprKind::PathRef | ExprKind::Bool | ExprKind::Null | ExprKind::Str => {
                output.push(tok);
            }
            ExprKind::LParen => {
                paren_depth += 1;
                operators.push(tok);
            }
            ExprKind::RParen => {
                paren_depth -= 1;
                if paren_depth < 0 {
                    return Err(ExprError::MismatchedParens);
                }
                loop {
                    match operators.pop() {
                        Some(op) if op.kind == ExprKind::LParen => break,
                        Some(op) => output.push(op),
                        None => return Err(ExprError::MismatchedParens),
                    }
                }
            }
            _ => {
                let prec = precedence(tok.kind).ok_or(ExprError::BadExpression)?;
                while let Some(top) = operators.last() {
                    if top.kind == ExprKind::LParen {
                        break;
                    }
                    let top_prec = precedence(top.kind).ok_or(ExprError::BadExpression)?;
                    let pop = if is_right_associative(tok.kind) {
                        top_prec > prec
                    } else {
                        top_prec >= prec
                    };
                    if !pop {
                        break;
                    }
                    output.push(operators.pop().expect("just peeked"));
                }
                operators.push(tok);
            }
        }
    }

    while let Some(op) = operators.pop() {
        if op.kind == ExprKind::LParen {
            return Err(ExprError::MismatchedParens);
        }
        output.push(op);
    }

    if paren_depth != 0 {
        return Err(ExprError::MismatchedParens);
    }

    Ok(output)
}
