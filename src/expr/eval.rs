//! Postfix (RPN) evaluator over a small tagged value stack.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use super::lexer::ExprKind;
use super::parser::to_postfix;
use crate::error::ExprError;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Float(f64),
    Bytes(Vec<u8>),
    Null,
}

/// A value resolved for a `$`/`@` path reference used inside an expression.
/// Kept decoupled from the JSON/path machinery so this module stands alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathValueKind {
    Null,
    Bool,
    Number,
    Str,
    Other,
}

#[derive(Debug, Clone)]
pub struct PathValue {
    pub kind: PathValueKind,
    pub bytes: Vec<u8>,
}

/// Looks up the resolved value for a path-reference token's raw text
/// (e.g. `@.age`), returning `None` if it has no bound value.
pub trait PathValues {
    fn resolve(&self, path_ref: &[u8]) -> Option<PathValue>;
}

pub fn evaluate(text: &str, values: &impl PathValues) -> Result<bool, ExprError> {
    let postfix = to_postfix(text.as_bytes())?;
    let mut stack: Vec<Value> = Vec::new();

    for tok in &postfix {
        match tok.kind {
            ExprKind::Number => {
                let s = core::str::from_utf8(tok.value).map_err(|_| ExprError::BadExpression)?;
                let f: f64 = s.parse().map_err(|_| ExprError::BadValueForType {
                    value: s.to_string(),
                    type_name: "number",
                })?;
                stack.push(Value::Float(f));
            }
            ExprKind::Bool => {
                stack.push(Value::Bool(tok.value == b"true"));
            }
            ExprKind::Null => stack.push(Value::Null),
            ExprKind::Str => {
                let inner = &tok.value[1..tok.value.len() - 1];
                stack.push(Value::Bytes(inner.to_vec()));
            }
            ExprKind::PathRef => {
                let resolved = values
                    .resolve(tok.value)
                    .ok_or_else(|| ExprError::ValueNotFound(lossy(tok.value)))?;
                stack.push(path_value_to_value(resolved)?);
            }
            ExprKind::Not => {
                let a = pop_bool(&mut stack, "!")?;
                stack.push(Value::Bool(!a));
            }
            ExprKind::And => {
                let b = pop_bool(&mut stack, "&&")?;
                let a = pop_bool(&mut stack, "&&")?;
                stack.push(Value::Bool(a && b));
            }
            ExprKind::Or => {
                let b = pop_bool(&mut stack, "||")?;
                let a = pop_bool(&mut stack, "||")?;
                stack.push(Value::Bool(a || b));
            }
            ExprKind::Eq => {
                let (a, b) = pop_pair(&mut stack, "==")?;
                stack.push(Value::Bool(values_equal(&a, &b)?));
            }
            ExprKind::Neq => {
                let (a, b) = pop_pair(&mut stack, "!=")?;
                stack.push(Value::Bool(!values_equal(&a, &b)?));
            }
            ExprKind::Lt | ExprKind::Le | ExprKind::Gt | ExprKind::Ge => {
                let (a, b) = pop_float_pair(&mut stack, cmp_name(tok.kind))?;
                let result = match tok.kind {
                    ExprKind::Lt => a < b,
                    ExprKind::Le => a <= b,
                    ExprKind::Gt => a > b,
                    ExprKind::Ge => a >= b,
                    _ => unreachable!(),
                };
                stack.push(Value::Bool(result));
            }
            ExprKind::Plus => {
                let (a, b) = pop_float_pair(&mut stack, "+")?;
                stack.push(Value::Float(a + b));
            }
            ExprKind::Minus => {
                let (a, b) = pop_float_pair(&mut stack, "-")?;
                stack.push(Value::Float(a - b));
            }
            ExprKind::Star => {
                let (a, b) = pop_float_pair(&mut stack, "*")?;
                if b == 0.0 {
                    return Err(ExprError::DivideByZero);
                }
                stack.push(Value::Float(a * b));
            }
            ExprKind::Slash => {
                let (a, b) = pop_float_pair(&mut stack, "/")?;
                if b == 0.0 {
                    return Err(ExprError::DivideByZero);
                }
                stack.push(Value::Float(a / b));
            }
            ExprKind::Percent => {
                let (a, b) = pop_float_pair(&mut stack, "%")?;
                if b == 0.0 {
                    return Err(ExprError::DivideByZero);
                }
                stack.push(Value::Float(a % b));
            }
            ExprKind::Caret => {
                let (a, b) = pop_float_pair(&mut stack, "^")?;
                if b == 0.0 {
                    return Err(ExprError::DivideByZero);
                }
                stack.push(Value::Float(libm_powf(a, b)));
            }
            ExprKind::LParen | ExprKind::RParen | ExprKind::Eof | ExprKind::Error => {
                return Err(ExprError::BadExpression)
            }
        }
    }

    match stack.pop() {
        Some(Value::Bool(b)) if stack.is_empty() => Ok(b),
        Some(_) if stack.is_empty() => Err(ExprError::FinalValueNotBool),
        _ => Err(ExprError::BadExpression),
    }
}

fn cmp_name(kind: ExprKind) -> &'static str {
    match kind {
        ExprKind::Lt => "<",
        ExprKind::Le => "<=",
        ExprKind::Gt => ">",
        ExprKind::Ge => ">=",
        _ => "?",
    }
}

fn pop_bool(stack: &mut Vec<Value>, op: &'static str) -> Result<bool, ExprError> {
    match stack.pop() {
        Some(Value::Bool(b)) => Ok(b),
        Some(_) => Err(ExprError::BadOperandType {
            expected: "bool",
            op,
        }),
        None => Err(ExprError::NotEnoughOperands(op)),
    }
}

fn pop_pair(stack: &mut Vec<Value>, op: &'static str) -> Result<(Value, Value), ExprError> {
    let b = stack.pop().ok_or(ExprError::NotEnoughOperands(op))?;
    let a = stack.pop().ok_or(ExprError::NotEnoughOperands(op))?;
    Ok((a, b))
}

fn pop_float_pair(stack: &mut Vec<Value>, op: &'static str) -> Result<(f64, f64), ExprError> {
    let (a, b) = pop_pair(stack, op)?;
    let af = as_float(a, op)?;
    let bf = as_float(b, op)?;
    Ok((af, bf))
}

fn as_float(v: Value, op: &'static str) -> Result<f64, ExprError> {
    match v {
        Value::Float(f) => Ok(f),
        _ => Err(ExprError::BadOperandType {
            expected: "number",
            op,
        }),
    }
}

fn values_equal(a: &Value, b: &Value) -> Result<bool, ExprError> {
    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => Ok(x == y),
        (Value::Float(x), Value::Float(y)) => Ok(x == y),
        (Value::Bytes(x), Value::Bytes(y)) => Ok(x == y),
        (Value::Null, Value::Null) => Ok(true),
        _ => Err(ExprError::ValuesCannotBeCompared),
    }
}

fn path_value_to_value(v: PathValue) -> Result<Value, ExprError> {
    match v.kind {
        PathValueKind::Null => Ok(Value::Null),
        PathValueKind::Bool => Ok(Value::Bool(v.bytes == b"true")),
        PathValueKind::Number => {
            let s = core::str::from_utf8(&v.bytes).map_err(|_| ExprError::PathValueBadType)?;
            s.parse::<f64>()
                .map(Value::Float)
                .map_err(|_| ExprError::PathValueBadType)
        }
        PathValueKind::Str => {
            let inner = if v.bytes.len() >= 2 {
                v.bytes[1..v.bytes.len() - 1].to_vec()
            } else {
                v.bytes
            };
            Ok(Value::Bytes(inner))
        }
        PathValueKind::Other => Err(ExprError::PathValueBadType),
    }
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Minimal `powf` without pulling in `std::f64::powf` under `no_std`+`alloc`
/// builds: exponentiation by repeated squaring for integral exponents,
/// falling back to `std` for the general case when available.
#[cfg(feature = "std")]
fn libm_powf(base: f64, exp: f64) -> f64 {
    base.powf(exp)
}

#[cfg(not(feature = "std"))]
fn libm_powf(base: f64, exp: f64) -> f64 {
    if exp.fract() == 0.0 && exp.abs() < 64.0 {
        let mut result = 1.0f64;
        let mut e = exp.abs() as i64;
        let mut b = base;
        while e > 0 {
            if e & 1 == 1 {
                result *= b;
            }
            b *= b;
            e >>= 1;
        }
        if exp < 0.0 {
            1.0 / result
        } else {
            result
        }
    } else {
        f64::NAN
    }
}
