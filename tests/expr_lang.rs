//! Predicate expression sub-language coverage, including scenario 6 from
//! the testable-properties section.

use jsonpath_stream::error::ExprError;
use jsonpath_stream::expr::{evaluate, PathValue, PathValueKind, PathValues};

struct NoValues;
impl PathValues for NoValues {
    fn resolve(&self, _path_ref: &[u8]) -> Option<PathValue> {
        None
    }
}

struct Fixed(Vec<(&'static str, PathValue)>);
impl PathValues for Fixed {
    fn resolve(&self, path_ref: &[u8]) -> Option<PathValue> {
        self.0
            .iter()
            .find(|(k, _)| k.as_bytes() == path_ref)
            .map(|(_, v)| v.clone())
    }
}

#[test]
fn scenario_6_arithmetic_and_comparison() {
    assert_eq!(evaluate("20 + 7 == 27", &NoValues), Ok(true));
}

#[test]
fn scenario_6_type_mismatch_cannot_compare() {
    let values = Fixed(vec![
        (
            "@a",
            PathValue {
                kind: PathValueKind::Str,
                bytes: br#""one""#.to_vec(),
            },
        ),
        (
            "@b",
            PathValue {
                kind: PathValueKind::Number,
                bytes: b"3.4".to_vec(),
            },
        ),
    ]);
    assert_eq!(
        evaluate("@a == @b", &values),
        Err(ExprError::ValuesCannotBeCompared)
    );
}

#[test]
fn logical_operators_and_precedence() {
    assert_eq!(evaluate("true && false || true", &NoValues), Ok(true));
    assert_eq!(evaluate("!false && true", &NoValues), Ok(true));
}

#[test]
fn logical_operators_are_left_associative_same_tier() {
    // && and || share one precedence tier, so this reads as
    // (true || false) && false, not true || (false && false).
    assert_eq!(evaluate("true || false && false", &NoValues), Ok(false));
}

#[test]
fn parenthesized_grouping_overrides_precedence() {
    assert_eq!(evaluate("(1 + 2) * 3 == 9", &NoValues), Ok(true));
}

#[test]
fn divide_and_multiply_by_zero_are_errors() {
    assert_eq!(evaluate("1 / 0 == 0", &NoValues), Err(ExprError::DivideByZero));
    assert_eq!(evaluate("1 * 0 == 0", &NoValues), Err(ExprError::DivideByZero));
}

#[test]
fn mismatched_parens_are_rejected() {
    assert_eq!(evaluate("(1 + 2", &NoValues), Err(ExprError::MismatchedParens));
    assert_eq!(evaluate("1 + 2)", &NoValues), Err(ExprError::MismatchedParens));
}

#[test]
fn non_bool_result_is_rejected() {
    assert_eq!(evaluate("1 + 2", &NoValues), Err(ExprError::FinalValueNotBool));
}

#[test]
fn path_reference_resolves_into_comparison() {
    let values = Fixed(vec![(
        "@.age",
        PathValue {
            kind: PathValueKind::Number,
            bytes: b"42".to_vec(),
        },
    )]);
    assert_eq!(evaluate("@.age == 42", &values), Ok(true));
}

#[test]
fn unresolved_path_reference_is_an_error() {
    assert_eq!(
        evaluate("@.missing == 1", &NoValues),
        Err(ExprError::ValueNotFound("@.missing".to_string()))
    );
}

#[test]
fn null_equality() {
    assert_eq!(evaluate("null == null", &NoValues), Ok(true));
}
