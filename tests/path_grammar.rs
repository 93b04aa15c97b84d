//! Path lexer/compiler coverage beyond the end-to-end scenarios.

use jsonpath_stream::error::PathCompileError;
use jsonpath_stream::path::{compile, Operator};

fn names(op: &Operator) -> Vec<&[u8]> {
    match op {
        Operator::Name(set) => set.iter().map(|v| v.as_slice()).collect(),
        _ => panic!("not a Name operator: {op:?}"),
    }
}

#[test]
fn root_only_path_has_no_operators() {
    let compiled = compile("$").unwrap();
    assert!(compiled.operators.is_empty());
    assert!(!compiled.capture_value);
}

#[test]
fn root_capture_everything() {
    let compiled = compile("$+").unwrap();
    assert!(compiled.operators.is_empty());
    assert!(compiled.capture_value);
}

#[test]
fn dotted_key_step() {
    let compiled = compile("$.foo+").unwrap();
    assert_eq!(compiled.operators.len(), 1);
    assert_eq!(names(&compiled.operators[0]), vec![b"foo".as_slice()]);
}

#[test]
fn quoted_key_with_escaped_quote() {
    let compiled = compile(r#"$."a\"b"+"#).unwrap();
    assert_eq!(names(&compiled.operators[0]), vec![br#"a\"b"#.as_slice()]);
}

#[test]
fn wildcard_key_step() {
    let compiled = compile("$.*+").unwrap();
    assert!(matches!(compiled.operators[0], Operator::NameWild));
}

#[test]
fn single_index_is_unit_range() {
    let compiled = compile("$[5]+").unwrap();
    match compiled.operators[0] {
        Operator::Index { lo, hi_excl } => assert_eq!((lo, hi_excl), (5, 6)),
        _ => panic!("expected Index"),
    }
}

#[test]
fn index_range_is_half_open() {
    let compiled = compile("$[1:3]+").unwrap();
    match compiled.operators[0] {
        Operator::Index { lo, hi_excl } => assert_eq!((lo, hi_excl), (1, 3)),
        _ => panic!("expected Index"),
    }
}

#[test]
fn index_wildcard_step() {
    let compiled = compile("$[*]+").unwrap();
    assert!(matches!(compiled.operators[0], Operator::IndexWild));
}

#[test]
fn missing_root_is_rejected() {
    assert_eq!(compile("foo"), Err(PathCompileError::MissingRoot));
}

#[test]
fn value_marker_must_be_terminal() {
    let err = compile("$.a+.b").unwrap_err();
    assert!(matches!(err, PathCompileError::ValueNotTerminal { .. }));
}

#[test]
fn unclosed_bracket_is_rejected() {
    let err = compile("$[1").unwrap_err();
    assert!(matches!(err, PathCompileError::UnclosedBracket { .. }));
}

#[test]
fn mixed_steps_compile_in_order() {
    let compiled = compile("$.a[*].b[2:4]+").unwrap();
    assert_eq!(compiled.operators.len(), 4);
    assert!(matches!(compiled.operators[1], Operator::IndexWild));
    match compiled.operators[3] {
        Operator::Index { lo, hi_excl } => assert_eq!((lo, hi_excl), (2, 4)),
        _ => panic!("expected Index"),
    }
}
