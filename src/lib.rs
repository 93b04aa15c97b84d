//! Single-pass streaming JSON path extractor.
//!
//! Compiles one or more path expressions (`$.user.name+`, `$.items[*]+`,
//! `$.tags[1:3]+`) and pulls matching values out of a JSON document in one
//! forward pass, without ever materializing it as a tree. Works equally
//! over a borrowed `&[u8]` (zero-copy matches) or any [`std::io::Read`]
//! (owned, copied matches), selected by which entry point you call.
//!
//! ```
//! let paths = jsonpath_stream::compile_paths(["$.name+"]).unwrap();
//! let mut eval = jsonpath_stream::eval_over_bytes(br#"{"name": "ok"}"#, paths);
//! let hit = eval.next().unwrap();
//! assert_eq!(hit.value.as_deref(), Some(&b"\"ok\""[..]));
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod cursor;
pub mod error;
pub mod eval;
pub mod expr;
pub mod json;
pub mod path;
pub mod token;

use alloc::vec::Vec;

use cursor::SliceCursor;
use error::PathCompileError;
use eval::Evaluator;
use path::CompiledPath;

/// Compiles a batch of path expression strings, stopping at the first
/// failure.
pub fn compile_paths<'a, I>(paths: I) -> Result<Vec<CompiledPath>, PathCompileError>
where
    I: IntoIterator<Item = &'a str>,
{
    paths.into_iter().map(path::compile).collect()
}

/// Evaluates `paths` against an in-memory document, zero-copy.
///
/// Matched byte slices borrow directly from `input`.
pub fn eval_over_bytes(input: &[u8], paths: Vec<CompiledPath>) -> Evaluator<SliceCursor<'_>> {
    Evaluator::new(SliceCursor::new(input), paths)
}

/// Evaluates `paths` against a [`std::io::Read`] stream.
///
/// Matched bytes are copied into owned buffers, since they cannot be
/// borrowed past the read that produced them.
#[cfg(feature = "std")]
pub fn eval_over_stream<R: std::io::Read>(
    reader: R,
    paths: Vec<CompiledPath>,
) -> Evaluator<cursor::ReaderCursor<R>> {
    Evaluator::new(cursor::ReaderCursor::new(reader), paths)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(json: &[u8], paths: &[&str]) -> Vec<eval::MatchResult> {
        let compiled = compile_paths(paths.iter().copied()).expect("paths compile");
        let mut evaluator = eval_over_bytes(json, compiled);
        let mut out = Vec::new();
        while let Some(m) = evaluator.next() {
            out.push(m);
        }
        assert!(evaluator.error().is_none(), "unexpected error: {:?}", evaluator.error());
        out
    }

    #[test]
    fn scenario_one_simple_key() {
        let results = run(br#"{"aKey": 32}"#, &["$.aKey+"]);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].value.as_deref(), Some(&b"32"[..]));
        assert_eq!(results[0].type_tag, eval::TypeTag::Number);
    }

    #[test]
    fn scenario_two_index_range_is_half_open() {
        let results = run(
            br#"{"aKey": [11, 22, 33, 44]}"#,
            &["$.aKey[1:3]+"],
        );
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].value.as_deref(), Some(&b"22"[..]));
        assert_eq!(results[1].value.as_deref(), Some(&b"33"[..]));
    }

    #[test]
    fn scenario_three_empty_range_matches_nothing() {
        let results = run(br#"{"aKey": [11, 22, 33, 44]}"#, &["$.aKey[1:1]+"]);
        assert!(results.is_empty());
    }

    #[test]
    fn location_only_match_has_no_value() {
        let compiled = compile_paths(["$.aKey"]).unwrap();
        let mut evaluator = eval_over_bytes(br#"{"aKey": {"x": 1}}"#, compiled);
        let m = evaluator.next().expect("one match");
        assert!(m.value.is_none());
        assert_eq!(m.type_tag, eval::TypeTag::Object);
    }

    #[test]
    fn empty_path_list_yields_no_results() {
        let results = run(br#"{"a": 1}"#, &[]);
        assert!(results.is_empty());
    }

    #[test]
    fn malformed_json_surfaces_eval_error() {
        let compiled = compile_paths(["$.a+"]).unwrap();
        let mut evaluator = eval_over_bytes(b"{\"a\": }", compiled);
        while evaluator.next().is_some() {}
        assert!(evaluator.error().is_some());
    }
}
