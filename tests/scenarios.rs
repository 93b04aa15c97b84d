//! End-to-end scenarios against the public API, plus the boundary cases
//! and universal invariants from the testable-properties section.

use jsonpath_stream::eval::{LocStep, TypeTag};
use jsonpath_stream::{compile_paths, eval_over_bytes};

fn collect(json: &[u8], paths: &[&str]) -> Vec<jsonpath_stream::eval::MatchResult> {
    let compiled = compile_paths(paths.iter().copied()).expect("paths compile");
    let mut evaluator = eval_over_bytes(json, compiled);
    let mut out = Vec::new();
    while let Some(m) = evaluator.next() {
        out.push(m);
    }
    assert!(evaluator.error().is_none(), "unexpected eval error: {:?}", evaluator.error());
    out
}

#[test]
fn scenario_1_flat_key() {
    let results = collect(br#"{"aKey":32}"#, &["$.aKey+"]);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].keys, vec![LocStep::Key(b"aKey".to_vec())]);
    assert_eq!(results[0].value.as_deref(), Some(&b"32"[..]));
    assert_eq!(results[0].type_tag, TypeTag::Number);
}

#[test]
fn scenario_2_exclusive_range() {
    let results = collect(br#"{"aKey":[11,22,33,44]}"#, &["$.aKey[1:3]+"]);
    assert_eq!(results.len(), 2);
    assert_eq!(
        results[0].keys,
        vec![LocStep::Key(b"aKey".to_vec()), LocStep::Index(1)]
    );
    assert_eq!(results[0].value.as_deref(), Some(&b"22"[..]));
    assert_eq!(
        results[1].keys,
        vec![LocStep::Key(b"aKey".to_vec()), LocStep::Index(2)]
    );
    assert_eq!(results[1].value.as_deref(), Some(&b"33"[..]));
}

#[test]
fn scenario_3_empty_range() {
    let results = collect(br#"{"aKey":[11,22,33,44]}"#, &["$.aKey[1:1]+"]);
    assert!(results.is_empty());
}

#[test]
fn scenario_4_deeply_nested_array_capture() {
    let results = collect(br#"[[[[[]], [true, false, []]]]]"#, &["$[0][0][1][2]+"]);
    assert_eq!(results.len(), 1);
    assert_eq!(
        results[0].keys,
        vec![
            LocStep::Index(0),
            LocStep::Index(0),
            LocStep::Index(1),
            LocStep::Index(2),
        ]
    );
    assert_eq!(results[0].value.as_deref(), Some(&b"[]"[..]));
    assert_eq!(results[0].type_tag, TypeTag::Array);
}

#[test]
fn scenario_5_wildcards_and_object_index_mix() {
    let json = br#"{"aKey":[true,false,null,{"michael":[5,6,7]}, ["s","3"]]}"#;
    let results = collect(json, &["$.*[*].michael[1]+"]);
    assert_eq!(results.len(), 1);
    assert_eq!(
        results[0].keys,
        vec![
            LocStep::Key(b"aKey".to_vec()),
            LocStep::Index(3),
            LocStep::Key(b"michael".to_vec()),
            LocStep::Index(1),
        ]
    );
    assert_eq!(results[0].value.as_deref(), Some(&b"6"[..]));
    assert_eq!(results[0].type_tag, TypeTag::Number);
}

#[test]
fn empty_path_list_yields_zero_results_no_error() {
    let results = collect(br#"{"a":1,"b":[1,2,3]}"#, &[]);
    assert!(results.is_empty());
}

#[test]
fn idempotence_same_input_same_results() {
    let json: &[u8] = br#"{"a":{"b":[1,2,3]}}"#;
    let paths = ["$.a.b[*]+"];
    let first = collect(json, &paths);
    let second = collect(json, &paths);
    assert_eq!(first, second);
}

#[test]
fn slice_and_reader_backends_agree() {
    let json: &[u8] = br#"{"a":{"b":[1,2,3]},"c":"hi"}"#;
    let compiled_slice = compile_paths(["$.a.b[*]+", "$.c+"]).unwrap();
    let from_slice = {
        let mut e = eval_over_bytes(json, compiled_slice);
        let mut out = Vec::new();
        while let Some(m) = e.next() {
            out.push(m);
        }
        out
    };

    let compiled_stream = compile_paths(["$.a.b[*]+", "$.c+"]).unwrap();
    let from_stream = {
        let mut e = jsonpath_stream::eval_over_stream(json, compiled_stream);
        let mut out = Vec::new();
        while let Some(m) = e.next() {
            out.push(m);
        }
        out
    };

    assert_eq!(from_slice, from_stream);
}

#[test]
fn boundary_empty_object_and_array() {
    assert!(collect(b"{}", &["$.missing+"]).is_empty());
    let results = collect(b"{\"a\":[]}", &["$.a+"]);
    assert_eq!(results[0].value.as_deref(), Some(&b"[]"[..]));
}

#[test]
fn boundary_deep_nesting() {
    let mut json = String::new();
    for _ in 0..16 {
        json.push('[');
    }
    json.push_str("1");
    for _ in 0..16 {
        json.push(']');
    }
    let results = collect(json.as_bytes(), &["$[0]+"]);
    // Only the outermost `[0]` is requested; should resolve to the next
    // nested array, sixteen layers deep.
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].type_tag, TypeTag::Array);
}

#[test]
fn boundary_scientific_notation_number() {
    let results = collect(br#"{"n": 1.2e10}"#, &["$.n+"]);
    assert_eq!(results[0].value.as_deref(), Some(&b"1.2e10"[..]));
    assert_eq!(results[0].type_tag, TypeTag::Number);
}

#[test]
fn boundary_escaped_quote_in_string() {
    let results = collect(br#"{"s": "a\"b"}"#, &["$.s+"]);
    assert_eq!(results[0].value.as_deref(), Some(&br#""a\"b""#[..]));
    assert_eq!(results[0].type_tag, TypeTag::String);
}

#[test]
fn boundary_numeric_key() {
    let results = collect(br#"{"1Key": true}"#, &["$.1Key+"]);
    assert_eq!(results[0].value.as_deref(), Some(&b"true"[..]));
    assert_eq!(results[0].type_tag, TypeTag::Bool);
}

#[test]
fn boundary_trailing_whitespace_after_root() {
    let results = collect(b"{\"a\":1}   \n", &["$.a+"]);
    assert_eq!(results[0].value.as_deref(), Some(&b"1"[..]));
}

#[test]
fn location_only_match_omits_value_but_infers_type() {
    let compiled = compile_paths(["$.obj"]).unwrap();
    let mut e = eval_over_bytes(br#"{"obj": {"x": 1}}"#, compiled);
    let m = e.next().unwrap();
    assert!(m.value.is_none());
    assert_eq!(m.type_tag, TypeTag::Object);
}

#[test]
fn malformed_json_stops_with_error_and_no_further_results() {
    let compiled = compile_paths(["$.a+"]).unwrap();
    let mut e = eval_over_bytes(b"{\"a\": tru}", compiled);
    while e.next().is_some() {}
    assert!(e.error().is_some());
}
