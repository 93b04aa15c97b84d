//! Result shape handed back to callers by [`super::Evaluator::next`].

use alloc::vec::Vec;

use super::location::LocStep;
use crate::token::JsonKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeTag {
    Object,
    Array,
    String,
    Number,
    Bool,
    Null,
}

/// One matched value: the location it was found at, its raw bytes (if the
/// path requested capture with a trailing `+`), and its inferred type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    pub keys: Vec<LocStep>,
    pub value: Option<Vec<u8>>,
    pub type_tag: TypeTag,
}

/// Infers a type from the first byte of a captured value, per the wire
/// convention: `{` → Object, `[` → Array, `"` → String, `n` → Null,
/// `t`/`f` → Bool, anything else → Number.
pub(crate) fn infer_type_from_bytes(bytes: &[u8]) -> TypeTag {
    match bytes.first() {
        Some(b'{') => TypeTag::Object,
        Some(b'[') => TypeTag::Array,
        Some(b'"') => TypeTag::String,
        Some(b'n') => TypeTag::Null,
        Some(b't') | Some(b'f') => TypeTag::Bool,
        _ => TypeTag::Number,
    }
}

/// Same inference from the JSON token kind that opened the matched value,
/// used when the path did not request a capture and so no bytes were kept.
pub(crate) fn infer_type_from_kind(kind: JsonKind) -> TypeTag {
    match kind {
        JsonKind::LBrace => TypeTag::Object,
        JsonKind::LBracket => TypeTag::Array,
        JsonKind::Str => TypeTag::String,
        JsonKind::Null => TypeTag::Null,
        JsonKind::True | JsonKind::False => TypeTag::Bool,
        JsonKind::Num => TypeTag::Number,
        _ => TypeTag::Number,
    }
}
