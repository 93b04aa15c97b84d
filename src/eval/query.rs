//! Multi-path query matcher (C8): one [`QueryState`] per compiled path,
//! advanced one JSON token at a time against the evaluator's live location
//! stack. Mirrors the two-state `match_next_op` / `end_value` shape, done
//! here as an explicit `Phase` enum instead of mutually-recursive function
//! values.

use alloc::vec::Vec;

use crate::eval::location::{LocStep, Location};
use crate::eval::result::{infer_type_from_bytes, infer_type_from_kind, MatchResult, TypeTag};
use crate::path::{CompiledPath, Operator};
use crate::token::JsonKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    MatchNextOp,
    EndValue,
}

pub(crate) struct QueryState {
    compiled: CompiledPath,
    phase: Phase,
    matched_depth: i64,
    capture_start_loc: Location,
    capture_buffer: Vec<u8>,
    pending_type: TypeTag,
}

impl QueryState {
    pub(crate) fn new(compiled: CompiledPath) -> Self {
        log::debug!(
            "eval::query: armed with {} operator(s), capture_value={}",
            compiled.operators.len(),
            compiled.capture_value
        );
        Self {
            compiled,
            phase: Phase::MatchNextOp,
            matched_depth: -1,
            capture_start_loc: Location::new(),
            capture_buffer: Vec::new(),
            pending_type: TypeTag::Null,
        }
    }

    /// Advance this query by one token. `location` already reflects this
    /// token (pushed/popped by the structural evaluator before the call).
    pub(crate) fn on_token(
        &mut self,
        location: &[LocStep],
        token_kind: JsonKind,
        token_value: &[u8],
    ) -> Option<MatchResult> {
        match self.phase {
            Phase::MatchNextOp => self.match_next_op(location, token_kind, token_value),
            Phase::EndValue => self.end_value(location, token_value),
        }
    }

    fn match_next_op(
        &mut self,
        location: &[LocStep],
        token_kind: JsonKind,
        token_value: &[u8],
    ) -> Option<MatchResult> {
        let loc_len = location.len() as i64;

        if self.matched_depth > loc_len - 1 {
            self.matched_depth -= 1;
            return None;
        }

        if self.matched_depth == loc_len - 2 {
            let op = &self.compiled.operators[(self.matched_depth + 1) as usize];
            if let Some(top) = location.last() {
                if operator_matches(top, op) {
                    self.matched_depth += 1;
                }
            }
        }

        if self.matched_depth == self.compiled.operators.len() as i64 - 1 {
            log::debug!("eval::query: matched at depth {}", location.len());
            self.capture_start_loc = location.to_vec();
            self.pending_type = infer_type_from_kind(token_kind);
            if self.compiled.capture_value {
                self.capture_buffer.extend_from_slice(token_value);
            }
            self.phase = Phase::EndValue;
        }

        None
    }

    fn end_value(&mut self, location: &[LocStep], token_value: &[u8]) -> Option<MatchResult> {
        if location.len() >= self.capture_start_loc.len() {
            if self.compiled.capture_value {
                self.capture_buffer.extend_from_slice(token_value);
            }
            return None;
        }

        let keys = core::mem::take(&mut self.capture_start_loc);
        let value = if self.compiled.capture_value {
            Some(core::mem::take(&mut self.capture_buffer))
        } else {
            None
        };
        let type_tag = value
            .as_deref()
            .map(infer_type_from_bytes)
            .unwrap_or(self.pending_type);

        self.matched_depth -= 1;
        self.phase = Phase::MatchNextOp;

        log::debug!("eval::query: completed, {} key(s), type {:?}", keys.len(), type_tag);
        Some(MatchResult {
            keys,
            value,
            type_tag,
        })
    }
}

/// The operator/location-step match table (C8): `Name` and the unified
/// bracket-list form test set membership; `Index` tests `lo <= n < hi`;
/// the wildcard forms test only the step's shape.
fn operator_matches(step: &LocStep, op: &Operator) -> bool {
    match (step, op) {
        (LocStep::Key(bytes), Operator::Name(set)) => set.contains(bytes),
        (LocStep::Key(_), Operator::NameWild) => true,
        (LocStep::Index(n), Operator::Index { lo, hi_excl }) => *n >= *lo && *n < *hi_excl,
        (LocStep::Index(_), Operator::IndexWild) => true,
        _ => false,
    }
}
