//! Structural evaluation: turning a live JSON token stream plus a set of
//! compiled paths into a pull-based stream of matched values.
//!
//! - [`location`] — the location stack the evaluator rebuilds per token.
//! - [`query`] — per-path match-progress state machine (C8).
//! - [`evaluator`] — the structural walk (C7) and pull driver (C9).
//! - [`result`] — the [`MatchResult`]/[`TypeTag`] shape handed to callers.

pub(crate) mod location;
pub(crate) mod query;

mod evaluator;
mod result;

pub use evaluator::Evaluator;
pub use location::LocStep;
pub use result::{MatchResult, TypeTag};
