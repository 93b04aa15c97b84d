//! The location stack: the evaluator's notion of "where in the document
//! am I right now", rebuilt incrementally as tokens arrive.

use alloc::vec::Vec;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocStep {
    Key(Vec<u8>),
    Index(u32),
}

pub type Location = Vec<LocStep>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ContainerKind {
    Object,
    Array,
}
