//! Step-by-step trace for visualizers.
//!
//! The callback sees each statement after it ran. It gets read-only views,
//! so it cannot change the run.

use crate::value::Value;
use kumir_ir::Span;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TracePhase {
    /// Top-level statements before the first algorithm.
    Introduction,
    /// Body of the entry algorithm.
    Main,
}

#[derive(Debug)]
pub struct TraceEvent<'e> {
    pub phase: TracePhase,
    /// Position of the statement within its phase's statement list.
    pub statement_index: usize,
    pub span: Span,
    /// Everything printed so far.
    pub output: &'e str,
    /// What this statement printed.
    pub emitted: &'e str,
    /// Initialized global variables, in order of first mention.
    pub globals: &'e [(&'static str, Value)],
}

pub type TraceCallback<'a> = Box<dyn FnMut(&TraceEvent<'_>) + 'a>;
