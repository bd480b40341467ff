//! Control transfer.
//!
//! Statement executors return [`Signal`] on the `Ok` side; errors travel on
//! the `Err` side. Expression evaluation can also be cut short by `стоп`
//! inside a called algorithm, so expressions use [`Unwind`], which is
//! turned back into `Signal::Halt` at the statement boundary.

use crate::errors::{condition_not_boolean, EvalError, EvalResult};
use crate::value::Value;
use kumir_ir::Span;

/// Outcome of executing a statement or statement list.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Signal {
    /// Fall through to the next statement.
    Normal,
    /// `выход`: ends the nearest loop, or the current algorithm outside loops.
    Break,
    /// `стоп`: ends the whole run.
    Halt,
}

/// Non-local exit from expression evaluation.
#[derive(Clone, Debug, PartialEq)]
pub enum Unwind {
    Error(EvalError),
    /// A called algorithm executed `стоп`.
    Halt,
}

pub type ExprResult<T> = Result<T, Unwind>;

impl From<EvalError> for Unwind {
    fn from(err: EvalError) -> Self {
        Unwind::Error(err)
    }
}

impl Unwind {
    #[must_use]
    pub fn with_span(self, span: Span) -> Self {
        match self {
            Unwind::Error(err) => Unwind::Error(err.with_span(span)),
            Unwind::Halt => Unwind::Halt,
        }
    }

    #[must_use]
    pub fn map_error(self, f: impl FnOnce(EvalError) -> EvalError) -> Self {
        match self {
            Unwind::Error(err) => Unwind::Error(f(err)),
            Unwind::Halt => Unwind::Halt,
        }
    }
}

/// Fold an expression-level result back into statement-level control.
pub fn settle(result: ExprResult<Signal>) -> EvalResult<Signal> {
    match result {
        Ok(signal) => Ok(signal),
        Err(Unwind::Halt) => Ok(Signal::Halt),
        Err(Unwind::Error(err)) => Err(err),
    }
}

/// What a loop does after one pass of its body.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LoopAction {
    Next,
    /// `выход` or a true end condition.
    Exit,
    /// A signal the loop does not consume.
    Propagate(Signal),
}

impl LoopAction {
    /// Loops consume `Break`; `Halt` passes through.
    pub fn after_body(signal: Signal) -> Self {
        match signal {
            Signal::Normal => LoopAction::Next,
            Signal::Break => LoopAction::Exit,
            Signal::Halt => LoopAction::Propagate(Signal::Halt),
        }
    }
}

/// Condition of `если`, `при`, `пока`, `кц_при` or `утв`.
pub fn require_bool(value: &Value, construct: &'static str) -> EvalResult<bool> {
    value
        .as_bool()
        .ok_or_else(|| condition_not_boolean(construct, value.type_name()))
}

/// Iterations of `нц для` over `[start, end]` with `step`; 0 when the range
/// is empty in the step's direction. `step` must be non-zero.
pub fn for_iterations(start: i64, end: i64, step: i64) -> u64 {
    let span = if step > 0 { end - start } else { start - end };
    if span < 0 {
        return 0;
    }
    span.unsigned_abs() / step.unsigned_abs() + 1
}

/// `нц N раз`: negative counts run zero times.
pub fn times_count(n: i64) -> u64 {
    u64::try_from(n).unwrap_or(0)
}
