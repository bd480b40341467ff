//! Argument passing.
//!
//! Actual arguments are prepared in the caller's scope before the callee
//! frame exists: `арг` values are computed, `рез`/`аргрез` places have
//! their indices evaluated once. Write-back goes to those same resolved
//! places after the callee frame is gone.

use crate::errors::{not_assignable, wrong_arg_count, EvalResult};
use crate::value::{TableIndex, Value};
use kumir_ir::{Name, Span};

/// A place whose index expressions have been evaluated.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedPlace {
    pub name: Name,
    /// `None` addresses the whole variable.
    pub index: Option<TableIndex>,
    pub span: Span,
}

impl ResolvedPlace {
    pub fn var(name: Name, span: Span) -> Self {
        ResolvedPlace {
            name,
            index: None,
            span,
        }
    }
}

/// One prepared actual argument.
#[derive(Clone, Debug, PartialEq)]
pub enum ArgPass {
    /// `арг`
    Value(Value),
    /// `рез`: nothing flows in.
    Out(ResolvedPlace),
    /// `аргрез`: the place and its value at call time.
    InOut(ResolvedPlace, Value),
}

impl ArgPass {
    /// Value copied into the callee, if any.
    pub fn initial(&self) -> Option<&Value> {
        match self {
            ArgPass::Value(v) | ArgPass::InOut(_, v) => Some(v),
            ArgPass::Out(_) => None,
        }
    }

    /// Caller place receiving the final value, if any.
    pub fn place(&self) -> Option<&ResolvedPlace> {
        match self {
            ArgPass::Out(p) | ArgPass::InOut(p, _) => Some(p),
            ArgPass::Value(_) => None,
        }
    }
}

pub fn check_arg_count(callee: &str, expected: usize, got: usize) -> EvalResult<()> {
    if expected == got {
        Ok(())
    } else {
        Err(wrong_arg_count(callee, expected, got))
    }
}

/// `рез`/`аргрез` actuals must be places; `position` is zero-based.
pub fn require_place<T>(place: Option<T>, callee: &str, position: usize) -> EvalResult<T> {
    place.ok_or_else(|| not_assignable(callee, position + 1))
}

/// `i`-th (1-based) character of `text`.
pub fn char_at(text: &str, index: i64) -> Option<char> {
    let offset = usize::try_from(index.checked_sub(1)?).ok()?;
    text.chars().nth(offset)
}

/// `text` with its `i`-th (1-based) character replaced, or `None` when out of range.
pub fn replace_char(text: &str, index: i64, ch: char) -> Option<String> {
    let offset = usize::try_from(index.checked_sub(1)?).ok()?;
    if offset >= text.chars().count() {
        return None;
    }
    Some(
        text.chars()
            .enumerate()
            .map(|(i, c)| if i == offset { ch } else { c })
            .collect(),
    )
}
