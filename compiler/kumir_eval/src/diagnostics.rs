//! Live algorithm-call stack.
//!
//! Each user algorithm activation pushes a [`CallFrame`]; the depth limit is
//! checked on push. When an error unwinds through a call, the interpreter
//! snapshots the stack into an [`EvalBacktrace`] attached to the error.

use crate::errors::{recursion_limit_exceeded, BacktraceFrame, EvalBacktrace, EvalError};
use kumir_ir::{Name, Span, StringInterner};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallFrame {
    pub name: Name,
    /// Where the call was made, not where the algorithm is defined.
    pub call_span: Span,
}

#[derive(Clone, Debug)]
pub struct CallStack {
    frames: Vec<CallFrame>,
    max_depth: usize,
}

impl CallStack {
    pub fn new(max_depth: usize) -> Self {
        Self {
            frames: Vec::new(),
            max_depth,
        }
    }

    /// Push a frame. On overflow the frame is not pushed.
    pub fn push(&mut self, frame: CallFrame) -> Result<(), EvalError> {
        if self.frames.len() >= self.max_depth {
            return Err(recursion_limit_exceeded(self.max_depth));
        }
        self.frames.push(frame);
        Ok(())
    }

    pub fn pop(&mut self) {
        debug_assert!(!self.frames.is_empty(), "CallStack::pop on empty stack");
        self.frames.pop();
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Snapshot, most recent call first.
    pub fn capture(&self, interner: &StringInterner) -> EvalBacktrace {
        let frames = self
            .frames
            .iter()
            .rev()
            .map(|f| BacktraceFrame {
                name: interner.lookup(f.name).to_string(),
                span: (!f.call_span.is_dummy()).then_some(f.call_span),
            })
            .collect();
        EvalBacktrace::new(frames)
    }

    pub fn attach_backtrace(&self, err: EvalError, interner: &StringInterner) -> EvalError {
        if self.frames.is_empty() {
            return err;
        }
        err.with_backtrace(self.capture(interner))
    }
}
