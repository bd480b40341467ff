//! RAII scope guards for the interpreter's environment.
//!
//! [`ScopedInterpreter`] pops the frame it pushed when dropped, so every
//! exit path (normal completion, `выход`, `стоп`, an error, or a panic
//! unwinding through it) leaves the scope stack as it found it. Call guards
//! also pop the call stack.
//!
//! The guard holds `&mut Interpreter` and implements `Deref`/`DerefMut`, so
//! interpreter methods are called through it directly.

use std::ops::{Deref, DerefMut};

use super::Interpreter;
use crate::diagnostics::CallFrame;
use crate::environment::FrameKind;
use crate::errors::EvalResult;

pub struct ScopedInterpreter<'guard, 'interp> {
    interpreter: &'guard mut Interpreter<'interp>,
    is_call: bool,
}

impl Drop for ScopedInterpreter<'_, '_> {
    fn drop(&mut self) {
        // Only the global frame refuses to pop, and a guard never owns it.
        let _ = self.interpreter.env.pop_frame();
        if self.is_call {
            self.interpreter.call_stack.pop();
        }
    }
}

impl<'interp> Deref for ScopedInterpreter<'_, 'interp> {
    type Target = Interpreter<'interp>;

    fn deref(&self) -> &Self::Target {
        self.interpreter
    }
}

impl DerefMut for ScopedInterpreter<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.interpreter
    }
}

impl<'a> Interpreter<'a> {
    /// Push a block frame, popped when the guard drops.
    pub fn scoped(&mut self) -> ScopedInterpreter<'_, 'a> {
        self.env.push_frame(FrameKind::Block);
        ScopedInterpreter {
            interpreter: self,
            is_call: false,
        }
    }

    /// Enter an algorithm activation: call-stack entry plus a `Call` frame.
    ///
    /// Fails without pushing anything when the recursion limit is reached.
    pub fn scoped_call(&mut self, frame: CallFrame) -> EvalResult<ScopedInterpreter<'_, 'a>> {
        self.call_stack.push(frame)?;
        self.env.push_frame(FrameKind::Call);
        Ok(ScopedInterpreter {
            interpreter: self,
            is_call: true,
        })
    }
}
