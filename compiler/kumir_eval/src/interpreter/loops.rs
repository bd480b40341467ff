//! `нц ... кц` in its four forms.
//!
//! Each pass runs the body in a fresh block frame, so declarations inside
//! the body start over every iteration. A `кц при` condition is checked
//! after every pass. `выход` ends the loop; `стоп` passes through.

use super::Interpreter;
use crate::environment::Slot;
use crate::errors::{not_integer, zero_loop_step, EvalResult};
use crate::exec::control::{for_iterations, settle, times_count, ExprResult, LoopAction, Signal};
use crate::value::{KumirInt, Value};
use kumir_ir::{Expr, Loop, LoopKind, Name, TypeTag};

impl Interpreter<'_> {
    pub(crate) fn exec_loop(&mut self, lp: &Loop) -> EvalResult<Signal> {
        settle(self.exec_loop_inner(lp))
    }

    fn exec_loop_inner(&mut self, lp: &Loop) -> ExprResult<Signal> {
        match &lp.kind {
            LoopKind::For {
                var,
                start,
                end,
                step,
            } => self.exec_for(lp, *var, start, end, step.as_ref()),
            LoopKind::While(cond) => {
                while self.eval_condition(cond, "пока")? {
                    match self.loop_pass(lp)? {
                        LoopAction::Next => {}
                        LoopAction::Exit => break,
                        LoopAction::Propagate(signal) => return Ok(signal),
                    }
                }
                Ok(Signal::Normal)
            }
            LoopKind::Times(count) => {
                let count = self.eval_loop_int(count, "число повторений")?;
                for _ in 0..times_count(i64::from(count)) {
                    match self.loop_pass(lp)? {
                        LoopAction::Next => {}
                        LoopAction::Exit => break,
                        LoopAction::Propagate(signal) => return Ok(signal),
                    }
                }
                Ok(Signal::Normal)
            }
            LoopKind::Forever => loop {
                match self.loop_pass(lp)? {
                    LoopAction::Next => {}
                    LoopAction::Exit => break Ok(Signal::Normal),
                    LoopAction::Propagate(signal) => break Ok(signal),
                }
            },
        }
    }

    /// `нц для var от start до end шаг step`.
    ///
    /// Bounds and step are evaluated once. The loop variable lives in its
    /// own frame and is rewritten before every pass.
    fn exec_for(
        &mut self,
        lp: &Loop,
        var: Name,
        start: &Expr,
        end: &Expr,
        step: Option<&Expr>,
    ) -> ExprResult<Signal> {
        let first = self.eval_loop_int(start, "начало цикла")?;
        let last = self.eval_loop_int(end, "конец цикла")?;
        let step = match step {
            Some(expr) => self.eval_loop_int(expr, "шаг цикла")?,
            None => KumirInt::ONE,
        };
        if step.is_zero() {
            return Err(zero_loop_step().into());
        }
        let (first, last, step) = (i64::from(first), i64::from(last), i64::from(step));

        let display = self.display(var);
        let mut scoped = self.scoped();
        scoped
            .env
            .declare(var, Slot::scalar(TypeTag::Integer))
            .map_err(|e| e.into_eval(display))?;

        let mut current = first;
        for _ in 0..for_iterations(first, last, step) {
            let value = KumirInt::new(current).map_or(Value::Integer(KumirInt::MAX), Value::Integer);
            scoped.env.update(var, value).map_err(|e| e.into_eval(display))?;
            match scoped.loop_pass(lp)? {
                LoopAction::Next => {}
                LoopAction::Exit => break,
                LoopAction::Propagate(signal) => return Ok(signal),
            }
            current += step;
        }
        Ok(Signal::Normal)
    }

    /// One pass of the body plus the `кц при` check.
    fn loop_pass(&mut self, lp: &Loop) -> ExprResult<LoopAction> {
        let signal = {
            let mut scoped = self.scoped();
            scoped.exec_block(&lp.body)?
        };
        let action = LoopAction::after_body(signal);
        if action != LoopAction::Next {
            return Ok(action);
        }
        match &lp.end_condition {
            Some(cond) if self.eval_condition(cond, "кц при")? => Ok(LoopAction::Exit),
            _ => Ok(LoopAction::Next),
        }
    }

    fn eval_loop_int(&mut self, expr: &Expr, what: &str) -> ExprResult<KumirInt> {
        let value = self.eval_expr(expr)?;
        value
            .as_int()
            .ok_or_else(|| not_integer(what, value.type_name()).with_span(expr.span).into())
    }
}
