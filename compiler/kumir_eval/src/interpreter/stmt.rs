//! Statement execution.

use super::format::format_item;
use super::Interpreter;
use crate::coerce::parse_as;
use crate::environment::Slot;
use crate::errors::{
    assertion_failed, io_failure, missing_table_bounds, not_integer, step_budget_exhausted,
    unsupported, EvalResult,
};
use crate::exec::control::{require_bool, settle, ExprResult, Signal};
use crate::io::IoShell;
use crate::value::Table;
use kumir_ir::{Declaration, Expr, OutputItem, Place, Stmt, StmtKind, SwitchCase};

impl Interpreter<'_> {
    /// Run statements in order until one yields a non-normal signal.
    pub(crate) fn exec_block(&mut self, stmts: &[Stmt]) -> EvalResult<Signal> {
        for stmt in stmts {
            let signal = self.exec_stmt(stmt)?;
            if signal != Signal::Normal {
                return Ok(signal);
            }
        }
        Ok(Signal::Normal)
    }

    pub(crate) fn exec_stmt(&mut self, stmt: &Stmt) -> EvalResult<Signal> {
        if let Err(exceeded) = self.mode_state.count_step() {
            return Err(step_budget_exhausted(exceeded.limit).with_span(stmt.span));
        }
        settle(self.exec_stmt_inner(stmt)).map_err(|e| e.with_span(stmt.span))
    }

    fn exec_stmt_inner(&mut self, stmt: &Stmt) -> ExprResult<Signal> {
        match &stmt.kind {
            StmtKind::Declare(decl) => {
                self.exec_declare(decl)?;
                Ok(Signal::Normal)
            }
            StmtKind::Assign { target, value } => {
                self.exec_assign(target, value)?;
                Ok(Signal::Normal)
            }
            StmtKind::Output(items) => {
                self.exec_output(items)?;
                Ok(Signal::Normal)
            }
            StmtKind::Input(targets) => {
                self.exec_input(targets)?;
                Ok(Signal::Normal)
            }
            StmtKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                if self.eval_condition(cond, "если")? {
                    Ok(self.exec_block(then_branch)?)
                } else if let Some(else_branch) = else_branch {
                    Ok(self.exec_block(else_branch)?)
                } else {
                    Ok(Signal::Normal)
                }
            }
            StmtKind::Switch { cases, otherwise } => self.exec_switch(cases, otherwise.as_deref()),
            StmtKind::Loop(lp) => Ok(self.exec_loop(lp)?),
            StmtKind::Exit => Ok(Signal::Break),
            StmtKind::Stop => {
                tracing::debug!(steps = self.mode_state.steps(), "стоп");
                Ok(Signal::Halt)
            }
            StmtKind::Assert(cond) => {
                if self.eval_condition(cond, "утв")? {
                    Ok(Signal::Normal)
                } else {
                    Err(assertion_failed().into())
                }
            }
            StmtKind::Pause => {
                tracing::info!(span = %stmt.span, "пауза");
                Ok(Signal::Normal)
            }
            StmtKind::Call { callee, args } => {
                self.call(*callee, args, stmt.span)?;
                Ok(Signal::Normal)
            }
        }
    }

    pub(crate) fn eval_condition(&mut self, cond: &Expr, construct: &'static str) -> ExprResult<bool> {
        let value = self.eval_expr(cond)?;
        require_bool(&value, construct).map_err(|e| e.with_span(cond.span).into())
    }

    fn exec_declare(&mut self, decl: &Declaration) -> ExprResult<()> {
        for var in &decl.vars {
            let display = self.display(var.name);
            let slot = if decl.is_table {
                if var.bounds.is_empty() {
                    return Err(missing_table_bounds(display).with_span(var.span).into());
                }
                if var.init.is_some() {
                    return Err(unsupported("начальное значение таблицы").with_span(var.span).into());
                }
                let dims = self.eval_bounds(&var.bounds)?;
                Slot::table(Table::new(decl.ty, dims))
            } else {
                Slot::scalar(decl.ty)
            };
            // The initializer sees the scope as it was before this declaration.
            let init = match &var.init {
                Some(expr) => Some(self.eval_expr(expr)?),
                None => None,
            };
            self.env
                .declare(var.name, slot)
                .map_err(|e| e.into_eval(display).with_span(var.span))?;
            if let Some(value) = init {
                self.env
                    .update(var.name, value)
                    .map_err(|e| e.into_eval(display).with_span(var.span))?;
            }
        }
        Ok(())
    }

    /// Index expressions of the target run before the right-hand side.
    fn exec_assign(&mut self, target: &Place, value: &Expr) -> ExprResult<()> {
        let place = self.resolve_place(target)?;
        let value = self.eval_expr(value)?;
        self.write_place(&place, value)
            .map_err(|e| e.with_span(place.span).into())
    }

    /// The whole line is formatted before anything is printed, so a failing
    /// item leaves no partial output.
    fn exec_output(&mut self, items: &[OutputItem]) -> ExprResult<()> {
        let mut line = String::new();
        for item in items {
            match item {
                OutputItem::Newline => line.push('\n'),
                OutputItem::Value {
                    expr,
                    width,
                    precision,
                } => {
                    let value = self.eval_expr(expr)?;
                    let width = self.eval_format_arg(width.as_ref())?;
                    let precision = self.eval_format_arg(precision.as_ref())?;
                    let text = format_item(&value, width, precision).map_err(|e| e.with_span(expr.span))?;
                    line.push_str(&text);
                }
            }
        }
        Ok(self.emit(&line)?)
    }

    fn eval_format_arg(&mut self, expr: Option<&Expr>) -> ExprResult<Option<i64>> {
        let Some(expr) = expr else {
            return Ok(None);
        };
        let value = self.eval_expr(expr)?;
        match value.as_int() {
            Some(n) => Ok(Some(i64::from(n))),
            None => Err(not_integer("формат вывода", value.type_name())
                .with_span(expr.span)
                .into()),
        }
    }

    fn exec_input(&mut self, targets: &[Place]) -> ExprResult<()> {
        for target in targets {
            let place = self.resolve_place(target)?;
            let ty = self.place_type(&place).map_err(|e| e.with_span(place.span))?;
            let line = self.shell.read_line("").map_err(io_failure)?;
            let value = parse_as(&line, ty).map_err(|e| e.with_span(place.span))?;
            self.write_place(&place, value)
                .map_err(|e| e.with_span(place.span))?;
        }
        Ok(())
    }

    fn exec_switch(&mut self, cases: &[SwitchCase], otherwise: Option<&[Stmt]>) -> ExprResult<Signal> {
        for case in cases {
            if self.eval_condition(&case.cond, "при")? {
                return Ok(self.exec_block(&case.body)?);
            }
        }
        match otherwise {
            Some(body) => Ok(self.exec_block(body)?),
            None => Ok(Signal::Normal),
        }
    }
}

