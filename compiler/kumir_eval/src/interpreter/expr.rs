//! Expression evaluation.

use super::Interpreter;
use crate::coerce::parse_hex;
use crate::errors::integer_out_of_range;
use crate::exec::call::ResolvedPlace;
use crate::exec::control::ExprResult;
use crate::operators::evaluate_binary;
use crate::stack::ensure_sufficient_stack;
use crate::unary_operators::evaluate_unary;
use crate::value::{KumirInt, Value};
use kumir_ir::{Expr, ExprKind, Name, Span};

impl Interpreter<'_> {
    /// Reduce `expr` to a value.
    ///
    /// Errors get the span of the innermost node that raised them.
    pub(crate) fn eval_expr(&mut self, expr: &Expr) -> ExprResult<Value> {
        ensure_sufficient_stack(|| self.eval_expr_inner(expr)).map_err(|u| u.with_span(expr.span))
    }

    fn eval_expr_inner(&mut self, expr: &Expr) -> ExprResult<Value> {
        match &expr.kind {
            ExprKind::Int(n) => KumirInt::new(*n)
                .map(Value::Integer)
                .ok_or_else(|| integer_out_of_range(n).into()),
            ExprKind::Real(x) => Ok(Value::Real(*x)),
            ExprKind::Bool(b) => Ok(Value::Boolean(*b)),
            ExprKind::Char(c) => Ok(Value::Character(*c)),
            ExprKind::Str(s) => Ok(Value::String(s.clone())),
            ExprKind::Hex(digits) => Ok(Value::Integer(parse_hex(digits)?)),
            ExprKind::Ident(name) => self.eval_ident(*name, expr.span),
            ExprKind::Index { base, indices } => {
                let index = self.eval_indices(indices)?;
                let place = ResolvedPlace {
                    name: *base,
                    index: Some(index),
                    span: expr.span,
                };
                Ok(self.read_place(&place)?)
            }
            ExprKind::Unary { op, operand } => {
                let value = self.eval_expr(operand)?;
                Ok(evaluate_unary(value, *op)?)
            }
            // Both operands are always evaluated, logical operators included.
            ExprKind::Binary { op, left, right } => {
                let left = self.eval_expr(left)?;
                let right = self.eval_expr(right)?;
                Ok(evaluate_binary(left, right, *op)?)
            }
            ExprKind::Call { callee, args } => self.eval_call(*callee, args, expr.span),
        }
    }

    /// A bare name is a variable, or else a call of a parameterless function
    /// (`случайноевещественное`, a world sensor, a user function).
    fn eval_ident(&mut self, name: Name, span: Span) -> ExprResult<Value> {
        if self.env.find(name).is_none() && self.is_callable(name) {
            return self.eval_call(name, &[], span);
        }
        let display = self.display(name);
        self.env
            .read(name)
            .map_err(|e| e.into_eval(display).into())
    }
}
