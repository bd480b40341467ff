//! Binary operator evaluation.
//!
//! Dispatch is a match on the operand pair. Mixed Integer/Real operands are
//! promoted to Real; `div` and `mod` are defined only over two Integers.
//! Both operands of `и`/`или` are always evaluated by the caller before
//! reaching here.

use crate::errors::{
    division_by_zero, domain_error, integer_out_of_range, invalid_binary_op, EvalResult,
};
use crate::value::{KumirInt, Value};
use kumir_ir::BinaryOp;
use std::cmp::Ordering;

/// Evaluate `left op right`.
#[expect(
    clippy::needless_pass_by_value,
    reason = "callers hand over freshly evaluated operands"
)]
pub fn evaluate_binary(left: Value, right: Value, op: BinaryOp) -> EvalResult<Value> {
    match (&left, &right) {
        (Value::Integer(a), Value::Integer(b)) => eval_int_binary(*a, *b, op),
        (Value::Integer(_) | Value::Real(_), Value::Integer(_) | Value::Real(_)) => {
            match (left.as_real(), right.as_real()) {
                (Some(a), Some(b))
                    if !matches!(
                        op,
                        BinaryOp::IntDiv | BinaryOp::Mod | BinaryOp::And | BinaryOp::Or
                    ) =>
                {
                    eval_real_binary(a, b, op)
                }
                _ => Err(mismatch(&left, &right, op)),
            }
        }
        (Value::Boolean(a), Value::Boolean(b)) => eval_bool_binary(*a, *b, op)
            .ok_or_else(|| mismatch(&left, &right, op)),
        (Value::Character(_) | Value::String(_), Value::Character(_) | Value::String(_)) => {
            match (left.as_text(), right.as_text()) {
                (Some(a), Some(b)) => eval_text_binary(&a, &b, op)
                    .ok_or_else(|| mismatch(&left, &right, op)),
                _ => Err(mismatch(&left, &right, op)),
            }
        }
        _ => Err(mismatch(&left, &right, op)),
    }
}

#[cold]
fn mismatch(left: &Value, right: &Value, op: BinaryOp) -> crate::errors::EvalError {
    invalid_binary_op(op.as_symbol(), left.type_name(), right.type_name())
}

/// Range-check an exact `i64` result.
#[inline]
fn int_result(exact: i64) -> EvalResult<Value> {
    KumirInt::new(exact)
        .map(Value::Integer)
        .ok_or_else(|| integer_out_of_range(exact))
}

fn eval_int_binary(a: KumirInt, b: KumirInt, op: BinaryOp) -> EvalResult<Value> {
    let (x, y) = (i64::from(a), i64::from(b));
    match op {
        BinaryOp::Add => int_result(x + y),
        BinaryOp::Sub => int_result(x - y),
        BinaryOp::Mul => int_result(x * y),
        BinaryOp::Div => eval_real_binary(a.to_f64(), b.to_f64(), op),
        BinaryOp::IntDiv => a.checked_floor_div(b).map(Value::Integer).ok_or_else(|| {
            if b.is_zero() {
                division_by_zero()
            } else {
                integer_out_of_range(format!("{a} div {b}"))
            }
        }),
        BinaryOp::Mod => a
            .checked_floor_mod(b)
            .map(Value::Integer)
            .ok_or_else(division_by_zero),
        BinaryOp::Pow if y >= 0 => a
            .checked_pow(b)
            .map(Value::Integer)
            .ok_or_else(|| integer_out_of_range(format!("{a}**{b}"))),
        BinaryOp::Pow => eval_real_binary(a.to_f64(), b.to_f64(), op),
        BinaryOp::And | BinaryOp::Or => Err(invalid_binary_op(op.as_symbol(), "цел", "цел")),
        _ => Ok(Value::Boolean(compare(a.cmp(&b), op))),
    }
}

fn eval_real_binary(a: f64, b: f64, op: BinaryOp) -> EvalResult<Value> {
    let result = match op {
        BinaryOp::Add => a + b,
        BinaryOp::Sub => a - b,
        BinaryOp::Mul => a * b,
        BinaryOp::Div => {
            if b == 0.0 {
                return Err(division_by_zero());
            }
            a / b
        }
        BinaryOp::Pow => {
            if a == 0.0 && b < 0.0 {
                return Err(division_by_zero());
            }
            a.powf(b)
        }
        BinaryOp::IntDiv | BinaryOp::Mod | BinaryOp::And | BinaryOp::Or => {
            return Err(invalid_binary_op(op.as_symbol(), "вещ", "вещ"));
        }
        _ => {
            let ordering = a.partial_cmp(&b).unwrap_or(Ordering::Less);
            return Ok(Value::Boolean(compare(ordering, op)));
        }
    };
    if result.is_finite() {
        Ok(Value::Real(result))
    } else {
        Err(domain_error(op.as_symbol(), "результат не является конечным числом"))
    }
}

fn eval_bool_binary(a: bool, b: bool, op: BinaryOp) -> Option<Value> {
    let result = match op {
        BinaryOp::And => a && b,
        BinaryOp::Or => a || b,
        BinaryOp::Eq => a == b,
        BinaryOp::NotEq => a != b,
        _ => return None,
    };
    Some(Value::Boolean(result))
}

/// Strings and characters: `+` concatenates, comparisons are lexicographic.
fn eval_text_binary(a: &str, b: &str, op: BinaryOp) -> Option<Value> {
    match op {
        BinaryOp::Add => {
            let mut joined = String::with_capacity(a.len() + b.len());
            joined.push_str(a);
            joined.push_str(b);
            Some(Value::String(joined))
        }
        op if op.is_comparison() => Some(Value::Boolean(compare(a.cmp(b), op))),
        _ => None,
    }
}

/// Map an ordering through a comparison operator.
fn compare(ordering: Ordering, op: BinaryOp) -> bool {
    match op {
        BinaryOp::Lt => ordering == Ordering::Less,
        BinaryOp::LtEq => ordering != Ordering::Greater,
        BinaryOp::Gt => ordering == Ordering::Greater,
        BinaryOp::GtEq => ordering != Ordering::Less,
        BinaryOp::Eq => ordering == Ordering::Equal,
        BinaryOp::NotEq => ordering != Ordering::Equal,
        _ => false,
    }
}

#[cfg(test)]
mod tests;
