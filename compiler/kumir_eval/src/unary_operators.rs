//! Unary operator evaluation.

use crate::errors::{invalid_unary_op, EvalResult};
use crate::value::Value;
use kumir_ir::UnaryOp;

/// Evaluate `op value`. Negation cannot overflow: the integer range is
/// symmetric.
pub fn evaluate_unary(value: Value, op: UnaryOp) -> EvalResult<Value> {
    match (value, op) {
        (Value::Integer(n), UnaryOp::Neg) => Ok(Value::Integer(n.neg())),
        (Value::Real(x), UnaryOp::Neg) => Ok(Value::Real(-x)),
        (v @ (Value::Integer(_) | Value::Real(_)), UnaryOp::Plus) => Ok(v),
        (Value::Boolean(b), UnaryOp::Not) => Ok(Value::Boolean(!b)),
        (v, op) => Err(invalid_unary_op(op.as_symbol(), v.type_name())),
    }
}
