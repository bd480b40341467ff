use super::*;
use crate::errors::{ErrorCategory, EvalErrorKind};
use crate::unary_operators::evaluate_unary;
use kumir_ir::UnaryOp;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn int(n: i32) -> Value {
    Value::int(n)
}

fn eval(left: Value, op: BinaryOp, right: Value) -> EvalResult<Value> {
    evaluate_binary(left, right, op)
}

#[test]
fn integer_arithmetic_stays_integer() {
    assert_eq!(eval(int(5), BinaryOp::Add, int(6)), Ok(int(11)));
    assert_eq!(eval(int(5), BinaryOp::Sub, int(6)), Ok(int(-1)));
    assert_eq!(eval(int(3), BinaryOp::Mul, int(2)), Ok(int(6)));
    assert_eq!(eval(int(2), BinaryOp::Pow, int(10)), Ok(int(1024)));
}

#[test]
fn slash_always_yields_real() {
    assert_eq!(eval(int(7), BinaryOp::Div, int(2)), Ok(Value::Real(3.5)));
    assert_eq!(eval(int(6), BinaryOp::Div, int(3)), Ok(Value::Real(2.0)));
}

#[test]
fn div_and_mod_use_floor_semantics() {
    assert_eq!(eval(int(7), BinaryOp::IntDiv, int(2)), Ok(int(3)));
    assert_eq!(eval(int(-7), BinaryOp::IntDiv, int(2)), Ok(int(-4)));
    assert_eq!(eval(int(-7), BinaryOp::Mod, int(2)), Ok(int(1)));
    assert_eq!(eval(int(7), BinaryOp::Mod, int(-2)), Ok(int(-1)));
}

#[test]
fn div_on_reals_is_a_type_error() {
    let err = eval(Value::Real(7.0), BinaryOp::IntDiv, int(2)).err();
    assert_eq!(err.map(|e| e.category()), Some(ErrorCategory::Type));
}

#[test]
fn division_by_zero_is_runtime_error() {
    for op in [BinaryOp::Div, BinaryOp::IntDiv, BinaryOp::Mod] {
        let err = eval(int(1), op, int(0)).err();
        assert_eq!(err.map(|e| e.kind), Some(EvalErrorKind::DivisionByZero));
    }
    let err = eval(Value::Real(1.0), BinaryOp::Div, Value::Real(0.0)).err();
    assert_eq!(err.map(|e| e.kind), Some(EvalErrorKind::DivisionByZero));
}

#[test]
fn overflow_reports_out_of_range() {
    let err = eval(int(2_147_483_647), BinaryOp::Add, int(1)).err();
    assert_eq!(
        err.map(|e| e.kind),
        Some(EvalErrorKind::IntegerOutOfRange {
            value: "2147483648".to_string()
        })
    );
    let err = eval(int(2), BinaryOp::Pow, int(40)).err();
    assert_eq!(err.map(|e| e.category()), Some(ErrorCategory::Value));
}

#[test]
fn negative_integer_exponent_yields_real() {
    assert_eq!(eval(int(2), BinaryOp::Pow, int(-1)), Ok(Value::Real(0.5)));
}

#[test]
fn mixed_operands_promote_to_real() {
    assert_eq!(eval(int(1), BinaryOp::Add, Value::Real(0.5)), Ok(Value::Real(1.5)));
    assert_eq!(
        eval(int(1), BinaryOp::Lt, Value::Real(1.5)),
        Ok(Value::Boolean(true))
    );
    assert_eq!(
        eval(Value::Real(2.0), BinaryOp::Eq, int(2)),
        Ok(Value::Boolean(true))
    );
}

#[test]
fn plus_concatenates_text() {
    assert_eq!(
        eval(Value::string("аб"), BinaryOp::Add, Value::Character('в')),
        Ok(Value::string("абв"))
    );
    assert_eq!(
        eval(Value::Character('а'), BinaryOp::Add, Value::Character('б')),
        Ok(Value::string("аб"))
    );
}

#[test]
fn text_comparison_is_lexicographic() {
    assert_eq!(
        eval(Value::string("кот"), BinaryOp::Lt, Value::string("кошка")),
        Ok(Value::Boolean(true))
    );
    assert_eq!(
        eval(Value::Character('а'), BinaryOp::Eq, Value::string("а")),
        Ok(Value::Boolean(true))
    );
}

#[test]
fn logical_operators_need_booleans() {
    assert_eq!(
        eval(Value::Boolean(true), BinaryOp::And, Value::Boolean(false)),
        Ok(Value::Boolean(false))
    );
    assert_eq!(
        eval(Value::Boolean(true), BinaryOp::Or, Value::Boolean(false)),
        Ok(Value::Boolean(true))
    );
    let err = eval(int(1), BinaryOp::And, int(1)).err();
    assert_eq!(
        err.map(|e| e.kind),
        Some(EvalErrorKind::InvalidBinaryOp {
            op: "и",
            left: "цел",
            right: "цел"
        })
    );
}

#[test]
fn mismatched_operands_name_both_types() {
    let err = eval(int(1), BinaryOp::Add, Value::string("x")).err();
    assert_eq!(
        err.map(|e| e.kind),
        Some(EvalErrorKind::InvalidBinaryOp {
            op: "+",
            left: "цел",
            right: "лит"
        })
    );
    let err = eval(Value::Boolean(true), BinaryOp::Lt, Value::Boolean(false)).err();
    assert_eq!(err.map(|e| e.category()), Some(ErrorCategory::Type));
}

#[test]
fn unary_operators() {
    assert_eq!(evaluate_unary(int(5), UnaryOp::Neg), Ok(int(-5)));
    assert_eq!(evaluate_unary(Value::Real(1.5), UnaryOp::Plus), Ok(Value::Real(1.5)));
    assert_eq!(
        evaluate_unary(Value::Boolean(true), UnaryOp::Not),
        Ok(Value::Boolean(false))
    );
    let err = evaluate_unary(Value::string("a"), UnaryOp::Neg).err();
    assert_eq!(
        err.map(|e| e.kind),
        Some(EvalErrorKind::InvalidUnaryOp {
            op: "-",
            operand: "лит"
        })
    );
}

proptest! {
    #[test]
    fn integer_sum_matches_exact_arithmetic(a in any::<i32>(), b in any::<i32>()) {
        prop_assume!(a != i32::MIN && b != i32::MIN);
        let exact = i64::from(a) + i64::from(b);
        let result = eval(int(a), BinaryOp::Add, int(b));
        if exact.abs() <= 2_147_483_647 {
            prop_assert_eq!(result, Ok(Value::Integer(KumirInt::new(exact).unwrap_or(KumirInt::ZERO))));
        } else {
            prop_assert!(result.is_err());
        }
    }

    #[test]
    fn floor_div_mod_reconstruct_dividend(a in -100_000i32..100_000, b in -1000i32..1000) {
        prop_assume!(b != 0);
        let q = eval(int(a), BinaryOp::IntDiv, int(b));
        let r = eval(int(a), BinaryOp::Mod, int(b));
        match (q, r) {
            (Ok(Value::Integer(q)), Ok(Value::Integer(r))) => {
                prop_assert_eq!(i64::from(q) * i64::from(b) + i64::from(r), i64::from(a));
                prop_assert!(r.get() == 0 || (r.get() < 0) == (b < 0));
            }
            other => prop_assert!(false, "unexpected {:?}", other),
        }
    }
}
