//! Numeric builtins.

use super::{fixed, int_arg, int_value, real_arg, ArgType, BuiltinContext, BuiltinSpec};
use crate::errors::{division_by_zero, domain_error, integer_out_of_range, invalid_argument, EvalResult};
use crate::value::{format_real, KumirInt, Value};
use rand::Rng;

const REAL1: &[&[ArgType]] = &[&[ArgType::REAL]];
const REAL2: &[&[ArgType]] = &[&[ArgType::REAL, ArgType::REAL]];
const INT1: &[&[ArgType]] = &[&[ArgType::INT]];
const INT2: &[&[ArgType]] = &[&[ArgType::INT, ArgType::INT]];

pub(super) static SPECS: &[BuiltinSpec] = &[
    fixed("sqrt", 1, REAL1, sqrt),
    fixed("sin", 1, REAL1, sin),
    fixed("cos", 1, REAL1, cos),
    fixed("tan", 1, REAL1, tan),
    fixed("arctan", 1, REAL1, arctan),
    fixed("arcsin", 1, REAL1, arcsin),
    fixed("arccos", 1, REAL1, arccos),
    fixed("ln", 1, REAL1, ln),
    fixed("lg", 1, REAL1, lg),
    fixed("exp", 1, REAL1, exp),
    fixed("abs", 1, REAL1, abs),
    fixed("iabs", 1, INT1, iabs),
    fixed("sign", 1, REAL1, sign),
    fixed("int", 1, REAL1, int_part),
    fixed("round", 1, REAL1, round),
    fixed("div", 2, INT2, div),
    fixed("mod", 2, INT2, modulo),
    fixed("max", 2, REAL2, max),
    fixed("min", 2, REAL2, min),
    fixed("imax", 2, INT2, imax),
    fixed("imin", 2, INT2, imin),
    fixed("irand", 2, INT2, irand),
    fixed("случайноецелое", 2, INT2, irand),
    fixed("rand", 2, REAL2, rand),
    fixed("случайноевещественное", 2, REAL2, rand),
    fixed("максцел", 0, &[], max_int),
    fixed("максвещ", 0, &[], max_real),
];

type Ret = EvalResult<Option<Value>>;

/// Real result; NaN and infinities are domain errors.
fn real(function: &str, x: f64) -> Ret {
    if x.is_finite() {
        Ok(Some(Value::Real(x)))
    } else {
        Err(domain_error(function, "результат не является конечным числом"))
    }
}

fn sqrt(_: &mut BuiltinContext<'_>, args: &mut [Value]) -> Ret {
    let x = real_arg(args, 0)?;
    if x < 0.0 {
        return Err(domain_error("sqrt", "корень из отрицательного числа"));
    }
    real("sqrt", x.sqrt())
}

fn sin(_: &mut BuiltinContext<'_>, args: &mut [Value]) -> Ret {
    real("sin", real_arg(args, 0)?.sin())
}

fn cos(_: &mut BuiltinContext<'_>, args: &mut [Value]) -> Ret {
    real("cos", real_arg(args, 0)?.cos())
}

fn tan(_: &mut BuiltinContext<'_>, args: &mut [Value]) -> Ret {
    real("tan", real_arg(args, 0)?.tan())
}

fn arctan(_: &mut BuiltinContext<'_>, args: &mut [Value]) -> Ret {
    real("arctan", real_arg(args, 0)?.atan())
}

fn arcsin(_: &mut BuiltinContext<'_>, args: &mut [Value]) -> Ret {
    let x = real_arg(args, 0)?;
    if !(-1.0..=1.0).contains(&x) {
        return Err(domain_error("arcsin", "аргумент вне отрезка [-1, 1]"));
    }
    real("arcsin", x.asin())
}

fn arccos(_: &mut BuiltinContext<'_>, args: &mut [Value]) -> Ret {
    let x = real_arg(args, 0)?;
    if !(-1.0..=1.0).contains(&x) {
        return Err(domain_error("arccos", "аргумент вне отрезка [-1, 1]"));
    }
    real("arccos", x.acos())
}

fn ln(_: &mut BuiltinContext<'_>, args: &mut [Value]) -> Ret {
    let x = real_arg(args, 0)?;
    if x <= 0.0 {
        return Err(domain_error("ln", "логарифм неположительного числа"));
    }
    real("ln", x.ln())
}

fn lg(_: &mut BuiltinContext<'_>, args: &mut [Value]) -> Ret {
    let x = real_arg(args, 0)?;
    if x <= 0.0 {
        return Err(domain_error("lg", "логарифм неположительного числа"));
    }
    real("lg", x.log10())
}

fn exp(_: &mut BuiltinContext<'_>, args: &mut [Value]) -> Ret {
    real("exp", real_arg(args, 0)?.exp())
}

/// Keeps the argument's type: `abs(-2)` is `2`, `abs(-2.5)` is `2.5`.
fn abs(_: &mut BuiltinContext<'_>, args: &mut [Value]) -> Ret {
    match args.first() {
        Some(Value::Integer(n)) => Ok(Some(Value::Integer(int_abs(*n)))),
        _ => real("abs", real_arg(args, 0)?.abs()),
    }
}

fn int_abs(n: KumirInt) -> KumirInt {
    if n.get() < 0 {
        n.neg()
    } else {
        n
    }
}

fn iabs(_: &mut BuiltinContext<'_>, args: &mut [Value]) -> Ret {
    Ok(Some(Value::Integer(int_abs(int_arg(args, 0)?))))
}

fn sign(_: &mut BuiltinContext<'_>, args: &mut [Value]) -> Ret {
    let x = real_arg(args, 0)?;
    let s = if x > 0.0 {
        1
    } else if x < 0.0 {
        -1
    } else {
        0
    };
    Ok(Some(Value::int(s)))
}

/// Integer nearest to `x` that `to_whole` picked, range-checked.
#[expect(
    clippy::cast_possible_truncation,
    reason = "value is range-checked against the integer bounds first"
)]
fn whole(x: f64, to_whole: fn(f64) -> f64) -> Ret {
    let w = to_whole(x);
    let bound = KumirInt::MAX.to_f64();
    if !(-bound..=bound).contains(&w) {
        return Err(integer_out_of_range(format_real(w)));
    }
    int_value(w as i64)
}

/// Largest integer not exceeding the argument.
fn int_part(_: &mut BuiltinContext<'_>, args: &mut [Value]) -> Ret {
    whole(real_arg(args, 0)?, f64::floor)
}

/// Halves round away from zero.
fn round(_: &mut BuiltinContext<'_>, args: &mut [Value]) -> Ret {
    whole(real_arg(args, 0)?, f64::round)
}

fn div(_: &mut BuiltinContext<'_>, args: &mut [Value]) -> Ret {
    let (a, b) = (int_arg(args, 0)?, int_arg(args, 1)?);
    if b.is_zero() {
        return Err(division_by_zero());
    }
    a.checked_floor_div(b)
        .map(|q| Some(Value::Integer(q)))
        .ok_or_else(|| integer_out_of_range(format!("{a} div {b}")))
}

fn modulo(_: &mut BuiltinContext<'_>, args: &mut [Value]) -> Ret {
    let (a, b) = (int_arg(args, 0)?, int_arg(args, 1)?);
    a.checked_floor_mod(b)
        .map(|r| Some(Value::Integer(r)))
        .ok_or_else(division_by_zero)
}

fn max(_: &mut BuiltinContext<'_>, args: &mut [Value]) -> Ret {
    real("max", real_arg(args, 0)?.max(real_arg(args, 1)?))
}

fn min(_: &mut BuiltinContext<'_>, args: &mut [Value]) -> Ret {
    real("min", real_arg(args, 0)?.min(real_arg(args, 1)?))
}

fn imax(_: &mut BuiltinContext<'_>, args: &mut [Value]) -> Ret {
    Ok(Some(Value::Integer(int_arg(args, 0)?.max(int_arg(args, 1)?))))
}

fn imin(_: &mut BuiltinContext<'_>, args: &mut [Value]) -> Ret {
    Ok(Some(Value::Integer(int_arg(args, 0)?.min(int_arg(args, 1)?))))
}

/// Uniform integer in `[a, b]`.
fn irand(ctx: &mut BuiltinContext<'_>, args: &mut [Value]) -> Ret {
    let (a, b) = (int_arg(args, 0)?.get(), int_arg(args, 1)?.get());
    if a > b {
        return Err(invalid_argument(
            "irand",
            &format!("нижняя граница {a} больше верхней {b}"),
        ));
    }
    int_value(i64::from(ctx.rng.gen_range(a..=b)))
}

/// Uniform real in `[a, b]`.
fn rand(ctx: &mut BuiltinContext<'_>, args: &mut [Value]) -> Ret {
    let (a, b) = (real_arg(args, 0)?, real_arg(args, 1)?);
    if a > b {
        return Err(invalid_argument(
            "rand",
            &format!(
                "нижняя граница {} больше верхней {}",
                format_real(a),
                format_real(b)
            ),
        ));
    }
    if !(b - a).is_finite() {
        return Err(invalid_argument("rand", "ширина диапазона не помещается в вещественное число"));
    }
    real("rand", ctx.rng.gen_range(a..=b))
}

fn max_int(_: &mut BuiltinContext<'_>, _: &mut [Value]) -> Ret {
    Ok(Some(Value::Integer(KumirInt::MAX)))
}

fn max_real(_: &mut BuiltinContext<'_>, _: &mut [Value]) -> Ret {
    Ok(Some(Value::Real(f64::MAX)))
}
