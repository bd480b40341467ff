//! Assignment coercion.
//!
//! `coerce` is total over (value, target tag): every pair either converts or
//! fails with a typed error. It is applied on every write to a slot, table
//! cell or parameter, and is idempotent.

use crate::errors::{
    integer_out_of_range, malformed_number, not_a_single_character, type_mismatch, EvalResult,
};
use crate::value::{KumirInt, Value};
use kumir_ir::TypeTag;
use std::num::IntErrorKind;

/// Truth literal spelled as text, case-insensitive.
pub fn truth_literal(text: &str) -> Option<bool> {
    match text.trim().to_lowercase().as_str() {
        "да" | "истина" => Some(true),
        "нет" | "ложь" => Some(false),
        _ => None,
    }
}

/// Convert `value` to the declared type `target`.
///
/// - Integer accepts only Integer (Real never narrows).
/// - Real accepts Integer or Real.
/// - Boolean accepts Boolean or a truth literal given as text.
/// - Character accepts any scalar whose textual form is exactly one symbol.
/// - String accepts the textual form of any scalar.
///
/// Tables never coerce to a scalar type.
pub fn coerce(value: Value, target: TypeTag) -> EvalResult<Value> {
    match (target, value) {
        (TypeTag::Integer, v @ Value::Integer(_))
        | (TypeTag::Real, v @ Value::Real(_))
        | (TypeTag::Boolean, v @ Value::Boolean(_))
        | (TypeTag::Character, v @ Value::Character(_))
        | (TypeTag::String, v @ Value::String(_)) => Ok(v),

        (TypeTag::Real, Value::Integer(n)) => Ok(Value::Real(n.to_f64())),

        (TypeTag::Boolean, Value::String(s)) => {
            truth_literal(&s)
                .map(Value::Boolean)
                .ok_or_else(|| type_mismatch(TypeTag::Boolean.keyword(), TypeTag::String.keyword()))
        }

        (TypeTag::Character, v @ (Value::Integer(_) | Value::Real(_) | Value::Boolean(_) | Value::String(_))) => {
            let text = v.to_string();
            let mut chars = text.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(Value::Character(c)),
                _ => Err(not_a_single_character(&text)),
            }
        }

        (TypeTag::String, v @ (Value::Integer(_) | Value::Real(_) | Value::Boolean(_) | Value::Character(_))) => {
            Ok(Value::String(v.to_string()))
        }

        (target, v) => Err(type_mismatch(target.keyword(), v.type_name())),
    }
}

/// Digits of a `$1F` literal.
pub fn parse_hex(digits: &str) -> EvalResult<KumirInt> {
    let exact = i64::from_str_radix(digits, 16).map_err(|err| match err.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
            integer_out_of_range(format!("${digits}"))
        }
        _ => malformed_number(&format!("${digits}"), TypeTag::Integer),
    })?;
    KumirInt::new(exact).ok_or_else(|| integer_out_of_range(format!("${digits}")))
}

/// Integer text: optional sign and decimal digits, or `$` and hex digits.
/// Surrounding whitespace is ignored.
pub fn parse_integer(text: &str) -> EvalResult<KumirInt> {
    let trimmed = text.trim();
    if let Some(digits) = trimmed.strip_prefix('$') {
        return parse_hex(digits);
    }
    let exact = trimmed.parse::<i64>().map_err(|err| match err.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => integer_out_of_range(trimmed),
        _ => malformed_number(text, TypeTag::Integer),
    })?;
    KumirInt::new(exact).ok_or_else(|| integer_out_of_range(exact))
}

/// Real text; `,` is accepted as the decimal separator.
pub fn parse_real(text: &str) -> EvalResult<f64> {
    let trimmed = text.trim();
    let normalized = trimmed.replace(',', ".");
    let looks_numeric = normalized
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '+' | '-' | 'e' | 'E'));
    match normalized.parse::<f64>() {
        Ok(x) if looks_numeric && x.is_finite() => Ok(x),
        _ => Err(malformed_number(text, TypeTag::Real)),
    }
}

/// Interpret one input line as a value of type `target`.
///
/// Strings take the line verbatim; characters need exactly one symbol.
pub fn parse_as(text: &str, target: TypeTag) -> EvalResult<Value> {
    match target {
        TypeTag::Integer => parse_integer(text).map(Value::Integer),
        TypeTag::Real => parse_real(text).map(Value::Real),
        TypeTag::Boolean => truth_literal(text)
            .map(Value::Boolean)
            .ok_or_else(|| malformed_number(text, TypeTag::Boolean)),
        TypeTag::Character => {
            let mut chars = text.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(Value::Character(c)),
                _ => Err(not_a_single_character(text)),
            }
        }
        TypeTag::String => Ok(Value::string(text)),
    }
}
