//! `вывод` item formatting.
//!
//! `x:w` right-aligns the text of `x` in `w` symbols; `x:w:p` additionally
//! prints numeric `x` with exactly `p` decimals. Text wider than `w` is
//! never truncated.

use crate::errors::{invalid_argument, EvalError, EvalResult};
use crate::value::Value;

/// Largest accepted field width or number of decimals.
pub(crate) const MAX_FORMAT_ARG: usize = u16::MAX as usize;

/// Text of one output item.
pub(crate) fn format_item(value: &Value, width: Option<i64>, precision: Option<i64>) -> EvalResult<String> {
    let text = match (precision, value.as_real()) {
        (Some(p), Some(x)) => {
            let p = format_arg(p, "число знаков")?;
            format!("{x:.p$}")
        }
        _ => value.to_string(),
    };
    match width {
        Some(w) => Ok(pad_left(&text, format_arg(w, "ширина поля")?)),
        None => Ok(text),
    }
}

fn format_arg(n: i64, what: &str) -> EvalResult<usize> {
    let out_of_range = || -> EvalError {
        invalid_argument("вывод", &format!("{what} {n} вне диапазона 0..{MAX_FORMAT_ARG}"))
    };
    match usize::try_from(n) {
        Ok(n) if n <= MAX_FORMAT_ARG => Ok(n),
        _ => Err(out_of_range()),
    }
}

fn pad_left(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    let mut padded = " ".repeat(width - len);
    padded.push_str(text);
    padded
}

#[cfg(test)]
mod tests;
