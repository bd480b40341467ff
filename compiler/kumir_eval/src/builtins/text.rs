//! String builtins and string/number conversions.

use super::{fixed, int_arg, int_value, real_arg, text_arg, ArgType, BuiltinContext, BuiltinSpec};
use crate::coerce::{parse_integer, parse_real};
use crate::errors::{invalid_argument, not_a_single_character, EvalResult};
use crate::value::{format_real, Value};
use kumir_ir::ParamMode;

const STR1: &[&[ArgType]] = &[&[ArgType::STR]];
const STR2: &[&[ArgType]] = &[&[ArgType::STR, ArgType::STR]];
const INT1: &[&[ArgType]] = &[&[ArgType::INT]];
const REAL1: &[&[ArgType]] = &[&[ArgType::REAL]];
const PARSE: &[&[ArgType]] = &[&[ArgType::STR], &[ArgType::STR, ArgType::BOOL]];

pub(super) static SPECS: &[BuiltinSpec] = &[
    fixed("длин", 1, STR1, length),
    fixed("позиция", 2, STR2, position),
    fixed("поз", 2, STR2, position),
    BuiltinSpec {
        name: "лит_в_цел",
        min_args: 1,
        max_args: 2,
        signatures: PARSE,
        modes: &[ParamMode::In, ParamMode::Out],
        handler: text_to_int,
    },
    BuiltinSpec {
        name: "лит_в_вещ",
        min_args: 1,
        max_args: 2,
        signatures: PARSE,
        modes: &[ParamMode::In, ParamMode::Out],
        handler: text_to_real,
    },
    fixed("цел_в_лит", 1, INT1, int_to_text),
    fixed("вещ_в_лит", 1, REAL1, real_to_text),
    fixed("юникод", 1, STR1, unicode),
    fixed("символ", 1, INT1, character),
    fixed("юнисимвол", 1, INT1, character),
    BuiltinSpec {
        name: "удалить",
        min_args: 3,
        max_args: 3,
        signatures: &[&[ArgType::STR, ArgType::INT, ArgType::INT]],
        modes: &[ParamMode::InOut],
        handler: delete,
    },
    BuiltinSpec {
        name: "вставить",
        min_args: 3,
        max_args: 3,
        signatures: &[&[ArgType::STR, ArgType::STR, ArgType::INT]],
        modes: &[ParamMode::In, ParamMode::InOut],
        handler: insert,
    },
];

type Ret = EvalResult<Option<Value>>;

fn char_count(s: &str) -> i64 {
    i64::try_from(s.chars().count()).unwrap_or(i64::MAX)
}

fn length(_: &mut BuiltinContext<'_>, args: &mut [Value]) -> Ret {
    int_value(char_count(&text_arg(args, 0)?))
}

/// `позиция(фрагмент, строка)`: 1-based position of the first occurrence,
/// 0 when absent. An empty fragment is found at 1 in any non-empty string.
fn position(_: &mut BuiltinContext<'_>, args: &mut [Value]) -> Ret {
    let (fragment, haystack) = (text_arg(args, 0)?, text_arg(args, 1)?);
    if fragment.is_empty() {
        return int_value(i64::from(!haystack.is_empty()));
    }
    match haystack.find(&fragment) {
        Some(byte) => int_value(char_count(&haystack[..byte]) + 1),
        None => int_value(0),
    }
}

/// With the optional `рез лог успех` argument a malformed string yields 0
/// and `успех = нет` instead of an error.
fn text_to_int(_: &mut BuiltinContext<'_>, args: &mut [Value]) -> Ret {
    let parsed = parse_integer(&text_arg(args, 0)?);
    match (parsed, args.get_mut(1)) {
        (Ok(n), Some(flag)) => {
            *flag = Value::Boolean(true);
            Ok(Some(Value::Integer(n)))
        }
        (Err(_), Some(flag)) => {
            *flag = Value::Boolean(false);
            Ok(Some(Value::int(0)))
        }
        (parsed, None) => parsed.map(|n| Some(Value::Integer(n))),
    }
}

fn text_to_real(_: &mut BuiltinContext<'_>, args: &mut [Value]) -> Ret {
    let parsed = parse_real(&text_arg(args, 0)?);
    match (parsed, args.get_mut(1)) {
        (Ok(x), Some(flag)) => {
            *flag = Value::Boolean(true);
            Ok(Some(Value::Real(x)))
        }
        (Err(_), Some(flag)) => {
            *flag = Value::Boolean(false);
            Ok(Some(Value::Real(0.0)))
        }
        (parsed, None) => parsed.map(|x| Some(Value::Real(x))),
    }
}

fn int_to_text(_: &mut BuiltinContext<'_>, args: &mut [Value]) -> Ret {
    Ok(Some(Value::String(int_arg(args, 0)?.to_string())))
}

fn real_to_text(_: &mut BuiltinContext<'_>, args: &mut [Value]) -> Ret {
    Ok(Some(Value::String(format_real(real_arg(args, 0)?))))
}

fn unicode(_: &mut BuiltinContext<'_>, args: &mut [Value]) -> Ret {
    let text = text_arg(args, 0)?;
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => int_value(i64::from(u32::from(c))),
        _ => Err(not_a_single_character(&text)),
    }
}

fn character(_: &mut BuiltinContext<'_>, args: &mut [Value]) -> Ret {
    let code = int_arg(args, 0)?.get();
    u32::try_from(code)
        .ok()
        .filter(|&c| c != 0)
        .and_then(char::from_u32)
        .map(|c| Some(Value::Character(c)))
        .ok_or_else(|| invalid_argument("символ", &format!("нет символа с кодом {code}")))
}

/// 1-based, clamped char range `[start, start + count)`.
fn char_range(s: &str, start: i32, count: i32) -> (usize, usize) {
    let len = s.chars().count();
    let from = usize::try_from(start.max(1) - 1).unwrap_or(0).min(len);
    let take = usize::try_from(count.max(0)).unwrap_or(0);
    (from, from.saturating_add(take).min(len))
}

/// `удалить(аргрез лит s, цел начало, цел количество)`.
fn delete(_: &mut BuiltinContext<'_>, args: &mut [Value]) -> Ret {
    let s = text_arg(args, 0)?;
    let (start, count) = (int_arg(args, 1)?.get(), int_arg(args, 2)?.get());
    let (from, to) = char_range(&s, start, count);
    let kept: String = s
        .chars()
        .enumerate()
        .filter(|(i, _)| *i < from || *i >= to)
        .map(|(_, c)| c)
        .collect();
    if let Some(slot) = args.first_mut() {
        *slot = Value::String(kept);
    }
    Ok(None)
}

/// `вставить(лит фрагмент, аргрез лит s, цел начало)`: insert before the
/// `начало`-th character; past the end appends.
fn insert(_: &mut BuiltinContext<'_>, args: &mut [Value]) -> Ret {
    let fragment = text_arg(args, 0)?;
    let s = text_arg(args, 1)?;
    let (at, _) = char_range(&s, int_arg(args, 2)?.get(), 0);
    let mut joined: String = s.chars().take(at).collect();
    joined.push_str(&fragment);
    joined.extend(s.chars().skip(at));
    if let Some(slot) = args.get_mut(1) {
        *slot = Value::String(joined);
    }
    Ok(None)
}
