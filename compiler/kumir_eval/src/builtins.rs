//! Builtin function and procedure library.
//!
//! Each builtin is a static [`BuiltinSpec`]: name, arity range, accepted
//! argument-type signatures, per-position passing modes and a plain `fn`
//! handler. The [`BuiltinRegistry`] interns the names once and is read-only
//! afterwards.
//!
//! Dispatch order for a call: arity, then signatures, then the handler.
//! Handlers receive the arguments as a mutable slice; positions declared
//! `рез`/`аргрез` are written back to the caller's places after the handler
//! returns.

mod math;
mod text;

use crate::errors::{type_mismatch, wrong_arg_count, wrong_arg_types, EvalResult};
use crate::value::{KumirInt, Value};
use kumir_ir::{Name, ParamMode, StringInterner, TypeTag};
use rand::rngs::StdRng;
use rustc_hash::FxHashMap;
use std::fmt;

/// Accepted type at one argument position.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ArgType {
    /// Integer also satisfies Real, Character also satisfies String.
    Tag(TypeTag),
    /// `любой`: any scalar.
    Any,
}

impl ArgType {
    pub const INT: ArgType = ArgType::Tag(TypeTag::Integer);
    pub const REAL: ArgType = ArgType::Tag(TypeTag::Real);
    pub const BOOL: ArgType = ArgType::Tag(TypeTag::Boolean);
    pub const CHAR: ArgType = ArgType::Tag(TypeTag::Character);
    pub const STR: ArgType = ArgType::Tag(TypeTag::String);

    pub fn accepts(self, value: &Value) -> bool {
        match (self, value) {
            (_, Value::Table(_)) => false,
            (ArgType::Any, _)
            | (ArgType::Tag(TypeTag::Real), Value::Integer(_))
            | (ArgType::Tag(TypeTag::String), Value::Character(_)) => true,
            (ArgType::Tag(tag), v) => v.tag() == Some(tag),
        }
    }
}

impl fmt::Display for ArgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgType::Tag(tag) => write!(f, "{tag}"),
            ArgType::Any => f.write_str("любой"),
        }
    }
}

/// State handlers may touch.
pub struct BuiltinContext<'c> {
    pub rng: &'c mut StdRng,
}

/// `Some` for functions, `None` for procedures.
pub type BuiltinFn = fn(&mut BuiltinContext<'_>, &mut [Value]) -> EvalResult<Option<Value>>;

pub struct BuiltinSpec {
    pub name: &'static str,
    pub min_args: usize,
    pub max_args: usize,
    /// Accepted type lists; empty means unchecked.
    pub signatures: &'static [&'static [ArgType]],
    /// Passing mode per position; positions past the end are `арг`.
    pub modes: &'static [ParamMode],
    pub handler: BuiltinFn,
}

impl BuiltinSpec {
    pub fn mode(&self, position: usize) -> ParamMode {
        self.modes.get(position).copied().unwrap_or_default()
    }

    pub fn check_arity(&self, got: usize) -> EvalResult<()> {
        if (self.min_args..=self.max_args).contains(&got) {
            return Ok(());
        }
        Err(if self.min_args == self.max_args {
            wrong_arg_count(self.name, self.min_args, got)
        } else {
            wrong_arg_count(
                self.name,
                format_args!("от {} до {}", self.min_args, self.max_args),
                got,
            )
        })
    }

    /// At least one signature must accept every `арг`/`аргрез` position.
    /// `рез` positions carry placeholders and are not checked.
    pub fn check_types(&self, args: &[Value]) -> EvalResult<()> {
        if self.signatures.is_empty() {
            return Ok(());
        }
        let matches = |signature: &&[ArgType]| {
            signature.len() == args.len()
                && signature
                    .iter()
                    .zip(args)
                    .enumerate()
                    .all(|(i, (ty, arg))| self.mode(i) == ParamMode::Out || ty.accepts(arg))
        };
        if self.signatures.iter().any(matches) {
            return Ok(());
        }
        let got: Vec<_> = args.iter().map(Value::type_name).collect();
        Err(wrong_arg_types(self.name, &format!("({})", got.join(", "))))
    }
}

/// Fixed-arity builtin with `арг` parameters only.
pub(crate) const fn fixed(
    name: &'static str,
    arity: usize,
    signatures: &'static [&'static [ArgType]],
    handler: BuiltinFn,
) -> BuiltinSpec {
    BuiltinSpec {
        name,
        min_args: arity,
        max_args: arity,
        signatures,
        modes: &[],
        handler,
    }
}

impl fmt::Debug for BuiltinSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuiltinSpec")
            .field("name", &self.name)
            .field("min_args", &self.min_args)
            .field("max_args", &self.max_args)
            .finish_non_exhaustive()
    }
}

/// Name-indexed builtins.
#[derive(Debug, Default)]
pub struct BuiltinRegistry {
    by_name: FxHashMap<Name, &'static BuiltinSpec>,
}

impl BuiltinRegistry {
    /// Registry with the standard library.
    pub fn new(interner: &StringInterner) -> Self {
        let mut registry = Self::empty();
        for spec in math::SPECS.iter().chain(text::SPECS) {
            registry.register(interner, spec);
        }
        tracing::debug!(count = registry.len(), "builtin registry built");
        registry
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Add or replace a builtin.
    pub fn register(&mut self, interner: &StringInterner, spec: &'static BuiltinSpec) {
        self.by_name.insert(interner.intern(spec.name), spec);
    }

    pub fn get(&self, name: Name) -> Option<&'static BuiltinSpec> {
        self.by_name.get(&name).copied()
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

// Argument accessors. Signatures are checked before handlers run, so a
// mismatch here means a `BuiltinSpec` and its handler disagree.

pub(crate) fn int_arg(args: &[Value], i: usize) -> EvalResult<KumirInt> {
    match args.get(i) {
        Some(Value::Integer(n)) => Ok(*n),
        other => Err(arg_mismatch(TypeTag::Integer, other)),
    }
}

pub(crate) fn real_arg(args: &[Value], i: usize) -> EvalResult<f64> {
    let arg = args.get(i);
    arg.and_then(Value::as_real)
        .ok_or_else(|| arg_mismatch(TypeTag::Real, arg))
}

pub(crate) fn text_arg(args: &[Value], i: usize) -> EvalResult<String> {
    let arg = args.get(i);
    arg.and_then(Value::as_text)
        .ok_or_else(|| arg_mismatch(TypeTag::String, arg))
}

#[cold]
fn arg_mismatch(expected: TypeTag, got: Option<&Value>) -> crate::errors::EvalError {
    type_mismatch(expected.keyword(), got.map_or("", Value::type_name))
}

/// Integer result from an exact `i64`.
pub(crate) fn int_value(exact: i64) -> EvalResult<Option<Value>> {
    KumirInt::new(exact)
        .map(|n| Some(Value::Integer(n)))
        .ok_or_else(|| crate::errors::integer_out_of_range(exact))
}
