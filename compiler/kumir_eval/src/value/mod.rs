//! Runtime values.
//!
//! `Value` is a closed sum: every consumer matches exhaustively, so adding a
//! variant is a compile error at each site that must learn about it.

mod int;
mod table;

use kumir_ir::TypeTag;
use std::fmt;

pub use int::KumirInt;
pub use table::{Dim, Table, TableError, TableIndex};

/// Name of the table pseudo-type in messages.
pub const TABLE_TYPE_NAME: &str = "таб";

/// The empty character, default of `сим` slots. Prints as nothing.
pub const EMPTY_CHAR: char = '\0';

/// Runtime value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Integer(KumirInt),
    Real(f64),
    Boolean(bool),
    Character(char),
    String(String),
    /// Tables are values: cloning copies bounds and storage.
    Table(Table),
}

impl Value {
    /// Integer value from an in-range `i32`.
    ///
    /// Out-of-range inputs (only `i32::MIN`) clamp to the minimum; use
    /// [`KumirInt::new`] when the input is untrusted.
    pub fn int(n: i32) -> Self {
        Value::Integer(KumirInt::new(i64::from(n)).unwrap_or(KumirInt::MIN))
    }

    pub fn string(s: impl Into<String>) -> Self {
        Value::String(s.into())
    }

    /// Default value of a freshly declared slot or unwritten table cell.
    pub fn default_for(tag: TypeTag) -> Self {
        match tag {
            TypeTag::Integer => Value::Integer(KumirInt::ZERO),
            TypeTag::Real => Value::Real(0.0),
            TypeTag::Boolean => Value::Boolean(false),
            TypeTag::Character => Value::Character(EMPTY_CHAR),
            TypeTag::String => Value::String(String::new()),
        }
    }

    /// Scalar type tag; `None` for tables.
    pub fn tag(&self) -> Option<TypeTag> {
        match self {
            Value::Integer(_) => Some(TypeTag::Integer),
            Value::Real(_) => Some(TypeTag::Real),
            Value::Boolean(_) => Some(TypeTag::Boolean),
            Value::Character(_) => Some(TypeTag::Character),
            Value::String(_) => Some(TypeTag::String),
            Value::Table(_) => None,
        }
    }

    /// Type name for diagnostics.
    pub fn type_name(&self) -> &'static str {
        self.tag().map_or(TABLE_TYPE_NAME, TypeTag::keyword)
    }

    pub fn as_int(&self) -> Option<KumirInt> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Numeric view with Integer promoted to Real.
    pub fn as_real(&self) -> Option<f64> {
        match self {
            Value::Integer(n) => Some(n.to_f64()),
            Value::Real(x) => Some(*x),
            _ => None,
        }
    }

    /// Textual view of a character or string.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Value::Character(EMPTY_CHAR) => Some(String::new()),
            Value::Character(c) => Some(c.to_string()),
            Value::String(s) => Some(s.clone()),
            _ => None,
        }
    }
}

/// Shortest round-trip text of a real, the way `вывод` prints it.
pub fn format_real(x: f64) -> String {
    if x.is_nan() {
        return "NaN".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    let text = x.to_string();
    if text == "-0" {
        "0".to_string()
    } else {
        text
    }
}

pub fn format_bool(b: bool) -> &'static str {
    if b {
        "да"
    } else {
        "нет"
    }
}

/// Textual form: what `вывод` prints and what String coercion produces.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{n}"),
            Value::Real(x) => f.write_str(&format_real(*x)),
            Value::Boolean(b) => f.write_str(format_bool(*b)),
            Value::Character(EMPTY_CHAR) => Ok(()),
            Value::Character(c) => write!(f, "{c}"),
            Value::String(s) => f.write_str(s),
            Value::Table(t) => write!(f, "{TABLE_TYPE_NAME} {}[{}]", t.element_type(), t.rank()),
        }
    }
}

#[cfg(test)]
mod tests;
