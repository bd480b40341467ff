//! Runtime error taxonomy.
//!
//! `EvalErrorKind` carries structured data for every failure the engine can
//! report. Each kind belongs to one [`ErrorCategory`] (the user-facing class
//! of the error, with a stable diagnostic code). Factory functions below are
//! the public way to build errors; they fill both `kind` and `message`.
//!
//! Control transfer (`выход`, `стоп`) is never an error: it travels as
//! [`crate::Signal`] on the `Ok` side of `EvalResult`.

use kumir_ir::{SourceLocation, Span, TypeTag};
use std::fmt;

/// Result of evaluation.
pub type EvalResult<T> = Result<T, EvalError>;

/// User-facing error class.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorCategory {
    Declaration,
    Type,
    Value,
    Index,
    Name,
    Argument,
    NotImplemented,
    Runtime,
    Io,
}

impl ErrorCategory {
    /// Stable diagnostic code.
    pub const fn code(self) -> &'static str {
        match self {
            Self::Declaration => "K1001",
            Self::Type => "K1002",
            Self::Value => "K1003",
            Self::Index => "K1004",
            Self::Name => "K1005",
            Self::Argument => "K1006",
            Self::NotImplemented => "K1007",
            Self::Runtime => "K1008",
            Self::Io => "K1009",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Declaration => "ошибка объявления",
            Self::Type => "ошибка типа",
            Self::Value => "ошибка значения",
            Self::Index => "ошибка индекса",
            Self::Name => "ошибка имени",
            Self::Argument => "ошибка аргументов",
            Self::NotImplemented => "не реализовано",
            Self::Runtime => "ошибка выполнения",
            Self::Io => "ошибка ввода-вывода",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Typed error condition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    // Declaration
    DuplicateDeclaration {
        name: String,
    },
    DuplicateAlgorithm {
        name: String,
    },
    MissingTableBounds {
        name: String,
    },

    // Type
    TypeMismatch {
        expected: String,
        got: String,
    },
    InvalidBinaryOp {
        op: &'static str,
        left: &'static str,
        right: &'static str,
    },
    InvalidUnaryOp {
        op: &'static str,
        operand: &'static str,
    },
    ConditionNotBoolean {
        construct: &'static str,
        got: &'static str,
    },
    NotInteger {
        what: String,
        got: &'static str,
    },
    NotATable {
        name: String,
    },
    NotASingleCharacter {
        text: String,
    },
    TableShapeMismatch {
        name: String,
    },
    NoResultValue {
        name: String,
    },

    // Value
    IntegerOutOfRange {
        value: String,
    },
    MalformedNumber {
        text: String,
        target: TypeTag,
    },
    DomainError {
        function: String,
        detail: String,
    },

    // Index
    IndexOutOfBounds {
        name: String,
        dimension: usize,
        index: i64,
        lower: i32,
        upper: i32,
    },
    IndexArity {
        name: String,
        expected: usize,
        got: usize,
    },
    StringIndexOutOfBounds {
        index: i64,
        len: usize,
    },

    // Name
    UndefinedVariable {
        name: String,
    },
    UndefinedAlgorithm {
        name: String,
    },

    // Argument
    WrongArgCount {
        callee: String,
        expected: String,
        got: usize,
    },
    WrongArgTypes {
        callee: String,
        got: String,
    },
    NotAssignable {
        callee: String,
        position: usize,
    },
    InvalidArgument {
        function: String,
        detail: String,
    },

    // Not implemented
    Unsupported {
        feature: String,
    },

    // Runtime
    ZeroLoopStep,
    AssertionFailed,
    MissingResult {
        name: String,
    },
    Uninitialized {
        name: String,
    },
    DivisionByZero,
    RecursionLimit {
        limit: usize,
    },
    StepBudgetExhausted {
        limit: u64,
    },
    NoEntryAlgorithm,
    WorldFailure {
        performer: String,
        message: String,
    },
    ScopeUnderflow,

    // I/O
    Io {
        message: String,
    },
}

impl EvalErrorKind {
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::DuplicateDeclaration { .. }
            | Self::DuplicateAlgorithm { .. }
            | Self::MissingTableBounds { .. } => ErrorCategory::Declaration,
            Self::TypeMismatch { .. }
            | Self::InvalidBinaryOp { .. }
            | Self::InvalidUnaryOp { .. }
            | Self::ConditionNotBoolean { .. }
            | Self::NotInteger { .. }
            | Self::NotATable { .. }
            | Self::NotASingleCharacter { .. }
            | Self::TableShapeMismatch { .. }
            | Self::NoResultValue { .. } => ErrorCategory::Type,
            Self::IntegerOutOfRange { .. }
            | Self::MalformedNumber { .. }
            | Self::DomainError { .. } => ErrorCategory::Value,
            Self::IndexOutOfBounds { .. }
            | Self::IndexArity { .. }
            | Self::StringIndexOutOfBounds { .. } => ErrorCategory::Index,
            Self::UndefinedVariable { .. } | Self::UndefinedAlgorithm { .. } => {
                ErrorCategory::Name
            }
            Self::WrongArgCount { .. }
            | Self::WrongArgTypes { .. }
            | Self::NotAssignable { .. }
            | Self::InvalidArgument { .. } => ErrorCategory::Argument,
            Self::Unsupported { .. } => ErrorCategory::NotImplemented,
            Self::ZeroLoopStep
            | Self::AssertionFailed
            | Self::MissingResult { .. }
            | Self::Uninitialized { .. }
            | Self::DivisionByZero
            | Self::RecursionLimit { .. }
            | Self::StepBudgetExhausted { .. }
            | Self::NoEntryAlgorithm
            | Self::WorldFailure { .. }
            | Self::ScopeUnderflow => ErrorCategory::Runtime,
            Self::Io { .. } => ErrorCategory::Io,
        }
    }
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateDeclaration { name } => {
                write!(f, "Переменная '{name}' уже объявлена в этой области")
            }
            Self::DuplicateAlgorithm { name } => write!(f, "Алгоритм '{name}' уже определён"),
            Self::MissingTableBounds { name } => {
                write!(f, "Для таблицы '{name}' не заданы границы")
            }
            Self::TypeMismatch { expected, got } => {
                write!(f, "Несовместимые типы: ожидался '{expected}', получен '{got}'")
            }
            Self::InvalidBinaryOp { op, left, right } => write!(
                f,
                "Операция '{op}' не применима к типам '{left}' и '{right}'"
            ),
            Self::InvalidUnaryOp { op, operand } => {
                write!(f, "Операция '{op}' не применима к типу '{operand}'")
            }
            Self::ConditionNotBoolean { construct, got } => write!(
                f,
                "Условие в '{construct}' должно быть логическим, получен тип '{got}'"
            ),
            Self::NotInteger { what, got } => {
                write!(f, "Значение '{what}' должно быть целым, получен тип '{got}'")
            }
            Self::NotATable { name } => write!(f, "'{name}' не является таблицей"),
            Self::NotASingleCharacter { text } => {
                write!(f, "Значение '{text}' не является одним символом")
            }
            Self::TableShapeMismatch { name } => write!(
                f,
                "Таблица '{name}': не совпадают тип элементов или число измерений"
            ),
            Self::NoResultValue { name } => {
                write!(f, "Алгоритм '{name}' не возвращает значения")
            }
            Self::IntegerOutOfRange { value } => {
                write!(f, "Значение {value} вне диапазона целого типа")
            }
            Self::MalformedNumber { text, target } => {
                write!(f, "Невозможно преобразовать '{text}' к типу '{target}'")
            }
            Self::DomainError { function, detail } | Self::InvalidArgument { function, detail } => {
                write!(f, "Функция '{function}': {detail}")
            }
            Self::IndexOutOfBounds {
                name,
                dimension,
                index,
                lower,
                upper,
            } => write!(
                f,
                "Индекс {index} вне границ [{lower}:{upper}] измерения {dimension} таблицы '{name}'"
            ),
            Self::IndexArity {
                name,
                expected,
                got,
            } => write!(
                f,
                "Таблица '{name}' имеет измерений: {expected}, указано индексов: {got}"
            ),
            Self::StringIndexOutOfBounds { index, len } => {
                write!(f, "Индекс {index} вне строки длины {len}")
            }
            Self::UndefinedVariable { name } => write!(f, "Имя '{name}' не объявлено"),
            Self::UndefinedAlgorithm { name } => write!(f, "Алгоритм '{name}' не найден"),
            Self::WrongArgCount {
                callee,
                expected,
                got,
            } => write!(
                f,
                "Алгоритм '{callee}' ожидает аргументов: {expected}, передано: {got}"
            ),
            Self::WrongArgTypes { callee, got } => {
                write!(f, "Недопустимые типы аргументов для '{callee}': {got}")
            }
            Self::NotAssignable { callee, position } => write!(
                f,
                "Аргумент {position} алгоритма '{callee}' должен быть переменной или элементом таблицы"
            ),
            Self::Unsupported { feature } => write!(f, "Не поддерживается: {feature}"),
            Self::ZeroLoopStep => f.write_str("Шаг цикла не может быть равен нулю"),
            Self::AssertionFailed => f.write_str("Утверждение ложно"),
            Self::MissingResult { name } => {
                write!(f, "Функция '{name}' не вернула значение")
            }
            Self::Uninitialized { name } => {
                write!(f, "Переменная '{name}' используется до инициализации")
            }
            Self::DivisionByZero => f.write_str("Деление на ноль"),
            Self::RecursionLimit { limit } => {
                write!(f, "Превышена глубина вызовов ({limit})")
            }
            Self::StepBudgetExhausted { limit } => {
                write!(f, "Превышен лимит шагов выполнения ({limit})")
            }
            Self::NoEntryAlgorithm => {
                f.write_str("Не найден главный алгоритм (без параметров и результата)")
            }
            Self::WorldFailure { performer, message } => {
                write!(f, "Отказ исполнителя '{performer}': {message}")
            }
            Self::ScopeUnderflow => f.write_str("Внутренняя ошибка: попытка удалить глобальную область"),
            Self::Io { message } => write!(f, "Ошибка ввода-вывода: {message}"),
        }
    }
}

/// One frame of an algorithm-call backtrace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BacktraceFrame {
    pub name: String,
    /// Call site.
    pub span: Option<Span>,
}

/// Snapshot of the call stack at the error site, innermost call first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvalBacktrace {
    frames: Vec<BacktraceFrame>,
}

impl EvalBacktrace {
    pub fn new(frames: Vec<BacktraceFrame>) -> Self {
        Self { frames }
    }

    pub fn frames(&self) -> &[BacktraceFrame] {
        &self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl fmt::Display for EvalBacktrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, frame) in self.frames.iter().enumerate() {
            write!(f, "  {i}: {}", frame.name)?;
            if let Some(span) = frame.span {
                write!(f, " at {span}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Evaluation error.
#[derive(Clone, Debug, PartialEq)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// For factory-built errors this equals `kind.to_string()`.
    pub message: String,
    /// Node that raised the error. The innermost span wins.
    pub span: Option<Span>,
    /// Line/column/text of `span`, filled in once source text is known.
    pub location: Option<SourceLocation>,
    pub backtrace: Option<EvalBacktrace>,
}

impl EvalError {
    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            message,
            span: None,
            location: None,
            backtrace: None,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    /// Attach a span unless a more precise one is already set.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        if self.span.is_none() && !span.is_dummy() {
            self.span = Some(span);
        }
        self
    }

    #[must_use]
    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }

    /// Attach a backtrace unless one was captured deeper in the stack.
    #[must_use]
    pub fn with_backtrace(mut self, backtrace: EvalBacktrace) -> Self {
        if self.backtrace.is_none() && !backtrace.is_empty() {
            self.backtrace = Some(backtrace);
        }
        self
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(location) => write!(f, "{} ({location})", self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for EvalError {}

// Declaration

#[cold]
pub fn duplicate_declaration(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::DuplicateDeclaration {
        name: name.to_string(),
    })
}

#[cold]
pub fn duplicate_algorithm(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::DuplicateAlgorithm {
        name: name.to_string(),
    })
}

#[cold]
pub fn missing_table_bounds(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::MissingTableBounds {
        name: name.to_string(),
    })
}

// Type

#[cold]
pub fn type_mismatch(expected: &str, got: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch {
        expected: expected.to_string(),
        got: got.to_string(),
    })
}

#[cold]
pub fn invalid_binary_op(op: &'static str, left: &'static str, right: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidBinaryOp { op, left, right })
}

#[cold]
pub fn invalid_unary_op(op: &'static str, operand: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidUnaryOp { op, operand })
}

#[cold]
pub fn condition_not_boolean(construct: &'static str, got: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ConditionNotBoolean { construct, got })
}

#[cold]
pub fn not_integer(what: &str, got: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotInteger {
        what: what.to_string(),
        got,
    })
}

#[cold]
pub fn not_a_table(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotATable {
        name: name.to_string(),
    })
}

#[cold]
pub fn not_a_single_character(text: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotASingleCharacter {
        text: text.to_string(),
    })
}

#[cold]
pub fn table_shape_mismatch(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TableShapeMismatch {
        name: name.to_string(),
    })
}

#[cold]
pub fn no_result_value(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NoResultValue {
        name: name.to_string(),
    })
}

// Value

#[cold]
pub fn integer_out_of_range(value: impl fmt::Display) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IntegerOutOfRange {
        value: value.to_string(),
    })
}

#[cold]
pub fn malformed_number(text: &str, target: TypeTag) -> EvalError {
    EvalError::from_kind(EvalErrorKind::MalformedNumber {
        text: text.to_string(),
        target,
    })
}

#[cold]
pub fn domain_error(function: &str, detail: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::DomainError {
        function: function.to_string(),
        detail: detail.to_string(),
    })
}

// Index

#[cold]
pub fn index_out_of_bounds(name: &str, dimension: usize, index: i64, lower: i32, upper: i32) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IndexOutOfBounds {
        name: name.to_string(),
        dimension,
        index,
        lower,
        upper,
    })
}

#[cold]
pub fn index_arity(name: &str, expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IndexArity {
        name: name.to_string(),
        expected,
        got,
    })
}

#[cold]
pub fn string_index_out_of_bounds(index: i64, len: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::StringIndexOutOfBounds { index, len })
}

// Name

#[cold]
pub fn undefined_variable(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedVariable {
        name: name.to_string(),
    })
}

#[cold]
pub fn undefined_algorithm(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedAlgorithm {
        name: name.to_string(),
    })
}

// Argument

#[cold]
pub fn wrong_arg_count(callee: &str, expected: impl fmt::Display, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::WrongArgCount {
        callee: callee.to_string(),
        expected: expected.to_string(),
        got,
    })
}

#[cold]
pub fn wrong_arg_types(callee: &str, got: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::WrongArgTypes {
        callee: callee.to_string(),
        got: got.to_string(),
    })
}

/// `position` is one-based.
#[cold]
pub fn not_assignable(callee: &str, position: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotAssignable {
        callee: callee.to_string(),
        position,
    })
}

#[cold]
pub fn invalid_argument(function: &str, detail: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidArgument {
        function: function.to_string(),
        detail: detail.to_string(),
    })
}

// Not implemented

#[cold]
pub fn unsupported(feature: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Unsupported {
        feature: feature.to_string(),
    })
}

// Runtime

#[cold]
pub fn zero_loop_step() -> EvalError {
    EvalError::from_kind(EvalErrorKind::ZeroLoopStep)
}

#[cold]
pub fn assertion_failed() -> EvalError {
    EvalError::from_kind(EvalErrorKind::AssertionFailed)
}

#[cold]
pub fn missing_result(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::MissingResult {
        name: name.to_string(),
    })
}

#[cold]
pub fn uninitialized(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Uninitialized {
        name: name.to_string(),
    })
}

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivisionByZero)
}

#[cold]
pub fn recursion_limit_exceeded(limit: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::RecursionLimit { limit })
}

#[cold]
pub fn step_budget_exhausted(limit: u64) -> EvalError {
    EvalError::from_kind(EvalErrorKind::StepBudgetExhausted { limit })
}

#[cold]
pub fn no_entry_algorithm() -> EvalError {
    EvalError::from_kind(EvalErrorKind::NoEntryAlgorithm)
}

#[cold]
pub fn world_failure(performer: &str, message: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::WorldFailure {
        performer: performer.to_string(),
        message: message.to_string(),
    })
}

#[cold]
pub fn scope_underflow() -> EvalError {
    EvalError::from_kind(EvalErrorKind::ScopeUnderflow)
}

// I/O

#[cold]
pub fn io_failure(message: impl fmt::Display) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Io {
        message: message.to_string(),
    })
}
