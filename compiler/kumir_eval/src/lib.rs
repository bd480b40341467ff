//! Kumir Eval - execution engine for the Kumir educational language.
//!
//! Takes a parsed [`kumir_ir::Program`] and runs it: the introduction
//! first, then the entry algorithm. The result is a [`RunOutcome`] with the
//! accumulated output and, if the run failed, the first error and its
//! position.
//!
//! # Architecture
//!
//! - `Value`, `coerce`: the closed value model and assignment coercion
//! - `Environment`: the scope stack (global frame, call frames, loop frames)
//! - `evaluate_binary` / `evaluate_unary`: operator contracts
//! - `Interpreter`: expression evaluation, statement execution, call protocol
//! - `BuiltinRegistry`, `AlgorithmRegistry`: write-once dispatch tables
//! - `IoShell`, `MicroWorld`, `TraceCallback`: host collaborators
//!
//! Errors travel as [`EvalError`] on the `Err` side of [`EvalResult`];
//! `выход` and `стоп` travel as [`Signal`] on the `Ok` side.

mod algorithms;
pub mod builtins;
mod coerce;
mod diagnostics;
mod driver;
mod environment;
pub mod errors;
mod eval_mode;
pub mod exec;
pub mod interpreter;
mod io;
mod operators;
mod shared;
mod stack;
mod trace;
mod unary_operators;
mod value;
mod world;

#[cfg(test)]
mod tests;

use std::sync::Once;

pub use algorithms::AlgorithmRegistry;
pub use builtins::{ArgType, BuiltinRegistry, BuiltinSpec};
pub use coerce::{coerce, parse_as, truth_literal};
pub use diagnostics::{CallFrame, CallStack};
pub use driver::{run_program, run_with_shell, RunOutcome};
pub use environment::{Environment, FrameKind, ScopeError, Slot};
pub use errors::{BacktraceFrame, ErrorCategory, EvalBacktrace, EvalError, EvalErrorKind, EvalResult};
pub use eval_mode::{EvalMode, DEFAULT_MAX_CALL_DEPTH};
pub use exec::control::Signal;
pub use interpreter::{Interpreter, InterpreterBuilder};
pub use io::{
    buffer_shell, custom_shell, silent_shell, stdio_shell, BufferShell, IoShell, ShellError,
    ShellImpl, SharedIoShell, StdioShell,
};
pub use operators::evaluate_binary;
pub use shared::SharedRegistry;
pub use trace::{TraceCallback, TraceEvent, TracePhase};
pub use unary_operators::evaluate_unary;
pub use value::{format_real, Dim, KumirInt, Table, TableError, TableIndex, Value, EMPTY_CHAR};
pub use world::{MicroWorld, WorldCommand, WorldError};

static TRACING_INIT: Once = Once::new();

/// Install a tracing subscriber for debug output.
///
/// Safe to call multiple times. Does nothing unless `RUST_LOG` is set, e.g.
/// `RUST_LOG=kumir_eval=debug` shows algorithm calls as an indented tree.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(EnvFilter::from_default_env())
                .with(tracing_tree::HierarchicalLayer::new(2).with_targets(true))
                .init();
        }
    });
}
