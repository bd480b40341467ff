//! Tree-walking interpreter for Kumir programs.
//!
//! Evaluation is split by concern:
//!
//! - `expr`: expressions, including calls made from inside expressions
//! - `stmt`: statement dispatch, declarations, assignment, I/O statements
//! - `loops`: the four `нц` forms
//! - `function_call`: the call protocol for algorithms, builtins and worlds
//! - `places`: reading and writing variables, table cells and string characters
//!
//! Statement executors return `EvalResult<Signal>`. Expression evaluators
//! return `ExprResult<T>`, whose error side can also carry a `стоп` raised
//! inside a called algorithm; `control::settle` folds it back at each
//! statement boundary.

mod builder;
mod expr;
mod format;
mod function_call;
mod loops;
mod places;
mod scope_guard;
mod stmt;

pub use builder::InterpreterBuilder;
pub use scope_guard::ScopedInterpreter;

use crate::algorithms::AlgorithmRegistry;
use crate::builtins::BuiltinRegistry;
use crate::diagnostics::CallStack;
use crate::environment::Environment;
use crate::errors::{io_failure, EvalResult};
use crate::eval_mode::{EvalMode, ModeState};
use crate::exec::control::Signal;
use crate::io::{IoShell, SharedIoShell};
use crate::shared::SharedRegistry;
use crate::trace::{TraceCallback, TraceEvent, TracePhase};
use crate::world::{MicroWorld, WorldCommand};
use kumir_ir::{LineIndex, Name, Span, Stmt, StringInterner};
use rand::rngs::StdRng;
use rustc_hash::FxHashMap;

/// A micro-world plus its commands keyed by interned name.
pub(crate) struct WorldBinding<'a> {
    world: Box<dyn MicroWorld + 'a>,
    commands: FxHashMap<Name, WorldCommand>,
}

impl<'a> WorldBinding<'a> {
    fn new(world: Box<dyn MicroWorld + 'a>, interner: &StringInterner) -> Self {
        let commands = world
            .commands()
            .iter()
            .map(|cmd| (interner.intern(cmd.name), *cmd))
            .collect();
        WorldBinding { world, commands }
    }
}

/// Interpreter for one program run.
///
/// Owns the scope stack, the output accumulated so far and the call stack.
/// Registries are shared and read-only once the run starts.
pub struct Interpreter<'a> {
    pub(crate) interner: &'a StringInterner,
    pub(crate) env: Environment,
    pub(crate) algorithms: SharedRegistry<AlgorithmRegistry<'a>>,
    pub(crate) builtins: SharedRegistry<BuiltinRegistry>,
    pub(crate) world: Option<WorldBinding<'a>>,
    pub(crate) shell: SharedIoShell,
    /// Everything `вывод` has printed during this run.
    pub(crate) output: String,
    pub(crate) trace: Option<TraceCallback<'a>>,
    pub(crate) call_stack: CallStack,
    pub(crate) mode: EvalMode,
    pub(crate) mode_state: ModeState,
    pub(crate) rng: StdRng,
    /// Source text, when known, for line/column resolution of errors.
    pub(crate) lines: Option<LineIndex>,
}

impl<'a> Interpreter<'a> {
    /// Display spelling of an identifier.
    #[inline]
    pub(crate) fn display(&self, name: Name) -> &'static str {
        self.interner.lookup(name)
    }

    pub fn mode(&self) -> &EvalMode {
        &self.mode
    }

    /// Statements executed so far.
    pub fn steps(&self) -> u64 {
        self.mode_state.steps()
    }

    /// Output accumulated so far.
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Append to the run output and forward to the shell.
    pub(crate) fn emit(&mut self, text: &str) -> EvalResult<()> {
        if text.is_empty() {
            return Ok(());
        }
        self.output.push_str(text);
        self.shell.write(text).map_err(io_failure)
    }

    /// Run `stmts` one at a time, reporting each to the trace callback.
    pub(crate) fn exec_traced(&mut self, phase: TracePhase, stmts: &[Stmt]) -> EvalResult<Signal> {
        for (index, stmt) in stmts.iter().enumerate() {
            let before = self.output.len();
            let signal = self.exec_stmt(stmt)?;
            self.report(phase, index, stmt.span, before);
            if signal != Signal::Normal {
                return Ok(signal);
            }
        }
        Ok(Signal::Normal)
    }

    fn report(&mut self, phase: TracePhase, statement_index: usize, span: Span, before: usize) {
        if self.trace.is_none() {
            return;
        }
        let globals: Vec<_> = self
            .env
            .globals()
            .into_iter()
            .map(|(name, value)| (self.interner.lookup(name), value))
            .collect();
        if let Some(callback) = self.trace.as_mut() {
            callback(&TraceEvent {
                phase,
                statement_index,
                span,
                output: &self.output,
                emitted: self.output.get(before..).unwrap_or_default(),
                globals: &globals,
            });
        }
    }
}
