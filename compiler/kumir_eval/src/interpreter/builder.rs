//! `InterpreterBuilder` for creating Interpreter instances with various configurations.

use super::{Interpreter, WorldBinding};
use crate::builtins::BuiltinRegistry;
use crate::diagnostics::CallStack;
use crate::environment::Environment;
use crate::eval_mode::{EvalMode, ModeState};
use crate::io::{stdio_shell, SharedIoShell};
use crate::shared::SharedRegistry;
use crate::trace::{TraceCallback, TraceEvent};
use crate::world::MicroWorld;
use kumir_ir::{LineIndex, StringInterner};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Builder for creating Interpreter instances.
///
/// Defaults: `EvalMode::Interpret`, the process stdin/stdout shell, the
/// standard builtin library, no micro-world, no trace, an entropy-seeded
/// random generator.
pub struct InterpreterBuilder<'a> {
    interner: &'a StringInterner,
    mode: EvalMode,
    shell: Option<SharedIoShell>,
    world: Option<Box<dyn MicroWorld + 'a>>,
    trace: Option<TraceCallback<'a>>,
    source: Option<LineIndex>,
    seed: Option<u64>,
    builtins: Option<SharedRegistry<BuiltinRegistry>>,
}

impl<'a> InterpreterBuilder<'a> {
    pub fn new(interner: &'a StringInterner) -> Self {
        Self {
            interner,
            mode: EvalMode::default(),
            shell: None,
            world: None,
            trace: None,
            source: None,
            seed: None,
            builtins: None,
        }
    }

    /// Set the evaluation mode (recursion limit, step budget).
    #[must_use]
    pub fn mode(mut self, mode: EvalMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the I/O shell used by `ввод` and `вывод`.
    #[must_use]
    pub fn shell(mut self, shell: SharedIoShell) -> Self {
        self.shell = Some(shell);
        self
    }

    #[must_use]
    pub fn world(mut self, world: impl MicroWorld + 'a) -> Self {
        self.world = Some(Box::new(world));
        self
    }

    /// Callback invoked after each top-level and entry-body statement.
    #[must_use]
    pub fn trace(mut self, callback: impl FnMut(&TraceEvent<'_>) + 'a) -> Self {
        self.trace = Some(Box::new(callback));
        self
    }

    /// Source text the program was parsed from. Enables line/column
    /// positions in error reports.
    #[must_use]
    pub fn source(mut self, text: impl Into<String>) -> Self {
        self.source = Some(LineIndex::new(text));
        self
    }

    /// Fix the seed of the random builtins.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Share a prebuilt builtin registry across interpreters.
    #[must_use]
    pub fn builtins(mut self, registry: SharedRegistry<BuiltinRegistry>) -> Self {
        self.builtins = Some(registry);
        self
    }

    pub fn build(self) -> Interpreter<'a> {
        let interner = self.interner;
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Interpreter {
            interner,
            env: Environment::new(),
            algorithms: SharedRegistry::default(),
            builtins: self
                .builtins
                .unwrap_or_else(|| SharedRegistry::new(BuiltinRegistry::new(interner))),
            world: self.world.map(|w| WorldBinding::new(w, interner)),
            shell: self.shell.unwrap_or_else(stdio_shell),
            output: String::new(),
            trace: self.trace,
            call_stack: CallStack::new(self.mode.max_call_depth()),
            mode_state: ModeState::new(&self.mode),
            mode: self.mode,
            rng,
            lines: self.source,
        }
    }
}
