//! Run driver: introduction, entry algorithm, result record.

use crate::algorithms::AlgorithmRegistry;
use crate::errors::{no_entry_algorithm, ErrorCategory, EvalError, EvalResult};
use crate::exec::control::Signal;
use crate::interpreter::{Interpreter, InterpreterBuilder};
use crate::io::{silent_shell, SharedIoShell};
use crate::diagnostics::CallFrame;
use crate::shared::SharedRegistry;
use crate::trace::TracePhase;
use kumir_ir::{Algorithm, Program, SourceLocation, Span, StringInterner};

/// What a run produced. Built once, at the end of the run.
#[derive(Clone, Debug, PartialEq)]
pub struct RunOutcome {
    /// `true` when the program finished normally or via `стоп`.
    pub success: bool,
    /// Everything printed before the run ended.
    pub output: String,
    /// Message of the terminal error, with its position when known.
    pub error: Option<String>,
    pub position: Option<SourceLocation>,
    pub category: Option<ErrorCategory>,
    /// The terminal error itself.
    pub failure: Option<EvalError>,
}

impl<'a> Interpreter<'a> {
    /// Run `program`: the introduction, then the entry algorithm.
    ///
    /// Never fails: the first error ends the run and is recorded in the
    /// outcome together with the output printed before it.
    #[tracing::instrument(level = "debug", skip_all, fields(algorithms = program.algorithms.len()))]
    pub fn run(&mut self, program: &'a Program) -> RunOutcome {
        let result = self.execute(program);
        let output = std::mem::take(&mut self.output);
        match result {
            Ok(()) => RunOutcome {
                success: true,
                output,
                error: None,
                position: None,
                category: None,
                failure: None,
            },
            Err(err) => {
                let err = self.locate(err);
                tracing::warn!(error = %err, steps = self.mode_state.steps(), "run failed");
                RunOutcome {
                    success: false,
                    output,
                    error: Some(err.to_string()),
                    position: err.location.clone(),
                    category: Some(err.category()),
                    failure: Some(err),
                }
            }
        }
    }

    fn execute(&mut self, program: &'a Program) -> EvalResult<()> {
        let registry = AlgorithmRegistry::build(program, self.interner)?;
        let entry = registry.entry();
        if !registry.is_empty() && entry.is_none() {
            return Err(no_entry_algorithm());
        }
        self.algorithms = SharedRegistry::new(registry);

        if self.exec_traced(TracePhase::Introduction, &program.introduction)? == Signal::Halt {
            tracing::debug!("halted in introduction");
            return Ok(());
        }
        match entry {
            Some(entry) => self.run_entry(entry),
            None => Ok(()),
        }
    }

    fn run_entry(&mut self, entry: &Algorithm) -> EvalResult<()> {
        let frame = CallFrame {
            name: entry.name,
            call_span: Span::DUMMY,
        };
        let mut scoped = self.scoped_call(frame)?;
        match scoped.exec_traced(TracePhase::Main, &entry.body) {
            Ok(_) => Ok(()),
            Err(err) => {
                let interner = scoped.interner;
                Err(scoped.call_stack.attach_backtrace(err, interner))
            }
        }
    }

    /// Resolve the error span to a line/column position when source is known.
    fn locate(&self, err: EvalError) -> EvalError {
        match (&self.lines, err.span) {
            (Some(lines), Some(span)) => {
                let location = lines.locate(span);
                err.with_location(location)
            }
            _ => err,
        }
    }
}

/// Run `program` with no console attached: input is empty, output is only
/// collected into the outcome.
pub fn run_program(program: &Program, interner: &StringInterner) -> RunOutcome {
    run_with_shell(program, interner, silent_shell())
}

pub fn run_with_shell(program: &Program, interner: &StringInterner, shell: SharedIoShell) -> RunOutcome {
    InterpreterBuilder::new(interner).shell(shell).build().run(program)
}
