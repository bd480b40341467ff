//! Whole-program scenario tests.
//!
//! Programs are built with `kumir_ir::AstBuilder` and run through the
//! public driver, so these exercise the same path a host uses.

mod call_tests;
mod io_tests;

use crate::{buffer_shell, run_program, EvalErrorKind, InterpreterBuilder, RunOutcome};
use kumir_ir::{Program, StringInterner};

/// Run with no input and collect the outcome.
fn run(interner: &StringInterner, program: &Program) -> RunOutcome {
    run_program(program, interner)
}

/// Run with the given input lines.
fn run_with_input(interner: &StringInterner, program: &Program, input: &[&str]) -> RunOutcome {
    InterpreterBuilder::new(interner)
        .shell(buffer_shell(input.iter().copied()))
        .build()
        .run(program)
}

fn error_kind(outcome: &RunOutcome) -> Option<EvalErrorKind> {
    outcome.failure.as_ref().map(|e| e.kind.clone())
}

#[test]
fn tracing_setup_is_idempotent() {
    crate::init_tracing();
    crate::init_tracing();
}
