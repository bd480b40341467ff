//! Call protocol: passing modes, results, recursion, builtins.

use super::{error_kind, run};
use crate::{ErrorCategory, EvalErrorKind, EvalMode, InterpreterBuilder, silent_shell};
use kumir_ir::{Algorithm, AstBuilder, BinaryOp, ParamMode, Program, StringInterner, TypeTag};
use pretty_assertions::assert_eq;

fn program(main: Algorithm, others: Vec<Algorithm>) -> Program {
    let mut algorithms = vec![main];
    algorithms.extend(others);
    Program {
        introduction: Vec::new(),
        algorithms,
    }
}

#[test]
fn in_parameter_is_a_copy() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let bump = b.algorithm(
        "bump",
        vec![b.param(ParamMode::In, TypeTag::Integer, "x")],
        None,
        vec![
            b.assign("x", b.binary(BinaryOp::Add, b.var("x"), b.int(100))),
            b.output(vec![b.var("x"), b.string(" ")]),
        ],
    );
    let main = b.algorithm(
        "главный",
        Vec::new(),
        None,
        vec![
            b.declare_init(TypeTag::Integer, "a", b.int(1)),
            b.call_stmt("bump", vec![b.var("a")]),
            b.output(vec![b.var("a")]),
        ],
    );
    assert_eq!(run(&interner, &program(main, vec![bump])).output, "101 1");
}

#[test]
fn out_and_inout_write_back() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let swap = b.algorithm(
        "обмен",
        vec![
            b.param(ParamMode::InOut, TypeTag::Integer, "x"),
            b.param(ParamMode::InOut, TypeTag::Integer, "y"),
        ],
        None,
        vec![
            b.declare_init(TypeTag::Integer, "t", b.var("x")),
            b.assign("x", b.var("y")),
            b.assign("y", b.var("t")),
        ],
    );
    let halve = b.algorithm(
        "половина",
        vec![
            b.param(ParamMode::In, TypeTag::Integer, "n"),
            b.param(ParamMode::Out, TypeTag::Real, "r"),
        ],
        None,
        vec![b.assign("r", b.binary(BinaryOp::Div, b.var("n"), b.int(2)))],
    );
    let main = b.algorithm(
        "главный",
        Vec::new(),
        None,
        vec![
            b.declare_init(TypeTag::Integer, "a", b.int(1)),
            b.declare_init(TypeTag::Integer, "b", b.int(2)),
            b.declare(TypeTag::Real, &["h"]),
            b.call_stmt("обмен", vec![b.var("a"), b.var("b")]),
            b.call_stmt("половина", vec![b.int(5), b.var("h")]),
            b.output(vec![b.var("a"), b.var("b"), b.string(" "), b.var("h")]),
        ],
    );
    let outcome = run(&interner, &program(main, vec![swap, halve]));
    assert!(outcome.success);
    assert_eq!(outcome.output, "21 2.5");
}

#[test]
fn unwritten_out_parameter_leaves_caller_unchanged() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let lazy = b.algorithm(
        "ничего",
        vec![b.param(ParamMode::Out, TypeTag::Integer, "r")],
        None,
        Vec::new(),
    );
    let main = b.algorithm(
        "главный",
        Vec::new(),
        None,
        vec![
            b.declare_init(TypeTag::Integer, "v", b.int(42)),
            b.call_stmt("ничего", vec![b.var("v")]),
            b.output(vec![b.var("v")]),
        ],
    );
    assert_eq!(run(&interner, &program(main, vec![lazy])).output, "42");
}

#[test]
fn reading_out_parameter_before_write_fails() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let peek = b.algorithm(
        "подсмотр",
        vec![b.param(ParamMode::Out, TypeTag::Integer, "r")],
        None,
        vec![b.output(vec![b.var("r")])],
    );
    let main = b.algorithm(
        "главный",
        Vec::new(),
        None,
        vec![
            b.declare(TypeTag::Integer, &["v"]),
            b.call_stmt("подсмотр", vec![b.var("v")]),
        ],
    );
    let outcome = run(&interner, &program(main, vec![peek]));
    assert!(matches!(error_kind(&outcome), Some(EvalErrorKind::Uninitialized { .. })));
}

#[test]
fn out_argument_must_be_a_place() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let set = b.algorithm(
        "задать",
        vec![b.param(ParamMode::Out, TypeTag::Integer, "r")],
        None,
        vec![b.assign("r", b.int(1))],
    );
    let main = b.algorithm("главный", Vec::new(), None, vec![b.call_stmt("задать", vec![b.int(3)])]);
    let outcome = run(&interner, &program(main, vec![set]));
    assert!(matches!(
        error_kind(&outcome),
        Some(EvalErrorKind::NotAssignable { position: 1, .. })
    ));
}

#[test]
fn out_parameter_into_table_cell() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let set = b.algorithm(
        "задать",
        vec![b.param(ParamMode::Out, TypeTag::Integer, "r")],
        None,
        vec![b.assign("r", b.int(9))],
    );
    let main = b.algorithm(
        "главный",
        Vec::new(),
        None,
        vec![
            b.declare_table(TypeTag::Integer, "t", vec![(b.int(1), b.int(3))]),
            b.call_stmt("задать", vec![b.index("t", vec![b.int(2)])]),
            b.output(vec![b.index("t", vec![b.int(1)]), b.index("t", vec![b.int(2)])]),
        ],
    );
    assert_eq!(run(&interner, &program(main, vec![set])).output, "09");
}

#[test]
fn function_without_result_fails() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let forgetful = b.algorithm("забыл", Vec::new(), Some(TypeTag::Integer), Vec::new());
    let main = b.algorithm(
        "главный",
        Vec::new(),
        None,
        vec![b.output(vec![b.call("забыл", Vec::new())])],
    );
    let outcome = run(&interner, &program(main, vec![forgetful]));
    assert!(!outcome.success);
    assert!(matches!(error_kind(&outcome), Some(EvalErrorKind::MissingResult { .. })));
    assert_eq!(outcome.category, Some(ErrorCategory::Runtime));
}

#[test]
fn exit_in_function_keeps_assigned_result() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let early = b.algorithm(
        "рано",
        Vec::new(),
        Some(TypeTag::Integer),
        vec![b.assign_result(b.int(5)), b.exit(), b.assign_result(b.int(6))],
    );
    let main = b.algorithm("главный", Vec::new(), None, vec![b.output(vec![b.call("рано", Vec::new())])]);
    assert_eq!(run(&interner, &program(main, vec![early])).output, "5");
}

#[test]
fn procedure_in_expression_is_a_type_error() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let proc = b.algorithm("проц", Vec::new(), None, Vec::new());
    let main = b.algorithm("главный", Vec::new(), None, vec![b.output(vec![b.call("проц", Vec::new())])]);
    let outcome = run(&interner, &program(main, vec![proc]));
    assert!(matches!(error_kind(&outcome), Some(EvalErrorKind::NoResultValue { .. })));
}

#[test]
fn callee_does_not_see_caller_locals() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let nosy = b.algorithm("любопытный", Vec::new(), None, vec![b.output(vec![b.var("секрет")])]);
    let main = b.algorithm(
        "главный",
        Vec::new(),
        None,
        vec![
            b.declare_init(TypeTag::Integer, "секрет", b.int(1)),
            b.call_stmt("любопытный", Vec::new()),
        ],
    );
    let outcome = run(&interner, &program(main, vec![nosy]));
    assert!(matches!(error_kind(&outcome), Some(EvalErrorKind::UndefinedVariable { .. })));
}

#[test]
fn callee_sees_globals() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let show = b.algorithm("показать", Vec::new(), None, vec![b.output(vec![b.var("общий")])]);
    let main = b.algorithm("главный", Vec::new(), None, vec![b.call_stmt("показать", Vec::new())]);
    let mut prog = program(main, vec![show]);
    prog.introduction = vec![b.declare_init(TypeTag::String, "общий", b.string("g"))];
    assert_eq!(run(&interner, &prog).output, "g");
}

#[test]
fn recursive_factorial() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let fact = b.algorithm(
        "факт",
        vec![b.param(ParamMode::In, TypeTag::Integer, "n")],
        Some(TypeTag::Integer),
        vec![b.if_then(
            b.binary(BinaryOp::LtEq, b.var("n"), b.int(1)),
            vec![b.assign_result(b.int(1))],
            Some(vec![b.assign_result(b.binary(
                BinaryOp::Mul,
                b.var("n"),
                b.call("факт", vec![b.binary(BinaryOp::Sub, b.var("n"), b.int(1))]),
            ))]),
        )],
    );
    let main = b.algorithm("главный", Vec::new(), None, vec![b.output(vec![b.call("факт", vec![b.int(10)])])]);
    assert_eq!(run(&interner, &program(main, vec![fact])).output, "3628800");
}

#[test]
fn runaway_recursion_hits_the_limit() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let forever = b.algorithm("вечно", Vec::new(), None, vec![b.call_stmt("вечно", Vec::new())]);
    let main = b.algorithm("главный", Vec::new(), None, vec![b.call_stmt("вечно", Vec::new())]);
    let prog = program(main, vec![forever]);
    let outcome = InterpreterBuilder::new(&interner)
        .shell(silent_shell())
        .mode(EvalMode::Sandbox { max_steps: 1_000_000 })
        .build()
        .run(&prog);
    assert!(!outcome.success);
    assert!(matches!(error_kind(&outcome), Some(EvalErrorKind::RecursionLimit { .. })));
    let frames = outcome
        .failure
        .and_then(|e| e.backtrace)
        .map_or(0, |bt| bt.frames().len());
    assert!(frames > 1);
}

#[test]
fn wrong_argument_count() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let one = b.algorithm("один", vec![b.param(ParamMode::In, TypeTag::Integer, "x")], None, Vec::new());
    let main = b.algorithm("главный", Vec::new(), None, vec![b.call_stmt("один", Vec::new())]);
    let outcome = run(&interner, &program(main, vec![one]));
    assert_eq!(outcome.category, Some(ErrorCategory::Argument));
}

#[test]
fn unknown_algorithm_is_a_name_error() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let program = b.main_program(vec![b.call_stmt("нет_такого", Vec::new())]);
    let outcome = run(&interner, &program);
    assert!(matches!(error_kind(&outcome), Some(EvalErrorKind::UndefinedAlgorithm { .. })));
}

#[test]
fn builtins_are_callable() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let program = b.main_program(vec![
        b.output(vec![
            b.call("sqrt", vec![b.int(16)]),
            b.string(" "),
            b.call("длин", vec![b.string("привет")]),
            b.string(" "),
            b.call("imax", vec![b.int(3), b.int(8)]),
        ]),
    ]);
    assert_eq!(run(&interner, &program).output, "4 6 8");
}

#[test]
fn builtin_out_parameter_reports_success() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let program = b.main_program(vec![
        b.declare(TypeTag::Boolean, &["ok"]),
        b.declare(TypeTag::Integer, &["n"]),
        b.assign("n", b.call("лит_в_цел", vec![b.string("12x"), b.var("ok")])),
        b.output(vec![b.var("n"), b.string(" "), b.var("ok")]),
        b.assign("n", b.call("лит_в_цел", vec![b.string("42"), b.var("ok")])),
        b.output(vec![b.string(" "), b.var("n"), b.string(" "), b.var("ok")]),
    ]);
    let outcome = run(&interner, &program);
    assert!(outcome.success);
    assert_eq!(outcome.output, "0 нет 42 да");
}

#[test]
fn builtin_inout_string_is_modified() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let program = b.main_program(vec![
        b.declare_init(TypeTag::String, "s", b.string("программа")),
        b.call_stmt("удалить", vec![b.var("s"), b.int(2), b.int(3)]),
        b.output(vec![b.var("s")]),
    ]);
    assert_eq!(run(&interner, &program).output, "прамма");
}

#[test]
fn parameterless_builtin_by_bare_name() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let program = b.main_program(vec![b.output(vec![b.binary(
        BinaryOp::Gt,
        b.var("максцел"),
        b.int(0),
    )])]);
    assert_eq!(run(&interner, &program).output, "да");
}
