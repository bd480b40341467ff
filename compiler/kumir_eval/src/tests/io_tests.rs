//! Console input, formatted output, trace events, error positions.

use super::{error_kind, run, run_with_input};
use crate::{silent_shell, ErrorCategory, EvalErrorKind, InterpreterBuilder, TracePhase, Value};
use kumir_ir::{
    AstBuilder, BinaryOp, OutputItem, Program, SourceLocation, Span, Spanned, StringInterner, TypeTag,
};
use pretty_assertions::assert_eq;

fn item(expr: kumir_ir::Expr, width: Option<i64>, precision: Option<i64>, b: &AstBuilder<'_>) -> OutputItem {
    OutputItem::Value {
        expr,
        width: width.map(|w| b.int(w)),
        precision: precision.map(|p| b.int(p)),
    }
}

#[test]
fn input_is_parsed_by_target_type() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let program = b.main_program(vec![
        b.declare(TypeTag::Integer, &["n"]),
        b.declare(TypeTag::Real, &["x"]),
        b.declare(TypeTag::String, &["s"]),
        b.declare(TypeTag::Boolean, &["f"]),
        b.input(vec![b.place("n"), b.place("x"), b.place("s"), b.place("f")]),
        b.output(vec![
            b.binary(BinaryOp::Add, b.var("n"), b.int(1)),
            b.string("|"),
            b.var("x"),
            b.string("|"),
            b.var("s"),
            b.string("|"),
            b.var("f"),
        ]),
    ]);
    let outcome = run_with_input(&interner, &program, &[" 41 ", "2,5", "мир и труд", "да"]);
    assert!(outcome.success, "{:?}", outcome.error);
    assert_eq!(outcome.output, "42|2.5|мир и труд|да");
}

#[test]
fn input_into_table_cell() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let program = b.main_program(vec![
        b.declare_table(TypeTag::Integer, "t", vec![(b.int(1), b.int(2))]),
        b.input(vec![b.element("t", vec![b.int(2)])]),
        b.output(vec![b.index("t", vec![b.int(2)])]),
    ]);
    assert_eq!(run_with_input(&interner, &program, &["7"]).output, "7");
}

#[test]
fn malformed_input_is_a_value_error() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let program = b.main_program(vec![
        b.declare(TypeTag::Integer, &["n"]),
        b.output(vec![b.string("до")]),
        b.input(vec![b.place("n")]),
        b.output(vec![b.string("после")]),
    ]);
    let outcome = run_with_input(&interner, &program, &["двенадцать"]);
    assert!(!outcome.success);
    assert_eq!(outcome.output, "до");
    assert_eq!(outcome.category, Some(ErrorCategory::Value));
}

#[test]
fn exhausted_input_reads_empty_line() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let program = b.main_program(vec![
        b.declare(TypeTag::String, &["s"]),
        b.input(vec![b.place("s")]),
        b.output(vec![b.call("длин", vec![b.var("s")])]),
    ]);
    assert_eq!(run(&interner, &program).output, "0");
}

#[test]
fn character_input_needs_one_symbol() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let program = b.main_program(vec![
        b.declare(TypeTag::Character, &["c"]),
        b.input(vec![b.place("c")]),
    ]);
    let outcome = run_with_input(&interner, &program, &["ab"]);
    assert!(matches!(
        error_kind(&outcome),
        Some(EvalErrorKind::NotASingleCharacter { .. })
    ));
}

#[test]
fn output_width_and_precision() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let program = b.main_program(vec![b.output_items(vec![
        item(b.int(7), Some(4), None, &b),
        item(b.real(3.14159), Some(8), Some(2), &b),
        OutputItem::Newline,
        item(b.string("длинный"), Some(3), None, &b),
        item(b.int(5), None, Some(1), &b),
    ])]);
    let outcome = run(&interner, &program);
    assert!(outcome.success, "{:?}", outcome.error);
    assert_eq!(outcome.output, "   7    3.14\nдлинный5.0");
}

#[test]
fn negative_width_is_rejected() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let program = b.main_program(vec![b.output_items(vec![item(b.int(1), Some(-2), None, &b)])]);
    let outcome = run(&interner, &program);
    assert_eq!(outcome.category, Some(ErrorCategory::Argument));
    assert_eq!(outcome.output, "");
}

#[test]
fn huge_precision_or_width_is_an_argument_error() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    for (width, precision) in [(Some(1), Some(70_000)), (Some(2_000_000_000), None)] {
        let program = b.main_program(vec![b.output_items(vec![item(b.real(1.5), width, precision, &b)])]);
        let outcome = run(&interner, &program);
        assert!(!outcome.success);
        assert_eq!(outcome.category, Some(ErrorCategory::Argument));
        assert_eq!(outcome.output, "");
    }
}

#[test]
fn output_line_is_all_or_nothing() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let program = b.main_program(vec![b.output(vec![
        b.string("a"),
        b.binary(BinaryOp::IntDiv, b.int(1), b.int(0)),
    ])]);
    let outcome = run(&interner, &program);
    assert!(matches!(error_kind(&outcome), Some(EvalErrorKind::DivisionByZero)));
    assert_eq!(outcome.output, "");
}

#[test]
fn output_reaches_the_shell() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let program = b.main_program(vec![b.output(vec![b.string("привет")])]);
    let shell = crate::buffer_shell(Vec::<String>::new());
    let outcome = crate::run_with_shell(&program, &interner, shell.clone());
    assert_eq!(outcome.output, "привет");
    let crate::ShellImpl::Buffer(buffer) = &*shell else {
        panic!("expected a buffer shell");
    };
    assert_eq!(buffer.output(), "привет");
}

#[derive(Debug, PartialEq)]
struct Seen {
    phase: TracePhase,
    index: usize,
    emitted: String,
    globals: Vec<(String, Value)>,
}

#[test]
fn trace_reports_every_top_level_statement() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let program = Program {
        introduction: vec![b.declare_init(TypeTag::Integer, "г", b.int(1))],
        algorithms: vec![b.algorithm(
            "главный",
            Vec::new(),
            None,
            vec![
                b.output(vec![b.string("x")]),
                b.assign("г", b.int(2)),
            ],
        )],
    };

    let mut seen = Vec::new();
    let outcome = {
        let mut interpreter = InterpreterBuilder::new(&interner)
            .shell(silent_shell())
            .trace(|event| {
                seen.push(Seen {
                    phase: event.phase,
                    index: event.statement_index,
                    emitted: event.emitted.to_string(),
                    globals: event
                        .globals
                        .iter()
                        .map(|(name, value)| ((*name).to_string(), value.clone()))
                        .collect(),
                });
            })
            .build();
        interpreter.run(&program)
    };

    assert!(outcome.success);
    assert_eq!(
        seen,
        vec![
            Seen {
                phase: TracePhase::Introduction,
                index: 0,
                emitted: String::new(),
                globals: vec![("г".to_string(), Value::int(1))],
            },
            Seen {
                phase: TracePhase::Main,
                index: 0,
                emitted: "x".to_string(),
                globals: vec![("г".to_string(), Value::int(1))],
            },
            Seen {
                phase: TracePhase::Main,
                index: 1,
                emitted: String::new(),
                globals: vec![("г".to_string(), Value::int(2))],
            },
        ]
    );
}

#[test]
fn error_position_points_at_innermost_node() {
    let source = "алг главный\nнач\n  вывод 10 div 0\nкон\n";
    let expr_start = source.find("10").unwrap_or_default();
    let stmt_start = source.find("вывод").unwrap_or_default();

    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let division = b
        .binary(BinaryOp::IntDiv, b.int(10), b.int(0))
        .at(Span::at(expr_start, "10 div 0".len()));
    let program = b.main_program(vec![
        b.output(vec![division]).at(Span::at(stmt_start, "вывод 10 div 0".len())),
    ]);

    let outcome = InterpreterBuilder::new(&interner)
        .shell(silent_shell())
        .source(source)
        .build()
        .run(&program);

    assert_eq!(
        outcome.position,
        Some(SourceLocation {
            line: 2,
            column: 8,
            line_text: "  вывод 10 div 0".to_string(),
        })
    );
    let message = outcome.error.unwrap_or_default();
    assert!(message.contains("строка 3, столбец 9"), "{message}");
}

#[test]
fn without_source_there_is_no_position() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let program = b.main_program(vec![b
        .assert(b.boolean(false))
        .at(Span::new(5, 9))]);
    let outcome = run(&interner, &program);
    assert!(matches!(error_kind(&outcome), Some(EvalErrorKind::AssertionFailed)));
    assert_eq!(outcome.position, None);
    assert_eq!(outcome.failure.and_then(|e| e.span), Some(Span::new(5, 9)));
}
