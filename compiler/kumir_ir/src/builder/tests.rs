use super::*;
use pretty_assertions::assert_eq;

#[test]
fn builder_interns_case_insensitively() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    assert_eq!(b.var("A"), b.var("a"));
}

#[test]
fn at_overrides_dummy_span() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let stmt = b.stop().at(Span::new(4, 8));
    assert_eq!(stmt.span, Span::new(4, 8));
}

#[test]
fn assign_result_targets_reserved_slot() {
    let interner = StringInterner::new();
    let b = AstBuilder::new(&interner);
    let StmtKind::Assign { target, .. } = b.assign_result(b.int(1)).kind else {
        panic!("expected assignment");
    };
    assert_eq!(target.root(), Name::RESULT);
}
