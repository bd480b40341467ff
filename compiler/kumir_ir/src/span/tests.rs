use super::*;
use pretty_assertions::assert_eq;

#[test]
fn span_basic() {
    let span = Span::new(10, 20);
    assert_eq!(span.len(), 10);
    assert!(!span.is_empty());
    assert!(Span::DUMMY.is_dummy());
}

#[test]
fn span_merge() {
    let merged = Span::new(10, 20).merge(Span::new(15, 30));
    assert_eq!(merged, Span::new(10, 30));
}

#[test]
fn span_at_saturates() {
    let span = Span::at(usize::MAX, 4);
    assert_eq!(span.start, u32::MAX);
    assert_eq!(span.end, u32::MAX);
}

#[test]
fn locate_counts_characters_not_bytes() {
    let src = "алг\nнач\n  цел а\nкон";
    let index = LineIndex::new(src);
    let offset = src.find('а').unwrap_or_default();
    // first 'а' is inside "алг" at byte 0
    assert_eq!(offset, 0);

    let decl = src.find("цел").unwrap_or_default();
    let loc = index.locate(Span::at(decl, "цел".len()));
    assert_eq!(loc.line, 2);
    assert_eq!(loc.column, 2);
    assert_eq!(loc.line_text, "  цел а");
}

#[test]
fn locate_past_end_clamps_to_last_line() {
    let index = LineIndex::new("a\nb");
    let loc = index.locate(Span::new(100, 101));
    assert_eq!(loc.line, 1);
    assert_eq!(loc.line_text, "b");
}

#[test]
fn line_text_strips_carriage_return() {
    let index = LineIndex::new("вывод 1\r\nвывод 2\r\n");
    assert_eq!(index.line_count(), 3);
    assert_eq!(index.line_text(0), "вывод 1");
    assert_eq!(index.line_text(1), "вывод 2");
    assert_eq!(index.line_text(2), "");
    assert_eq!(index.line_text(7), "");
}

#[test]
fn location_display_is_one_based() {
    let loc = SourceLocation {
        line: 0,
        column: 4,
        line_text: "a := 3.9".to_owned(),
    };
    assert_eq!(loc.to_string(), "строка 1, столбец 5: 'a := 3.9'");
}
