use super::*;
use pretty_assertions::assert_eq;

#[test]
fn width_right_aligns_by_symbols() {
    assert_eq!(format_item(&Value::int(42), Some(5), None).ok(), Some("   42".into()));
    assert_eq!(format_item(&Value::string("мир"), Some(5), None).ok(), Some("  мир".into()));
}

#[test]
fn narrow_width_never_truncates() {
    assert_eq!(format_item(&Value::int(12345), Some(2), None).ok(), Some("12345".into()));
}

#[test]
fn precision_fixes_decimals_for_numbers() {
    assert_eq!(format_item(&Value::Real(3.14159), Some(6), Some(2)).ok(), Some("  3.14".into()));
    assert_eq!(format_item(&Value::int(7), Some(0), Some(1)).ok(), Some("7.0".into()));
}

#[test]
fn precision_ignored_for_text() {
    assert_eq!(format_item(&Value::Boolean(true), Some(4), Some(2)).ok(), Some("  да".into()));
}

#[test]
fn negative_width_is_rejected() {
    assert!(format_item(&Value::int(1), Some(-1), None).is_err());
}

#[test]
fn oversized_arguments_are_rejected() {
    let limit = i64::from(u16::MAX);
    assert!(format_item(&Value::Real(1.5), Some(1), Some(limit + 1)).is_err());
    assert!(format_item(&Value::int(1), Some(2_000_000_000), None).is_err());
    assert_eq!(
        format_item(&Value::int(1), Some(limit), None).map(|s| s.chars().count()).ok(),
        Some(MAX_FORMAT_ARG)
    );
}
