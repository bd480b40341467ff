use super::*;
use kumir_ir::TypeTag;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[test]
fn int_range_is_symmetric() {
    assert_eq!(KumirInt::new(2_147_483_647), Some(KumirInt::MAX));
    assert_eq!(KumirInt::new(-2_147_483_647), Some(KumirInt::MIN));
    assert_eq!(KumirInt::new(2_147_483_648), None);
    assert_eq!(KumirInt::new(-2_147_483_648), None);
}

#[test]
fn checked_arithmetic_stays_in_range() {
    assert_eq!(KumirInt::MAX.checked_add(KumirInt::ONE), None);
    assert_eq!(KumirInt::MIN.checked_sub(KumirInt::ONE), None);
    assert_eq!(KumirInt::MAX.neg(), KumirInt::MIN);
    let two = KumirInt::new(2).unwrap_or_default();
    let ten = KumirInt::new(10).unwrap_or_default();
    assert_eq!(two.checked_pow(ten).map(KumirInt::get), Some(1024));
    assert_eq!(two.checked_pow(KumirInt::new(31).unwrap_or_default()), None);
    assert_eq!(two.checked_pow(KumirInt::new(-1).unwrap_or_default()), None);
}

#[test]
fn floor_division_and_modulo() {
    let n = |v: i64| KumirInt::new(v).unwrap_or_default();
    assert_eq!(n(7).checked_floor_div(n(2)), Some(n(3)));
    assert_eq!(n(-7).checked_floor_div(n(2)), Some(n(-4)));
    assert_eq!(n(-7).checked_floor_mod(n(2)), Some(n(1)));
    assert_eq!(n(7).checked_floor_mod(n(-2)), Some(n(-1)));
    assert_eq!(n(7).checked_floor_div(KumirInt::ZERO), None);
}

#[test]
fn defaults_per_type() {
    assert_eq!(Value::default_for(TypeTag::Integer), Value::int(0));
    assert_eq!(Value::default_for(TypeTag::Real), Value::Real(0.0));
    assert_eq!(Value::default_for(TypeTag::Boolean), Value::Boolean(false));
    assert_eq!(Value::default_for(TypeTag::String), Value::string(""));
    assert_eq!(Value::default_for(TypeTag::Character).to_string(), "");
}

#[test]
fn textual_forms() {
    assert_eq!(Value::int(-5).to_string(), "-5");
    assert_eq!(Value::Real(2.5).to_string(), "2.5");
    assert_eq!(Value::Real(3.0).to_string(), "3");
    assert_eq!(Value::Real(-0.0).to_string(), "0");
    assert_eq!(Value::Boolean(true).to_string(), "да");
    assert_eq!(Value::Boolean(false).to_string(), "нет");
    assert_eq!(Value::Character('ы').to_string(), "ы");
    assert_eq!(Value::string("привет").to_string(), "привет");
}

#[test]
fn type_names() {
    assert_eq!(Value::int(1).type_name(), "цел");
    assert_eq!(Value::Real(1.0).type_name(), "вещ");
    let table = Value::Table(Table::new(TypeTag::Integer, [Dim::new(1, 3)]));
    assert_eq!(table.type_name(), "таб");
    assert_eq!(table.tag(), None);
}

#[test]
fn table_unwritten_cell_reads_default() {
    let table = Table::new(TypeTag::Real, [Dim::new(1, 5)]);
    assert_eq!(table.get(&[3]), Ok(Value::Real(0.0)));
    assert_eq!(table.written(), 0);
}

#[test]
fn table_set_coerces_to_element_type() {
    let mut table = Table::new(TypeTag::Real, [Dim::new(1, 2), Dim::new(0, 1)]);
    assert_eq!(table.set(&[2, 0], Value::int(4)), Ok(()));
    assert_eq!(table.get(&[2, 0]), Ok(Value::Real(4.0)));
}

#[test]
fn table_set_rejects_incompatible_element() {
    let mut table = Table::new(TypeTag::Integer, [Dim::new(1, 2)]);
    let err = table.set(&[1], Value::Real(1.5));
    assert!(matches!(err, Err(TableError::Element(_))));
    assert_eq!(table.written(), 0);
}

#[test]
fn table_index_arity_is_checked() {
    let table = Table::new(TypeTag::Integer, [Dim::new(1, 2), Dim::new(1, 2)]);
    assert_eq!(
        table.get(&[1]),
        Err(TableError::Arity {
            expected: 2,
            got: 1
        })
    );
}

#[test]
fn table_bounds_are_checked_per_dimension() {
    let table = Table::new(TypeTag::Integer, [Dim::new(1, 2), Dim::new(-1, 1)]);
    assert_eq!(
        table.get(&[1, 2]),
        Err(TableError::OutOfBounds {
            dimension: 2,
            index: 2,
            dim: Dim::new(-1, 1)
        })
    );
    let err = TableError::OutOfBounds {
        dimension: 2,
        index: 2,
        dim: Dim::new(-1, 1),
    }
    .into_eval("t");
    assert_eq!(
        err.message,
        "Индекс 2 вне границ [-1:1] измерения 2 таблицы 't'"
    );
}

#[test]
fn cloned_table_is_independent() {
    let mut a = Table::new(TypeTag::Integer, [Dim::new(1, 3)]);
    assert_eq!(a.set(&[1], Value::int(7)), Ok(()));
    let b = a.clone();
    assert_eq!(a.set(&[1], Value::int(8)), Ok(()));
    assert_eq!(b.get(&[1]), Ok(Value::int(7)));
}

#[test]
fn empty_dimension_rejects_every_index() {
    let dim = Dim::new(3, 1);
    assert!(dim.is_empty());
    assert_eq!(dim.len(), 0);
    let table = Table::new(TypeTag::Integer, [dim]);
    assert!(table.get(&[2]).is_err());
}

proptest! {
    #[test]
    fn unwritten_in_bounds_reads_default(lo in -50i32..50, len in 1i32..50, pick in 0i32..50) {
        let hi = lo + len - 1;
        let idx = lo + pick % len;
        let table = Table::new(TypeTag::String, [Dim::new(lo, hi)]);
        prop_assert_eq!(table.get(&[idx]), Ok(Value::string("")));
    }

    #[test]
    fn out_of_bounds_always_fails(lo in -50i32..50, len in 1i32..50, past in 1i32..20) {
        let hi = lo + len - 1;
        let mut table = Table::new(TypeTag::Integer, [Dim::new(lo, hi)]);
        let above = hi + past;
        let below = lo - past;
        prop_assert!(table.get(&[above]).is_err());
        prop_assert!(table.get(&[below]).is_err());
        prop_assert!(table.set(&[above], Value::int(1)).is_err());
        prop_assert_eq!(table.written(), 0);
    }

    #[test]
    fn int_construction_matches_range(v in any::<i64>()) {
        let in_range = (-2_147_483_647..=2_147_483_647).contains(&v);
        prop_assert_eq!(KumirInt::new(v).is_some(), in_range);
    }
}
