//! Assignable locations: whole variables, table cells, string characters.

use super::Interpreter;
use crate::coerce::coerce;
use crate::environment::Slot;
use crate::errors::{
    index_arity, not_a_table, not_integer, string_index_out_of_bounds, type_mismatch,
    undefined_variable, uninitialized, EvalResult,
};
use crate::exec::call::{char_at, replace_char, ResolvedPlace};
use crate::exec::control::ExprResult;
use crate::value::{Dim, TableIndex, Value, TABLE_TYPE_NAME};
use kumir_ir::{Bound, Expr, Place, PlaceKind, TypeTag};

impl Interpreter<'_> {
    /// Evaluate the index expressions of `place`.
    pub(crate) fn resolve_place(&mut self, place: &Place) -> ExprResult<ResolvedPlace> {
        let index = match &place.kind {
            PlaceKind::Var(_) => None,
            PlaceKind::Element { indices, .. } => Some(self.eval_indices(indices)?),
        };
        Ok(ResolvedPlace {
            name: place.root(),
            index,
            span: place.span,
        })
    }

    pub(crate) fn eval_indices(&mut self, indices: &[Expr]) -> ExprResult<TableIndex> {
        indices
            .iter()
            .map(|expr| -> ExprResult<i32> {
                let value = self.eval_expr(expr)?;
                value
                    .as_int()
                    .map(|n| n.get())
                    .ok_or_else(|| not_integer("индекс", value.type_name()).with_span(expr.span).into())
            })
            .collect()
    }

    /// Evaluate declared bounds into dimensions.
    pub(crate) fn eval_bounds(&mut self, bounds: &[Bound]) -> ExprResult<Vec<Dim>> {
        let mut dims = Vec::with_capacity(bounds.len());
        for (dimension, bound) in (1..).zip(bounds) {
            let lower = self.eval_bound(&bound.lower, dimension)?;
            let upper = self.eval_bound(&bound.upper, dimension)?;
            dims.push(Dim::new(lower, upper));
        }
        Ok(dims)
    }

    fn eval_bound(&mut self, expr: &Expr, dimension: usize) -> ExprResult<i32> {
        let value = self.eval_expr(expr)?;
        value.as_int().map(|n| n.get()).ok_or_else(|| {
            not_integer(&format!("граница измерения {dimension}"), value.type_name())
                .with_span(expr.span)
                .into()
        })
    }

    fn slot(&self, place: &ResolvedPlace) -> EvalResult<&Slot> {
        self.env
            .find(place.name)
            .ok_or_else(|| undefined_variable(self.display(place.name)))
    }

    pub(crate) fn read_place(&self, place: &ResolvedPlace) -> EvalResult<Value> {
        let display = self.display(place.name);
        let Some(index) = &place.index else {
            return self.env.read(place.name).map_err(|e| e.into_eval(display));
        };
        let slot = self.slot(place)?;
        match slot.value() {
            Value::Table(table) => table.get(index).map_err(|e| e.into_eval(display)),
            Value::String(_) if !slot.is_initialized() => Err(uninitialized(display)),
            Value::String(text) => {
                let position = string_position(index, display)?;
                char_at(text, position)
                    .map(Value::Character)
                    .ok_or_else(|| string_index_out_of_bounds(position, text.chars().count()))
            }
            _ => Err(not_a_table(display)),
        }
    }

    /// Coerce `value` to the place's type and store it.
    pub(crate) fn write_place(&mut self, place: &ResolvedPlace, value: Value) -> EvalResult<()> {
        let display = self.display(place.name);
        let Some(index) = &place.index else {
            return self
                .env
                .update(place.name, value)
                .map_err(|e| e.into_eval(display));
        };
        match self.slot(place)?.value() {
            Value::Table(_) => self
                .env
                .table_mut(place.name)
                .map_err(|e| e.into_eval(display))?
                .set(index, value)
                .map_err(|e| e.into_eval(display)),
            Value::String(text) => {
                let position = string_position(index, display)?;
                let Value::Character(ch) = coerce(value, TypeTag::Character)? else {
                    return Err(type_mismatch(TypeTag::Character.keyword(), TypeTag::String.keyword()));
                };
                let updated = replace_char(text, position, ch)
                    .ok_or_else(|| string_index_out_of_bounds(position, text.chars().count()))?;
                self.env
                    .update(place.name, Value::String(updated))
                    .map_err(|e| e.into_eval(display))
            }
            _ => Err(not_a_table(display)),
        }
    }

    /// Scalar type a value stored at `place` is coerced to.
    pub(crate) fn place_type(&self, place: &ResolvedPlace) -> EvalResult<TypeTag> {
        let slot = self.slot(place)?;
        match (&place.index, slot.is_table()) {
            (None, false) => Ok(slot.ty()),
            (None, true) => Err(type_mismatch(slot.ty().keyword(), TABLE_TYPE_NAME)),
            (Some(_), true) => Ok(slot.ty()),
            (Some(_), false) if slot.ty() == TypeTag::String => Ok(TypeTag::Character),
            (Some(_), false) => Err(not_a_table(self.display(place.name))),
        }
    }

    /// Current value of `place`, or the default of its type when it has none yet.
    pub(crate) fn read_place_or_default(&self, place: &ResolvedPlace) -> EvalResult<Value> {
        let slot = self.slot(place)?;
        if place.index.is_none() && !slot.is_initialized() {
            return Ok(Value::default_for(slot.ty()));
        }
        self.read_place(place)
    }
}

fn string_position(index: &TableIndex, display: &str) -> EvalResult<i64> {
    match index.as_slice() {
        [position] => Ok(i64::from(*position)),
        other => Err(index_arity(display, 1, other.len())),
    }
}
