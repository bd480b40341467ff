//! Bounded multi-dimensional tables.
//!
//! Storage is sparse: only written cells are stored, and a read of an
//! in-bounds cell that was never written yields the element default.

use super::Value;
use crate::coerce::coerce;
use crate::errors::{index_arity, index_out_of_bounds, EvalError};
use kumir_ir::TypeTag;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Index tuple, one component per dimension.
pub type TableIndex = SmallVec<[i32; 2]>;

/// Inclusive `lower:upper` bounds of one dimension. `lower > upper` is an
/// empty dimension.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Dim {
    pub lower: i32,
    pub upper: i32,
}

impl Dim {
    pub const fn new(lower: i32, upper: i32) -> Self {
        Dim { lower, upper }
    }

    #[inline]
    pub fn contains(&self, index: i32) -> bool {
        self.lower <= index && index <= self.upper
    }

    pub fn len(&self) -> usize {
        usize::try_from(i64::from(self.upper) - i64::from(self.lower) + 1).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.lower > self.upper
    }
}

/// Table access failure. The table itself does not know its variable name,
/// so callers attach it through [`TableError::into_eval`].
#[derive(Clone, Debug, PartialEq)]
pub enum TableError {
    Arity {
        expected: usize,
        got: usize,
    },
    /// `dimension` is one-based.
    OutOfBounds {
        dimension: usize,
        index: i32,
        dim: Dim,
    },
    /// The stored value did not coerce to the element type.
    Element(EvalError),
}

impl TableError {
    pub fn into_eval(self, table: &str) -> EvalError {
        match self {
            TableError::Arity { expected, got } => index_arity(table, expected, got),
            TableError::OutOfBounds {
                dimension,
                index,
                dim,
            } => index_out_of_bounds(table, dimension, i64::from(index), dim.lower, dim.upper),
            TableError::Element(err) => err,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Table {
    element: TypeTag,
    dims: SmallVec<[Dim; 2]>,
    cells: FxHashMap<TableIndex, Value>,
}

impl Table {
    pub fn new(element: TypeTag, dims: impl IntoIterator<Item = Dim>) -> Self {
        Table {
            element,
            dims: dims.into_iter().collect(),
            cells: FxHashMap::default(),
        }
    }

    pub fn element_type(&self) -> TypeTag {
        self.element
    }

    pub fn dims(&self) -> &[Dim] {
        &self.dims
    }

    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    /// Number of explicitly written cells.
    pub fn written(&self) -> usize {
        self.cells.len()
    }

    pub fn check_index(&self, index: &[i32]) -> Result<(), TableError> {
        if index.len() != self.dims.len() {
            return Err(TableError::Arity {
                expected: self.dims.len(),
                got: index.len(),
            });
        }
        for (i, (&component, dim)) in index.iter().zip(&self.dims).enumerate() {
            if !dim.contains(component) {
                return Err(TableError::OutOfBounds {
                    dimension: i + 1,
                    index: component,
                    dim: *dim,
                });
            }
        }
        Ok(())
    }

    pub fn get(&self, index: &[i32]) -> Result<Value, TableError> {
        self.check_index(index)?;
        Ok(self
            .cells
            .get(index)
            .cloned()
            .unwrap_or_else(|| Value::default_for(self.element)))
    }

    pub fn set(&mut self, index: &[i32], value: Value) -> Result<(), TableError> {
        self.check_index(index)?;
        let value = coerce(value, self.element).map_err(TableError::Element)?;
        self.cells.insert(TableIndex::from_slice(index), value);
        Ok(())
    }

    /// Same element type and dimension count; bounds may differ.
    pub fn same_shape(&self, other: &Table) -> bool {
        self.element == other.element && self.dims.len() == other.dims.len()
    }
}
