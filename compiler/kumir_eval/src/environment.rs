//! Scope stack for variable slots.
//!
//! Frame 0 is the global frame: created with the environment and never
//! popped. Every algorithm activation pushes a `Call` frame and every
//! counted loop pushes a `Block` frame. Name resolution walks from the
//! innermost frame outwards but stops at the nearest `Call` frame and then
//! falls back to the global frame, so a callee never sees its caller's
//! locals.

use crate::coerce::coerce;
use crate::errors::{
    duplicate_declaration, scope_underflow, table_shape_mismatch, undefined_variable,
    uninitialized, not_a_table, EvalError,
};
use crate::value::{Table, Value};
use kumir_ir::{Name, TypeTag};
use rustc_hash::FxHashMap;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FrameKind {
    Global,
    /// Algorithm activation; hides everything below it except the global frame.
    Call,
    /// Loop frame holding the loop variable.
    Block,
}

/// Storage for one declared variable.
#[derive(Clone, Debug, PartialEq)]
pub struct Slot {
    ty: TypeTag,
    is_table: bool,
    value: Value,
    initialized: bool,
}

impl Slot {
    /// Scalar holding its type default.
    pub fn scalar(ty: TypeTag) -> Self {
        Slot {
            ty,
            is_table: false,
            value: Value::default_for(ty),
            initialized: true,
        }
    }

    /// Scalar with no value yet (`рез` formals, the return slot).
    pub fn uninit(ty: TypeTag) -> Self {
        Slot {
            initialized: false,
            ..Slot::scalar(ty)
        }
    }

    pub fn table(table: Table) -> Self {
        Slot {
            ty: table.element_type(),
            is_table: true,
            value: Value::Table(table),
            initialized: true,
        }
    }

    pub fn ty(&self) -> TypeTag {
        self.ty
    }

    pub fn is_table(&self) -> bool {
        self.is_table
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

/// Scope operation failure, turned into an `EvalError` once the caller
/// supplies the variable's display name.
#[derive(Clone, Debug, PartialEq)]
pub enum ScopeError {
    AlreadyDeclared,
    Undefined,
    Uninitialized,
    NotATable,
    /// Whole-table assignment between tables of different element type or rank.
    TableShape,
    GlobalFrame,
    Coerce(EvalError),
}

impl ScopeError {
    pub fn into_eval(self, name: &str) -> EvalError {
        match self {
            ScopeError::AlreadyDeclared => duplicate_declaration(name),
            ScopeError::Undefined => undefined_variable(name),
            ScopeError::Uninitialized => uninitialized(name),
            ScopeError::NotATable => not_a_table(name),
            ScopeError::TableShape => table_shape_mismatch(name),
            ScopeError::GlobalFrame => scope_underflow(),
            ScopeError::Coerce(err) => err,
        }
    }
}

#[derive(Debug)]
struct Frame {
    kind: FrameKind,
    slots: FxHashMap<Name, Slot>,
}

impl Frame {
    fn new(kind: FrameKind) -> Self {
        Frame {
            kind,
            slots: FxHashMap::default(),
        }
    }
}

/// The run's single scope stack.
#[derive(Debug)]
pub struct Environment {
    frames: Vec<Frame>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            frames: vec![Frame::new(FrameKind::Global)],
        }
    }

    /// Number of frames, including the global one.
    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn current_kind(&self) -> FrameKind {
        self.frames.last().map_or(FrameKind::Global, |f| f.kind)
    }

    pub fn push_frame(&mut self, kind: FrameKind) {
        self.frames.push(Frame::new(kind));
    }

    pub fn pop_frame(&mut self) -> Result<(), ScopeError> {
        if self.frames.len() <= 1 {
            return Err(ScopeError::GlobalFrame);
        }
        self.frames.pop();
        Ok(())
    }

    /// Frame indices visible from the top, innermost first.
    fn visible(&self) -> impl Iterator<Item = usize> {
        let barrier = self
            .frames
            .iter()
            .rposition(|f| f.kind == FrameKind::Call)
            .unwrap_or(0);
        (barrier..self.frames.len())
            .rev()
            .chain((barrier > 0).then_some(0))
    }

    /// Declare in the current frame. Shadowing outer frames is allowed.
    pub fn declare(&mut self, name: Name, slot: Slot) -> Result<(), ScopeError> {
        let Some(frame) = self.frames.last_mut() else {
            return Err(ScopeError::GlobalFrame);
        };
        if frame.slots.contains_key(&name) {
            return Err(ScopeError::AlreadyDeclared);
        }
        frame.slots.insert(name, slot);
        Ok(())
    }

    pub fn find(&self, name: Name) -> Option<&Slot> {
        self.visible()
            .find_map(|i| self.frames.get(i).and_then(|f| f.slots.get(&name)))
    }

    pub fn find_mut(&mut self, name: Name) -> Option<&mut Slot> {
        let idx = self
            .visible()
            .find(|&i| self.frames.get(i).is_some_and(|f| f.slots.contains_key(&name)))?;
        self.frames.get_mut(idx)?.slots.get_mut(&name)
    }

    /// Current value of a variable; uninitialized slots are an error.
    pub fn read(&self, name: Name) -> Result<Value, ScopeError> {
        let slot = self.find(name).ok_or(ScopeError::Undefined)?;
        if !slot.initialized {
            return Err(ScopeError::Uninitialized);
        }
        Ok(slot.value.clone())
    }

    /// Coerce `value` to the slot's type and store it.
    ///
    /// A table slot only accepts a whole table of the same element type and
    /// rank; the stored table is the caller's copy.
    pub fn update(&mut self, name: Name, value: Value) -> Result<(), ScopeError> {
        let slot = self.find_mut(name).ok_or(ScopeError::Undefined)?;
        let value = if slot.is_table {
            match (&slot.value, value) {
                (Value::Table(current), Value::Table(incoming)) if current.same_shape(&incoming) => {
                    Value::Table(incoming)
                }
                _ => return Err(ScopeError::TableShape),
            }
        } else {
            coerce(value, slot.ty).map_err(ScopeError::Coerce)?
        };
        slot.value = value;
        slot.initialized = true;
        Ok(())
    }

    pub fn table(&self, name: Name) -> Result<&Table, ScopeError> {
        match self.find(name).map(|s| &s.value) {
            Some(Value::Table(table)) => Ok(table),
            Some(_) => Err(ScopeError::NotATable),
            None => Err(ScopeError::Undefined),
        }
    }

    pub fn table_mut(&mut self, name: Name) -> Result<&mut Table, ScopeError> {
        match self.find_mut(name).map(|s| &mut s.value) {
            Some(Value::Table(table)) => Ok(table),
            Some(_) => Err(ScopeError::NotATable),
            None => Err(ScopeError::Undefined),
        }
    }

    /// Global variables with their values, for trace snapshots.
    pub fn globals(&self) -> Vec<(Name, Value)> {
        let mut vars: Vec<_> = self
            .frames
            .first()
            .map(|f| {
                f.slots
                    .iter()
                    .filter(|(_, slot)| slot.initialized)
                    .map(|(name, slot)| (*name, slot.value.clone()))
                    .collect()
            })
            .unwrap_or_default();
        vars.sort_by_key(|(name, _)| *name);
        vars
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
