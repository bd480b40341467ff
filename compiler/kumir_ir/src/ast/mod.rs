//! Parsed program tree consumed by the evaluator.
//!
//! The front end owns syntax; every node here is already syntactically
//! valid. Nodes are plain owned trees: programs are small and executed
//! once, so there is no arena.

mod expr;
mod operators;
mod stmt;
mod types;

pub use expr::{Expr, ExprKind, Place, PlaceKind};
pub use operators::{BinaryOp, UnaryOp};
pub use stmt::{
    Algorithm, Bound, Declaration, Loop, LoopKind, OutputItem, Param, Program, Stmt, StmtKind,
    SwitchCase, VarDecl,
};
pub use types::{ParamMode, TypeTag};
