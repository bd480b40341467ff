//! Kumir IR: the program tree the execution engine consumes.
//!
//! - Spans and their resolution into line/column positions
//! - Case-folded interned identifiers
//! - AST nodes for declarations, statements, expressions and algorithms
//! - A builder for constructing trees without a parser

pub mod ast;
pub mod builder;
mod interner;
mod name;
mod span;

pub use ast::{
    Algorithm, BinaryOp, Bound, Declaration, Expr, ExprKind, Loop, LoopKind, OutputItem, Param,
    ParamMode, Place, PlaceKind, Program, Stmt, StmtKind, SwitchCase, TypeTag, UnaryOp, VarDecl,
};
pub use builder::{AstBuilder, Spanned};
pub use interner::{InternError, StringInterner};
pub use name::Name;
pub use span::{LineIndex, SourceLocation, Span};
