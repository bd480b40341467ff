//! Expression nodes.

use super::{BinaryOp, UnaryOp};
use crate::{Name, Span};

/// Expression node with its source span.
#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    /// Decimal integer literal. Kept wide so the evaluator can report
    /// literals outside the language's integer range.
    Int(i64),
    Real(f64),
    /// `да` / `нет`
    Bool(bool),
    Char(char),
    Str(String),
    /// `$1F`: the hex digits after `$`, normalized to an integer at evaluation.
    Hex(String),
    Ident(Name),
    /// `a[i, j]`
    Index {
        base: Name,
        indices: Vec<Expr>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// Call of a function, builtin or world sensor inside an expression.
    Call {
        callee: Name,
        args: Vec<Expr>,
    },
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }

    /// Reinterpret this expression as an assignable location, if it is one.
    ///
    /// Used for `рез`/`аргрез` actual arguments, which the front end parses
    /// as ordinary expressions.
    pub fn as_place(&self) -> Option<Place> {
        let kind = match &self.kind {
            ExprKind::Ident(name) => PlaceKind::Var(*name),
            ExprKind::Index { base, indices } => PlaceKind::Element {
                table: *base,
                indices: indices.clone(),
            },
            _ => return None,
        };
        Some(Place {
            kind,
            span: self.span,
        })
    }
}

/// Assignable location: a variable or a table element.
#[derive(Clone, Debug, PartialEq)]
pub struct Place {
    pub kind: PlaceKind,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub enum PlaceKind {
    Var(Name),
    Element { table: Name, indices: Vec<Expr> },
}

impl Place {
    /// Name of the variable or table this place refers to.
    pub fn root(&self) -> Name {
        match &self.kind {
            PlaceKind::Var(name) => *name,
            PlaceKind::Element { table, .. } => *table,
        }
    }
}
