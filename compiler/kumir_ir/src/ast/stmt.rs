//! Statements, algorithm definitions and the program root.

use super::{Expr, ParamMode, Place, TypeTag};
use crate::{Name, Span};

#[derive(Clone, Debug, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum StmtKind {
    /// `цел a, b` / `вещ таб t[1:10]`
    Declare(Declaration),
    /// `a := expr`
    Assign { target: Place, value: Expr },
    /// `вывод a, " ", b:6:2, нс`
    Output(Vec<OutputItem>),
    /// `ввод a, t[i]`
    Input(Vec<Place>),
    /// `если cond то ... иначе ... все`
    If {
        cond: Expr,
        then_branch: Vec<Stmt>,
        else_branch: Option<Vec<Stmt>>,
    },
    /// `выбор при c1: ... при c2: ... иначе ... все`
    Switch {
        cases: Vec<SwitchCase>,
        otherwise: Option<Vec<Stmt>>,
    },
    /// `нц ... кц` in all its forms.
    Loop(Loop),
    /// `выход`
    Exit,
    /// `стоп`
    Stop,
    /// `утв cond`
    Assert(Expr),
    /// `пауза`
    Pause,
    /// Procedure call or world command used as a statement.
    Call { callee: Name, args: Vec<Expr> },
}

/// One declaration statement: a type, an optional `таб`, and its names.
#[derive(Clone, Debug, PartialEq)]
pub struct Declaration {
    pub ty: TypeTag,
    pub is_table: bool,
    pub vars: Vec<VarDecl>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct VarDecl {
    pub name: Name,
    /// Per-dimension bounds; empty for scalars.
    pub bounds: Vec<Bound>,
    /// `цел n = 5`
    pub init: Option<Expr>,
    pub span: Span,
}

/// `lower:upper` bound pair of one table dimension.
#[derive(Clone, Debug, PartialEq)]
pub struct Bound {
    pub lower: Expr,
    pub upper: Expr,
}

#[derive(Clone, Debug, PartialEq)]
pub enum OutputItem {
    /// An expression with optional `:width` and `:width:precision` suffixes.
    Value {
        expr: Expr,
        width: Option<Expr>,
        precision: Option<Expr>,
    },
    /// `нс`
    Newline,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SwitchCase {
    pub cond: Expr,
    pub body: Vec<Stmt>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Loop {
    pub kind: LoopKind,
    pub body: Vec<Stmt>,
    /// `кц при cond`
    pub end_condition: Option<Expr>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum LoopKind {
    /// `нц для i от a до b шаг s`
    For {
        var: Name,
        start: Expr,
        end: Expr,
        step: Option<Expr>,
    },
    /// `нц пока cond`
    While(Expr),
    /// `нц n раз`
    Times(Expr),
    /// bare `нц`
    Forever,
}

/// Formal parameter of an algorithm.
#[derive(Clone, Debug, PartialEq)]
pub struct Param {
    pub mode: ParamMode,
    pub ty: TypeTag,
    pub is_table: bool,
    pub name: Name,
    /// Declared bounds of a table formal; only the dimension count is checked.
    pub bounds: Vec<Bound>,
    pub span: Span,
}

/// `алг [тип] имя(параметры) нач ... кон`
#[derive(Clone, Debug, PartialEq)]
pub struct Algorithm {
    pub name: Name,
    pub params: Vec<Param>,
    /// Result type; `None` for procedures.
    pub result: Option<TypeTag>,
    pub body: Vec<Stmt>,
    pub span: Span,
}

impl Algorithm {
    pub fn is_function(&self) -> bool {
        self.result.is_some()
    }

    /// Candidate for the entry point: a procedure without parameters.
    pub fn is_entry_candidate(&self) -> bool {
        self.params.is_empty() && self.result.is_none()
    }
}

/// A whole parsed program.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Program {
    /// Top-level statements before the first algorithm (the introduction).
    pub introduction: Vec<Stmt>,
    pub algorithms: Vec<Algorithm>,
}
