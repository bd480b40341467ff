//! Programmatic construction of program trees.
//!
//! Hosts that generate programs (and the evaluator's own tests) build trees
//! through [`AstBuilder`] instead of spelling out every node. All nodes get
//! [`Span::DUMMY`]; use [`Spanned::at`] to attach a real span.

use crate::ast::{
    Algorithm, BinaryOp, Bound, Declaration, Expr, ExprKind, Loop, LoopKind, OutputItem, Param,
    ParamMode, Place, PlaceKind, Program, Stmt, StmtKind, SwitchCase, TypeTag, UnaryOp, VarDecl,
};
use crate::{Name, Span, StringInterner};

/// Attach a span to a freshly built node.
pub trait Spanned: Sized {
    #[must_use]
    fn at(self, span: Span) -> Self;
}

impl Spanned for Expr {
    fn at(mut self, span: Span) -> Self {
        self.span = span;
        self
    }
}

impl Spanned for Stmt {
    fn at(mut self, span: Span) -> Self {
        self.span = span;
        self
    }
}

impl Spanned for Place {
    fn at(mut self, span: Span) -> Self {
        self.span = span;
        self
    }
}

/// Tree builder bound to an interner.
#[derive(Clone, Copy)]
pub struct AstBuilder<'a> {
    interner: &'a StringInterner,
}

impl<'a> AstBuilder<'a> {
    pub fn new(interner: &'a StringInterner) -> Self {
        AstBuilder { interner }
    }

    pub fn name(&self, ident: &str) -> Name {
        self.interner.intern(ident)
    }

    fn expr(kind: ExprKind) -> Expr {
        Expr::new(kind, Span::DUMMY)
    }

    fn stmt(kind: StmtKind) -> Stmt {
        Stmt::new(kind, Span::DUMMY)
    }

    // Expressions

    pub fn int(&self, value: i64) -> Expr {
        Self::expr(ExprKind::Int(value))
    }

    pub fn real(&self, value: f64) -> Expr {
        Self::expr(ExprKind::Real(value))
    }

    pub fn boolean(&self, value: bool) -> Expr {
        Self::expr(ExprKind::Bool(value))
    }

    pub fn chr(&self, value: char) -> Expr {
        Self::expr(ExprKind::Char(value))
    }

    pub fn string(&self, value: &str) -> Expr {
        Self::expr(ExprKind::Str(value.to_owned()))
    }

    pub fn hex(&self, digits: &str) -> Expr {
        Self::expr(ExprKind::Hex(digits.to_owned()))
    }

    pub fn var(&self, ident: &str) -> Expr {
        Self::expr(ExprKind::Ident(self.name(ident)))
    }

    pub fn index(&self, table: &str, indices: Vec<Expr>) -> Expr {
        Self::expr(ExprKind::Index {
            base: self.name(table),
            indices,
        })
    }

    pub fn unary(&self, op: UnaryOp, operand: Expr) -> Expr {
        Self::expr(ExprKind::Unary {
            op,
            operand: Box::new(operand),
        })
    }

    pub fn binary(&self, op: BinaryOp, left: Expr, right: Expr) -> Expr {
        Self::expr(ExprKind::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn call(&self, callee: &str, args: Vec<Expr>) -> Expr {
        Self::expr(ExprKind::Call {
            callee: self.name(callee),
            args,
        })
    }

    // Places

    pub fn place(&self, ident: &str) -> Place {
        Place {
            kind: PlaceKind::Var(self.name(ident)),
            span: Span::DUMMY,
        }
    }

    pub fn element(&self, table: &str, indices: Vec<Expr>) -> Place {
        Place {
            kind: PlaceKind::Element {
                table: self.name(table),
                indices,
            },
            span: Span::DUMMY,
        }
    }

    // Statements

    /// Scalar declaration of one or more names.
    pub fn declare(&self, ty: TypeTag, idents: &[&str]) -> Stmt {
        let vars = idents
            .iter()
            .map(|ident| VarDecl {
                name: self.name(ident),
                bounds: Vec::new(),
                init: None,
                span: Span::DUMMY,
            })
            .collect();
        Self::stmt(StmtKind::Declare(Declaration {
            ty,
            is_table: false,
            vars,
        }))
    }

    /// Scalar declaration with an initializer.
    pub fn declare_init(&self, ty: TypeTag, ident: &str, init: Expr) -> Stmt {
        Self::stmt(StmtKind::Declare(Declaration {
            ty,
            is_table: false,
            vars: vec![VarDecl {
                name: self.name(ident),
                bounds: Vec::new(),
                init: Some(init),
                span: Span::DUMMY,
            }],
        }))
    }

    /// Table declaration; `bounds` holds one `(lower, upper)` pair per dimension.
    pub fn declare_table(&self, ty: TypeTag, ident: &str, bounds: Vec<(Expr, Expr)>) -> Stmt {
        Self::stmt(StmtKind::Declare(Declaration {
            ty,
            is_table: true,
            vars: vec![VarDecl {
                name: self.name(ident),
                bounds: bounds
                    .into_iter()
                    .map(|(lower, upper)| Bound { lower, upper })
                    .collect(),
                init: None,
                span: Span::DUMMY,
            }],
        }))
    }

    pub fn assign(&self, ident: &str, value: Expr) -> Stmt {
        self.assign_to(self.place(ident), value)
    }

    pub fn assign_to(&self, target: Place, value: Expr) -> Stmt {
        Self::stmt(StmtKind::Assign { target, value })
    }

    /// `знач := value`
    pub fn assign_result(&self, value: Expr) -> Stmt {
        self.assign_to(
            Place {
                kind: PlaceKind::Var(Name::RESULT),
                span: Span::DUMMY,
            },
            value,
        )
    }

    /// `вывод` of plain expressions.
    pub fn output(&self, exprs: Vec<Expr>) -> Stmt {
        self.output_items(
            exprs
                .into_iter()
                .map(|expr| OutputItem::Value {
                    expr,
                    width: None,
                    precision: None,
                })
                .collect(),
        )
    }

    pub fn output_items(&self, items: Vec<OutputItem>) -> Stmt {
        Self::stmt(StmtKind::Output(items))
    }

    pub fn input(&self, targets: Vec<Place>) -> Stmt {
        Self::stmt(StmtKind::Input(targets))
    }

    pub fn if_then(&self, cond: Expr, then_branch: Vec<Stmt>, else_branch: Option<Vec<Stmt>>) -> Stmt {
        Self::stmt(StmtKind::If {
            cond,
            then_branch,
            else_branch,
        })
    }

    pub fn switch(&self, cases: Vec<(Expr, Vec<Stmt>)>, otherwise: Option<Vec<Stmt>>) -> Stmt {
        Self::stmt(StmtKind::Switch {
            cases: cases
                .into_iter()
                .map(|(cond, body)| SwitchCase { cond, body })
                .collect(),
            otherwise,
        })
    }

    pub fn for_loop(&self, var: &str, start: Expr, end: Expr, step: Option<Expr>, body: Vec<Stmt>) -> Stmt {
        self.loop_stmt(
            LoopKind::For {
                var: self.name(var),
                start,
                end,
                step,
            },
            body,
            None,
        )
    }

    pub fn while_loop(&self, cond: Expr, body: Vec<Stmt>) -> Stmt {
        self.loop_stmt(LoopKind::While(cond), body, None)
    }

    pub fn times_loop(&self, count: Expr, body: Vec<Stmt>) -> Stmt {
        self.loop_stmt(LoopKind::Times(count), body, None)
    }

    pub fn loop_stmt(&self, kind: LoopKind, body: Vec<Stmt>, end_condition: Option<Expr>) -> Stmt {
        Self::stmt(StmtKind::Loop(Loop {
            kind,
            body,
            end_condition,
        }))
    }

    pub fn exit(&self) -> Stmt {
        Self::stmt(StmtKind::Exit)
    }

    pub fn stop(&self) -> Stmt {
        Self::stmt(StmtKind::Stop)
    }

    pub fn assert(&self, cond: Expr) -> Stmt {
        Self::stmt(StmtKind::Assert(cond))
    }

    pub fn pause(&self) -> Stmt {
        Self::stmt(StmtKind::Pause)
    }

    pub fn call_stmt(&self, callee: &str, args: Vec<Expr>) -> Stmt {
        Self::stmt(StmtKind::Call {
            callee: self.name(callee),
            args,
        })
    }

    // Algorithms

    pub fn param(&self, mode: ParamMode, ty: TypeTag, ident: &str) -> Param {
        Param {
            mode,
            ty,
            is_table: false,
            name: self.name(ident),
            bounds: Vec::new(),
            span: Span::DUMMY,
        }
    }

    pub fn table_param(&self, mode: ParamMode, ty: TypeTag, ident: &str, bounds: Vec<(Expr, Expr)>) -> Param {
        Param {
            mode,
            ty,
            is_table: true,
            name: self.name(ident),
            bounds: bounds
                .into_iter()
                .map(|(lower, upper)| Bound { lower, upper })
                .collect(),
            span: Span::DUMMY,
        }
    }

    pub fn algorithm(&self, ident: &str, params: Vec<Param>, result: Option<TypeTag>, body: Vec<Stmt>) -> Algorithm {
        Algorithm {
            name: self.name(ident),
            params,
            result,
            body,
            span: Span::DUMMY,
        }
    }

    /// Program with a single parameterless entry algorithm.
    pub fn main_program(&self, body: Vec<Stmt>) -> Program {
        Program {
            introduction: Vec::new(),
            algorithms: vec![self.algorithm("главный", Vec::new(), None, body)],
        }
    }
}

#[cfg(test)]
mod tests;
