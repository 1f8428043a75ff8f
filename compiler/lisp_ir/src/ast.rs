//! Abstract syntax tree.
//!
//! One closed sum type, [`ExprKind`], shared by the interpreter and the SSA
//! lowering. Every node carries the [`Span`] it was parsed from.
//!
//! Built-in operators and user calls share the [`Call`] node: which one a
//! call is gets decided by the consumer through
//! [`Builtin::from_operand`](crate::Builtin::from_operand), never by the parser.

use crate::Span;

/// An expression node with its source location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    #[inline]
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }

    /// Short human-readable name of the node kind, used in diagnostics.
    pub fn describe(&self) -> &'static str {
        match &self.kind {
            ExprKind::Int(_) => "an integer literal",
            ExprKind::Call(_) => "a call",
            ExprKind::Def(_) => "a function definition",
            ExprKind::Ident(_) => "an identifier",
            ExprKind::If(_) => "a conditional",
            ExprKind::Ref(_) => "a reference",
        }
    }
}

/// Expression variants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExprKind {
    /// Integer literal: `42`.
    Int(i64),
    /// Operator or function application: `(+ 1 2)`, `(fib 8)`.
    Call(Call),
    /// Function definition: `(def name (params...) body...)`.
    Def(FunctionDef),
    /// Variable reference.
    Ident(String),
    /// `(if (cmp a b) then [else])`.
    If(Box<Conditional>),
    /// `&expr`: address of a stack copy of the value.
    Ref(Box<Expr>),
}

/// `(operand args...)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Call {
    pub operand: String,
    pub args: Vec<Expr>,
    /// Span of the whole parenthesized form.
    pub span: Span,
}

/// `(def name (params...) body...)`.
///
/// The body always holds at least one expression; the value of the last one
/// is the function's result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionDef {
    pub name: String,
    pub params: Vec<String>,
    pub body: Vec<Expr>,
    pub span: Span,
}

impl FunctionDef {
    /// Number of parameters.
    #[inline]
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Whether this is the program entry point.
    #[inline]
    pub fn is_main(&self) -> bool {
        self.name == "main"
    }
}

/// A conditional. The condition is syntactically a call; whether it is a
/// comparison is checked by the back ends.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Conditional {
    pub cond: Call,
    pub then_branch: Expr,
    pub else_branch: Option<Expr>,
}
