//! Shared data model for the lisp compiler.
//!
//! - [`Span`]: byte ranges into source text
//! - [`Expr`] and friends: the abstract syntax tree
//! - [`Builtin`]: classification of call operands
//! - [`Scope`]: borrowed scope chains used by both back ends

mod ast;
mod ops;
mod scope;
mod span;

pub use ast::{Call, Conditional, Expr, ExprKind, FunctionDef};
pub use ops::{is_operator_char, ArithOp, Arity, Builtin, CompareOp, OPERATOR_CHARS, SYS_WRITE};
pub use scope::Scope;
pub use span::Span;
