//! Tree-walking interpreter for the lisp compiler.
//!
//! Evaluates a parsed program directly to an `i64`. Shares the AST and the
//! scope chain with the SSA back end; raw system calls and references are
//! compiler-only and rejected here.

mod environment;
mod errors;
mod interpreter;
mod operators;

pub use environment::{Binding, Environment};
pub use errors::{EvalError, EvalResult};
pub use interpreter::Interpreter;
pub use operators::{apply_arith, compare, fold_arith};

use lisp_ir::Expr;

/// Evaluate a whole program with a fresh interpreter.
pub fn eval_program(program: &[Expr]) -> EvalResult {
    Interpreter::new().eval_program(program)
}
