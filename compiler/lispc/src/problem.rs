//! Errors from any phase of the pipeline.

use lisp_diagnostic::Diagnostic;
use lisp_eval::EvalError;
use lisp_parse::ParseError;
use lisp_ssa::CodegenError;
use thiserror::Error;

/// The first error a compilation unit hit.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Problem {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Eval(#[from] EvalError),
    #[error(transparent)]
    Codegen(#[from] CodegenError),
}

impl Problem {
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            Problem::Parse(err) => err.to_diagnostic(),
            Problem::Eval(err) => err.to_diagnostic(),
            Problem::Codegen(err) => err.to_diagnostic(),
        }
    }
}
