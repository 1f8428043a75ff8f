//! Evaluation errors.
//!
//! The first error aborts evaluation. Every variant carries the span of the
//! node that failed so the driver can point at it.

use lisp_diagnostic::{Diagnostic, ErrorCode};
use lisp_ir::{Arity, Span};
use thiserror::Error;

/// Errors produced by the tree-walking interpreter.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EvalError {
    #[error("unbound name `{name}`")]
    UnboundName { name: String, span: Span },
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
        span: Span,
    },
    #[error("`{operand}` takes {expected}, found {found}")]
    Arity {
        operand: String,
        expected: Arity,
        found: usize,
        span: Span,
    },
    #[error("unsupported operation: {what}")]
    Unsupported { what: &'static str, span: Span },
    #[error("division by zero")]
    DivisionByZero { span: Span },
}

pub type EvalResult<T = i64> = Result<T, EvalError>;

impl EvalError {
    pub fn span(&self) -> Span {
        match self {
            EvalError::UnboundName { span, .. }
            | EvalError::TypeMismatch { span, .. }
            | EvalError::Arity { span, .. }
            | EvalError::Unsupported { span, .. }
            | EvalError::DivisionByZero { span } => *span,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            EvalError::UnboundName { .. } => ErrorCode::E2001,
            EvalError::Arity { .. } => ErrorCode::E2003,
            EvalError::TypeMismatch { .. } => ErrorCode::E2004,
            EvalError::Unsupported { .. } => ErrorCode::E3001,
            EvalError::DivisionByZero { .. } => ErrorCode::E3002,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let label = match self {
            EvalError::UnboundName { .. } => "not found in this scope",
            EvalError::TypeMismatch { expected, .. } => *expected,
            EvalError::Arity { .. } => "wrong number of arguments",
            EvalError::Unsupported { .. } => "not supported by the interpreter",
            EvalError::DivisionByZero { .. } => "divisor evaluates to zero",
        };
        let diag = Diagnostic::error(self.code())
            .with_message(self.to_string())
            .with_label(self.span(), label);
        match self {
            EvalError::Unsupported { .. } => {
                diag.with_note("compile the program with `lispc compile` instead")
            }
            _ => diag,
        }
    }
}

// Constructors

#[cold]
pub(crate) fn unbound_name(name: &str, span: Span) -> EvalError {
    EvalError::UnboundName {
        name: name.to_string(),
        span,
    }
}

#[cold]
pub(crate) fn type_mismatch(expected: &'static str, found: &'static str, span: Span) -> EvalError {
    EvalError::TypeMismatch {
        expected,
        found,
        span,
    }
}

#[cold]
pub(crate) fn wrong_arity(operand: &str, expected: Arity, found: usize, span: Span) -> EvalError {
    EvalError::Arity {
        operand: operand.to_string(),
        expected,
        found,
        span,
    }
}
