//! Code generation errors.

use lisp_diagnostic::{Diagnostic, ErrorCode};
use lisp_ir::{Arity, Span};
use thiserror::Error;

use crate::verify::VerifyError;

/// Errors produced while lowering a program to SSA.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CodegenError {
    #[error("unbound name `{name}`")]
    UnboundName { name: String, span: Span },
    #[error("call to undefined function `{name}`")]
    UndefinedFunction { name: String, span: Span },
    #[error("`{operand}` takes {expected}, found {found}")]
    Arity {
        operand: String,
        expected: Arity,
        found: usize,
        span: Span,
    },
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
        span: Span,
    },
    #[error("function `{name}` is defined more than once")]
    Redefinition {
        name: String,
        span: Span,
        previous: Span,
    },
    #[error("unsupported operation: {what}")]
    Unsupported { what: &'static str, span: Span },
    #[error("internal compiler error: {message}")]
    Internal { message: String },
    #[error("internal compiler error: generated IR is malformed: {0}")]
    Verify(#[from] VerifyError),
}

impl CodegenError {
    pub fn span(&self) -> Option<Span> {
        match self {
            CodegenError::UnboundName { span, .. }
            | CodegenError::UndefinedFunction { span, .. }
            | CodegenError::Arity { span, .. }
            | CodegenError::TypeMismatch { span, .. }
            | CodegenError::Redefinition { span, .. }
            | CodegenError::Unsupported { span, .. } => Some(*span),
            CodegenError::Internal { .. } | CodegenError::Verify(_) => None,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            CodegenError::UnboundName { .. } => ErrorCode::E2001,
            CodegenError::UndefinedFunction { .. } => ErrorCode::E2002,
            CodegenError::Arity { .. } => ErrorCode::E2003,
            CodegenError::TypeMismatch { .. } => ErrorCode::E2004,
            CodegenError::Redefinition { .. } | CodegenError::Unsupported { .. } => {
                ErrorCode::E3001
            }
            CodegenError::Internal { .. } | CodegenError::Verify(_) => ErrorCode::E9001,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.code()).with_message(self.to_string());
        if let CodegenError::Redefinition { span, previous, .. } = self {
            return diag
                .with_label(*span, "redefined here")
                .with_secondary_label(*previous, "first defined here");
        }
        let label = match self {
            CodegenError::UnboundName { .. } => "not found in this scope",
            CodegenError::UndefinedFunction { .. } => "no function with this name",
            CodegenError::Arity { .. } => "wrong number of arguments",
            CodegenError::TypeMismatch { expected, .. } => *expected,
            CodegenError::Unsupported { .. } | CodegenError::Redefinition { .. } => {
                "cannot be compiled"
            }
            CodegenError::Internal { .. } | CodegenError::Verify(_) => {
                return diag.with_note("this is a bug in the compiler");
            }
        };
        match self.span() {
            Some(span) => diag.with_label(span, label),
            None => diag,
        }
    }
}

// Constructors

#[cold]
pub(crate) fn unbound_name(name: &str, span: Span) -> CodegenError {
    CodegenError::UnboundName {
        name: name.to_string(),
        span,
    }
}

#[cold]
pub(crate) fn type_mismatch(expected: &'static str, found: &'static str, span: Span) -> CodegenError {
    CodegenError::TypeMismatch {
        expected,
        found,
        span,
    }
}

#[cold]
pub(crate) fn wrong_arity(operand: &str, expected: Arity, found: usize, span: Span) -> CodegenError {
    CodegenError::Arity {
        operand: operand.to_string(),
        expected,
        found,
        span,
    }
}

#[cold]
pub(crate) fn unsupported(what: &'static str, span: Span) -> CodegenError {
    CodegenError::Unsupported { what, span }
}
