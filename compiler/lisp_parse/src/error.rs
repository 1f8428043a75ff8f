//! Parse error types.
//!
//! Parsing stops at the first error; there is no recovery and no partial
//! AST. Each kind maps to one `E1xxx` code.

use lisp_diagnostic::{Diagnostic, ErrorCode};
use lisp_ir::Span;
use thiserror::Error;

/// What went wrong.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ParseErrorKind {
    #[error("unexpected character `{found}`, expected {expected}")]
    UnexpectedChar { found: char, expected: &'static str },
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEof { expected: &'static str },
    #[error("integer literal `{literal}` does not fit in a signed 64-bit integer")]
    IntegerOverflow { literal: String },
    #[error("function `{name}` has an empty body")]
    EmptyBody { name: String },
    #[error("the condition of `if` must be a parenthesized call")]
    ConditionNotCall,
    #[error("expected {expected}, found `{found}`")]
    ExpectedIdentifier { found: char, expected: &'static str },
}

/// A syntax error with its location.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{kind}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
}

impl ParseError {
    #[cold]
    pub fn new(kind: ParseErrorKind, span: Span) -> Self {
        ParseError { kind, span }
    }

    pub fn code(&self) -> ErrorCode {
        match self.kind {
            ParseErrorKind::UnexpectedChar { .. } => ErrorCode::E1001,
            ParseErrorKind::UnexpectedEof { .. } => ErrorCode::E1002,
            ParseErrorKind::IntegerOverflow { .. } => ErrorCode::E1003,
            ParseErrorKind::EmptyBody { .. } => ErrorCode::E1004,
            ParseErrorKind::ConditionNotCall => ErrorCode::E1005,
            ParseErrorKind::ExpectedIdentifier { .. } => ErrorCode::E1006,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let label = match &self.kind {
            ParseErrorKind::UnexpectedChar { .. } | ParseErrorKind::ExpectedIdentifier { .. } => {
                "unexpected here"
            }
            ParseErrorKind::UnexpectedEof { .. } => "input ends here",
            ParseErrorKind::IntegerOverflow { .. } => "out of range",
            ParseErrorKind::EmptyBody { .. } => "defined here",
            ParseErrorKind::ConditionNotCall => "not a call",
        };
        let diag = Diagnostic::error(self.code())
            .with_message(self.to_string())
            .with_label(self.span, label);
        match &self.kind {
            ParseErrorKind::IntegerOverflow { .. } => {
                diag.with_note(format!("the largest integer literal is {}", i64::MAX))
            }
            ParseErrorKind::EmptyBody { .. } => {
                diag.with_note("a function body needs at least one expression")
            }
            ParseErrorKind::ConditionNotCall => {
                diag.with_note("write the condition as a comparison, e.g. `(< a b)`")
            }
            ParseErrorKind::ExpectedIdentifier { .. } => {
                diag.with_note("names start with a lowercase letter")
            }
            ParseErrorKind::UnexpectedChar { .. } | ParseErrorKind::UnexpectedEof { .. } => diag,
        }
    }
}
