//! Diagnostics for the lisp compiler.
//!
//! - Error codes for searchability
//! - Clear messages (what went wrong)
//! - Primary span (where it went wrong)
//! - Notes (context)
//!
//! Every phase error (`ParseError`, `EvalError`, `CodegenError`) converts
//! into a [`Diagnostic`]; the driver renders them with
//! [`emitter::TerminalEmitter`].

mod diagnostic;
pub mod emitter;
mod error_code;
pub mod span_utils;

pub use diagnostic::{Diagnostic, Label, Severity};
pub use error_code::ErrorCode;
