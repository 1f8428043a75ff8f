//! Parser for the lisp compiler.
//!
//! Single pass over the raw bytes: no separate token stream. [`parse`] reads
//! a whole program; [`Parser::parse_expr`] reads one form at a time.

mod cursor;
mod error;
mod parser;

pub use error::{ParseError, ParseErrorKind};
pub use parser::Parser;

use lisp_ir::Expr;
use tracing::debug;

/// Parse a whole program into its top-level forms.
pub fn parse(src: &str) -> Result<Vec<Expr>, ParseError> {
    let program = Parser::new(src).parse_program()?;
    debug!(forms = program.len(), bytes = src.len(), "parsed program");
    Ok(program)
}
