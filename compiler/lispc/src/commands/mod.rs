//! Command handlers for the `lispc` CLI.
//!
//! Handlers report their own failures and exit the process with status 1;
//! the pure pipeline lives in the crate root.

use std::io::IsTerminal;

use lisp_diagnostic::emitter::{ColorMode, DiagnosticEmitter, TerminalEmitter};

use crate::Problem;

mod compile;
mod interpret;

pub use compile::{compile_file, default_output, parse_compile_options, CompileOptions, EmitType};
pub use interpret::interpret_file;

/// Read a source file, exiting with a readable message on failure.
fn read_file(path: &str) -> String {
    match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            let msg = match e.kind() {
                std::io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
                std::io::ErrorKind::PermissionDenied => {
                    format!("permission denied reading '{path}'")
                }
                std::io::ErrorKind::InvalidData => {
                    format!("'{path}' contains invalid UTF-8 data")
                }
                _ => format!("error reading '{path}': {e}"),
            };
            eprintln!("error: {msg}");
            std::process::exit(1);
        }
    }
}

/// Render `problem` against its source on stderr.
fn report_problem(path: &str, source: &str, problem: &Problem) {
    let is_tty = std::io::stderr().is_terminal();
    let mut emitter =
        TerminalEmitter::stderr(ColorMode::Auto, is_tty).with_source(path, source);
    emitter.emit(&problem.to_diagnostic());
    emitter.emit_summary(1, 0);
    emitter.flush();
}
