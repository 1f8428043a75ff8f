//! Driver for the lisp compiler.
//!
//! Ties the pipeline together: source text → parser → interpreter or SSA
//! back end → external toolchain. The `lispc` binary is a thin argument
//! parser over [`commands`].

pub mod commands;
mod problem;
mod toolchain;

pub use problem::Problem;
pub use toolchain::{Toolchain, ToolchainError};

use std::sync::Once;

use lisp_ssa::{CodegenError, Module};
use tracing::debug;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call more than once. Enable with e.g. `RUST_LOG=lisp_ssa=debug`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}

/// Parse and evaluate `source`.
pub fn interpret_source(source: &str) -> Result<i64, Problem> {
    let program = lisp_parse::parse(source)?;
    let value = lisp_eval::eval_program(&program)?;
    debug!(value, "interpreted program");
    Ok(value)
}

/// Parse and lower `source` to an SSA module for the host.
///
/// Debug builds also run the IR verifier, so a lowering bug surfaces as an
/// internal error here instead of an `llc` failure later.
pub fn compile_source(source: &str, module_name: &str) -> Result<Module, Problem> {
    let program = lisp_parse::parse(source)?;
    let module = lisp_ssa::compile_program(&program, module_name)?;
    if cfg!(debug_assertions) {
        lisp_ssa::verify_module(&module).map_err(CodegenError::from)?;
    }
    Ok(module)
}
