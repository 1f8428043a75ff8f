//! SSA back end for the lisp compiler.
//!
//! Lowers a parsed program to a [`Module`] of SSA functions and prints it as
//! LLVM IR text for `llc`.
//!
//! # Architecture
//!
//! - [`CodegenCx`]: per-compilation state (function table, output module)
//! - [`FunctionBuilder`]: per-function symbol/label counters and blocks
//! - `lower`: AST → instructions, one `lower_expr(expr, target, scope)` per node
//! - [`verify_module`]: structural checks on the result
//!
//! Every top-level form must be a `def`; all definitions are declared before
//! any body is lowered, so call order in the source does not matter.

mod builder;
mod context;
mod declare;
mod errors;
mod ir;
mod lower;
mod printer;
mod syscall;
mod verify;

pub use builder::FunctionBuilder;
pub use context::{CodegenCx, FunctionSig};
pub use errors::CodegenError;
pub use ir::{
    BinOp, Block, BlockId, Function, IcmpPred, Instr, Module, Operand, Sym, Terminator,
};
pub use lower::{LowerScope, Storage};
pub use syscall::SyscallAbi;
pub use verify::{verify_function, verify_module, VerifyError};

use lisp_ir::Expr;
use tracing::debug;

use crate::lower::Lowerer;

/// Compile `program` for the host's syscall convention.
pub fn compile_program(program: &[Expr], module_name: &str) -> Result<Module, CodegenError> {
    compile_program_with_abi(program, module_name, SyscallAbi::host())
}

/// Compile `program` with an explicit syscall convention.
pub fn compile_program_with_abi(
    program: &[Expr],
    module_name: &str,
    abi: SyscallAbi,
) -> Result<Module, CodegenError> {
    let mut cx = CodegenCx::new(module_name, abi);
    let (root, defs) = cx.declare_program(program)?;
    for def in defs {
        Lowerer::lower_function(&mut cx, &root, def)?;
    }
    let module = cx.into_module();
    debug!(
        module = module_name,
        functions = module.functions.len(),
        ?abi,
        "lowered program"
    );
    Ok(module)
}
