//! Declaration pass.
//!
//! Two-phase codegen:
//! 1. **Declare**: register every top-level function's signature.
//! 2. **Define**: lower each body.
//!
//! Declaring first lets a function call another that is defined later in
//! the file, including mutual recursion.

use lisp_ir::{Expr, ExprKind, FunctionDef, Scope};
use tracing::debug;

use crate::context::{CodegenCx, FunctionSig};
use crate::errors::{unsupported, CodegenError};
use crate::lower::Storage;

impl CodegenCx {
    /// Register `def` in the function table. A second definition of the same
    /// name is rejected.
    pub fn declare_function(&mut self, def: &FunctionDef) -> Result<(), CodegenError> {
        let sig = FunctionSig {
            name: def.name.clone(),
            arity: def.arity(),
            span: def.span,
        };
        if let Some(previous) = self.register_function(sig) {
            return Err(CodegenError::Redefinition {
                name: def.name.clone(),
                span: def.span,
                previous: previous.span,
            });
        }
        debug!(function = %def.name, arity = def.arity(), "declared function");
        Ok(())
    }

    /// Declare every top-level definition and build the root scope that
    /// function bodies resolve names against.
    ///
    /// Top-level forms other than `def` have no function to live in and are
    /// rejected.
    pub fn declare_program<'p>(
        &mut self,
        program: &'p [Expr],
    ) -> Result<(Scope<'static, Storage>, Vec<&'p FunctionDef>), CodegenError> {
        let mut root = Scope::new();
        let mut defs = Vec::with_capacity(program.len());
        for expr in program {
            let ExprKind::Def(def) = &expr.kind else {
                return Err(unsupported(
                    "top-level expressions outside a function",
                    expr.span,
                ));
            };
            self.declare_function(def)?;
            root.define(def.name.as_str(), Storage::Function);
            defs.push(def);
        }
        Ok((root, defs))
    }
}
