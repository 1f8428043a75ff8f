//! Compilation context.
//!
//! Owns everything that outlives a single function: the function table,
//! the target's syscall ABI and the module being built. One context per
//! compilation, so independent compilations never share state.

use lisp_ir::Span;
use rustc_hash::FxHashMap;

use crate::ir::{Function, Module};
use crate::syscall::SyscallAbi;

/// What call sites need to know about a function.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionSig {
    pub name: String,
    pub arity: usize,
    /// Where the function is defined.
    pub span: Span,
}

/// Per-compilation state.
pub struct CodegenCx {
    functions: FxHashMap<String, FunctionSig>,
    abi: SyscallAbi,
    module: Module,
}

impl CodegenCx {
    pub fn new(module_name: impl Into<String>, abi: SyscallAbi) -> Self {
        CodegenCx {
            functions: FxHashMap::default(),
            abi,
            module: Module::new(module_name),
        }
    }

    /// Look up a function by name.
    pub fn function(&self, name: &str) -> Option<&FunctionSig> {
        self.functions.get(name)
    }

    /// Register a function. Returns the previous signature when the name
    /// was already taken.
    pub fn register_function(&mut self, sig: FunctionSig) -> Option<FunctionSig> {
        self.functions.insert(sig.name.clone(), sig)
    }

    pub fn abi(&self) -> SyscallAbi {
        self.abi
    }

    /// Append a finished function to the module.
    pub fn push_function(&mut self, function: Function) {
        self.module.functions.push(function);
    }

    pub fn into_module(self) -> Module {
        self.module
    }
}
