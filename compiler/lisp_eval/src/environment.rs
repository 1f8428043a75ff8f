//! Runtime bindings.
//!
//! The interpreter reuses the generic [`Scope`] chain from `lisp_ir`; this
//! module only fixes what a name can be bound to.

use lisp_ir::{FunctionDef, Scope};

/// A value bound to a name.
///
/// Functions are bound by reference into the AST, so a scope never outlives
/// the program it was built from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Binding<'ast> {
    Int(i64),
    Function(&'ast FunctionDef),
}

impl Binding<'_> {
    /// Human-readable kind for type mismatch messages.
    pub fn describe(&self) -> &'static str {
        match self {
            Binding::Int(_) => "an integer",
            Binding::Function(_) => "a function",
        }
    }
}

/// A scope of runtime bindings.
pub type Environment<'p, 'ast> = Scope<'p, Binding<'ast>>;
