//! Stack growth for the recursive passes.
//!
//! Parsing, interpretation and SSA lowering all recurse once per nesting
//! level of the source. Programs like a hand-written `(+ 1 (+ 1 (+ 1 ...)))`
//! chain or a deeply recursive user function would otherwise overflow the
//! native stack long before they run out of memory.
//!
//! - **Native targets**: `stacker` grows the stack on demand.
//! - **WASM targets**: passthrough.
//!
//! Wrap the body of each recursive entry point:
//!
//! ```text
//! fn eval(&self, expr: &Expr) -> Result<i64, EvalError> {
//!     ensure_sufficient_stack(|| self.eval_inner(expr))
//! }
//! ```

/// Remaining stack below which a new segment is allocated (100KB).
const RED_ZONE: usize = 100 * 1024;

/// Size of each new stack segment (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, growing the stack first if less than the red zone remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM version: calls `f` directly.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
