//! Integer operator semantics.
//!
//! All arithmetic wraps on overflow, matching the `add`/`sub`/`mul`/`sdiv`/
//! `srem` instructions the code generator emits. Division and remainder by
//! zero are reported instead of trapping.

use lisp_ir::{ArithOp, CompareOp};

/// Apply one step of an arithmetic fold. `None` on a zero divisor.
#[inline]
pub fn apply_arith(op: ArithOp, lhs: i64, rhs: i64) -> Option<i64> {
    match op {
        ArithOp::Add => Some(lhs.wrapping_add(rhs)),
        ArithOp::Sub => Some(lhs.wrapping_sub(rhs)),
        ArithOp::Mul => Some(lhs.wrapping_mul(rhs)),
        ArithOp::Div => (rhs != 0).then(|| lhs.wrapping_div(rhs)),
        ArithOp::Rem => (rhs != 0).then(|| lhs.wrapping_rem(rhs)),
    }
}

/// Left fold of `rest` onto `first`. On a zero divisor, the error is its
/// index in `rest`.
pub fn fold_arith(op: ArithOp, first: i64, rest: &[i64]) -> Result<i64, usize> {
    rest.iter().enumerate().try_fold(first, |acc, (at, &rhs)| {
        apply_arith(op, acc, rhs).ok_or(at)
    })
}

/// Signed comparison.
#[inline]
pub fn compare(op: CompareOp, lhs: i64, rhs: i64) -> bool {
    match op {
        CompareOp::Lt => lhs < rhs,
        CompareOp::Gt => lhs > rhs,
        CompareOp::Eq => lhs == rhs,
    }
}
