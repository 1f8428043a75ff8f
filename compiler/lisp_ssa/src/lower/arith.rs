//! Variadic arithmetic.
//!
//! `(op a b c ...)` becomes a balanced tree of binary instructions instead
//! of a left fold, so a long argument list nests `log n` deep. The split
//! has to preserve the left-to-right meaning of each operator:
//!
//! | op      | split                  | right half lowered as |
//! |---------|------------------------|-----------------------|
//! | `+` `*` | `ceil(n/2)`            | same op               |
//! | `-`     | `ceil(n/2)`            | `+`                   |
//! | `/` `%` | `n - 1` (last operand) | itself                |
//!
//! `a - b - c - d == (a - b) - (c + d)`, whereas division and remainder
//! have no such identity, so they peel off only the final operand.

use lisp_ir::{ArithOp, Arity, Call, Expr};

use super::{LowerScope, Lowerer};
use crate::errors::{wrong_arity, CodegenError};
use crate::ir::{BinOp, Instr, Operand, Sym};

fn bin_op(op: ArithOp) -> BinOp {
    match op {
        ArithOp::Add => BinOp::Add,
        ArithOp::Sub => BinOp::Sub,
        ArithOp::Mul => BinOp::Mul,
        ArithOp::Div => BinOp::SDiv,
        ArithOp::Rem => BinOp::SRem,
    }
}

/// Index of the first argument of the right half, for `n >= 2` arguments.
fn split_point(op: ArithOp, n: usize) -> usize {
    match op {
        ArithOp::Add | ArithOp::Sub | ArithOp::Mul => n.div_ceil(2),
        ArithOp::Div | ArithOp::Rem => n - 1,
    }
}

impl Lowerer<'_> {
    pub(super) fn lower_arith(
        &mut self,
        op: ArithOp,
        call: &Call,
        target: Sym,
        scope: &mut LowerScope<'_>,
    ) -> Result<(), CodegenError> {
        if call.args.is_empty() {
            return Err(wrong_arity(&call.operand, Arity::AtLeast(1), 0, call.span));
        }
        self.lower_arith_tree(op, &call.args, target, scope)
    }

    /// Lower a non-empty argument slice.
    fn lower_arith_tree(
        &mut self,
        op: ArithOp,
        args: &[Expr],
        target: Sym,
        scope: &mut LowerScope<'_>,
    ) -> Result<(), CodegenError> {
        if let [only] = args {
            return self.lower_expr(only, target, scope);
        }

        let (left, right) = args.split_at(split_point(op, args.len()));
        let lhs = self.builder.fresh_sym();
        let rhs = self.builder.fresh_sym();

        self.lower_arith_tree(op, left, lhs, scope)?;
        let right_op = if op == ArithOp::Sub { ArithOp::Add } else { op };
        self.lower_arith_tree(right_op, right, rhs, scope)?;

        self.builder.emit(Instr::Binary {
            dst: target,
            op: bin_op(op),
            lhs: Operand::Sym(lhs),
            rhs: Operand::Sym(rhs),
        });
        Ok(())
    }
}
