//! Comparisons and user function calls.

use lisp_ir::{Arity, Call, CompareOp};
use tracing::trace;

use super::{LowerScope, Lowerer, Storage};
use crate::errors::{type_mismatch, wrong_arity, CodegenError};
use crate::ir::{IcmpPred, Instr, Operand, Sym};

fn icmp_pred(op: CompareOp) -> IcmpPred {
    match op {
        CompareOp::Lt => IcmpPred::Slt,
        CompareOp::Gt => IcmpPred::Sgt,
        CompareOp::Eq => IcmpPred::Eq,
    }
}

impl Lowerer<'_> {
    /// `(cmp a b)` into an `i1` target. Both operand symbols are allocated
    /// before either side is lowered.
    pub(super) fn lower_compare(
        &mut self,
        op: CompareOp,
        call: &Call,
        target: Sym,
        scope: &mut LowerScope<'_>,
    ) -> Result<(), CodegenError> {
        let [lhs_expr, rhs_expr] = call.args.as_slice() else {
            return Err(wrong_arity(
                &call.operand,
                Arity::Exactly(2),
                call.args.len(),
                call.span,
            ));
        };
        let lhs = self.builder.fresh_sym();
        let rhs = self.builder.fresh_sym();
        self.lower_expr(lhs_expr, lhs, scope)?;
        self.lower_expr(rhs_expr, rhs, scope)?;
        self.builder.emit(Instr::Icmp {
            dst: target,
            pred: icmp_pred(op),
            lhs: Operand::Sym(lhs),
            rhs: Operand::Sym(rhs),
        });
        Ok(())
    }

    /// `(f args...)`: arguments left to right into fresh symbols, then a
    /// direct call. The callee must be bound as a function in `scope`.
    pub(super) fn lower_user_call(
        &mut self,
        call: &Call,
        target: Sym,
        scope: &mut LowerScope<'_>,
    ) -> Result<(), CodegenError> {
        let sig = match scope.lookup(&call.operand) {
            Some(Storage::Function) => self.cx.function(&call.operand),
            Some(Storage::Slot(_)) => {
                return Err(type_mismatch("a function", "an integer", call.span));
            }
            None => None,
        };
        let Some(sig) = sig else {
            return Err(CodegenError::UndefinedFunction {
                name: call.operand.clone(),
                span: call.span,
            });
        };
        if sig.arity != call.args.len() {
            return Err(wrong_arity(
                &call.operand,
                Arity::Exactly(sig.arity),
                call.args.len(),
                call.span,
            ));
        }

        let mut args = Vec::with_capacity(call.args.len());
        for arg in &call.args {
            let sym = self.builder.fresh_sym();
            self.lower_expr(arg, sym, scope)?;
            args.push(Operand::Sym(sym));
        }
        trace!(callee = %call.operand, argc = args.len(), "lowered call");
        self.builder.emit(Instr::Call {
            dst: target,
            callee: call.operand.clone(),
            args,
        });
        Ok(())
    }
}
