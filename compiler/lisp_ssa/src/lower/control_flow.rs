//! Conditionals.
//!
//! ```text
//! entry:                         ; or whatever block the condition ends in
//!   %c = icmp ...
//!   br i1 %c, label %if.then.N, label %if.else.N
//! if.then.N:
//!   ...                          ; then value in %t
//!   br label %if.end.N
//! if.else.N:
//!   ...                          ; else value in %e
//!   br label %if.end.N
//! if.end.N:
//!   %target = phi i64 [ %t, %then_exit ], [ %e, %else_exit ]
//! ```
//!
//! Without an else branch the false edge goes straight to `if.end.N` and
//! contributes `0`. The phi names the blocks each branch *ends* in, which
//! differ from `if.then.N` when a branch contains control flow of its own.

use lisp_ir::{Builtin, Conditional};
use tracing::instrument;

use super::{LowerScope, Lowerer};
use crate::errors::{type_mismatch, CodegenError};
use crate::ir::{Instr, Operand, Sym};

impl Lowerer<'_> {
    #[instrument(skip(self, cond, scope), level = "debug")]
    pub(super) fn lower_if(
        &mut self,
        cond: &Conditional,
        target: Sym,
        scope: &mut LowerScope<'_>,
    ) -> Result<(), CodegenError> {
        let Some(Builtin::Compare(op)) = Builtin::from_operand(&cond.cond.operand) else {
            return Err(type_mismatch(
                "a comparison",
                "a call that is not a comparison",
                cond.cond.span,
            ));
        };
        let flag = self.builder.fresh_sym();
        self.lower_compare(op, &cond.cond, flag, scope)?;

        let n = self.builder.fresh_label_index();
        let then_bb = self.builder.new_block(format!("if.then.{n}"));
        let else_bb = cond
            .else_branch
            .as_ref()
            .map(|_| self.builder.new_block(format!("if.else.{n}")));
        let end_bb = self.builder.new_block(format!("if.end.{n}"));

        let cond_exit = self.builder.current_block();
        self.builder
            .terminate_cond_br(flag, then_bb, else_bb.unwrap_or(end_bb));

        self.builder.position_at(then_bb);
        let then_value = self.builder.fresh_sym();
        self.lower_expr(&cond.then_branch, then_value, scope)?;
        let then_exit = self.builder.current_block();
        self.builder.terminate_br(end_bb);

        let else_incoming = match (&cond.else_branch, else_bb) {
            (Some(else_branch), Some(else_bb)) => {
                self.builder.position_at(else_bb);
                let else_value = self.builder.fresh_sym();
                self.lower_expr(else_branch, else_value, scope)?;
                let else_exit = self.builder.current_block();
                self.builder.terminate_br(end_bb);
                (Operand::Sym(else_value), else_exit)
            }
            _ => (Operand::Const(0), cond_exit),
        };

        self.builder.position_at(end_bb);
        self.builder.emit(Instr::Phi {
            dst: target,
            incoming: vec![(Operand::Sym(then_value), then_exit), else_incoming],
        });
        Ok(())
    }
}
