//! `(sys_write fd &buf len)`.
//!
//! Spills the buffer value to a stack slot, traps into the kernel with the
//! host's syscall convention, then maps the result: `0` when the kernel
//! reports all `len` bytes written, otherwise the raw return value.

use lisp_ir::{Arity, Call, ExprKind};

use super::{LowerScope, Lowerer};
use crate::errors::{type_mismatch, wrong_arity, CodegenError};
use crate::ir::{IcmpPred, Instr, Operand, Sym};

impl Lowerer<'_> {
    pub(super) fn lower_sys_write(
        &mut self,
        call: &Call,
        target: Sym,
        scope: &mut LowerScope<'_>,
    ) -> Result<(), CodegenError> {
        let [fd_expr, buf_expr, len_expr] = call.args.as_slice() else {
            return Err(wrong_arity(
                &call.operand,
                Arity::Exactly(3),
                call.args.len(),
                call.span,
            ));
        };
        let ExprKind::Ref(buf_inner) = &buf_expr.kind else {
            return Err(type_mismatch("a reference", buf_expr.describe(), buf_expr.span));
        };

        let fd = self.builder.fresh_sym();
        let buf = self.builder.fresh_sym();
        let len = self.builder.fresh_sym();
        self.lower_expr(fd_expr, fd, scope)?;
        self.lower_ref(buf_inner, buf, scope)?;
        self.lower_expr(len_expr, len, scope)?;

        let addr = self.builder.fresh_sym();
        self.builder.emit(Instr::PtrToInt {
            dst: addr,
            ptr: buf,
        });

        let abi = self.cx.abi();
        let status = self.builder.fresh_sym();
        self.builder.emit(Instr::InlineAsm {
            dst: status,
            asm: abi.asm(),
            constraints: abi.constraints(),
            args: vec![
                Operand::Const(abi.write_number()),
                Operand::Sym(fd),
                Operand::Sym(addr),
                Operand::Sym(len),
            ],
        });

        let complete = self.builder.fresh_sym();
        self.builder.emit(Instr::Icmp {
            dst: complete,
            pred: IcmpPred::Eq,
            lhs: Operand::Sym(status),
            rhs: Operand::Sym(len),
        });

        let n = self.builder.fresh_label_index();
        let ok_bb = self.builder.new_block(format!("sys.ok.{n}"));
        let fail_bb = self.builder.new_block(format!("sys.fail.{n}"));
        let end_bb = self.builder.new_block(format!("sys.end.{n}"));
        self.builder.terminate_cond_br(complete, ok_bb, fail_bb);

        self.builder.position_at(ok_bb);
        self.builder.terminate_br(end_bb);
        self.builder.position_at(fail_bb);
        self.builder.terminate_br(end_bb);

        self.builder.position_at(end_bb);
        self.builder.emit(Instr::Phi {
            dst: target,
            incoming: vec![
                (Operand::Const(0), ok_bb),
                (Operand::Sym(status), fail_bb),
            ],
        });
        Ok(())
    }
}
