//! AST → SSA lowering.
//!
//! Every lowering writes its result into a `target` symbol chosen by the
//! caller: `lower_expr(expr, target, scope)` emits instructions whose last
//! definition is `target`.
//!
//! - [`Lowerer`] walks one function body and drives the builder.
//! - `arith.rs`: variadic arithmetic as a balanced operator tree.
//! - `calls.rs`: comparisons and user calls.
//! - `control_flow.rs`: conditionals and phi construction.
//! - `sys_write.rs`: the raw `write` system call.

mod arith;
mod calls;
mod control_flow;
mod sys_write;

use lisp_ir::{Builtin, Call, Expr, ExprKind, FunctionDef, Scope};
use lisp_stack::ensure_sufficient_stack;
use tracing::instrument;

use crate::builder::FunctionBuilder;
use crate::context::CodegenCx;
use crate::errors::{type_mismatch, unbound_name, CodegenError};
use crate::ir::{BinOp, Instr, Operand, Sym};

/// What a name refers to while lowering.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Storage {
    /// A stack slot holding an `i64`.
    Slot(Sym),
    /// A module-level function.
    Function,
}

/// Scope of storage bindings.
pub type LowerScope<'p> = Scope<'p, Storage>;

/// Lowers one function body.
pub(crate) struct Lowerer<'a> {
    cx: &'a mut CodegenCx,
    /// Function names visible to this body: the top level, plus the
    /// function's own name when it is a nested definition.
    root: &'a LowerScope<'a>,
    builder: FunctionBuilder,
}

impl<'a> Lowerer<'a> {
    /// Lower `def` into a new module function.
    ///
    /// Parameters are spilled to stack slots `%sym1..%symN` in order; the
    /// return value is `%sym{N+1}`.
    #[instrument(skip_all, fields(function = %def.name), level = "debug")]
    pub(crate) fn lower_function(
        cx: &'a mut CodegenCx,
        root: &'a LowerScope<'a>,
        def: &FunctionDef,
    ) -> Result<(), CodegenError> {
        let mut lowerer = Lowerer {
            cx,
            root,
            builder: FunctionBuilder::new(def.name.as_str(), def.params.clone()),
        };
        let mut scope = LowerScope::with_parent(root);

        for param in &def.params {
            let slot = lowerer.builder.fresh_sym();
            lowerer.builder.emit(Instr::Alloca { dst: slot });
            lowerer.builder.emit(Instr::Store {
                value: Operand::Arg(param.clone()),
                ptr: slot,
            });
            scope.define(param.as_str(), Storage::Slot(slot));
        }

        let ret = lowerer.builder.fresh_sym();
        let Some((last, init)) = def.body.split_last() else {
            return Err(CodegenError::Internal {
                message: format!("function `{}` has an empty body", def.name),
            });
        };
        for expr in init {
            let sym = lowerer.builder.fresh_sym();
            lowerer.lower_expr(expr, sym, &mut scope)?;
        }
        lowerer.lower_expr(last, ret, &mut scope)?;
        lowerer.builder.terminate_ret(ret);

        let function = lowerer.builder.finish()?;
        lowerer.cx.push_function(function);
        Ok(())
    }

    /// Lower `expr` so that `target` holds its value.
    pub(crate) fn lower_expr(
        &mut self,
        expr: &Expr,
        target: Sym,
        scope: &mut LowerScope<'_>,
    ) -> Result<(), CodegenError> {
        ensure_sufficient_stack(|| self.lower_expr_inner(expr, target, scope))
    }

    fn lower_expr_inner(
        &mut self,
        expr: &Expr,
        target: Sym,
        scope: &mut LowerScope<'_>,
    ) -> Result<(), CodegenError> {
        match &expr.kind {
            ExprKind::Int(value) => {
                self.emit_const(target, *value);
                Ok(())
            }
            ExprKind::Ident(name) => match scope.lookup(name) {
                Some(Storage::Slot(slot)) => {
                    let ptr = *slot;
                    self.builder.emit(Instr::Load { dst: target, ptr });
                    Ok(())
                }
                Some(Storage::Function) => Err(type_mismatch("an integer", "a function", expr.span)),
                None => Err(unbound_name(name, expr.span)),
            },
            ExprKind::Call(call) => self.lower_call(call, target, scope),
            ExprKind::Def(def) => self.lower_nested_def(def, target, scope),
            ExprKind::If(cond) => self.lower_if(cond, target, scope),
            ExprKind::Ref(_) => Err(type_mismatch("an integer", "a reference", expr.span)),
        }
    }

    fn lower_call(
        &mut self,
        call: &Call,
        target: Sym,
        scope: &mut LowerScope<'_>,
    ) -> Result<(), CodegenError> {
        match Builtin::from_operand(&call.operand) {
            Some(Builtin::Arith(op)) => self.lower_arith(op, call, target, scope),
            Some(Builtin::Compare(op)) => {
                let flag = self.builder.fresh_sym();
                self.lower_compare(op, call, flag, scope)?;
                self.builder.emit(Instr::Zext {
                    dst: target,
                    src: flag,
                });
                Ok(())
            }
            Some(Builtin::SysWrite) => self.lower_sys_write(call, target, scope),
            None => self.lower_user_call(call, target, scope),
        }
    }

    /// A definition inside a body becomes its own module function. Its name
    /// is bound only in the enclosing body from here on and inside itself;
    /// its body otherwise resolves against `root`. At its site it evaluates
    /// to `0`.
    fn lower_nested_def(
        &mut self,
        def: &FunctionDef,
        target: Sym,
        scope: &mut LowerScope<'_>,
    ) -> Result<(), CodegenError> {
        self.cx.declare_function(def)?;
        scope.define(def.name.as_str(), Storage::Function);

        let mut own = LowerScope::with_parent(self.root);
        own.define(def.name.as_str(), Storage::Function);
        Lowerer::lower_function(&mut *self.cx, &own, def)?;

        self.emit_const(target, 0);
        Ok(())
    }

    /// `&expr`: spill the value to a fresh stack slot; `target` is the slot.
    fn lower_ref(
        &mut self,
        inner: &Expr,
        target: Sym,
        scope: &mut LowerScope<'_>,
    ) -> Result<(), CodegenError> {
        let value = self.builder.fresh_sym();
        self.lower_expr(inner, value, scope)?;
        self.builder.emit(Instr::Alloca { dst: target });
        self.builder.emit(Instr::Store {
            value: Operand::Sym(value),
            ptr: target,
        });
        Ok(())
    }

    /// `target = add i64 value, 0`
    fn emit_const(&mut self, target: Sym, value: i64) {
        self.builder.emit(Instr::Binary {
            dst: target,
            op: BinOp::Add,
            lhs: Operand::Const(value),
            rhs: Operand::Const(0),
        });
    }
}
