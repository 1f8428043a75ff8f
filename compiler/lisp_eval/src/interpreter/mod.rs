//! Tree-walking interpreter.
//!
//! Values are `i64`. Comparisons produce booleans that conditionals consume
//! directly; in value position they become `1` or `0`.
//!
//! Calls are dynamically scoped: a call frame's parent is the caller's
//! scope, not the scope the function was defined in.

use lisp_ir::{ArithOp, Arity, Builtin, Call, CompareOp, Conditional, Expr, ExprKind, FunctionDef};
use lisp_stack::ensure_sufficient_stack;
use tracing::{debug, trace};

use crate::environment::{Binding, Environment};
use crate::errors::{type_mismatch, unbound_name, wrong_arity, EvalError, EvalResult};
use crate::operators::{compare, fold_arith};

/// Interpreter state: the global scope, which doubles as the function
/// registry.
pub struct Interpreter<'ast> {
    globals: Environment<'ast, 'ast>,
}

impl<'ast> Interpreter<'ast> {
    pub fn new() -> Self {
        Interpreter {
            globals: Environment::new(),
        }
    }

    /// Evaluate every top-level form in order and return the value of the
    /// last one, or `0` for an empty program.
    pub fn eval_program(&mut self, program: &'ast [Expr]) -> EvalResult {
        let mut value = 0;
        for expr in program {
            value = Self::eval(expr, &mut self.globals)?;
        }
        debug!(forms = program.len(), value, "evaluated program");
        Ok(value)
    }

    /// The global scope after the forms evaluated so far.
    pub fn globals(&self) -> &Environment<'ast, 'ast> {
        &self.globals
    }

    /// Evaluate one expression in `scope`.
    pub fn eval(expr: &'ast Expr, scope: &mut Environment<'_, 'ast>) -> EvalResult {
        ensure_sufficient_stack(|| Self::eval_inner(expr, scope))
    }

    fn eval_inner(expr: &'ast Expr, scope: &mut Environment<'_, 'ast>) -> EvalResult {
        match &expr.kind {
            ExprKind::Int(value) => Ok(*value),
            ExprKind::Ident(name) => match scope.lookup(name) {
                Some(Binding::Int(value)) => Ok(*value),
                Some(binding) => Err(type_mismatch(
                    "an integer",
                    binding.describe(),
                    expr.span,
                )),
                None => Err(unbound_name(name, expr.span)),
            },
            ExprKind::Call(call) => Self::eval_call(call, scope),
            ExprKind::Def(def) => Self::eval_def(def, scope),
            ExprKind::If(cond) => Self::eval_if(cond, scope),
            ExprKind::Ref(_) => Err(EvalError::Unsupported {
                what: "references",
                span: expr.span,
            }),
        }
    }

    fn eval_call(call: &'ast Call, scope: &mut Environment<'_, 'ast>) -> EvalResult {
        match Builtin::from_operand(&call.operand) {
            Some(Builtin::Arith(op)) => Self::eval_arith(op, call, scope),
            Some(Builtin::Compare(op)) => Ok(i64::from(Self::eval_compare(op, call, scope)?)),
            Some(Builtin::SysWrite) => Err(EvalError::Unsupported {
                what: "raw system calls",
                span: call.span,
            }),
            None => Self::call_function(call, scope),
        }
    }

    fn eval_arith(op: ArithOp, call: &'ast Call, scope: &mut Environment<'_, 'ast>) -> EvalResult {
        let arity = Builtin::Arith(op).arity();
        if !arity.accepts(call.args.len()) {
            return Err(wrong_arity(&call.operand, arity, call.args.len(), call.span));
        }
        let values = Self::eval_args(&call.args, scope)?;
        let Some((&first, rest)) = values.split_first() else {
            return Err(wrong_arity(&call.operand, arity, 0, call.span));
        };
        fold_arith(op, first, rest).map_err(|at| EvalError::DivisionByZero {
            span: call.args[at + 1].span,
        })
    }

    fn eval_compare(
        op: CompareOp,
        call: &'ast Call,
        scope: &mut Environment<'_, 'ast>,
    ) -> EvalResult<bool> {
        let [lhs, rhs] = call.args.as_slice() else {
            return Err(wrong_arity(
                &call.operand,
                Arity::Exactly(2),
                call.args.len(),
                call.span,
            ));
        };
        let lhs = Self::eval(lhs, scope)?;
        let rhs = Self::eval(rhs, scope)?;
        Ok(compare(op, lhs, rhs))
    }

    fn eval_args(args: &'ast [Expr], scope: &mut Environment<'_, 'ast>) -> EvalResult<Vec<i64>> {
        args.iter().map(|arg| Self::eval(arg, scope)).collect()
    }

    /// Call a user function: arguments are evaluated in the caller's scope
    /// and bound positionally in a child of it.
    fn call_function(call: &'ast Call, scope: &mut Environment<'_, 'ast>) -> EvalResult {
        let def = match scope.lookup(&call.operand) {
            Some(Binding::Function(def)) => *def,
            Some(binding) => {
                return Err(type_mismatch("a function", binding.describe(), call.span));
            }
            None => return Err(unbound_name(&call.operand, call.span)),
        };
        if def.arity() != call.args.len() {
            return Err(wrong_arity(
                &call.operand,
                Arity::Exactly(def.arity()),
                call.args.len(),
                call.span,
            ));
        }
        trace!(function = %def.name, args = call.args.len(), depth = scope.depth(), "call");

        let values = Self::eval_args(&call.args, scope)?;
        let mut frame = Environment::with_parent(scope);
        for (param, value) in def.params.iter().zip(values) {
            frame.define(param.as_str(), Binding::Int(value));
        }
        Self::eval_body(def, &mut frame)
    }

    fn eval_body(def: &'ast FunctionDef, scope: &mut Environment<'_, 'ast>) -> EvalResult {
        let mut value = 0;
        for expr in &def.body {
            value = Self::eval(expr, scope)?;
        }
        Ok(value)
    }

    /// Register a definition. `main` also runs immediately, in the scope it
    /// is defined in.
    fn eval_def(def: &'ast FunctionDef, scope: &mut Environment<'_, 'ast>) -> EvalResult {
        scope.define(def.name.as_str(), Binding::Function(def));
        if def.is_main() {
            Self::eval_body(def, scope)
        } else {
            Ok(0)
        }
    }

    fn eval_if(cond: &'ast Conditional, scope: &mut Environment<'_, 'ast>) -> EvalResult {
        let Some(Builtin::Compare(op)) = Builtin::from_operand(&cond.cond.operand) else {
            return Err(type_mismatch(
                "a comparison",
                "a call that is not a comparison",
                cond.cond.span,
            ));
        };
        if Self::eval_compare(op, &cond.cond, scope)? {
            Self::eval(&cond.then_branch, scope)
        } else {
            match &cond.else_branch {
                Some(else_branch) => Self::eval(else_branch, scope),
                None => Ok(0),
            }
        }
    }
}

impl Default for Interpreter<'_> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
