#![allow(clippy::unwrap_used, clippy::expect_used)]

use lisp_ir::{ArithOp, Arity, Span};
use lisp_parse::parse;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use crate::{eval_program, Binding, EvalError, Interpreter};

fn run(src: &str) -> Result<i64, EvalError> {
    let program = parse(src).unwrap();
    eval_program(&program)
}

fn ok(src: &str) -> i64 {
    run(src).unwrap()
}

const FIB: &str = "
(def fib (n)
  (if (< n 2)
    n
    (+ (fib (- n 1)) (fib (- n 2)))))
";

#[test]
fn variadic_addition() {
    assert_eq!(ok("(+ 1 2 3 4)"), 10);
}

#[test]
fn subtraction_folds_left() {
    assert_eq!(ok("(- 10 1 2)"), 7);
    assert_eq!(ok("(/ 100 5 2)"), 10);
    assert_eq!(ok("(% 17 10 4)"), 3);
}

#[test]
fn single_argument_is_identity() {
    assert_eq!(ok("(- 5)"), 5);
}

#[test]
fn user_function_call() {
    assert_eq!(
        ok("(def plus_two (a) (+ a 2)) (def main () (plus_two 3))"),
        5
    );
}

#[test]
fn fibonacci() {
    assert_eq!(ok(&format!("{FIB} (def main () (fib 8))")), 21);
}

#[test]
fn conditional_without_else_is_zero() {
    assert_eq!(ok("(if (< 3 2) 1 0)"), 0);
    assert_eq!(ok("(if (< 3 2) 1)"), 0);
    assert_eq!(ok("(if (> 3 2) 1)"), 1);
}

#[test]
fn only_selected_branch_runs() {
    assert_eq!(ok("(if (= 1 1) 7 (/ 1 0))"), 7);
    assert_eq!(ok("(if (= 1 2) (/ 1 0) 8)"), 8);
}

#[test]
fn comparison_in_value_position() {
    assert_eq!(ok("(< 1 2)"), 1);
    assert_eq!(ok("(+ (= 3 3) (> 1 2))"), 1);
}

#[test]
fn body_returns_last_value() {
    assert_eq!(ok("(def f (x) 1 2 (* x 10)) (def main () (f 4))"), 40);
}

#[test]
fn non_main_definitions_yield_zero() {
    assert_eq!(ok("(def f () 9)"), 0);
    assert_eq!(ok(""), 0);
}

#[test]
fn last_top_level_form_wins() {
    assert_eq!(ok("(+ 1 1) (* 3 3)"), 9);
}

#[test]
fn parameter_shadows_function_name() {
    let src = "(def a () 1) (def f (a) (+ a 1)) (def main () (f 41))";
    assert_eq!(ok(src), 42);
}

#[test]
fn calls_are_dynamically_scoped() {
    // `g` sees `x` from its caller's frame.
    let src = "(def g () x) (def f (x) (g)) (def main () (f 5))";
    assert_eq!(ok(src), 5);
}

#[test]
fn nested_definition_is_local_to_frame() {
    let src = "(def outer (n) (def inner (m) (* m 2)) (inner n)) (def main () (outer 21))";
    assert_eq!(ok(src), 42);
    let leaked = "(def outer () (def inner () 1) 0) (def main () (outer) (inner))";
    assert!(matches!(run(leaked), Err(EvalError::UnboundName { .. })));
}

#[test]
fn deep_recursion() {
    let src = "(def down (n) (if (= n 0) 0 (+ 1 (down (- n 1))))) (def main () (down 5000))";
    assert_eq!(ok(src), 5000);
}

#[test]
fn globals_hold_definitions() {
    let program = parse("(def f (a b) a) (+ 1 2)").unwrap();
    let mut interp = Interpreter::new();
    assert_eq!(interp.eval_program(&program).unwrap(), 3);
    assert!(matches!(
        interp.globals().lookup("f"),
        Some(Binding::Function(def)) if def.arity() == 2
    ));
}

// Errors

#[test]
fn unbound_identifier() {
    assert_eq!(
        run("(+ 1 y)"),
        Err(EvalError::UnboundName {
            name: "y".into(),
            span: Span::new(5, 6)
        })
    );
}

#[test]
fn undefined_function() {
    assert!(matches!(
        run("(nope 1)"),
        Err(EvalError::UnboundName { name, .. }) if name == "nope"
    ));
}

#[test]
fn calling_an_integer() {
    let err = run("(def f (g) (g 1)) (def main () (f 2))").unwrap_err();
    assert_eq!(
        err,
        EvalError::TypeMismatch {
            expected: "a function",
            found: "an integer",
            span: Span::new(11, 16)
        }
    );
}

#[test]
fn function_as_value() {
    let err = run("(def f () 1) (+ f 1)").unwrap_err();
    assert!(matches!(
        err,
        EvalError::TypeMismatch {
            expected: "an integer",
            found: "a function",
            ..
        }
    ));
}

#[test]
fn arity_mismatch() {
    let err = run("(def f (a) a) (def main () (f 1 2))").unwrap_err();
    assert_eq!(
        err,
        EvalError::Arity {
            operand: "f".into(),
            expected: Arity::Exactly(1),
            found: 2,
            span: Span::new(27, 34)
        }
    );
    assert!(matches!(run("(+)"), Err(EvalError::Arity { found: 0, .. })));
    assert!(matches!(run("(< 1)"), Err(EvalError::Arity { found: 1, .. })));
    assert!(matches!(
        run("(if (= 1 2 3) 1)"),
        Err(EvalError::Arity { found: 3, .. })
    ));
}

#[test]
fn condition_must_compare() {
    let err = run("(if (+ 1 2) 1 0)").unwrap_err();
    assert!(matches!(
        err,
        EvalError::TypeMismatch {
            expected: "a comparison",
            ..
        }
    ));
}

#[test]
fn division_by_zero() {
    assert_eq!(
        run("(/ 10 2 0)"),
        Err(EvalError::DivisionByZero {
            span: Span::new(8, 9)
        })
    );
    assert!(matches!(run("(% 1 0)"), Err(EvalError::DivisionByZero { .. })));
}

#[test]
fn division_by_zero_points_at_first_zero_divisor() {
    assert_eq!(
        run("(/ 8 2 0 0)"),
        Err(EvalError::DivisionByZero {
            span: Span::new(7, 8)
        })
    );
}

#[test]
fn compiler_only_forms() {
    assert!(matches!(
        run("(sys_write 1 &65 1)"),
        Err(EvalError::Unsupported { .. })
    ));
    assert!(matches!(run("&1"), Err(EvalError::Unsupported { .. })));
}

#[test]
fn errors_convert_to_diagnostics() {
    let err = run("(+ 1 y)").unwrap_err();
    let diag = err.to_diagnostic();
    assert_eq!(diag.code.as_str(), "E2001");
    assert_eq!(diag.message, "unbound name `y`");
    assert_eq!(diag.primary_span(), Some(err.span()));
}

fn arith_op() -> impl Strategy<Value = ArithOp> {
    prop_oneof![
        Just(ArithOp::Add),
        Just(ArithOp::Sub),
        Just(ArithOp::Mul),
        Just(ArithOp::Div),
        Just(ArithOp::Rem),
    ]
}

/// Straight left fold with checked division, written out longhand.
fn reference_fold(op: ArithOp, values: &[i64]) -> Option<i64> {
    let mut acc = values[0];
    for &rhs in &values[1..] {
        acc = match op {
            ArithOp::Add => acc.wrapping_add(rhs),
            ArithOp::Sub => acc.wrapping_sub(rhs),
            ArithOp::Mul => acc.wrapping_mul(rhs),
            ArithOp::Div => acc.checked_div(rhs)?,
            ArithOp::Rem => acc.checked_rem(rhs)?,
        };
    }
    Some(acc)
}

proptest! {
    #[test]
    fn arithmetic_matches_reference_fold(
        op in arith_op(),
        values in prop::collection::vec(0i64..=i64::MAX, 1..8),
    ) {
        let args: Vec<String> = values.iter().map(ToString::to_string).collect();
        let src = format!("({} {})", op.symbol(), args.join(" "));
        match reference_fold(op, &values) {
            Some(expected) => prop_assert_eq!(run(&src), Ok(expected)),
            None => {
                let is_div_by_zero = matches!(run(&src), Err(EvalError::DivisionByZero { .. }));
                prop_assert!(is_div_by_zero);
            }
        }
    }
}
