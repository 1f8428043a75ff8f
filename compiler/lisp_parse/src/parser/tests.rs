#![allow(clippy::unwrap_used, clippy::expect_used)]

use lisp_diagnostic::ErrorCode;
use lisp_ir::{Expr, ExprKind, Span};
use pretty_assertions::assert_eq;

use crate::{parse, ParseError, ParseErrorKind, Parser};

fn parse_one(src: &str) -> Expr {
    let mut program = parse(src).unwrap();
    assert_eq!(program.len(), 1, "expected a single form in {src:?}");
    program.remove(0)
}

fn parse_err(src: &str) -> ParseError {
    parse(src).unwrap_err()
}

/// Compact rendering of the tree, ignoring spans.
fn sexp(expr: &Expr) -> String {
    fn list(items: &[Expr]) -> String {
        items.iter().map(sexp).collect::<Vec<_>>().join(" ")
    }
    match &expr.kind {
        ExprKind::Int(v) => v.to_string(),
        ExprKind::Ident(name) => name.clone(),
        ExprKind::Ref(inner) => format!("&{}", sexp(inner)),
        ExprKind::Call(call) if call.args.is_empty() => format!("({})", call.operand),
        ExprKind::Call(call) => format!("({} {})", call.operand, list(&call.args)),
        ExprKind::Def(def) => format!(
            "(def {} ({}) {})",
            def.name,
            def.params.join(" "),
            list(&def.body)
        ),
        ExprKind::If(cond) => {
            let test = format!("({} {})", cond.cond.operand, list(&cond.cond.args));
            match &cond.else_branch {
                Some(else_branch) => format!(
                    "(if {test} {} {})",
                    sexp(&cond.then_branch),
                    sexp(else_branch)
                ),
                None => format!("(if {test} {})", sexp(&cond.then_branch)),
            }
        }
    }
}

#[test]
fn integer_literal() {
    let expr = parse_one("42");
    assert_eq!(expr.kind, ExprKind::Int(42));
    assert_eq!(expr.span, Span::new(0, 2));
}

#[test]
fn variadic_call() {
    assert_eq!(sexp(&parse_one("(+ 1 2 3 4)")), "(+ 1 2 3 4)");
}

#[test]
fn nested_calls_and_whitespace() {
    let src = "(*\t(+ 1 2)\r\n   (- 10\n 3))";
    assert_eq!(sexp(&parse_one(src)), "(* (+ 1 2) (- 10 3))");
}

#[test]
fn call_span_covers_parens() {
    let expr = parse_one("  (fib 8)  ");
    assert_eq!(expr.span, Span::new(2, 9));
    let ExprKind::Call(call) = &expr.kind else {
        panic!("expected call, got {expr:?}");
    };
    assert_eq!(call.span, expr.span);
    assert_eq!(call.args[0].span, Span::new(7, 8));
}

#[test]
fn definition_with_params() {
    let expr = parse_one("(def plus_two (a) (+ a 2))");
    assert_eq!(sexp(&expr), "(def plus_two (a) (+ a 2))");
    let ExprKind::Def(def) = &expr.kind else {
        panic!("expected def");
    };
    assert_eq!(def.arity(), 1);
    assert!(!def.is_main());
}

#[test]
fn definition_name_may_touch_param_list() {
    assert_eq!(sexp(&parse_one("(def main() 1 2)")), "(def main () 1 2)");
}

#[test]
fn conditional_with_and_without_else() {
    assert_eq!(sexp(&parse_one("(if (< 3 2) 1 0)")), "(if (< 3 2) 1 0)");
    assert_eq!(sexp(&parse_one("(if (= n 0) 1)")), "(if (= n 0) 1)");
}

#[test]
fn reference_and_syscall() {
    assert_eq!(
        sexp(&parse_one("(sys_write 1 &65 1)")),
        "(sys_write 1 &65 1)"
    );
}

#[test]
fn identifiers_admit_operator_chars() {
    assert_eq!(sexp(&parse_one("(is_less< a-b)")), "(is_less< a-b)");
}

#[test]
fn operand_may_be_followed_by_open_paren() {
    assert_eq!(sexp(&parse_one("(+(+ 1 2) 3)")), "(+ (+ 1 2) 3)");
}

#[test]
fn empty_call() {
    assert_eq!(sexp(&parse_one("(main)")), "(main)");
}

#[test]
fn program_of_several_forms() {
    let program = parse("(def f (x) x)\n(def main () (f 3))\n").unwrap();
    assert_eq!(program.len(), 2);
}

#[test]
fn empty_program() {
    assert!(parse("").unwrap().is_empty());
    assert!(parse(" \n\t").unwrap().is_empty());
}

#[test]
fn parse_expr_stops_after_one_form() {
    let mut parser = Parser::new("(+ 1 2) (+ 3 4)");
    assert_eq!(sexp(&parser.parse_expr().unwrap()), "(+ 1 2)");
    assert_eq!(sexp(&parser.parse_expr().unwrap()), "(+ 3 4)");
    assert!(matches!(
        parser.parse_expr().unwrap_err().kind,
        ParseErrorKind::UnexpectedEof { .. }
    ));
}

#[test]
fn deep_nesting() {
    let depth = 2_000;
    let src = format!("{}1{}", "(+ 1 ".repeat(depth), ")".repeat(depth));
    let expr = parse_one(&src);
    assert!(matches!(expr.kind, ExprKind::Call(_)));
}

// Errors

#[test]
fn unclosed_form() {
    let err = parse_err("(+ 1 2");
    assert_eq!(
        err.kind,
        ParseErrorKind::UnexpectedEof { expected: "`)`" }
    );
    assert_eq!(err.span, Span::point(6));
    assert_eq!(err.code(), ErrorCode::E1002);
}

#[test]
fn stray_close_paren() {
    let err = parse_err("(+ 1 2))");
    assert_eq!(
        err.kind,
        ParseErrorKind::UnexpectedChar {
            found: ')',
            expected: "an expression"
        }
    );
    assert_eq!(err.span, Span::new(7, 8));
}

#[test]
fn atom_must_end_at_delimiter() {
    let err = parse_err("(+ 12ab 1)");
    assert!(matches!(
        err.kind,
        ParseErrorKind::UnexpectedChar { found: 'a', .. }
    ));
    let err = parse_err("(+ x(1))");
    assert!(matches!(
        err.kind,
        ParseErrorKind::UnexpectedChar { found: '(', .. }
    ));
}

#[test]
fn integer_overflow() {
    let err = parse_err("9223372036854775808");
    assert_eq!(
        err.kind,
        ParseErrorKind::IntegerOverflow {
            literal: "9223372036854775808".into()
        }
    );
    assert_eq!(err.code(), ErrorCode::E1003);
    assert_eq!(parse_one("9223372036854775807").kind, ExprKind::Int(i64::MAX));
}

#[test]
fn empty_body() {
    let err = parse_err("(def f (a))");
    assert_eq!(err.kind, ParseErrorKind::EmptyBody { name: "f".into() });
    assert_eq!(err.span, Span::new(0, 11));
    assert_eq!(err.code(), ErrorCode::E1004);
}

#[test]
fn condition_must_be_call() {
    let err = parse_err("(if 1 2 3)");
    assert_eq!(err.kind, ParseErrorKind::ConditionNotCall);
    assert_eq!(err.span, Span::new(4, 5));
    assert_eq!(err.code(), ErrorCode::E1005);
}

#[test]
fn if_takes_at_most_one_else() {
    let err = parse_err("(if (< 1 2) 1 2 3)");
    assert!(matches!(
        err.kind,
        ParseErrorKind::UnexpectedChar { found: '3', .. }
    ));
}

#[test]
fn def_name_must_be_identifier() {
    let err = parse_err("(def 1 () 2)");
    assert_eq!(
        err.kind,
        ParseErrorKind::ExpectedIdentifier {
            found: '1',
            expected: "a function name"
        }
    );
    assert_eq!(err.code(), ErrorCode::E1006);
}

#[test]
fn parameter_must_be_identifier() {
    let err = parse_err("(def f (a 2) a)");
    assert!(matches!(
        err.kind,
        ParseErrorKind::ExpectedIdentifier { found: '2', .. }
    ));
}

#[test]
fn uppercase_is_rejected() {
    let err = parse_err("(+ X 1)");
    assert!(matches!(
        err.kind,
        ParseErrorKind::UnexpectedChar { found: 'X', .. }
    ));
}

#[test]
fn operand_required() {
    assert!(matches!(
        parse_err("(1 2)").kind,
        ParseErrorKind::UnexpectedChar { found: '1', .. }
    ));
    assert!(matches!(
        parse_err("(").kind,
        ParseErrorKind::UnexpectedEof { .. }
    ));
}

#[test]
fn diagnostic_carries_code_and_span() {
    let err = parse_err("(def f ())");
    let diag = err.to_diagnostic();
    assert_eq!(diag.code, ErrorCode::E1004);
    assert_eq!(diag.primary_span(), Some(err.span));
    assert_eq!(diag.message, "function `f` has an empty body");
    assert_eq!(diag.notes.len(), 1);
}
