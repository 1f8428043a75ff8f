#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::path::Path;
use std::process::{Command, Output};

use pretty_assertions::assert_eq;

const FIB: &str = "
(def fib (n)
  (if (< n 2)
    n
    (+ (fib (- n 1)) (fib (- n 2)))))
(def main () (fib 8))
";

fn lispc(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_lispc"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to spawn lispc")
}

fn write_source(dir: &Path, name: &str, source: &str) -> String {
    let path = dir.join(name);
    std::fs::write(&path, source).unwrap();
    path.to_str().unwrap().to_string()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn no_arguments_prints_usage() {
    let output = lispc(&[]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Usage: lispc"));
}

#[test]
fn usage_names_llvm_requirement() {
    let text = stdout(&lispc(&["help"]));
    assert!(text.contains("LLVM 15"));
    assert!(text.contains("-opaque-pointers"));
}

#[test]
fn interpret_prints_result() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_source(dir.path(), "fib.lisp", FIB);
    let output = lispc(&["interpret", &path]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "21\n");
}

#[test]
fn interpret_reports_unbound_name() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_source(dir.path(), "bad.lisp", "(def main () (+ x 1))");
    let output = lispc(&["interpret", &path]);
    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("error[E2001]"), "{err}");
    assert!(err.contains("bad.lisp:1:17"), "{err}");
    assert!(stdout(&output).is_empty());
}

#[test]
fn syntax_error_exits_with_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_source(dir.path(), "broken.lisp", "(def main () (+ 1 2)");
    let output = lispc(&["interpret", &path]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("error[E1"));
}

#[test]
fn missing_file_is_readable_error() {
    let output = lispc(&["interpret", "/definitely/not/here.lisp"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("cannot find file '/definitely/not/here.lisp'"));
}

#[test]
fn emit_llvm_ir_to_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_source(dir.path(), "fib.lisp", FIB);
    let output = lispc(&["compile", &path, "--emit=llvm-ir"]);
    assert!(output.status.success(), "{}", stderr(&output));
    let ir = stdout(&output);
    assert!(ir.starts_with("; ModuleID = 'fib'\n"));
    assert!(ir.contains("define i64 @fib(i64 %arg.n) {"));
    assert!(ir.contains("define i64 @main() {"));
}

#[test]
fn emit_is_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_source(dir.path(), "fib.lisp", FIB);
    let first = lispc(&[&path, "--emit=llvm-ir"]);
    let second = lispc(&[&path, "--emit=llvm-ir"]);
    assert_eq!(stdout(&first), stdout(&second));
}

#[test]
fn emit_llvm_ir_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_source(dir.path(), "fib.lisp", FIB);
    let out = dir.path().join("fib.ll");
    let output = lispc(&["compile", &path, "--emit=llvm-ir", "-o", out.to_str().unwrap()]);
    assert!(output.status.success(), "{}", stderr(&output));
    let ir = std::fs::read_to_string(&out).unwrap();
    assert!(ir.contains("call i64 @fib("));
}

#[test]
fn codegen_error_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_source(dir.path(), "top.lisp", "(+ 1 2)");
    let output = lispc(&["compile", &path, "--emit=llvm-ir"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("error[E3001]"));
}

#[test]
fn redefinition_shows_first_definition() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_source(
        dir.path(),
        "dup.lisp",
        "(def f () 1)\n(def f () 2)\n(def main () (f))\n",
    );
    let output = lispc(&["compile", &path, "--emit=llvm-ir"]);
    assert_eq!(output.status.code(), Some(1));
    let text = stderr(&output);
    assert!(text.contains("error[E3001]: function `f` is defined more than once"));
    assert!(text.contains(&format!("--> {path}:2:1")));
    assert!(text.contains(&format!("::: {path}:1:1")));
    assert!(text.contains("first defined here"));
}

#[test]
fn nested_definition_is_local_when_compiled() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_source(
        dir.path(),
        "nested.lisp",
        "(def a () (def h () 1) 0)\n(def b () (h))\n(def main () (b))\n",
    );
    let compiled = lispc(&["compile", &path, "--emit=llvm-ir"]);
    assert_eq!(compiled.status.code(), Some(1));
    assert!(stderr(&compiled).contains("error[E2002]"));

    let interpreted = lispc(&["interpret", &path]);
    assert_eq!(interpreted.status.code(), Some(1));
    assert!(stderr(&interpreted).contains("error[E2001]"));
}

#[test]
fn missing_tool_names_override_variable() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_source(dir.path(), "fib.lisp", FIB);
    let exe = dir.path().join("fib");
    let output = Command::new(env!("CARGO_BIN_EXE_lispc"))
        .args(["compile", &path, "-o", exe.to_str().unwrap()])
        .env("LISPC_LLC", "lispc-test-no-such-llc")
        .env_remove("RUST_LOG")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("LISPC_LLC"));
    assert!(dir.path().join("fib.ll").exists());
}

#[test]
fn unknown_option_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_source(dir.path(), "fib.lisp", FIB);
    let output = lispc(&["compile", &path, "--emit=obj"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("unknown emit type 'obj'"));
}

#[test]
fn version_prints_package_version() {
    let output = lispc(&["version"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), format!("lispc {}\n", env!("CARGO_PKG_VERSION")));
}

#[test]
fn mode_without_path_prints_usage() {
    for mode in ["interpret", "compile"] {
        let output = lispc(&[mode]);
        assert!(output.status.success());
        assert!(stdout(&output).contains("Usage: lispc"));
    }
}
