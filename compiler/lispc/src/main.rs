//! `lispc` command-line interface.

use lispc::commands::{compile_file, interpret_file, parse_compile_options};

fn main() {
    lispc::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "interpret" => {
            let Some(path) = args.get(2) else {
                print_usage();
                return;
            };
            interpret_file(path);
        }
        "compile" => {
            let Some(path) = args.get(2) else {
                print_usage();
                return;
            };
            compile_with_options(path, &args[3..]);
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-V" => {
            println!("lispc {}", env!("CARGO_PKG_VERSION"));
        }
        path if !path.starts_with('-') => {
            compile_with_options(path, &args[2..]);
        }
        _ => {
            eprintln!("Unknown option: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn compile_with_options(path: &str, rest: &[String]) {
    match parse_compile_options(rest) {
        Ok(options) => compile_file(path, &options),
        Err(msg) => {
            eprintln!("error: {msg}");
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("lispc: interpreter and native compiler for a small Lisp");
    println!();
    println!("Usage: lispc [interpret|compile] <file> [options]");
    println!();
    println!("Commands:");
    println!("  interpret <file>    Evaluate the program and print the result");
    println!("  compile <file>      Compile to a native executable (default)");
    println!("  help                Show this help message");
    println!("  version             Show version information");
    println!();
    println!("Compile options:");
    println!("  --emit=llvm-ir      Print LLVM IR instead of building");
    println!("  -o <path>           Output file path");
    println!();
    println!("Environment:");
    println!("  LISPC_LLC           IR compiler to run (default: llc)");
    println!("                      Needs LLVM 15 or newer; for LLVM 14 use");
    println!("                      LISPC_LLC=\"llc -opaque-pointers\"");
    println!("  LISPC_CC            Assembler/linker driver (default: cc)");
    println!("  RUST_LOG            Enable tracing output, e.g. lisp_ssa=debug");
    println!();
    println!("Examples:");
    println!("  lispc interpret fib.lisp");
    println!("  lispc fib.lisp -o fib");
    println!("  lispc compile fib.lisp --emit=llvm-ir");
}
