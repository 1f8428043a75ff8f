//! `lispc compile <file>`: lower to LLVM IR and build a native executable.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::{read_file, report_problem};
use crate::{compile_source, Toolchain};

/// What `compile` produces.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum EmitType {
    /// Native executable via `llc` and `cc`.
    #[default]
    Executable,
    /// LLVM IR text only.
    LlvmIr,
}

impl EmitType {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "exe" | "executable" => Some(EmitType::Executable),
            "llvm-ir" => Some(EmitType::LlvmIr),
            _ => None,
        }
    }
}

/// Options for `compile`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompileOptions {
    pub emit: EmitType,
    /// `-o <path>`. Without it IR goes to stdout and executables next to
    /// the source.
    pub output: Option<PathBuf>,
}

/// Parse the options following the input path.
pub fn parse_compile_options(args: &[String]) -> Result<CompileOptions, String> {
    let mut options = CompileOptions::default();
    let mut args = args.iter();
    while let Some(arg) = args.next() {
        if arg == "-o" {
            let Some(path) = args.next() else {
                return Err("'-o' needs a path".to_string());
            };
            options.output = Some(PathBuf::from(path));
        } else if let Some(emit) = arg.strip_prefix("--emit=") {
            options.emit = EmitType::parse(emit)
                .ok_or_else(|| format!("unknown emit type '{emit}' (expected llvm-ir or exe)"))?;
        } else {
            return Err(format!("unexpected argument '{arg}'"));
        }
    }
    Ok(options)
}

/// Executable path for `input`: the input with its extension removed, or
/// `<input>.out` when it has none.
pub fn default_output(input: &Path) -> PathBuf {
    if input.extension().is_some() {
        input.with_extension("")
    } else {
        let mut name = input.as_os_str().to_owned();
        name.push(".out");
        PathBuf::from(name)
    }
}

fn module_name(input: &Path) -> String {
    input
        .file_stem()
        .map_or_else(|| "main".to_string(), |stem| stem.to_string_lossy().into_owned())
}

pub fn compile_file(path: &str, options: &CompileOptions) {
    let source = read_file(path);
    let input = Path::new(path);

    let module = match compile_source(&source, &module_name(input)) {
        Ok(module) => module,
        Err(problem) => {
            report_problem(path, &source, &problem);
            std::process::exit(1);
        }
    };
    let ir = module.to_string();

    match (options.emit, &options.output) {
        (EmitType::LlvmIr, None) => print!("{ir}"),
        (EmitType::LlvmIr, Some(output)) => {
            if let Err(e) = std::fs::write(output, &ir) {
                eprintln!("error: cannot write '{}': {e}", output.display());
                std::process::exit(1);
            }
        }
        (EmitType::Executable, output) => {
            let output = output.clone().unwrap_or_else(|| default_output(input));
            let toolchain = Toolchain::from_env();
            debug!(?toolchain, output = %output.display(), "building executable");
            if let Err(e) = toolchain.build(&ir, &output) {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use super::{default_output, module_name, parse_compile_options, CompileOptions, EmitType};

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn options_default_to_executable() {
        assert_eq!(parse_compile_options(&[]), Ok(CompileOptions::default()));
    }

    #[test]
    fn parses_emit_and_output() {
        let options = parse_compile_options(&args(&["--emit=llvm-ir", "-o", "out.ll"]));
        assert_eq!(
            options,
            Ok(CompileOptions {
                emit: EmitType::LlvmIr,
                output: Some(PathBuf::from("out.ll")),
            })
        );
    }

    #[test]
    fn rejects_bad_options() {
        assert!(parse_compile_options(&args(&["-o"])).is_err());
        assert!(parse_compile_options(&args(&["--emit=obj"])).is_err());
        assert!(parse_compile_options(&args(&["--fast"])).is_err());
    }

    #[test]
    fn output_and_module_names() {
        assert_eq!(default_output(Path::new("dir/prog.lisp")), Path::new("dir/prog"));
        assert_eq!(default_output(Path::new("prog")), Path::new("prog.out"));
        assert_eq!(module_name(Path::new("dir/prog.lisp")), "prog");
    }
}
