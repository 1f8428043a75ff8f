//! External toolchain: `llc` turns the IR into assembly, the C compiler
//! driver assembles and links it.
//!
//! Tool names come from `LISPC_LLC` and `LISPC_CC` when set. A value may
//! carry leading arguments, e.g. `LISPC_LLC="llc -opaque-pointers"` for an
//! LLVM 14 `llc`; the emitted IR uses opaque `ptr`, which is the default
//! from LLVM 15 on.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;
use tracing::debug;

/// Errors from writing intermediate files or running the tools.
#[derive(Debug, Error)]
pub enum ToolchainError {
    #[error("cannot write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("'{tool}' not found (set {env_var} to override): {source}")]
    ToolNotFound {
        tool: String,
        env_var: &'static str,
        #[source]
        source: io::Error,
    },
    #[error("cannot run '{tool}': {source}")]
    Spawn {
        tool: String,
        #[source]
        source: io::Error,
    },
    #[error("'{tool}' failed ({status})\n\ncommand: {command}\n{stderr}")]
    ToolFailed {
        tool: String,
        status: String,
        command: String,
        stderr: String,
    },
}

/// The pair of tools a native build needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toolchain {
    pub llc: String,
    pub cc: String,
}

impl Default for Toolchain {
    fn default() -> Self {
        Toolchain {
            llc: "llc".to_string(),
            cc: "cc".to_string(),
        }
    }
}

const LLC_ENV: &str = "LISPC_LLC";
const CC_ENV: &str = "LISPC_CC";

/// `path` with `ext` appended, keeping any extension it already has.
fn with_suffix(path: &Path, ext: &str) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}

/// A command from a tool setting: the first word is the program, the rest
/// are leading arguments.
fn tool_command(tool: &str) -> Command {
    let mut words = tool.split_whitespace();
    let mut cmd = Command::new(words.next().unwrap_or(tool));
    cmd.args(words);
    cmd
}

fn render(cmd: &Command) -> String {
    let mut text = cmd.get_program().to_string_lossy().into_owned();
    for arg in cmd.get_args() {
        text.push(' ');
        text.push_str(&arg.to_string_lossy());
    }
    text
}

impl Toolchain {
    /// Defaults, overridden by `LISPC_LLC` / `LISPC_CC`.
    pub fn from_env() -> Self {
        let mut toolchain = Toolchain::default();
        if let Ok(llc) = std::env::var(LLC_ENV) {
            toolchain.llc = llc;
        }
        if let Ok(cc) = std::env::var(CC_ENV) {
            toolchain.cc = cc;
        }
        toolchain
    }

    /// Path of the IR file written next to `output`.
    pub fn ir_path(output: &Path) -> PathBuf {
        with_suffix(output, "ll")
    }

    /// Path of the assembly file written next to `output`.
    pub fn asm_path(output: &Path) -> PathBuf {
        with_suffix(output, "s")
    }

    pub fn llc_command(&self, ir: &Path, asm: &Path) -> Command {
        let mut cmd = tool_command(&self.llc);
        cmd.arg("-o").arg(asm).arg(ir);
        cmd
    }

    pub fn cc_command(&self, asm: &Path, output: &Path) -> Command {
        let mut cmd = tool_command(&self.cc);
        cmd.arg("-o").arg(output).arg(asm);
        cmd
    }

    /// Write `ir` to `<output>.ll`, then build the executable `output`.
    pub fn build(&self, ir: &str, output: &Path) -> Result<(), ToolchainError> {
        let ir_path = Self::ir_path(output);
        let asm_path = Self::asm_path(output);

        std::fs::write(&ir_path, ir).map_err(|source| ToolchainError::Write {
            path: ir_path.clone(),
            source,
        })?;

        run(self.llc_command(&ir_path, &asm_path), &self.llc, LLC_ENV)?;
        run(self.cc_command(&asm_path, output), &self.cc, CC_ENV)?;
        debug!(output = %output.display(), "linked executable");
        Ok(())
    }
}

fn run(mut cmd: Command, tool: &str, env_var: &'static str) -> Result<(), ToolchainError> {
    let command = render(&cmd);
    debug!(%command, "running");
    let output = cmd.output().map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            ToolchainError::ToolNotFound {
                tool: tool.to_string(),
                env_var,
                source,
            }
        } else {
            ToolchainError::Spawn {
                tool: tool.to_string(),
                source,
            }
        }
    })?;

    if output.status.success() {
        return Ok(());
    }
    let status = match output.status.code() {
        Some(code) => format!("exit code {code}"),
        None => "terminated by signal".to_string(),
    };
    Err(ToolchainError::ToolFailed {
        tool: tool.to_string(),
        status,
        command,
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}
