//! LLVM IR text output.
//!
//! `Display` for [`Module`] prints a complete `.ll` file that `llc`
//! accepts. Output is a pure function of the module, so compiling the same
//! program twice yields byte-identical text.

use std::fmt::{self, Write};

use crate::ir::{Block, BlockId, Function, Instr, Module, Operand, Terminator};

/// Whether `name` can be printed without quotes after `@` or `%`.
fn is_bare_identifier(name: &str) -> bool {
    let mut bytes = name.bytes();
    let Some(first) = bytes.next() else {
        return false;
    };
    let is_ident = |b: u8| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'$' | b'.' | b'_');
    !first.is_ascii_digit() && is_ident(first) && bytes.all(is_ident)
}

/// Print `name` with `prefix`, quoting it when it contains characters LLVM
/// does not allow in bare identifiers.
fn write_name(out: &mut impl Write, prefix: char, name: &str) -> fmt::Result {
    out.write_char(prefix)?;
    if is_bare_identifier(name) {
        out.write_str(name)
    } else {
        write_quoted(out, name)
    }
}

/// `"text"` with quotes, backslashes and non-printing bytes hex-escaped.
fn write_quoted(out: &mut impl Write, text: &str) -> fmt::Result {
    out.write_char('"')?;
    for c in text.chars() {
        if c == '"' || c == '\\' || !c.is_ascii_graphic() {
            let mut buf = [0; 4];
            for b in c.encode_utf8(&mut buf).bytes() {
                write!(out, "\\{b:02X}")?;
            }
        } else {
            out.write_char(c)?;
        }
    }
    out.write_char('"')
}

/// Local name of an incoming argument.
fn arg_name(param: &str) -> String {
    format!("arg.{param}")
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Sym(sym) => write!(f, "{sym}"),
            Operand::Const(value) => write!(f, "{value}"),
            Operand::Arg(name) => write_name(f, '%', &arg_name(name)),
        }
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "; ModuleID = '{}'", self.name)?;
        f.write_str("source_filename = ")?;
        write_quoted(f, &self.name)?;
        writeln!(f)?;
        for function in &self.functions {
            writeln!(f)?;
            write!(f, "{function}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "define i64 ")?;
        write_name(f, '@', &self.name)?;
        f.write_char('(')?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str("i64 ")?;
            write_name(f, '%', &arg_name(param))?;
        }
        writeln!(f, ") {{")?;
        for (i, block) in self.blocks.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            self.write_block(f, block)?;
        }
        writeln!(f, "}}")
    }
}

impl Function {
    fn write_block(&self, f: &mut fmt::Formatter<'_>, block: &Block) -> fmt::Result {
        writeln!(f, "{}:", block.label)?;
        for instr in &block.instrs {
            f.write_str("  ")?;
            self.write_instr(f, instr)?;
            writeln!(f)?;
        }
        f.write_str("  ")?;
        self.write_terminator(f, &block.terminator)?;
        writeln!(f)
    }

    fn write_label(&self, f: &mut fmt::Formatter<'_>, id: BlockId) -> fmt::Result {
        match self.label(id) {
            Some(label) => write_name(f, '%', label),
            None => write!(f, "%bb{}", id.index()),
        }
    }

    fn write_instr(&self, f: &mut fmt::Formatter<'_>, instr: &Instr) -> fmt::Result {
        match instr {
            Instr::Binary { dst, op, lhs, rhs } => {
                write!(f, "{dst} = {} i64 {lhs}, {rhs}", op.as_str())
            }
            Instr::Icmp {
                dst,
                pred,
                lhs,
                rhs,
            } => write!(f, "{dst} = icmp {} i64 {lhs}, {rhs}", pred.as_str()),
            Instr::Zext { dst, src } => write!(f, "{dst} = zext i1 {src} to i64"),
            Instr::Alloca { dst } => write!(f, "{dst} = alloca i64, align 8"),
            Instr::Store { value, ptr } => write!(f, "store i64 {value}, ptr {ptr}, align 8"),
            Instr::Load { dst, ptr } => write!(f, "{dst} = load i64, ptr {ptr}, align 8"),
            Instr::PtrToInt { dst, ptr } => write!(f, "{dst} = ptrtoint ptr {ptr} to i64"),
            Instr::Call { dst, callee, args } => {
                write!(f, "{dst} = call i64 ")?;
                write_name(f, '@', callee)?;
                write_args(f, args)
            }
            Instr::InlineAsm {
                dst,
                asm,
                constraints,
                args,
            } => {
                write!(
                    f,
                    "{dst} = call i64 asm sideeffect \"{asm}\", \"{constraints}\""
                )?;
                write_args(f, args)
            }
            Instr::Phi { dst, incoming } => {
                write!(f, "{dst} = phi i64 ")?;
                for (i, (value, block)) in incoming.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "[ {value}, ")?;
                    self.write_label(f, *block)?;
                    f.write_str(" ]")?;
                }
                Ok(())
            }
        }
    }

    fn write_terminator(&self, f: &mut fmt::Formatter<'_>, terminator: &Terminator) -> fmt::Result {
        match terminator {
            Terminator::Ret(value) => write!(f, "ret i64 {value}"),
            Terminator::Br(dest) => {
                f.write_str("br label ")?;
                self.write_label(f, *dest)
            }
            Terminator::CondBr {
                cond,
                then_dest,
                else_dest,
            } => {
                write!(f, "br i1 {cond}, label ")?;
                self.write_label(f, *then_dest)?;
                f.write_str(", label ")?;
                self.write_label(f, *else_dest)
            }
        }
    }
}

fn write_args(f: &mut fmt::Formatter<'_>, args: &[Operand]) -> fmt::Result {
    f.write_char('(')?;
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "i64 {arg}")?;
    }
    f.write_char(')')
}
