//! Built-in operator tables.
//!
//! Operands are plain strings in the AST; this module is the single place
//! that decides which strings name built-ins.

use std::fmt;

/// Name of the raw write system call form.
pub const SYS_WRITE: &str = "sys_write";

/// Characters that may start or continue an operator.
pub const OPERATOR_CHARS: &[u8] = b"+-*/%<>=&";

/// Whether `b` is an operator character.
#[inline]
pub fn is_operator_char(b: u8) -> bool {
    OPERATOR_CHARS.contains(&b)
}

/// Variadic integer arithmetic.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

impl ArithOp {
    pub fn symbol(self) -> &'static str {
        match self {
            ArithOp::Add => "+",
            ArithOp::Sub => "-",
            ArithOp::Mul => "*",
            ArithOp::Div => "/",
            ArithOp::Rem => "%",
        }
    }
}

/// Binary integer comparison.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CompareOp {
    Lt,
    Gt,
    Eq,
}

impl CompareOp {
    pub fn symbol(self) -> &'static str {
        match self {
            CompareOp::Lt => "<",
            CompareOp::Gt => ">",
            CompareOp::Eq => "=",
        }
    }
}

/// A built-in call form.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Builtin {
    Arith(ArithOp),
    Compare(CompareOp),
    SysWrite,
}

impl Builtin {
    /// Classify a call operand. `None` means a user function call.
    pub fn from_operand(operand: &str) -> Option<Builtin> {
        let builtin = match operand {
            "+" => Builtin::Arith(ArithOp::Add),
            "-" => Builtin::Arith(ArithOp::Sub),
            "*" => Builtin::Arith(ArithOp::Mul),
            "/" => Builtin::Arith(ArithOp::Div),
            "%" => Builtin::Arith(ArithOp::Rem),
            "<" => Builtin::Compare(CompareOp::Lt),
            ">" => Builtin::Compare(CompareOp::Gt),
            "=" => Builtin::Compare(CompareOp::Eq),
            SYS_WRITE => Builtin::SysWrite,
            _ => return None,
        };
        Some(builtin)
    }

    /// Argument count the form accepts.
    pub fn arity(self) -> Arity {
        match self {
            Builtin::Arith(_) => Arity::AtLeast(1),
            Builtin::Compare(_) => Arity::Exactly(2),
            Builtin::SysWrite => Arity::Exactly(3),
        }
    }
}

/// Accepted argument counts of a callable.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Arity {
    Exactly(usize),
    AtLeast(usize),
}

impl Arity {
    /// Whether `count` arguments satisfy this arity.
    #[inline]
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Exactly(n) => count == n,
            Arity::AtLeast(n) => count >= n,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (prefix, n) = match *self {
            Arity::Exactly(n) => ("", n),
            Arity::AtLeast(n) => ("at least ", n),
        };
        let s = if n == 1 { "" } else { "s" };
        write!(f, "{prefix}{n} argument{s}")
    }
}
