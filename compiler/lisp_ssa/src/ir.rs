//! SSA IR data model.
//!
//! A small subset of LLVM IR: every value is an `i64` except comparison
//! results (`i1`) and stack slots (`ptr`). Blocks are stored in layout
//! order, which is also the order they are printed in.

use std::fmt;

/// An SSA value name, printed as `%symN`. Numbering restarts at 1 in every
/// function.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Sym(u32);

impl Sym {
    #[inline]
    pub const fn new(n: u32) -> Self {
        Sym(n)
    }
}

impl fmt::Display for Sym {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "%sym{}", self.0)
    }
}

/// Index of a block within its function's block arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BlockId(u32);

impl BlockId {
    /// The entry block of every function.
    pub const ENTRY: BlockId = BlockId(0);

    #[inline]
    pub const fn new(n: u32) -> Self {
        BlockId(n)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// An instruction operand.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Operand {
    Sym(Sym),
    Const(i64),
    /// Incoming function argument, by parameter name.
    Arg(String),
}

impl Operand {
    /// The symbol this operand reads, if any.
    pub fn as_sym(&self) -> Option<Sym> {
        match self {
            Operand::Sym(sym) => Some(*sym),
            Operand::Const(_) | Operand::Arg(_) => None,
        }
    }
}

impl From<Sym> for Operand {
    fn from(sym: Sym) -> Self {
        Operand::Sym(sym)
    }
}

/// Integer binary opcodes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    SDiv,
    SRem,
}

impl BinOp {
    pub fn as_str(self) -> &'static str {
        match self {
            BinOp::Add => "add",
            BinOp::Sub => "sub",
            BinOp::Mul => "mul",
            BinOp::SDiv => "sdiv",
            BinOp::SRem => "srem",
        }
    }
}

/// Integer comparison predicates.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum IcmpPred {
    Slt,
    Sgt,
    Eq,
}

impl IcmpPred {
    pub fn as_str(self) -> &'static str {
        match self {
            IcmpPred::Slt => "slt",
            IcmpPred::Sgt => "sgt",
            IcmpPred::Eq => "eq",
        }
    }
}

/// Non-terminator instructions.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Instr {
    /// `dst = op i64 lhs, rhs`
    Binary {
        dst: Sym,
        op: BinOp,
        lhs: Operand,
        rhs: Operand,
    },
    /// `dst = icmp pred i64 lhs, rhs`, an `i1`.
    Icmp {
        dst: Sym,
        pred: IcmpPred,
        lhs: Operand,
        rhs: Operand,
    },
    /// `dst = zext i1 src to i64`
    Zext { dst: Sym, src: Sym },
    /// `dst = alloca i64`, a `ptr`.
    Alloca { dst: Sym },
    /// `store i64 value, ptr ptr`
    Store { value: Operand, ptr: Sym },
    /// `dst = load i64, ptr ptr`
    Load { dst: Sym, ptr: Sym },
    /// `dst = ptrtoint ptr ptr to i64`
    PtrToInt { dst: Sym, ptr: Sym },
    /// `dst = call i64 @callee(i64 args...)`
    Call {
        dst: Sym,
        callee: String,
        args: Vec<Operand>,
    },
    /// `dst = call i64 asm sideeffect "asm", "constraints"(i64 args...)`
    InlineAsm {
        dst: Sym,
        asm: &'static str,
        constraints: &'static str,
        args: Vec<Operand>,
    },
    /// `dst = phi i64 [value, %block], ...`
    Phi {
        dst: Sym,
        incoming: Vec<(Operand, BlockId)>,
    },
}

impl Instr {
    /// The symbol this instruction defines. Only `store` defines nothing.
    pub fn dst(&self) -> Option<Sym> {
        match self {
            Instr::Binary { dst, .. }
            | Instr::Icmp { dst, .. }
            | Instr::Zext { dst, .. }
            | Instr::Alloca { dst }
            | Instr::Load { dst, .. }
            | Instr::PtrToInt { dst, .. }
            | Instr::Call { dst, .. }
            | Instr::InlineAsm { dst, .. }
            | Instr::Phi { dst, .. } => Some(*dst),
            Instr::Store { .. } => None,
        }
    }

    /// Every operand this instruction reads, in textual order.
    pub fn operands(&self) -> Vec<&Operand> {
        match self {
            Instr::Binary { lhs, rhs, .. } | Instr::Icmp { lhs, rhs, .. } => vec![lhs, rhs],
            Instr::Store { value, .. } => vec![value],
            Instr::Call { args, .. } | Instr::InlineAsm { args, .. } => args.iter().collect(),
            Instr::Phi { incoming, .. } => incoming.iter().map(|(value, _)| value).collect(),
            Instr::Zext { .. } | Instr::Alloca { .. } | Instr::Load { .. } | Instr::PtrToInt { .. } => {
                Vec::new()
            }
        }
    }

    /// Every symbol this instruction reads.
    pub fn uses(&self) -> Vec<Sym> {
        let mut uses: Vec<Sym> = self.operands().into_iter().filter_map(Operand::as_sym).collect();
        match self {
            Instr::Zext { src, .. } => uses.push(*src),
            Instr::Store { ptr, .. } | Instr::Load { ptr, .. } | Instr::PtrToInt { ptr, .. } => {
                uses.push(*ptr);
            }
            _ => {}
        }
        uses
    }
}

/// Block terminators.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Terminator {
    Ret(Operand),
    Br(BlockId),
    CondBr {
        cond: Sym,
        then_dest: BlockId,
        else_dest: BlockId,
    },
}

impl Terminator {
    pub fn successors(&self) -> Vec<BlockId> {
        match self {
            Terminator::Ret(_) => Vec::new(),
            Terminator::Br(dest) => vec![*dest],
            Terminator::CondBr {
                then_dest,
                else_dest,
                ..
            } => vec![*then_dest, *else_dest],
        }
    }

    pub fn uses(&self) -> Vec<Sym> {
        match self {
            Terminator::Ret(value) => value.as_sym().into_iter().collect(),
            Terminator::Br(_) => Vec::new(),
            Terminator::CondBr { cond, .. } => vec![*cond],
        }
    }
}

/// A finished basic block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    pub id: BlockId,
    pub label: String,
    pub instrs: Vec<Instr>,
    pub terminator: Terminator,
}

/// A finished function. `blocks[0]` is the entry block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Function {
    pub name: String,
    pub params: Vec<String>,
    pub blocks: Vec<Block>,
}

impl Function {
    pub fn block(&self, id: BlockId) -> Option<&Block> {
        self.blocks.iter().find(|block| block.id == id)
    }

    /// Label of a block, for printing branch targets.
    pub fn label(&self, id: BlockId) -> Option<&str> {
        self.block(id).map(|block| block.label.as_str())
    }
}

/// A compilation unit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Module {
    pub name: String,
    pub functions: Vec<Function>,
}

impl Module {
    pub fn new(name: impl Into<String>) -> Self {
        Module {
            name: name.into(),
            functions: Vec::new(),
        }
    }

    pub fn function(&self, name: &str) -> Option<&Function> {
        self.functions.iter().find(|func| func.name == name)
    }
}
