//! Builder for an in-progress SSA function.
//!
//! Position at a block, emit instructions, terminate. Blocks are created
//! up front (so branches can name them) but laid out in the order they are
//! first positioned at, which keeps every definition textually ahead of its
//! uses for the structured control flow the lowering produces.

use crate::errors::CodegenError;
use crate::ir::{Block, BlockId, Function, Instr, Operand, Sym, Terminator};

/// Block being constructed.
struct BlockBuilder {
    label: String,
    instrs: Vec<Instr>,
    terminator: Option<Terminator>,
    placed: bool,
}

/// Builder for one function. A fresh builder per function is what resets
/// the symbol and label counters.
pub struct FunctionBuilder {
    name: String,
    params: Vec<String>,
    blocks: Vec<BlockBuilder>,
    layout: Vec<BlockId>,
    current: BlockId,
    next_sym: u32,
    next_label: u32,
}

impl FunctionBuilder {
    /// Create a builder positioned at a fresh `entry` block.
    pub fn new(name: impl Into<String>, params: Vec<String>) -> Self {
        let mut builder = FunctionBuilder {
            name: name.into(),
            params,
            blocks: Vec::new(),
            layout: Vec::new(),
            current: BlockId::ENTRY,
            next_sym: 1,
            next_label: 1,
        };
        let entry = builder.new_block("entry");
        builder.position_at(entry);
        builder
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }

    // Symbols and labels

    /// Allocate the next `%symN`.
    pub fn fresh_sym(&mut self) -> Sym {
        let sym = Sym::new(self.next_sym);
        self.next_sym += 1;
        sym
    }

    /// Allocate the next label suffix, shared by every labelled construct.
    pub fn fresh_label_index(&mut self) -> u32 {
        let index = self.next_label;
        self.next_label += 1;
        index
    }

    // Block management

    /// Allocate a new, not yet placed, block.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "block counts never exceed u32"
    )]
    pub fn new_block(&mut self, label: impl Into<String>) -> BlockId {
        let id = BlockId::new(self.blocks.len() as u32);
        self.blocks.push(BlockBuilder {
            label: label.into(),
            instrs: Vec::new(),
            terminator: None,
            placed: false,
        });
        id
    }

    /// Set the insertion point. The first time a block is positioned at,
    /// it is appended to the layout.
    pub fn position_at(&mut self, block: BlockId) {
        debug_assert!(
            block.index() < self.blocks.len(),
            "block {block:?} out of bounds (have {} blocks)",
            self.blocks.len(),
        );
        if let Some(builder) = self.blocks.get_mut(block.index()) {
            if !builder.placed {
                builder.placed = true;
                self.layout.push(block);
            }
        }
        self.current = block;
    }

    /// The block instructions are currently appended to.
    #[inline]
    pub fn current_block(&self) -> BlockId {
        self.current
    }

    /// Whether the current block already has a terminator.
    #[inline]
    pub fn is_terminated(&self) -> bool {
        self.blocks
            .get(self.current.index())
            .is_some_and(|block| block.terminator.is_some())
    }

    // Instruction emission

    pub fn emit(&mut self, instr: Instr) {
        debug_assert!(!self.is_terminated(), "emit into terminated block");
        if let Some(block) = self.blocks.get_mut(self.current.index()) {
            block.instrs.push(instr);
        }
    }

    // Terminators

    fn terminate(&mut self, terminator: Terminator) {
        debug_assert!(
            !self.is_terminated(),
            "block {:?} already terminated",
            self.current
        );
        if let Some(block) = self.blocks.get_mut(self.current.index()) {
            block.terminator = Some(terminator);
        }
    }

    pub fn terminate_ret(&mut self, value: impl Into<Operand>) {
        self.terminate(Terminator::Ret(value.into()));
    }

    pub fn terminate_br(&mut self, dest: BlockId) {
        self.terminate(Terminator::Br(dest));
    }

    pub fn terminate_cond_br(&mut self, cond: Sym, then_dest: BlockId, else_dest: BlockId) {
        self.terminate(Terminator::CondBr {
            cond,
            then_dest,
            else_dest,
        });
    }

    /// Consume the builder. Every block must be placed and terminated.
    pub fn finish(self) -> Result<Function, CodegenError> {
        let FunctionBuilder {
            name,
            params,
            mut blocks,
            layout,
            ..
        } = self;

        if let Some(orphan) = blocks.iter().find(|block| !block.placed) {
            return Err(CodegenError::Internal {
                message: format!("block `{}` in `{name}` was never placed", orphan.label),
            });
        }

        let mut finished = Vec::with_capacity(layout.len());
        for id in layout {
            let Some(block) = blocks.get_mut(id.index()) else {
                continue;
            };
            let Some(terminator) = block.terminator.take() else {
                return Err(CodegenError::Internal {
                    message: format!("block `{}` in `{name}` has no terminator", block.label),
                });
            };
            finished.push(Block {
                id,
                label: std::mem::take(&mut block.label),
                instrs: std::mem::take(&mut block.instrs),
                terminator,
            });
        }

        Ok(Function {
            name,
            params,
            blocks: finished,
        })
    }
}

#[cfg(test)]
mod tests;
