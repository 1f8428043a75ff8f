//! Structural checks on generated IR.
//!
//! Catches lowering bugs before the text reaches `llc`, where they would
//! surface as an opaque assembler error. Blocks are walked in layout order;
//! since the lowering only produces forward edges, "defined earlier in the
//! text" is the same as "defined on every path".

use rustc_hash::{FxHashMap, FxHashSet};
use thiserror::Error;

use crate::ir::{BlockId, Function, Instr, Module, Operand, Sym};

/// A malformed function.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum VerifyError {
    #[error("in `{function}`: {sym} is used before it is defined")]
    UseBeforeDef { function: String, sym: Sym },
    #[error("in `{function}`: {sym} is defined more than once")]
    DuplicateDefinition { function: String, sym: Sym },
    #[error("in `{function}`: label `{label}` appears more than once")]
    DuplicateLabel { function: String, label: String },
    #[error("in `{function}`: reference to a block that does not exist ({block:?})")]
    UnknownBlock { function: String, block: BlockId },
    #[error("in `{function}`: `{name}` is not a parameter")]
    UnknownArgument { function: String, name: String },
    #[error("in `{function}`: phi in `{block}` names `{incoming}`, which does not branch there")]
    PhiNotPredecessor {
        function: String,
        block: String,
        incoming: String,
    },
    #[error("in `{function}`: phi in `{block}` follows a non-phi instruction")]
    PhiNotAtBlockStart { function: String, block: String },
}

/// Verify every function in `module`.
pub fn verify_module(module: &Module) -> Result<(), VerifyError> {
    module.functions.iter().try_for_each(verify_function)
}

/// Verify one function.
pub fn verify_function(function: &Function) -> Result<(), VerifyError> {
    let fname = || function.name.clone();

    let mut labels = FxHashSet::default();
    for block in &function.blocks {
        if !labels.insert(block.label.as_str()) {
            return Err(VerifyError::DuplicateLabel {
                function: fname(),
                label: block.label.clone(),
            });
        }
    }

    let mut preds: FxHashMap<BlockId, Vec<BlockId>> = FxHashMap::default();
    for block in &function.blocks {
        for succ in block.terminator.successors() {
            if function.block(succ).is_none() {
                return Err(VerifyError::UnknownBlock {
                    function: fname(),
                    block: succ,
                });
            }
            preds.entry(succ).or_default().push(block.id);
        }
    }

    let mut defined = FxHashSet::default();
    for block in &function.blocks {
        let mut past_phis = false;
        for instr in &block.instrs {
            if let Instr::Phi { incoming, .. } = instr {
                if past_phis {
                    return Err(VerifyError::PhiNotAtBlockStart {
                        function: fname(),
                        block: block.label.clone(),
                    });
                }
                for (_, from) in incoming {
                    let Some(from_block) = function.block(*from) else {
                        return Err(VerifyError::UnknownBlock {
                            function: fname(),
                            block: *from,
                        });
                    };
                    let is_pred = preds.get(&block.id).is_some_and(|p| p.contains(from));
                    if !is_pred {
                        return Err(VerifyError::PhiNotPredecessor {
                            function: fname(),
                            block: block.label.clone(),
                            incoming: from_block.label.clone(),
                        });
                    }
                }
            } else {
                past_phis = true;
            }

            for operand in instr.operands() {
                if let Operand::Arg(name) = operand {
                    if !function.params.contains(name) {
                        return Err(VerifyError::UnknownArgument {
                            function: fname(),
                            name: name.clone(),
                        });
                    }
                }
            }
            for sym in instr.uses() {
                if !defined.contains(&sym) {
                    return Err(VerifyError::UseBeforeDef {
                        function: fname(),
                        sym,
                    });
                }
            }
            if let Some(dst) = instr.dst() {
                if !defined.insert(dst) {
                    return Err(VerifyError::DuplicateDefinition {
                        function: fname(),
                        sym: dst,
                    });
                }
            }
        }
        for sym in block.terminator.uses() {
            if !defined.contains(&sym) {
                return Err(VerifyError::UseBeforeDef {
                    function: fname(),
                    sym,
                });
            }
        }
    }
    Ok(())
}
