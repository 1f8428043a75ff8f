#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;

use super::FunctionBuilder;
use crate::errors::CodegenError;
use crate::ir::{BinOp, BlockId, Instr, Operand, Sym, Terminator};

#[test]
fn starts_at_entry_with_sym1() {
    let mut builder = FunctionBuilder::new("f", vec![]);
    assert_eq!(builder.current_block(), BlockId::ENTRY);
    assert_eq!(builder.fresh_sym(), Sym::new(1));
    assert_eq!(builder.fresh_sym(), Sym::new(2));
    assert_eq!(builder.fresh_label_index(), 1);
    assert_eq!(builder.fresh_label_index(), 2);
}

#[test]
fn layout_follows_first_positioning() {
    let mut builder = FunctionBuilder::new("f", vec![]);
    let late = builder.new_block("late");
    let early = builder.new_block("early");
    builder.terminate_br(early);
    builder.position_at(early);
    builder.terminate_br(late);
    builder.position_at(late);
    let sym = builder.fresh_sym();
    builder.emit(Instr::Binary {
        dst: sym,
        op: BinOp::Add,
        lhs: Operand::Const(1),
        rhs: Operand::Const(0),
    });
    builder.terminate_ret(sym);

    let func = builder.finish().unwrap();
    let labels: Vec<&str> = func.blocks.iter().map(|b| b.label.as_str()).collect();
    assert_eq!(labels, ["entry", "early", "late"]);
    assert_eq!(func.blocks[2].terminator, Terminator::Ret(Operand::Sym(sym)));
    assert_eq!(func.label(late), Some("late"));
}

#[test]
fn unterminated_block_is_internal_error() {
    let builder = FunctionBuilder::new("f", vec![]);
    assert!(matches!(
        builder.finish(),
        Err(CodegenError::Internal { message }) if message.contains("no terminator")
    ));
}

#[test]
fn unplaced_block_is_internal_error() {
    let mut builder = FunctionBuilder::new("f", vec![]);
    builder.new_block("dangling");
    builder.terminate_ret(Operand::Const(0));
    assert!(matches!(
        builder.finish(),
        Err(CodegenError::Internal { message }) if message.contains("never placed")
    ));
}

#[test]
fn is_terminated_tracks_current_block() {
    let mut builder = FunctionBuilder::new("f", vec!["x".into()]);
    assert!(!builder.is_terminated());
    builder.terminate_ret(Operand::Arg("x".into()));
    assert!(builder.is_terminated());
    assert_eq!(builder.params(), ["x".to_string()]);
    assert_eq!(builder.name(), "f");
}
