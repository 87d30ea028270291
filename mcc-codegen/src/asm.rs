//! Machine Instruction Definitions
//!
//! The target is a load/store machine with an unbounded file of general
//! purpose registers `r0, r1, ...` and a word-addressed data memory.
//! Arithmetic operands are either registers or integer immediates, which
//! is how constants, moves and negation are expressed without extra opcodes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A general purpose register, identified by its index
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Reg(pub u32);

impl Reg {
    /// The register one above this one
    pub fn next(self) -> Reg {
        Reg(self.0 + 1)
    }

    pub fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}

/// A memory cell address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Slot(pub u32);

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0)
    }
}

/// Source operand of an arithmetic instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operand {
    Reg(Reg),
    Imm(i64),
}

impl From<Reg> for Operand {
    fn from(reg: Reg) -> Self {
        Operand::Reg(reg)
    }
}

impl From<i64> for Operand {
    fn from(value: i64) -> Self {
        Operand::Imm(value)
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Reg(reg) => write!(f, "{}", reg),
            Operand::Imm(value) => write!(f, "{}", value),
        }
    }
}

/// Arithmetic opcodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

impl fmt::Display for ArithOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mnemonic = match self {
            ArithOp::Add => "add",
            ArithOp::Sub => "sub",
            ArithOp::Mul => "mul",
            ArithOp::Div => "div",
            ArithOp::Rem => "rem",
        };
        write!(f, "{}", mnemonic)
    }
}

/// Machine instructions
///
/// Text form puts the destination first: `load r0 [4]`, `store [4] r0`,
/// `add r0 r0 r1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum AsmInst {
    /// dst = memory[slot]
    Load { dst: Reg, slot: Slot },
    /// memory[slot] = src
    Store { slot: Slot, src: Reg },
    /// dst = lhs OP rhs
    Arith {
        #[serde(rename = "opcode")]
        op: ArithOp,
        dst: Reg,
        lhs: Operand,
        rhs: Operand,
    },
}

impl AsmInst {
    pub fn arith(op: ArithOp, dst: Reg, lhs: impl Into<Operand>, rhs: impl Into<Operand>) -> Self {
        AsmInst::Arith {
            op,
            dst,
            lhs: lhs.into(),
            rhs: rhs.into(),
        }
    }

    /// `dst = value`, spelled `add dst 0 value`
    pub fn load_immediate(dst: Reg, value: i64) -> Self {
        Self::arith(ArithOp::Add, dst, 0i64, value)
    }

    /// `dst = src`, spelled `add dst 0 src`
    pub fn move_reg(dst: Reg, src: Reg) -> Self {
        Self::arith(ArithOp::Add, dst, 0i64, src)
    }

    /// `dst = -src`, spelled `sub dst 0 src`
    pub fn negate(dst: Reg, src: Reg) -> Self {
        Self::arith(ArithOp::Sub, dst, 0i64, src)
    }

    /// Every register this instruction reads or writes
    pub fn registers(&self) -> Vec<Reg> {
        match self {
            AsmInst::Load { dst, .. } => vec![*dst],
            AsmInst::Store { src, .. } => vec![*src],
            AsmInst::Arith { dst, lhs, rhs, .. } => {
                let mut regs = vec![*dst];
                for operand in [lhs, rhs] {
                    if let Operand::Reg(reg) = operand {
                        regs.push(*reg);
                    }
                }
                regs
            }
        }
    }
}

impl fmt::Display for AsmInst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AsmInst::Load { dst, slot } => write!(f, "load {} {}", dst, slot),
            AsmInst::Store { slot, src } => write!(f, "store {} {}", slot, src),
            AsmInst::Arith { op, dst, lhs, rhs } => write!(f, "{} {} {} {}", op, dst, lhs, rhs),
        }
    }
}
