//! Operator definitions
//!
//! This module defines binary and unary operators used in expressions.

use mcc_codegen::ArithOp;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary arithmetic operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

impl BinaryOp {
    pub fn name(&self) -> &'static str {
        match self {
            BinaryOp::Add => "Add",
            BinaryOp::Sub => "Sub",
            BinaryOp::Mul => "Mul",
            BinaryOp::Div => "Div",
            BinaryOp::Rem => "Rem",
        }
    }

    /// The machine opcode implementing this operator
    pub fn opcode(&self) -> ArithOp {
        match self {
            BinaryOp::Add => ArithOp::Add,
            BinaryOp::Sub => ArithOp::Sub,
            BinaryOp::Mul => ArithOp::Mul,
            BinaryOp::Div => ArithOp::Div,
            BinaryOp::Rem => ArithOp::Rem,
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op_str = match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
        };
        write!(f, "{}", op_str)
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOp {
    Plus,
    Minus,
    PreIncrement,
    PreDecrement,
    PostIncrement,
    PostDecrement,
}

impl UnaryOp {
    pub fn name(&self) -> &'static str {
        match self {
            UnaryOp::Plus => "Plus",
            UnaryOp::Minus => "Minus",
            UnaryOp::PreIncrement => "PreInc",
            UnaryOp::PreDecrement => "PreDec",
            UnaryOp::PostIncrement => "PostInc",
            UnaryOp::PostDecrement => "PostDec",
        }
    }

    /// Increments and decrements write their operand back to memory
    pub fn is_increment_or_decrement(&self) -> bool {
        !matches!(self, UnaryOp::Plus | UnaryOp::Minus)
    }

    pub fn is_postfix(&self) -> bool {
        matches!(self, UnaryOp::PostIncrement | UnaryOp::PostDecrement)
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op_str = match self {
            UnaryOp::Plus => "+",
            UnaryOp::Minus => "-",
            UnaryOp::PreIncrement | UnaryOp::PostIncrement => "++",
            UnaryOp::PreDecrement | UnaryOp::PostDecrement => "--",
        };
        write!(f, "{}", op_str)
    }
}
