//! Mini Compiler - Target Machine Model
//!
//! This crate describes the register/memory machine the statement compiler
//! targets:
//!
//! - Register and instruction definitions
//! - The fixed memory layout of the three program variables
//! - Text and JSON emission of compiled statements

pub mod asm;
pub mod emit;
pub mod layout;

pub use asm::{ArithOp, AsmInst, Operand, Reg, Slot};
pub use emit::{emit_instructions, EmitError, Program};
pub use layout::{LayoutError, MemoryLayout};
