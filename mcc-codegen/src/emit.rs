//! Program emission
//!
//! A compiled statement is a flat instruction list. This module renders it
//! either as program text (one instruction per line) or as JSON.

use crate::asm::AsmInst;
use log::trace;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EmitError {
    #[error("failed to serialize program: {0}")]
    Json(#[from] serde_json::Error),
}

/// The instructions produced for one statement
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    pub instructions: Vec<AsmInst>,
    /// Number of registers the program needs (highest index + 1)
    pub registers_used: u32,
}

impl Program {
    pub fn new(instructions: Vec<AsmInst>) -> Self {
        let registers_used = instructions
            .iter()
            .flat_map(AsmInst::registers)
            .map(|reg| reg.index() + 1)
            .max()
            .unwrap_or(0);

        Self {
            instructions,
            registers_used,
        }
    }

    /// An empty statement compiles to nothing
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Program text, one instruction per line
    pub fn to_text(&self) -> String {
        emit_instructions(&self.instructions)
    }

    /// The instruction list as a JSON array
    pub fn to_json(&self) -> Result<String, EmitError> {
        Ok(serde_json::to_string(&self.instructions)?)
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_text())
    }
}

/// Render instructions as newline-terminated program text
pub fn emit_instructions(instructions: &[AsmInst]) -> String {
    let mut output = String::new();
    for inst in instructions {
        trace!("emit: {}", inst);
        output.push_str(&inst.to_string());
        output.push('\n');
    }
    output
}
