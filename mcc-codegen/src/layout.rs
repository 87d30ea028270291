//! Data memory layout
//!
//! The machine knows exactly three program variables, each living in a
//! fixed word-sized slot: `x` at 0, `y` at 4 and `z` at 8. The map is
//! process-wide and never changes between statements.

use crate::asm::Slot;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("unknown variable '{0}' (only x, y and z are supported)")]
    UnknownVariable(char),
}

/// Fixed variable-to-slot assignment
pub struct MemoryLayout;

impl MemoryLayout {
    /// Bytes per variable slot
    pub const WORD_SIZE: u32 = 4;

    /// Supported variables in slot order
    pub const VARIABLES: [(char, Slot); 3] = [
        ('x', Slot(0)),
        ('y', Slot(Self::WORD_SIZE)),
        ('z', Slot(2 * Self::WORD_SIZE)),
    ];

    /// Look up the memory slot of a variable
    pub fn slot_of(name: char) -> Result<Slot, LayoutError> {
        Self::VARIABLES
            .iter()
            .find(|(variable, _)| *variable == name)
            .map(|(_, slot)| *slot)
            .ok_or(LayoutError::UnknownVariable(name))
    }
}
