//! Code generation from the AST to machine instructions
//!
//! The generator walks a checked statement once. Every call is told which
//! register receives the subresult and whether the node is read from or
//! written to memory; right operands go one register up and nothing is
//! kept between calls, so a tree of depth `d` touches at most `d + 1`
//! registers.

mod errors;

pub use errors::CodegenError;

use crate::ast::{Expression, ExpressionKind, UnaryOp};
use log::debug;
use mcc_codegen::{ArithOp, AsmInst, MemoryLayout, Program, Reg, Slot};

/// Whether an identifier is being read or assigned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Load,
    Store,
}

/// Single-statement code generator
#[derive(Debug, Default)]
pub struct CodeGenerator {
    instructions: Vec<AsmInst>,
}

impl CodeGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate the program for one statement, result in `r0`.
    pub fn generate(mut self, expr: &Expression) -> Result<Program, CodegenError> {
        self.emit_expr(expr, Reg(0), Access::Load)?;
        let program = Program::new(self.instructions);
        debug!(
            "generated {} instructions using {} registers",
            program.len(),
            program.registers_used
        );
        Ok(program)
    }

    fn push(&mut self, inst: AsmInst) {
        self.instructions.push(inst);
    }

    /// Emit code leaving the value of `expr` in `reg`.
    ///
    /// Returns the memory slot when `expr` is a variable, possibly
    /// parenthesized; increments write their result back to it.
    fn emit_expr(&mut self, expr: &Expression, reg: Reg, access: Access) -> Result<Option<Slot>, CodegenError> {
        match &expr.kind {
            ExpressionKind::Identifier(name) => {
                let slot = MemoryLayout::slot_of(*name).map_err(|source| CodegenError::UnknownVariable {
                    source,
                    location: expr.span.start.clone(),
                })?;
                match access {
                    Access::Load => self.push(AsmInst::Load { dst: reg, slot }),
                    Access::Store => self.push(AsmInst::Store { slot, src: reg }),
                }
                Ok(Some(slot))
            }
            ExpressionKind::Group(inner) => self.emit_expr(inner, reg, access),
            _ if access == Access::Store => Err(CodegenError::InvalidLvalue {
                location: expr.span.start.clone(),
            }),
            ExpressionKind::Constant(value) => {
                self.push(AsmInst::load_immediate(reg, *value));
                Ok(None)
            }
            ExpressionKind::Binary { op, left, right } => {
                self.emit_expr(left, reg, Access::Load)?;
                self.emit_expr(right, reg.next(), Access::Load)?;
                self.push(AsmInst::arith(op.opcode(), reg, reg, reg.next()));
                Ok(None)
            }
            ExpressionKind::Assign { target, value } => {
                self.emit_expr(value, reg.next(), Access::Load)?;
                self.push(AsmInst::move_reg(reg, reg.next()));
                self.emit_expr(target, reg, Access::Store)?;
                Ok(None)
            }
            ExpressionKind::Unary { op, operand } if op.is_increment_or_decrement() => {
                let slot = self.emit_target(operand, reg)?;
                // Postfix leaves the old value in `reg`
                let result = if op.is_postfix() { reg.next() } else { reg };
                self.push(AsmInst::arith(step_opcode(*op), result, reg, 1i64));
                self.push(AsmInst::Store { slot, src: result });
                Ok(None)
            }
            ExpressionKind::Unary { op, operand } => {
                self.emit_expr(operand, reg, Access::Load)?;
                if *op == UnaryOp::Minus {
                    self.push(AsmInst::negate(reg, reg));
                }
                Ok(None)
            }
        }
    }

    /// Load the operand of `++`/`--` and return the slot it came from.
    fn emit_target(&mut self, operand: &Expression, reg: Reg) -> Result<Slot, CodegenError> {
        self.emit_expr(operand, reg, Access::Load)?
            .ok_or_else(|| CodegenError::InvalidLvalue {
                location: operand.span.start.clone(),
            })
    }
}

fn step_opcode(op: UnaryOp) -> ArithOp {
    match op {
        UnaryOp::PreDecrement | UnaryOp::PostDecrement => ArithOp::Sub,
        _ => ArithOp::Add,
    }
}
