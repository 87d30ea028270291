//! Semantic Analysis
//!
//! Validates operand legality on a parsed statement: the target of `=`
//! and the operand of `++`/`--` must name a variable, possibly wrapped in
//! parentheses. The tree is only inspected, never modified.

pub mod errors;

use crate::ast::{Expression, ExpressionKind, UnaryOp};
use log::debug;

pub use errors::{LvalueContext, SemanticError};

/// Stateless lvalue checker
#[derive(Debug, Default, Clone, Copy)]
pub struct SemanticAnalyzer;

impl SemanticAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Check a statement, reporting the first violation in post-order.
    pub fn check(&self, expr: &Expression) -> Result<(), SemanticError> {
        for child in expr.children() {
            self.check(child)?;
        }

        let (target, context) = match &expr.kind {
            ExpressionKind::Assign { target, .. } => (target.as_ref(), LvalueContext::Assignment),
            ExpressionKind::Unary { op, operand } => match op {
                UnaryOp::PreIncrement | UnaryOp::PostIncrement => {
                    (operand.as_ref(), LvalueContext::Increment)
                }
                UnaryOp::PreDecrement | UnaryOp::PostDecrement => {
                    (operand.as_ref(), LvalueContext::Decrement)
                }
                UnaryOp::Plus | UnaryOp::Minus => return Ok(()),
            },
            _ => return Ok(()),
        };

        if target.as_lvalue().is_none() {
            debug!("rejected {} as {}", target, context);
            return Err(SemanticError::InvalidLvalue {
                context,
                location: target.span.start.clone(),
            });
        }

        Ok(())
    }
}
