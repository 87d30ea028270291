//! Semantic analysis error definitions

use mcc_common::{CompilerError, SourceLocation};
use std::fmt;
use thiserror::Error;

/// The construct that requires an lvalue operand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LvalueContext {
    Assignment,
    Increment,
    Decrement,
}

impl fmt::Display for LvalueContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LvalueContext::Assignment => write!(f, "left operand of assignment"),
            LvalueContext::Increment => write!(f, "operand of increment"),
            LvalueContext::Decrement => write!(f, "operand of decrement"),
        }
    }
}

/// Semantic analysis errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SemanticError {
    #[error("lvalue required as {context}")]
    InvalidLvalue {
        context: LvalueContext,
        location: SourceLocation,
    },
}

impl From<SemanticError> for CompilerError {
    fn from(err: SemanticError) -> Self {
        let message = err.to_string();
        match err {
            SemanticError::InvalidLvalue { location, .. } => {
                CompilerError::lvalue_error(message, location)
            }
        }
    }
}
