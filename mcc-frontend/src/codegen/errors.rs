//! Code generation error types

use mcc_codegen::LayoutError;
use mcc_common::{CompilerError, SourceLocation};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CodegenError {
    #[error("{source}")]
    UnknownVariable {
        source: LayoutError,
        location: SourceLocation,
    },

    #[error("cannot store to an expression that is not a variable")]
    InvalidLvalue { location: SourceLocation },
}

impl From<CodegenError> for CompilerError {
    fn from(err: CodegenError) -> Self {
        let message = err.to_string();
        match err {
            CodegenError::UnknownVariable { location, .. } => {
                CompilerError::domain_error(message, location)
            }
            CodegenError::InvalidLvalue { location } => {
                CompilerError::lvalue_error(message, location)
            }
        }
    }
}
