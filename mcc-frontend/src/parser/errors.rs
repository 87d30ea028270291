//! Parse error types for the statement parser
//!
//! This module defines all error types that can occur during parsing.

use crate::lexer::{Token, TokenType};
use mcc_common::{CompilerError, ParseErrorKind, SourceLocation};
use std::fmt;
use thiserror::Error;

/// Which operand of an operator is missing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandSide {
    Left,
    Right,
    /// The single operand of a unary or postfix operator
    Only,
}

impl fmt::Display for OperandSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperandSide::Left => write!(f, "left operand"),
            OperandSide::Right => write!(f, "right operand"),
            OperandSide::Only => write!(f, "operand"),
        }
    }
}

/// Parse error types specific to the parser
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("expected ';' at the end of the statement")]
    MissingTerminator { location: SourceLocation },

    #[error("expected an expression, found nothing")]
    EmptyRange { location: SourceLocation },

    #[error("unexpected token '{}', expected {expected}", .found.token_type)]
    UnexpectedToken { expected: String, found: Token },

    #[error("operator '{operator}' is missing its {side}")]
    IncompleteExpression {
        operator: TokenType,
        side: OperandSide,
        location: SourceLocation,
    },
}

impl ParseError {
    pub fn kind(&self) -> ParseErrorKind {
        match self {
            ParseError::MissingTerminator { .. } => ParseErrorKind::MissingTerminator,
            ParseError::EmptyRange { .. } => ParseErrorKind::EmptyOrInvertedRange,
            ParseError::UnexpectedToken { .. } => ParseErrorKind::UnexpectedToken,
            ParseError::IncompleteExpression { .. } => ParseErrorKind::IncompleteExpression,
        }
    }

    pub fn location(&self) -> SourceLocation {
        match self {
            ParseError::MissingTerminator { location }
            | ParseError::EmptyRange { location }
            | ParseError::IncompleteExpression { location, .. } => location.clone(),
            ParseError::UnexpectedToken { found, .. } => found.location(),
        }
    }
}

impl From<ParseError> for CompilerError {
    fn from(err: ParseError) -> Self {
        CompilerError::parse_error(err.kind(), err.to_string(), err.location())
    }
}
