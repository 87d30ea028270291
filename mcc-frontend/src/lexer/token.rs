//! Token definitions for the statement lexer
//!
//! This module defines token types and the Token struct.

use mcc_common::{SourceLocation, SourceSpan};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Token types
///
/// The scanner cannot tell a sign from a binary operator, so every single
/// `+`/`-` starts out as `Plus`/`Minus` and is rewritten to `Add`/`Sub` by
/// [`disambiguate`](crate::disambiguate::disambiguate). Likewise every `++`/`--`
/// is lexed as `PreInc`/`PreDec`; the parser decides whether it is postfix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenType {
    // Binary operators
    Assign, // =
    Add,    // + (binary, after disambiguation)
    Sub,    // - (binary, after disambiguation)
    Mul,    // *
    Div,    // /
    Rem,    // %

    // Increment / decrement, prefix until proven otherwise
    PreInc, // ++
    PreDec, // --

    // Operands
    Identifier(char),
    Constant(i64),

    // Delimiters
    LParen, // (
    RParen, // )

    // Unresolved signs
    Plus,  // +
    Minus, // -

    End, // ;
}

impl TokenType {
    /// Whether a token of this kind can be the last token of an operand.
    ///
    /// A `+`/`-` directly after such a token is a binary operator.
    pub fn ends_operand(&self) -> bool {
        matches!(
            self,
            TokenType::PreInc
                | TokenType::PreDec
                | TokenType::Identifier(_)
                | TokenType::Constant(_)
                | TokenType::RParen
        )
    }

    /// Name used by the token dump
    pub fn kind_name(&self) -> &'static str {
        match self {
            TokenType::Assign => "Assign",
            TokenType::Add => "Add",
            TokenType::Sub => "Sub",
            TokenType::Mul => "Mul",
            TokenType::Div => "Div",
            TokenType::Rem => "Rem",
            TokenType::PreInc => "Inc",
            TokenType::PreDec => "Dec",
            TokenType::Identifier(_) => "Identifier",
            TokenType::Constant(_) => "Constant",
            TokenType::LParen => "LPar",
            TokenType::RParen => "RPar",
            TokenType::Plus => "Plus",
            TokenType::Minus => "Minus",
            TokenType::End => "End",
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenType::Assign => write!(f, "="),
            TokenType::Add | TokenType::Plus => write!(f, "+"),
            TokenType::Sub | TokenType::Minus => write!(f, "-"),
            TokenType::Mul => write!(f, "*"),
            TokenType::Div => write!(f, "/"),
            TokenType::Rem => write!(f, "%"),
            TokenType::PreInc => write!(f, "++"),
            TokenType::PreDec => write!(f, "--"),
            TokenType::Identifier(name) => write!(f, "{name}"),
            TokenType::Constant(value) => write!(f, "{value}"),
            TokenType::LParen => write!(f, "("),
            TokenType::RParen => write!(f, ")"),
            TokenType::End => write!(f, ";"),
        }
    }
}

/// A token with location information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub token_type: TokenType,
    pub span: SourceSpan,
}

impl Token {
    pub fn new(token_type: TokenType, span: SourceSpan) -> Self {
        Self { token_type, span }
    }

    /// Token without a meaningful location, for tests and synthesized input
    pub fn synthetic(token_type: TokenType) -> Self {
        Self::new(token_type, SourceSpan::dummy())
    }

    pub fn location(&self) -> SourceLocation {
        self.span.start.clone()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.token_type, self.span.start)
    }
}
