//! Sign/operator disambiguation
//!
//! The lexer emits every single `+`/`-` as an unresolved sign. A sign that
//! directly follows something able to end an operand (an identifier, a
//! constant, a `)` or a `++`/`--`) is a binary operator; every other sign
//! stays unary and is consumed by the parser's unary production.

use crate::lexer::{Token, TokenType};
use log::trace;

/// Rewrite binary `+`/`-` tokens to `Add`/`Sub` in place.
///
/// Each decision only looks at the left neighbour's kind as scanned, so
/// the outcome does not depend on the order the tokens are visited in.
pub fn disambiguate(tokens: &mut [Token]) {
    let ends_operand: Vec<bool> = tokens
        .iter()
        .map(|token| token.token_type.ends_operand())
        .collect();

    for (index, token) in tokens.iter_mut().enumerate().skip(1) {
        if !ends_operand[index - 1] {
            continue;
        }

        let resolved = match token.token_type {
            TokenType::Plus => TokenType::Add,
            TokenType::Minus => TokenType::Sub,
            _ => continue,
        };
        trace!("token {} '{}' is binary", index, token.token_type);
        token.token_type = resolved;
    }
}
