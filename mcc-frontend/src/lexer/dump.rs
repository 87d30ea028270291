//! Human-readable token listing for `--dump-tokens`

use super::token::{Token, TokenType};

/// One line per token: `<Index =   0>: Identifier, name   = x`
pub fn dump_tokens(tokens: &[Token]) -> String {
    let mut output = String::new();

    for (index, token) in tokens.iter().enumerate() {
        let kind = token.token_type.kind_name();
        let line = match token.token_type {
            TokenType::Constant(value) => {
                format!("<Index = {index:>3}>: {kind:<10}, {:<6} = {value}", "value")
            }
            TokenType::Identifier(name) => {
                format!("<Index = {index:>3}>: {kind:<10}, {:<6} = {name}", "name")
            }
            TokenType::End => format!("<Index = {index:>3}>: {kind}"),
            TokenType::PreInc | TokenType::PreDec => {
                format!("<Index = {index:>3}>: {kind:<10}, {:<6} = \"{}\"", "symbol", token.token_type)
            }
            other => {
                format!("<Index = {index:>3}>: {kind:<10}, {:<6} = '{}'", "symbol", other)
            }
        };
        output.push_str(&line);
        output.push('\n');
    }

    output
}
