//! Statement Lexer
//!
//! Tokenizes one input line into a stream of tokens. Recognises the three
//! character classes of the language (digits, letters, punctuation) and
//! collapses `++`/`--` into single tokens. No sign/operator disambiguation
//! happens here.

pub mod dump;
pub mod token;

pub use dump::dump_tokens;
pub use token::{Token, TokenType};

use log::debug;
use mcc_common::{CompilerError, SourceLocation, SourceSpan};

/// Statement lexer
pub struct Lexer {
    pub(crate) input: Vec<char>,
    pub(crate) position: usize,
    filename: String,
    line: u32,
    column: u32,
}

impl Lexer {
    /// Create a lexer for an anonymous single-line input
    pub fn new(input: &str) -> Self {
        Self::at(input, SourceLocation::new_simple(1, 1))
    }

    /// Create a lexer whose first character sits at `start`
    pub fn at(input: &str, start: SourceLocation) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            filename: start.filename,
            line: start.line,
            column: start.column,
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.current_char()?;
        self.position += 1;
        self.column += 1;
        Some(ch)
    }

    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(&self.filename, self.line, self.column)
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Tokenize a run of decimal digits
    fn tokenize_constant(&mut self) -> Result<TokenType, CompilerError> {
        let start = self.current_location();
        let mut value: i64 = 0;

        while let Some(digit) = self.current_char().and_then(|ch| ch.to_digit(10)) {
            value = value
                .checked_mul(10)
                .and_then(|v| v.checked_add(i64::from(digit)))
                .ok_or_else(|| {
                    CompilerError::lexer_error(
                        "integer constant is too large".to_string(),
                        start.clone(),
                    )
                })?;
            self.advance();
        }

        Ok(TokenType::Constant(value))
    }

    /// `+`/`++` or `-`/`--`
    fn tokenize_sign(&mut self, ch: char) -> TokenType {
        self.advance();
        let doubled = self.current_char() == Some(ch);
        if doubled {
            self.advance();
        }

        match (ch, doubled) {
            ('+', true) => TokenType::PreInc,
            ('+', false) => TokenType::Plus,
            (_, true) => TokenType::PreDec,
            (_, false) => TokenType::Minus,
        }
    }

    /// Get next token, or `None` at the end of the line
    pub fn next_token(&mut self) -> Result<Option<Token>, CompilerError> {
        self.skip_whitespace();

        let start_location = self.current_location();

        let token_type = match self.current_char() {
            None => return Ok(None),

            Some(ch) if ch.is_ascii_digit() => self.tokenize_constant()?,

            Some(ch) if ch.is_ascii_alphabetic() => {
                self.advance();
                TokenType::Identifier(ch)
            }

            Some(ch @ ('+' | '-')) => self.tokenize_sign(ch),

            Some('=') => { self.advance(); TokenType::Assign }
            Some('*') => { self.advance(); TokenType::Mul }
            Some('/') => { self.advance(); TokenType::Div }
            Some('%') => { self.advance(); TokenType::Rem }
            Some('(') => { self.advance(); TokenType::LParen }
            Some(')') => { self.advance(); TokenType::RParen }
            Some(';') => { self.advance(); TokenType::End }

            Some(ch) => {
                return Err(CompilerError::lexer_error(
                    format!("Unexpected character: {:?}", ch),
                    start_location,
                ));
            }
        };

        let span = SourceSpan::new(start_location, self.current_location());
        Ok(Some(Token::new(token_type, span)))
    }

    /// Tokenize the entire line
    pub fn tokenize(&mut self) -> Result<Vec<Token>, CompilerError> {
        let mut tokens = Vec::new();

        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }

        debug!("lexed {} tokens", tokens.len());
        Ok(tokens)
    }
}
