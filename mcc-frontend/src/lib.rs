//! Mini Compiler - Frontend
//!
//! This crate turns one statement of the mini language into machine
//! instructions:
//! - Lexer: tokenizes a source line
//! - Disambiguation: resolves `+`/`-` into unary signs or binary operators
//! - Parser: builds the AST from a token range and a grammar state
//! - Semantic analysis: checks assignment and increment targets
//! - Codegen: lowers the AST to instructions over numbered registers

pub mod ast;
pub mod codegen;
pub mod disambiguate;
pub mod lexer;
pub mod parser;
pub mod semantic;

pub use ast::{AstPrinter, BinaryOp, Expression, ExpressionKind, UnaryOp};
pub use codegen::{CodeGenerator, CodegenError};
pub use disambiguate::disambiguate;
pub use lexer::{dump_tokens, Lexer, Token, TokenType};
pub use parser::{GrammarState, ParseError, Parser};
pub use semantic::{LvalueContext, SemanticAnalyzer, SemanticError};

use log::debug;
use mcc_codegen::Program;
use mcc_common::{CompilerError, SourceLocation};

/// High-level frontend interface
///
/// Each call handles exactly one line; nothing carries over between
/// statements.
#[derive(Debug, Clone)]
pub struct Frontend {
    filename: String,
}

impl Default for Frontend {
    fn default() -> Self {
        Self::new("<input>")
    }
}

impl Frontend {
    /// Create a frontend that reports locations inside `filename`
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
        }
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Tokenize one line (for `--dump-tokens` and tests)
    pub fn tokenize(&self, line: &str, line_no: u32) -> Result<Vec<Token>, CompilerError> {
        let start = SourceLocation::new(&self.filename, line_no, 1);
        Lexer::at(line, start).tokenize()
    }

    /// Tokenize, disambiguate and parse one line.
    ///
    /// Returns `None` for a blank line or the empty statement `;`.
    pub fn parse_statement(&self, line: &str, line_no: u32) -> Result<Option<Expression>, CompilerError> {
        let mut tokens = self.tokenize(line, line_no)?;
        if tokens.is_empty() {
            return Ok(None);
        }

        disambiguate(&mut tokens);
        Ok(Parser::new(&tokens).parse_statement()?)
    }

    /// Run the whole pipeline on one line
    pub fn compile_statement(&self, line: &str, line_no: u32) -> Result<Program, CompilerError> {
        let Some(expr) = self.parse_statement(line, line_no)? else {
            debug!("line {}: nothing to compile", line_no);
            return Ok(Program::default());
        };

        SemanticAnalyzer::new().check(&expr)?;
        let program = CodeGenerator::new().generate(&expr)?;
        Ok(program)
    }
}
