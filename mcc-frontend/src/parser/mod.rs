//! Recursive Descent Parser
//!
//! Parses the disambiguated token array of one statement into an
//! [`Expression`]. Every production works on an index range of the token
//! array and picks the operator that becomes the root of that range, so
//! the parser never consumes tokens one by one. Which production runs is
//! chosen by an explicit [`GrammarState`], from lowest to highest
//! precedence:
//!
//! ```text
//! Stmt        := Expr ';' | ';'
//! Expr        := AssignExpr
//! AssignExpr  := UnaryExpr '=' AssignExpr | AddExpr
//! AddExpr     := AddExpr ('+'|'-') MulExpr | MulExpr
//! MulExpr     := MulExpr ('*'|'/'|'%') UnaryExpr | UnaryExpr
//! UnaryExpr   := ('++'|'--'|'+'|'-') UnaryExpr | PostfixExpr
//! PostfixExpr := PostfixExpr ('++'|'--') | PrimaryExpr
//! PrimaryExpr := identifier | constant | '(' Expr ')'
//! ```

pub mod errors;
mod expressions;

use crate::ast::Expression;
use crate::lexer::{Token, TokenType};
use log::debug;
use mcc_common::SourceLocation;
use std::cell::Cell;
use std::ops::Range;

pub use errors::{OperandSide, ParseError};

pub type ParseResult<T> = Result<T, ParseError>;

/// Deepest chain of nested `parse` calls accepted for one statement.
/// Each parenthesis level walks the whole precedence ladder, so this
/// allows about 70 levels of parentheses.
pub const MAX_PARSE_DEPTH: usize = 512;

/// The production to apply to a token range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GrammarState {
    Stmt,
    Expr,
    AssignExpr,
    AddExpr,
    MulExpr,
    UnaryExpr,
    PostfixExpr,
    PrimaryExpr,
}

/// Direction of an operator search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanDirection {
    /// Leftmost match first
    Forward,
    /// Rightmost match first
    Backward,
}

/// Statement parser over a borrowed token array
pub struct Parser<'a> {
    tokens: &'a [Token],
    depth: Cell<usize>,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            depth: Cell::new(0),
        }
    }

    /// Parse the whole token array as one statement.
    ///
    /// Returns `None` for the empty statement `;`.
    pub fn parse_statement(&self) -> ParseResult<Option<Expression>> {
        let statement = self.statement(0..self.tokens.len())?;
        match &statement {
            Some(expr) => debug!("parsed statement: {}", expr),
            None => debug!("parsed empty statement"),
        }
        Ok(statement)
    }

    /// Parse `range` with the production selected by `state`.
    ///
    /// An empty range is an error in every state. In the `Stmt` state an
    /// empty statement is reported as an empty range as well, since the
    /// caller asked for an expression. Nesting deeper than
    /// [`MAX_PARSE_DEPTH`] is rejected at the token where it happens.
    pub fn parse(&self, range: Range<usize>, state: GrammarState) -> ParseResult<Expression> {
        if range.is_empty() {
            return Err(ParseError::EmptyRange {
                location: self.location_at(range.start),
            });
        }

        let depth = self.depth.get();
        if depth >= MAX_PARSE_DEPTH {
            return Err(ParseError::UnexpectedToken {
                expected: "a less deeply nested expression".to_string(),
                found: self.tokens[range.start].clone(),
            });
        }

        self.depth.set(depth + 1);
        let result = self.parse_in_state(range, state);
        self.depth.set(depth);
        result
    }

    fn parse_in_state(&self, range: Range<usize>, state: GrammarState) -> ParseResult<Expression> {
        match state {
            GrammarState::Stmt => {
                let location = self.location_at(range.start);
                self.statement(range)?
                    .ok_or(ParseError::EmptyRange { location })
            }
            GrammarState::Expr => self.parse(range, GrammarState::AssignExpr),
            GrammarState::AssignExpr => self.assign_expr(range),
            GrammarState::AddExpr => self.add_expr(range),
            GrammarState::MulExpr => self.mul_expr(range),
            GrammarState::UnaryExpr => self.unary_expr(range),
            GrammarState::PostfixExpr => self.postfix_expr(range),
            GrammarState::PrimaryExpr => self.primary_expr(range),
        }
    }

    fn statement(&self, range: Range<usize>) -> ParseResult<Option<Expression>> {
        if range.is_empty() {
            return Err(ParseError::EmptyRange {
                location: self.location_at(range.start),
            });
        }

        let last = range.end - 1;
        if self.tokens[last].token_type != TokenType::End {
            return Err(ParseError::MissingTerminator {
                location: self.tokens[last].span.end.clone(),
            });
        }

        if let Some(stray) = (range.start..last).find(|&i| self.tokens[i].token_type == TokenType::End) {
            return Err(ParseError::UnexpectedToken {
                expected: "a single statement per line".to_string(),
                found: self.tokens[stray].clone(),
            });
        }

        if range.start == last {
            return Ok(None);
        }

        self.parse(range.start..last, GrammarState::Expr).map(Some)
    }

    /// Location of the token at `index`, or just past the last token
    pub(crate) fn location_at(&self, index: usize) -> SourceLocation {
        match self.tokens.get(index) {
            Some(token) => token.location(),
            None => self
                .tokens
                .last()
                .map(|token| token.span.end.clone())
                .unwrap_or_else(SourceLocation::dummy),
        }
    }

    /// Find the first token in `direction` that `matcher` accepts while
    /// outside of any parentheses within `range`.
    ///
    /// `(` raises and `)` lowers the depth before the token itself is
    /// tested, whatever the direction, so a closing parenthesis that
    /// balances the range is found at depth 0.
    pub(crate) fn find_at_depth_zero<T>(
        &self,
        range: Range<usize>,
        direction: ScanDirection,
        mut matcher: impl FnMut(TokenType) -> Option<T>,
    ) -> Option<(usize, T)> {
        let indices: Box<dyn Iterator<Item = usize>> = match direction {
            ScanDirection::Forward => Box::new(range),
            ScanDirection::Backward => Box::new(range.rev()),
        };

        let mut depth: i32 = 0;
        for index in indices {
            let kind = self.tokens[index].token_type;
            match kind {
                TokenType::LParen => depth += 1,
                TokenType::RParen => depth -= 1,
                _ => {}
            }

            if depth == 0 {
                if let Some(found) = matcher(kind) {
                    return Some((index, found));
                }
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disambiguate::disambiguate;
    use crate::lexer::Lexer;
    use mcc_common::ParseErrorKind;
    use pretty_assertions::assert_eq;

    fn tokens(input: &str) -> Vec<Token> {
        let mut tokens = Lexer::new(input).tokenize().unwrap();
        disambiguate(&mut tokens);
        tokens
    }

    fn parse(input: &str) -> ParseResult<Option<Expression>> {
        let tokens = tokens(input);
        Parser::new(&tokens).parse_statement()
    }

    fn parse_tree(input: &str) -> String {
        parse(input)
            .unwrap()
            .expect("Expected a non-empty statement")
            .to_string()
    }

    fn parse_error_kind(input: &str) -> ParseErrorKind {
        parse(input).unwrap_err().kind()
    }

    fn is_assign(kind: TokenType) -> Option<()> {
        (kind == TokenType::Assign).then_some(())
    }

    #[test]
    fn test_precedence() {
        assert_eq!(
            parse_tree("1+2*3;"),
            "Add(Constant(1), Mul(Constant(2), Constant(3)))"
        );
        assert_eq!(
            parse_tree("1*2+3;"),
            "Add(Mul(Constant(1), Constant(2)), Constant(3))"
        );
        assert_eq!(
            parse_tree("x=1+2*3;"),
            "Assign(Identifier(x), Add(Constant(1), Mul(Constant(2), Constant(3))))"
        );
    }

    #[test]
    fn test_associativity() {
        assert_eq!(
            parse_tree("x-y-z;"),
            "Sub(Sub(Identifier(x), Identifier(y)), Identifier(z))"
        );
        assert_eq!(
            parse_tree("x/y%z;"),
            "Rem(Div(Identifier(x), Identifier(y)), Identifier(z))"
        );
        assert_eq!(
            parse_tree("x=y=z;"),
            "Assign(Identifier(x), Assign(Identifier(y), Identifier(z)))"
        );
    }

    #[test]
    fn test_parentheses_override_precedence() {
        assert_eq!(
            parse_tree("(1+2)*3;"),
            "Mul(Paren(Add(Constant(1), Constant(2))), Constant(3))"
        );
        assert_eq!(
            parse_tree("x-(y-z);"),
            "Sub(Identifier(x), Paren(Sub(Identifier(y), Identifier(z))))"
        );
        assert_eq!(parse_tree("((x));"), "Paren(Paren(Identifier(x)))");
    }

    #[test]
    fn test_unary_and_postfix() {
        assert_eq!(
            parse_tree("-x+y;"),
            "Add(Minus(Identifier(x)), Identifier(y))"
        );
        assert_eq!(parse_tree("++x;"), "PreInc(Identifier(x))");
        assert_eq!(parse_tree("--++x;"), "PreDec(PreInc(Identifier(x)))");
        assert_eq!(parse_tree("x++;"), "PostInc(Identifier(x))");
        assert_eq!(parse_tree("(x)--;"), "PostDec(Paren(Identifier(x)))");
        assert_eq!(parse_tree("-x++;"), "Minus(PostInc(Identifier(x)))");
        assert_eq!(
            parse_tree("x++ + ++y;"),
            "Add(PostInc(Identifier(x)), PreInc(Identifier(y)))"
        );
        assert_eq!(
            parse_tree("x*-+y;"),
            "Mul(Identifier(x), Minus(Plus(Identifier(y))))"
        );
    }

    #[test]
    fn test_assignment_target_is_unary() {
        assert_eq!(parse_tree("(x)=5;"), "Assign(Paren(Identifier(x)), Constant(5))");
        assert_eq!(parse_tree("1++=2;"), "Assign(PostInc(Constant(1)), Constant(2))");
        // The target cannot contain a binary operator outside parentheses
        assert_eq!(parse_error_kind("x+y=3;"), ParseErrorKind::UnexpectedToken);
    }

    #[test]
    fn test_empty_statement() {
        assert_eq!(parse(";").unwrap(), None);
    }

    #[test]
    fn test_missing_terminator() {
        assert_eq!(parse_error_kind("x=1"), ParseErrorKind::MissingTerminator);
        assert_eq!(parse_error_kind("x=1;y"), ParseErrorKind::MissingTerminator);
    }

    #[test]
    fn test_stray_terminator() {
        let err = parse("x;y;").unwrap_err();
        assert_eq!(err.kind(), ParseErrorKind::UnexpectedToken);
        assert_eq!(err.location().column, 2);
        assert_eq!(parse_error_kind(";;"), ParseErrorKind::UnexpectedToken);
    }

    #[test]
    fn test_incomplete_expressions() {
        let err = parse("x+;").unwrap_err();
        assert_eq!(err.kind(), ParseErrorKind::IncompleteExpression);
        assert_eq!(err.to_string(), "operator '+' is missing its right operand");

        assert_eq!(parse_error_kind("=1;"), ParseErrorKind::IncompleteExpression);
        assert_eq!(parse_error_kind("x=;"), ParseErrorKind::IncompleteExpression);
        assert_eq!(parse_error_kind("*2;"), ParseErrorKind::IncompleteExpression);
        assert_eq!(parse_error_kind("-;"), ParseErrorKind::IncompleteExpression);
        assert_eq!(parse_error_kind("x = ++;"), ParseErrorKind::IncompleteExpression);
    }

    #[test]
    fn test_empty_parentheses() {
        assert_eq!(parse_error_kind("();"), ParseErrorKind::EmptyOrInvertedRange);
        assert_eq!(parse_error_kind("x=();"), ParseErrorKind::EmptyOrInvertedRange);
    }

    #[test]
    fn test_unexpected_tokens() {
        assert_eq!(parse_error_kind("x y;"), ParseErrorKind::UnexpectedToken);
        assert_eq!(parse_error_kind("(x;"), ParseErrorKind::UnexpectedToken);
        assert_eq!(parse_error_kind("x);"), ParseErrorKind::UnexpectedToken);
        assert_eq!(parse_error_kind("x(y);"), ParseErrorKind::UnexpectedToken);
        assert_eq!(parse_error_kind("(x)(y);"), ParseErrorKind::UnexpectedToken);
    }

    #[test]
    fn test_empty_range_in_any_state() {
        let tokens = tokens("x;");
        let parser = Parser::new(&tokens);
        for state in [
            GrammarState::Stmt,
            GrammarState::Expr,
            GrammarState::AssignExpr,
            GrammarState::AddExpr,
            GrammarState::MulExpr,
            GrammarState::UnaryExpr,
            GrammarState::PostfixExpr,
            GrammarState::PrimaryExpr,
        ] {
            let err = parser.parse(1..1, state).unwrap_err();
            assert_eq!(err.kind(), ParseErrorKind::EmptyOrInvertedRange, "{state:?}");
        }
    }

    #[test]
    fn test_depth_zero_scan() {
        // (x=1)=(y=2)
        let tokens: Vec<Token> = [
            TokenType::LParen,
            TokenType::Identifier('x'),
            TokenType::Assign,
            TokenType::Constant(1),
            TokenType::RParen,
            TokenType::Assign,
            TokenType::LParen,
            TokenType::Identifier('y'),
            TokenType::Assign,
            TokenType::Constant(2),
            TokenType::RParen,
            TokenType::End,
        ]
        .into_iter()
        .map(Token::synthetic)
        .collect();
        let parser = Parser::new(&tokens);
        let body = 0..tokens.len() - 1;

        let first = parser.find_at_depth_zero(body.clone(), ScanDirection::Forward, is_assign);
        assert_eq!(first.map(|(index, _)| index), Some(5));

        let last = parser.find_at_depth_zero(body, ScanDirection::Backward, is_assign);
        assert_eq!(last.map(|(index, _)| index), Some(5));

        let nested_only = parser.find_at_depth_zero(0..5, ScanDirection::Forward, is_assign);
        assert_eq!(nested_only, None);
    }

    #[test]
    fn test_deep_nesting_is_rejected() {
        let nested = |levels: usize| format!("{}x{};", "(".repeat(levels), ")".repeat(levels));

        assert_eq!(parse_tree(&nested(3)), "Paren(Paren(Paren(Identifier(x))))");
        assert!(parse(&nested(50)).is_ok());

        let err = parse(&nested(10_000)).unwrap_err();
        assert_eq!(err.kind(), ParseErrorKind::UnexpectedToken);
        assert!(err.to_string().contains("less deeply nested"));

        let signs = format!("{}x;", "+-".repeat(MAX_PARSE_DEPTH));
        assert_eq!(parse_error_kind(&signs), ParseErrorKind::UnexpectedToken);
    }

    #[test]
    fn test_depth_is_restored_after_each_parse() {
        let shallow = tokens("((x));");
        let parser = Parser::new(&shallow);
        for _ in 0..(MAX_PARSE_DEPTH + 1) {
            assert!(parser.parse_statement().unwrap().is_some());
        }

        let levels = 1_000;
        let deep = tokens(&format!("{}x{};", "(".repeat(levels), ")".repeat(levels)));
        let parser = Parser::new(&deep);
        assert!(parser.parse_statement().is_err());
        assert_eq!(
            parser.parse(levels..levels + 1, GrammarState::Expr).unwrap().to_string(),
            "Identifier(x)"
        );
    }
}
