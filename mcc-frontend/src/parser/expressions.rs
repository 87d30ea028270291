//! Expression productions
//!
//! Binary levels pick their root by scanning for the last operator of the
//! level outside of parentheses, which makes them left-associative.
//! Assignment picks the first `=` instead and recurses to the right.

use super::{GrammarState, OperandSide, ParseError, ParseResult, Parser, ScanDirection};
use crate::ast::{BinaryOp, Expression, ExpressionKind, UnaryOp};
use crate::lexer::{Token, TokenType};
use std::ops::Range;

fn additive_op(kind: TokenType) -> Option<BinaryOp> {
    match kind {
        TokenType::Add => Some(BinaryOp::Add),
        TokenType::Sub => Some(BinaryOp::Sub),
        _ => None,
    }
}

fn multiplicative_op(kind: TokenType) -> Option<BinaryOp> {
    match kind {
        TokenType::Mul => Some(BinaryOp::Mul),
        TokenType::Div => Some(BinaryOp::Div),
        TokenType::Rem => Some(BinaryOp::Rem),
        _ => None,
    }
}

fn prefix_op(kind: TokenType) -> Option<UnaryOp> {
    match kind {
        TokenType::PreInc => Some(UnaryOp::PreIncrement),
        TokenType::PreDec => Some(UnaryOp::PreDecrement),
        TokenType::Plus => Some(UnaryOp::Plus),
        TokenType::Minus => Some(UnaryOp::Minus),
        _ => None,
    }
}

fn postfix_op(kind: TokenType) -> Option<UnaryOp> {
    match kind {
        TokenType::PreInc => Some(UnaryOp::PostIncrement),
        TokenType::PreDec => Some(UnaryOp::PostDecrement),
        _ => None,
    }
}

impl<'a> Parser<'a> {
    /// Parse the operand of `operator`, reporting an empty range as an
    /// incomplete expression rather than an empty one.
    fn operand(
        &self,
        range: Range<usize>,
        state: GrammarState,
        operator: &Token,
        side: OperandSide,
    ) -> ParseResult<Expression> {
        if range.is_empty() {
            return Err(ParseError::IncompleteExpression {
                operator: operator.token_type,
                side,
                location: operator.location(),
            });
        }
        self.parse(range, state)
    }

    pub(super) fn assign_expr(&self, range: Range<usize>) -> ParseResult<Expression> {
        let found = self.find_at_depth_zero(range.clone(), ScanDirection::Forward, |kind| {
            (kind == TokenType::Assign).then_some(())
        });
        let Some((at, ())) = found else {
            return self.parse(range, GrammarState::AddExpr);
        };

        let operator = &self.tokens[at];
        let target = self.operand(range.start..at, GrammarState::UnaryExpr, operator, OperandSide::Left)?;
        let value = self.operand(at + 1..range.end, GrammarState::AssignExpr, operator, OperandSide::Right)?;

        let span = target.span.extend(&value.span);
        Ok(Expression::new(
            ExpressionKind::Assign {
                target: Box::new(target),
                value: Box::new(value),
            },
            span,
        ))
    }

    pub(super) fn add_expr(&self, range: Range<usize>) -> ParseResult<Expression> {
        self.binary_expr(range, GrammarState::AddExpr, GrammarState::MulExpr, additive_op)
    }

    pub(super) fn mul_expr(&self, range: Range<usize>) -> ParseResult<Expression> {
        self.binary_expr(range, GrammarState::MulExpr, GrammarState::UnaryExpr, multiplicative_op)
    }

    /// One left-associative level: `state := state op next | next`
    fn binary_expr(
        &self,
        range: Range<usize>,
        state: GrammarState,
        next: GrammarState,
        classify: fn(TokenType) -> Option<BinaryOp>,
    ) -> ParseResult<Expression> {
        let Some((at, op)) = self.find_at_depth_zero(range.clone(), ScanDirection::Backward, classify) else {
            return self.parse(range, next);
        };

        let operator = &self.tokens[at];
        let left = self.operand(range.start..at, state, operator, OperandSide::Left)?;
        let right = self.operand(at + 1..range.end, next, operator, OperandSide::Right)?;

        let span = left.span.extend(&right.span);
        Ok(Expression::new(
            ExpressionKind::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            },
            span,
        ))
    }

    pub(super) fn unary_expr(&self, range: Range<usize>) -> ParseResult<Expression> {
        let first = &self.tokens[range.start];
        let Some(op) = prefix_op(first.token_type) else {
            return self.parse(range, GrammarState::PostfixExpr);
        };

        let operand = self.operand(range.start + 1..range.end, GrammarState::UnaryExpr, first, OperandSide::Only)?;
        let span = first.span.extend(&operand.span);
        Ok(Expression::new(
            ExpressionKind::Unary {
                op,
                operand: Box::new(operand),
            },
            span,
        ))
    }

    pub(super) fn postfix_expr(&self, range: Range<usize>) -> ParseResult<Expression> {
        let last = &self.tokens[range.end - 1];
        let Some(op) = postfix_op(last.token_type) else {
            return self.parse(range, GrammarState::PrimaryExpr);
        };

        let operand = self.operand(range.start..range.end - 1, GrammarState::PostfixExpr, last, OperandSide::Only)?;
        let span = operand.span.extend(&last.span);
        Ok(Expression::new(
            ExpressionKind::Unary {
                op,
                operand: Box::new(operand),
            },
            span,
        ))
    }

    pub(super) fn primary_expr(&self, range: Range<usize>) -> ParseResult<Expression> {
        let first = &self.tokens[range.start];
        let last = &self.tokens[range.end - 1];

        let closing = self.find_at_depth_zero(range.clone(), ScanDirection::Forward, |kind| {
            (kind == TokenType::RParen).then_some(())
        });
        if let Some((at, ())) = closing {
            if at == range.end - 1 && first.token_type == TokenType::LParen {
                let inner = self.parse(range.start + 1..range.end - 1, GrammarState::Expr)?;
                return Ok(Expression::new(
                    ExpressionKind::Group(Box::new(inner)),
                    first.span.extend(&last.span),
                ));
            }
        }

        if range.len() == 1 {
            let kind = match first.token_type {
                TokenType::Identifier(name) => ExpressionKind::Identifier(name),
                TokenType::Constant(value) => ExpressionKind::Constant(value),
                _ => {
                    return Err(ParseError::UnexpectedToken {
                        expected: "an identifier or a constant".to_string(),
                        found: first.clone(),
                    })
                }
            };
            return Ok(Expression::new(kind, first.span.clone()));
        }

        Err(self.unsplittable(range, closing.map(|(at, ())| at)))
    }

    /// Explain why a multi-token range matched no production.
    fn unsplittable(&self, range: Range<usize>, closing: Option<usize>) -> ParseError {
        let first = &self.tokens[range.start];
        if first.token_type != TokenType::LParen {
            return ParseError::UnexpectedToken {
                expected: "end of operand".to_string(),
                found: self.tokens[range.start + 1].clone(),
            };
        }

        match closing {
            Some(at) if at + 1 < range.end => ParseError::UnexpectedToken {
                expected: "an operator".to_string(),
                found: self.tokens[at + 1].clone(),
            },
            _ => ParseError::UnexpectedToken {
                expected: "a matching ')'".to_string(),
                found: first.clone(),
            },
        }
    }
}
