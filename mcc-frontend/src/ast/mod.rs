//! Abstract Syntax Tree definitions
//!
//! One statement parses into one [`Expression`]. Each node kind carries
//! exactly the children it uses: binary operators and assignment have two,
//! unary operators and parenthesized groups have one, identifiers and
//! constants have none.

pub mod ops;
pub mod printer;

pub use ops::{BinaryOp, UnaryOp};
pub use printer::AstPrinter;

use mcc_common::SourceSpan;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Expression node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expression {
    pub kind: ExpressionKind,
    pub span: SourceSpan,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExpressionKind {
    Constant(i64),
    Identifier(char),

    /// `( expr )`
    Group(Box<Expression>),

    Unary {
        op: UnaryOp,
        operand: Box<Expression>,
    },

    Binary {
        op: BinaryOp,
        left: Box<Expression>,
        right: Box<Expression>,
    },

    Assign {
        target: Box<Expression>,
        value: Box<Expression>,
    },
}

impl Expression {
    pub fn new(kind: ExpressionKind, span: SourceSpan) -> Self {
        Self { kind, span }
    }

    /// Strip any number of enclosing parentheses
    pub fn unwrap_groups(&self) -> &Expression {
        let mut current = self;
        while let ExpressionKind::Group(inner) = &current.kind {
            current = inner;
        }
        current
    }

    /// The variable this expression names, looking through parentheses
    pub fn as_lvalue(&self) -> Option<char> {
        match self.unwrap_groups().kind {
            ExpressionKind::Identifier(name) => Some(name),
            _ => None,
        }
    }

    /// Direct children in evaluation-independent order
    pub fn children(&self) -> Vec<&Expression> {
        match &self.kind {
            ExpressionKind::Constant(_) | ExpressionKind::Identifier(_) => vec![],
            ExpressionKind::Group(inner) => vec![inner.as_ref()],
            ExpressionKind::Unary { operand, .. } => vec![operand.as_ref()],
            ExpressionKind::Binary { left, right, .. } => vec![left.as_ref(), right.as_ref()],
            ExpressionKind::Assign { target, value } => vec![target.as_ref(), value.as_ref()],
        }
    }

    /// Nesting depth; leaves have depth 0
    pub fn depth(&self) -> usize {
        self.children()
            .into_iter()
            .map(|child| child.depth() + 1)
            .max()
            .unwrap_or(0)
    }
}

/// Compact s-expression form, e.g. `Add(Constant(1), Identifier(x))`
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExpressionKind::Constant(value) => write!(f, "Constant({value})"),
            ExpressionKind::Identifier(name) => write!(f, "Identifier({name})"),
            ExpressionKind::Group(inner) => write!(f, "Paren({inner})"),
            ExpressionKind::Unary { op, operand } => write!(f, "{}({operand})", op.name()),
            ExpressionKind::Binary { op, left, right } => {
                write!(f, "{}({left}, {right})", op.name())
            }
            ExpressionKind::Assign { target, value } => write!(f, "Assign({target}, {value})"),
        }
    }
}
