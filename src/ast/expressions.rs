use crate::{lexer::tokens::TokenKind, parser::lookups::BindingPower, Span};

use super::ast::Identifier;

#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Binary {
        operator: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// `callee` is an identifier or member expression.
    Call {
        callee: Box<Expr>,
        arguments: Vec<Expr>,
    },
    Member {
        object: Box<Expr>,
        field: Identifier,
    },
    Identifier(String),
    Number(i64),
    String(String),
    Boolean(bool),
}

impl Expr {
    pub fn get_span(&self) -> &Span {
        &self.span
    }

    /// Whether this expression may be called: a name or a member access.
    pub fn is_callee(&self) -> bool {
        matches!(self.kind, ExprKind::Identifier(_) | ExprKind::Member { .. })
    }

    /// Whether a `.field` suffix may follow this expression. Call results
    /// can be accessed but not called again.
    pub fn is_member_object(&self) -> bool {
        self.is_callee() || matches!(self.kind, ExprKind::Call { .. })
    }
}

/// A string literal with its escapes decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct StringLiteral {
    pub value: String,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Equals,
    NotEquals,
    Less,
    LessEquals,
    Greater,
    GreaterEquals,
    Plus,
    Minus,
}

impl BinaryOp {
    pub fn from_token(kind: TokenKind) -> Option<BinaryOp> {
        let op = match kind {
            TokenKind::Equals => BinaryOp::Equals,
            TokenKind::NotEquals => BinaryOp::NotEquals,
            TokenKind::Less => BinaryOp::Less,
            TokenKind::LessEquals => BinaryOp::LessEquals,
            TokenKind::Greater => BinaryOp::Greater,
            TokenKind::GreaterEquals => BinaryOp::GreaterEquals,
            TokenKind::Plus => BinaryOp::Plus,
            TokenKind::Dash => BinaryOp::Minus,
            _ => return None,
        };
        Some(op)
    }

    pub fn binding_power(&self) -> BindingPower {
        match self {
            BinaryOp::Equals | BinaryOp::NotEquals => BindingPower::Equality,
            BinaryOp::Less | BinaryOp::LessEquals | BinaryOp::Greater | BinaryOp::GreaterEquals => {
                BindingPower::Relational
            }
            BinaryOp::Plus | BinaryOp::Minus => BindingPower::Additive,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOp::Equals => "==",
            BinaryOp::NotEquals => "!=",
            BinaryOp::Less => "<",
            BinaryOp::LessEquals => "<=",
            BinaryOp::Greater => ">",
            BinaryOp::GreaterEquals => ">=",
            BinaryOp::Plus => "+",
            BinaryOp::Minus => "-",
        }
    }
}
