use std::slice::Iter;

use crate::Span;

use super::{ast::Identifier, expressions::Expr, types::Type};

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub statements: Vec<Stmt>,
    pub span: Span,
}

impl Block {
    pub fn iter(&self) -> Iter<'_, Stmt> {
        self.statements.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn get_span(&self) -> &Span {
        &self.span
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    /// `const`/`var` binding; at least one of `type_` and `value` is present.
    VarDecl {
        is_const: bool,
        name: Identifier,
        type_: Option<Type>,
        value: Option<Expr>,
    },
    Return {
        value: Expr,
    },
    If {
        condition: Expr,
        consequence: Block,
        alternative: Option<Block>,
    },
    While {
        condition: Expr,
        body: Block,
    },
    /// `for variable in start : end { ... }`
    For {
        variable: Identifier,
        start: Expr,
        end: Expr,
        body: Block,
    },
    Break,
    Continue,
    Expression(Expr),
}
