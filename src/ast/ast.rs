use crate::Span;

use super::{expressions::StringLiteral, statements::Block, types::Type};

/// A name as written in the source.
#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub name: String,
    pub span: Span,
}

/// The root of a parsed file.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFile {
    pub items: Vec<Item>,
    pub span: Span,
}

impl SourceFile {
    pub fn imports(&self) -> impl Iterator<Item = &ImportDecl> {
        self.items.iter().filter_map(|item| match item {
            Item::Import(import) => Some(import),
            Item::Function(_) => None,
        })
    }

    pub fn functions(&self) -> impl Iterator<Item = &FnDecl> {
        self.items.iter().filter_map(|item| match item {
            Item::Function(function) => Some(function),
            Item::Import(_) => None,
        })
    }
}

/// A top-level item.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Import(ImportDecl),
    Function(FnDecl),
}

impl Item {
    pub fn get_span(&self) -> &Span {
        match self {
            Item::Import(import) => &import.span,
            Item::Function(function) => &function.span,
        }
    }

    pub fn name(&self) -> &Identifier {
        match self {
            Item::Import(import) => &import.name,
            Item::Function(function) => &function.name,
        }
    }
}

/// `const name = import("path");`
#[derive(Debug, Clone, PartialEq)]
pub struct ImportDecl {
    pub name: Identifier,
    pub path: StringLiteral,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FnModifier {
    Extern,
    Export,
}

/// A function definition, or an `extern` prototype when `body` is `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct FnDecl {
    pub modifier: Option<FnModifier>,
    pub name: Identifier,
    pub parameters: Vec<Parameter>,
    pub return_type: Option<Type>,
    pub body: Option<Block>,
    pub span: Span,
}

impl FnDecl {
    pub fn is_extern(&self) -> bool {
        self.modifier == Some(FnModifier::Extern)
    }

    pub fn is_export(&self) -> bool {
        self.modifier == Some(FnModifier::Export)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: Identifier,
    pub type_: Type,
    pub span: Span,
}
