//! Type annotations as written in source.
//!
//! A type is either one of the fixed primitives or an array of another type,
//! nested to any depth: `[][]u8` is an array of arrays of `u8`.

use crate::{lexer::tokens::TokenKind, Span};

#[derive(Debug, Clone, PartialEq)]
pub struct Type {
    pub kind: TypeKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeKind {
    Primitive(Primitive),
    Array(Box<Type>),
}

impl Type {
    /// Number of array layers around the innermost primitive.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self;
        while let TypeKind::Array(element) = &current.kind {
            depth += 1;
            current = element;
        }
        depth
    }

    pub fn primitive(&self) -> Primitive {
        let mut current = self;
        loop {
            match &current.kind {
                TypeKind::Primitive(primitive) => return *primitive,
                TypeKind::Array(element) => current = element,
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    U8,
    U16,
    U32,
    U64,
    I8,
    I16,
    I32,
    I64,
    Bool,
    Str,
}

impl Primitive {
    pub fn from_token(kind: TokenKind) -> Option<Primitive> {
        let primitive = match kind {
            TokenKind::U8 => Primitive::U8,
            TokenKind::U16 => Primitive::U16,
            TokenKind::U32 => Primitive::U32,
            TokenKind::U64 => Primitive::U64,
            TokenKind::I8 => Primitive::I8,
            TokenKind::I16 => Primitive::I16,
            TokenKind::I32 => Primitive::I32,
            TokenKind::I64 => Primitive::I64,
            TokenKind::Bool => Primitive::Bool,
            TokenKind::Str => Primitive::Str,
            _ => return None,
        };
        Some(primitive)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Primitive::U8 => "u8",
            Primitive::U16 => "u16",
            Primitive::U32 => "u32",
            Primitive::U64 => "u64",
            Primitive::I8 => "i8",
            Primitive::I16 => "i16",
            Primitive::I32 => "i32",
            Primitive::I64 => "i64",
            Primitive::Bool => "bool",
            Primitive::Str => "str",
        }
    }
}
