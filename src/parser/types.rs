//! Type annotation parsing.
//!
//! A type is a primitive keyword (`u8` .. `i64`, `bool`, `str`) preceded by
//! any number of `[]` array prefixes. The prefixes are collected in a loop
//! rather than by recursion, then folded inside-out onto the primitive.

use crate::{
    ast::types::{Primitive, Type, TypeKind},
    errors::errors::{Error, ParseError},
    lexer::tokens::TokenKind,
};

use super::{lookups::TYPE_START, parser::Parser};

pub fn parse_type(parser: &mut Parser) -> Result<Type, Error> {
    let mut array_starts = vec![];
    while parser.current_token_kind() == TokenKind::OpenBracket {
        array_starts.push(parser.advance()?.span.start);
        parser.expect(TokenKind::CloseBracket)?;
    }

    let mut type_ = parse_primitive_type(parser)?;

    while let Some(start) = array_starts.pop() {
        type_ = Type {
            span: parser.span_from(&start),
            kind: TypeKind::Array(Box::new(type_)),
        };
    }

    Ok(type_)
}

pub fn parse_primitive_type(parser: &mut Parser) -> Result<Type, Error> {
    let Some(primitive) = Primitive::from_token(parser.current_token_kind()) else {
        return Err(parser.error_at_current(
            ParseError::ExpectedType {
                found: parser.current_token().describe(),
            },
            TYPE_START,
        ));
    };

    let span = parser.advance()?.span;
    Ok(Type {
        kind: TypeKind::Primitive(primitive),
        span,
    })
}
