//! Top-level items: imports and function declarations.

use crate::{
    ast::{
        ast::{FnDecl, FnModifier, ImportDecl, Item, Parameter},
        expressions::StringLiteral,
    },
    errors::errors::{Error, ParseError},
    lexer::tokens::TokenKind,
};

use super::{
    lookups::{starts_type, ITEM_START, TYPE_START},
    parser::Parser,
    stmt::parse_block,
    types::parse_type,
};

pub fn parse_item(parser: &mut Parser) -> Result<Item, Error> {
    match parser.current_token_kind() {
        TokenKind::Const => parse_import_decl(parser).map(Item::Import),
        TokenKind::Fn | TokenKind::Extern | TokenKind::Export => {
            parse_fn_decl(parser).map(Item::Function)
        }
        _ => Err(parser.error_at_current(
            ParseError::ExpectedToken {
                expected: TokenKind::Fn,
                found: parser.current_token().describe(),
            },
            ITEM_START,
        )),
    }
}

/// `const name = import("path");`
pub fn parse_import_decl(parser: &mut Parser) -> Result<ImportDecl, Error> {
    let start = parser.expect(TokenKind::Const)?.span.start;

    let name = parser.expect_identifier()?;
    parser.expect(TokenKind::Assignment)?;
    parser.expect(TokenKind::Import)?;
    parser.expect(TokenKind::OpenParen)?;

    let path = parser.expect(TokenKind::String)?;

    parser.expect(TokenKind::CloseParen)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(ImportDecl {
        name,
        path: StringLiteral {
            value: path.value,
            span: path.span,
        },
        span: parser.span_from(&start),
    })
}

/// `[extern|export] fn name(params) [type] (block | ;)`
///
/// The return type has no leading arrow, so it is present exactly when the
/// token after `)` can start a type. `extern` functions end in `;`; all
/// others need a body.
pub fn parse_fn_decl(parser: &mut Parser) -> Result<FnDecl, Error> {
    let start = parser.get_position();

    let modifier = match parser.current_token_kind() {
        TokenKind::Extern => Some(FnModifier::Extern),
        TokenKind::Export => Some(FnModifier::Export),
        _ => None,
    };
    if modifier.is_some() {
        parser.advance()?;
        if matches!(parser.current_token_kind(), TokenKind::Extern | TokenKind::Export) {
            return Err(parser.error_at_current(ParseError::ConflictingModifiers, &[TokenKind::Fn]));
        }
    }

    parser.expect(TokenKind::Fn)?;
    let name = parser.expect_identifier()?;
    let parameters = parse_parameter_list(parser)?;

    let return_type = if starts_type(parser.current_token_kind()) {
        Some(parse_type(parser)?)
    } else {
        None
    };

    let is_extern = modifier == Some(FnModifier::Extern);
    let body = match parser.current_token_kind() {
        TokenKind::OpenCurly => {
            let body = parse_block(parser)?;
            if is_extern {
                return Err(Error::new(
                    ParseError::UnexpectedFunctionBody {
                        name: name.name.clone(),
                    },
                    body.span.clone(),
                )
                .with_expected(vec![TokenKind::Semicolon]));
            }
            Some(body)
        }
        TokenKind::Semicolon => {
            let semicolon = parser.advance()?;
            if !is_extern {
                return Err(Error::new(
                    ParseError::MissingFunctionBody {
                        name: name.name.clone(),
                    },
                    semicolon.span,
                )
                .with_expected(vec![TokenKind::OpenCurly]));
            }
            None
        }
        _ => {
            let mut expected = vec![TokenKind::OpenCurly, TokenKind::Semicolon];
            if return_type.is_none() {
                expected.extend_from_slice(TYPE_START);
            }
            return Err(parser.error_at_current(
                ParseError::ExpectedToken {
                    expected: if is_extern {
                        TokenKind::Semicolon
                    } else {
                        TokenKind::OpenCurly
                    },
                    found: parser.current_token().describe(),
                },
                &expected,
            ));
        }
    };

    Ok(FnDecl {
        modifier,
        name,
        parameters,
        return_type,
        body,
        span: parser.span_from(&start),
    })
}

/// `( name: type, ... )` with no trailing comma.
pub fn parse_parameter_list(parser: &mut Parser) -> Result<Vec<Parameter>, Error> {
    parser.expect(TokenKind::OpenParen)?;

    let mut parameters = Vec::new();
    if parser.current_token_kind() != TokenKind::CloseParen {
        loop {
            let name = parser.expect_identifier()?;
            parser.expect(TokenKind::Colon)?;
            let type_ = parse_type(parser)?;

            parameters.push(Parameter {
                span: name.span.to(&type_.span),
                name,
                type_,
            });

            if parser.current_token_kind() == TokenKind::Comma {
                parser.advance()?;
            } else {
                break;
            }
        }
    }

    parser.expect_one_of(TokenKind::CloseParen, &[TokenKind::Comma, TokenKind::CloseParen])?;
    Ok(parameters)
}
