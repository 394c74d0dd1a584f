use tracing::trace;

use crate::{
    ast::statements::{Block, Stmt, StmtKind},
    errors::errors::{Error, ParseError},
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
};

use super::{parser::Parser, types::parse_type};

/// `{ statement* }`
pub fn parse_block(parser: &mut Parser) -> Result<Block, Error> {
    let start = parser.expect(TokenKind::OpenCurly)?.span.start;
    parser.enter_block();

    let mut statements = Vec::new();
    while parser.current_token_kind() != TokenKind::CloseCurly {
        if !parser.has_tokens() {
            return Err(parser.error_at_current(
                ParseError::ExpectedToken {
                    expected: TokenKind::CloseCurly,
                    found: parser.current_token().describe(),
                },
                &[TokenKind::CloseCurly],
            ));
        }
        statements.push(parse_stmt(parser)?);
    }

    parser.expect(TokenKind::CloseCurly)?;
    parser.exit_block();

    Ok(Block {
        statements,
        span: parser.span_from(&start),
    })
}

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    trace!(kind = ?parser.current_token_kind(), position = parser.get_position().0, "statement");

    match parser.current_token_kind() {
        TokenKind::Const | TokenKind::Var => parse_var_decl_stmt(parser),
        TokenKind::Return => parse_return_stmt(parser),
        TokenKind::If => parse_if_stmt(parser),
        TokenKind::While => parse_while_stmt(parser),
        TokenKind::For => parse_for_stmt(parser),
        TokenKind::Break | TokenKind::Continue => parse_jump_stmt(parser),
        _ => parse_expression_stmt(parser),
    }
}

fn parse_expression_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt {
        span: parser.span_from(&expr.span.start),
        kind: StmtKind::Expression(expr),
    })
}

pub fn parse_var_decl_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start_token = parser.advance()?;
    let is_const = start_token.kind == TokenKind::Const;

    let name = parser.expect_identifier()?;

    let type_ = if parser.current_token_kind() == TokenKind::Colon {
        parser.advance()?;
        Some(parse_type(parser)?)
    } else {
        None
    };

    let value = if parser.current_token_kind() == TokenKind::Assignment {
        parser.advance()?;
        Some(parse_expr(parser, BindingPower::Default)?)
    } else {
        None
    };

    let mut expected = vec![TokenKind::Semicolon];
    if value.is_none() {
        expected.insert(0, TokenKind::Assignment);
        if type_.is_none() {
            expected.insert(0, TokenKind::Colon);
        }
    }
    parser.expect_one_of(TokenKind::Semicolon, &expected)?;

    if type_.is_none() && value.is_none() {
        return Err(Error::new(
            ParseError::ExpectedTypeOrValue {
                name: name.name.clone(),
            },
            name.span.clone(),
        )
        .with_expected(vec![TokenKind::Colon, TokenKind::Assignment]));
    }

    Ok(Stmt {
        span: parser.span_from(&start_token.span.start),
        kind: StmtKind::VarDecl {
            is_const,
            name,
            type_,
            value,
        },
    })
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance()?.span.start;

    let value = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt {
        span: parser.span_from(&start),
        kind: StmtKind::Return { value },
    })
}

/// `if (condition) { .. } else { .. }`. The `else` branch is always a block;
/// `else if` is not accepted.
pub fn parse_if_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance()?.span.start;

    parser.expect(TokenKind::OpenParen)?;
    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    let consequence = parse_block(parser)?;

    let alternative = if parser.current_token_kind() == TokenKind::Else {
        parser.advance()?;
        Some(parse_block(parser)?)
    } else {
        None
    };

    Ok(Stmt {
        span: parser.span_from(&start),
        kind: StmtKind::If {
            condition,
            consequence,
            alternative,
        },
    })
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance()?.span.start;

    parser.expect(TokenKind::OpenParen)?;
    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    let body = parse_block(parser)?;

    Ok(Stmt {
        span: parser.span_from(&start),
        kind: StmtKind::While { condition, body },
    })
}

/// `for variable in start : end { .. }`
pub fn parse_for_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start_position = parser.advance()?.span.start;

    let variable = parser.expect_identifier()?;
    parser.expect(TokenKind::In)?;
    let start = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Colon)?;
    let end = parse_expr(parser, BindingPower::Default)?;

    let body = parse_block(parser)?;

    Ok(Stmt {
        span: parser.span_from(&start_position),
        kind: StmtKind::For {
            variable,
            start,
            end,
            body,
        },
    })
}

/// `break;` or `continue;`
pub fn parse_jump_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let keyword = parser.advance()?;
    parser.expect(TokenKind::Semicolon)?;

    let kind = if keyword.kind == TokenKind::Break {
        StmtKind::Break
    } else {
        StmtKind::Continue
    };

    Ok(Stmt {
        span: parser.span_from(&keyword.span.start),
        kind,
    })
}
