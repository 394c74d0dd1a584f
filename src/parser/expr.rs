use crate::{
    ast::expressions::{BinaryOp, Expr, ExprKind},
    errors::errors::{Error, ParseError},
    lexer::tokens::TokenKind,
};

use super::{
    lookups::{BindingPower, EXPRESSION_START},
    parser::Parser,
};

/// Parses an expression whose binary operators all bind at least as tightly
/// as `bp`.
pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    let mut left = parse_postfix_expr(parser)?;

    while let Some(operator) = BinaryOp::from_token(parser.current_token_kind()) {
        let binding_power = operator.binding_power();
        if binding_power < bp {
            break;
        }

        parser.advance()?;
        // Left associative: the right side only takes stronger operators
        let right = parse_expr(parser, binding_power.next())?;

        left = Expr {
            span: left.span.to(&right.span),
            kind: ExprKind::Binary {
                operator,
                left: Box::new(left),
                right: Box::new(right),
            },
        };
    }

    Ok(left)
}

/// A primary expression followed by any chain of `.field` and `(args)`.
fn parse_postfix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let (mut expr, mut grouped) = parse_primary_expr(parser)?;

    loop {
        match parser.current_token_kind() {
            TokenKind::Dot => {
                check_chain_target(&expr, grouped, expr.is_member_object())?;
                parser.advance()?;
                let field = parser.expect_identifier()?;

                expr = Expr {
                    span: expr.span.to(&field.span),
                    kind: ExprKind::Member {
                        object: Box::new(expr),
                        field,
                    },
                };
            }
            TokenKind::OpenParen => {
                check_chain_target(&expr, grouped, expr.is_callee())?;
                expr = parse_call_expr(parser, expr)?;
            }
            _ => break,
        }
        grouped = false;
    }

    Ok(expr)
}

fn check_chain_target(expr: &Expr, grouped: bool, allowed: bool) -> Result<(), Error> {
    if grouped || !allowed {
        return Err(Error::new(ParseError::InvalidCallTarget, expr.span.clone()));
    }
    Ok(())
}

/// Returns the expression and whether it was wrapped in parentheses.
pub fn parse_primary_expr(parser: &mut Parser) -> Result<(Expr, bool), Error> {
    let kind = match parser.current_token_kind() {
        TokenKind::Number => {
            let value = parser.current_token().value.parse::<i64>().map_err(|_| {
                parser.error_at_current(
                    ParseError::InvalidNumber {
                        token: parser.current_token().value.clone(),
                    },
                    &[],
                )
            })?;
            ExprKind::Number(value)
        }
        TokenKind::Identifier => ExprKind::Identifier(parser.current_token().value.clone()),
        TokenKind::String => ExprKind::String(parser.current_token().value.clone()),
        TokenKind::True => ExprKind::Boolean(true),
        TokenKind::False => ExprKind::Boolean(false),
        TokenKind::OpenParen => return parse_grouping_expr(parser).map(|expr| (expr, true)),
        _ => {
            return Err(parser.error_at_current(
                ParseError::ExpectedExpression {
                    found: parser.current_token().describe(),
                },
                EXPRESSION_START,
            ))
        }
    };

    let span = parser.advance()?.span;
    Ok((Expr { kind, span }, false))
}

/// `( expr )`. The parentheses vanish from the tree but stay in the span.
pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.expect(TokenKind::OpenParen)?.span.start;
    let mut expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    expr.span = parser.span_from(&start);
    Ok(expr)
}

pub fn parse_call_expr(parser: &mut Parser, callee: Expr) -> Result<Expr, Error> {
    parser.expect(TokenKind::OpenParen)?;

    let mut arguments = vec![];
    if parser.current_token_kind() != TokenKind::CloseParen {
        loop {
            arguments.push(parse_expr(parser, BindingPower::Default)?);

            if parser.current_token_kind() == TokenKind::Comma {
                parser.advance()?;
            } else {
                break;
            }
        }
    }

    parser.expect_one_of(TokenKind::CloseParen, &[TokenKind::Comma, TokenKind::CloseParen])?;

    Ok(Expr {
        span: parser.span_from(&callee.span.start),
        kind: ExprKind::Call {
            callee: Box::new(callee),
            arguments,
        },
    })
}
