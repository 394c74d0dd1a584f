//! A one-token lookahead cursor over the lexer.

use std::mem;

use crate::{
    errors::errors::{Error, ParseError},
    lexer::{
        lexer::Lexer,
        tokens::{Token, TokenKind},
    },
    Position, Span,
};

/// Cursor over the lexer's output.
///
/// Holds the current (not yet consumed) token and the end of the last
/// consumed one. It never rewinds: once a token is advanced past it is gone.
pub struct TokenStream {
    lexer: Lexer,
    current: Token,
    previous_end: Position,
    previous_kind: Option<TokenKind>,
}

impl TokenStream {
    pub fn new(mut lexer: Lexer) -> Result<Self, Error> {
        let current = lexer.next_token()?;
        Ok(Self::with_first(lexer, current))
    }

    /// Like [`TokenStream::new`], but records lex errors in front of the
    /// first token and keeps going.
    pub fn new_collecting(mut lexer: Lexer, errors: &mut Vec<Error>) -> Self {
        let current = loop {
            match lexer.next_token() {
                Ok(token) => break token,
                Err(error) => errors.push(error),
            }
        };
        Self::with_first(lexer, current)
    }

    fn with_first(lexer: Lexer, current: Token) -> Self {
        let previous_end = Position(0, current.span.start.1.clone());
        TokenStream {
            lexer,
            current,
            previous_end,
            previous_kind: None,
        }
    }

    pub fn peek(&self) -> &Token {
        &self.current
    }

    pub fn peek_kind(&self) -> TokenKind {
        self.current.kind
    }

    pub fn is_at_end(&self) -> bool {
        self.current.kind == TokenKind::EOF
    }

    /// Consumes the current token and returns it.
    ///
    /// If lexing the following token fails nothing is consumed, but the lexer
    /// has already moved past the bad input.
    pub fn advance(&mut self) -> Result<Token, Error> {
        let next = self.lexer.next_token()?;
        let previous = mem::replace(&mut self.current, next);
        self.previous_end = previous.span.end.clone();
        self.previous_kind = Some(previous.kind);
        Ok(previous)
    }

    /// Consumes one token, recording any lex errors met on the way.
    pub fn skip(&mut self, errors: &mut Vec<Error>) {
        loop {
            match self.advance() {
                Ok(_) => return,
                Err(error) => errors.push(error),
            }
        }
    }

    pub fn expect(&mut self, kind: TokenKind) -> Result<Token, Error> {
        if self.current.kind == kind {
            self.advance()
        } else {
            Err(self.missing(kind, vec![kind]))
        }
    }

    /// An error for a required `kind` that is not the current token. The span
    /// starts right after the last consumed token, where `kind` belongs.
    pub fn missing(&self, kind: TokenKind, expected: Vec<TokenKind>) -> Error {
        let found = self.current.describe();
        let error = match kind {
            TokenKind::Semicolon => ParseError::ExpectedSemicolon { found },
            TokenKind::CloseParen => ParseError::ExpectedCloseParen { found },
            _ if self.is_at_end() => ParseError::UnexpectedEndOfInput,
            _ => ParseError::ExpectedToken {
                expected: kind,
                found,
            },
        };

        let span = Span {
            start: self.previous_end.clone(),
            end: self.current.span.end.clone(),
        };
        Error::new(error, span).with_expected(expected)
    }

    /// Kind of the most recently consumed token, `None` before the first.
    pub fn previous_kind(&self) -> Option<TokenKind> {
        self.previous_kind
    }

    /// Span from `start` to the end of the most recently consumed token.
    pub fn span_from(&self, start: &Position) -> Span {
        Span {
            start: start.clone(),
            end: self.previous_end.clone(),
        }
    }
}
