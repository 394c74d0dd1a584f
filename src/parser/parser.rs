//! Parser state and the parsing entry points.
//!
//! The parser is plain recursive descent over a [`TokenStream`], with
//! precedence climbing for binary operators. [`parse`] stops at the first
//! error; [`parse_recovering`] skips to the next top-level item after an
//! error and reports everything it found.

use std::rc::Rc;

use tracing::{debug, instrument, trace};

use crate::{
    ast::ast::{Identifier, Item, SourceFile},
    errors::errors::{Error, ParseError},
    lexer::{
        lexer::Lexer,
        tokens::{Token, TokenKind},
    },
    Position, Span,
};

use super::{decl::parse_item, lookups::ITEM_START, stream::TokenStream};

/// The parsing state for one source file.
pub struct Parser {
    /// Cursor over the lexer's tokens
    stream: TokenStream,
    /// The name of the source file being parsed
    file: Rc<String>,
    /// How many blocks are open around the current token
    depth: usize,
}

impl Parser {
    pub fn new(lexer: Lexer) -> Result<Self, Error> {
        let file = Rc::clone(lexer.file());
        Ok(Parser {
            stream: TokenStream::new(lexer)?,
            file,
            depth: 0,
        })
    }

    fn new_collecting(lexer: Lexer, errors: &mut Vec<Error>) -> Self {
        let file = Rc::clone(lexer.file());
        Parser {
            stream: TokenStream::new_collecting(lexer, errors),
            file,
            depth: 0,
        }
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        self.stream.peek()
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.stream.peek_kind()
    }

    /// Advances to the next token and returns the previous token.
    pub fn advance(&mut self) -> Result<Token, Error> {
        self.stream.advance()
    }

    /// Consumes the current token if it is `expected_kind`, or fails.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        self.stream.expect(expected_kind)
    }

    /// Like [`Parser::expect`], reporting `expected` as the accepted set.
    pub fn expect_one_of(
        &mut self,
        expected_kind: TokenKind,
        expected: &[TokenKind],
    ) -> Result<Token, Error> {
        if self.current_token_kind() == expected_kind {
            self.advance()
        } else {
            Err(self.stream.missing(expected_kind, expected.to_vec()))
        }
    }

    pub fn expect_identifier(&mut self) -> Result<Identifier, Error> {
        let token = self.expect(TokenKind::Identifier)?;
        Ok(Identifier {
            name: token.value,
            span: token.span,
        })
    }

    /// An error located at the current token. Errors that only say what was
    /// missing become `UnexpectedEndOfInput` when the input has run out.
    pub fn error_at_current(&self, error: ParseError, expected: &[TokenKind]) -> Error {
        let error = match error {
            ParseError::ExpectedToken { .. }
            | ParseError::ExpectedExpression { .. }
            | ParseError::ExpectedType { .. }
                if self.stream.is_at_end() =>
            {
                ParseError::UnexpectedEndOfInput
            }
            error => error,
        };

        Error::new(error, self.current_token().span.clone()).with_expected(expected.to_vec())
    }

    /// Checks if there are more tokens to parse.
    pub fn has_tokens(&self) -> bool {
        !self.stream.is_at_end()
    }

    /// Returns the start of the current token.
    pub fn get_position(&self) -> Position {
        self.current_token().span.start.clone()
    }

    /// Span from `start` to the end of the last consumed token.
    pub fn span_from(&self, start: &Position) -> Span {
        self.stream.span_from(start)
    }

    pub fn enter_block(&mut self) {
        self.depth += 1;
    }

    pub fn exit_block(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Skips tokens until the start of the next top-level item, tracking
    /// braces so that `const` inside a function body is not mistaken for an
    /// import. An item only starts after the `;` or `}` that ends the one
    /// before it, and never at `failed_at` again.
    pub fn synchronize(&mut self, failed_at: &Position, errors: &mut Vec<Error>) {
        let mut depth = self.depth;
        self.depth = 0;

        let mut at_boundary = matches!(
            self.stream.previous_kind(),
            None | Some(TokenKind::Semicolon | TokenKind::CloseCurly)
        );

        loop {
            let kind = self.current_token_kind();
            let start = self.get_position();
            match kind {
                TokenKind::EOF => break,
                kind if depth == 0
                    && at_boundary
                    && ITEM_START.contains(&kind)
                    && start.0 != failed_at.0 =>
                {
                    break
                }
                TokenKind::OpenCurly => depth += 1,
                TokenKind::CloseCurly => depth = depth.saturating_sub(1),
                _ => {}
            }

            at_boundary =
                depth == 0 && matches!(kind, TokenKind::Semicolon | TokenKind::CloseCurly);
            self.stream.skip(errors);
        }

        debug!(position = self.get_position().0, "resynchronized");
    }

    fn finish(&self, items: Vec<Item>) -> SourceFile {
        let end = self.current_token().span.end.clone();
        SourceFile {
            items,
            span: Span {
                start: Position(0, Rc::clone(&self.file)),
                end,
            },
        }
    }
}

/// Parses a whole source file, stopping at the first error.
#[instrument(skip_all)]
pub fn parse(source: impl Into<String>, file: Option<String>) -> Result<SourceFile, Error> {
    let mut parser = Parser::new(Lexer::new(source, file))?;

    let mut items = vec![];
    while parser.has_tokens() {
        trace!(position = parser.get_position().0, "item");
        items.push(parse_item(&mut parser)?);
    }

    Ok(parser.finish(items))
}

/// Parses a whole source file, resynchronizing at top-level items after an
/// error. Returns every item that parsed cleanly and every error, in source
/// order.
#[instrument(skip_all)]
pub fn parse_recovering(source: impl Into<String>, file: Option<String>) -> (SourceFile, Vec<Error>) {
    let mut errors = vec![];
    let mut parser = Parser::new_collecting(Lexer::new(source, file), &mut errors);

    let mut items = vec![];
    while parser.has_tokens() {
        let start = parser.get_position();
        trace!(position = start.0, "item");

        match parse_item(&mut parser) {
            Ok(item) => items.push(item),
            Err(error) => {
                debug!(error = %error, position = error.get_position().0, "parse error");
                errors.push(error);
                parser.synchronize(&start, &mut errors);
            }
        }
    }

    (parser.finish(items), errors)
}
