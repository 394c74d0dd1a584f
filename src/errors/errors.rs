use std::fmt::Display;

use thiserror::Error;

use crate::{lexer::tokens::TokenKind, Position, Span};

#[derive(Error, Debug, Clone, PartialEq)]
#[error("{internal_error}")]
pub struct Error {
    internal_error: ErrorImpl,
    span: Span,
    expected: Vec<TokenKind>,
}

impl Error {
    pub fn new(error_impl: impl Into<ErrorImpl>, span: Span) -> Self {
        Error {
            internal_error: error_impl.into(),
            span,
            expected: vec![],
        }
    }

    /// Attaches the set of token kinds that would have been accepted.
    pub fn with_expected(mut self, expected: Vec<TokenKind>) -> Self {
        self.expected = expected;
        self
    }

    pub fn kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_span(&self) -> &Span {
        &self.span
    }

    pub fn get_position(&self) -> &Position {
        &self.span.start
    }

    pub fn get_expected(&self) -> &[TokenKind] {
        &self.expected
    }

    pub fn is_lex_error(&self) -> bool {
        matches!(self.internal_error, ErrorImpl::Lex(_))
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::Lex(LexError::UnterminatedString) => "UnterminatedString",
            ErrorImpl::Lex(LexError::InvalidEscape { .. }) => "InvalidEscape",
            ErrorImpl::Lex(LexError::UnrecognisedCharacter { .. }) => "UnrecognisedCharacter",
            ErrorImpl::Parse(ParseError::ExpectedToken { .. }) => "ExpectedToken",
            ErrorImpl::Parse(ParseError::ExpectedExpression { .. }) => "ExpectedExpression",
            ErrorImpl::Parse(ParseError::ExpectedCloseParen { .. }) => "ExpectedCloseParen",
            ErrorImpl::Parse(ParseError::ExpectedSemicolon { .. }) => "ExpectedSemicolon",
            ErrorImpl::Parse(ParseError::InvalidCallTarget) => "InvalidCallTarget",
            ErrorImpl::Parse(ParseError::UnexpectedEndOfInput) => "UnexpectedEndOfInput",
            ErrorImpl::Parse(ParseError::ConflictingModifiers) => "ConflictingModifiers",
            ErrorImpl::Parse(ParseError::MissingFunctionBody { .. }) => "MissingFunctionBody",
            ErrorImpl::Parse(ParseError::UnexpectedFunctionBody { .. }) => {
                "UnexpectedFunctionBody"
            }
            ErrorImpl::Parse(ParseError::InvalidNumber { .. }) => "InvalidNumber",
            ErrorImpl::Parse(ParseError::ExpectedTypeOrValue { .. }) => "ExpectedTypeOrValue",
            ErrorImpl::Parse(ParseError::ExpectedType { .. }) => "ExpectedType",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::Lex(LexError::UnterminatedString) => ErrorTip::Suggestion(String::from(
                "string literal is missing its closing `\"`",
            )),
            ErrorImpl::Lex(LexError::InvalidEscape { sequence }) => ErrorTip::Suggestion(format!(
                "unknown escape `{}`, expected one of \\n \\r \\t \\\\ \\0 \\\" or \\xHH",
                sequence
            )),
            ErrorImpl::Lex(LexError::UnrecognisedCharacter { .. }) => ErrorTip::None,
            ErrorImpl::Parse(ParseError::ExpectedToken { expected, found }) => {
                ErrorTip::Suggestion(format!("expected {}, found `{}`", expected, found))
            }
            ErrorImpl::Parse(ParseError::ExpectedExpression { found }) => {
                ErrorTip::Suggestion(format!("expected an expression, found `{}`", found))
            }
            ErrorImpl::Parse(ParseError::ExpectedCloseParen { found }) => {
                ErrorTip::Suggestion(format!("expected `)`, found `{}`", found))
            }
            ErrorImpl::Parse(ParseError::ExpectedSemicolon { found }) => {
                ErrorTip::Suggestion(format!("expected `;`, found `{}`", found))
            }
            ErrorImpl::Parse(ParseError::ExpectedType { found }) => ErrorTip::Suggestion(format!(
                "expected a type such as `u32` or `[]u8`, found `{}`",
                found
            )),
            ErrorImpl::Parse(ParseError::InvalidCallTarget) => ErrorTip::Suggestion(String::from(
                "only names and member accesses can be called or accessed",
            )),
            ErrorImpl::Parse(ParseError::UnexpectedEndOfInput) => {
                if self.expected.is_empty() {
                    ErrorTip::None
                } else {
                    ErrorTip::Suggestion(format!("expected {}", self.expected_list()))
                }
            }
            ErrorImpl::Parse(ParseError::ConflictingModifiers) => ErrorTip::Suggestion(
                String::from("a function can be `extern` or `export`, not both"),
            ),
            ErrorImpl::Parse(ParseError::MissingFunctionBody { name }) => {
                ErrorTip::Suggestion(format!("function `{}` needs a body", name))
            }
            ErrorImpl::Parse(ParseError::UnexpectedFunctionBody { name }) => ErrorTip::Suggestion(
                format!("extern function `{}` cannot have a body", name),
            ),
            ErrorImpl::Parse(ParseError::InvalidNumber { token }) => ErrorTip::Suggestion(format!(
                "invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::Parse(ParseError::ExpectedTypeOrValue { name }) => {
                ErrorTip::Suggestion(format!(
                    "`{}` needs an explicit type or an initial value",
                    name
                ))
            }
        }
    }

    fn expected_list(&self) -> String {
        self.expected
            .iter()
            .map(|kind| kind.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexError {
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("invalid escape sequence {sequence:?}")]
    InvalidEscape { sequence: String },
    #[error("unrecognised character {character:?}")]
    UnrecognisedCharacter { character: char },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("expected {expected}, found {found:?}")]
    ExpectedToken { expected: TokenKind, found: String },
    #[error("expected expression, found {found:?}")]
    ExpectedExpression { found: String },
    #[error("expected type, found {found:?}")]
    ExpectedType { found: String },
    #[error("expected `)`, found {found:?}")]
    ExpectedCloseParen { found: String },
    #[error("expected `;`, found {found:?}")]
    ExpectedSemicolon { found: String },
    #[error("only identifiers and member expressions can be called or accessed")]
    InvalidCallTarget,
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    #[error("`extern` and `export` cannot be combined")]
    ConflictingModifiers,
    #[error("function {name:?} is missing a body")]
    MissingFunctionBody { name: String },
    #[error("extern function {name:?} cannot have a body")]
    UnexpectedFunctionBody { name: String },
    #[error("error parsing number: {token:?}")]
    InvalidNumber { token: String },
    #[error("variable {name:?} has neither a type nor a value")]
    ExpectedTypeOrValue { name: String },
}
