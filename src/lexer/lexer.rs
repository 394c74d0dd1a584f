use std::rc::Rc;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::trace;

use crate::{
    errors::errors::{Error, LexError},
    Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

/// Handles a pattern match at the lexer's position. Returns `None` for
/// skipped input (whitespace, comments when trivia is off).
pub type RegexHandler = fn(&mut Lexer, &str) -> Result<Option<Token>, Error>;

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

lazy_static! {
    // Tried in order; multi-character operators come before their prefixes.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern { regex: Regex::new("^\\s+").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new("^//[^\n]*").unwrap(), handler: comment_handler },
        RegexPattern { regex: Regex::new("^[a-zA-Z_][a-zA-Z0-9_]*").unwrap(), handler: symbol_handler },
        RegexPattern { regex: Regex::new("^-?[0-9]+").unwrap(), handler: number_handler },
        RegexPattern { regex: Regex::new("^\"").unwrap(), handler: string_handler },
        RegexPattern { regex: Regex::new("^==").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Equals, "==") },
        RegexPattern { regex: Regex::new("^!=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::NotEquals, "!=") },
        RegexPattern { regex: Regex::new("^<=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::LessEquals, "<=") },
        RegexPattern { regex: Regex::new("^>=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::GreaterEquals, ">=") },
        RegexPattern { regex: Regex::new("^=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Assignment, "=") },
        RegexPattern { regex: Regex::new("^<").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Less, "<") },
        RegexPattern { regex: Regex::new("^>").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Greater, ">") },
        RegexPattern { regex: Regex::new("^\\+").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Plus, "+") },
        RegexPattern { regex: Regex::new("^-").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Dash, "-") },
        RegexPattern { regex: Regex::new("^\\.").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Dot, ".") },
        RegexPattern { regex: Regex::new("^;").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";") },
        RegexPattern { regex: Regex::new("^:").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Colon, ":") },
        RegexPattern { regex: Regex::new("^,").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Comma, ",") },
        RegexPattern { regex: Regex::new("^\\(").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(") },
        RegexPattern { regex: Regex::new("^\\)").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")") },
        RegexPattern { regex: Regex::new("^\\{").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenCurly, "{") },
        RegexPattern { regex: Regex::new("^\\}").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseCurly, "}") },
        RegexPattern { regex: Regex::new("^\\[").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenBracket, "[") },
        RegexPattern { regex: Regex::new("^\\]").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseBracket, "]") },
    ];

    // A complete string literal: raw runs or any backslash pair, then the closing quote.
    static ref STRING_LITERAL: Regex = Regex::new(r#"^"(?:[^"\\]|\\(?s:.))*""#).unwrap();
}

/// A lazy tokenizer over one source buffer.
///
/// Each call to [`Lexer::next_token`] skips whitespace and comments and
/// produces the next token; after the end of input it keeps returning `EOF`.
#[derive(Clone)]
pub struct Lexer {
    source: String,
    pos: usize,
    file: Rc<String>,
    trivia: bool,
    last_kind: Option<TokenKind>,
    finished: bool,
}

impl Lexer {
    pub fn new(source: impl Into<String>, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("<input>"))
        };

        Lexer {
            source: source.into(),
            pos: 0,
            file: file_name,
            trivia: false,
            last_kind: None,
            finished: false,
        }
    }

    /// Emit `//` comments as `Comment` tokens instead of skipping them.
    pub fn with_trivia(mut self, trivia: bool) -> Self {
        self.trivia = trivia;
        self
    }

    /// Moves the lexer to `position`, rounded up to a character boundary.
    ///
    /// The input before `position` is lexed again so that the last token
    /// ending there decides how a following `-` is read, exactly as if the
    /// lexer had run from the start.
    pub fn starting_at(mut self, position: usize) -> Self {
        let mut target = position.min(self.source.len());
        while !self.source.is_char_boundary(target) {
            target += 1;
        }

        let mut last_kind = None;
        while self.pos < target {
            match self.next_token() {
                Ok(token) if token.kind == TokenKind::EOF => break,
                Ok(token) if token.span.end.0 as usize > target => break,
                Ok(token) if token.kind != TokenKind::Comment => last_kind = Some(token.kind),
                Ok(_) | Err(_) => {}
            }
        }

        self.pos = target;
        self.last_kind = last_kind;
        self
    }

    pub fn file(&self) -> &Rc<String> {
        &self.file
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn at(&self) -> Option<char> {
        self.remainder().chars().next()
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    pub fn span(&self, start: usize, end: usize) -> Span {
        Span::new(start as u32, end as u32, &self.file)
    }

    /// Creates a token of `len` bytes at the current position and moves past it.
    pub fn emit(&mut self, kind: TokenKind, value: String, len: usize) -> Token {
        let token = MK_TOKEN!(kind, value, self.span(self.pos, self.pos + len));
        self.advance_n(len);
        token
    }

    pub fn next_token(&mut self) -> Result<Token, Error> {
        loop {
            if self.at_eof() {
                return Ok(MK_TOKEN!(
                    TokenKind::EOF,
                    String::from("EOF"),
                    Span {
                        start: Position(self.pos as u32, Rc::clone(&self.file)),
                        end: Position(self.pos as u32, Rc::clone(&self.file)),
                    }
                ));
            }

            let mut found = None;
            for pattern in PATTERNS.iter() {
                if let Some(matched) = pattern.regex.find(self.remainder()) {
                    found = Some((pattern.handler, matched.as_str().to_string()));
                    break;
                }
            }

            let Some((handler, matched)) = found else {
                let start = self.pos;
                let character = self.at().unwrap_or('\0');
                self.advance_n(character.len_utf8());
                return Err(Error::new(
                    LexError::UnrecognisedCharacter { character },
                    self.span(start, self.pos),
                ));
            };

            if let Some(token) = handler(self, &matched)? {
                trace!(kind = ?token.kind, start = token.span.start.0, "token");
                if token.kind != TokenKind::Comment {
                    self.last_kind = Some(token.kind);
                }
                return Ok(token);
            }
        }
    }
}

impl Iterator for Lexer {
    type Item = Result<Token, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let token = self.next_token();
        if matches!(&token, Ok(token) if token.kind == TokenKind::EOF) {
            self.finished = true;
        }
        Some(token)
    }
}

fn skip_handler(lexer: &mut Lexer, matched: &str) -> Result<Option<Token>, Error> {
    lexer.advance_n(matched.len());
    Ok(None)
}

fn comment_handler(lexer: &mut Lexer, matched: &str) -> Result<Option<Token>, Error> {
    if lexer.trivia {
        Ok(Some(lexer.emit(TokenKind::Comment, matched.to_string(), matched.len())))
    } else {
        skip_handler(lexer, matched)
    }
}

fn symbol_handler(lexer: &mut Lexer, matched: &str) -> Result<Option<Token>, Error> {
    let kind = RESERVED_LOOKUP
        .get(matched)
        .copied()
        .unwrap_or(TokenKind::Identifier);

    Ok(Some(lexer.emit(kind, matched.to_string(), matched.len())))
}

fn number_handler(lexer: &mut Lexer, matched: &str) -> Result<Option<Token>, Error> {
    // After an operand, `-` is subtraction: `a-1` is `a - 1`
    if matched.starts_with('-') && lexer.last_kind.is_some_and(|kind| kind.ends_expression()) {
        return Ok(Some(lexer.emit(TokenKind::Dash, String::from("-"), 1)));
    }

    Ok(Some(lexer.emit(TokenKind::Number, matched.to_string(), matched.len())))
}

fn string_handler(lexer: &mut Lexer, _matched: &str) -> Result<Option<Token>, Error> {
    let start = lexer.pos;

    let Some(literal) = STRING_LITERAL.find(lexer.remainder()) else {
        lexer.pos = lexer.source.len();
        return Err(Error::new(LexError::UnterminatedString, lexer.span(start, lexer.pos)));
    };

    let raw_len = literal.len();
    let contents = &literal.as_str()[1..raw_len - 1];

    match decode_escapes(contents) {
        Ok(decoded) => Ok(Some(lexer.emit(TokenKind::String, decoded, raw_len))),
        Err((offset, sequence)) => {
            let escape_start = start + 1 + offset;
            let escape_end = escape_start + sequence.len();
            lexer.advance_n(raw_len);
            Err(Error::new(
                LexError::InvalidEscape { sequence },
                lexer.span(escape_start, escape_end),
            ))
        }
    }
}

/// Decodes the escapes in a string literal's contents. On failure returns the
/// byte offset and text of the offending escape.
pub fn decode_escapes(raw: &str) -> Result<String, (usize, String)> {
    let mut result = String::with_capacity(raw.len());
    let mut chars = raw.char_indices();

    while let Some((index, ch)) = chars.next() {
        if ch != '\\' {
            result.push(ch);
            continue;
        }

        match chars.next() {
            Some((_, 'n')) => result.push('\n'),
            Some((_, 'r')) => result.push('\r'),
            Some((_, 't')) => result.push('\t'),
            Some((_, '\\')) => result.push('\\'),
            Some((_, '0')) => result.push('\0'),
            Some((_, '"')) => result.push('"'),
            Some((_, 'x')) => {
                let hex = raw[index + 2..].chars().take(2).collect::<String>();
                if hex.len() != 2 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
                    return Err((index, format!("\\x{}", hex)));
                }
                chars.next();
                chars.next();

                let byte = u8::from_str_radix(&hex, 16).map_err(|_| (index, format!("\\x{}", hex)))?;
                result.push(byte as char);
            }
            Some((_, other)) => return Err((index, format!("\\{}", other))),
            None => return Err((index, String::from("\\"))),
        }
    }

    Ok(result)
}

/// Lexes the single token at `position` in `source`, returning it together
/// with the offset just past it. The tokens before `position` are taken into
/// account, so walking a source with this function yields the same tokens as
/// [`tokenize`].
pub fn next_token(source: &str, position: usize) -> Result<(Token, usize), Error> {
    let mut lexer = Lexer::new(source, None).starting_at(position);
    let token = lexer.next_token()?;
    Ok((token, lexer.position()))
}

pub fn tokenize(source: impl Into<String>, file: Option<String>) -> Result<Vec<Token>, Error> {
    Lexer::new(source, file).collect()
}
