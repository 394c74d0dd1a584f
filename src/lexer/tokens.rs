use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("const", TokenKind::Const);
        map.insert("var", TokenKind::Var);
        map.insert("fn", TokenKind::Fn);
        map.insert("extern", TokenKind::Extern);
        map.insert("export", TokenKind::Export);
        map.insert("return", TokenKind::Return);
        map.insert("if", TokenKind::If);
        map.insert("else", TokenKind::Else);
        map.insert("while", TokenKind::While);
        map.insert("for", TokenKind::For);
        map.insert("in", TokenKind::In);
        map.insert("break", TokenKind::Break);
        map.insert("continue", TokenKind::Continue);
        map.insert("true", TokenKind::True);
        map.insert("false", TokenKind::False);
        map.insert("import", TokenKind::Import);
        map.insert("u8", TokenKind::U8);
        map.insert("u16", TokenKind::U16);
        map.insert("u32", TokenKind::U32);
        map.insert("u64", TokenKind::U64);
        map.insert("i8", TokenKind::I8);
        map.insert("i16", TokenKind::I16);
        map.insert("i32", TokenKind::I32);
        map.insert("i64", TokenKind::I64);
        map.insert("bool", TokenKind::Bool);
        map.insert("str", TokenKind::Str);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Number,
    String,
    Identifier,
    Comment,

    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    Assignment, // =
    Equals,     // ==
    NotEquals,  // !=

    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    Plus,
    Dash,

    Dot,
    Semicolon,
    Colon,
    Comma,

    // Reserved
    Const,
    Var,
    Fn,
    Extern,
    Export,
    Return,
    If,
    Else,
    While,
    For,
    In,
    Break,
    Continue,
    True,
    False,
    Import,

    // Primitive types
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

/// The broad class a token belongs to.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TokenCategory {
    Keyword,
    Identifier,
    Number,
    String,
    Operator,
    Punctuation,
    Comment,
    EndOfInput,
}

impl TokenKind {
    pub fn category(&self) -> TokenCategory {
        match self {
            TokenKind::EOF => TokenCategory::EndOfInput,
            TokenKind::Number => TokenCategory::Number,
            TokenKind::String => TokenCategory::String,
            TokenKind::Identifier => TokenCategory::Identifier,
            TokenKind::Comment => TokenCategory::Comment,
            TokenKind::Assignment
            | TokenKind::Equals
            | TokenKind::NotEquals
            | TokenKind::Less
            | TokenKind::LessEquals
            | TokenKind::Greater
            | TokenKind::GreaterEquals
            | TokenKind::Plus
            | TokenKind::Dash
            | TokenKind::Dot => TokenCategory::Operator,
            TokenKind::OpenBracket
            | TokenKind::CloseBracket
            | TokenKind::OpenCurly
            | TokenKind::CloseCurly
            | TokenKind::OpenParen
            | TokenKind::CloseParen
            | TokenKind::Semicolon
            | TokenKind::Colon
            | TokenKind::Comma => TokenCategory::Punctuation,
            _ => TokenCategory::Keyword,
        }
    }

    pub fn is_primitive_type(&self) -> bool {
        matches!(
            self,
            TokenKind::U8
                | TokenKind::U16
                | TokenKind::U32
                | TokenKind::U64
                | TokenKind::I8
                | TokenKind::I16
                | TokenKind::I32
                | TokenKind::I64
                | TokenKind::Bool
                | TokenKind::Str
        )
    }

    /// Whether a token of this kind can be the last token of an expression.
    pub fn ends_expression(&self) -> bool {
        matches!(
            self,
            TokenKind::Identifier
                | TokenKind::Number
                | TokenKind::String
                | TokenKind::True
                | TokenKind::False
                | TokenKind::CloseParen
        )
    }

    /// The fixed source text of this kind, if it has one.
    pub fn as_str(&self) -> Option<&'static str> {
        let text = match self {
            TokenKind::EOF
            | TokenKind::Number
            | TokenKind::String
            | TokenKind::Identifier
            | TokenKind::Comment => return None,
            TokenKind::OpenBracket => "[",
            TokenKind::CloseBracket => "]",
            TokenKind::OpenCurly => "{",
            TokenKind::CloseCurly => "}",
            TokenKind::OpenParen => "(",
            TokenKind::CloseParen => ")",
            TokenKind::Assignment => "=",
            TokenKind::Equals => "==",
            TokenKind::NotEquals => "!=",
            TokenKind::Less => "<",
            TokenKind::LessEquals => "<=",
            TokenKind::Greater => ">",
            TokenKind::GreaterEquals => ">=",
            TokenKind::Plus => "+",
            TokenKind::Dash => "-",
            TokenKind::Dot => ".",
            TokenKind::Semicolon => ";",
            TokenKind::Colon => ":",
            TokenKind::Comma => ",",
            TokenKind::Const => "const",
            TokenKind::Var => "var",
            TokenKind::Fn => "fn",
            TokenKind::Extern => "extern",
            TokenKind::Export => "export",
            TokenKind::Return => "return",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::While => "while",
            TokenKind::For => "for",
            TokenKind::In => "in",
            TokenKind::Break => "break",
            TokenKind::Continue => "continue",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::Import => "import",
            TokenKind::U8 => "u8",
            TokenKind::U16 => "u16",
            TokenKind::U32 => "u32",
            TokenKind::U64 => "u64",
            TokenKind::I8 => "i8",
            TokenKind::I16 => "i16",
            TokenKind::I32 => "i32",
            TokenKind::I64 => "i64",
            TokenKind::Bool => "bool",
            TokenKind::Str => "str",
        };
        Some(text)
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.as_str() {
            Some(text) => write!(f, "`{}`", text),
            None => write!(f, "{:?}", self),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Raw text for most tokens; the decoded contents for strings.
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token {{\nkind: {},\nvalue: {}}}", self.kind, self.value)
    }
}

impl Token {
    pub fn is_one_of_many(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.kind)
    }

    /// A short rendering of the token for diagnostics.
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::EOF => String::from("end of input"),
            TokenKind::String => format!("{:?}", self.value),
            _ => self.value.clone(),
        }
    }

    pub fn debug(&self) -> String {
        if self.is_one_of_many(&[
            TokenKind::String,
            TokenKind::Identifier,
            TokenKind::Number,
            TokenKind::Comment,
        ]) {
            format!("{:?} ({:?}) {}..{}", self.kind, self.value, self.span.start.0, self.span.end.0)
        } else {
            format!("{:?} {}..{}", self.kind, self.span.start.0, self.span.end.0)
        }
    }
}
