use crate::lexer::tokens::TokenKind;

/// Operator strength, weakest first. Binary operators climb from `Equality`
/// to `Additive`; calls and member access bind tighter than any of them.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug)]
pub enum BindingPower {
    Default,
    Equality,
    Relational,
    Additive,
    Call,
    Member,
    Primary,
}

impl BindingPower {
    /// The next stronger level, used as the minimum for a left-associative
    /// operator's right operand.
    pub fn next(self) -> BindingPower {
        match self {
            BindingPower::Default => BindingPower::Equality,
            BindingPower::Equality => BindingPower::Relational,
            BindingPower::Relational => BindingPower::Additive,
            BindingPower::Additive => BindingPower::Call,
            BindingPower::Call => BindingPower::Member,
            BindingPower::Member | BindingPower::Primary => BindingPower::Primary,
        }
    }
}

// Token sets reported as "expected" in errors
pub const ITEM_START: &[TokenKind] = &[
    TokenKind::Const,
    TokenKind::Fn,
    TokenKind::Extern,
    TokenKind::Export,
];

pub const EXPRESSION_START: &[TokenKind] = &[
    TokenKind::Identifier,
    TokenKind::Number,
    TokenKind::String,
    TokenKind::True,
    TokenKind::False,
    TokenKind::OpenParen,
];

pub const TYPE_START: &[TokenKind] = &[
    TokenKind::OpenBracket,
    TokenKind::U8,
    TokenKind::U16,
    TokenKind::U32,
    TokenKind::U64,
    TokenKind::I8,
    TokenKind::I16,
    TokenKind::I32,
    TokenKind::I64,
    TokenKind::Bool,
    TokenKind::Str,
];

pub fn starts_type(kind: TokenKind) -> bool {
    kind == TokenKind::OpenBracket || kind.is_primitive_type()
}
