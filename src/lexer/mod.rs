//! Lexical analysis for Jam source text.
//!
//! The lexer turns source text into a lazy stream of tokens. It handles:
//!
//! - Recognition of keywords, identifiers, literals, and operators
//! - String escape decoding
//! - Token position tracking for error reporting
//! - Whitespace and `//` comment skipping (comments kept on request)

pub mod lexer;
pub mod tokens;
