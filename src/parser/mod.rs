//! Parser module for building the Abstract Syntax Tree (AST).
//!
//! This module turns the lexer's token stream into a `SourceFile`. It is a
//! hand-written recursive descent parser with precedence climbing for binary
//! operators and handles:
//!
//! - Top-level imports and function declarations
//! - Statement parsing (variable declarations, control flow, expressions)
//! - Expression parsing (binary operators, calls, member access, literals)
//! - Type parsing for annotations
//! - Error reporting, with optional recovery at top-level items

pub mod decl;
pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
pub mod stream;
pub mod types;
