//! Error types for the front end.
//!
//! - Lexical errors (bad characters, strings and escapes)
//! - Parse errors, each carrying the span where parsing stopped and the
//!   token kinds that would have been accepted there
//! - Human-readable tips used by the diagnostic renderer

pub mod errors;
