#![allow(clippy::module_inception)]

use std::{
    fmt::{self, Display, Formatter},
    rc::Rc,
};

use crate::errors::errors::{Error, ErrorTip};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

extern crate regex;

/// A byte offset into a named source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position(pub u32, pub Rc<String>);

/// A half-open byte range `[start, end)` in a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: u32, end: u32, file: &Rc<String>) -> Self {
        Span {
            start: Position(start, Rc::clone(file)),
            end: Position(end, Rc::clone(file)),
        }
    }

    /// Joins two spans into one covering both, keeping `self`'s start.
    pub fn to(&self, other: &Span) -> Span {
        Span {
            start: self.start.clone(),
            end: other.end.clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.end.0.saturating_sub(self.start.0) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The slice of `source` this span covers, if it lies within it.
    pub fn text<'a>(&self, source: &'a str) -> Option<&'a str> {
        source.get(self.start.0 as usize..self.end.0 as usize)
    }
}

/// Resolves a byte offset to `(line, line_text, column)`, with a 1-based line
/// and 0-based byte column. An offset equal to the source length (the end of
/// input) resolves to the last line.
pub fn get_line_at_position(source: &str, position: u32) -> Option<(usize, String, usize)> {
    let pos = position as usize;

    if pos > source.len() {
        return None;
    }

    let mut start = 0;
    let mut line_number = 1;

    for line in source.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            let line_pos = pos - start;
            return Some((line_number, line.to_string(), line_pos));
        }

        start = end;
        line_number += 1;
    }

    // End of input: either the source is empty or ends with a newline
    if source.ends_with('\n') || source.is_empty() {
        Some((line_number, String::new(), 0))
    } else {
        let last = source.rsplit('\n').next().unwrap_or_default();
        Some((line_number - 1, last.to_string(), last.len()))
    }
}

/// Formats an error as a caret diagnostic pointing into `source`:
///
/// ```text
/// Error: ExpectedSemicolon (expected `;`, found `}`)
/// -> main.jam
///    |
/// 20 | let a = b }
///    | ----------^
/// ```
pub fn render_error(error: &Error, source: &str) -> String {
    Diagnostic::new(error, source).to_string()
}

/// An error paired with the source it points into. Its `Display` output is
/// the caret diagnostic produced by [`render_error`].
pub struct Diagnostic<'a> {
    error: &'a Error,
    source: &'a str,
}

impl<'a> Diagnostic<'a> {
    pub fn new(error: &'a Error, source: &'a str) -> Self {
        Diagnostic { error, source }
    }
}

impl Display for Diagnostic<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let position = self.error.get_position();

        if let ErrorTip::None = self.error.get_tip() {
            writeln!(f, "Error: {}", self.error.get_error_name())?;
        } else {
            writeln!(f, "Error: {} ({})", self.error.get_error_name(), self.error.get_tip())?;
        }
        writeln!(f, "-> {}", position.1)?;

        let Some((line, line_text, line_pos)) = get_line_at_position(self.source, position.0)
        else {
            return Ok(());
        };

        let line_string = line.to_string();
        let padding = line_string.len() + 2;

        writeln!(f, "{:>padding$}", "|")?;

        let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
        writeln!(f, "{} | {}", line_string, line_text_removed.trim_end())?;

        let arrows = line_pos.saturating_sub(removed_whitespace) + 1;

        writeln!(f, "{:>padding$} {:->arrows$}", "|", "^")
    }
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let start = string.len() - string.trim_start_matches([' ', '\t']).len();

    (String::from(&string[start..]), start)
}
