//! Canonical source printing for the AST.
//!
//! Printing inserts only the parentheses needed to preserve the tree, so
//! parsing printed output gives back the same tree and printing again gives
//! back the same text.

use std::fmt::{self, Display, Formatter, Write};

use crate::parser::lookups::BindingPower;

use super::{
    ast::{FnDecl, FnModifier, ImportDecl, Item, SourceFile},
    expressions::{Expr, ExprKind, StringLiteral},
    statements::{Block, Stmt, StmtKind},
    types::{Type, TypeKind},
};

const INDENT: &str = "    ";

impl Display for SourceFile {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (index, item) in self.items.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            writeln!(f, "{}", item)?;
        }
        Ok(())
    }
}

impl Display for Item {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Item::Import(import) => Display::fmt(import, f),
            Item::Function(function) => Display::fmt(function, f),
        }
    }
}

impl Display for ImportDecl {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "const {} = import({});", self.name.name, self.path)
    }
}

impl Display for FnDecl {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.modifier {
            Some(FnModifier::Extern) => f.write_str("extern ")?,
            Some(FnModifier::Export) => f.write_str("export ")?,
            None => {}
        }

        write!(f, "fn {}(", self.name.name)?;
        for (index, parameter) in self.parameters.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", parameter.name.name, parameter.type_)?;
        }
        f.write_char(')')?;

        if let Some(return_type) = &self.return_type {
            write!(f, " {}", return_type)?;
        }

        match &self.body {
            Some(body) => {
                f.write_char(' ')?;
                write_block(f, body, 0)
            }
            None => f.write_char(';'),
        }
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TypeKind::Primitive(primitive) => f.write_str(primitive.as_str()),
            TypeKind::Array(element) => write!(f, "[]{}", element),
        }
    }
}

impl Display for Block {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_block(f, self, 0)
    }
}

impl Display for Stmt {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_stmt(f, self, 0)
    }
}

fn write_block(f: &mut Formatter<'_>, block: &Block, indent: usize) -> fmt::Result {
    if block.is_empty() {
        return f.write_str("{}");
    }

    f.write_str("{\n")?;
    for stmt in block.iter() {
        f.write_str(&INDENT.repeat(indent + 1))?;
        write_stmt(f, stmt, indent + 1)?;
        f.write_char('\n')?;
    }
    write!(f, "{}}}", INDENT.repeat(indent))
}

fn write_stmt(f: &mut Formatter<'_>, stmt: &Stmt, indent: usize) -> fmt::Result {
    match &stmt.kind {
        StmtKind::VarDecl {
            is_const,
            name,
            type_,
            value,
        } => {
            let keyword = if *is_const { "const" } else { "var" };
            write!(f, "{} {}", keyword, name.name)?;
            if let Some(type_) = type_ {
                write!(f, ": {}", type_)?;
            }
            if let Some(value) = value {
                write!(f, " = {}", value)?;
            }
            f.write_char(';')
        }
        StmtKind::Return { value } => write!(f, "return {};", value),
        StmtKind::If {
            condition,
            consequence,
            alternative,
        } => {
            write!(f, "if ({}) ", condition)?;
            write_block(f, consequence, indent)?;
            if let Some(alternative) = alternative {
                f.write_str(" else ")?;
                write_block(f, alternative, indent)?;
            }
            Ok(())
        }
        StmtKind::While { condition, body } => {
            write!(f, "while ({}) ", condition)?;
            write_block(f, body, indent)
        }
        StmtKind::For {
            variable,
            start,
            end,
            body,
        } => {
            write!(f, "for {} in {} : {} ", variable.name, start, end)?;
            write_block(f, body, indent)
        }
        StmtKind::Break => f.write_str("break;"),
        StmtKind::Continue => f.write_str("continue;"),
        StmtKind::Expression(expr) => write!(f, "{};", expr),
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Binary {
                operator,
                left,
                right,
            } => {
                let power = operator.binding_power();
                write_operand(f, left, |child| child < power)?;
                write!(f, " {} ", operator.as_str())?;
                // Left associative: an equal-strength right operand needs parens
                write_operand(f, right, |child| child <= power)
            }
            ExprKind::Call { callee, arguments } => {
                write!(f, "{}(", callee)?;
                for (index, argument) in arguments.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", argument)?;
                }
                f.write_char(')')
            }
            ExprKind::Member { object, field } => write!(f, "{}.{}", object, field.name),
            ExprKind::Identifier(name) => f.write_str(name),
            ExprKind::Number(value) => write!(f, "{}", value),
            ExprKind::String(value) => write_string(f, value),
            ExprKind::Boolean(value) => write!(f, "{}", value),
        }
    }
}

fn write_operand(
    f: &mut Formatter<'_>,
    operand: &Expr,
    needs_parens: impl Fn(BindingPower) -> bool,
) -> fmt::Result {
    match &operand.kind {
        ExprKind::Binary { operator, .. } if needs_parens(operator.binding_power()) => {
            write!(f, "({})", operand)
        }
        _ => write!(f, "{}", operand),
    }
}

impl Display for StringLiteral {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_string(f, &self.value)
    }
}

fn write_string(f: &mut Formatter<'_>, value: &str) -> fmt::Result {
    f.write_char('"')?;
    for ch in value.chars() {
        match ch {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            '\0' => f.write_str("\\0")?,
            ch if ch.is_ascii_control() => write!(f, "\\x{:02x}", ch as u32)?,
            ch => f.write_char(ch)?,
        }
    }
    f.write_char('"')
}
