//! Unit tests for AST printing.

use std::rc::Rc;

use pretty_assertions::assert_eq;

use crate::{
    ast::{
        ast::SourceFile,
        expressions::{BinaryOp, Expr, ExprKind},
        types::Primitive,
    },
    lexer::tokens::TokenKind,
    parser::{lookups::BindingPower, parser::parse},
    Position, Span,
};

fn parse_ok(source: &str) -> SourceFile {
    match parse(source, None) {
        Ok(file) => file,
        Err(error) => panic!("failed to parse {:?}: {}", source, error),
    }
}

/// Printing, parsing the output and printing again must give the same text.
fn assert_fixed_point(source: &str) -> String {
    let printed = parse_ok(source).to_string();
    let reprinted = parse_ok(&printed).to_string();
    assert_eq!(printed, reprinted);
    printed
}

#[test]
fn test_print_file() {
    let source = "const std=import(\"std\");extern fn puts(s:str)i32;
export fn main(args:[][]u8)i32{var n:u32=0;while(n<10){std.print(n);}return 0;}";

    let expected = "const std = import(\"std\");

extern fn puts(s: str) i32;

export fn main(args: [][]u8) i32 {
    var n: u32 = 0;
    while (n < 10) {
        std.print(n);
    }
    return 0;
}
";

    assert_eq!(parse_ok(source).to_string(), expected);
}

#[test]
fn test_print_control_flow() {
    let source = "fn f() { if (a) { break; } else {} for i in 0 : n + 1 { continue; } }";

    let expected = "fn f() {
    if (a) {
        break;
    } else {}
    for i in 0 : n + 1 {
        continue;
    }
}
";

    assert_eq!(parse_ok(source).to_string(), expected);
}

#[test]
fn test_print_minimal_parentheses() {
    let file = parse_ok("fn f() { return ((a + b)) - (c - d) == (e); }");
    assert_eq!(file.to_string(), "fn f() {\n    return a + b - (c - d) == e;\n}\n");

    let file = parse_ok("fn f() { return (a == b) + 1; }");
    assert_eq!(file.to_string(), "fn f() {\n    return (a == b) + 1;\n}\n");
}

#[test]
fn test_print_escapes() {
    let file = parse_ok(r#"fn f() { g("a\"b\\c\n\t\x01\x41"); }"#);
    assert_eq!(file.to_string(), "fn f() {\n    g(\"a\\\"b\\\\c\\n\\t\\x01A\");\n}\n");
}

#[test]
fn test_print_negative_numbers() {
    let printed = assert_fixed_point("fn f() { return 1 - -2 + f(-3); }");
    assert_eq!(printed, "fn f() {\n    return 1 - -2 + f(-3);\n}\n");
}

#[test]
fn test_printer_fixed_point() {
    assert_fixed_point(
        "const io = import(\"io\");
// comment
extern fn write(fd: i32, buf: []u8) i64;
fn loop_(n: u64) bool {
    const limit: u64 = n - (1 - 2);
    for i in 0 : limit {
        if (i == 3) { continue; }
        io.out.write(i, \"tick\\n\");
    }
    while (true) { break; }
    return a.b(c).d == false;
}",
    );
}

#[test]
fn test_printing_preserves_tree() {
    let source = "fn f() { return a - (b - c) + g(1, 2).h; }";
    let original = parse_ok(source);
    let reparsed = parse_ok(&original.to_string());

    // Spans differ after reformatting, so compare the printed form of each item
    assert_eq!(original.items.len(), reparsed.items.len());
    for (a, b) in original.items.iter().zip(reparsed.items.iter()) {
        assert_eq!(a.to_string(), b.to_string());
    }
}

#[test]
fn test_expr_display() {
    let file = Rc::new(String::from("<test>"));
    let leaf = |kind: ExprKind, start: u32| Expr {
        kind,
        span: Span::new(start, start + 1, &file),
    };

    let expr = Expr {
        kind: ExprKind::Binary {
            operator: BinaryOp::Minus,
            left: Box::new(leaf(ExprKind::Identifier(String::from("x")), 0)),
            right: Box::new(Expr {
                kind: ExprKind::Binary {
                    operator: BinaryOp::Plus,
                    left: Box::new(leaf(ExprKind::Number(1), 4)),
                    right: Box::new(leaf(ExprKind::Boolean(true), 8)),
                },
                span: Span::new(4, 12, &file),
            }),
        },
        span: Span {
            start: Position(0, Rc::clone(&file)),
            end: Position(12, Rc::clone(&file)),
        },
    };

    assert_eq!(expr.to_string(), "x - (1 + true)");
    assert!(!expr.is_callee());
    assert!(!expr.is_member_object());
}

#[test]
fn test_binary_operators() {
    assert_eq!(BinaryOp::from_token(TokenKind::Dash), Some(BinaryOp::Minus));
    assert_eq!(BinaryOp::from_token(TokenKind::Assignment), None);
    assert!(BinaryOp::Equals.binding_power() < BinaryOp::LessEquals.binding_power());
    assert!(BinaryOp::Less.binding_power() < BinaryOp::Plus.binding_power());
    assert_eq!(BinaryOp::Plus.binding_power(), BindingPower::Additive);
}

#[test]
fn test_primitives() {
    assert_eq!(Primitive::from_token(TokenKind::I16), Some(Primitive::I16));
    assert_eq!(Primitive::from_token(TokenKind::Identifier), None);
    assert_eq!(Primitive::Str.as_str(), "str");
}
