//! Integration tests for the public lexing and parsing API.
//!
//! These tests run whole source files through tokenization, parsing,
//! printing and error rendering.

use std::thread;

use jam::{
    ast::{ast::Item, statements::StmtKind},
    errors::errors::{ErrorImpl, LexError, ParseError},
    lexer::{
        lexer::{next_token, tokenize, Lexer},
        tokens::TokenKind,
    },
    parser::parser::{parse, parse_recovering},
    render_error,
};
use pretty_assertions::assert_eq;

const HELLO: &str = include_str!("fixtures/hello.jam");

#[test]
fn test_parse_fixture() {
    let file = parse(HELLO, Some("hello.jam".to_string())).unwrap();

    let names = file.items.iter().map(|item| item.name().name.clone()).collect::<Vec<_>>();
    assert_eq!(names, vec!["std", "write", "count", "main"]);

    let Item::Function(main) = &file.items[3] else {
        panic!("expected main to be a function");
    };
    assert!(main.is_export());
    assert_eq!(main.parameters[0].type_.depth(), 2);

    let statements = &main.body.as_ref().unwrap().statements;
    assert_eq!(statements.len(), 5);
    assert!(matches!(statements[2].kind, StmtKind::While { .. }));
    assert!(matches!(statements[4].kind, StmtKind::Return { .. }));

    assert_eq!(file.span.end.0 as usize, HELLO.len());
    assert_eq!(file.span.start.1.as_str(), "hello.jam");
}

#[test]
fn test_fixture_string_escapes() {
    let tokens = tokenize(HELLO, None).unwrap();
    let greeting = tokens
        .iter()
        .find(|token| token.kind == TokenKind::String && token.value.starts_with("hello"))
        .unwrap();

    assert_eq!(greeting.value, "hello, \"jam\"!\n");
    assert_eq!(greeting.value.len(), 14);
}

#[test]
fn test_tokenize_and_lexer_agree() {
    let collected = tokenize(HELLO, None).unwrap();
    let streamed = Lexer::new(HELLO, None)
        .map(|token| token.unwrap())
        .collect::<Vec<_>>();

    assert_eq!(collected, streamed);
    assert_eq!(collected.last().unwrap().kind, TokenKind::EOF);
}

#[test]
fn test_next_token_walks_the_file() {
    let mut position = 0;
    let mut count = 0;

    loop {
        let (token, next) = next_token(HELLO, position).unwrap();
        if token.kind == TokenKind::EOF {
            break;
        }
        assert!(next > position);
        position = next;
        count += 1;
    }

    assert_eq!(count + 1, tokenize(HELLO, None).unwrap().len());
}

#[test]
fn test_item_spans_relex_to_their_tokens() {
    let file = parse(HELLO, None).unwrap();
    let tokens = tokenize(HELLO, None).unwrap();

    for item in &file.items {
        let span = item.get_span();
        let text = span.text(HELLO).unwrap();

        let relexed = tokenize(text, None)
            .unwrap()
            .into_iter()
            .filter(|token| token.kind != TokenKind::EOF)
            .map(|token| (token.kind, token.value))
            .collect::<Vec<_>>();
        let consumed = tokens
            .iter()
            .filter(|token| token.span.start.0 >= span.start.0 && token.span.end.0 <= span.end.0)
            .filter(|token| token.kind != TokenKind::EOF)
            .map(|token| (token.kind, token.value.clone()))
            .collect::<Vec<_>>();

        assert_eq!(relexed, consumed);
    }
}

#[test]
fn test_printed_fixture_reparses() {
    let file = parse(HELLO, None).unwrap();
    let printed = file.to_string();
    let reparsed = parse(printed.as_str(), None).unwrap();

    assert_eq!(reparsed.to_string(), printed);
    assert_eq!(reparsed.items.len(), file.items.len());
}

#[test]
fn test_render_parse_error() {
    let source = "fn main() {\n    return 1\n}\n";
    let error = parse(source, Some("main.jam".to_string())).unwrap_err();

    assert_eq!(
        error.kind(),
        &ErrorImpl::Parse(ParseError::ExpectedSemicolon {
            found: String::from("}")
        })
    );

    let rendered = render_error(&error, source);
    let lines = rendered.lines().collect::<Vec<_>>();
    assert_eq!(lines[0], "Error: ExpectedSemicolon (expected `;`, found `}`)");
    assert_eq!(lines[1], "-> main.jam");
    assert_eq!(lines[3], "2 | return 1");
    assert_eq!(lines[4], "  | --------^");
}

#[test]
fn test_render_lex_error() {
    let source = "fn main() { var s = \"open";
    let error = parse(source, None).unwrap_err();

    assert_eq!(error.kind(), &ErrorImpl::Lex(LexError::UnterminatedString));
    assert!(render_error(&error, source).contains("-> <input>"));
}

#[test]
fn test_recovering_reports_every_item_error() {
    let source = "
fn ok() {}
fn missing_body();
extern export fn both();
extern fn body() {}
fn call() { (f)(); }
fn also_ok(x: u8) u8 { return x; }
";
    let (file, errors) = parse_recovering(source, None);

    let names = file.items.iter().map(|item| item.name().name.clone()).collect::<Vec<_>>();
    assert_eq!(names, vec!["ok", "also_ok"]);

    let kinds = errors.iter().map(|error| error.get_error_name()).collect::<Vec<_>>();
    assert_eq!(
        kinds,
        vec![
            "MissingFunctionBody",
            "ConflictingModifiers",
            "UnexpectedFunctionBody",
            "InvalidCallTarget",
        ]
    );

    // Errors come back in source order
    let positions = errors.iter().map(|error| error.get_position().0).collect::<Vec<_>>();
    let mut sorted = positions.clone();
    sorted.sort();
    assert_eq!(positions, sorted);
}

#[test]
fn test_concurrent_parsing() {
    let sources = [
        HELLO.to_string(),
        "fn a() {} fn b() {}".to_string(),
        "const x = import(\"x\");".to_string(),
        "fn broken( {}".to_string(),
    ];

    let handles = sources
        .into_iter()
        .map(|source| {
            thread::spawn(move || match parse(source, None) {
                Ok(file) => Ok(file.items.len()),
                Err(error) => Err(error.get_error_name().to_string()),
            })
        })
        .collect::<Vec<_>>();

    let results = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect::<Vec<_>>();

    assert_eq!(
        results,
        vec![
            Ok(4),
            Ok(2),
            Ok(1),
            Err(String::from("ExpectedToken")),
        ]
    );
}
