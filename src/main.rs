use std::{fs::read_to_string, path::PathBuf, process::ExitCode, time::Instant};

use clap::Parser;
use jam::{
    errors::errors::Error,
    lexer::lexer::Lexer,
    parser::parser::{parse, parse_recovering},
    Diagnostic,
};
use tracing::{debug, warn};
use tracing_subscriber::{fmt, EnvFilter};

/// Parse Jam source files and report syntax errors.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Source file to parse
    file: PathBuf,

    /// Print the token stream instead of parsing
    #[arg(short, long)]
    tokens: bool,

    /// Include comments when printing tokens
    #[arg(long, requires = "tokens")]
    trivia: bool,

    /// Print the parsed file back as canonical source
    #[arg(short, long)]
    print: bool,

    /// Keep parsing after an error and report every error found
    #[arg(short, long)]
    recover: bool,
}

fn main() -> ExitCode {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let source = match read_to_string(&args.file) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("Failed to read {}: {}", args.file.display(), error);
            return ExitCode::FAILURE;
        }
    };
    let file_name = args.file.to_string_lossy().to_string();

    if args.tokens {
        return dump_tokens(&source, file_name, args.trivia);
    }

    let start = Instant::now();

    let (ast, errors) = if args.recover {
        parse_recovering(source.as_str(), Some(file_name))
    } else {
        match parse(source.as_str(), Some(file_name)) {
            Ok(ast) => (ast, vec![]),
            Err(error) => {
                report(&[error], &source);
                return ExitCode::FAILURE;
            }
        }
    };

    debug!(
        elapsed = ?start.elapsed(),
        imports = ast.imports().count(),
        functions = ast.functions().count(),
        "parsed"
    );

    if !errors.is_empty() {
        warn!(count = errors.len(), "errors while parsing");
        report(&errors, &source);
        return ExitCode::FAILURE;
    }

    if args.print {
        print!("{}", ast);
    } else {
        println!("{:#?}", ast);
    }

    ExitCode::SUCCESS
}

fn dump_tokens(source: &str, file_name: String, trivia: bool) -> ExitCode {
    for token in Lexer::new(source, Some(file_name)).with_trivia(trivia) {
        match token {
            Ok(token) => println!("{}", token.debug()),
            Err(error) => {
                report(&[error], source);
                return ExitCode::FAILURE;
            }
        }
    }
    ExitCode::SUCCESS
}

fn report(errors: &[Error], source: &str) {
    for error in errors {
        eprint!("{}", Diagnostic::new(error, source));
    }
}
