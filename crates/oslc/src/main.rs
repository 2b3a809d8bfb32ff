//! `oslc` — the command-line driver for the OSL shading-language front
//! end: `--input` through the lexer and parser, with optional token/AST
//! dumps and a `--format` flag that recognizes the three target dialects
//! without shipping their emitters.

mod dump;

use std::path::PathBuf;
use std::process::ExitCode;

use ariadne::{Color, Label, Report, ReportKind, Source};
use clap::{Parser, ValueEnum};

use osl_common::Span;
use osl_lexer::{LexError, Lexer};
use osl_parser::{parse, ParseError};

#[derive(Parser)]
#[command(name = "oslc", version, about = "Front end for the OSL shading language")]
struct Cli {
    /// Source file to compile.
    #[arg(long)]
    input: PathBuf,

    /// Dump the token stream to stdout.
    #[arg(long)]
    print_tokens: bool,

    /// Dump the AST to stdout.
    #[arg(long)]
    print_ast: bool,

    /// Target dialect to emit. Accepted, but no emitter ships in this
    /// build.
    #[arg(long)]
    format: Option<Format>,

    /// Output path, required when `--format` is given.
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Hlsl,
    Glsl,
    Metal,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    let source = std::fs::read_to_string(&cli.input)
        .map_err(|e| format!("Failed to open file: {e}"))?;

    let tokens = Lexer::tokenize(&source).map_err(|e| {
        report_lex_error(&cli.input, &source, &e);
        e.to_string()
    })?;

    if cli.print_tokens {
        print!("{}", dump::dump_tokens(&tokens));
    }

    let ast = match parse(&tokens) {
        Ok(ast) => ast,
        Err(e) => {
            report_parse_error(&cli.input, &source, &e);
            if cli.print_ast {
                print_partial(&e);
            }
            return Err(e.to_string());
        }
    };

    if cli.print_ast {
        print!("{}", dump::dump_ast(&ast));
    }

    if let Some(format) = cli.format {
        let Some(output) = &cli.output else {
            return Err("No output file".to_string());
        };
        return Err(emitter_unavailable(format, output));
    }

    Ok(())
}

fn emitter_unavailable(format: Format, _output: &std::path::Path) -> String {
    let name = match format {
        Format::Hlsl => "hlsl",
        Format::Glsl => "glsl",
        Format::Metal => "metal",
    };
    format!("The {name} emitter is not available in this build")
}

/// `parse`'s arena is dropped along with its `Err`, so there is no
/// partial tree left to print once it returns one.
fn print_partial(_e: &ParseError) {
    println!("(no partial AST available: parsing holds no output on error)");
}

fn report_lex_error(path: &std::path::Path, source: &str, err: &LexError) {
    report_span(path, source, err.span, &err.message, "Lex error");
}

fn report_parse_error(path: &std::path::Path, source: &str, err: &ParseError) {
    report_span(path, source, err.span, &err.message, "Parse error");
}

fn report_span(_path: &std::path::Path, source: &str, span: Span, message: &str, label: &str) {
    let start = span.start as usize;
    let end = (span.end as usize).max(start + 1).min(source.len().max(start + 1));
    let range = start..end;

    let _ = Report::<std::ops::Range<usize>>::build(ReportKind::Error, range.clone())
        .with_message(label)
        .with_label(Label::new(range).with_message(message).with_color(Color::Red))
        .finish()
        .eprint(Source::from(source));
}
