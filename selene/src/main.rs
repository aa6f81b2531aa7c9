use clap::Parser as ArgParser;
use selene_lexer::{StrLexer, TokenKind, Tokenize};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod error;

use crate::error::{CliError, Result};

/// Command line arguments
#[derive(ArgParser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Input file
    #[clap(value_parser)]
    filename: PathBuf,

    /// Run lexer on input file
    #[clap(long, value_parser)]
    lexer: bool,

    /// prefix each token with its line:column
    #[clap(long, value_parser)]
    spans: bool,

    /// report unexpected characters, skip them, and keep scanning
    #[clap(long, value_parser)]
    keep_going: bool,

    /// log debug messages
    #[clap(short, long, value_parser)]
    verbose: bool,

    /// log filter directives (e.g. `selene_lexer=trace`), overrides --verbose
    #[clap(long, value_parser, env = "SELENE_LOG")]
    log: Option<String>,
}

fn init_logging(args: &Args) -> Result<()> {
    let filter = match &args.log {
        Some(directives) => {
            EnvFilter::try_new(directives).map_err(|e| CliError::Logging(e.to_string()))?
        }
        None if args.verbose => EnvFilter::new("debug"),
        None => EnvFilter::new("warn"),
    };
    // stdout is reserved for tokens
    let layer = fmt::layer().with_writer(io::stderr).with_target(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .map_err(|e| CliError::Logging(e.to_string()))
}

fn run(args: &Args, out: &mut impl Write) -> Result<()> {
    if !args.lexer {
        warn!(
            "nothing to do with {}, pass --lexer to print its tokens",
            args.filename.display()
        );
        return Ok(());
    }
    print_tokens(&args.filename, args, out)
}

/// scan `path` and print one line per token,
/// `EndOfStream` excluded.
fn print_tokens(path: &Path, args: &Args, out: &mut impl Write) -> Result<()> {
    let src = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = src.len(), "read source");

    let mut lexer = StrLexer::from_str(&src);
    let mut printed = 0;
    let mut errors = 0;
    loop {
        match lexer.scan_next() {
            Ok(token) if token.kind == TokenKind::EndOfStream => break,
            Ok(token) => {
                if args.spans {
                    write!(out, "{} ", token.span)?;
                }
                writeln!(out, "{token}")?;
                printed += 1;
            }
            Err(source) => {
                let error = CliError::Lex {
                    path: path.to_path_buf(),
                    source,
                };
                if !args.keep_going {
                    return Err(error);
                }
                eprintln!("error: {error}");
                errors += 1;
                lexer.skip_unexpected();
            }
        }
    }
    out.flush()?;
    info!(tokens = printed, errors, "scanned {}", path.display());

    if errors > 0 {
        return Err(CliError::Recovered {
            path: path.to_path_buf(),
            count: errors,
        });
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let result = init_logging(&args).and_then(|()| run(&args, &mut io::stdout().lock()));
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn run_on(content: &str, flags: &[&str]) -> (Result<()>, String) {
        let file = source_file(content);
        let mut argv = vec!["selene".to_string(), file.path().display().to_string()];
        argv.extend(flags.iter().map(|f| f.to_string()));
        let args = Args::parse_from(argv);
        let mut out = Vec::new();
        let result = run(&args, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_cli_parse_flags() {
        let args = Args::parse_from(["selene", "main.sel", "--lexer", "--spans", "-v"]);
        assert_eq!(args.filename, PathBuf::from("main.sel"));
        assert!(args.lexer);
        assert!(args.spans);
        assert!(args.verbose);
        assert!(!args.keep_going);
    }

    #[test]
    fn test_cli_requires_filename() {
        assert!(Args::try_parse_from(["selene", "--lexer"]).is_err());
    }

    #[test]
    fn test_prints_tokens() {
        let (result, out) = run_on("x = 'hi' + 12\n", &["--lexer"]);
        assert!(result.is_ok());
        assert_eq!(
            out,
            "Identifier \"x\"\nAssign \"=\"\nStringLiteral \"hi\"\nPlus \"+\"\nInteger \"12\"\nNewline \"\\n\"\n"
        );
    }

    #[test]
    fn test_prints_spans() {
        let (result, out) = run_on("a\nb", &["--lexer", "--spans"]);
        assert!(result.is_ok());
        assert_eq!(out, "1:1 Identifier \"a\"\n1:2 Newline \"\\n\"\n2:1 Identifier \"b\"\n");
    }

    #[test]
    fn test_without_lexer_flag_prints_nothing() {
        let (result, out) = run_on("x", &[]);
        assert!(result.is_ok());
        assert!(out.is_empty());
    }

    #[test]
    fn test_stops_at_first_error() {
        let (result, out) = run_on("a ! b", &["--lexer"]);
        assert!(matches!(result, Err(CliError::Lex { .. })));
        assert_eq!(out, "Identifier \"a\"\n");
    }

    #[test]
    fn test_keep_going_skips_errors() {
        let (result, out) = run_on("a ! b ?", &["--lexer", "--keep-going"]);
        assert!(matches!(result, Err(CliError::Recovered { count: 2, .. })));
        assert_eq!(out, "Identifier \"a\"\nIdentifier \"b\"\n");
    }

    #[test]
    fn test_missing_file() {
        let args = Args::parse_from(["selene", "/definitely/not/here.sel", "--lexer"]);
        let result = run(&args, &mut Vec::new());
        assert!(matches!(result, Err(CliError::Read { .. })));
    }
}
