use selene_lexer::LexerError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{}: {source}", .path.display())]
    Lex { path: PathBuf, source: LexerError },

    /// `--keep-going` runs that reported at least one error.
    #[error("{}: {count} unexpected character(s)", .path.display())]
    Recovered { path: PathBuf, count: usize },

    #[error("cannot write tokens: {0}")]
    Output(#[from] std::io::Error),

    #[error("cannot initialize logging: {0}")]
    Logging(String),
}

pub type Result<T> = std::result::Result<T, CliError>;

#[test]
fn test_lex_error_display() {
    use selene_lexer::Span;

    let err = CliError::Lex {
        path: PathBuf::from("main.sel"),
        source: LexerError::UnexpectedCharacter {
            character: '!',
            span: Span {
                line: 2,
                column: 3,
                char_index: 7,
            },
        },
    };
    assert_eq!(
        err.to_string(),
        "main.sel: unexpected character '!' at 2:3 (offset 7)"
    );
}

#[test]
fn test_recovered_display() {
    let err = CliError::Recovered {
        path: PathBuf::from("a.sel"),
        count: 2,
    };
    assert_eq!(err.to_string(), "a.sel: 2 unexpected character(s)");
}
