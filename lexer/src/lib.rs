//! Lexical scanner for the Selene language.
//!
//! A [`Lexer`] reads chars from any [`PeekOffset`] source and emits
//! [`Token`]s one at a time through [`Tokenize::scan_next`].
//!
//! ```
//! use selene_lexer::{StrLexer, TokenKind, Tokenize};
//!
//! let mut lexer = StrLexer::from_str("x = 1 + 2");
//! let token = lexer.scan_next().unwrap();
//! assert_eq!(token.kind, TokenKind::Identifier);
//! assert_eq!(token.text, "x");
//! ```
mod lexer;
mod ring_buffer;
mod source;
mod str_reader;
mod token;

pub use crate::lexer::{tokenize, Lexer, LexerError, StrLexer, Tokenize, DEFAULT_LOOKAHEAD};
pub use crate::source::{PeekOffset, PeekTooFar, SourceInput, Span};
pub use crate::str_reader::StrPeeker;
pub use crate::token::{operator_kind, Token, TokenKind, OPERATORS};
