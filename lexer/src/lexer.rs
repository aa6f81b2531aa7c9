use super::source::{PeekOffset, SourceInput, Span};
use super::str_reader::StrPeeker;
use super::token::{operator_kind, Token, TokenKind};
use thiserror::Error;
use tracing::{debug, trace};

/// Lookahead window of the in-memory source built by `Lexer::from_str`.
pub const DEFAULT_LOOKAHEAD: usize = 64;

/// A lexer over an utf-8 string.
pub type StrLexer<'src> = Lexer<StrPeeker<'src, DEFAULT_LOOKAHEAD>>;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum LexerError {
    /// No token can start with `character`.
    /// The lexer did not move: `span` points at the offending char.
    #[error("unexpected character {character:?} at {span} (offset {})", .span.char_index)]
    UnexpectedCharacter { character: char, span: Span },
}

impl LexerError {
    /// absolute char offset of the error
    pub fn position(&self) -> usize {
        match self {
            Self::UnexpectedCharacter { span, .. } => span.char_index,
        }
    }

    pub fn character(&self) -> char {
        match self {
            Self::UnexpectedCharacter { character, .. } => *character,
        }
    }
}

/// Anything that emits tokens one at a time.
pub trait Tokenize {
    fn scan_next(&mut self) -> Result<Token, LexerError>;
}

/// This struct handle the lexing
/// (sometimes called "scanning") of its input.
///
/// Each call to `scan_next` classifies the char under the cursor,
/// then reads a whole token. Once the input is exhausted,
/// it keeps returning `EndOfStream` tokens.
///
/// It is generic over its input, as long as it
/// implements the `PeekOffset` trait.
///
/// A Lexer is meant to be driven by a single owner:
/// don't share one across threads without wrapping it in a lock.
pub struct Lexer<T> {
    input: SourceInput<T>,
}

impl<'src, const SIZE: usize> Lexer<StrPeeker<'src, { SIZE }>> {
    /// Build a lexer from an utf-8 string.
    pub fn from_str(src: &'src str) -> Self {
        Self {
            input: SourceInput::from_str(src),
        }
    }
}

impl<T: PeekOffset> Lexer<T> {
    pub fn new(src: T) -> Self {
        Self {
            input: SourceInput::new(src),
        }
    }

    /// Position of the next unconsumed char.
    pub fn position(&self) -> Span {
        self.input.span()
    }

    /// Consume the char under the cursor, whatever it is.
    ///
    /// Meant for callers that want to resume scanning after a
    /// `LexerError::UnexpectedCharacter`.
    pub fn skip_unexpected(&mut self) -> Option<char> {
        self.input.advance()
    }

    fn scan_token(&mut self) -> Result<Token, LexerError> {
        while self.input.peek(0) == Some(' ') {
            self.input.advance();
        }
        let span = self.input.span();

        let c = match self.input.peek(0) {
            Some('\n') => return Ok(self.read_single_char(TokenKind::Newline)),
            Some(c) => c,
            None => return Ok(Token::new(TokenKind::EndOfStream, "", span)),
        };
        if let Some(kind) = operator_kind(c) {
            return Ok(self.read_single_char(kind));
        }
        if let Some(length) = self.string_literal_length(c) {
            return Ok(self.read_string(length));
        }
        if c.is_ascii_digit() {
            return Ok(self.read_integer());
        }
        if self.is_identifier_start(c) {
            return Ok(self.read_identifier());
        }
        if c == '=' {
            return Ok(self.read_single_char(TokenKind::Assign));
        }
        Err(LexerError::UnexpectedCharacter { character: c, span })
    }

    /// If `quote` opens a string literal closed later by the same quote,
    /// return the number of chars between both quotes.
    fn string_literal_length(&mut self, quote: char) -> Option<usize> {
        if quote != '\'' && quote != '"' {
            return None;
        }
        let mut length = 0;
        loop {
            match self.input.peek(length + 1)? {
                c if c == quote => return Some(length),
                _ => length += 1,
            }
        }
    }

    fn is_identifier_start(&mut self, c: char) -> bool {
        c.is_ascii_alphabetic()
            || (c == '_' && matches!(self.input.peek(1), Some(cc) if cc.is_ascii_alphabetic()))
    }

    fn read_single_char(&mut self, kind: TokenKind) -> Token {
        let span = self.input.span();
        let text: String = self.input.advance().into_iter().collect();
        Token::new(kind, text, span)
    }

    fn read_string(&mut self, length: usize) -> Token {
        let span = self.input.span();
        // opening quote
        self.input.advance();
        let mut text = String::with_capacity(length);
        for _ in 0..length {
            text.extend(self.input.advance());
        }
        // closing quote
        self.input.advance();
        Token::new(TokenKind::StringLiteral, text, span)
    }

    fn read_integer(&mut self) -> Token {
        let span = self.input.span();
        let text = self.read_while(|c| c.is_ascii_digit());
        Token::new(TokenKind::Integer, text, span)
    }

    fn read_identifier(&mut self) -> Token {
        let span = self.input.span();
        let mut text = String::new();
        text.extend(self.input.advance());
        text.push_str(&self.read_while(|c| c.is_ascii_alphanumeric() || c == '_'));
        Token::new(TokenKind::Identifier, text, span)
    }

    fn read_while(&mut self, accept: impl Fn(char) -> bool) -> String {
        let mut text = String::new();
        while let Some(c) = self.input.peek(0) {
            if !accept(c) {
                break;
            }
            self.input.advance();
            text.push(c);
        }
        text
    }
}

impl<T: PeekOffset> Tokenize for Lexer<T> {
    fn scan_next(&mut self) -> Result<Token, LexerError> {
        match self.scan_token() {
            Ok(token) => {
                trace!(kind = %token.kind, text = ?token.text, at = %token.span, "scanned token");
                Ok(token)
            }
            Err(error) => {
                debug!(%error, "scanning failed");
                Err(error)
            }
        }
    }
}

/// Scan a whole string, up to and including
/// the `EndOfStream` token.
pub fn tokenize(src: &str) -> Result<Vec<Token>, LexerError> {
    let mut lexer = StrLexer::from_str(src);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.scan_next()?;
        let done = token.kind == TokenKind::EndOfStream;
        tokens.push(token);
        if done {
            return Ok(tokens);
        }
    }
}

#[cfg(test)]
fn scan_first(src: &str) -> Result<Token, LexerError> {
    StrLexer::from_str(src).scan_next()
}

#[cfg(test)]
fn at(char_index: usize) -> Span {
    Span {
        line: 1,
        column: char_index + 1,
        char_index,
    }
}

#[test]
fn should_parse_operator_tokens() {
    for &(op, kind) in super::token::OPERATORS {
        let src = op.to_string();
        let mut lexer = StrLexer::from_str(&src);
        assert_eq!(lexer.scan_next(), Ok(Token::new(kind, src.clone(), at(0))));
        assert_eq!(lexer.position().char_index, 1);
    }
}

#[test]
fn should_parse_newline() {
    let mut lexer = StrLexer::from_str("\n");
    assert_eq!(
        lexer.scan_next(),
        Ok(Token::new(TokenKind::Newline, "\n", at(0)))
    );
    assert_eq!(
        lexer.position(),
        Span {
            line: 2,
            column: 1,
            char_index: 1
        }
    );
}

#[test]
fn should_parse_integer_then_end_of_stream() {
    let mut lexer = StrLexer::from_str("123");
    assert_eq!(
        lexer.scan_next(),
        Ok(Token::new(TokenKind::Integer, "123", at(0)))
    );
    assert_eq!(
        lexer.scan_next(),
        Ok(Token::new(TokenKind::EndOfStream, "", at(3)))
    );
}

#[test]
fn should_parse_string_literals() {
    assert_eq!(
        scan_first("'abc'"),
        Ok(Token::new(TokenKind::StringLiteral, "abc", at(0)))
    );
    assert_eq!(
        scan_first("\"abc\""),
        Ok(Token::new(TokenKind::StringLiteral, "abc", at(0)))
    );
    // the other quote kind is plain content
    assert_eq!(
        scan_first("\"it's\""),
        Ok(Token::new(TokenKind::StringLiteral, "it's", at(0)))
    );
    assert_eq!(
        scan_first("''").map(|t| t.text),
        Ok(String::new())
    );
}

#[test]
fn should_parse_string_literal_longer_than_lookahead() {
    let content = "x".repeat(DEFAULT_LOOKAHEAD * 3);
    let src = format!("'{content}' +");
    let mut lexer = StrLexer::from_str(&src);
    assert_eq!(lexer.scan_next().map(|t| t.text), Ok(content));
    assert_eq!(lexer.scan_next().map(|t| t.kind), Ok(TokenKind::Plus));
}

#[test]
fn should_reject_unterminated_string() {
    let mut lexer = StrLexer::from_str("'abc");
    let expected = Err(LexerError::UnexpectedCharacter {
        character: '\'',
        span: at(0),
    });
    assert_eq!(lexer.scan_next(), expected);
    // nothing was consumed: same failure again
    assert_eq!(lexer.scan_next(), expected);

    // mismatched quotes don't close each other
    assert!(scan_first("'abc\"").is_err());
}

#[test]
fn should_repeat_end_of_stream() {
    let mut lexer = StrLexer::from_str("");
    for _ in 0..3 {
        assert_eq!(
            lexer.scan_next(),
            Ok(Token::new(TokenKind::EndOfStream, "", at(0)))
        );
    }
}

#[test]
fn should_parse_identifier_tokens() {
    for identifier in ["a", "abc", "a1", "a1b2c3", "a1_b2_c3", "_a", "_a_1"] {
        let mut lexer = StrLexer::from_str(identifier);
        assert_eq!(
            lexer.scan_next(),
            Ok(Token::new(TokenKind::Identifier, identifier, at(0)))
        );
        assert_eq!(
            lexer.scan_next().map(|t| t.kind),
            Ok(TokenKind::EndOfStream)
        );
    }
}

#[test]
fn should_stop_integer_at_first_letter() {
    for src in ["1a", "1a2b3c", "1a_2b_3c"] {
        let mut lexer = StrLexer::from_str(src);
        assert_eq!(
            lexer.scan_next(),
            Ok(Token::new(TokenKind::Integer, "1", at(0)))
        );
        assert_eq!(
            lexer.scan_next(),
            Ok(Token::new(TokenKind::Identifier, &src[1..], at(1)))
        );
    }
}

#[test]
fn should_parse_assign() {
    assert_eq!(
        scan_first("="),
        Ok(Token::new(TokenKind::Assign, "=", at(0)))
    );
}

#[test]
fn should_reject_unexpected_character() {
    let error = scan_first("!").unwrap_err();
    assert_eq!(error.position(), 0);
    assert_eq!(error.character(), '!');
    assert_eq!(
        error.to_string(),
        "unexpected character '!' at 1:1 (offset 0)"
    );

    // a lone underscore does not start an identifier
    assert_eq!(
        scan_first("_1"),
        Err(LexerError::UnexpectedCharacter {
            character: '_',
            span: at(0)
        })
    );
    // tabs are not skipped
    assert_eq!(scan_first("\t").map_err(|e| e.character()), Err('\t'));
    // no unicode classification
    assert_eq!(scan_first("é").map_err(|e| e.character()), Err('é'));
}

#[test]
fn should_skip_spaces_only() {
    let mut lexer = StrLexer::from_str("   x = 1 ");
    assert_eq!(
        lexer.scan_next(),
        Ok(Token::new(TokenKind::Identifier, "x", at(3)))
    );
    assert_eq!(
        lexer.scan_next(),
        Ok(Token::new(TokenKind::Assign, "=", at(5)))
    );
    assert_eq!(
        lexer.scan_next(),
        Ok(Token::new(TokenKind::Integer, "1", at(7)))
    );
    assert_eq!(
        lexer.scan_next(),
        Ok(Token::new(TokenKind::EndOfStream, "", at(9)))
    );
}

#[test]
fn should_report_position_after_skipped_spaces() {
    let mut lexer = StrLexer::from_str("a  !");
    assert!(lexer.scan_next().is_ok());
    let error = lexer.scan_next().unwrap_err();
    assert_eq!(error.position(), 3);
    assert_eq!(lexer.position().char_index, 3);
}

#[test]
fn should_resume_after_skipping_unexpected_char() {
    let mut lexer = StrLexer::from_str("a!b");
    assert_eq!(lexer.scan_next().map(|t| t.text), Ok("a".to_string()));
    assert!(lexer.scan_next().is_err());
    assert_eq!(lexer.skip_unexpected(), Some('!'));
    assert_eq!(
        lexer.scan_next(),
        Ok(Token::new(TokenKind::Identifier, "b", at(2)))
    );
}

#[test]
fn should_track_lines_across_tokens() {
    let tokens = tokenize("x = 'hi'\ny + 2").unwrap();
    let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Identifier,
            TokenKind::Assign,
            TokenKind::StringLiteral,
            TokenKind::Newline,
            TokenKind::Identifier,
            TokenKind::Plus,
            TokenKind::Integer,
            TokenKind::EndOfStream,
        ]
    );
    assert_eq!(tokens[2].text, "hi");
    assert_eq!(
        tokens[4].span,
        Span {
            line: 2,
            column: 1,
            char_index: 9
        }
    );
}

#[test]
fn should_be_deterministic() {
    let src = "total = 'a' + _count1\n42";
    assert_eq!(tokenize(src), tokenize(src));
}

#[test]
fn should_scan_without_lookahead_window() {
    let mut lexer = Lexer::<StrPeeker<'_, 0>>::from_str("ab = 'c' + 1");
    let mut kinds = Vec::new();
    loop {
        let token = lexer.scan_next().unwrap();
        kinds.push(token.kind);
        if token.kind == TokenKind::EndOfStream {
            break;
        }
    }
    assert_eq!(
        kinds,
        vec![
            TokenKind::Identifier,
            TokenKind::Assign,
            TokenKind::StringLiteral,
            TokenKind::Plus,
            TokenKind::Integer,
            TokenKind::EndOfStream,
        ]
    );
}

#[test]
fn should_resume_after_long_unterminated_string() {
    // the failed lookahead spills the whole tail out of the source window,
    // scanning must pick it up from there after the quote is skipped
    let content = "x".repeat(DEFAULT_LOOKAHEAD * 3 + 7);
    let src = format!("'{content}");
    let mut lexer = StrLexer::from_str(&src);
    assert_eq!(
        lexer.scan_next(),
        Err(LexerError::UnexpectedCharacter {
            character: '\'',
            span: at(0)
        })
    );
    assert_eq!(lexer.skip_unexpected(), Some('\''));
    assert_eq!(
        lexer.scan_next(),
        Ok(Token::new(TokenKind::Identifier, content.clone(), at(1)))
    );
    for _ in 0..2 {
        assert_eq!(
            lexer.scan_next(),
            Ok(Token::new(
                TokenKind::EndOfStream,
                "",
                at(content.len() + 1)
            ))
        );
    }
}
