use super::source::Span;
use std::fmt;

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Token {
    pub kind: TokenKind,
    /// exact text consumed for this token,
    /// quotes excluded for string literals.
    pub text: String,
    /// where the token starts
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?}", self.kind, self.text)
    }
}

/// All Token variants accepted by the scanner
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    // litterals
    Integer,
    StringLiteral,
    Identifier,
    // single-character tokens
    Assign,
    Newline,
    Plus,
    EndOfStream,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Single-character operators.
/// New operators only need an entry here (and a `TokenKind`).
pub const OPERATORS: &[(char, TokenKind)] = &[('+', TokenKind::Plus)];

pub fn operator_kind(c: char) -> Option<TokenKind> {
    OPERATORS
        .iter()
        .find(|(op, _)| *op == c)
        .map(|&(_, kind)| kind)
}

#[test]
fn test_operator_lookup() {
    assert_eq!(operator_kind('+'), Some(TokenKind::Plus));
    assert_eq!(operator_kind('='), None);
    assert_eq!(operator_kind('-'), None);
}

#[test]
fn test_token_display() {
    let token = Token::new(TokenKind::StringLiteral, "a b", Span::default());
    assert_eq!(token.to_string(), "StringLiteral \"a b\"");
    let token = Token::new(TokenKind::Newline, "\n", Span::default());
    assert_eq!(token.to_string(), "Newline \"\\n\"");
}
