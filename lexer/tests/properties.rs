use proptest::prelude::*;
use selene_lexer::{tokenize, LexerError, StrLexer, TokenKind, Tokenize};

proptest! {
    #[test]
    fn identifiers_scan_as_one_token(src in "[a-zA-Z][a-zA-Z0-9_]{0,40}") {
        let tokens = tokenize(&src).unwrap();
        prop_assert_eq!(tokens.len(), 2);
        prop_assert_eq!(tokens[0].kind, TokenKind::Identifier);
        prop_assert_eq!(&tokens[0].text, &src);
        prop_assert_eq!(tokens[1].kind, TokenKind::EndOfStream);
    }

    #[test]
    fn integers_stop_at_first_non_digit(digits in "[0-9]{1,20}", rest in "[a-z_][a-z0-9_]{0,10}") {
        let src = format!("{digits}{rest}");
        let mut lexer = StrLexer::from_str(&src);
        let token = lexer.scan_next().unwrap();
        prop_assert_eq!(token.kind, TokenKind::Integer);
        prop_assert_eq!(token.text, digits);
    }

    #[test]
    fn quoted_text_is_returned_without_quotes(content in "[^'\n]{0,200}") {
        let src = format!("'{content}'");
        let tokens = tokenize(&src).unwrap();
        prop_assert_eq!(tokens[0].kind, TokenKind::StringLiteral);
        prop_assert_eq!(&tokens[0].text, &content);
    }

    #[test]
    fn scanning_is_deterministic(src in "[a-z0-9 +='\"\n!_]{0,60}") {
        prop_assert_eq!(tokenize(&src), tokenize(&src));
    }

    #[test]
    fn errors_leave_the_cursor_on_the_offending_char(prefix in "[a-z]{1,5} ", bad in "[!@#$%^&*]") {
        let src = format!("{prefix}{bad}");
        let mut lexer = StrLexer::from_str(&src);
        lexer.scan_next().unwrap();
        let error = lexer.scan_next().unwrap_err();
        let offset = prefix.chars().count();
        prop_assert_eq!(error.position(), offset);
        prop_assert_eq!(lexer.position().char_index, offset);
        prop_assert!(
            matches!(error, LexerError::UnexpectedCharacter { character, .. } if bad.starts_with(character)),
            "unexpected error {:?}",
            error
        );
    }
}

#[test]
fn end_of_stream_is_sticky() {
    let mut lexer = StrLexer::from_str("a");
    assert_eq!(lexer.scan_next().unwrap().kind, TokenKind::Identifier);
    for _ in 0..5 {
        let token = lexer.scan_next().unwrap();
        assert_eq!(token.kind, TokenKind::EndOfStream);
        assert_eq!(token.text, "");
        assert_eq!(token.span.char_index, 1);
    }
}
