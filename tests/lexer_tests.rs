// Integration tests for the tokenizer

use rotor::parser::lexer::{tokenize, Lexer, TokenKind};

#[test]
fn test_only_whitespace_and_comments() {
    for source in [
        "",
        "   \n\t  \r\n",
        "// just a comment",
        "/* a */ /* b /* c */ d */",
        "// one\n  // two\n/* three\n four */\n",
    ] {
        assert!(tokenize(source).is_empty(), "tokens found in {:?}", source);
    }
}

#[test]
fn test_tokens_reproduce_source() {
    let source = "count = fn(a, b: int) {\n  /* sum */ a+b*2; // done\n  print(\"x y\")[0]\n}\n";
    let tokens = tokenize(source);

    let mut cursor = 0;
    let mut rebuilt = String::new();
    for token in &tokens {
        let spelled = token.source_text();
        let start = token.location.offset;
        let gap = &source[cursor..start];
        let trimmed = gap.trim();
        assert!(
            trimmed.is_empty() || trimmed.starts_with("//") || trimmed.starts_with("/*"),
            "unexpected gap {:?}",
            gap
        );
        assert_eq!(&source[start..start + spelled.len()], spelled);

        rebuilt.push_str(gap);
        rebuilt.push_str(&spelled);
        cursor = start + spelled.len();
    }
    rebuilt.push_str(&source[cursor..]);

    assert_eq!(rebuilt, source);
}

#[test]
fn test_offsets_are_bytes() {
    let tokens = tokenize("/* é */ x");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].location.offset, 9);
    assert_eq!(tokens[0].location.column, 9);
}

#[test]
fn test_punctuation_kinds() {
    let kinds: Vec<TokenKind> = tokenize("()[]{},;").iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::LParen,
            TokenKind::RParen,
            TokenKind::LBracket,
            TokenKind::RBracket,
            TokenKind::LBrace,
            TokenKind::RBrace,
            TokenKind::Comma,
            TokenKind::Semicolon,
        ]
    );
    assert!(kinds.iter().all(|k| k.is_punctuation()));
}

#[test]
fn test_non_punctuation_tokens_have_text() {
    for token in tokenize("a 12 + x.y :: z >>= 3") {
        assert!(!token.kind.is_punctuation());
        assert!(!token.text.is_empty());
    }
}

#[test]
fn test_unknown_characters_warn() {
    let mut lexer = Lexer::new("a $ b");
    let texts: Vec<String> = lexer.tokenize().into_iter().map(|t| t.text).collect();
    assert_eq!(texts, vec!["a", "b"]);

    let warning = &lexer.diagnostics()[0];
    assert_eq!(warning.level, log::Level::Warn);
    assert_eq!((warning.location.line, warning.location.column), (1, 3));
}
