//! End-to-end lexing scenarios through the public API

use lexan::config::{
    CategoryTable, DispatchMode, LexicalPreferences, PatternSpec, RecognizerOrder, RuntimeConfig,
    UnterminatedPolicy, WhitespacePolicy,
};
use lexan::{analyze, analyze_with_preferences, Category, Token, TokenSequence};

fn lex_with(source: &str, preferences: LexicalPreferences) -> TokenSequence {
    analyze_with_preferences(source, preferences).unwrap()
}

fn prefs() -> LexicalPreferences {
    LexicalPreferences {
        log_unrecognized: false,
        ..LexicalPreferences::builtin()
    }
}

#[test]
fn test_integer_extraction() {
    let tokens = analyze("892892");
    assert_eq!(
        tokens.as_slice(),
        &[Token::new("892892", Category::Integer, 0, 6)]
    );
}

#[test]
fn test_keyword_prefix_stays_identifier() {
    let tokens = analyze("iffy");
    assert_eq!(tokens.pairs(), vec![(Category::Identifier, "iffy")]);

    let tokens = analyze("if iffy else_ while");
    assert_eq!(
        tokens.pairs(),
        vec![
            (Category::Keyword, "if"),
            (Category::Identifier, "iffy"),
            (Category::Identifier, "else_"),
            (Category::Keyword, "while"),
        ]
    );
}

#[test]
fn test_two_character_relational_precedence() {
    assert_eq!(
        analyze("<=").pairs(),
        vec![(Category::RelationalOperator, "<=")]
    );
    assert_eq!(
        analyze("<").pairs(),
        vec![(Category::RelationalOperator, "<")]
    );
    assert_eq!(
        analyze("= ==").pairs(),
        vec![
            (Category::AssignmentOperator, "="),
            (Category::RelationalOperator, "=="),
        ]
    );
}

#[test]
fn test_string_literal_excludes_quotes() {
    let tokens = analyze("\"abc\"");
    assert_eq!(
        tokens.as_slice(),
        &[Token::new("abc", Category::StringLiteral, 0, 5)]
    );

    let empty = analyze("\"\"");
    assert_eq!(empty.as_slice(), &[Token::new("", Category::StringLiteral, 0, 2)]);
}

#[test]
fn test_empty_string_literal_keeps_a_non_empty_span() {
    let tokens = analyze("x = \"\";");
    assert_eq!(
        tokens.as_slice(),
        &[
            Token::new("x", Category::Identifier, 0, 1),
            Token::new("=", Category::AssignmentOperator, 2, 3),
            Token::new("", Category::StringLiteral, 4, 6),
            Token::new(";", Category::Terminator, 6, 7),
        ]
    );
    assert_eq!(tokens.validate("x = \"\";", WhitespacePolicy::Skip), Ok(()));

    for token in tokens.iter().filter(|t| t.category != Category::StringLiteral) {
        assert!(!token.lexeme.is_empty());
    }
}

#[test]
fn test_unrecognized_fallback() {
    let tokens = analyze("@");
    assert_eq!(
        tokens.as_slice(),
        &[Token::new("@", Category::Unrecognized, 0, 1)]
    );

    // one Unicode scalar per fallback token
    let tokens = analyze("€");
    assert_eq!(tokens.as_slice(), &[Token::new("€", Category::Unrecognized, 0, 3)]);
}

#[test]
fn test_mixed_sequence_skipping_whitespace() {
    let tokens = analyze("892892 asas == != <= >=");
    assert_eq!(
        tokens.pairs(),
        vec![
            (Category::Integer, "892892"),
            (Category::Identifier, "asas"),
            (Category::RelationalOperator, "=="),
            (Category::RelationalOperator, "!="),
            (Category::RelationalOperator, "<="),
            (Category::RelationalOperator, ">="),
        ]
    );
}

#[test]
fn test_mixed_sequence_emitting_whitespace() {
    let tokens = lex_with(
        "892892 asas ==",
        LexicalPreferences {
            whitespace: WhitespacePolicy::Emit,
            ..prefs()
        },
    );
    assert_eq!(
        tokens.pairs(),
        vec![
            (Category::Integer, "892892"),
            (Category::Unrecognized, " "),
            (Category::Identifier, "asas"),
            (Category::Unrecognized, " "),
            (Category::RelationalOperator, "=="),
        ]
    );
}

#[test]
fn test_empty_input() {
    assert!(analyze("").is_empty());
    assert!(analyze(" \n\t ").is_empty());
    let emitted = lex_with(
        "",
        LexicalPreferences {
            whitespace: WhitespacePolicy::Emit,
            ..prefs()
        },
    );
    assert!(emitted.is_empty());
}

#[test]
fn test_increment_precedence_standard_order() {
    assert_eq!(
        analyze("x++ --").pairs(),
        vec![
            (Category::Identifier, "x"),
            (Category::IncrementOperator, "++"),
            (Category::IncrementOperator, "--"),
        ]
    );
    assert_eq!(
        analyze("+ -").pairs(),
        vec![
            (Category::ArithmeticOperator, "+"),
            (Category::ArithmeticOperator, "-"),
        ]
    );
}

#[test]
fn test_increment_unreachable_in_legacy_order() {
    let tokens = lex_with(
        "x++",
        LexicalPreferences {
            recognizer_order: RecognizerOrder::Legacy,
            ..prefs()
        },
    );
    assert_eq!(
        tokens.pairs(),
        vec![
            (Category::Identifier, "x"),
            (Category::ArithmeticOperator, "+"),
            (Category::ArithmeticOperator, "+"),
        ]
    );
}

#[test]
fn test_unterminated_string_char_by_char() {
    let tokens = analyze("\"abc");
    assert_eq!(
        tokens.pairs(),
        vec![
            (Category::Unrecognized, "\""),
            (Category::Identifier, "abc"),
        ]
    );
}

#[test]
fn test_unterminated_string_consume_to_end() {
    let tokens = lex_with(
        "x \"abc def",
        LexicalPreferences {
            unterminated: UnterminatedPolicy::ConsumeToEnd,
            ..prefs()
        },
    );
    assert_eq!(
        tokens.pairs(),
        vec![
            (Category::Identifier, "x"),
            (Category::Unrecognized, "\"abc def"),
        ]
    );
}

#[test]
fn test_unterminated_block_comment_policies() {
    let tokens = analyze("/* open");
    assert_eq!(
        tokens.pairs(),
        vec![
            (Category::Unrecognized, "/*"),
            (Category::Identifier, "open"),
        ]
    );

    let tokens = lex_with(
        "/* open",
        LexicalPreferences {
            unterminated: UnterminatedPolicy::ConsumeToEnd,
            ..prefs()
        },
    );
    assert_eq!(tokens.pairs(), vec![(Category::Unrecognized, "/* open")]);
}

#[test]
fn test_comments_and_delimiters() {
    let tokens = analyze("// note\nif (x) { y = 0x1F; } /* a\nb */ 3.14, z");
    assert_eq!(
        tokens.pairs(),
        vec![
            (Category::LineComment, "// note"),
            (Category::Keyword, "if"),
            (Category::OpenParen, "("),
            (Category::Identifier, "x"),
            (Category::CloseParen, ")"),
            (Category::OpenBrace, "{"),
            (Category::Identifier, "y"),
            (Category::AssignmentOperator, "="),
            (Category::Hexadecimal, "0x1F"),
            (Category::Terminator, ";"),
            (Category::CloseBrace, "}"),
            (Category::BlockComment, "/* a\nb */"),
            (Category::Decimal, "3.14"),
            (Category::Separator, ","),
            (Category::Identifier, "z"),
        ]
    );
}

#[test]
fn test_pattern_first_identifier_only_table() {
    let tokens = lex_with(
        "if x",
        LexicalPreferences {
            dispatch_mode: DispatchMode::PatternFirst,
            category_table: CategoryTable::IdentifierOnly,
            ..prefs()
        },
    );
    assert_eq!(
        tokens.pairs(),
        vec![(Category::Identifier, "if"), (Category::Identifier, "x")]
    );
}

#[test]
fn test_collapsed_versus_split_tables() {
    let source = "3.14 <= x && while";

    let collapsed = lex_with(
        source,
        LexicalPreferences {
            dispatch_mode: DispatchMode::PatternFirst,
            category_table: CategoryTable::Collapsed,
            ..prefs()
        },
    );
    assert_eq!(
        collapsed.pairs(),
        vec![
            (Category::Integer, "3.14"),
            (Category::ArithmeticOperator, "<="),
            (Category::Identifier, "x"),
            (Category::ArithmeticOperator, "&&"),
            (Category::Identifier, "while"),
        ]
    );

    let split = lex_with(
        source,
        LexicalPreferences {
            dispatch_mode: DispatchMode::PatternFirst,
            category_table: CategoryTable::Split,
            ..prefs()
        },
    );
    assert_eq!(
        split.pairs(),
        vec![
            (Category::Decimal, "3.14"),
            (Category::RelationalOperator, "<="),
            (Category::Identifier, "x"),
            (Category::LogicalOperator, "&"),
            (Category::LogicalOperator, "&"),
            (Category::Keyword, "while"),
        ]
    );
}

#[test]
fn test_split_table_leaves_comments_to_recognizers() {
    let tokens = lex_with(
        "a // tail",
        LexicalPreferences {
            dispatch_mode: DispatchMode::PatternFirst,
            category_table: CategoryTable::Split,
            ..prefs()
        },
    );
    assert_eq!(
        tokens.pairs(),
        vec![
            (Category::Identifier, "a"),
            (Category::LineComment, "// tail"),
        ]
    );
}

#[test]
fn test_extra_patterns_take_precedence() {
    let tokens = lex_with(
        "#pragma x",
        LexicalPreferences {
            extra_patterns: vec![PatternSpec::new("#[a-z]+", Category::Keyword)],
            ..prefs()
        },
    );
    assert_eq!(
        tokens.pairs(),
        vec![(Category::Keyword, "#pragma"), (Category::Identifier, "x")]
    );
}

#[test]
fn test_extra_patterns_precede_category_table() {
    let tokens = lex_with(
        "12px 12",
        LexicalPreferences {
            dispatch_mode: DispatchMode::PatternFirst,
            category_table: CategoryTable::Split,
            extra_patterns: vec![PatternSpec::new("[0-9]+px", Category::Keyword)],
            ..prefs()
        },
    );
    assert_eq!(
        tokens.pairs(),
        vec![(Category::Keyword, "12px"), (Category::Integer, "12")]
    );
}

#[test]
fn test_invalid_extra_pattern_is_rejected() {
    let result = analyze_with_preferences(
        "x",
        LexicalPreferences {
            extra_patterns: vec![PatternSpec::new("[0-9]*", Category::Integer)],
            ..prefs()
        },
    );
    assert!(matches!(
        result,
        Err(lexan::LexerError::EmptyMatchPattern { .. })
    ));
}

#[test]
fn test_preferences_from_toml() {
    let config = RuntimeConfig::from_toml_str(
        r#"
        [lexical]
        dispatch_mode = "pattern_first"
        category_table = "split"
        whitespace = "emit"
        "#,
    )
    .unwrap();

    let tokens = lex_with("0xA b", config.lexical);
    assert_eq!(
        tokens.pairs(),
        vec![
            (Category::Hexadecimal, "0xA"),
            (Category::Unrecognized, " "),
            (Category::Identifier, "b"),
        ]
    );
}

#[test]
fn test_unicode_identifiers_use_byte_offsets() {
    let tokens = analyze("año = 1");
    assert_eq!(
        tokens.as_slice()[0],
        Token::new("año", Category::Identifier, 0, 4)
    );
    assert_eq!(tokens.as_slice()[1].start_index, 5);
}
