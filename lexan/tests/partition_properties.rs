//! Property-based tests for token coverage
//!
//! Whatever the input and whichever preferences are active, the analyzer
//! must terminate, emit only non-empty spans, and account for every byte of
//! the source either as a token or as skipped whitespace. Lexemes are
//! non-empty too, apart from the content of an empty string literal `""`.

use lexan::config::{
    CategoryTable, DispatchMode, LexicalPreferences, RecognizerOrder, UnterminatedPolicy,
    WhitespacePolicy,
};
use lexan::{LexicalAnalyzer, TokenSequence};
use proptest::prelude::*;

/// Source-like text: mostly language characters, with some noise
fn source_text() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => "[a-zA-Z0-9_ \t\n\"/*+<=>!&|(){};,.@#-]{0,80}",
        1 => "\\PC{0,40}",
        1 => any::<String>(),
    ]
}

fn preferences() -> impl Strategy<Value = LexicalPreferences> {
    (
        prop_oneof![Just(DispatchMode::Ordered), Just(DispatchMode::PatternFirst)],
        prop_oneof![Just(RecognizerOrder::Standard), Just(RecognizerOrder::Legacy)],
        prop_oneof![
            Just(CategoryTable::IdentifierOnly),
            Just(CategoryTable::Collapsed),
            Just(CategoryTable::Split),
        ],
        prop_oneof![Just(WhitespacePolicy::Skip), Just(WhitespacePolicy::Emit)],
        prop_oneof![
            Just(UnterminatedPolicy::CharByChar),
            Just(UnterminatedPolicy::ConsumeToEnd),
        ],
    )
        .prop_map(
            |(dispatch_mode, recognizer_order, category_table, whitespace, unterminated)| {
                LexicalPreferences {
                    dispatch_mode,
                    recognizer_order,
                    category_table,
                    whitespace,
                    unterminated,
                    log_unrecognized: false,
                    ..LexicalPreferences::builtin()
                }
            },
        )
}

fn lex(source: &str, preferences: LexicalPreferences) -> TokenSequence {
    LexicalAnalyzer::with_preferences(preferences)
        .expect("built-in preferences are valid")
        .analyze(source)
}

fn emit_preferences() -> LexicalPreferences {
    LexicalPreferences {
        whitespace: WhitespacePolicy::Emit,
        log_unrecognized: false,
        ..LexicalPreferences::builtin()
    }
}

proptest! {
    #[test]
    fn test_emit_mode_partitions_source(source in source_text()) {
        let tokens = lex(&source, emit_preferences());

        let mut cursor = 0;
        for token in &tokens {
            prop_assert_eq!(token.start_index, cursor);
            cursor = token.next_index;
        }
        prop_assert_eq!(cursor, source.len());
        prop_assert_eq!(tokens.covered_text(&source), source);
    }

    #[test]
    fn test_spans_are_non_empty(source in source_text(), preferences in preferences()) {
        let tokens = lex(&source, preferences);
        for token in &tokens {
            prop_assert!(token.next_index > token.start_index, "empty span: {}", token);
        }
    }

    #[test]
    fn test_only_empty_string_literals_have_empty_lexemes(
        source in source_text(),
        preferences in preferences(),
    ) {
        let tokens = lex(&source, preferences);
        for token in &tokens {
            if token.lexeme.is_empty() {
                prop_assert_eq!(token.category, lexan::Category::StringLiteral);
                prop_assert_eq!(token.source_text(&source), "\"\"");
            }
        }
    }

    #[test]
    fn test_token_count_bounded_by_length(source in source_text(), preferences in preferences()) {
        let tokens = lex(&source, preferences);
        prop_assert!(tokens.len() <= source.len());
    }

    #[test]
    fn test_sequence_validates_under_any_preferences(
        source in source_text(),
        preferences in preferences(),
    ) {
        let whitespace = preferences.whitespace;
        let tokens = lex(&source, preferences);
        prop_assert_eq!(tokens.validate(&source, whitespace), Ok(()));
    }

    #[test]
    fn test_skip_mode_gaps_are_whitespace(source in source_text()) {
        let tokens = lex(&source, LexicalPreferences {
            log_unrecognized: false,
            ..LexicalPreferences::builtin()
        });

        let mut cursor = 0;
        for token in &tokens {
            prop_assert!(source[cursor..token.start_index].chars().all(char::is_whitespace));
            prop_assert!(!token.source_text(&source).starts_with(char::is_whitespace));
            cursor = token.next_index;
        }
        prop_assert!(source[cursor..].chars().all(char::is_whitespace));
    }

    #[test]
    fn test_lexeme_matches_span(source in source_text(), preferences in preferences()) {
        let tokens = lex(&source, preferences);
        for token in &tokens {
            let text = token.source_text(&source);
            if token.category == lexan::Category::StringLiteral {
                prop_assert_eq!(format!("\"{}\"", token.lexeme), text);
            } else {
                prop_assert_eq!(token.lexeme.as_str(), text);
            }
        }
    }

    #[test]
    fn test_extract_next_agrees_with_analyze(source in source_text()) {
        let mut analyzer = LexicalAnalyzer::with_preferences(emit_preferences()).unwrap();
        let tokens = analyzer.analyze(&source);

        let mut cursor = 0;
        for token in &tokens {
            let next = analyzer.extract_next(&source, cursor);
            prop_assert_eq!(next.as_ref(), Some(token));
            cursor = token.next_index;
        }
        prop_assert_eq!(analyzer.extract_next(&source, cursor), None);
    }
}
