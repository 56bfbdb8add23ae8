//! The scanning loop
//!
//! `analyze` walks a cursor from the start of the source to its end. Each
//! step either skips whitespace or emits exactly one token with a non-empty
//! span, so the loop always terminates and never drops input. Nothing in the source can
//! make it fail: anything no recognizer accepts becomes an `Unrecognized`
//! token.

use super::patterns::PatternRule;
use super::recognizers::{Recognition, RecognizerSet};
use crate::config::constants::compile_time::lexical::*;
use crate::config::runtime::{
    DispatchMode, LexicalPreferences, UnterminatedPolicy, WhitespacePolicy,
};
use crate::logging::{self, codes};
use crate::tokens::{Category, Token, TokenSequence};
use crate::utils::SourceMap;
use crate::{log_debug, log_error, log_success, log_warning};
use serde::Serialize;
use std::collections::BTreeMap;

/// Errors raised while building an analyzer. Lexing itself never fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexerError {
    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Pattern '{pattern}' can match the empty string")]
    EmptyMatchPattern { pattern: String },
}

impl LexerError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            LexerError::InvalidPattern { .. } => codes::config::INVALID_PATTERN,
            LexerError::EmptyMatchPattern { .. } => codes::config::EMPTY_MATCH_PATTERN,
        }
    }
}

/// Counters for the most recent `analyze` call
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct LexicalMetrics {
    pub total_tokens: usize,
    pub unrecognized_tokens: usize,
    pub unterminated_literals: usize,
    pub whitespace_bytes_skipped: usize,
    pub pattern_rule_hits: usize,

    // Only filled when detailed metrics are enabled
    pub category_counts: BTreeMap<Category, usize>,
    pub longest_lexeme: usize,
}

impl LexicalMetrics {
    fn record_token(&mut self, token: &Token, detailed: bool) {
        self.total_tokens += 1;
        if token.category == Category::Unrecognized {
            self.unrecognized_tokens += 1;
        }

        if detailed {
            *self.category_counts.entry(token.category).or_insert(0) += 1;
            self.longest_lexeme = self.longest_lexeme.max(token.lexeme.len());
        }
    }

    pub fn count_of(&self, category: Category) -> usize {
        self.category_counts.get(&category).copied().unwrap_or(0)
    }
}

/// How a token came to be produced
enum Origin {
    Recognizer { pattern: bool },
    Unterminated,
    Fallback,
}

#[derive(Debug, Clone)]
pub struct LexicalAnalyzer {
    recognizers: RecognizerSet,
    preferences: LexicalPreferences,
    metrics: LexicalMetrics,
}

impl LexicalAnalyzer {
    /// Analyzer with the built-in preferences. The environment is not consulted.
    pub fn new() -> Self {
        let preferences = LexicalPreferences::builtin();
        let recognizers = builtin_recognizers(&preferences);
        Self::with_recognizers(recognizers, preferences)
    }

    /// Analyzer whose recognizer set follows `preferences`. Fails only when
    /// one of the extra patterns does not compile or can match nothing.
    pub fn with_preferences(preferences: LexicalPreferences) -> Result<Self, LexerError> {
        let extra_rules = preferences
            .extra_patterns
            .iter()
            .map(PatternRule::from_spec)
            .collect::<Result<Vec<_>, _>>()
            .inspect_err(|error| {
                log_error!(error.error_code(), "Failed to build pattern rule",
                    "error" => error
                );
            })?;

        let recognizers = builtin_recognizers(&preferences).with_patterns_first(extra_rules);
        Ok(Self::with_recognizers(recognizers, preferences))
    }

    /// Analyzer that uses `recognizers` as given. Only the whitespace,
    /// unterminated and logging settings of `preferences` apply.
    pub fn with_recognizers(recognizers: RecognizerSet, preferences: LexicalPreferences) -> Self {
        Self {
            recognizers,
            preferences,
            metrics: LexicalMetrics::default(),
        }
    }

    pub fn metrics(&self) -> &LexicalMetrics {
        &self.metrics
    }

    pub fn preferences(&self) -> &LexicalPreferences {
        &self.preferences
    }

    pub fn recognizers(&self) -> &RecognizerSet {
        &self.recognizers
    }

    /// Lex `source` into tokens in source order
    pub fn analyze(&mut self, source: &str) -> TokenSequence {
        self.metrics = LexicalMetrics::default();

        log_debug!("Starting lexical analysis",
            "bytes" => source.len(),
            "recognizers" => self.recognizers.len()
        );

        let detailed = self.preferences.collect_detailed_metrics;
        let reporting = logging::is_initialized();
        let mut source_map: Option<SourceMap> = None;
        let mut tokens = TokenSequence::with_capacity(source.len() / TOKEN_CAPACITY_DIVISOR + 1);
        let mut cursor = 0;

        while cursor < source.len() {
            if self.preferences.whitespace == WhitespacePolicy::Skip {
                let skipped = whitespace_len(&source[cursor..]);
                self.metrics.whitespace_bytes_skipped += skipped;
                cursor += skipped;
                if cursor == source.len() {
                    break;
                }
            }

            let (token, origin) = self.next_token(source, cursor);
            debug_assert!(token.next_index > cursor, "scanner must advance");

            match origin {
                Origin::Recognizer { pattern: true } => self.metrics.pattern_rule_hits += 1,
                Origin::Recognizer { pattern: false } => {}
                Origin::Unterminated => {
                    self.metrics.unterminated_literals += 1;
                    if reporting {
                        let map = source_map.get_or_insert_with(|| SourceMap::new(source));
                        self.report_unterminated(map, &token);
                    }
                }
                Origin::Fallback => {
                    if reporting && self.preferences.log_unrecognized {
                        let map = source_map.get_or_insert_with(|| SourceMap::new(source));
                        self.report_unrecognized(map, &token);
                    }
                }
            }

            cursor = token.next_index;
            self.metrics.record_token(&token, detailed);
            tokens.push(token);
        }

        log_success!(codes::success::TOKENIZATION_COMPLETE, "Lexical analysis completed",
            "tokens" => self.metrics.total_tokens,
            "unrecognized" => self.metrics.unrecognized_tokens,
            "unterminated" => self.metrics.unterminated_literals
        );

        tokens
    }

    /// The token starting at `cursor`, or `None` at the end of the source.
    /// Whitespace is not skipped here.
    pub fn extract_next(&self, source: &str, cursor: usize) -> Option<Token> {
        if cursor >= source.len() || !source.is_char_boundary(cursor) {
            return None;
        }
        Some(self.next_token(source, cursor).0)
    }

    fn next_token(&self, source: &str, cursor: usize) -> (Token, Origin) {
        match self.recognizers.recognize(source, cursor) {
            Some((recognizer, Recognition::Matched(token))) => (
                token,
                Origin::Recognizer {
                    pattern: recognizer.is_pattern(),
                },
            ),
            Some((_, Recognition::Unterminated { delimiter_len })) => {
                let end = match self.preferences.unterminated {
                    UnterminatedPolicy::CharByChar => cursor + delimiter_len,
                    UnterminatedPolicy::ConsumeToEnd => source.len(),
                };
                (unrecognized(source, cursor, end), Origin::Unterminated)
            }
            Some((_, Recognition::NoMatch)) | None => {
                let width = source[cursor..].chars().next().map_or(1, char::len_utf8);
                (unrecognized(source, cursor, cursor + width), Origin::Fallback)
            }
        }
    }

    fn report_unrecognized(&self, map: &SourceMap, token: &Token) {
        log_warning!(code = codes::lexical::UNRECOGNIZED_CHARACTER, span = map.span_of(token),
            "Unrecognized character",
            "lexeme" => token.lexeme.escape_debug(),
            "offset" => token.start_index
        );
    }

    fn report_unterminated(&self, map: &SourceMap, token: &Token) {
        let code = if token.lexeme.starts_with('"') {
            codes::lexical::UNTERMINATED_STRING
        } else {
            codes::lexical::UNTERMINATED_COMMENT
        };

        let shown: String = token.lexeme.chars().take(MAX_LOGGED_LEXEME_LENGTH).collect();
        log_warning!(code = code, span = map.span_of(token), "Unterminated literal",
            "lexeme" => shown.escape_debug(),
            "offset" => token.start_index
        );
    }
}

impl Default for LexicalAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Built-in recognizers for the dispatch mode and order in `preferences`
fn builtin_recognizers(preferences: &LexicalPreferences) -> RecognizerSet {
    let ordered = RecognizerSet::for_order(preferences.recognizer_order);
    match preferences.dispatch_mode {
        DispatchMode::Ordered => ordered,
        DispatchMode::PatternFirst => {
            ordered.with_patterns_first(preferences.category_table.rules())
        }
    }
}

fn unrecognized(source: &str, start: usize, end: usize) -> Token {
    Token::new(&source[start..end], Category::Unrecognized, start, end)
}

fn whitespace_len(text: &str) -> usize {
    text.char_indices()
        .find(|(_, ch)| !ch.is_whitespace())
        .map(|(index, _)| index)
        .unwrap_or(text.len())
}
