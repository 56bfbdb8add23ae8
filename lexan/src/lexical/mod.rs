//! Lexical analysis
//!
//! Turns source text into a [`TokenSequence`]. The engine tries an explicit,
//! ordered [`RecognizerSet`] at each cursor position; the first recognizer to
//! succeed wins. Input no recognizer accepts becomes one-character
//! `Unrecognized` tokens, so analysis never fails.

pub mod analyzer;
pub mod patterns;
pub mod recognizers;

use crate::config::runtime::LexicalPreferences;
use crate::tokens::TokenSequence;

pub use analyzer::{LexerError, LexicalAnalyzer, LexicalMetrics};
pub use patterns::PatternRule;
pub use recognizers::{Recognition, Recognizer, RecognizerSet};

/// Lex `source` with the built-in preferences
pub fn analyze(source: &str) -> TokenSequence {
    LexicalAnalyzer::new().analyze(source)
}

/// Lex `source` with custom preferences
pub fn analyze_with_preferences(
    source: &str,
    preferences: LexicalPreferences,
) -> Result<TokenSequence, LexerError> {
    let mut analyzer = LexicalAnalyzer::with_preferences(preferences)?;
    Ok(analyzer.analyze(source))
}
