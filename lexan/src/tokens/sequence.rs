//! Ordered, append-only token sequence produced by one analysis run

use super::{Category, Token};
use crate::config::runtime::WhitespacePolicy;
use serde::Serialize;
use std::collections::BTreeMap;
use std::ops::Index;

/// Violations found by [`TokenSequence::validate`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SequenceError {
    #[error("Token {index} has an empty span at offset {offset}")]
    EmptyToken { index: usize, offset: usize },

    #[error("Token {index} ends at {next_index}, past the end of the source ({source_len})")]
    OutOfBounds {
        index: usize,
        next_index: usize,
        source_len: usize,
    },

    #[error("Token {index} starts at {start_index} but the previous token ended at {expected}")]
    Gap {
        index: usize,
        start_index: usize,
        expected: usize,
    },

    #[error("Token {index} overlaps the previous token ({start_index} < {previous_end})")]
    Overlap {
        index: usize,
        start_index: usize,
        previous_end: usize,
    },

    #[error("Source is not fully covered: tokens end at {covered}, source length is {source_len}")]
    Incomplete { covered: usize, source_len: usize },

    #[error("Lexeme of token {index} does not match its source text")]
    LexemeMismatch { index: usize },
}

/// Tokens in source order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TokenSequence {
    tokens: Vec<Token>,
}

impl TokenSequence {
    pub fn new() -> Self {
        Self { tokens: Vec::new() }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            tokens: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }

    pub fn into_vec(self) -> Vec<Token> {
        self.tokens
    }

    pub fn last(&self) -> Option<&Token> {
        self.tokens.last()
    }

    /// Tokens that are not comments
    pub fn significant(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter().filter(|t| !t.category.is_comment())
    }

    pub fn count_of(&self, category: Category) -> usize {
        self.tokens
            .iter()
            .filter(|t| t.category == category)
            .count()
    }

    pub fn category_counts(&self) -> BTreeMap<Category, usize> {
        let mut counts = BTreeMap::new();
        for token in &self.tokens {
            *counts.entry(token.category).or_insert(0) += 1;
        }
        counts
    }

    /// Concatenated source text of every token's span
    pub fn covered_text(&self, source: &str) -> String {
        self.tokens
            .iter()
            .map(|token| token.source_text(source))
            .collect()
    }

    /// `(category, lexeme)` pairs, mostly useful for assertions
    pub fn pairs(&self) -> Vec<(Category, &str)> {
        self.tokens
            .iter()
            .map(|t| (t.category, t.lexeme.as_str()))
            .collect()
    }

    /// Check the sequence against the source it was produced from.
    ///
    /// Under `WhitespacePolicy::Emit` the spans must partition the source
    /// exactly. Under `WhitespacePolicy::Skip` gaps are allowed, but only
    /// whitespace may sit in them.
    pub fn validate(&self, source: &str, policy: WhitespacePolicy) -> Result<(), SequenceError> {
        let mut cursor = 0;

        for (index, token) in self.tokens.iter().enumerate() {
            if token.next_index <= token.start_index {
                return Err(SequenceError::EmptyToken {
                    index,
                    offset: token.start_index,
                });
            }

            if token.next_index > source.len() {
                return Err(SequenceError::OutOfBounds {
                    index,
                    next_index: token.next_index,
                    source_len: source.len(),
                });
            }

            if token.start_index < cursor {
                return Err(SequenceError::Overlap {
                    index,
                    start_index: token.start_index,
                    previous_end: cursor,
                });
            }

            if token.start_index > cursor && !gap_allowed(source, cursor, token.start_index, policy)
            {
                return Err(SequenceError::Gap {
                    index,
                    start_index: token.start_index,
                    expected: cursor,
                });
            }

            if !lexeme_matches(token, source) {
                return Err(SequenceError::LexemeMismatch { index });
            }

            cursor = token.next_index;
        }

        if cursor < source.len() && !gap_allowed(source, cursor, source.len(), policy) {
            return Err(SequenceError::Incomplete {
                covered: cursor,
                source_len: source.len(),
            });
        }

        Ok(())
    }
}

fn gap_allowed(source: &str, from: usize, to: usize, policy: WhitespacePolicy) -> bool {
    match policy {
        WhitespacePolicy::Emit => false,
        WhitespacePolicy::Skip => source
            .get(from..to)
            .map(|gap| gap.chars().all(char::is_whitespace))
            .unwrap_or(false),
    }
}

fn lexeme_matches(token: &Token, source: &str) -> bool {
    let Some(text) = source.get(token.start_index..token.next_index) else {
        return false;
    };

    match token.category {
        Category::StringLiteral if text.len() >= 2 && text.starts_with('"') => {
            text[1..text.len() - 1] == token.lexeme
        }
        _ => text == token.lexeme,
    }
}

impl Index<usize> for TokenSequence {
    type Output = Token;

    fn index(&self, index: usize) -> &Self::Output {
        &self.tokens[index]
    }
}

impl IntoIterator for TokenSequence {
    type Item = Token;
    type IntoIter = std::vec::IntoIter<Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.into_iter()
    }
}

impl<'a> IntoIterator for &'a TokenSequence {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

impl From<Vec<Token>> for TokenSequence {
    fn from(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn sequence(tokens: Vec<Token>) -> TokenSequence {
        TokenSequence::from(tokens)
    }

    #[test]
    fn test_valid_partition() {
        let source = "a+1";
        let seq = sequence(vec![
            Token::new("a", Category::Identifier, 0, 1),
            Token::new("+", Category::ArithmeticOperator, 1, 2),
            Token::new("1", Category::Integer, 2, 3),
        ]);

        assert_eq!(seq.validate(source, WhitespacePolicy::Emit), Ok(()));
        assert_eq!(seq.covered_text(source), source);
    }

    #[test]
    fn test_gap_rejected_when_emitting_whitespace() {
        let source = "a 1";
        let seq = sequence(vec![
            Token::new("a", Category::Identifier, 0, 1),
            Token::new("1", Category::Integer, 2, 3),
        ]);

        assert_matches!(
            seq.validate(source, WhitespacePolicy::Emit),
            Err(SequenceError::Gap { index: 1, .. })
        );
        assert_eq!(seq.validate(source, WhitespacePolicy::Skip), Ok(()));
    }

    #[test]
    fn test_non_whitespace_gap_rejected_when_skipping() {
        let source = "a@1";
        let seq = sequence(vec![
            Token::new("a", Category::Identifier, 0, 1),
            Token::new("1", Category::Integer, 2, 3),
        ]);

        assert_matches!(
            seq.validate(source, WhitespacePolicy::Skip),
            Err(SequenceError::Gap { .. })
        );
    }

    #[test]
    fn test_incomplete_coverage() {
        let source = "ab";
        let seq = sequence(vec![Token::new("a", Category::Identifier, 0, 1)]);

        assert_matches!(
            seq.validate(source, WhitespacePolicy::Emit),
            Err(SequenceError::Incomplete {
                covered: 1,
                source_len: 2
            })
        );
    }

    #[test]
    fn test_overlap_and_empty_detected() {
        let source = "abc";
        let overlapping = sequence(vec![
            Token::new("ab", Category::Identifier, 0, 2),
            Token::new("bc", Category::Identifier, 1, 3),
        ]);
        assert_matches!(
            overlapping.validate(source, WhitespacePolicy::Emit),
            Err(SequenceError::Overlap { index: 1, .. })
        );

        let empty = sequence(vec![Token::new("", Category::Unrecognized, 0, 0)]);
        assert_matches!(
            empty.validate(source, WhitespacePolicy::Emit),
            Err(SequenceError::EmptyToken { index: 0, .. })
        );
    }

    #[test]
    fn test_string_literal_lexeme_checked_without_quotes() {
        let source = "\"abc\"";
        let good = sequence(vec![Token::new("abc", Category::StringLiteral, 0, 5)]);
        assert_eq!(good.validate(source, WhitespacePolicy::Emit), Ok(()));

        let bad = sequence(vec![Token::new("\"abc\"", Category::StringLiteral, 0, 5)]);
        assert_matches!(
            bad.validate(source, WhitespacePolicy::Emit),
            Err(SequenceError::LexemeMismatch { index: 0 })
        );
    }

    #[test]
    fn test_counts_and_significant() {
        let seq = sequence(vec![
            Token::new("x", Category::Identifier, 0, 1),
            Token::new("// c", Category::LineComment, 2, 6),
            Token::new("y", Category::Identifier, 7, 8),
        ]);

        assert_eq!(seq.count_of(Category::Identifier), 2);
        assert_eq!(seq.significant().count(), 2);
        assert_eq!(seq.category_counts().get(&Category::LineComment), Some(&1));
        assert_eq!(seq[2].lexeme, "y");
    }
}
