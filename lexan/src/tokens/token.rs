//! The classified unit produced by the lexer

use super::Category;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One classified unit of source text.
///
/// `start_index..next_index` is the byte span the token occupies in the
/// source. For string literals the lexeme is the text between the quotes
/// while the span still covers the quotes themselves; for every other
/// category the lexeme is exactly the spanned text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub lexeme: String,
    pub category: Category,
    pub start_index: usize,
    pub next_index: usize,
}

impl Token {
    pub fn new(
        lexeme: impl Into<String>,
        category: Category,
        start_index: usize,
        next_index: usize,
    ) -> Self {
        Self {
            lexeme: lexeme.into(),
            category,
            start_index,
            next_index,
        }
    }

    /// Byte length of the source text this token covers
    pub fn span_len(&self) -> usize {
        self.next_index - self.start_index
    }

    /// The spanned source text, quotes included for string literals
    pub fn source_text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start_index..self.next_index]
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?}({:?}) @ {}..{}",
            self.category, self.lexeme, self.start_index, self.next_index
        )
    }
}
