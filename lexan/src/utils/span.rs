//! Source location tracking for lexan
//!
//! Tokens carry byte offsets only. This module turns those offsets into
//! line/column positions on demand, so diagnostics can point at source text
//! without the scanner having to count lines.
use crate::tokens::Token;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A position in source text with line, column, and byte offset.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Position {
    /// Byte offset from start of input (0-based)
    pub offset: usize,
    /// Line number (1-based)
    pub line: u32,
    /// Column number (1-based, counted in characters)
    pub column: u32,
}

impl Position {
    pub fn new(offset: usize, line: u32, column: u32) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A span of source text from start to end position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    /// Start position (inclusive)
    pub start: Position,
    /// End position (exclusive)
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        debug_assert!(
            start.offset <= end.offset,
            "Span start must not be after end"
        );
        Self { start, end }
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn end(&self) -> Position {
        self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start.line == self.end.line {
            write!(
                f,
                "{}:{}-{}",
                self.start.line, self.start.column, self.end.column
            )
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// Line-start index over a source buffer for offset → line/column lookup
#[derive(Debug, Clone)]
pub struct SourceMap<'src> {
    source: &'src str,
    /// Byte offsets of line starts
    line_starts: Vec<usize>,
}

impl<'src> SourceMap<'src> {
    pub fn new(source: &'src str) -> Self {
        let mut line_starts = vec![0];
        for (offset, ch) in source.char_indices() {
            if ch == '\n' {
                line_starts.push(offset + 1);
            }
        }
        Self {
            source,
            line_starts,
        }
    }

    /// Get the line and column for a byte offset.
    ///
    /// Offsets past the end clamp to the end of the source.
    pub fn position_at(&self, offset: usize) -> Position {
        let offset = offset.min(self.source.len());
        let line = match self.line_starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert_at) => insert_at - 1,
        };

        let line_start = self.line_starts[line];
        let column = self.source[line_start..offset].chars().count();

        Position::new(offset, (line + 1) as u32, (column + 1) as u32)
    }

    /// Span of a token's source text (quotes included for string literals)
    pub fn span_of(&self, token: &Token) -> Span {
        Span::new(
            self.position_at(token.start_index),
            self.position_at(token.next_index),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::Category;

    #[test]
    fn test_source_map_positions() {
        let map = SourceMap::new("int x\nx = 1\n");
        assert_eq!(map.position_at(0), Position::new(0, 1, 1));
        assert_eq!(map.position_at(4), Position::new(4, 1, 5));
        assert_eq!(map.position_at(6), Position::new(6, 2, 1));
        assert_eq!(map.position_at(10), Position::new(10, 2, 5));
        assert_eq!(map.position_at(12), Position::new(12, 3, 1));
    }

    #[test]
    fn test_columns_count_characters_not_bytes() {
        let map = SourceMap::new("año @");
        assert_eq!(map.position_at(5), Position::new(5, 1, 5));
    }

    #[test]
    fn test_source_map_clamps_past_end() {
        let map = SourceMap::new("abc");
        assert_eq!(map.position_at(99), Position::new(3, 1, 4));
    }

    #[test]
    fn test_span_of_token() {
        let map = SourceMap::new("x\n  \"hi\"");
        let token = Token::new("hi", Category::StringLiteral, 4, 8);
        let span = map.span_of(&token);

        assert_eq!(span.start(), Position::new(4, 2, 3));
        assert_eq!(span.end(), Position::new(8, 2, 7));
        assert_eq!(span.to_string(), "2:3-7");
    }

    #[test]
    fn test_multiline_span_display() {
        let source = "/* a\nb */";
        let map = SourceMap::new(source);
        let token = Token::new(source, Category::BlockComment, 0, source.len());
        assert_eq!(map.span_of(&token).to_string(), "1:1-2:5");
    }
}
