//! Per-category recognizers and the ordered sets they are tried in
//!
//! Each recognizer looks at the source from the cursor onward and either
//! produces one token (consuming the longest prefix it accepts), reports no
//! match, or reports an opening delimiter that is never closed. Across
//! recognizers the first one in the set to succeed wins, even when a later
//! one would have matched more text.

use super::patterns::PatternRule;
use crate::config::runtime::RecognizerOrder;
use crate::grammar::{is_word_char, Keyword};
use crate::tokens::{Category, Token};

/// Outcome of trying one recognizer at a cursor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recognition {
    Matched(Token),
    NoMatch,
    /// An opening `"` or `/*` was found with nothing to close it
    Unterminated { delimiter_len: usize },
}

#[derive(Debug, Clone)]
pub enum Recognizer {
    Hexadecimal,
    Decimal,
    Integer,
    LineComment,
    BlockComment,
    Increment,
    Arithmetic,
    Relational,
    Logical,
    Assignment,
    Delimiter,
    Keyword,
    StringLiteral,
    Identifier,
    Pattern(PatternRule),
}

impl Recognizer {
    pub fn name(&self) -> &str {
        match self {
            Recognizer::Hexadecimal => "hexadecimal",
            Recognizer::Decimal => "decimal",
            Recognizer::Integer => "integer",
            Recognizer::LineComment => "line_comment",
            Recognizer::BlockComment => "block_comment",
            Recognizer::Increment => "increment",
            Recognizer::Arithmetic => "arithmetic",
            Recognizer::Relational => "relational",
            Recognizer::Logical => "logical",
            Recognizer::Assignment => "assignment",
            Recognizer::Delimiter => "delimiter",
            Recognizer::Keyword => "keyword",
            Recognizer::StringLiteral => "string_literal",
            Recognizer::Identifier => "identifier",
            Recognizer::Pattern(rule) => rule.pattern(),
        }
    }

    pub fn is_pattern(&self) -> bool {
        matches!(self, Recognizer::Pattern(_))
    }

    /// Try this recognizer at `cursor`, which must lie on a char boundary
    pub fn recognize(&self, source: &str, cursor: usize) -> Recognition {
        let Some(rest) = source.get(cursor..) else {
            return Recognition::NoMatch;
        };
        if rest.is_empty() {
            return Recognition::NoMatch;
        }

        let matched = match self {
            Recognizer::Hexadecimal => {
                hexadecimal_len(rest).map(|len| (len, Category::Hexadecimal))
            }
            Recognizer::Decimal => decimal_len(rest).map(|len| (len, Category::Decimal)),
            Recognizer::Integer => Some(digits_len(rest))
                .filter(|len| *len > 0)
                .map(|len| (len, Category::Integer)),
            Recognizer::LineComment => rest.starts_with("//").then(|| {
                let len = rest.find(['\n', '\r']).unwrap_or(rest.len());
                (len, Category::LineComment)
            }),
            Recognizer::BlockComment => {
                if !rest.starts_with("/*") {
                    return Recognition::NoMatch;
                }
                match rest[2..].find("*/") {
                    Some(end) => Some((end + 4, Category::BlockComment)),
                    None => return Recognition::Unterminated { delimiter_len: 2 },
                }
            }
            Recognizer::Increment => (rest.starts_with("++") || rest.starts_with("--"))
                .then_some((2, Category::IncrementOperator)),
            Recognizer::Arithmetic => rest
                .starts_with(['+', '-', '*', '/'])
                .then_some((1, Category::ArithmeticOperator)),
            Recognizer::Relational => {
                relational_len(rest).map(|len| (len, Category::RelationalOperator))
            }
            Recognizer::Logical => rest
                .starts_with(['&', '|'])
                .then_some((1, Category::LogicalOperator)),
            Recognizer::Assignment => rest
                .starts_with('=')
                .then_some((1, Category::AssignmentOperator)),
            Recognizer::Delimiter => delimiter_category(rest).map(|category| (1, category)),
            Recognizer::Keyword => {
                Keyword::match_prefix(rest)
                    .map(|keyword| (keyword.as_str().len(), Category::Keyword))
            }
            Recognizer::StringLiteral => return recognize_string(rest, cursor),
            Recognizer::Identifier => identifier_len(rest).map(|len| (len, Category::Identifier)),
            Recognizer::Pattern(rule) => rule
                .match_len(source, cursor)
                .map(|len| (len, rule.category())),
        };

        match matched {
            Some((len, category)) => {
                Recognition::Matched(Token::new(&rest[..len], category, cursor, cursor + len))
            }
            None => Recognition::NoMatch,
        }
    }
}

// ============================================================================
// SCANNING HELPERS
// ============================================================================

fn digits_len(text: &str) -> usize {
    text.bytes().take_while(u8::is_ascii_digit).count()
}

fn hexadecimal_len(text: &str) -> Option<usize> {
    if !(text.starts_with("0x") || text.starts_with("0X")) {
        return None;
    }
    let digits = text[2..].bytes().take_while(u8::is_ascii_hexdigit).count();
    (digits > 0).then_some(2 + digits)
}

fn decimal_len(text: &str) -> Option<usize> {
    let whole = digits_len(text);
    if whole == 0 || text.as_bytes().get(whole) != Some(&b'.') {
        return None;
    }
    let fraction = digits_len(&text[whole + 1..]);
    (fraction > 0).then_some(whole + 1 + fraction)
}

fn relational_len(text: &str) -> Option<usize> {
    const TWO_CHAR: [&str; 4] = ["==", "!=", "<=", ">="];

    if TWO_CHAR.iter().any(|op| text.starts_with(op)) {
        Some(2)
    } else if text.starts_with(['<', '>']) {
        Some(1)
    } else {
        None
    }
}

fn delimiter_category(text: &str) -> Option<Category> {
    match text.as_bytes().first()? {
        b'(' => Some(Category::OpenParen),
        b')' => Some(Category::CloseParen),
        b'{' => Some(Category::OpenBrace),
        b'}' => Some(Category::CloseBrace),
        b';' => Some(Category::Terminator),
        b',' => Some(Category::Separator),
        _ => None,
    }
}

fn identifier_len(text: &str) -> Option<usize> {
    let mut chars = text.char_indices();
    let (_, first) = chars.next()?;
    if !first.is_alphabetic() {
        return None;
    }
    let len = chars
        .find(|(_, ch)| !is_word_char(*ch))
        .map(|(index, _)| index)
        .unwrap_or(text.len());
    Some(len)
}

/// Quotes are part of the span but not of the lexeme, so `""` yields an
/// empty lexeme over a two-byte span. No escapes.
fn recognize_string(text: &str, cursor: usize) -> Recognition {
    if !text.starts_with('"') {
        return Recognition::NoMatch;
    }
    match text[1..].find('"') {
        Some(end) => Recognition::Matched(Token::new(
            &text[1..1 + end],
            Category::StringLiteral,
            cursor,
            cursor + end + 2,
        )),
        None => Recognition::Unterminated { delimiter_len: 1 },
    }
}

// ============================================================================
// RECOGNIZER SETS
// ============================================================================

/// An explicit, ordered list of recognizers owned by one engine
#[derive(Debug, Clone)]
pub struct RecognizerSet {
    recognizers: Vec<Recognizer>,
}

impl RecognizerSet {
    pub fn new(recognizers: Vec<Recognizer>) -> Self {
        Self { recognizers }
    }

    /// Default order. Longer literal forms come before the forms they
    /// start with, and `++`/`--` come before single-character arithmetic.
    pub fn standard() -> Self {
        Self::new(vec![
            Recognizer::Hexadecimal,
            Recognizer::Decimal,
            Recognizer::Integer,
            Recognizer::LineComment,
            Recognizer::BlockComment,
            Recognizer::Increment,
            Recognizer::Arithmetic,
            Recognizer::Relational,
            Recognizer::Logical,
            Recognizer::Assignment,
            Recognizer::Delimiter,
            Recognizer::Keyword,
            Recognizer::StringLiteral,
            Recognizer::Identifier,
        ])
    }

    /// Historical order. Arithmetic precedes Increment, so `++` always lexes
    /// as two arithmetic operators and Increment never fires.
    pub fn legacy() -> Self {
        Self::new(vec![
            Recognizer::Integer,
            Recognizer::Arithmetic,
            Recognizer::Relational,
            Recognizer::Logical,
            Recognizer::Increment,
            Recognizer::Keyword,
            Recognizer::StringLiteral,
            Recognizer::Identifier,
        ])
    }

    pub fn for_order(order: RecognizerOrder) -> Self {
        match order {
            RecognizerOrder::Standard => Self::standard(),
            RecognizerOrder::Legacy => Self::legacy(),
        }
    }

    /// Place `rules` ahead of every recognizer already in the set
    pub fn with_patterns_first(mut self, rules: Vec<PatternRule>) -> Self {
        let mut recognizers: Vec<Recognizer> = rules.into_iter().map(Recognizer::Pattern).collect();
        recognizers.append(&mut self.recognizers);
        self.recognizers = recognizers;
        self
    }

    pub fn push(&mut self, recognizer: Recognizer) {
        self.recognizers.push(recognizer);
    }

    pub fn len(&self) -> usize {
        self.recognizers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recognizers.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Recognizer> {
        self.recognizers.iter()
    }

    /// The first recognizer that does not report `NoMatch`, with its result
    pub fn recognize(&self, source: &str, cursor: usize) -> Option<(&Recognizer, Recognition)> {
        self.recognizers
            .iter()
            .map(|recognizer| (recognizer, recognizer.recognize(source, cursor)))
            .find(|(_, recognition)| *recognition != Recognition::NoMatch)
    }
}

impl Default for RecognizerSet {
    fn default() -> Self {
        Self::standard()
    }
}
