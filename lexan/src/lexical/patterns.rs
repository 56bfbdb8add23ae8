//! Regular-expression rules and the category tables built from them
//!
//! A [`PatternRule`] is anchored at the cursor and always yields the same
//! category. The tables here are what pattern-first dispatch places ahead of
//! the ordered recognizers.

use super::analyzer::LexerError;
use crate::config::runtime::{CategoryTable, PatternSpec};
use crate::tokens::Category;
use once_cell::sync::Lazy;
use regex::Regex;

// ============================================================================
// BUILT-IN PATTERNS
// ============================================================================

static IDENTIFIER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\p{Alphabetic}[\p{Alphabetic}\p{N}_]*").unwrap());

static KEYWORD_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:if|else|while|int|float|boolean|return)\b").unwrap());

/// Matches integers and decimals alike
static NUMERIC_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+(?:\.[0-9]+)?").unwrap());

/// Matches any run of operator characters
static OPERATOR_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-+*/<>=!&|]+").unwrap());

static HEXADECIMAL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^0[xX][0-9a-fA-F]+").unwrap());

static DECIMAL_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+\.[0-9]+").unwrap());

static INTEGER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+").unwrap());

static INCREMENT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:\+\+|--)").unwrap());

static RELATIONAL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:==|!=|<=|>=|<|>)").unwrap());

/// `/` is left out so comments and unterminated `/*` reach the ordered recognizers
static ARITHMETIC_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-+*]").unwrap());

static LOGICAL_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[&|]").unwrap());

static ASSIGNMENT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^=").unwrap());

// ============================================================================
// PATTERN RULE
// ============================================================================

/// A regular expression anchored at the cursor, mapped to one category
#[derive(Debug, Clone)]
pub struct PatternRule {
    pattern: String,
    regex: Regex,
    category: Category,
}

impl PatternRule {
    /// Compile `pattern`. It is anchored at the cursor automatically and
    /// must not be able to match the empty string.
    pub fn new(pattern: &str, category: Category) -> Result<Self, LexerError> {
        let regex = Regex::new(&format!("^(?:{})", pattern)).map_err(|e| {
            LexerError::InvalidPattern {
                pattern: pattern.to_string(),
                reason: e.to_string(),
            }
        })?;

        if regex.is_match("") {
            return Err(LexerError::EmptyMatchPattern {
                pattern: pattern.to_string(),
            });
        }

        Ok(Self {
            pattern: pattern.to_string(),
            regex,
            category,
        })
    }

    pub fn from_spec(spec: &PatternSpec) -> Result<Self, LexerError> {
        Self::new(&spec.pattern, spec.category)
    }

    fn builtin(regex: &Lazy<Regex>, category: Category) -> Self {
        let regex = Regex::clone(regex);
        Self {
            pattern: regex.as_str().trim_start_matches('^').to_string(),
            regex,
            category,
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Byte length of the match at `cursor`. Zero-length matches count as no match.
    pub fn match_len(&self, source: &str, cursor: usize) -> Option<usize> {
        let rest = source.get(cursor..)?;
        self.regex
            .find(rest)
            .map(|m| m.end())
            .filter(|len| *len > 0)
    }
}

// ============================================================================
// CATEGORY TABLES
// ============================================================================

impl CategoryTable {
    /// The rules of this table, in the order they are tried
    pub fn rules(&self) -> Vec<PatternRule> {
        match self {
            CategoryTable::IdentifierOnly => {
                vec![PatternRule::builtin(&IDENTIFIER_REGEX, Category::Identifier)]
            }
            CategoryTable::Collapsed => vec![
                PatternRule::builtin(&IDENTIFIER_REGEX, Category::Identifier),
                PatternRule::builtin(&NUMERIC_REGEX, Category::Integer),
                PatternRule::builtin(&OPERATOR_REGEX, Category::ArithmeticOperator),
            ],
            CategoryTable::Split => vec![
                PatternRule::builtin(&HEXADECIMAL_REGEX, Category::Hexadecimal),
                PatternRule::builtin(&DECIMAL_REGEX, Category::Decimal),
                PatternRule::builtin(&INTEGER_REGEX, Category::Integer),
                PatternRule::builtin(&INCREMENT_REGEX, Category::IncrementOperator),
                PatternRule::builtin(&RELATIONAL_REGEX, Category::RelationalOperator),
                PatternRule::builtin(&ARITHMETIC_REGEX, Category::ArithmeticOperator),
                PatternRule::builtin(&LOGICAL_REGEX, Category::LogicalOperator),
                PatternRule::builtin(&ASSIGNMENT_REGEX, Category::AssignmentOperator),
                PatternRule::builtin(&KEYWORD_REGEX, Category::Keyword),
                PatternRule::builtin(&IDENTIFIER_REGEX, Category::Identifier),
            ],
        }
    }
}
