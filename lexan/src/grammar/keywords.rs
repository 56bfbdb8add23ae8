//! Reserved words of the language
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Keyword {
    // === CONTROL FLOW ===
    If,
    Else,
    While,
    Return,

    // === TYPE NAMES ===
    Int,
    Float,
    Boolean,
}

impl Keyword {
    /// Every keyword, in the order the recognizer tries them
    pub const ALL: [Keyword; 7] = [
        Keyword::If,
        Keyword::Else,
        Keyword::While,
        Keyword::Int,
        Keyword::Float,
        Keyword::Boolean,
        Keyword::Return,
    ];

    /// Exact spelling in source
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::If => "if",
            Self::Else => "else",
            Self::While => "while",
            Self::Return => "return",
            Self::Int => "int",
            Self::Float => "float",
            Self::Boolean => "boolean",
        }
    }

    /// The keyword `text` starts with, provided the character after it does
    /// not continue a word. `iffy` therefore matches nothing.
    pub fn match_prefix(text: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|keyword| {
            text.strip_prefix(keyword.as_str())
                .map(|rest| !rest.chars().next().is_some_and(is_word_char))
                .unwrap_or(false)
        })
    }
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Characters that may continue an identifier
pub fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}
