//! Closed classification of lexemes

use serde::{Deserialize, Serialize};

/// The category attached to every token.
///
/// The set is fixed: adding a category is a code change. Consumers are
/// expected to `match` on it; human-readable names are their concern.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Unrecognized,
    Integer,
    Decimal,
    Identifier,
    Keyword,
    StringLiteral,
    LineComment,
    BlockComment,
    ArithmeticOperator,
    RelationalOperator,
    LogicalOperator,
    IncrementOperator,
    AssignmentOperator,
    OpenParen,
    CloseParen,
    OpenBrace,
    CloseBrace,
    Terminator,
    Separator,
    Hexadecimal,
}

impl Category {
    /// Every category, in declaration order
    pub const ALL: [Category; 20] = [
        Category::Unrecognized,
        Category::Integer,
        Category::Decimal,
        Category::Identifier,
        Category::Keyword,
        Category::StringLiteral,
        Category::LineComment,
        Category::BlockComment,
        Category::ArithmeticOperator,
        Category::RelationalOperator,
        Category::LogicalOperator,
        Category::IncrementOperator,
        Category::AssignmentOperator,
        Category::OpenParen,
        Category::CloseParen,
        Category::OpenBrace,
        Category::CloseBrace,
        Category::Terminator,
        Category::Separator,
        Category::Hexadecimal,
    ];

    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            Self::Integer | Self::Decimal | Self::Hexadecimal | Self::StringLiteral
        )
    }

    pub fn is_operator(&self) -> bool {
        matches!(
            self,
            Self::ArithmeticOperator
                | Self::RelationalOperator
                | Self::LogicalOperator
                | Self::IncrementOperator
                | Self::AssignmentOperator
        )
    }

    pub fn is_comment(&self) -> bool {
        matches!(self, Self::LineComment | Self::BlockComment)
    }

    pub fn is_delimiter(&self) -> bool {
        matches!(
            self,
            Self::OpenParen
                | Self::CloseParen
                | Self::OpenBrace
                | Self::CloseBrace
                | Self::Terminator
                | Self::Separator
        )
    }
}
