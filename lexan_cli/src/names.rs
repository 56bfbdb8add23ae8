//! Display names for token categories
//!
//! The library leaves naming to its consumers; this is the table the CLI
//! prints. The match is exhaustive so a new category cannot go unnamed.

use lexan::Category;

pub fn category_name(category: Category) -> &'static str {
    match category {
        Category::Unrecognized => "UNRECOGNIZED",
        Category::Integer => "INTEGER",
        Category::Decimal => "DECIMAL",
        Category::Hexadecimal => "HEXADECIMAL",
        Category::Identifier => "IDENTIFIER",
        Category::Keyword => "KEYWORD",
        Category::StringLiteral => "STRING_LITERAL",
        Category::LineComment => "LINE_COMMENT",
        Category::BlockComment => "BLOCK_COMMENT",
        Category::ArithmeticOperator => "ARITHMETIC_OPERATOR",
        Category::RelationalOperator => "RELATIONAL_OPERATOR",
        Category::LogicalOperator => "LOGICAL_OPERATOR",
        Category::IncrementOperator => "INCREMENT_OPERATOR",
        Category::AssignmentOperator => "ASSIGNMENT_OPERATOR",
        Category::OpenParen => "OPEN_PAREN",
        Category::CloseParen => "CLOSE_PAREN",
        Category::OpenBrace => "OPEN_BRACE",
        Category::CloseBrace => "CLOSE_BRACE",
        Category::Terminator => "TERMINATOR",
        Category::Separator => "SEPARATOR",
    }
}
