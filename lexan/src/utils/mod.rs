//! Shared utilities used by the lexer and its consumers

pub mod span;

pub use span::{Position, SourceMap, Span};
