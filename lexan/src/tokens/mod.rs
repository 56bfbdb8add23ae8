//! Token model for lexan
//!
//! A [`Token`] is a lexeme, its [`Category`], and the byte span it occupies
//! in the source. One analysis run yields a [`TokenSequence`] in source
//! order. The category set is closed; mapping categories to display names
//! is left to consumers.

pub mod category;
pub mod sequence;
pub mod token;

pub use category::Category;
pub use sequence::{SequenceError, TokenSequence};
pub use token::Token;
