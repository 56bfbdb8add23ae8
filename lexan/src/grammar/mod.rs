pub mod keywords;

pub use keywords::{is_word_char, Keyword};
