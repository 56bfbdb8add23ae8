// Internal modules
pub mod batch;
pub mod config;
pub mod file_processor;
pub mod grammar;
pub mod lexical;
#[macro_use]
pub mod logging;
pub mod tokens;
pub mod utils;

// Re-export key types for library consumers
pub use batch::{BatchConfig, BatchError, BatchResults, LexedFile};
pub use config::{ConfigError, LexicalPreferences, RuntimeConfig};
pub use file_processor::{FileProcessor, FileProcessorError, SourceFile};
pub use lexical::{analyze, analyze_with_preferences, LexerError, LexicalAnalyzer, LexicalMetrics};
pub use tokens::{Category, Token, TokenSequence};
pub use utils::{Position, SourceMap, Span};
