//! Configuration for lexan
//!
//! Fixed resource limits live in [`constants::compile_time`]. User
//! preferences live in [`runtime`] and can come from defaults, `LEXAN_*`
//! environment variables, or a TOML file.

pub mod constants;
pub mod runtime;

pub use constants::compile_time;
pub use runtime::{
    CategoryTable, ConfigError, DispatchMode, LexicalPreferences, LoggingPreferences,
    PatternSpec, RecognizerOrder, RuntimeConfig, SourcePreferences, UnterminatedPolicy,
    WhitespacePolicy,
};
