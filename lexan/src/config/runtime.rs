// RUNTIME PREFERENCES (User Experience)

use crate::tokens::Category;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::compile_time;

/// Errors raised while loading a runtime configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },
}

// ============================================================================
// LEXICAL POLICIES
// ============================================================================

/// How the engine chooses recognizers at each cursor position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchMode {
    /// Run the ordered recognizer set only
    #[default]
    Ordered,
    /// Try the category table's patterns before the ordered set
    PatternFirst,
}

/// Which built-in recognizer order to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecognizerOrder {
    /// Corrected order: `++`/`--` are checked before single-character arithmetic
    #[default]
    Standard,
    /// The historical order, in which the increment recognizer is unreachable
    Legacy,
}

/// Pattern table consulted in pattern-first dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryTable {
    /// A single identifier pattern
    #[default]
    IdentifierOnly,
    /// One numeric pattern mapped to `Integer`, one operator pattern mapped
    /// to `ArithmeticOperator`
    Collapsed,
    /// One pattern per category
    Split,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WhitespacePolicy {
    /// Whitespace between tokens is discarded
    #[default]
    Skip,
    /// Whitespace is lexed like any other input and ends up as `Unrecognized`
    Emit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnterminatedPolicy {
    /// Emit the opening delimiter as `Unrecognized` and resume after it
    #[default]
    CharByChar,
    /// Emit one `Unrecognized` token from the opening delimiter to end of input
    ConsumeToEnd,
}

fn normalize(value: &str) -> String {
    value.trim().to_lowercase().replace('-', "_")
}

impl FromStr for DispatchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "ordered" => Ok(Self::Ordered),
            "pattern_first" | "pattern" => Ok(Self::PatternFirst),
            other => Err(format!("unknown dispatch mode '{}'", other)),
        }
    }
}

impl FromStr for RecognizerOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "standard" => Ok(Self::Standard),
            "legacy" => Ok(Self::Legacy),
            other => Err(format!("unknown recognizer order '{}'", other)),
        }
    }
}

impl FromStr for CategoryTable {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "identifier_only" | "identifier" => Ok(Self::IdentifierOnly),
            "collapsed" => Ok(Self::Collapsed),
            "split" => Ok(Self::Split),
            other => Err(format!("unknown category table '{}'", other)),
        }
    }
}

impl FromStr for WhitespacePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "skip" => Ok(Self::Skip),
            "emit" | "keep" => Ok(Self::Emit),
            other => Err(format!("unknown whitespace policy '{}'", other)),
        }
    }
}

impl FromStr for UnterminatedPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "char_by_char" => Ok(Self::CharByChar),
            "consume_to_end" => Ok(Self::ConsumeToEnd),
            other => Err(format!("unknown unterminated policy '{}'", other)),
        }
    }
}

/// A user-supplied pattern rule: a regular expression and the category it yields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternSpec {
    pub pattern: String,
    pub category: Category,
}

impl PatternSpec {
    pub fn new(pattern: impl Into<String>, category: Category) -> Self {
        Self {
            pattern: pattern.into(),
            category,
        }
    }
}

// ============================================================================
// PREFERENCE GROUPS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexicalPreferences {
    pub dispatch_mode: DispatchMode,

    pub recognizer_order: RecognizerOrder,

    /// Only consulted when `dispatch_mode` is `PatternFirst`
    pub category_table: CategoryTable,

    pub whitespace: WhitespacePolicy,

    pub unterminated: UnterminatedPolicy,

    /// Extra pattern rules, tried ahead of the category table and every built-in recognizer
    pub extra_patterns: Vec<PatternSpec>,

    /// Whether to log a warning for every `Unrecognized` token
    pub log_unrecognized: bool,

    /// Whether to collect per-category counts and the longest lexeme
    pub collect_detailed_metrics: bool,
}

impl LexicalPreferences {
    /// Built-in lexing behavior, independent of the process environment
    pub fn builtin() -> Self {
        Self {
            dispatch_mode: DispatchMode::Ordered,
            recognizer_order: RecognizerOrder::Standard,
            category_table: CategoryTable::IdentifierOnly,
            whitespace: WhitespacePolicy::Skip,
            unterminated: UnterminatedPolicy::CharByChar,
            extra_patterns: Vec::new(),
            log_unrecognized: true,
            collect_detailed_metrics: true,
        }
    }
}

/// The built-in behavior with `LEXAN_*` environment overrides applied
impl Default for LexicalPreferences {
    fn default() -> Self {
        let builtin = Self::builtin();
        Self {
            dispatch_mode: env::var(env_vars::LEXICAL_DISPATCH_MODE)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(builtin.dispatch_mode),
            recognizer_order: env::var(env_vars::LEXICAL_RECOGNIZER_ORDER)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(builtin.recognizer_order),
            category_table: env::var(env_vars::LEXICAL_CATEGORY_TABLE)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(builtin.category_table),
            whitespace: env::var(env_vars::LEXICAL_WHITESPACE)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(builtin.whitespace),
            unterminated: env::var(env_vars::LEXICAL_UNTERMINATED)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(builtin.unterminated),
            extra_patterns: builtin.extra_patterns,
            log_unrecognized: env::var(env_vars::LEXICAL_LOG_UNRECOGNIZED)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(builtin.log_unrecognized),
            collect_detailed_metrics: env::var(env_vars::LEXICAL_DETAILED_METRICS)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(builtin.collect_detailed_metrics),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcePreferences {
    /// File extensions (without the dot) recognized as lexan sources
    pub extensions: Vec<String>,

    /// Whether files with other extensions are rejected
    pub require_extension: bool,
}

/// The built-in source policy with `LEXAN_*` environment overrides applied
impl Default for SourcePreferences {
    fn default() -> Self {
        let builtin = Self::builtin();
        Self {
            extensions: env::var(env_vars::SOURCE_EXTENSIONS)
                .ok()
                .map(|v| parse_extension_list(&v))
                .filter(|list| !list.is_empty())
                .unwrap_or(builtin.extensions),
            require_extension: env::var(env_vars::SOURCE_REQUIRE_EXTENSION)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(builtin.require_extension),
        }
    }
}

impl SourcePreferences {
    /// Built-in source policy, independent of the process environment
    pub fn builtin() -> Self {
        Self {
            extensions: compile_time::source::DEFAULT_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            require_extension: false,
        }
    }

    pub fn matches(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                self.extensions
                    .iter()
                    .any(|allowed| allowed.eq_ignore_ascii_case(ext))
            })
            .unwrap_or(false)
    }
}

fn parse_extension_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|ext| ext.trim().trim_start_matches('.').to_string())
        .filter(|ext| !ext.is_empty())
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingPreferences {
    /// Whether to emit JSON lines instead of text
    pub use_structured_logging: bool,

    /// Whether log events are written to the console at all
    pub enable_console_logging: bool,

    pub min_log_level: LogLevel,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env::var(env_vars::LOGGING_USE_STRUCTURED)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            enable_console_logging: env::var(env_vars::LOGGING_ENABLE_CONSOLE)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            min_log_level: env::var(env_vars::LOGGING_MIN_LEVEL)
                .ok()
                .and_then(|v| parse_log_level(&v))
                .unwrap_or(LogLevel::Info),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error = 0,
    Warning = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }

    pub fn to_events_log_level(&self) -> crate::logging::events::LogLevel {
        use crate::logging::events::LogLevel as Events;
        match self {
            LogLevel::Error => Events::Error,
            LogLevel::Warning => Events::Warning,
            LogLevel::Info => Events::Info,
            LogLevel::Debug => Events::Debug,
        }
    }
}

/// Parse log level from string (used for environment variables)
fn parse_log_level(level: &str) -> Option<LogLevel> {
    match level.to_lowercase().as_str() {
        "error" | "0" => Some(LogLevel::Error),
        "warning" | "warn" | "1" => Some(LogLevel::Warning),
        "info" | "2" => Some(LogLevel::Info),
        "debug" | "3" => Some(LogLevel::Debug),
        _ => None,
    }
}

// ============================================================================
// RUNTIME CONFIG
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub lexical: LexicalPreferences,
    pub source: SourcePreferences,
    pub logging: LoggingPreferences,
}

impl RuntimeConfig {
    /// Parse a TOML document. Missing sections and keys fall back to defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: RuntimeConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Check that every configured pattern compiles and cannot match empty input
    pub fn validate(&self) -> Result<(), ConfigError> {
        for spec in &self.lexical.extra_patterns {
            crate::lexical::PatternRule::from_spec(spec).map_err(|e| {
                ConfigError::InvalidPattern {
                    pattern: spec.pattern.clone(),
                    reason: e.to_string(),
                }
            })?;
        }
        Ok(())
    }
}

/// Environment variable names for configuration
pub mod env_vars {
    // Lexical
    pub const LEXICAL_DISPATCH_MODE: &str = "LEXAN_DISPATCH_MODE";
    pub const LEXICAL_RECOGNIZER_ORDER: &str = "LEXAN_RECOGNIZER_ORDER";
    pub const LEXICAL_CATEGORY_TABLE: &str = "LEXAN_CATEGORY_TABLE";
    pub const LEXICAL_WHITESPACE: &str = "LEXAN_WHITESPACE";
    pub const LEXICAL_UNTERMINATED: &str = "LEXAN_UNTERMINATED";
    pub const LEXICAL_LOG_UNRECOGNIZED: &str = "LEXAN_LOG_UNRECOGNIZED";
    pub const LEXICAL_DETAILED_METRICS: &str = "LEXAN_LEXICAL_DETAILED_METRICS";

    // Source
    pub const SOURCE_EXTENSIONS: &str = "LEXAN_SOURCE_EXTENSIONS";
    pub const SOURCE_REQUIRE_EXTENSION: &str = "LEXAN_REQUIRE_EXTENSION";

    // Logging
    pub const LOGGING_USE_STRUCTURED: &str = "LEXAN_LOGGING_USE_STRUCTURED";
    pub const LOGGING_ENABLE_CONSOLE: &str = "LEXAN_LOGGING_ENABLE_CONSOLE";
    pub const LOGGING_MIN_LEVEL: &str = "LEXAN_LOGGING_MIN_LEVEL";
}
