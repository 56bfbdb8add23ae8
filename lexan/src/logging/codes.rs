//! Error, warning and success codes with their classification metadata
//!
//! Every code used by lexan is declared here together with its severity and
//! recovery behavior, so log consumers can reason about events by code alone.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for both error and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// CLASSIFICATION TYPES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for a code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

// ============================================================================
// CODE CONSTANTS
// ============================================================================

pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
}

pub mod file_processing {
    use super::Code;

    pub const FILE_NOT_FOUND: Code = Code::new("E005");
    pub const INVALID_EXTENSION: Code = Code::new("E006");
    pub const FILE_TOO_LARGE: Code = Code::new("E007");
    pub const PERMISSION_DENIED: Code = Code::new("E009");
    pub const INVALID_ENCODING: Code = Code::new("E010");
    pub const IO_ERROR: Code = Code::new("E011");
    pub const TOO_MANY_LINES: Code = Code::new("E013");
}

pub mod config {
    use super::Code;

    pub const CONFIG_LOAD_FAILED: Code = Code::new("E015");
    pub const INVALID_PATTERN: Code = Code::new("E016");
    pub const EMPTY_MATCH_PATTERN: Code = Code::new("E017");
}

/// Lexical codes. These are warnings: the engine never fails on input.
pub mod lexical {
    use super::Code;

    pub const UNRECOGNIZED_CHARACTER: Code = Code::new("W020");
    pub const UNTERMINATED_STRING: Code = Code::new("W021");
    pub const UNTERMINATED_COMMENT: Code = Code::new("W022");
}

pub mod batch {
    use super::Code;

    pub const DISCOVERY_FAILED: Code = Code::new("E030");
    pub const TOO_MANY_FILES: Code = Code::new("E031");
    pub const WORKER_FAILED: Code = Code::new("E032");
}

pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");
    pub const FILE_PROCESSING_SUCCESS: Code = Code::new("I006");
    pub const CONFIG_LOADED: Code = Code::new("I010");
    pub const TOKENIZATION_COMPLETE: Code = Code::new("I020");
    pub const BATCH_COMPLETE: Code = Code::new("I030");
}

// ============================================================================
// METADATA REGISTRY
// ============================================================================

type Row = (
    &'static str,
    &'static str,
    Severity,
    bool,
    bool,
    &'static str,
    &'static str,
);

// code, category, severity, recoverable, requires_halt, description, action
#[rustfmt::skip]
const REGISTRY_ROWS: &[Row] = &[
    ("ERR001", "System", Severity::Critical, false, true,
        "Critical internal error",
        "File a bug report with the input that triggered it"),
    ("ERR002", "System", Severity::Critical, false, true,
        "Logging or configuration initialization failure",
        "Check configuration values and environment variables"),
    ("E005", "FileProcessing", Severity::Medium, false, false,
        "Source file not found",
        "Check the file path"),
    ("E006", "FileProcessing", Severity::Low, true, false,
        "File extension is not a recognized source extension",
        "Rename the file or relax the extension requirement"),
    ("E007", "FileProcessing", Severity::Medium, false, false,
        "Source file exceeds the maximum size",
        "Split the file"),
    ("E009", "FileProcessing", Severity::Medium, false, false,
        "Permission denied while reading source file",
        "Check file permissions"),
    ("E010", "FileProcessing", Severity::Medium, false, false,
        "Source file is not valid UTF-8",
        "Re-encode the file as UTF-8"),
    ("E011", "FileProcessing", Severity::Medium, false, false,
        "I/O error while reading source file",
        "Retry or check the storage device"),
    ("E013", "FileProcessing", Severity::Medium, false, false,
        "Source file exceeds the maximum line count",
        "Split the file"),
    ("E015", "Config", Severity::High, false, true,
        "Configuration file could not be loaded",
        "Check the config path and TOML syntax"),
    ("E016", "Config", Severity::High, false, true,
        "Configured pattern is not a valid regular expression",
        "Fix the pattern syntax"),
    ("E017", "Config", Severity::High, false, true,
        "Configured pattern can match the empty string",
        "Require at least one character in the pattern"),
    ("W020", "Lexical", Severity::Low, true, false,
        "Character not matched by any recognizer",
        "Downstream consumers decide how to treat Unrecognized tokens"),
    ("W021", "Lexical", Severity::Low, true, false,
        "String literal without a closing quote",
        "Close the string literal"),
    ("W022", "Lexical", Severity::Low, true, false,
        "Block comment without a closing '*/'",
        "Close the block comment"),
    ("E030", "Batch", Severity::Medium, false, false,
        "Source discovery failed",
        "Check that the directory exists and is readable"),
    ("E031", "Batch", Severity::Medium, false, false,
        "Too many files in one batch",
        "Lex the directory in smaller parts"),
    ("E032", "Batch", Severity::High, false, false,
        "A batch worker thread panicked",
        "File a bug report"),
    ("I004", "Success", Severity::Low, true, false,
        "Logging system initialized", "None"),
    ("I006", "Success", Severity::Low, true, false,
        "Source file loaded", "None"),
    ("I010", "Success", Severity::Low, true, false,
        "Configuration loaded", "None"),
    ("I020", "Success", Severity::Low, true, false,
        "Tokenization complete", "None"),
    ("I030", "Success", Severity::Low, true, false,
        "Batch complete", "None"),
];

static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        REGISTRY_ROWS
            .iter()
            .map(
                |&(code, category, severity, recoverable, requires_halt, description, action)| {
                    (
                        code,
                        ErrorMetadata {
                            code,
                            category,
                            severity,
                            recoverable,
                            requires_halt,
                            description,
                            recommended_action: action,
                        },
                    )
                },
            )
            .collect()
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

pub fn get_severity(code: &str) -> Severity {
    get_error_metadata(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

pub fn is_recoverable(code: &str) -> bool {
    get_error_metadata(code)
        .map(|metadata| metadata.recoverable)
        .unwrap_or(true)
}

pub fn requires_halt(code: &str) -> bool {
    get_error_metadata(code)
        .map(|metadata| metadata.requires_halt)
        .unwrap_or(false)
}

pub fn get_description(code: &str) -> &'static str {
    get_error_metadata(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

pub fn get_action(code: &str) -> &'static str {
    get_error_metadata(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

pub fn get_category(code: &str) -> &'static str {
    get_error_metadata(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}
