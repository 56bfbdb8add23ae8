//! File processor implementation

use crate::config::constants::compile_time::source::{MAX_FILE_SIZE, MAX_LINE_COUNT};
use crate::config::runtime::SourcePreferences;
use crate::logging::codes;
use crate::{log_debug, log_error, log_success};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FileProcessorError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Not a regular file: {path}")]
    NotAFile { path: String },

    #[error("Invalid file extension {extension:?}: expected one of {expected:?}")]
    InvalidExtension {
        extension: Option<String>,
        expected: Vec<String>,
    },

    #[error("File too large: {size} bytes (max: {max_size})")]
    FileTooLarge { size: u64, max_size: u64 },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("Invalid UTF-8 encoding in file: {path}")]
    InvalidEncoding { path: String },

    #[error("I/O error reading file: {message}")]
    IoError { message: String },

    #[error("File exceeds maximum line count: {lines} (max: {max_lines})")]
    TooManyLines { lines: usize, max_lines: usize },
}

impl FileProcessorError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            FileProcessorError::FileNotFound { .. } => codes::file_processing::FILE_NOT_FOUND,
            FileProcessorError::InvalidExtension { .. } => {
                codes::file_processing::INVALID_EXTENSION
            }
            FileProcessorError::FileTooLarge { .. } => codes::file_processing::FILE_TOO_LARGE,
            FileProcessorError::PermissionDenied { .. } => {
                codes::file_processing::PERMISSION_DENIED
            }
            FileProcessorError::InvalidEncoding { .. } => codes::file_processing::INVALID_ENCODING,
            FileProcessorError::NotAFile { .. } | FileProcessorError::IoError { .. } => {
                codes::file_processing::IO_ERROR
            }
            FileProcessorError::TooManyLines { .. } => codes::file_processing::TOO_MANY_LINES,
        }
    }

    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.error_code().as_str())
    }

    pub fn is_recoverable(&self) -> bool {
        codes::is_recoverable(self.error_code().as_str())
    }

    pub fn category(&self) -> &'static str {
        codes::get_category(self.error_code().as_str())
    }

    fn from_io(path: &Path, error: std::io::Error) -> Self {
        let path = path.display().to_string();
        match error.kind() {
            std::io::ErrorKind::NotFound => FileProcessorError::FileNotFound { path },
            std::io::ErrorKind::PermissionDenied => FileProcessorError::PermissionDenied { path },
            _ => FileProcessorError::IoError {
                message: format!("'{}': {}", path, error),
            },
        }
    }
}

/// What was learned about a file while loading it
#[derive(Debug, Clone)]
pub struct SourceMetadata {
    pub path: PathBuf,
    pub size: u64,
    pub extension: Option<String>,
    pub line_count: usize,
    /// Whether the extension is one of the configured source extensions
    pub is_source_file: bool,
}

/// A loaded, validated source buffer
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub source: String,
    pub metadata: SourceMetadata,
    pub load_duration: Duration,
}

impl SourceFile {
    pub fn char_count(&self) -> usize {
        self.source.chars().count()
    }

    /// Whether the file holds nothing but whitespace
    pub fn is_effectively_empty(&self) -> bool {
        self.source.trim().is_empty()
    }
}

/// Loads source files for lexing
///
/// Size and line limits are compile-time constants; only the extension
/// policy comes from [`SourcePreferences`].
#[derive(Debug, Clone)]
pub struct FileProcessor {
    preferences: SourcePreferences,
}

impl Default for FileProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl FileProcessor {
    /// Processor with the built-in source policy
    pub fn new() -> Self {
        Self::from_preferences(SourcePreferences::builtin())
    }

    pub fn from_preferences(preferences: SourcePreferences) -> Self {
        Self { preferences }
    }

    pub fn with_extension_required(mut self, required: bool) -> Self {
        self.preferences.require_extension = required;
        self
    }

    pub fn preferences(&self) -> &SourcePreferences {
        &self.preferences
    }

    pub fn max_file_size() -> u64 {
        MAX_FILE_SIZE
    }

    /// Load `file_path` as UTF-8 text after validating it
    pub fn process_file(&self, file_path: &str) -> Result<SourceFile, FileProcessorError> {
        let start_time = Instant::now();
        log_debug!("Starting file processing", "file" => file_path);

        let path = Path::new(file_path);
        let size = self.validate_path(path, file_path)?;
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase());
        let is_source_file = self.preferences.matches(path);

        if self.preferences.require_extension && !is_source_file {
            let error = FileProcessorError::InvalidExtension {
                extension: extension.clone(),
                expected: self.preferences.extensions.clone(),
            };
            log_error!(error.error_code(), "File does not have a source extension",
                "file" => file_path,
                "extension" => extension.as_deref().unwrap_or("none"),
                "expected" => self.preferences.extensions.join(","));
            return Err(error);
        }

        if size > MAX_FILE_SIZE {
            let error = FileProcessorError::FileTooLarge {
                size,
                max_size: MAX_FILE_SIZE,
            };
            log_error!(error.error_code(), "File exceeds maximum size",
                "file" => file_path,
                "size_bytes" => size,
                "limit_bytes" => MAX_FILE_SIZE);
            return Err(error);
        }

        let source = self.read_source(path, file_path)?;

        let line_count = source.lines().count();
        if line_count > MAX_LINE_COUNT {
            let error = FileProcessorError::TooManyLines {
                lines: line_count,
                max_lines: MAX_LINE_COUNT,
            };
            log_error!(error.error_code(), "File exceeds maximum line count",
                "file" => file_path,
                "lines" => line_count,
                "max_lines" => MAX_LINE_COUNT);
            return Err(error);
        }

        let result = SourceFile {
            metadata: SourceMetadata {
                path: path.to_path_buf(),
                size,
                extension,
                line_count,
                is_source_file,
            },
            source,
            load_duration: start_time.elapsed(),
        };

        log_success!(
            codes::success::FILE_PROCESSING_SUCCESS,
            "File loaded",
            "file" => file_path,
            "size_bytes" => result.metadata.size,
            "lines" => result.metadata.line_count,
            "duration_ms" => format!("{:.2}", result.load_duration.as_secs_f64() * 1000.0)
        );

        Ok(result)
    }

    /// Check the path names a regular file and return its size
    fn validate_path(&self, path: &Path, file_path: &str) -> Result<u64, FileProcessorError> {
        let metadata = fs::metadata(path).map_err(|e| {
            let error = FileProcessorError::from_io(path, e);
            log_error!(error.error_code(), "Cannot access file",
                "file" => file_path,
                "reason" => &error);
            error
        })?;

        if !metadata.is_file() {
            let error = FileProcessorError::NotAFile {
                path: file_path.to_string(),
            };
            log_error!(error.error_code(), "Path is not a file", "file" => file_path);
            return Err(error);
        }

        Ok(metadata.len())
    }

    fn read_source(&self, path: &Path, file_path: &str) -> Result<String, FileProcessorError> {
        let bytes = fs::read(path).map_err(|e| {
            let error = FileProcessorError::from_io(path, e);
            log_error!(error.error_code(), "Failed to read file",
                "file" => file_path,
                "reason" => &error);
            error
        })?;

        String::from_utf8(bytes).map_err(|e| {
            let error = FileProcessorError::InvalidEncoding {
                path: file_path.to_string(),
            };
            log_error!(error.error_code(), "Invalid UTF-8 encoding in file",
                "file" => file_path,
                "valid_up_to" => e.utf8_error().valid_up_to());
            error
        })
    }
}
