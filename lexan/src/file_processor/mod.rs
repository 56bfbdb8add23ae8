//! Source file loading with size, encoding and extension checks

mod processor;

pub use processor::{FileProcessor, FileProcessorError, SourceFile, SourceMetadata};

/// Load a file with default source preferences
pub fn process_file(path: &str) -> Result<SourceFile, FileProcessorError> {
    FileProcessor::new().process_file(path)
}
