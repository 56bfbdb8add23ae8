//! Batch lexing of source directories
//!
//! Discovers source files by extension, then lexes them sequentially or on a
//! fixed set of worker threads. Each worker owns its own analyzer; nothing
//! lexical is shared between threads.

use crate::config::constants::compile_time::batch::{
    MAX_DISCOVERY_DEPTH, MAX_FILES_PER_BATCH, MAX_WORKER_THREADS,
};
use crate::config::runtime::{LexicalPreferences, SourcePreferences};
use crate::file_processor::{FileProcessor, FileProcessorError};
use crate::lexical::{LexerError, LexicalAnalyzer, LexicalMetrics};
use crate::logging::{self, codes};
use crate::tokens::TokenSequence;
use crate::{log_debug, log_error, log_info, log_success, log_warning};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

// ============================================================================
// BATCH PROCESSING TYPES
// ============================================================================

#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Worker threads; 1 selects sequential processing
    pub max_threads: usize,
    pub recursive: bool,
    /// Stop discovery after this many files
    pub max_files: Option<usize>,
    /// Stop at the first failed file (sequential mode only)
    pub fail_fast: bool,
    pub source: SourcePreferences,
    pub lexical: LexicalPreferences,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_threads: thread::available_parallelism()
                .map(|n| n.get().min(MAX_WORKER_THREADS))
                .unwrap_or(4),
            recursive: true,
            max_files: None,
            fail_fast: false,
            source: SourcePreferences::builtin(),
            lexical: LexicalPreferences::builtin(),
        }
    }
}

impl BatchConfig {
    /// Thread count actually used, clamped to `1..=MAX_WORKER_THREADS`
    pub fn effective_threads(&self) -> usize {
        self.max_threads.clamp(1, MAX_WORKER_THREADS)
    }
}

/// A successfully lexed file
#[derive(Debug, Clone)]
pub struct LexedFile {
    pub path: PathBuf,
    pub tokens: TokenSequence,
    pub metrics: LexicalMetrics,
}

#[derive(Debug, Default)]
pub struct BatchResults {
    pub successful_files: Vec<LexedFile>,
    pub failed_files: Vec<(PathBuf, FileProcessorError)>,
    pub processing_duration: Duration,
    pub files_processed: usize,
    pub files_discovered: usize,
}

impl BatchResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success_count(&self) -> usize {
        self.successful_files.len()
    }

    pub fn failure_count(&self) -> usize {
        self.failed_files.len()
    }

    pub fn total_tokens(&self) -> usize {
        self.successful_files.iter().map(|file| file.tokens.len()).sum()
    }

    pub fn total_unrecognized(&self) -> usize {
        self.successful_files
            .iter()
            .map(|file| file.metrics.unrecognized_tokens)
            .sum()
    }

    pub fn success_rate(&self) -> f64 {
        if self.files_processed == 0 {
            0.0
        } else {
            self.success_count() as f64 / self.files_processed as f64
        }
    }

    pub fn get(&self, path: &Path) -> Option<&LexedFile> {
        self.successful_files.iter().find(|file| file.path == path)
    }

    fn add_success(&mut self, file: LexedFile) {
        self.successful_files.push(file);
        self.files_processed += 1;
    }

    fn add_failure(&mut self, path: PathBuf, error: FileProcessorError) {
        self.failed_files.push((path, error));
        self.files_processed += 1;
    }

    fn merge(&mut self, other: BatchResults) {
        self.successful_files.extend(other.successful_files);
        self.failed_files.extend(other.failed_files);
        self.files_processed += other.files_processed;
    }

    /// Restore discovery order after parallel collection
    fn sort(&mut self) {
        self.successful_files.sort_by(|a, b| a.path.cmp(&b.path));
        self.failed_files.sort_by(|a, b| a.0.cmp(&b.0));
    }

    pub fn summary(&self) -> String {
        format!(
            "Lexed {} files: {} successful ({:.1}%), {} failed, {} tokens ({} unrecognized), {:.2}s total",
            self.files_processed,
            self.success_count(),
            self.success_rate() * 100.0,
            self.failure_count(),
            self.total_tokens(),
            self.total_unrecognized(),
            self.processing_duration.as_secs_f64()
        )
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: String },

    #[error("No source files found in directory: {path}")]
    NoFilesFound { path: String },

    #[error("Too many files found: {count} (max: {max})")]
    TooManyFiles { count: usize, max: usize },

    #[error("IO error during directory traversal: {error}")]
    IoError { error: String },

    #[error("Worker thread error: {message}")]
    ThreadError { message: String },

    #[error(transparent)]
    Lexer(#[from] LexerError),
}

impl BatchError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            BatchError::DirectoryNotFound { .. }
            | BatchError::NoFilesFound { .. }
            | BatchError::IoError { .. } => codes::batch::DISCOVERY_FAILED,
            BatchError::TooManyFiles { .. } => codes::batch::TOO_MANY_FILES,
            BatchError::ThreadError { .. } => codes::batch::WORKER_FAILED,
            BatchError::Lexer(error) => error.error_code(),
        }
    }
}

// ============================================================================
// FILE DISCOVERY
// ============================================================================

/// Find source files under `dir_path`, sorted by path
pub fn discover_source_files(
    dir_path: &Path,
    config: &BatchConfig,
) -> Result<Vec<PathBuf>, BatchError> {
    log_info!("Starting file discovery",
        "directory" => dir_path.display(),
        "recursive" => config.recursive
    );

    if !dir_path.is_dir() {
        return Err(BatchError::DirectoryNotFound {
            path: dir_path.display().to_string(),
        });
    }

    let mut files = Vec::new();
    visit_directory(dir_path, 0, &mut files, config)?;

    if files.is_empty() {
        return Err(BatchError::NoFilesFound {
            path: dir_path.display().to_string(),
        });
    }

    files.sort();

    log_debug!("File discovery completed",
        "files_found" => files.len(),
        "directory" => dir_path.display()
    );

    Ok(files)
}

/// Returns `false` once the soft `max_files` limit stops discovery
fn visit_directory(
    dir_path: &Path,
    depth: usize,
    files: &mut Vec<PathBuf>,
    config: &BatchConfig,
) -> Result<bool, BatchError> {
    if depth > MAX_DISCOVERY_DEPTH {
        log_warning!("Skipping directory beyond maximum depth",
            "directory" => dir_path.display(),
            "max_depth" => MAX_DISCOVERY_DEPTH
        );
        return Ok(true);
    }

    let entries = fs::read_dir(dir_path).map_err(|e| BatchError::IoError {
        error: format!("{}: {}", dir_path.display(), e),
    })?;

    for entry in entries {
        let path = entry
            .map_err(|e| BatchError::IoError {
                error: e.to_string(),
            })?
            .path();

        if path.is_dir() {
            if config.recursive && !visit_directory(&path, depth + 1, files, config)? {
                return Ok(false);
            }
            continue;
        }

        if !(path.is_file() && config.source.matches(&path)) {
            continue;
        }

        files.push(path);

        if files.len() > MAX_FILES_PER_BATCH {
            return Err(BatchError::TooManyFiles {
                count: files.len(),
                max: MAX_FILES_PER_BATCH,
            });
        }

        if let Some(max_files) = config.max_files {
            if files.len() >= max_files {
                log_warning!("Reached maximum file limit",
                    "files_found" => files.len(),
                    "limit" => max_files
                );
                return Ok(false);
            }
        }
    }

    Ok(true)
}

// ============================================================================
// PER-FILE WORK
// ============================================================================

fn lex_file(
    path: &Path,
    processor: &FileProcessor,
    analyzer: &mut LexicalAnalyzer,
) -> Result<LexedFile, FileProcessorError> {
    let path_str = path.to_str().ok_or_else(|| FileProcessorError::IoError {
        message: format!("path is not valid UTF-8: {}", path.display()),
    })?;

    let source_file = processor.process_file(path_str)?;
    let tokens = analyzer.analyze(&source_file.source);

    Ok(LexedFile {
        path: path.to_path_buf(),
        tokens,
        metrics: analyzer.metrics().clone(),
    })
}

fn record(
    results: &mut BatchResults,
    path: &Path,
    outcome: Result<LexedFile, FileProcessorError>,
) {
    match outcome {
        Ok(file) => results.add_success(file),
        Err(error) => {
            log_error!(error.error_code(), "File lexing failed",
                "file" => path.display(),
                "reason" => &error
            );
            results.add_failure(path.to_path_buf(), error);
        }
    }
}

// ============================================================================
// BATCH PROCESSING
// ============================================================================

/// Lex a directory one file at a time
pub fn process_directory_sequential(
    dir_path: &Path,
    config: &BatchConfig,
) -> Result<BatchResults, BatchError> {
    let start_time = Instant::now();
    let mut analyzer = LexicalAnalyzer::with_preferences(config.lexical.clone())?;
    let processor = FileProcessor::from_preferences(config.source.clone());

    let files = discover_source_files(dir_path, config)?;
    let mut results = BatchResults::new();
    results.files_discovered = files.len();

    for (file_id, path) in files.iter().enumerate() {
        let outcome = logging::with_file_context(path.clone(), file_id, || {
            lex_file(path, &processor, &mut analyzer)
        });
        let failed = outcome.is_err();
        record(&mut results, path, outcome);

        if failed && config.fail_fast {
            log_warning!("Fail-fast mode enabled, stopping batch");
            break;
        }
    }

    results.processing_duration = start_time.elapsed();
    log_completion(&results, 1);
    Ok(results)
}

/// Lex a directory on up to `max_threads` worker threads
pub fn process_directory_parallel(
    dir_path: &Path,
    config: &BatchConfig,
) -> Result<BatchResults, BatchError> {
    let start_time = Instant::now();
    let analyzer = LexicalAnalyzer::with_preferences(config.lexical.clone())?;
    let processor = FileProcessor::from_preferences(config.source.clone());
    let threads = config.effective_threads();

    let files = discover_source_files(dir_path, config)?;
    let files_per_thread = files.len().div_ceil(threads);

    log_debug!("Parallel batch configuration",
        "total_files" => files.len(),
        "files_per_thread" => files_per_thread,
        "threads" => threads
    );

    let shared = Arc::new(Mutex::new(BatchResults::new()));
    let mut handles = Vec::with_capacity(threads);

    for (chunk_id, chunk) in files.chunks(files_per_thread).enumerate() {
        let thread_files = chunk.to_vec();
        let first_file_id = chunk_id * files_per_thread;
        let shared = Arc::clone(&shared);
        let processor = processor.clone();
        let mut analyzer = analyzer.clone();

        handles.push(thread::spawn(move || {
            let mut local = BatchResults::new();
            for (offset, path) in thread_files.iter().enumerate() {
                let file_id = first_file_id + offset;
                let outcome = logging::with_file_context(path.clone(), file_id, || {
                    lex_file(path, &processor, &mut analyzer)
                });
                record(&mut local, path, outcome);
            }
            shared
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .merge(local);
        }));
    }

    let mut panicked = 0;
    for handle in handles {
        if handle.join().is_err() {
            panicked += 1;
        }
    }
    if panicked > 0 {
        log_error!(codes::batch::WORKER_FAILED, "Worker thread panicked",
            "workers" => panicked
        );
        return Err(BatchError::ThreadError {
            message: format!("{} worker thread(s) panicked", panicked),
        });
    }

    let mut results = Arc::try_unwrap(shared)
        .map_err(|_| BatchError::ThreadError {
            message: "results still shared after workers joined".to_string(),
        })?
        .into_inner()
        .unwrap_or_else(PoisonError::into_inner);

    results.files_discovered = files.len();
    results.sort();
    results.processing_duration = start_time.elapsed();
    log_completion(&results, threads);
    Ok(results)
}

fn log_completion(results: &BatchResults, threads: usize) {
    log_success!(
        codes::success::BATCH_COMPLETE,
        "Batch lexing completed",
        "files_processed" => results.files_processed,
        "successful" => results.success_count(),
        "failed" => results.failure_count(),
        "tokens" => results.total_tokens(),
        "threads" => threads,
        "duration_ms" => format!("{:.2}", results.processing_duration.as_secs_f64() * 1000.0)
    );
}

// ============================================================================
// PUBLIC API
// ============================================================================

/// Lex a directory, choosing sequential or parallel mode from `max_threads`
pub fn process_directory(
    dir_path: &Path,
    config: &BatchConfig,
) -> Result<BatchResults, BatchError> {
    if config.effective_threads() == 1 {
        process_directory_sequential(dir_path, config)
    } else {
        process_directory_parallel(dir_path, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::Category;
    use assert_matches::assert_matches;
    use tempfile::tempdir;

    fn config(threads: usize) -> BatchConfig {
        BatchConfig {
            max_threads: threads,
            source: SourcePreferences {
                extensions: vec!["lx".to_string()],
                require_extension: false,
            },
            lexical: LexicalPreferences::builtin(),
            ..BatchConfig::default()
        }
    }

    fn write_tree(root: &Path) {
        fs::write(root.join("a.lx"), "int x = 1").unwrap();
        fs::write(root.join("b.lx"), "while x <= 10 x++").unwrap();
        fs::write(root.join("notes.md"), "ignored").unwrap();
        fs::create_dir(root.join("nested")).unwrap();
        fs::write(root.join("nested").join("c.lx"), "\"str\" @").unwrap();
    }

    #[test]
    fn test_file_discovery() {
        let dir = tempdir().unwrap();
        write_tree(dir.path());

        let files = discover_source_files(dir.path(), &config(1)).unwrap();
        assert_eq!(files.len(), 3);
        assert!(files.iter().all(|f| f.extension().unwrap() == "lx"));
        assert!(files.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_non_recursive_discovery() {
        let dir = tempdir().unwrap();
        write_tree(dir.path());

        let mut config = config(1);
        config.recursive = false;
        let files = discover_source_files(dir.path(), &config).unwrap();
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_max_files_limit() {
        let dir = tempdir().unwrap();
        write_tree(dir.path());

        let mut config = config(1);
        config.max_files = Some(1);
        let files = discover_source_files(dir.path(), &config).unwrap();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_discovery_errors() {
        let dir = tempdir().unwrap();
        assert_matches!(
            discover_source_files(dir.path(), &config(1)),
            Err(BatchError::NoFilesFound { .. })
        );
        assert_matches!(
            discover_source_files(&dir.path().join("missing"), &config(1)),
            Err(BatchError::DirectoryNotFound { .. })
        );
    }

    #[test]
    fn test_sequential_batch() {
        let dir = tempdir().unwrap();
        write_tree(dir.path());

        let results = process_directory(dir.path(), &config(1)).unwrap();
        assert_eq!(results.files_discovered, 3);
        assert_eq!(results.success_count(), 3);
        assert_eq!(results.failure_count(), 0);

        let a = results.get(&dir.path().join("a.lx")).unwrap();
        assert_eq!(
            a.tokens.pairs(),
            vec![
                (Category::Keyword, "int"),
                (Category::Identifier, "x"),
                (Category::AssignmentOperator, "="),
                (Category::Integer, "1"),
            ]
        );
        assert_eq!(a.metrics.total_tokens, 4);

        let c = results.get(&dir.path().join("nested").join("c.lx")).unwrap();
        assert_eq!(c.metrics.unrecognized_tokens, 1);
        assert_eq!(results.total_unrecognized(), 1);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let dir = tempdir().unwrap();
        write_tree(dir.path());
        for i in 0..10 {
            fs::write(dir.path().join(format!("gen{}.lx", i)), "x = 0x1F + 2.5").unwrap();
        }

        let sequential = process_directory(dir.path(), &config(1)).unwrap();
        let parallel = process_directory(dir.path(), &config(4)).unwrap();

        assert_eq!(parallel.files_processed, sequential.files_processed);
        let seq_paths: Vec<_> = sequential.successful_files.iter().map(|f| &f.path).collect();
        let par_paths: Vec<_> = parallel.successful_files.iter().map(|f| &f.path).collect();
        assert_eq!(seq_paths, par_paths);
        for (s, p) in sequential
            .successful_files
            .iter()
            .zip(parallel.successful_files.iter())
        {
            assert_eq!(s.tokens, p.tokens);
        }
    }

    #[test]
    fn test_failed_file_is_recorded() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("good.lx"), "x").unwrap();
        fs::write(dir.path().join("bad.lx"), [0xFFu8, 0xFE]).unwrap();

        let results = process_directory(dir.path(), &config(2)).unwrap();
        assert_eq!(results.success_count(), 1);
        assert_eq!(results.failure_count(), 1);
        assert_matches!(
            results.failed_files[0].1,
            FileProcessorError::InvalidEncoding { .. }
        );
    }

    #[test]
    fn test_invalid_pattern_fails_before_discovery() {
        let dir = tempdir().unwrap();
        let mut config = config(1);
        config
            .lexical
            .extra_patterns
            .push(crate::config::PatternSpec::new("(", Category::Identifier));

        let error = process_directory(dir.path(), &config).unwrap_err();
        assert_matches!(error, BatchError::Lexer(LexerError::InvalidPattern { .. }));
        assert_eq!(error.error_code(), codes::config::INVALID_PATTERN);
    }

    #[test]
    fn test_effective_threads_clamped() {
        assert_eq!(config(0).effective_threads(), 1);
        assert_eq!(config(64).effective_threads(), MAX_WORKER_THREADS);
        assert!(BatchConfig::default().effective_threads() >= 1);
    }

    #[test]
    fn test_empty_results_summary() {
        let results = BatchResults::new();
        assert_eq!(results.success_rate(), 0.0);
        assert!(results.summary().starts_with("Lexed 0 files"));
    }
}
