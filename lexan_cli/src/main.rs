//! Command-line front end for lexan
//!
//! Usage:
//!   lexan                         - lex the built-in sample program
//!   lexan -e `<text>`               - lex a string
//!   lexan `<file|dir>`...           - lex files, or every source file under a directory
//!   lexan --no-comments ...         - leave comment tokens out of the listing

mod names;

use clap::{Parser, ValueEnum};
use lexan::batch::{self, BatchConfig};
use lexan::config::{
    CategoryTable, DispatchMode, RecognizerOrder, RuntimeConfig, UnterminatedPolicy,
    WhitespacePolicy,
};
use lexan::logging::{self, codes};
use lexan::{FileProcessor, LexicalAnalyzer, LexicalMetrics, Token, TokenSequence};
use serde::Serialize;
use std::path::{Path, PathBuf};

const SAMPLE_PROGRAM: &str = "\n\t892892\n\tasas\n\t// Esto es un comentario\n\tfloat variable = 3.14\n\t\"cadena de caracteres\"\n\t== != <= >= < >\n\t";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "lexan", version, about = "Lexical analyzer for a small imperative language")]
struct Cli {
    /// Files or directories to lex
    paths: Vec<PathBuf>,

    /// Lex this text instead of files
    #[arg(short = 'e', long = "expr", conflicts_with = "paths")]
    expr: Option<String>,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// ordered | pattern-first
    #[arg(long)]
    dispatch: Option<DispatchMode>,

    /// identifier-only | collapsed | split
    #[arg(long)]
    table: Option<CategoryTable>,

    /// Check single-character arithmetic before `++`/`--`
    #[arg(long)]
    legacy_order: bool,

    /// Emit whitespace as Unrecognized tokens instead of skipping it
    #[arg(long)]
    keep_whitespace: bool,

    /// Swallow the rest of the input after an unterminated literal
    #[arg(long)]
    consume_unterminated: bool,

    /// Worker threads for directory inputs
    #[arg(long)]
    threads: Option<usize>,

    /// Only lex the top level of directory inputs
    #[arg(long)]
    no_recursive: bool,

    /// Leave comment tokens out of the listing
    #[arg(long)]
    no_comments: bool,

    /// Print lexing metrics
    #[arg(long)]
    stats: bool,
}

impl Cli {
    /// Load the configuration file, then layer command-line overrides on top
    fn runtime_config(&self) -> Result<RuntimeConfig, lexan::ConfigError> {
        let mut config = match &self.config {
            Some(path) => RuntimeConfig::load(path)?,
            None => RuntimeConfig::default(),
        };

        let lexical = &mut config.lexical;
        if let Some(mode) = self.dispatch {
            lexical.dispatch_mode = mode;
        }
        if let Some(table) = self.table {
            lexical.category_table = table;
            if self.dispatch.is_none() {
                lexical.dispatch_mode = DispatchMode::PatternFirst;
            }
        }
        if self.legacy_order {
            lexical.recognizer_order = RecognizerOrder::Legacy;
        }
        if self.keep_whitespace {
            lexical.whitespace = WhitespacePolicy::Emit;
        }
        if self.consume_unterminated {
            lexical.unterminated = UnterminatedPolicy::ConsumeToEnd;
        }

        Ok(config)
    }

    fn batch_config(&self, config: &RuntimeConfig) -> BatchConfig {
        let mut batch_config = BatchConfig {
            recursive: !self.no_recursive,
            source: config.source.clone(),
            lexical: config.lexical.clone(),
            ..BatchConfig::default()
        };
        if let Some(threads) = self.threads {
            batch_config.max_threads = threads;
        }
        batch_config
    }
}

#[derive(Serialize)]
struct Report<'a> {
    source: &'a str,
    tokens: Vec<&'a Token>,
    #[serde(skip_serializing_if = "Option::is_none")]
    metrics: Option<&'a LexicalMetrics>,
}

struct Printer {
    format: OutputFormat,
    stats: bool,
    headers: bool,
    comments: bool,
}

impl Printer {
    fn listed<'a>(&self, tokens: &'a TokenSequence) -> Vec<&'a Token> {
        if self.comments {
            tokens.iter().collect()
        } else {
            tokens.significant().collect()
        }
    }

    fn print(
        &self,
        label: &str,
        tokens: &TokenSequence,
        metrics: &LexicalMetrics,
    ) -> Result<(), serde_json::Error> {
        match self.format {
            OutputFormat::Json => {
                let report = Report {
                    source: label,
                    tokens: self.listed(tokens),
                    metrics: self.stats.then_some(metrics),
                };
                println!("{}", serde_json::to_string(&report)?);
            }
            OutputFormat::Text => {
                if self.headers {
                    println!("==> {} <==", label);
                }
                for token in self.listed(tokens) {
                    println!("{} -> {}", token.lexeme, names::category_name(token.category));
                }
                if self.stats {
                    print_stats(metrics);
                }
            }
        }
        Ok(())
    }
}

fn print_stats(metrics: &LexicalMetrics) {
    println!(
        "-- {} tokens, {} unrecognized, {} unterminated, {} whitespace bytes skipped",
        metrics.total_tokens,
        metrics.unrecognized_tokens,
        metrics.unterminated_literals,
        metrics.whitespace_bytes_skipped
    );
    for (category, count) in &metrics.category_counts {
        println!("--   {:<20} {}", names::category_name(*category), count);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = cli.runtime_config()?;
    logging::init_global_logging_with_preferences(config.logging.clone())?;
    if let Some(path) = &cli.config {
        lexan::log_success!(codes::success::CONFIG_LOADED, "Configuration loaded",
            "path" => path.display()
        );
    }

    let printer = Printer {
        format: cli.format,
        stats: cli.stats,
        headers: cli.paths.len() > 1 || cli.paths.iter().any(|p| p.is_dir()),
        comments: !cli.no_comments,
    };

    if cli.paths.is_empty() {
        let (label, source) = match &cli.expr {
            Some(expr) => ("<expr>", expr.as_str()),
            None => ("<sample>", SAMPLE_PROGRAM),
        };
        let mut analyzer = LexicalAnalyzer::with_preferences(config.lexical.clone())?;
        let tokens = analyzer.analyze(source);
        printer.print(label, &tokens, analyzer.metrics())?;
        return Ok(());
    }

    let mut failures = 0;
    for path in &cli.paths {
        let outcome = if path.is_dir() {
            lex_directory(path, &cli, &config, &printer)
        } else {
            lex_file(path, &config, &printer)
        };
        if let Err(error) = outcome {
            eprintln!("error: {}: {}", path.display(), error);
            failures += 1;
        }
    }

    if failures > 0 {
        std::process::exit(1);
    }
    Ok(())
}

fn lex_file(
    path: &Path,
    config: &RuntimeConfig,
    printer: &Printer,
) -> Result<(), Box<dyn std::error::Error>> {
    let label = path.display().to_string();
    let source_file = FileProcessor::from_preferences(config.source.clone()).process_file(&label)?;

    let mut analyzer = LexicalAnalyzer::with_preferences(config.lexical.clone())?;
    let tokens = analyzer.analyze(&source_file.source);
    printer.print(&label, &tokens, analyzer.metrics())?;
    Ok(())
}

fn lex_directory(
    path: &Path,
    cli: &Cli,
    config: &RuntimeConfig,
    printer: &Printer,
) -> Result<(), Box<dyn std::error::Error>> {
    let results = batch::process_directory(path, &cli.batch_config(config))?;

    for file in &results.successful_files {
        printer.print(&file.path.display().to_string(), &file.tokens, &file.metrics)?;
    }
    for (file, error) in &results.failed_files {
        eprintln!("error: {}: {}", file.display(), error);
    }
    if cli.stats {
        eprintln!("{}", results.summary());
    }

    if results.failure_count() > 0 {
        return Err(format!("{} file(s) could not be lexed", results.failure_count()).into());
    }
    Ok(())
}
