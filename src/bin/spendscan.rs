//! spendscan CLI - pattern-based transaction extraction over message files
//!
//! Reads notification messages, runs them through the pattern registry, and
//! writes the recognized transactions as NDJSON.

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process;

use spendscan::{
    serialization, PatternRegistry, PatternSetConfig, RawMessage, TransactionExtractor,
};

#[derive(Parser)]
#[command(name = "spendscan")]
#[command(version, about = "Pattern-based transaction extraction from notification messages", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum InputFormat {
    /// One message body per line
    Lines,
    /// One JSON object per line: {"body": "...", "sender": "..."}
    Ndjson,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract transactions from a message file
    Parse {
        /// Input file ("-" for stdin)
        #[arg(default_value = "-")]
        input: String,

        /// Input format
        #[arg(short, long, value_enum, default_value = "lines")]
        format: InputFormat,

        /// Additional pattern-set YAML, appended behind the built-ins
        #[arg(short, long)]
        patterns: Option<PathBuf>,

        /// Use only the fixed spent-template, no other built-ins
        #[arg(long)]
        default_only: bool,

        /// Screen out promotional/scam messages before matching
        #[arg(long)]
        spam_filter: bool,

        /// Attach a spending category to each record
        #[arg(long)]
        categorize: bool,

        /// Output file for NDJSON records (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate a pattern-set YAML without running it
    Validate {
        /// Path to pattern-set YAML
        patterns: PathBuf,
    },

    /// List active patterns in priority order
    Patterns {
        /// Additional pattern-set YAML, appended behind the built-ins
        #[arg(short, long)]
        patterns: Option<PathBuf>,

        /// Use only the fixed spent-template, no other built-ins
        #[arg(long)]
        default_only: bool,
    },
}

fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Parse {
            input,
            format,
            patterns,
            default_only,
            spam_filter,
            categorize,
            output,
        } => parse_messages(
            input,
            format,
            patterns,
            default_only,
            spam_filter,
            categorize,
            output,
        ),
        Commands::Validate { patterns } => validate_patterns(patterns),
        Commands::Patterns {
            patterns,
            default_only,
        } => list_patterns(patterns, default_only),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Build the registry from the CLI flags.
fn build_registry(
    patterns: Option<&PathBuf>,
    default_only: bool,
) -> Result<PatternRegistry, String> {
    let mut registry = if default_only {
        PatternRegistry::with_default().map_err(|e| e.to_string())?
    } else {
        PatternRegistry::builtin().map_err(|e| e.to_string())?
    };

    if let Some(path) = patterns {
        let config = PatternSetConfig::load_from_file(path)?;
        config.apply_to(&mut registry)?;
    }

    Ok(registry)
}

/// Read messages in the requested format.
fn read_messages(input: &str, format: InputFormat) -> Result<Vec<RawMessage>, String> {
    let reader: Box<dyn BufRead> = if input == "-" {
        Box::new(BufReader::new(io::stdin()))
    } else {
        let file = fs::File::open(input)
            .map_err(|e| format!("Failed to open input file {}: {}", input, e))?;
        Box::new(BufReader::new(file))
    };

    let mut messages = Vec::new();
    for (line_no, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| format!("Failed to read input: {}", e))?;
        if line.trim().is_empty() {
            continue;
        }

        match format {
            InputFormat::Lines => messages.push(RawMessage::new(line)),
            InputFormat::Ndjson => {
                let msg: RawMessage = serde_json::from_str(&line).map_err(|e| {
                    format!("Invalid message JSON on line {}: {}", line_no + 1, e)
                })?;
                messages.push(msg);
            }
        }
    }

    Ok(messages)
}

/// Extract transactions from a message file
fn parse_messages(
    input: String,
    format: InputFormat,
    patterns: Option<PathBuf>,
    default_only: bool,
    spam_filter: bool,
    categorize: bool,
    output: Option<PathBuf>,
) -> Result<(), String> {
    let registry = build_registry(patterns.as_ref(), default_only)?;

    let mut extractor = TransactionExtractor::new(registry);
    if spam_filter {
        extractor = extractor.with_spam_filter().map_err(|e| e.to_string())?;
    }
    if categorize {
        extractor = extractor.with_categorization();
    }

    let messages = read_messages(&input, format)?;
    let total = messages.len();
    let summary = extractor.extract_batch(messages);

    match output {
        Some(path) => {
            let mut file = fs::File::create(&path)
                .map_err(|e| format!("Failed to create output file {}: {}", path.display(), e))?;
            serialization::write_ndjson(&mut file, &summary.records)
                .map_err(|e| format!("Failed to write records: {}", e))?;
            println!("  ✓ Wrote {} records to {}", summary.parsed, path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            serialization::write_ndjson(&mut handle, &summary.records)
                .map_err(|e| format!("Failed to write records: {}", e))?;
            handle
                .flush()
                .map_err(|e| format!("Failed to flush output: {}", e))?;
        }
    }

    eprintln!(
        "✨ Parsed {} of {} messages ({} unmatched)",
        summary.parsed, total, summary.failed
    );

    Ok(())
}

/// Validate a pattern-set YAML without running it
fn validate_patterns(path: PathBuf) -> Result<(), String> {
    println!("🔍 Validating patterns in {}...", path.display());

    let config = PatternSetConfig::load_from_file(&path)?;

    println!("  ✓ {} patterns validated", config.count());
    for def in &config.patterns {
        println!("    - {}", def.name);
    }
    println!("✅ Pattern set is valid!");

    Ok(())
}

/// List active patterns in priority order
fn list_patterns(patterns: Option<PathBuf>, default_only: bool) -> Result<(), String> {
    let registry = build_registry(patterns.as_ref(), default_only)?;

    println!("Active patterns (priority order):");
    for name in registry.pattern_names() {
        println!("  - {}", name);
    }

    Ok(())
}
