//! Command line argument parsing for the analyzed-string CLI using clap.

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// analyzed-string - normalize field values with a schema's analyzers
#[derive(Parser, Debug, Clone)]
#[command(name = "analyzed-string")]
#[command(about = "Convert and analyze field values against a JSON schema")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct AnalyzedStringArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl AnalyzedStringArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Convert raw values of a field to their internal form
    Convert(ConvertArgs),

    /// Convert every document of a JSON Lines file
    #[command(name = "convert-docs")]
    ConvertDocs(ConvertDocsArgs),

    /// Show the tokens a field type's analyzer produces
    Analyze(AnalyzeArgs),

    /// Load a schema and list its field types and fields
    Check(CheckArgs),
}

/// Arguments for converting field values
#[derive(Parser, Debug, Clone)]
pub struct ConvertArgs {
    /// Schema definition file path (JSON)
    #[arg(value_name = "SCHEMA")]
    pub schema: PathBuf,

    /// Field whose type converts the values
    #[arg(value_name = "FIELD")]
    pub field: String,

    /// Raw values to convert
    #[arg(value_name = "VALUE", required = true)]
    pub values: Vec<String>,
}

/// Arguments for converting documents
#[derive(Parser, Debug, Clone)]
pub struct ConvertDocsArgs {
    /// Schema definition file path (JSON)
    #[arg(value_name = "SCHEMA")]
    pub schema: PathBuf,

    /// Document file path (JSON Lines, one object per line)
    #[arg(value_name = "DOCS_JSONL")]
    pub documents: PathBuf,

    /// Stop at the first document that fails to convert
    #[arg(long)]
    pub fail_fast: bool,
}

/// Arguments for analyzing text
#[derive(Parser, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Schema definition file path (JSON)
    #[arg(value_name = "SCHEMA")]
    pub schema: PathBuf,

    /// Name of a text field type
    #[arg(value_name = "FIELD_TYPE")]
    pub field_type: String,

    /// Text to analyze
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// Use the query analyzer instead of the index analyzer
    #[arg(long)]
    pub query: bool,
}

/// Arguments for checking a schema
#[derive(Parser, Debug, Clone)]
pub struct CheckArgs {
    /// Schema definition file path (JSON)
    #[arg(value_name = "SCHEMA")]
    pub schema: PathBuf,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
