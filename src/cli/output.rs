//! Output formatting for CLI commands.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::analysis::token::Token;
use crate::cli::args::{AnalyzedStringArgs, OutputFormat};
use crate::error::Result;
use crate::schema::IndexableField;

/// Results that can be rendered for a terminal.
pub trait HumanReadable {
    /// Render the result as plain text lines.
    fn render_human(&self) -> String;
}

/// Result structure for value conversion.
#[derive(Debug, Serialize, Deserialize)]
pub struct ConversionResult {
    pub field: String,
    pub field_type: String,
    pub values: Vec<ConvertedValue>,
}

/// One raw value and its internal form.
#[derive(Debug, Serialize, Deserialize)]
pub struct ConvertedValue {
    pub input: String,
    pub internal: String,
}

/// Result structure for document conversion.
#[derive(Debug, Serialize, Deserialize)]
pub struct DocumentConversionResult {
    pub documents: Vec<ConvertedDocument>,
    pub converted: usize,
    pub failed: usize,
    pub duration_ms: u64,
}

/// Outcome for a single line of a document file.
#[derive(Debug, Serialize, Deserialize)]
pub struct ConvertedDocument {
    pub line: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<IndexableField>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Result structure for analysis.
#[derive(Debug, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub field_type: String,
    pub analyzer: String,
    pub tokens: Vec<TokenInfo>,
}

/// A token as reported by `analyze`.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenInfo {
    pub text: String,
    pub position: usize,
    pub start_offset: usize,
    pub end_offset: usize,
}

impl From<&Token> for TokenInfo {
    fn from(token: &Token) -> Self {
        TokenInfo {
            text: token.text.clone(),
            position: token.position,
            start_offset: token.start_offset,
            end_offset: token.end_offset,
        }
    }
}

/// Result structure for schema checks.
#[derive(Debug, Serialize, Deserialize)]
pub struct SchemaSummary {
    pub name: String,
    pub version: u64,
    pub field_types: Vec<FieldTypeSummary>,
    pub fields: Vec<FieldSummary>,
}

/// A field type as reported by `check`.
#[derive(Debug, Serialize, Deserialize)]
pub struct FieldTypeSummary {
    pub name: String,
    pub class: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_analyzer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_analyzer: Option<String>,
}

/// A field as reported by `check`.
#[derive(Debug, Serialize, Deserialize)]
pub struct FieldSummary {
    pub name: String,
    pub field_type: String,
    pub stored: bool,
    pub indexed: bool,
    pub multi_valued: bool,
}

impl HumanReadable for ConversionResult {
    fn render_human(&self) -> String {
        let mut out = String::new();
        for value in &self.values {
            let _ = writeln!(out, "{:?} => {:?}", value.input, value.internal);
        }
        out
    }
}

impl HumanReadable for DocumentConversionResult {
    fn render_human(&self) -> String {
        let mut out = String::new();
        for doc in &self.documents {
            match (&doc.fields, &doc.error) {
                (_, Some(error)) => {
                    let _ = writeln!(out, "line {}: error: {error}", doc.line);
                }
                (Some(fields), None) => {
                    let _ = writeln!(out, "line {}:", doc.line);
                    for field in fields {
                        let _ = writeln!(out, "  {}: {:?}", field.name, field.value);
                    }
                }
                (None, None) => {}
            }
        }
        let _ = writeln!(
            out,
            "Converted {} documents ({} failed) in {}ms",
            self.converted, self.failed, self.duration_ms
        );
        out
    }
}

impl HumanReadable for AnalysisResult {
    fn render_human(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{} ({})", self.field_type, self.analyzer);
        for token in &self.tokens {
            let _ = writeln!(
                out,
                "  {:>3}  [{}..{}]  {}",
                token.position, token.start_offset, token.end_offset, token.text
            );
        }
        out
    }
}

impl HumanReadable for SchemaSummary {
    fn render_human(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Schema: {} (version {})", self.name, self.version);

        let _ = writeln!(out, "\nField types:");
        for field_type in &self.field_types {
            let _ = write!(out, "  {} [{}]", field_type.name, field_type.class);
            match (&field_type.index_analyzer, &field_type.query_analyzer) {
                (Some(index), Some(query)) if index != query => {
                    let _ = write!(out, " index={index} query={query}");
                }
                (Some(index), _) => {
                    let _ = write!(out, " analyzer={index}");
                }
                _ => {}
            }
            out.push('\n');
        }

        let _ = writeln!(out, "\nFields:");
        for field in &self.fields {
            let mut flags = Vec::new();
            if field.indexed {
                flags.push("indexed");
            }
            if field.stored {
                flags.push("stored");
            }
            if field.multi_valued {
                flags.push("multiValued");
            }
            let _ = writeln!(
                out,
                "  {}: {} ({})",
                field.name,
                field.field_type,
                flags.join(", ")
            );
        }
        out
    }
}

/// Render a result in the requested format.
pub fn format_result<T: Serialize + HumanReadable>(
    result: &T,
    args: &AnalyzedStringArgs,
) -> Result<String> {
    match args.output_format {
        OutputFormat::Human => Ok(result.render_human()),
        OutputFormat::Json if args.pretty => Ok(serde_json::to_string_pretty(result)? + "\n"),
        OutputFormat::Json => Ok(serde_json::to_string(result)? + "\n"),
    }
}

/// Output a result in the requested format.
pub fn output_result<T: Serialize + HumanReadable>(
    message: &str,
    result: &T,
    args: &AnalyzedStringArgs,
) -> Result<()> {
    if args.output_format == OutputFormat::Human && args.verbosity() > 1 {
        println!("{message}");
        println!();
    }
    print!("{}", format_result(result, args)?);
    Ok(())
}
