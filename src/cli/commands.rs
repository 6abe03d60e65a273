//! Command implementations for the analyzed-string CLI.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use anyhow::Context;
use log::{debug, info, warn};

use crate::cli::args::*;
use crate::cli::output::*;
use crate::document::Document;
use crate::error::{AnalyzedStringError, Result};
use crate::schema::IndexSchema;

/// Execute a CLI command.
pub fn execute_command(args: AnalyzedStringArgs) -> Result<()> {
    match &args.command {
        Command::Convert(convert_args) => {
            let result = convert_values(convert_args)?;
            output_result("Converted values", &result, &args)
        }
        Command::ConvertDocs(docs_args) => {
            let result = convert_documents(docs_args)?;
            output_result("Converted documents", &result, &args)
        }
        Command::Analyze(analyze_args) => {
            let result = analyze_text(analyze_args)?;
            output_result("Analyzed text", &result, &args)
        }
        Command::Check(check_args) => {
            let result = check_schema(check_args)?;
            output_result("Schema loaded successfully", &result, &args)
        }
    }
}

fn load_schema(path: &Path) -> Result<IndexSchema> {
    let schema = IndexSchema::from_file(path)?;
    debug!("schema {:?} has fields {:?}", schema.name(), schema.field_names());
    Ok(schema)
}

/// Convert raw values of one field.
pub fn convert_values(args: &ConvertArgs) -> Result<ConversionResult> {
    let schema = load_schema(&args.schema)?;
    let field = schema
        .field(&args.field)
        .ok_or_else(|| AnalyzedStringError::field(format!("undefined field: {}", args.field)))?;

    let values = args
        .values
        .iter()
        .map(|value| {
            let converted = schema.create_field(&args.field, value)?;
            Ok(ConvertedValue {
                input: value.clone(),
                internal: converted.value,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(ConversionResult {
        field: field.name,
        field_type: field.field_type,
        values,
    })
}

/// Convert every document of a JSON Lines file.
///
/// Blank lines are skipped. Documents are converted in parallel, then
/// reported in line order. A line that fails to parse or convert is counted
/// as failed unless `fail_fast` is set, in which case the failure with the
/// lowest line number is returned, prefixed with that line number.
pub fn convert_documents(args: &ConvertDocsArgs) -> Result<DocumentConversionResult> {
    let schema = load_schema(&args.schema)?;
    let file = File::open(&args.documents)
        .with_context(|| format!("cannot open documents {}", args.documents.display()))?;

    let start_time = Instant::now();
    let mut docs = Vec::new();
    let mut lines: Vec<(usize, Result<()>)> = Vec::new();

    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match Document::from_json_str(&line) {
            Ok(doc) => {
                docs.push(doc);
                lines.push((index + 1, Ok(())));
            }
            Err(e) => lines.push((index + 1, Err(e))),
        }
    }

    let mut converted = schema.convert_documents(&docs).into_iter();
    let mut documents = Vec::with_capacity(lines.len());

    for (line, parsed) in lines {
        let outcome = parsed.and_then(|()| {
            converted
                .next()
                .unwrap_or_else(|| Err(AnalyzedStringError::other("document was not converted")))
        });

        match outcome {
            Ok(fields) => documents.push(ConvertedDocument {
                line,
                fields: Some(fields),
                error: None,
            }),
            Err(e) if args.fail_fast => return Err(e.at_line(line)),
            Err(e) => {
                warn!("document on line {line} failed: {e}");
                documents.push(ConvertedDocument {
                    line,
                    fields: None,
                    error: Some(e.to_string()),
                });
            }
        }
    }

    let failed = documents.iter().filter(|doc| doc.error.is_some()).count();
    let converted = documents.len() - failed;
    let duration = start_time.elapsed();
    info!("converted {converted} documents, {failed} failed");

    Ok(DocumentConversionResult {
        documents,
        converted,
        failed,
        duration_ms: duration.as_millis() as u64,
    })
}

/// Run text through a field type's analyzer.
pub fn analyze_text(args: &AnalyzeArgs) -> Result<AnalysisResult> {
    let schema = load_schema(&args.schema)?;
    let field_type = schema.field_type_by_name(&args.field_type).ok_or_else(|| {
        AnalyzedStringError::bad_request(format!("field type {} doesn't exist", args.field_type))
    })?;

    let analyzer = if args.query {
        field_type.query_analyzer()
    } else {
        field_type.index_analyzer()
    }
    .ok_or_else(|| {
        AnalyzedStringError::bad_request(format!(
            "field type {} ({}) has no analyzer",
            args.field_type,
            field_type.class_name()
        ))
    })?;

    let tokens = analyzer
        .analyze(&args.text)?
        .filter(|token| !token.is_stopped())
        .map(|token| TokenInfo::from(&token))
        .collect();

    Ok(AnalysisResult {
        field_type: args.field_type.clone(),
        analyzer: analyzer.name().to_string(),
        tokens,
    })
}

/// Load a schema and summarize it.
pub fn check_schema(args: &CheckArgs) -> Result<SchemaSummary> {
    let schema = load_schema(&args.schema)?;

    let field_types = schema
        .field_type_names()
        .into_iter()
        .filter_map(|name| schema.field_type_by_name(&name))
        .map(|field_type| FieldTypeSummary {
            name: field_type.type_name().to_string(),
            class: field_type.class_name().to_string(),
            index_analyzer: field_type.index_analyzer().map(|a| a.name().to_string()),
            query_analyzer: field_type.query_analyzer().map(|a| a.name().to_string()),
        })
        .collect();

    let mut fields = Vec::new();
    for name in schema.field_names() {
        let Some(field) = schema.field(&name) else {
            continue;
        };
        let field_type = schema.field_type_by_name(&field.field_type).ok_or_else(|| {
            AnalyzedStringError::schema(format!(
                "Field '{name}' uses unknown field type '{}'",
                field.field_type
            ))
        })?;
        let properties = field.effective_properties(field_type.properties());
        fields.push(FieldSummary {
            name: field.name,
            field_type: field.field_type,
            stored: properties.stored,
            indexed: properties.indexed,
            multi_valued: properties.multi_valued,
        });
    }

    Ok(SchemaSummary {
        name: schema.name(),
        version: schema.version(),
        field_types,
        fields,
    })
}
