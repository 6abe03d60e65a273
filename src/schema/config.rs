//! JSON schema configuration.
//!
//! A schema file declares field types (by factory class, with their
//! configuration mapping and optional analyzers) and the fields that use
//! them:
//!
//! ```json
//! {
//!   "name": "catalog",
//!   "field_types": [
//!     { "name": "lowercase_text", "class": "text",
//!       "analyzer": { "tokenizer": { "type": "whole" },
//!                     "filters": [ { "type": "strip" }, { "type": "lowercase" } ] } },
//!     { "name": "normalized", "class": "analyzed_string",
//!       "args": { "fieldType": "lowercase_text", "stored": true } }
//!   ],
//!   "fields": [ { "name": "title_sort", "type": "normalized" } ]
//! }
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::analysis::analyzer::{
    Analyzer, KeywordAnalyzer, PipelineAnalyzer, SimpleAnalyzer, StandardAnalyzer,
};
use crate::analysis::token_filter::{
    Filter, LowercaseFilter, RemoveEmptyFilter, StopFilter, StripFilter,
};
use crate::analysis::tokenizer::{
    RegexTokenizer, Tokenizer, UnicodeWordTokenizer, WhitespaceTokenizer, WholeTokenizer,
};
use crate::error::Result;
use crate::schema::field::SchemaField;
use crate::schema::field_type::FieldTypeArgs;

fn default_schema_name() -> String {
    "default".to_string()
}

/// Top-level schema configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SchemaConfig {
    #[serde(default = "default_schema_name")]
    pub name: String,

    #[serde(default)]
    pub field_types: Vec<FieldTypeConfig>,

    #[serde(default)]
    pub fields: Vec<FieldConfig>,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        SchemaConfig {
            name: default_schema_name(),
            field_types: Vec::new(),
            fields: Vec::new(),
        }
    }
}

impl SchemaConfig {
    /// Parse a schema configuration from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a schema configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Add a field type declaration.
    pub fn with_field_type(mut self, field_type: FieldTypeConfig) -> Self {
        self.field_types.push(field_type);
        self
    }

    /// Add a field declaration.
    pub fn with_field(mut self, field: FieldConfig) -> Self {
        self.fields.push(field);
        self
    }
}

/// Declaration of one field type.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FieldTypeConfig {
    pub name: String,

    pub class: String,

    /// The configuration mapping passed to the type's `init`.
    #[serde(default, deserialize_with = "deserialize_args")]
    pub args: FieldTypeArgs,

    /// Analyzer used for both indexing and queries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analyzer: Option<AnalyzerConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_analyzer: Option<AnalyzerConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_analyzer: Option<AnalyzerConfig>,
}

impl FieldTypeConfig {
    /// Create a declaration with no arguments or analyzers.
    pub fn new<N: Into<String>, C: Into<String>>(name: N, class: C) -> Self {
        FieldTypeConfig {
            name: name.into(),
            class: class.into(),
            args: FieldTypeArgs::new(),
            analyzer: None,
            index_analyzer: None,
            query_analyzer: None,
        }
    }

    /// Add a configuration argument.
    pub fn with_arg<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.args.insert(key.into(), value.into());
        self
    }

    /// Set the analyzer used for both indexing and queries.
    pub fn with_analyzer(mut self, analyzer: AnalyzerConfig) -> Self {
        self.analyzer = Some(analyzer);
        self
    }

    /// Whether any analyzer is configured.
    pub fn has_analyzers(&self) -> bool {
        self.analyzer.is_some() || self.index_analyzer.is_some() || self.query_analyzer.is_some()
    }
}

/// Accept strings, booleans and numbers as argument values.
fn deserialize_args<'de, D>(deserializer: D) -> std::result::Result<FieldTypeArgs, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = HashMap::<String, Value>::deserialize(deserializer)?;
    raw.into_iter()
        .map(|(key, value)| match value {
            Value::String(s) => Ok((key, s)),
            Value::Bool(b) => Ok((key, b.to_string())),
            Value::Number(n) => Ok((key, n.to_string())),
            other => Err(serde::de::Error::custom(format!(
                "argument {key:?} must be a string, boolean or number, got {other}"
            ))),
        })
        .collect()
}

/// Declaration of one field.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FieldConfig {
    pub name: String,

    #[serde(rename = "type")]
    pub field_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stored: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indexed: Option<bool>,

    #[serde(default, alias = "multiValued", skip_serializing_if = "Option::is_none")]
    pub multi_valued: Option<bool>,
}

impl FieldConfig {
    /// Declare a field of the given type with the type's default properties.
    pub fn new<N: Into<String>, T: Into<String>>(name: N, field_type: T) -> Self {
        FieldConfig {
            name: name.into(),
            field_type: field_type.into(),
            stored: None,
            indexed: None,
            multi_valued: None,
        }
    }
}

impl From<&FieldConfig> for SchemaField {
    fn from(config: &FieldConfig) -> Self {
        SchemaField {
            name: config.name.clone(),
            field_type: config.field_type.clone(),
            stored: config.stored,
            indexed: config.indexed,
            multi_valued: config.multi_valued,
        }
    }
}

/// Built-in analyzers selectable by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuiltinAnalyzer {
    Standard,
    Keyword,
    Simple,
}

/// Analyzer declaration: a built-in by name, or a tokenizer plus filters.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnalyzerConfig {
    Builtin {
        builtin: BuiltinAnalyzer,
    },
    Pipeline {
        tokenizer: TokenizerConfig,
        #[serde(default)]
        filters: Vec<FilterConfig>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
}

impl AnalyzerConfig {
    /// A pipeline analyzer declaration.
    pub fn pipeline(tokenizer: TokenizerConfig, filters: Vec<FilterConfig>) -> Self {
        AnalyzerConfig::Pipeline {
            tokenizer,
            filters,
            name: None,
        }
    }

    /// Instantiate the analyzer.
    pub fn build(&self) -> Result<Arc<dyn Analyzer>> {
        match self {
            AnalyzerConfig::Builtin { builtin } => Ok(match builtin {
                BuiltinAnalyzer::Standard => Arc::new(StandardAnalyzer::new()?),
                BuiltinAnalyzer::Keyword => Arc::new(KeywordAnalyzer::new()),
                BuiltinAnalyzer::Simple => {
                    Arc::new(SimpleAnalyzer::new(Arc::new(UnicodeWordTokenizer::new())))
                }
            }),
            AnalyzerConfig::Pipeline {
                tokenizer,
                filters,
                name,
            } => {
                let mut analyzer = PipelineAnalyzer::new(tokenizer.build()?);
                for filter in filters {
                    analyzer = analyzer.add_filter(filter.build());
                }
                if let Some(name) = name {
                    analyzer = analyzer.with_name(name.clone());
                }
                Ok(Arc::new(analyzer))
            }
        }
    }
}

fn default_regex_pattern() -> String {
    crate::analysis::tokenizer::regex::DEFAULT_PATTERN.to_string()
}

/// Tokenizer declaration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TokenizerConfig {
    Whole,
    Whitespace,
    Regex {
        #[serde(default = "default_regex_pattern")]
        pattern: String,
        #[serde(default)]
        gaps: bool,
    },
    UnicodeWord,
}

impl TokenizerConfig {
    /// Instantiate the tokenizer.
    pub fn build(&self) -> Result<Arc<dyn Tokenizer>> {
        Ok(match self {
            TokenizerConfig::Whole => Arc::new(WholeTokenizer::new()),
            TokenizerConfig::Whitespace => Arc::new(WhitespaceTokenizer::new()),
            TokenizerConfig::Regex { pattern, gaps } => {
                if *gaps {
                    Arc::new(RegexTokenizer::with_gaps(pattern)?)
                } else {
                    Arc::new(RegexTokenizer::with_pattern(pattern)?)
                }
            }
            TokenizerConfig::UnicodeWord => Arc::new(UnicodeWordTokenizer::new()),
        })
    }
}

/// Token filter declaration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FilterConfig {
    Lowercase,
    Strip,
    Stop {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        words: Option<Vec<String>>,
    },
    RemoveEmpty,
}

impl FilterConfig {
    /// Instantiate the filter.
    pub fn build(&self) -> Arc<dyn Filter> {
        match self {
            FilterConfig::Lowercase => Arc::new(LowercaseFilter::new()),
            FilterConfig::Strip => Arc::new(StripFilter::new()),
            FilterConfig::Stop { words: None } => Arc::new(StopFilter::new()),
            FilterConfig::Stop { words: Some(words) } => {
                Arc::new(StopFilter::from_words(words.iter().cloned()))
            }
            FilterConfig::RemoveEmpty => Arc::new(RemoveEmptyFilter::new()),
        }
    }
}
