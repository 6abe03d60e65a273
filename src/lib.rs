//! # analyzed-string
//!
//! A string field type whose values are normalized by the analyzer of another,
//! text-analysis field type in the same schema.
//!
//! ## Features
//!
//! - Composable text analysis: tokenizers, token filters and analyzers
//! - Multi-term analysis producing a single normalized term
//! - Reloadable schemas shared across indexing threads
//! - JSON schema configuration and a small command line tool

pub mod analysis;
pub mod cli;
pub mod document;
pub mod error;
pub mod schema;

pub mod prelude {
    pub use crate::analysis::{Analyzer, Term, analyze_multi_term};
    pub use crate::document::Document;
    pub use crate::error::{AnalyzedStringError, ErrorCode, Result};
    pub use crate::schema::{
        AnalyzedStringFieldType, FieldType, IndexSchema, IndexableField, SchemaConfig,
    };
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
