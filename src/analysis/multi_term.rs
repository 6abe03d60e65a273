//! Multi-term analysis.
//!
//! Wildcard, prefix and range matching need the *single* normalized form of a
//! value rather than a full token stream. [`analyze_multi_term`] runs a value
//! through an analyzer and insists on exactly one surviving token, returning
//! it as raw term bytes.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use analyzed_string::analysis::analyzer::PipelineAnalyzer;
//! use analyzed_string::analysis::multi_term::analyze_multi_term;
//! use analyzed_string::analysis::token_filter::LowercaseFilter;
//! use analyzed_string::analysis::tokenizer::WholeTokenizer;
//!
//! let analyzer = PipelineAnalyzer::new(Arc::new(WholeTokenizer::new()))
//!     .add_filter(Arc::new(LowercaseFilter::new()));
//!
//! let term = analyze_multi_term("title", "Hello World", &analyzer).unwrap();
//! assert_eq!(term.utf8_to_string().unwrap(), "hello world");
//! ```

use std::fmt;

use log::trace;

use crate::analysis::analyzer::Analyzer;
use crate::error::{AnalyzedStringError, Result};

/// A single analyzed term as raw bytes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Term {
    bytes: Vec<u8>,
}

impl Term {
    /// Create a term from raw bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Term { bytes }
    }

    /// The raw bytes of this term.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of bytes in this term.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the term has no bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Decode the term bytes as UTF-8 text.
    pub fn utf8_to_string(&self) -> Result<String> {
        String::from_utf8(self.bytes.clone()).map_err(|e| {
            AnalyzedStringError::analysis(format!("term is not valid UTF-8: {e}"))
        })
    }

    /// Consume the term and decode its bytes as UTF-8 text.
    pub fn into_string(self) -> Result<String> {
        String::from_utf8(self.bytes).map_err(|e| {
            AnalyzedStringError::analysis(format!("term is not valid UTF-8: {e}"))
        })
    }
}

impl From<String> for Term {
    fn from(text: String) -> Self {
        Term {
            bytes: text.into_bytes(),
        }
    }
}

impl From<&str> for Term {
    fn from(text: &str) -> Self {
        Term {
            bytes: text.as_bytes().to_vec(),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.bytes))
    }
}

/// Analyze `text` with `analyzer` into exactly one term.
///
/// Stopped tokens are ignored. An analyzer that yields no tokens, or more
/// than one, fails with a bad request error naming the offending text: the
/// value cannot be used as a single term.
pub fn analyze_multi_term(field: &str, text: &str, analyzer: &dyn Analyzer) -> Result<Term> {
    let mut tokens = analyzer
        .analyze(text)?
        .filter(|token| !token.is_stopped());

    let first = tokens.next().ok_or_else(|| {
        AnalyzedStringError::bad_request(format!(
            "analyzer returned no terms for multiTerm term: {text}"
        ))
    })?;

    if tokens.next().is_some() {
        return Err(AnalyzedStringError::bad_request(format!(
            "analyzer returned too many terms for multiTerm term: {text}"
        )));
    }

    trace!(
        "multi-term analysis of {field:?} with {}: {text:?} -> {:?}",
        analyzer.name(),
        first.text
    );

    Ok(Term::from(first.text))
}
