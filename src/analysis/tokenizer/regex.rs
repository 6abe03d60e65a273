//! Regex-based tokenizer implementation.

use std::sync::Arc;

use regex::Regex;

use super::Tokenizer;
use crate::analysis::token::{Token, TokenStream};
use crate::error::{AnalyzedStringError, Result};

/// The pattern used by [`RegexTokenizer::new`]: runs of word characters.
pub const DEFAULT_PATTERN: &str = r"\w+";

/// A tokenizer that extracts tokens using a regular expression.
///
/// In the default mode every match becomes a token. In gaps mode the pattern
/// describes separators and the text between matches becomes the tokens.
#[derive(Clone, Debug)]
pub struct RegexTokenizer {
    pattern: Arc<Regex>,
    gaps: bool,
}

impl RegexTokenizer {
    /// Create a new regex tokenizer matching runs of word characters.
    pub fn new() -> Result<Self> {
        Self::with_pattern(DEFAULT_PATTERN)
    }

    /// Create a new regex tokenizer whose matches are the tokens.
    pub fn with_pattern(pattern: &str) -> Result<Self> {
        Ok(RegexTokenizer {
            pattern: Arc::new(Self::compile(pattern)?),
            gaps: false,
        })
    }

    /// Create a tokenizer whose pattern matches the separators between tokens.
    pub fn with_gaps(pattern: &str) -> Result<Self> {
        Ok(RegexTokenizer {
            pattern: Arc::new(Self::compile(pattern)?),
            gaps: true,
        })
    }

    fn compile(pattern: &str) -> Result<Regex> {
        Regex::new(pattern)
            .map_err(|e| AnalyzedStringError::analysis(format!("Invalid regex pattern: {e}")))
    }

    /// Get the regex pattern used by this tokenizer.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Check if this tokenizer extracts gaps.
    pub fn gaps(&self) -> bool {
        self.gaps
    }
}

impl Tokenizer for RegexTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let spans: Vec<(usize, usize)> = if self.gaps {
            let mut spans = Vec::new();
            let mut last_end = 0;
            for mat in self.pattern.find_iter(text) {
                if mat.start() > last_end {
                    spans.push((last_end, mat.start()));
                }
                last_end = mat.end();
            }
            if last_end < text.len() {
                spans.push((last_end, text.len()));
            }
            spans
        } else {
            self.pattern
                .find_iter(text)
                .filter(|mat| !mat.is_empty())
                .map(|mat| (mat.start(), mat.end()))
                .collect()
        };

        let tokens: Vec<Token> = spans
            .into_iter()
            .enumerate()
            .map(|(position, (start, end))| {
                Token::with_offsets(&text[start..end], position, start, end)
            })
            .collect();

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "regex"
    }
}
