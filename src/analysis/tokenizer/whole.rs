//! Tokenizer emitting the whole value as one token.

use std::iter;

use super::Tokenizer;

use crate::analysis::token::{Token, TokenStream};
use crate::error::Result;

/// Emits exactly one token spanning the entire input.
///
/// An empty value still produces one (empty) token, so keyword-style field
/// types normalize `""` to `""` instead of failing with no terms.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WholeTokenizer;

impl WholeTokenizer {
    pub fn new() -> Self {
        WholeTokenizer
    }
}

impl Tokenizer for WholeTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let whole = Token::with_offsets(text, 0, 0, text.len());
        Ok(Box::new(iter::once(whole)))
    }

    fn name(&self) -> &'static str {
        "whole"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(text: &str) -> Vec<Token> {
        WholeTokenizer::new().tokenize(text).unwrap().collect()
    }

    #[test]
    fn test_value_kept_intact() {
        let tokens = tokens("  Mixed Case, punctuation!  ");

        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text, "  Mixed Case, punctuation!  ");
        assert_eq!((tokens[0].start_offset, tokens[0].end_offset), (0, 28));
    }

    #[test]
    fn test_multibyte_offsets_are_bytes() {
        let tokens = tokens("école");
        assert_eq!(tokens[0].end_offset, "école".len());
    }

    #[test]
    fn test_empty_value_yields_empty_token() {
        let tokens = tokens("");

        assert_eq!(tokens.len(), 1);
        assert!(tokens[0].is_empty());
        assert!(!tokens[0].is_stopped());
    }
}
