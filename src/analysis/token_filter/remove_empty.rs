//! Remove empty filter implementation.
//!
//! Drops empty and stopped tokens, cleaning up the stream before indexing.
//!
//! # Examples
//!
//! ```
//! use analyzed_string::analysis::token_filter::Filter;
//! use analyzed_string::analysis::token_filter::remove_empty::RemoveEmptyFilter;
//! use analyzed_string::analysis::token::Token;
//!
//! let filter = RemoveEmptyFilter::new();
//! let tokens = vec![
//!     Token::new("hello", 0),
//!     Token::new("", 1),
//!     Token::new("gone", 2).stop(),
//!     Token::new("world", 3),
//! ];
//!
//! let result: Vec<_> = filter.filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .collect();
//!
//! assert_eq!(result.len(), 2);
//! assert_eq!(result[0].text, "hello");
//! assert_eq!(result[1].text, "world");
//! ```

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// A filter that removes empty and stopped tokens from the stream.
#[derive(Clone, Debug, Default)]
pub struct RemoveEmptyFilter;

impl RemoveEmptyFilter {
    /// Create a new remove empty filter.
    pub fn new() -> Self {
        RemoveEmptyFilter
    }
}

impl Filter for RemoveEmptyFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        Ok(Box::new(
            tokens.filter(|token| !token.is_empty() && !token.is_stopped()),
        ))
    }

    fn name(&self) -> &'static str {
        "remove_empty"
    }
}
