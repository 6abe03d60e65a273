//! Text analysis for field types.
//!
//! Tokenizers split text into tokens, filters transform the token stream, and
//! analyzers combine the two. [`multi_term::analyze_multi_term`] reduces a
//! value to the single normalized term used for exact, range and prefix
//! matching.

pub mod analyzer;
pub mod multi_term;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

// Re-export commonly used types
pub use analyzer::*;
pub use multi_term::{Term, analyze_multi_term};
pub use token::*;
pub use token_filter::*;
pub use tokenizer::*;
