//! Error types for the analyzed-string library.
//!
//! All errors are represented by the [`AnalyzedStringError`] enum. Errors that
//! are caused by the caller (a bad schema declaration, a reference to a field
//! type that does not exist) are reported as [`AnalyzedStringError::BadRequest`]
//! and map to [`ErrorCode::BadRequest`]; everything else is a server-side error.
//!
//! # Examples
//!
//! ```
//! use analyzed_string::error::{AnalyzedStringError, ErrorCode, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(AnalyzedStringError::bad_request("fieldType attribute is required"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => assert_eq!(e.code(), ErrorCode::BadRequest),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for analyzed-string operations.
#[derive(Error, Debug)]
pub enum AnalyzedStringError {
    /// I/O errors (reading schema or document files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Schema-related errors
    #[error("Schema error: {0}")]
    Schema(String),

    /// Analysis-related errors (tokenization, filtering, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Field-related errors
    #[error("Field error: {0}")]
    Field(String),

    /// Client request errors (bad configuration, unresolvable references)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with AnalyzedStringError.
pub type Result<T> = std::result::Result<T, AnalyzedStringError>;

/// Coarse classification of an error, in the manner of HTTP status codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// The request (or the schema it carries) is invalid.
    BadRequest,
    /// Something went wrong while serving a valid request.
    ServerError,
}

impl ErrorCode {
    /// The numeric status for this code.
    pub fn status(&self) -> u16 {
        match self {
            ErrorCode::BadRequest => 400,
            ErrorCode::ServerError => 500,
        }
    }
}

impl AnalyzedStringError {
    /// Create a new schema error.
    pub fn schema<S: Into<String>>(msg: S) -> Self {
        AnalyzedStringError::Schema(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        AnalyzedStringError::Analysis(msg.into())
    }

    /// Create a new field error.
    pub fn field<S: Into<String>>(msg: S) -> Self {
        AnalyzedStringError::Field(msg.into())
    }

    /// Create a new client request error.
    pub fn bad_request<S: Into<String>>(msg: S) -> Self {
        AnalyzedStringError::BadRequest(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        AnalyzedStringError::Other(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        AnalyzedStringError::Schema(format!("Invalid configuration: {}", msg.into()))
    }

    /// Prefix the error with the line of the input it came from.
    ///
    /// The error keeps its class. Malformed JSON on a line is the client's
    /// fault and becomes a bad request.
    pub fn at_line(self, line: usize) -> Self {
        use AnalyzedStringError::*;
        match self {
            Schema(msg) => Schema(format!("line {line}: {msg}")),
            Analysis(msg) => Analysis(format!("line {line}: {msg}")),
            Field(msg) => Field(format!("line {line}: {msg}")),
            BadRequest(msg) => BadRequest(format!("line {line}: {msg}")),
            Other(msg) => Other(format!("line {line}: {msg}")),
            Json(e) => Self::bad_request(format!("line {line}: invalid document: {e}")),
            Io(e) => Self::other(format!("line {line}: {e}")),
            Anyhow(e) => Self::other(format!("line {line}: {e:#}")),
        }
    }

    /// The error code this error maps to.
    pub fn code(&self) -> ErrorCode {
        match self {
            AnalyzedStringError::BadRequest(_) => ErrorCode::BadRequest,
            _ => ErrorCode::ServerError,
        }
    }

    /// Whether this error was caused by the client.
    pub fn is_bad_request(&self) -> bool {
        self.code() == ErrorCode::BadRequest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = AnalyzedStringError::schema("Test schema error");
        assert_eq!(error.to_string(), "Schema error: Test schema error");

        let error = AnalyzedStringError::analysis("Test analysis error");
        assert_eq!(error.to_string(), "Analysis error: Test analysis error");

        let error = AnalyzedStringError::bad_request("missing attribute");
        assert_eq!(error.to_string(), "Bad request: missing attribute");
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            AnalyzedStringError::bad_request("x").code(),
            ErrorCode::BadRequest
        );
        assert_eq!(
            AnalyzedStringError::analysis("x").code(),
            ErrorCode::ServerError
        );
        assert_eq!(ErrorCode::BadRequest.status(), 400);
        assert_eq!(ErrorCode::ServerError.status(), 500);
        assert!(AnalyzedStringError::bad_request("x").is_bad_request());
    }

    #[test]
    fn test_at_line_keeps_class() {
        let error = AnalyzedStringError::field("undefined field: x").at_line(3);
        assert!(matches!(error, AnalyzedStringError::Field(_)));
        assert_eq!(error.to_string(), "Field error: line 3: undefined field: x");

        let json_error = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let error = AnalyzedStringError::from(json_error).at_line(7);
        assert!(error.is_bad_request());
        assert!(error.to_string().starts_with("Bad request: line 7: invalid document:"));

        let io_error = io::Error::other("disk gone");
        let error = AnalyzedStringError::from(io_error).at_line(2);
        assert_eq!(error.code(), ErrorCode::ServerError);
        assert_eq!(error.to_string(), "Error: line 2: disk gone");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = AnalyzedStringError::from(io_error);

        match error {
            AnalyzedStringError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }
}
