//! Custom error types for bankbook
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for bankbook operations
#[derive(Error, Debug)]
pub enum BankbookError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// CSV read/write errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// Field parsing/validation errors
    #[error("Parse error: {0}")]
    Parse(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl BankbookError {
    /// Create a parse error for a named field
    pub fn bad_field(field: &str, value: impl Into<String>) -> Self {
        Self::Parse(format!("invalid {}: '{}'", field, value.into()))
    }

    /// Check if this is a parse error
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse(_))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for BankbookError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for BankbookError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for BankbookError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

/// Result type alias for bankbook operations
pub type BankbookResult<T> = Result<T, BankbookError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BankbookError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_display() {
        let err = BankbookError::NotFound {
            entity_type: "Wallet",
            identifier: "/tmp/nowhere".into(),
        };
        assert_eq!(err.to_string(), "Wallet not found: /tmp/nowhere");
    }

    #[test]
    fn test_bad_field_error() {
        let err = BankbookError::bad_field("date", "2024-13-40");
        assert_eq!(err.to_string(), "Parse error: invalid date: '2024-13-40'");
        assert!(err.is_parse());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let bankbook_err: BankbookError = io_err.into();
        assert!(matches!(bankbook_err, BankbookError::Io(_)));
    }
}
