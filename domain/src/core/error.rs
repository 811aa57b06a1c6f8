//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Invalid tool arguments: {0}")]
    InvalidToolArguments(String),

    #[error("Invalid model: {0}")]
    InvalidModel(String),

    #[error("Unknown export format '{0}' (expected json or text)")]
    InvalidExportFormat(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl DomainError {
    /// Check if this error was caused by malformed tool-call arguments
    pub fn is_argument_error(&self) -> bool {
        matches!(self, DomainError::InvalidToolArguments(_))
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_arguments_display() {
        let error = DomainError::InvalidToolArguments("expected object".to_string());
        assert_eq!(error.to_string(), "Invalid tool arguments: expected object");
    }

    #[test]
    fn test_is_argument_error_check() {
        assert!(DomainError::InvalidToolArguments("x".to_string()).is_argument_error());
        assert!(!DomainError::InvalidModel("".to_string()).is_argument_error());
        assert!(!DomainError::Serialization("x".to_string()).is_argument_error());
    }
}
