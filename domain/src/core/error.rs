//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Malformed tool arguments: {0}")]
    MalformedArguments(String),

    #[error("Tool arguments must be an object, got {0}")]
    ArgumentsNotAnObject(String),

    #[error("Invalid tool definition: {0}")]
    InvalidToolDefinition(String),

    #[error("Operation cancelled")]
    Cancelled,
}

impl DomainError {
    /// Check if this error represents a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, DomainError::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(DomainError::Cancelled.to_string(), "Operation cancelled");
        assert_eq!(
            DomainError::ArgumentsNotAnObject("array".to_string()).to_string(),
            "Tool arguments must be an object, got array"
        );
    }

    #[test]
    fn test_is_cancelled_check() {
        assert!(DomainError::Cancelled.is_cancelled());
        assert!(!DomainError::MalformedArguments("eof".to_string()).is_cancelled());
    }
}
