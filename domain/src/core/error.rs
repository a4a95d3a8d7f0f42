//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid question: {0}")]
    InvalidQuestion(String),

    #[error("Invalid run config: {0}")]
    InvalidRunConfig(String),

    #[error("Prompt '{kind}' is missing required variable '{key}'")]
    MissingTemplateVariable { kind: String, key: String },

    #[error("Prompt '{kind}' references unknown placeholder '{key}'")]
    UnknownPlaceholder { kind: String, key: String },

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
    fn test_cancelled_error_display() {
        let error = DomainError::Cancelled;
        assert_eq!(error.to_string(), "Operation cancelled");
    }

    #[test]
    fn test_is_cancelled_check() {
        assert!(DomainError::Cancelled.is_cancelled());
        assert!(!DomainError::InvalidQuestion("test".to_string()).is_cancelled());
    }

    #[test]
    fn test_missing_variable_display() {
        let error = DomainError::MissingTemplateVariable {
            kind: "generate".to_string(),
            key: "context".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Prompt 'generate' is missing required variable 'context'"
        );
    }
}
