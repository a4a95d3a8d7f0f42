//! Configuration issues detected at startup.
//!
//! Loaders validate raw configuration and report every problem at once
//! as a list of [`ConfigIssue`]s. Any [`Severity::Error`] is fatal.

use crate::core::error::DomainError;

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// A required value is absent or blank.
    MissingValue { field: String },
    /// A value is outside its allowed range.
    OutOfRange { field: String, value: String },
    /// A string value does not name a known variant.
    InvalidEnumValue {
        field: String,
        value: String,
        valid_values: Vec<String>,
    },
    /// A prompt template lacks a required placeholder or uses an unknown one.
    InvalidPromptTemplate { kind: String },
}

/// A detected issue in the configuration.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Convert a prompt template error into an issue
    pub fn from_template_error(error: &DomainError) -> Self {
        let kind = match error {
            DomainError::MissingTemplateVariable { kind, .. }
            | DomainError::UnknownPlaceholder { kind, .. } => kind.clone(),
            _ => String::new(),
        };
        Self::error(
            ConfigIssueCode::InvalidPromptTemplate { kind: kind.clone() },
            format!("prompts.{}: {}", kind, error),
        )
    }
}
