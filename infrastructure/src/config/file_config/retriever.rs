//! Retriever configuration from TOML (`[retriever]` section)

use assistant_application::DEFAULT_TOP_K;
use assistant_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

/// Which product search collaborator to build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetrieverBackend {
    /// Remote vector search service
    Http,
    /// Local JSON file scored in memory
    File,
}

impl RetrieverBackend {
    const VALID: [&'static str; 2] = ["http", "file"];
}

/// Raw retriever configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRetrieverConfig {
    /// "http" or "file"
    pub backend: String,
    /// Search endpoint for the http backend
    pub endpoint: String,
    /// JSON document file for the file backend
    pub documents_file: Option<String>,
    /// Documents requested per retrieval
    pub top_k: usize,
    /// Scored hits below this are dropped
    pub relevance_threshold: Option<f32>,
    /// Search endpoint queried when the primary backend finds nothing
    pub fallback_endpoint: Option<String>,
}

impl Default for FileRetrieverConfig {
    fn default() -> Self {
        Self {
            backend: "http".to_string(),
            endpoint: "http://localhost:8000/search".to_string(),
            documents_file: None,
            top_k: DEFAULT_TOP_K,
            relevance_threshold: None,
            fallback_endpoint: None,
        }
    }
}

impl FileRetrieverConfig {
    /// Parse the backend name, returning issues for unknown values
    pub fn parse_backend(&self) -> (Option<RetrieverBackend>, Vec<ConfigIssue>) {
        match self.backend.trim().to_lowercase().as_str() {
            "http" => (Some(RetrieverBackend::Http), vec![]),
            "file" => (Some(RetrieverBackend::File), vec![]),
            other => (
                None,
                vec![ConfigIssue::error(
                    ConfigIssueCode::InvalidEnumValue {
                        field: "retriever.backend".to_string(),
                        value: other.to_string(),
                        valid_values: RetrieverBackend::VALID
                            .iter()
                            .map(|v| v.to_string())
                            .collect(),
                    },
                    format!(
                        "retriever.backend: unknown value '{}', expected one of: {}",
                        other,
                        RetrieverBackend::VALID.join(", ")
                    ),
                )],
            ),
        }
    }

    pub(super) fn validate(&self) -> Vec<ConfigIssue> {
        let (backend, mut issues) = self.parse_backend();

        match backend {
            Some(RetrieverBackend::Http) if self.endpoint.trim().is_empty() => {
                issues.push(missing("retriever.endpoint", "the http backend"));
            }
            Some(RetrieverBackend::File)
                if self
                    .documents_file
                    .as_deref()
                    .is_none_or(|f| f.trim().is_empty()) =>
            {
                issues.push(missing("retriever.documents_file", "the file backend"));
            }
            _ => {}
        }

        if self.top_k == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::OutOfRange {
                    field: "retriever.top_k".to_string(),
                    value: "0".to_string(),
                },
                "retriever.top_k must be at least 1",
            ));
        }

        if let Some(threshold) = self.relevance_threshold
            && !(0.0..=1.0).contains(&threshold)
        {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::OutOfRange {
                    field: "retriever.relevance_threshold".to_string(),
                    value: threshold.to_string(),
                },
                format!(
                    "retriever.relevance_threshold {} is outside 0..1; check the backend's score scale",
                    threshold
                ),
            ));
        }

        issues
    }
}

fn missing(field: &str, needed_by: &str) -> ConfigIssue {
    ConfigIssue::error(
        ConfigIssueCode::MissingValue {
            field: field.to_string(),
        },
        format!("{} is required by {}", field, needed_by),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_backend_case_insensitive() {
        let config = FileRetrieverConfig {
            backend: "FILE".to_string(),
            documents_file: Some("products.json".to_string()),
            ..Default::default()
        };
        assert_eq!(config.parse_backend().0, Some(RetrieverBackend::File));
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_unknown_backend_is_error() {
        let config = FileRetrieverConfig {
            backend: "qdrant".to_string(),
            ..Default::default()
        };
        let (backend, issues) = config.parse_backend();
        assert!(backend.is_none());
        assert!(issues[0].is_error());
    }

    #[test]
    fn test_file_backend_requires_documents_file() {
        let config = FileRetrieverConfig {
            backend: "file".to_string(),
            ..Default::default()
        };
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert!(matches!(
            &issues[0].code,
            ConfigIssueCode::MissingValue { field } if field == "retriever.documents_file"
        ));
    }

    #[test]
    fn test_zero_top_k_is_error() {
        let config = FileRetrieverConfig {
            top_k: 0,
            ..Default::default()
        };
        assert!(config.validate().iter().any(|i| i.is_error()));
    }

    #[test]
    fn test_threshold_outside_unit_range_is_warning() {
        let config = FileRetrieverConfig {
            relevance_threshold: Some(7.0),
            ..Default::default()
        };
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert!(!issues[0].is_error());
    }
}
