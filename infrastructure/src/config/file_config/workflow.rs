//! Workflow configuration from TOML (`[workflow]` section)

use assistant_domain::{ConfigIssue, ConfigIssueCode, DEFAULT_INTENT_TERMS};
use serde::{Deserialize, Serialize};

/// Raw workflow configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileWorkflowConfig {
    /// Rewrite budget per run. Signed so that negative values can be reported.
    pub max_rewrites: i64,
    /// Timeout for each language model or search call
    pub request_timeout_secs: u64,
    /// Terms that route a question to retrieval
    pub intent_terms: Vec<String>,
}

impl Default for FileWorkflowConfig {
    fn default() -> Self {
        Self {
            max_rewrites: 2,
            request_timeout_secs: 60,
            intent_terms: DEFAULT_INTENT_TERMS.iter().map(|t| t.to_string()).collect(),
        }
    }
}

impl FileWorkflowConfig {
    /// Rewrite budget, or `None` (with an issue) when negative or too large
    pub fn parse_max_rewrites(&self) -> (Option<u32>, Vec<ConfigIssue>) {
        match u32::try_from(self.max_rewrites) {
            Ok(max) => (Some(max), vec![]),
            Err(_) => (
                None,
                vec![ConfigIssue::error(
                    ConfigIssueCode::OutOfRange {
                        field: "workflow.max_rewrites".to_string(),
                        value: self.max_rewrites.to_string(),
                    },
                    format!(
                        "workflow.max_rewrites must be a non-negative integer, got {}",
                        self.max_rewrites
                    ),
                )],
            ),
        }
    }

    pub(super) fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = self.parse_max_rewrites().1;

        if self.request_timeout_secs == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::OutOfRange {
                    field: "workflow.request_timeout_secs".to_string(),
                    value: "0".to_string(),
                },
                "workflow.request_timeout_secs cannot be 0",
            ));
        }

        if self.intent_terms.iter().all(|t| t.trim().is_empty()) {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::MissingValue {
                    field: "workflow.intent_terms".to_string(),
                },
                "workflow.intent_terms is empty; every question will be answered without retrieval",
            ));
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_max_rewrites_is_error() {
        let config = FileWorkflowConfig {
            max_rewrites: -1,
            ..Default::default()
        };
        let (max, issues) = config.parse_max_rewrites();
        assert!(max.is_none());
        assert!(issues[0].is_error());
    }

    #[test]
    fn test_zero_max_rewrites_is_valid() {
        let config = FileWorkflowConfig {
            max_rewrites: 0,
            ..Default::default()
        };
        assert_eq!(config.parse_max_rewrites().0, Some(0));
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_empty_intent_terms_is_warning() {
        let config = FileWorkflowConfig {
            intent_terms: vec![],
            ..Default::default()
        };
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert!(!issues[0].is_error());
    }
}
