//! Language model configuration from TOML (`[llm]` section)

use assistant_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

/// OpenAI-compatible chat completions endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLlmConfig {
    /// Base URL of the API (`/chat/completions` is appended)
    pub endpoint: String,
    /// Model identifier sent with every request
    pub model: String,
    /// Environment variable name holding the API key (default: "OPENAI_API_KEY")
    pub api_key_env: String,
    /// Sampling temperature; provider default when unset
    pub temperature: Option<f32>,
    /// Maximum tokens per completion; provider default when unset
    pub max_tokens: Option<u32>,
}

impl Default for FileLlmConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            temperature: None,
            max_tokens: None,
        }
    }
}

impl FileLlmConfig {
    pub(super) fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        for (field, value) in [
            ("llm.endpoint", &self.endpoint),
            ("llm.model", &self.model),
            ("llm.api_key_env", &self.api_key_env),
        ] {
            if value.trim().is_empty() {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::MissingValue {
                        field: field.to_string(),
                    },
                    format!("{} cannot be empty", field),
                ));
            }
        }

        if let Some(t) = self.temperature
            && !(0.0..=2.0).contains(&t)
        {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::OutOfRange {
                    field: "llm.temperature".to_string(),
                    value: t.to_string(),
                },
                format!("llm.temperature must be between 0 and 2, got {}", t),
            ));
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(FileLlmConfig::default().validate().is_empty());
    }

    #[test]
    fn test_empty_model_is_error() {
        let config = FileLlmConfig {
            model: " ".to_string(),
            ..Default::default()
        };
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert!(issues[0].is_error());
    }

    #[test]
    fn test_temperature_out_of_range() {
        let config = FileLlmConfig {
            temperature: Some(3.5),
            ..Default::default()
        };
        assert!(matches!(
            config.validate()[0].code,
            ConfigIssueCode::OutOfRange { .. }
        ));
    }
}
