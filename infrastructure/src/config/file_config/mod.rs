//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod llm;
mod logging;
mod output;
mod prompts;
mod retriever;
mod workflow;

pub use llm::FileLlmConfig;
pub use logging::{FileLoggingConfig, expand_home};
pub use output::FileOutputConfig;
pub use prompts::FilePromptsConfig;
pub use retriever::{FileRetrieverConfig, RetrieverBackend};
pub use workflow::FileWorkflowConfig;

use assistant_application::WorkflowParams;
use assistant_domain::ConfigIssue;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Language model endpoint
    pub llm: FileLlmConfig,
    /// Product search backend
    pub retriever: FileRetrieverConfig,
    /// Answer workflow loop control
    pub workflow: FileWorkflowConfig,
    /// Prompt template overrides
    pub prompts: FilePromptsConfig,
    /// Transcript and diagnostic log files
    pub logging: FileLoggingConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Any issue with [`Severity::Error`](assistant_domain::Severity::Error)
    /// must abort startup.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        issues.extend(self.llm.validate());
        issues.extend(self.retriever.validate());
        issues.extend(self.workflow.validate());
        issues.extend(self.prompts.validate());
        issues
    }

    /// Convert to workflow parameters.
    ///
    /// A negative rewrite budget has already been reported by
    /// [`validate`](Self::validate); it falls back to the default here.
    pub fn to_workflow_params(&self) -> WorkflowParams {
        let defaults = WorkflowParams::default();
        let timeout = match self.workflow.request_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };

        WorkflowParams::default()
            .with_max_rewrites(
                self.workflow
                    .parse_max_rewrites()
                    .0
                    .unwrap_or(defaults.max_rewrites),
            )
            .with_top_k(self.retriever.top_k)
            .with_relevance_threshold(self.retriever.relevance_threshold)
            .with_request_timeout(timeout)
            .with_intent_terms(self.workflow.intent_terms.iter().cloned())
    }
}
