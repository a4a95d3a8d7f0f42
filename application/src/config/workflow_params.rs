//! Workflow parameters: answer workflow loop control.
//!
//! [`WorkflowParams`] groups the static parameters used to assemble the
//! gateways and the [`AnswerQueryUseCase`](crate::use_cases::answer_query::AnswerQueryUseCase).
//! These are application-layer concerns, not domain policy.

use crate::gateways::DEFAULT_TOP_K;
use assistant_domain::DEFAULT_INTENT_TERMS;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Answer workflow control parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowParams {
    /// Rewrite budget used when the caller supplies only a thread id.
    pub max_rewrites: u32,
    /// Number of documents requested per retrieval.
    pub top_k: usize,
    /// Minimum score a scored hit needs to be kept.
    pub relevance_threshold: Option<f32>,
    /// Timeout for each collaborator call.
    pub request_timeout: Option<Duration>,
    /// Terms that route a question to retrieval.
    pub intent_terms: Vec<String>,
}

impl Default for WorkflowParams {
    fn default() -> Self {
        Self {
            max_rewrites: 2,
            top_k: DEFAULT_TOP_K,
            relevance_threshold: None,
            request_timeout: Some(Duration::from_secs(60)),
            intent_terms: DEFAULT_INTENT_TERMS.iter().map(|t| t.to_string()).collect(),
        }
    }
}

impl WorkflowParams {
    // ==================== Builder Methods ====================

    pub fn with_max_rewrites(mut self, max: u32) -> Self {
        self.max_rewrites = max;
        self
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn with_relevance_threshold(mut self, threshold: Option<f32>) -> Self {
        self.relevance_threshold = threshold;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_intent_terms<I, S>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.intent_terms = terms.into_iter().map(Into::into).collect();
        self
    }
}
