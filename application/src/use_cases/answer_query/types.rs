//! Type definitions for the AnswerQuery use case.

use crate::gateways::GenerationError;
use crate::ports::llm_gateway::GatewayError;
use assistant_domain::{ConversationState, DomainError, WorkflowStep};
use serde::Serialize;
use thiserror::Error;

/// Errors that abort an answer workflow run.
///
/// None of these carry a partial answer.
#[derive(Error, Debug)]
pub enum AnswerQueryError {
    /// Invalid input, run config or prompt contract. Fatal, never retried.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A collaborator call failed, timed out or returned an unusable result.
    #[error("Dependency failure at {} step: {source}", step.as_str())]
    DependencyFailure {
        step: WorkflowStep,
        #[source]
        source: GatewayError,
    },

    #[error("Operation cancelled")]
    Cancelled,

    /// The state machine reached an inconsistent state.
    #[error("Orchestration error: {0}")]
    Orchestration(String),
}

impl AnswerQueryError {
    /// Check if this error represents a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, AnswerQueryError::Cancelled)
    }

    /// Dependency failures and cancellations: the run was aborted midway
    pub fn is_abort(&self) -> bool {
        matches!(
            self,
            AnswerQueryError::DependencyFailure { .. } | AnswerQueryError::Cancelled
        )
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, AnswerQueryError::Configuration(_))
    }

    pub(crate) fn from_generation(step: WorkflowStep, error: GenerationError) -> Self {
        match error {
            GenerationError::InvalidArgument(e) => AnswerQueryError::Configuration(e.to_string()),
            GenerationError::Gateway(source) => AnswerQueryError::DependencyFailure { step, source },
        }
    }

    pub(crate) fn from_gateway(step: WorkflowStep, source: GatewayError) -> Self {
        AnswerQueryError::DependencyFailure { step, source }
    }
}

impl From<DomainError> for AnswerQueryError {
    fn from(error: DomainError) -> Self {
        match error {
            DomainError::Cancelled => AnswerQueryError::Cancelled,
            other => AnswerQueryError::Configuration(other.to_string()),
        }
    }
}

/// Output of a finished run, including its routing history.
///
/// Callers that only need the answer use
/// [`AnswerQueryUseCase::run`](super::AnswerQueryUseCase::run).
#[derive(Debug, Clone, Serialize)]
pub struct AnswerQueryOutput {
    /// Final answer text
    pub answer: String,
    /// Every state entered, in order, ending with `Done`
    pub steps: Vec<WorkflowStep>,
    /// Number of rewrite transitions taken
    pub rewrites: u32,
    /// Whether generation was forced by an exhausted rewrite budget
    pub forced_generate: bool,
    /// Full conversation of the run
    pub conversation: ConversationState,
}

impl AnswerQueryOutput {
    /// Number of times the workflow entered `step`
    pub fn count(&self, step: WorkflowStep) -> usize {
        self.steps.iter().filter(|s| **s == step).count()
    }

    pub fn answered_directly(&self) -> bool {
        self.count(WorkflowStep::Retrieve) == 0
    }
}
