//! LLM Gateway port
//!
//! Defines the interface for communicating with the language model that
//! answers, grades and rewrites questions.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when calling an external collaborator
/// (language model or product search)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// Gateway for LLM communication
///
/// Request/response semantics: one prompt in, one completion out.
/// Implementations (adapters) live in the infrastructure layer and must be
/// safe for concurrent use by independent runs.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Identifier of the backing model, for diagnostics
    fn model(&self) -> &str;

    /// Send a fully rendered prompt and return the generated text
    async fn generate(&self, prompt: &str) -> Result<String, GatewayError>;
}
