//! Query rewriter

use crate::gateways::{GenerationError, GenerationGateway};
use crate::ports::llm_gateway::GatewayError;
use assistant_domain::{PromptKind, PromptVariables};
use std::sync::Arc;
use tracing::debug;

/// Produces a more specific reformulation of a question
#[derive(Clone)]
pub struct QueryRewriter {
    generation: Arc<GenerationGateway>,
}

impl QueryRewriter {
    pub fn new(generation: Arc<GenerationGateway>) -> Self {
        Self { generation }
    }

    /// Rewrite a question; an empty or whitespace-only reply is an
    /// invalid collaborator response.
    pub async fn rewrite(&self, question: &str) -> Result<String, GenerationError> {
        let variables = PromptVariables::new().with("question", question);
        let rewritten = self.generation.complete(PromptKind::Rewrite, &variables).await?;
        let rewritten = rewritten.trim();

        if rewritten.is_empty() {
            return Err(GenerationError::Gateway(GatewayError::InvalidResponse(
                "rewriter returned an empty question".to_string(),
            )));
        }

        debug!("Rewrote {:?} -> {:?}", question, rewritten);
        Ok(rewritten.to_string())
    }
}
