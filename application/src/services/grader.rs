//! Relevance grader

use crate::gateways::{GenerationError, GenerationGateway};
use assistant_domain::{ContextFormatter, GradeDecision, PromptKind, PromptVariables};
use std::sync::Arc;
use tracing::debug;

/// Classifies retrieved context as sufficient or insufficient.
///
/// The "no documents" sentinel (or blank context) is graded Insufficient
/// without consulting the model, so an over-eager model can never approve
/// empty context.
#[derive(Clone)]
pub struct RelevanceGrader {
    generation: Arc<GenerationGateway>,
}

impl RelevanceGrader {
    pub fn new(generation: Arc<GenerationGateway>) -> Self {
        Self { generation }
    }

    pub async fn grade(&self, question: &str, context: &str) -> Result<GradeDecision, GenerationError> {
        if ContextFormatter::is_empty_context(context) {
            debug!("Grader: empty context, insufficient without model call");
            return Ok(GradeDecision::Insufficient);
        }

        let variables = PromptVariables::new()
            .with("question", question)
            .with("context", context);
        let verdict = self.generation.complete(PromptKind::Grade, &variables).await?;
        let decision = GradeDecision::from_verdict(&verdict);

        debug!("Grader verdict {:?} -> {}", verdict.trim(), decision);
        Ok(decision)
    }
}
