//! Generation gateway

use super::with_timeout;
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use assistant_domain::{DomainError, PromptKind, PromptRegistry, PromptVariables, truncate};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Errors from [`GenerationGateway::complete`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// A required template variable was not supplied (contract violation)
    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] DomainError),

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),
}

/// Wraps the LLM collaborator behind named prompt templates
#[derive(Clone)]
pub struct GenerationGateway {
    llm: Arc<dyn LlmGateway>,
    prompts: PromptRegistry,
    timeout: Option<Duration>,
}

impl GenerationGateway {
    pub fn new(llm: Arc<dyn LlmGateway>, prompts: PromptRegistry) -> Self {
        Self {
            llm,
            prompts,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Render the template for `kind` and send it to the model.
    ///
    /// Fails with [`GenerationError::InvalidArgument`] before any model
    /// call when a required variable is missing.
    pub async fn complete(
        &self,
        kind: PromptKind,
        variables: &PromptVariables,
    ) -> Result<String, GenerationError> {
        let prompt = self.prompts.render(kind, variables)?;

        debug!(
            "Generation [{}] via {}: {}",
            kind,
            self.llm.model(),
            truncate(&prompt, 120)
        );

        let text = with_timeout(self.timeout, self.llm.generate(&prompt)).await?;
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct EchoLlm {
        prompts: Mutex<Vec<String>>,
    }

    impl EchoLlm {
        fn new() -> Self {
            Self {
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl LlmGateway for EchoLlm {
        fn model(&self) -> &str {
            "echo"
        }

        async fn generate(&self, prompt: &str) -> Result<String, GatewayError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(format!("echo: {}", prompt))
        }
    }

    struct FailingLlm;

    #[async_trait]
    impl LlmGateway for FailingLlm {
        fn model(&self) -> &str {
            "failing"
        }

        async fn generate(&self, _prompt: &str) -> Result<String, GatewayError> {
            Err(GatewayError::ConnectionError("refused".to_string()))
        }
    }

    fn registry() -> PromptRegistry {
        PromptRegistry::default()
            .with_template(PromptKind::Generate, "Q={question} C={context}")
            .with_template(PromptKind::Direct, "D={question}")
    }

    #[tokio::test]
    async fn test_complete_renders_named_template() {
        let llm = Arc::new(EchoLlm::new());
        let gateway = GenerationGateway::new(llm.clone(), registry());

        let vars = PromptVariables::new()
            .with("question", "price?")
            .with("context", "$699");
        let text = gateway.complete(PromptKind::Generate, &vars).await.unwrap();

        assert_eq!(text, "echo: Q=price? C=$699");
        assert_eq!(llm.prompts.lock().unwrap().as_slice(), &["Q=price? C=$699"]);
    }

    #[tokio::test]
    async fn test_missing_key_is_invalid_argument_without_calling_llm() {
        let llm = Arc::new(EchoLlm::new());
        let gateway = GenerationGateway::new(llm.clone(), registry());

        let vars = PromptVariables::new().with("question", "price?");
        let err = gateway.complete(PromptKind::Generate, &vars).await.unwrap_err();

        assert!(matches!(err, GenerationError::InvalidArgument(_)));
        assert!(llm.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_llm_failure_is_gateway_error() {
        let gateway = GenerationGateway::new(Arc::new(FailingLlm), registry());

        let vars = PromptVariables::new().with("question", "hi");
        let err = gateway.complete(PromptKind::Direct, &vars).await.unwrap_err();

        assert_eq!(
            err,
            GenerationError::Gateway(GatewayError::ConnectionError("refused".to_string()))
        );
    }
}
