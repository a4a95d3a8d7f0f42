//! Prompt template registry

use super::kind::PromptKind;
use super::template::{PromptTemplate, PromptVariables};
use crate::core::error::DomainError;
use std::collections::BTreeMap;

const DIRECT_TEMPLATE: &str = r#"You are a helpful assistant. Answer the user directly.

Question: {question}
Answer:"#;

const GRADE_TEMPLATE: &str = r#"You are grading documents retrieved for a shopper's question.
Decide whether the documents contain enough information to answer the question.
Reply with a single word: "yes" if they do, "no" if they do not.

Question: {question}
Documents:
{context}
Decision:"#;

const GENERATE_TEMPLATE: &str = r#"You are an expert e-commerce assistant specialized in product recommendations and customer queries.
Analyze the provided product titles, prices, ratings and reviews to give accurate, helpful responses.
Stay relevant to the context and keep your answers concise. If the context does not contain the
answer, say that you don't know rather than guessing.

CONTEXT:
{context}

QUESTION: {question}

YOUR ANSWER:"#;

const REWRITE_TEMPLATE: &str = r#"Rewrite this question to be more specific so that a product search can answer it.
Return only the rewritten question.

Question: {question}"#;

/// Maps every [`PromptKind`] to its template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptRegistry {
    templates: BTreeMap<PromptKind, PromptTemplate>,
}

impl Default for PromptRegistry {
    fn default() -> Self {
        let templates = PromptKind::ALL
            .into_iter()
            .map(|kind| (kind, PromptTemplate::new(kind, default_source(kind))))
            .collect();
        Self { templates }
    }
}

impl PromptRegistry {
    /// Replace the template for a kind
    pub fn with_template(mut self, kind: PromptKind, source: impl Into<String>) -> Self {
        self.templates.insert(kind, PromptTemplate::new(kind, source));
        self
    }

    pub fn template(&self, kind: PromptKind) -> &PromptTemplate {
        // Populated for every kind by Default; with_template only replaces
        &self.templates[&kind]
    }

    /// Validate every template, returning all problems found
    pub fn validate(&self) -> Vec<DomainError> {
        self.templates.values().flat_map(|t| t.validate()).collect()
    }

    pub fn render(
        &self,
        kind: PromptKind,
        variables: &PromptVariables,
    ) -> Result<String, DomainError> {
        self.template(kind).render(variables)
    }
}

fn default_source(kind: PromptKind) -> &'static str {
    match kind {
        PromptKind::Direct => DIRECT_TEMPLATE,
        PromptKind::Grade => GRADE_TEMPLATE,
        PromptKind::Generate => GENERATE_TEMPLATE,
        PromptKind::Rewrite => REWRITE_TEMPLATE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(PromptRegistry::default().validate().is_empty());
    }

    #[test]
    fn test_override_replaces_template() {
        let registry =
            PromptRegistry::default().with_template(PromptKind::Rewrite, "Be precise: {question}");
        let out = registry
            .render(
                PromptKind::Rewrite,
                &PromptVariables::new().with("question", "cheap phone"),
            )
            .unwrap();
        assert_eq!(out, "Be precise: cheap phone");
    }

    #[test]
    fn test_invalid_override_detected() {
        let registry = PromptRegistry::default().with_template(PromptKind::Generate, "{question}");
        let errors = registry.validate();
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            &errors[0],
            DomainError::MissingTemplateVariable { key, .. } if key == "context"
        ));
    }

    #[test]
    fn test_generate_prompt_contains_context_and_question() {
        let out = PromptRegistry::default()
            .render(
                PromptKind::Generate,
                &PromptVariables::new()
                    .with("question", "What is the price of the iPhone 15?")
                    .with("context", "Price: $699"),
            )
            .unwrap();
        assert!(out.contains("Price: $699"));
        assert!(out.contains("QUESTION: What is the price of the iPhone 15?"));
    }
}
