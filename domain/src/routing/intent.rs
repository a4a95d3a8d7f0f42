//! Lexical product-intent classification

use super::decision::RoutingDecision;

/// Terms that mark a question as needing product context
pub const DEFAULT_INTENT_TERMS: &[&str] = &["product", "price", "review"];

/// Decides between answering directly and retrieving context.
///
/// A question carries product intent when it contains any configured
/// term as a case-insensitive substring (so "reviews" and "pricing"
/// match too).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntentClassifier {
    terms: Vec<String>,
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_INTENT_TERMS.iter().copied())
    }
}

impl IntentClassifier {
    /// Build a classifier from terms; blank terms are ignored
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let terms = terms
            .into_iter()
            .map(|t| t.as_ref().trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        Self { terms }
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn has_product_intent(&self, question: &str) -> bool {
        let lowered = question.to_lowercase();
        self.terms.iter().any(|t| lowered.contains(t.as_str()))
    }

    pub fn classify(&self, question: &str) -> RoutingDecision {
        if self.has_product_intent(question) {
            RoutingDecision::Retrieve
        } else {
            RoutingDecision::AnswerDirect
        }
    }
}
