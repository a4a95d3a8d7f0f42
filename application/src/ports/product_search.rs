//! Product search port
//!
//! The vector store (or any other search backend) that holds product
//! reviews. Wrapped by [`RetrievalGateway`](crate::gateways::RetrievalGateway).

use super::llm_gateway::GatewayError;
use assistant_domain::{DocumentMetadata, RetrievedDocument};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A scored search result returned by a search backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub text: String,
    /// Similarity score, when the backend reports one (higher is better)
    #[serde(default)]
    pub score: Option<f32>,
    #[serde(default)]
    pub metadata: DocumentMetadata,
}

impl SearchHit {
    pub fn new(text: impl Into<String>, metadata: DocumentMetadata) -> Self {
        Self {
            text: text.into(),
            score: None,
            metadata,
        }
    }

    pub fn with_score(mut self, score: f32) -> Self {
        self.score = Some(score);
        self
    }

    pub fn into_document(self) -> RetrievedDocument {
        RetrievedDocument::new(self.text, self.metadata)
    }
}

/// Search backend for product documents
///
/// Returning a short or empty list is valid; it is not an error.
#[async_trait]
pub trait ProductSearchPort: Send + Sync {
    async fn search(&self, query: &str, top_k: usize) -> Result<Vec<SearchHit>, GatewayError>;
}
