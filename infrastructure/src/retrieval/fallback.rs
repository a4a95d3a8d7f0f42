//! Search composite with a secondary backend.

use assistant_application::ports::llm_gateway::GatewayError;
use assistant_application::ports::product_search::{ProductSearchPort, SearchHit};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

/// Queries `primary`; when it returns no hits, queries `secondary`.
///
/// A primary failure is returned as is, not masked by the secondary.
pub struct FallbackSearch {
    primary: Arc<dyn ProductSearchPort>,
    secondary: Arc<dyn ProductSearchPort>,
}

impl FallbackSearch {
    pub fn new(primary: Arc<dyn ProductSearchPort>, secondary: Arc<dyn ProductSearchPort>) -> Self {
        Self { primary, secondary }
    }
}

#[async_trait]
impl ProductSearchPort for FallbackSearch {
    async fn search(&self, query: &str, top_k: usize) -> Result<Vec<SearchHit>, GatewayError> {
        let hits = self.primary.search(query, top_k).await?;
        if !hits.is_empty() {
            return Ok(hits);
        }

        info!("Primary search found nothing, trying fallback");
        self.secondary.search(query, top_k).await
    }
}
