//! Gateways: thin typed boundaries over external collaborators.
//!
//! - [`RetrievalGateway`]: `fetch(query)` over a [`ProductSearchPort`](crate::ports::product_search::ProductSearchPort)
//! - [`GenerationGateway`]: `complete(kind, variables)` over an [`LlmGateway`](crate::ports::llm_gateway::LlmGateway)
//!
//! Both bound every collaborator call with an optional timeout so that a
//! stuck backend surfaces as [`GatewayError::Timeout`].

mod generation;
mod retrieval;

pub use generation::{GenerationError, GenerationGateway};
pub use retrieval::{DEFAULT_TOP_K, RetrievalGateway};

use crate::ports::llm_gateway::GatewayError;
use std::future::Future;
use std::time::Duration;

async fn with_timeout<T, F>(timeout: Option<Duration>, future: F) -> Result<T, GatewayError>
where
    F: Future<Output = Result<T, GatewayError>>,
{
    match timeout {
        Some(limit) => tokio::time::timeout(limit, future)
            .await
            .map_err(|_| GatewayError::Timeout)?,
        None => future.await,
    }
}
