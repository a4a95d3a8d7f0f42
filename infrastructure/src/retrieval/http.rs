//! HTTP vector search adapter.
//!
//! Request: `POST {endpoint}` with `{"query": ..., "top_k": ...}`.
//! Response: `{"results": [{"text": ..., "score": 0.83, "metadata": {...}}]}`.

use super::metadata_from_json;
use assistant_application::ports::llm_gateway::GatewayError;
use assistant_application::ports::product_search::{ProductSearchPort, SearchHit};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::debug;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    #[serde(default)]
    text: String,
    score: Option<f32>,
    #[serde(default)]
    metadata: Value,
}

/// Client for a remote vector search service over product reviews
pub struct HttpVectorSearch {
    client: Client,
    endpoint: String,
}

impl HttpVectorSearch {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    fn into_hits(response: SearchResponse) -> Vec<SearchHit> {
        response
            .results
            .into_iter()
            .map(|r| {
                let hit = SearchHit::new(r.text, metadata_from_json(&r.metadata));
                match r.score {
                    Some(score) => hit.with_score(score),
                    None => hit,
                }
            })
            .collect()
    }
}

#[async_trait]
impl ProductSearchPort for HttpVectorSearch {
    async fn search(&self, query: &str, top_k: usize) -> Result<Vec<SearchHit>, GatewayError> {
        debug!(endpoint = %self.endpoint, top_k, "Vector search request");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&json!({ "query": query, "top_k": top_k }))
            .send()
            .await
            .map_err(|e| GatewayError::ConnectionError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(GatewayError::RequestFailed(format!("HTTP {}: {}", status, text)));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::InvalidResponse(format!("search results: {}", e)))?;

        Ok(Self::into_hits(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::serve_once;

    #[tokio::test]
    async fn test_search_posts_query_and_parses_results() {
        let (url, request) = serve_once(
            200,
            r#"{"results":[
                {"text":"Battery lasts all day.","score":0.91,
                 "metadata":{"product_title":"iPhone 15","price":"$799","rating":4.6}},
                {"text":"Decent phone.","metadata":{}}
            ]}"#,
        )
        .await;
        let search = HttpVectorSearch::new(format!("{}/search", url));

        let hits = search.search("iphone 15 battery", 3).await.unwrap();

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].score, Some(0.91));
        assert_eq!(hits[0].metadata.title.as_deref(), Some("iPhone 15"));
        assert_eq!(hits[0].metadata.rating.as_deref(), Some("4.6"));
        assert_eq!(hits[1].score, None);

        let request = request.await.unwrap();
        assert!(request.head.starts_with("POST /search"));
        let body: Value = serde_json::from_str(&request.body).unwrap();
        assert_eq!(body, json!({ "query": "iphone 15 battery", "top_k": 3 }));
    }

    #[tokio::test]
    async fn test_missing_results_is_empty() {
        let (url, _request) = serve_once(200, "{}").await;
        let hits = HttpVectorSearch::new(url).search("q", 3).await.unwrap();
        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn test_server_error_is_request_failed() {
        let (url, _request) = serve_once(503, r#"{"detail":"index loading"}"#).await;
        let err = HttpVectorSearch::new(url).search("q", 3).await.unwrap_err();
        assert!(matches!(err, GatewayError::RequestFailed(msg) if msg.contains("503")));
    }

    #[tokio::test]
    async fn test_malformed_body_is_invalid_response() {
        let (url, _request) = serve_once(200, r#"{"results":"nope"}"#).await;
        let err = HttpVectorSearch::new(url).search("q", 3).await.unwrap_err();
        assert!(matches!(err, GatewayError::InvalidResponse(_)));
    }
}
