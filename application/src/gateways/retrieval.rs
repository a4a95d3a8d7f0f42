//! Retrieval gateway

use super::with_timeout;
use crate::ports::llm_gateway::GatewayError;
use crate::ports::product_search::ProductSearchPort;
use assistant_domain::RetrievedDocument;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Number of documents requested when not configured
pub const DEFAULT_TOP_K: usize = 3;

/// Wraps the product search collaborator behind a single `fetch` call.
///
/// The query is passed through untouched. Hits scoring below the
/// relevance threshold are dropped; when nothing remains the result is an
/// empty list rather than an error.
#[derive(Clone)]
pub struct RetrievalGateway {
    search: Arc<dyn ProductSearchPort>,
    top_k: usize,
    relevance_threshold: Option<f32>,
    timeout: Option<Duration>,
}

impl RetrievalGateway {
    pub fn new(search: Arc<dyn ProductSearchPort>) -> Self {
        Self {
            search,
            top_k: DEFAULT_TOP_K,
            relevance_threshold: None,
            timeout: None,
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn with_relevance_threshold(mut self, threshold: Option<f32>) -> Self {
        self.relevance_threshold = threshold;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Fetch documents for a query, ordered as the backend ranked them
    pub async fn fetch(&self, query: &str) -> Result<Vec<RetrievedDocument>, GatewayError> {
        let hits = with_timeout(self.timeout, self.search.search(query, self.top_k)).await?;
        let returned = hits.len();

        let documents: Vec<RetrievedDocument> = hits
            .into_iter()
            .filter(|hit| match (self.relevance_threshold, hit.score) {
                (Some(threshold), Some(score)) => score >= threshold,
                _ => true,
            })
            .take(self.top_k)
            .map(|hit| hit.into_document())
            .collect();

        debug!(
            "Retrieval returned {} hits, kept {} (top_k={}, threshold={:?})",
            returned,
            documents.len(),
            self.top_k,
            self.relevance_threshold
        );

        Ok(documents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::product_search::SearchHit;
    use assistant_domain::DocumentMetadata;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct MockSearch {
        hits: Vec<SearchHit>,
        calls: Mutex<Vec<(String, usize)>>,
    }

    impl MockSearch {
        fn new(hits: Vec<SearchHit>) -> Self {
            Self {
                hits,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ProductSearchPort for MockSearch {
        async fn search(&self, query: &str, top_k: usize) -> Result<Vec<SearchHit>, GatewayError> {
            self.calls.lock().unwrap().push((query.to_string(), top_k));
            Ok(self.hits.clone())
        }
    }

    struct SlowSearch;

    #[async_trait]
    impl ProductSearchPort for SlowSearch {
        async fn search(&self, _query: &str, _top_k: usize) -> Result<Vec<SearchHit>, GatewayError> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(vec![])
        }
    }

    fn hit(title: &str, score: Option<f32>) -> SearchHit {
        let hit = SearchHit::new("review", DocumentMetadata::default().with_title(title));
        match score {
            Some(s) => hit.with_score(s),
            None => hit,
        }
    }

    #[tokio::test]
    async fn test_fetch_passes_query_and_top_k_through() {
        let search = Arc::new(MockSearch::new(vec![hit("iPhone 15", Some(0.9))]));
        let gateway = RetrievalGateway::new(search.clone()).with_top_k(5);

        let docs = gateway.fetch("  iPhone 15 price ").await.unwrap();

        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].metadata.title.as_deref(), Some("iPhone 15"));
        assert_eq!(
            search.calls.lock().unwrap().as_slice(),
            &[("  iPhone 15 price ".to_string(), 5)]
        );
    }

    #[tokio::test]
    async fn test_threshold_drops_low_scores_keeps_unscored() {
        let search = Arc::new(MockSearch::new(vec![
            hit("a", Some(0.9)),
            hit("b", Some(0.2)),
            hit("c", None),
        ]));
        let gateway = RetrievalGateway::new(search).with_relevance_threshold(Some(0.5));

        let docs = gateway.fetch("q").await.unwrap();
        let titles: Vec<_> = docs
            .iter()
            .map(|d| d.metadata.title.clone().unwrap())
            .collect();
        assert_eq!(titles, vec!["a", "c"]);
    }

    #[tokio::test]
    async fn test_nothing_above_threshold_is_empty_not_error() {
        let search = Arc::new(MockSearch::new(vec![hit("a", Some(0.1))]));
        let gateway = RetrievalGateway::new(search).with_relevance_threshold(Some(0.5));

        assert!(gateway.fetch("q").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_results_capped_at_top_k() {
        let search = Arc::new(MockSearch::new(vec![hit("a", None), hit("b", None), hit("c", None)]));
        let gateway = RetrievalGateway::new(search).with_top_k(2);

        assert_eq!(gateway.fetch("q").await.unwrap().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_surfaces_as_gateway_error() {
        let gateway =
            RetrievalGateway::new(Arc::new(SlowSearch)).with_timeout(Some(Duration::from_secs(1)));

        assert_eq!(gateway.fetch("q").await.unwrap_err(), GatewayError::Timeout);
    }
}
