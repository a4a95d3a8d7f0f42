//! In-memory product index loaded from a JSON file.
//!
//! The file holds an array of review records:
//!
//! ```json
//! [{"product_title": "iPhone 15", "price": "$799", "rating": 4.6, "review": "Great camera"}]
//! ```
//!
//! A query is scored by the fraction of its terms found in the record's
//! title and review text.

use super::metadata_from_json;
use assistant_application::ports::llm_gateway::GatewayError;
use assistant_application::ports::product_search::{ProductSearchPort, SearchHit};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum IndexLoadError {
    #[error("Could not read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid product file {path}: {message}")]
    Parse { path: String, message: String },
}

struct IndexedProduct {
    hit: SearchHit,
    terms: HashSet<String>,
}

/// Product reviews held in memory and scored by lexical overlap
pub struct InMemoryProductIndex {
    products: Vec<IndexedProduct>,
}

impl InMemoryProductIndex {
    pub fn new(hits: Vec<SearchHit>) -> Self {
        let products = hits
            .into_iter()
            .map(|hit| {
                let mut searchable = hit.text.clone();
                if let Some(title) = &hit.metadata.title {
                    searchable.push(' ');
                    searchable.push_str(title);
                }
                IndexedProduct {
                    terms: tokenize(&searchable).collect(),
                    hit,
                }
            })
            .collect();
        Self { products }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, IndexLoadError> {
        let path = path.as_ref();
        let shown = path.display().to_string();
        let raw = std::fs::read_to_string(path).map_err(|source| IndexLoadError::Io {
            path: shown.clone(),
            source,
        })?;
        let index = Self::from_json(&raw).map_err(|message| IndexLoadError::Parse {
            path: shown.clone(),
            message,
        })?;
        debug!("Loaded {} product record(s) from {}", index.len(), shown);
        Ok(index)
    }

    /// Parse a JSON array of review records
    pub fn from_json(raw: &str) -> Result<Self, String> {
        let value: Value = serde_json::from_str(raw).map_err(|e| e.to_string())?;
        let records = value
            .as_array()
            .ok_or_else(|| "expected a JSON array of records".to_string())?;

        let hits = records
            .iter()
            .map(|record| {
                let metadata = metadata_from_json(record);
                let text = record
                    .get("text")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .or_else(|| metadata.raw_review_text.clone())
                    .unwrap_or_default();
                SearchHit::new(text, metadata)
            })
            .collect();

        Ok(Self::new(hits))
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    fn rank(&self, query: &str, top_k: usize) -> Vec<SearchHit> {
        let query_terms: HashSet<String> = tokenize(query).collect();
        if query_terms.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<(f32, &IndexedProduct)> = self
            .products
            .iter()
            .filter_map(|p| {
                let overlap = query_terms.intersection(&p.terms).count();
                (overlap > 0).then(|| (overlap as f32 / query_terms.len() as f32, p))
            })
            .collect();

        // Stable sort keeps input order for equal scores
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));

        scored
            .into_iter()
            .take(top_k)
            .map(|(score, p)| p.hit.clone().with_score(score))
            .collect()
    }
}

fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.chars().count() > 1)
        .map(str::to_lowercase)
}

#[async_trait]
impl ProductSearchPort for InMemoryProductIndex {
    async fn search(&self, query: &str, top_k: usize) -> Result<Vec<SearchHit>, GatewayError> {
        Ok(self.rank(query, top_k))
    }
}
