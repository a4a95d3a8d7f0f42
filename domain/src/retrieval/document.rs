//! Retrieved document value objects

use serde::{Deserialize, Serialize};

/// Product metadata attached to a retrieved document.
///
/// Every field is optional: collaborators may return malformed documents
/// and the formatter substitutes a placeholder for anything missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentMetadata {
    #[serde(alias = "product_title")]
    pub title: Option<String>,
    pub price: Option<String>,
    pub rating: Option<String>,
    #[serde(alias = "review")]
    pub raw_review_text: Option<String>,
}

impl DocumentMetadata {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_price(mut self, price: impl Into<String>) -> Self {
        self.price = Some(price.into());
        self
    }

    pub fn with_rating(mut self, rating: impl Into<String>) -> Self {
        self.rating = Some(rating.into());
        self
    }

    pub fn with_raw_review_text(mut self, text: impl Into<String>) -> Self {
        self.raw_review_text = Some(text.into());
        self
    }
}

/// A document returned by the retrieval gateway (Value Object)
///
/// Has no identity beyond its position in the returned sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrievedDocument {
    pub text: String,
    #[serde(default)]
    pub metadata: DocumentMetadata,
}

impl RetrievedDocument {
    pub fn new(text: impl Into<String>, metadata: DocumentMetadata) -> Self {
        Self {
            text: text.into(),
            metadata,
        }
    }
}
