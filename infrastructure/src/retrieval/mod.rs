//! Product search adapters implementing the
//! [`ProductSearchPort`](assistant_application::ProductSearchPort).
//!
//! - [`HttpVectorSearch`]: remote vector search service
//! - [`InMemoryProductIndex`]: JSON file scored by term overlap
//! - [`FallbackSearch`]: primary backend, secondary when the primary finds nothing

mod fallback;
mod http;
mod in_memory;

pub use fallback::FallbackSearch;
pub use http::HttpVectorSearch;
pub use in_memory::{IndexLoadError, InMemoryProductIndex};

use assistant_domain::DocumentMetadata;
use serde_json::Value;

/// Build document metadata from a loosely typed JSON object.
///
/// Numbers are rendered as text; unknown keys are ignored.
pub(crate) fn metadata_from_json(value: &Value) -> DocumentMetadata {
    let field = |keys: &[&str]| keys.iter().find_map(|k| value.get(*k).and_then(as_text));

    DocumentMetadata {
        title: field(&["product_title", "title"]),
        price: field(&["price"]),
        rating: field(&["rating"]),
        raw_review_text: field(&["raw_review_text", "review"]),
    }
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
