//! Retrieval subdomain
//!
//! Read-only snapshots of retrieved product documents and the formatter
//! that turns them into a single prompt-ready context block.

mod document;
mod format;

pub use document::{DocumentMetadata, RetrievedDocument};
pub use format::{ContextFormatter, NO_DOCUMENTS_FOUND};
