//! Workflow services built on the generation gateway.
//!
//! - [`RelevanceGrader`]: is the retrieved context sufficient?
//! - [`QueryRewriter`]: reformulate an unanswered question

mod grader;
mod rewriter;

pub use grader::RelevanceGrader;
pub use rewriter::QueryRewriter;
