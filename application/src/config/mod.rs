//! Application-level configuration.
//!
//! - [`WorkflowParams`]: rewrite budget, retrieval size, timeouts, intent terms

pub mod workflow_params;

pub use workflow_params::WorkflowParams;
