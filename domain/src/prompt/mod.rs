//! Prompt domain
//!
//! Named prompt templates for each LLM interaction of the answer workflow.
//! Templates are configuration data: they can be replaced without touching
//! orchestration logic, as long as they keep their required placeholders.

mod kind;
mod registry;
mod template;

pub use kind::PromptKind;
pub use registry::PromptRegistry;
pub use template::{PromptTemplate, PromptVariables};
