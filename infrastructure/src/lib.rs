//! Infrastructure layer for product-assistant
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod llm;
pub mod logging;
pub mod retrieval;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use config::{
    ConfigLoader, FileConfig, FileLlmConfig, FileLoggingConfig, FileOutputConfig,
    FilePromptsConfig, FileRetrieverConfig, FileWorkflowConfig, RetrieverBackend, expand_home,
};
pub use llm::{OpenAiChatGateway, OpenAiConfigError};
pub use logging::JsonlConversationLogger;
pub use retrieval::{FallbackSearch, HttpVectorSearch, InMemoryProductIndex, IndexLoadError};
