//! Configuration file loading for product-assistant
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `PRODUCT_ASSISTANT_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./product-assistant.toml` or `./.product-assistant.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/product-assistant/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileConfig, FileLlmConfig, FileLoggingConfig, FileOutputConfig, FilePromptsConfig,
    FileRetrieverConfig, FileWorkflowConfig, RetrieverBackend, expand_home,
};
pub use loader::ConfigLoader;
