//! Language model adapters implementing the
//! [`LlmGateway`](assistant_application::LlmGateway) port.

mod openai;

pub use openai::{OpenAiChatGateway, OpenAiConfigError};
