//! Application layer for product-assistant
//!
//! This crate contains the answer workflow use case, the gateways and
//! services it drives, and the port definitions implemented by
//! infrastructure adapters. It depends only on the domain layer.

pub mod config;
pub mod gateways;
pub mod ports;
pub mod services;
pub mod use_cases;

// Re-export commonly used types
pub use config::WorkflowParams;
pub use gateways::{DEFAULT_TOP_K, GenerationError, GenerationGateway, RetrievalGateway};
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    llm_gateway::{GatewayError, LlmGateway},
    product_search::{ProductSearchPort, SearchHit},
    progress::{NoProgress, WorkflowProgress},
};
pub use services::{QueryRewriter, RelevanceGrader};
pub use use_cases::answer_query::{AnswerQueryError, AnswerQueryOutput, AnswerQueryUseCase};
