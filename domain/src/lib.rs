//! Domain layer for product-assistant
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Conversation
//!
//! Every run owns a [`ConversationState`]: an append-only list of
//! role-tagged [`Turn`]s, seeded with the user's question.
//!
//! ## Routing
//!
//! The answer workflow moves through [`WorkflowStep`]s driven by typed
//! decisions: [`RoutingDecision`] (answer directly or retrieve) and
//! [`GradeDecision`] (is the retrieved context sufficient).

pub mod config;
pub mod conversation;
pub mod core;
pub mod prompt;
pub mod retrieval;
pub mod routing;
pub mod run;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use conversation::{ConversationState, Turn, TurnRole};
pub use core::{error::DomainError, question::Question, string::truncate};
pub use prompt::{PromptKind, PromptRegistry, PromptTemplate, PromptVariables};
pub use retrieval::{ContextFormatter, DocumentMetadata, NO_DOCUMENTS_FOUND, RetrievedDocument};
pub use routing::{
    DEFAULT_INTENT_TERMS, GradeDecision, IntentClassifier, RoutingDecision, WorkflowStep,
};
pub use run::RunConfig;
