//! Conversation subdomain
//!
//! A run's conversation is an append-only sequence of role-tagged
//! [`Turn`]s. Routing logic inspects turn roles instead of parsing
//! marker strings out of free text.

mod state;
mod turn;

pub use state::ConversationState;
pub use turn::{Turn, TurnRole};
