//! Turn entity

use serde::{Deserialize, Serialize};

/// Kind of a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnRole {
    /// The user's question, or a rewritten version of it
    User,
    /// Assistant bookkeeping, e.g. the verdict of a relevance grade
    Assistant,
    /// Directive to call the retriever
    ToolDirective,
    /// Formatted retrieved context
    Context,
    /// Final answer text
    Answer,
}

impl TurnRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnRole::User => "user",
            TurnRole::Assistant => "assistant",
            TurnRole::ToolDirective => "tool_directive",
            TurnRole::Context => "context",
            TurnRole::Answer => "answer",
        }
    }
}

impl std::fmt::Display for TurnRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One role-tagged unit of conversation state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: TurnRole,
    pub text: String,
}

impl Turn {
    pub fn new(role: TurnRole, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(TurnRole::User, text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(TurnRole::Assistant, text)
    }

    pub fn tool_directive(text: impl Into<String>) -> Self {
        Self::new(TurnRole::ToolDirective, text)
    }

    pub fn context(text: impl Into<String>) -> Self {
        Self::new(TurnRole::Context, text)
    }

    pub fn answer(text: impl Into<String>) -> Self {
        Self::new(TurnRole::Answer, text)
    }

    pub fn is(&self, role: TurnRole) -> bool {
        self.role == role
    }
}
