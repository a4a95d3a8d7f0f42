//! Conversation state aggregate

use super::turn::{Turn, TurnRole};
use crate::core::question::Question;
use serde::Serialize;

/// Ordered, append-only sequence of turns for a single run.
///
/// The only constructor seeds the state with the user's question, so the
/// state is never empty and its first turn is always [`TurnRole::User`].
/// Turns are never removed or reordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversationState {
    turns: Vec<Turn>,
}

impl ConversationState {
    /// Start a conversation with the user's question as the first turn
    pub fn start(question: &Question) -> Self {
        Self {
            turns: vec![Turn::user(question.content())],
        }
    }

    /// Append a turn, returning a reference to it
    pub fn append(&mut self, turn: Turn) -> &Turn {
        self.turns.push(turn);
        &self.turns[self.turns.len() - 1]
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// The most recent turn
    pub fn latest(&self) -> &Turn {
        // Non-empty by construction
        &self.turns[self.turns.len() - 1]
    }

    /// The most recent turn with the given role
    pub fn latest_of(&self, role: TurnRole) -> Option<&Turn> {
        self.turns.iter().rev().find(|t| t.role == role)
    }

    /// The question the user originally asked
    pub fn original_question(&self) -> &str {
        &self.turns[0].text
    }

    /// The latest user-role question (the original or its latest rewrite)
    pub fn current_question(&self) -> &str {
        self.latest_of(TurnRole::User)
            .map(|t| t.text.as_str())
            .unwrap_or_else(|| self.original_question())
    }

    /// Text of the latest retrieved context, if any retrieval happened
    pub fn latest_context(&self) -> Option<&str> {
        self.latest_of(TurnRole::Context).map(|t| t.text.as_str())
    }

    /// The final answer, present only when the latest turn is an answer
    pub fn final_answer(&self) -> Option<&str> {
        let latest = self.latest();
        latest.is(TurnRole::Answer).then_some(latest.text.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(text: &str) -> Question {
        Question::try_new(text).unwrap()
    }

    #[test]
    fn test_start_seeds_user_turn() {
        let state = ConversationState::start(&question("price of iPhone?"));
        assert_eq!(state.len(), 1);
        assert!(!state.is_empty());
        assert_eq!(state.turns()[0].role, TurnRole::User);
        assert_eq!(state.original_question(), "price of iPhone?");
    }

    #[test]
    fn test_append_preserves_order() {
        let mut state = ConversationState::start(&question("q"));
        state.append(Turn::tool_directive("retrieve"));
        state.append(Turn::context("ctx"));
        let roles: Vec<_> = state.turns().iter().map(|t| t.role).collect();
        assert_eq!(
            roles,
            vec![TurnRole::User, TurnRole::ToolDirective, TurnRole::Context]
        );
        assert_eq!(state.latest().text, "ctx");
    }

    #[test]
    fn test_current_question_tracks_rewrites() {
        let mut state = ConversationState::start(&question("cheap phone"));
        state.append(Turn::context("No relevant documents found."));
        assert_eq!(state.current_question(), "cheap phone");

        state.append(Turn::user("Which smartphones cost under $300?"));
        assert_eq!(state.current_question(), "Which smartphones cost under $300?");
        assert_eq!(state.original_question(), "cheap phone");
    }

    #[test]
    fn test_latest_context_picks_most_recent() {
        let mut state = ConversationState::start(&question("q"));
        assert!(state.latest_context().is_none());
        state.append(Turn::context("first"));
        state.append(Turn::user("rewritten"));
        state.append(Turn::context("second"));
        assert_eq!(state.latest_context(), Some("second"));
    }

    #[test]
    fn test_final_answer_requires_answer_as_latest() {
        let mut state = ConversationState::start(&question("q"));
        assert!(state.final_answer().is_none());
        state.append(Turn::answer("42"));
        assert_eq!(state.final_answer(), Some("42"));
    }
}
