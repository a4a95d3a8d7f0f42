//! Workflow states

use serde::{Deserialize, Serialize};

/// State of the answer workflow
///
/// `Assistant` is the initial state and `Done` the only terminal one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStep {
    /// Decide between a direct answer and retrieval
    Assistant,
    /// Fetch and format product context
    Retrieve,
    /// Judge whether the context is sufficient
    Grade,
    /// Answer from the retrieved context
    Generate,
    /// Reformulate the question and try again
    Rewrite,
    Done,
}

impl WorkflowStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowStep::Assistant => "assistant",
            WorkflowStep::Retrieve => "retrieve",
            WorkflowStep::Grade => "grade",
            WorkflowStep::Generate => "generate",
            WorkflowStep::Rewrite => "rewrite",
            WorkflowStep::Done => "done",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            WorkflowStep::Assistant => "Routing",
            WorkflowStep::Retrieve => "Retrieving context",
            WorkflowStep::Grade => "Grading context",
            WorkflowStep::Generate => "Generating answer",
            WorkflowStep::Rewrite => "Rewriting question",
            WorkflowStep::Done => "Done",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, WorkflowStep::Done)
    }
}

impl std::fmt::Display for WorkflowStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_done_is_terminal() {
        assert!(WorkflowStep::Done.is_terminal());
        assert!(!WorkflowStep::Generate.is_terminal());
        assert!(!WorkflowStep::Assistant.is_terminal());
    }

    #[test]
    fn test_serialize_snake_case() {
        let json = serde_json::to_string(&WorkflowStep::Rewrite).unwrap();
        assert_eq!(json, "\"rewrite\"");
    }
}
