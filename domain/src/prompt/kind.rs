//! Prompt kinds

use serde::{Deserialize, Serialize};

/// The LLM interactions of the workflow, each bound to one template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptKind {
    /// Answer a question that needs no product context
    Direct,
    /// Judge retrieved context against the question
    Grade,
    /// Answer a product question from retrieved context
    Generate,
    /// Reformulate an unanswered question
    Rewrite,
}

impl PromptKind {
    pub const ALL: [PromptKind; 4] = [
        PromptKind::Direct,
        PromptKind::Grade,
        PromptKind::Generate,
        PromptKind::Rewrite,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PromptKind::Direct => "direct",
            PromptKind::Grade => "grade",
            PromptKind::Generate => "generate",
            PromptKind::Rewrite => "rewrite",
        }
    }

    /// Variable keys a template of this kind must declare and a caller must supply
    pub fn required_keys(&self) -> &'static [&'static str] {
        match self {
            PromptKind::Direct | PromptKind::Rewrite => &["question"],
            PromptKind::Grade | PromptKind::Generate => &["question", "context"],
        }
    }
}

impl std::fmt::Display for PromptKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_keys() {
        assert_eq!(PromptKind::Direct.required_keys(), &["question"]);
        assert_eq!(PromptKind::Generate.required_keys(), &["question", "context"]);
    }

    #[test]
    fn test_deserialize_lowercase() {
        let kind: PromptKind = serde_json::from_str("\"rewrite\"").unwrap();
        assert_eq!(kind, PromptKind::Rewrite);
    }
}
