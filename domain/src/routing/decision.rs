//! Routing and grading decisions

use serde::{Deserialize, Serialize};

/// Outcome of the assistant step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutingDecision {
    /// Answer without retrieval
    AnswerDirect,
    /// Fetch product context first
    Retrieve,
}

/// Sufficiency of retrieved context for the current question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradeDecision {
    Sufficient,
    Insufficient,
}

const AFFIRMATIVE: &[&str] = &["yes", "sufficient", "relevant"];
const NEGATIVE: &[&str] = &["no", "not", "insufficient", "irrelevant", "unclear"];

impl GradeDecision {
    /// Interpret a grader's free-text verdict.
    ///
    /// A leading "yes" or "no" decides on its own. Otherwise the verdict is
    /// Sufficient only when the text carries an affirmative token and no
    /// negative one (case-insensitive, whole words). Anything ambiguous,
    /// negative or empty is Insufficient.
    pub fn from_verdict(verdict: &str) -> Self {
        let lowered = verdict.to_lowercase();
        let words: Vec<&str> = lowered
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect();

        match words.first() {
            Some(&"yes") => return GradeDecision::Sufficient,
            Some(&"no") => return GradeDecision::Insufficient,
            _ => {}
        }

        let affirmative = words.iter().any(|w| AFFIRMATIVE.contains(w));
        let negative = words.iter().any(|w| NEGATIVE.contains(w));

        if affirmative && !negative {
            GradeDecision::Sufficient
        } else {
            GradeDecision::Insufficient
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GradeDecision::Sufficient => "sufficient",
            GradeDecision::Insufficient => "insufficient",
        }
    }
}

impl std::fmt::Display for GradeDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_affirmative_verdicts() {
        assert_eq!(GradeDecision::from_verdict("yes"), GradeDecision::Sufficient);
        assert_eq!(GradeDecision::from_verdict("YES."), GradeDecision::Sufficient);
        assert_eq!(
            GradeDecision::from_verdict("Yes, the documents are relevant"),
            GradeDecision::Sufficient
        );
    }

    #[test]
    fn test_negative_verdicts() {
        assert_eq!(GradeDecision::from_verdict("no"), GradeDecision::Insufficient);
        assert_eq!(
            GradeDecision::from_verdict("The documents are not relevant"),
            GradeDecision::Insufficient
        );
        assert_eq!(
            GradeDecision::from_verdict("Irrelevant"),
            GradeDecision::Insufficient
        );
    }

    #[test]
    fn test_ambiguous_defaults_to_insufficient() {
        assert_eq!(GradeDecision::from_verdict(""), GradeDecision::Insufficient);
        assert_eq!(GradeDecision::from_verdict("maybe"), GradeDecision::Insufficient);
        assert_eq!(
            GradeDecision::from_verdict("relevant but not sufficient"),
            GradeDecision::Insufficient
        );
    }

    #[test]
    fn test_leading_answer_word_decides() {
        assert_eq!(
            GradeDecision::from_verdict("Yes, no further information is needed."),
            GradeDecision::Sufficient
        );
        assert_eq!(
            GradeDecision::from_verdict("No. The reviews are relevant but lack prices"),
            GradeDecision::Insufficient
        );
    }

    #[test]
    fn test_affirmative_token_must_be_whole_word() {
        // "eyes" contains "yes" but is not an affirmative token
        assert_eq!(
            GradeDecision::from_verdict("easy on the eyes"),
            GradeDecision::Insufficient
        );
    }
}
