//! Output format value object

use serde::{Deserialize, Serialize};

/// How a finished run is rendered to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Only the final answer text (default)
    #[default]
    Answer,
    /// Answer plus the step path, rewrite count and forced generation flag
    Trace,
    /// JSON output
    Json,
}
