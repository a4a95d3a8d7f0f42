//! Console output formatter for answer workflow runs

use assistant_application::AnswerQueryError;
use assistant_application::AnswerQueryOutput;
use assistant_domain::{OutputFormat, WorkflowStep};
use colored::Colorize;
use serde_json::json;

/// Formats run results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Enable or disable ANSI colors for all formatted output
    pub fn set_color(enabled: bool) {
        if !enabled {
            colored::control::set_override(false);
        }
    }

    /// Format a finished run in the requested format
    pub fn format(output: &AnswerQueryOutput, format: OutputFormat) -> String {
        match format {
            OutputFormat::Answer => Self::format_answer(output),
            OutputFormat::Trace => Self::format_trace(output),
            OutputFormat::Json => Self::format_json(output),
        }
    }

    /// The answer text only
    pub fn format_answer(output: &AnswerQueryOutput) -> String {
        output.answer.trim_end().to_string()
    }

    /// Answer plus the path the workflow took
    pub fn format_trace(output: &AnswerQueryOutput) -> String {
        let mut out = String::new();

        out.push_str(&Self::header("Product Assistant"));
        out.push('\n');
        out.push_str(&format!(
            "{} {}\n",
            "Question:".cyan().bold(),
            output.conversation.original_question()
        ));
        out.push_str(&format!(
            "{} {}\n",
            "Path:".cyan().bold(),
            Self::path(&output.steps)
        ));
        out.push_str(&format!(
            "{} {}\n",
            "Rewrites:".cyan().bold(),
            output.rewrites
        ));
        if output.forced_generate {
            out.push_str(&format!(
                "{}\n",
                "Rewrite budget exhausted: best-effort answer".yellow()
            ));
        }

        out.push_str(&Self::section_header("Answer"));
        out.push_str(output.answer.trim_end());
        out.push('\n');
        out
    }

    /// Full run result as pretty JSON
    pub fn format_json(output: &AnswerQueryOutput) -> String {
        serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string())
    }

    /// Render a failed run; distinct from any answer rendering
    pub fn format_error(error: &AnswerQueryError, format: OutputFormat) -> String {
        let kind = match error {
            AnswerQueryError::Configuration(_) => "configuration",
            AnswerQueryError::DependencyFailure { .. } => "dependency_failure",
            AnswerQueryError::Cancelled => "cancelled",
            AnswerQueryError::Orchestration(_) => "orchestration",
        };

        if format == OutputFormat::Json {
            let step = match error {
                AnswerQueryError::DependencyFailure { step, .. } => Some(step.as_str()),
                _ => None,
            };
            let value = json!({ "error": { "kind": kind, "step": step, "message": error.to_string() } });
            return serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string());
        }

        let label = match error {
            AnswerQueryError::Cancelled => "Cancelled:".yellow().bold(),
            _ => "Error:".red().bold(),
        };
        let mut out = format!("{} {}", label, error);
        if error.is_abort() && !error.is_cancelled() {
            out.push_str(&format!(
                "\n{}",
                "No answer was produced; the request can be retried.".dimmed()
            ));
        }
        out
    }

    fn path(steps: &[WorkflowStep]) -> String {
        steps
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(" -> ")
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }
}
