//! Progress reporting for answer workflow runs

use assistant_application::WorkflowProgress;
use assistant_domain::WorkflowStep;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// Spinner on stderr that follows the workflow step by step
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    /// Clear the spinner before printing results
    pub fn finish(&self) {
        if let Ok(mut guard) = self.spinner.lock()
            && let Some(pb) = guard.take()
        {
            pb.finish_and_clear();
        }
    }

    fn with_spinner(&self, f: impl FnOnce(&ProgressBar)) {
        let Ok(mut guard) = self.spinner.lock() else {
            return;
        };
        let pb = guard.get_or_insert_with(|| {
            let pb = ProgressBar::new_spinner();
            pb.set_style(Self::spinner_style());
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        });
        f(pb);
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        self.finish();
    }
}

impl WorkflowProgress for ProgressReporter {
    fn on_step_start(&self, step: WorkflowStep) {
        self.with_spinner(|pb| {
            pb.set_prefix(step.display_name());
            pb.set_message("");
        });
    }

    fn on_step_complete(&self, _step: WorkflowStep) {}

    fn on_rewrite(&self, attempt: u32, max_rewrites: u32) {
        self.with_spinner(|pb| {
            pb.println(format!(
                "{} context insufficient, rewrite {}/{}",
                "~".yellow(),
                attempt,
                max_rewrites
            ));
        });
    }

    fn on_forced_generate(&self, rewrites: u32) {
        self.with_spinner(|pb| {
            pb.println(format!(
                "{} no sufficient context after {} rewrite(s), answering best-effort",
                "!".yellow(),
                rewrites
            ));
        });
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl WorkflowProgress for SimpleProgress {
    fn on_step_start(&self, step: WorkflowStep) {
        eprintln!("{} {}", "->".cyan(), step.display_name().bold());
    }

    fn on_step_complete(&self, _step: WorkflowStep) {}

    fn on_rewrite(&self, attempt: u32, max_rewrites: u32) {
        eprintln!("  {} rewrite {}/{}", "~".yellow(), attempt, max_rewrites);
    }

    fn on_forced_generate(&self, rewrites: u32) {
        eprintln!(
            "  {} budget exhausted after {} rewrite(s)",
            "!".yellow(),
            rewrites
        );
    }
}
