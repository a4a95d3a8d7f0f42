//! Progress notification port
//!
//! Defines the interface for reporting progress through the answer workflow.

use assistant_domain::WorkflowStep;

/// Callback for progress updates during a workflow run
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (spinner, plain text, etc.)
pub trait WorkflowProgress: Send + Sync {
    /// Called when the workflow enters a step
    fn on_step_start(&self, step: WorkflowStep);

    /// Called when a step finished and the next step is known
    fn on_step_complete(&self, step: WorkflowStep);

    /// Called after a question rewrite, with the 1-based attempt number
    fn on_rewrite(&self, _attempt: u32, _max_rewrites: u32) {}

    /// Called when the rewrite budget is spent and generation is forced
    fn on_forced_generate(&self, _rewrites: u32) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl WorkflowProgress for NoProgress {
    fn on_step_start(&self, _step: WorkflowStep) {}
    fn on_step_complete(&self, _step: WorkflowStep) {}
}
