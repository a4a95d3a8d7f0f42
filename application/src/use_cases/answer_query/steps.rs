//! Per-step transitions of the answer workflow.
//!
//! Each step appends its turn(s) to the run's conversation and returns the
//! next step.

use super::{AnswerQueryError, AnswerQueryUseCase, RunState};
use crate::ports::progress::WorkflowProgress;
use crate::use_cases::shared::cancellable;
use assistant_domain::{
    ContextFormatter, GradeDecision, PromptKind, PromptVariables, RoutingDecision, Turn,
    WorkflowStep, truncate,
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Text of the directive turn that requests retrieval
pub(super) const RETRIEVE_DIRECTIVE: &str = "retrieve";

impl AnswerQueryUseCase {
    /// Decide whether the current question needs product data.
    pub(super) async fn assistant_step(
        &self,
        run: &mut RunState<'_>,
        cancellation: Option<&CancellationToken>,
    ) -> Result<WorkflowStep, AnswerQueryError> {
        let question = run.conversation.current_question().to_string();

        match self.classifier.classify(&question) {
            RoutingDecision::Retrieve => {
                debug!("Product intent in '{}', retrieving", truncate(&question, 80));
                self.append(run, Turn::tool_directive(RETRIEVE_DIRECTIVE));
                Ok(WorkflowStep::Retrieve)
            }
            RoutingDecision::AnswerDirect => {
                debug!("No product intent in '{}', answering directly", truncate(&question, 80));
                let variables = PromptVariables::new().with("question", question);
                let answer = cancellable(cancellation, async {
                    self.generation
                        .complete(PromptKind::Direct, &variables)
                        .await
                        .map_err(|e| AnswerQueryError::from_generation(WorkflowStep::Assistant, e))
                })
                .await?;
                self.append(run, Turn::answer(answer));
                Ok(WorkflowStep::Done)
            }
        }
    }

    /// Fetch documents for the current question and record them as context.
    pub(super) async fn retrieve_step(
        &self,
        run: &mut RunState<'_>,
        cancellation: Option<&CancellationToken>,
    ) -> Result<WorkflowStep, AnswerQueryError> {
        let query = run.conversation.current_question().to_string();

        let documents = cancellable(cancellation, async {
            self.retrieval
                .fetch(&query)
                .await
                .map_err(|e| AnswerQueryError::from_gateway(WorkflowStep::Retrieve, e))
        })
        .await?;

        if documents.is_empty() {
            warn!("No documents retrieved for '{}'", truncate(&query, 80));
        } else {
            debug!("Retrieved {} document(s)", documents.len());
        }

        self.append(run, Turn::context(ContextFormatter::format(&documents)));
        Ok(WorkflowStep::Grade)
    }

    /// Judge the latest context against the original question.
    pub(super) async fn grade_step(
        &self,
        run: &mut RunState<'_>,
        progress: &dyn WorkflowProgress,
        cancellation: Option<&CancellationToken>,
    ) -> Result<WorkflowStep, AnswerQueryError> {
        let question = run.conversation.original_question().to_string();
        let context = latest_context(run, WorkflowStep::Grade)?;

        let decision = cancellable(cancellation, async {
            self.grader
                .grade(&question, &context)
                .await
                .map_err(|e| AnswerQueryError::from_generation(WorkflowStep::Grade, e))
        })
        .await?;

        debug!("Context graded {}", decision);
        self.append(run, Turn::assistant(format!("relevance: {}", decision.as_str())));

        match decision {
            GradeDecision::Sufficient => Ok(WorkflowStep::Generate),
            GradeDecision::Insufficient if run.rewrites < run.config.max_rewrites() => {
                Ok(WorkflowStep::Rewrite)
            }
            GradeDecision::Insufficient => Ok(self.force_generate(run, progress)),
        }
    }

    /// Answer the original question from the latest context.
    pub(super) async fn generate_step(
        &self,
        run: &mut RunState<'_>,
        cancellation: Option<&CancellationToken>,
    ) -> Result<WorkflowStep, AnswerQueryError> {
        let question = run.conversation.original_question().to_string();
        let context = latest_context(run, WorkflowStep::Generate)?;

        let variables = PromptVariables::new()
            .with("question", question)
            .with("context", context);
        let answer = cancellable(cancellation, async {
            self.generation
                .complete(PromptKind::Generate, &variables)
                .await
                .map_err(|e| AnswerQueryError::from_generation(WorkflowStep::Generate, e))
        })
        .await?;

        self.append(run, Turn::answer(answer));
        Ok(WorkflowStep::Done)
    }

    /// Reformulate the original question and route it back to the assistant.
    pub(super) async fn rewrite_step(
        &self,
        run: &mut RunState<'_>,
        progress: &dyn WorkflowProgress,
        cancellation: Option<&CancellationToken>,
    ) -> Result<WorkflowStep, AnswerQueryError> {
        let question = run.conversation.original_question().to_string();

        let rewritten = cancellable(cancellation, async {
            self.rewriter
                .rewrite(&question)
                .await
                .map_err(|e| AnswerQueryError::from_generation(WorkflowStep::Rewrite, e))
        })
        .await?;

        run.rewrites += 1;
        let max_rewrites = run.config.max_rewrites();
        info!(
            "Rewrite {}/{}: '{}'",
            run.rewrites,
            max_rewrites,
            truncate(&rewritten, 80)
        );
        progress.on_rewrite(run.rewrites, max_rewrites);
        self.append(run, Turn::user(rewritten));
        Ok(WorkflowStep::Assistant)
    }

    fn force_generate(
        &self,
        run: &mut RunState<'_>,
        progress: &dyn WorkflowProgress,
    ) -> WorkflowStep {
        warn!(
            "Rewrite budget exhausted after {} rewrite(s), generating best-effort answer",
            run.rewrites
        );
        run.forced_generate = true;
        progress.on_forced_generate(run.rewrites);
        WorkflowStep::Generate
    }
}

fn latest_context(run: &RunState<'_>, step: WorkflowStep) -> Result<String, AnswerQueryError> {
    run.conversation
        .latest_context()
        .map(str::to_string)
        .ok_or_else(|| {
            AnswerQueryError::Orchestration(format!(
                "{} step reached without retrieved context",
                step.as_str()
            ))
        })
}
