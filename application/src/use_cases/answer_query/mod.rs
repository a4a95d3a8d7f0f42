//! AnswerQuery use case
//!
//! Drives one question through the answer workflow:
//!
//! ```text
//! Assistant ─┬─ no product intent ──────────────────────────────▶ Done
//!            └─ product intent ─▶ Retrieve ─▶ Grade ─┬─ sufficient ─▶ Generate ─▶ Done
//!                                                    ├─ insufficient ─▶ Rewrite ─▶ Assistant
//!                                                    └─ budget exhausted ─▶ Generate (forced)
//! ```
//!
//! Each run owns its [`ConversationState`]; runs for different thread ids
//! share only the immutable collaborators held by the use case.

mod steps;
mod types;

pub use types::{AnswerQueryError, AnswerQueryOutput};

use crate::config::WorkflowParams;
use crate::gateways::{GenerationGateway, RetrievalGateway};
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::product_search::ProductSearchPort;
use crate::ports::progress::{NoProgress, WorkflowProgress};
use crate::services::{QueryRewriter, RelevanceGrader};
use crate::use_cases::shared::check_cancelled;
use assistant_domain::{
    ConversationState, IntentClassifier, PromptRegistry, Question, RunConfig, Turn, WorkflowStep,
};
use serde_json::json;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Mutable state of a single run
struct RunState<'a> {
    config: &'a RunConfig,
    conversation: ConversationState,
    steps: Vec<WorkflowStep>,
    rewrites: u32,
    forced_generate: bool,
}

/// Use case for answering one user question
#[derive(Clone)]
pub struct AnswerQueryUseCase {
    retrieval: Arc<RetrievalGateway>,
    generation: Arc<GenerationGateway>,
    grader: RelevanceGrader,
    rewriter: QueryRewriter,
    classifier: IntentClassifier,
    default_max_rewrites: u32,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl AnswerQueryUseCase {
    pub fn new(retrieval: Arc<RetrievalGateway>, generation: Arc<GenerationGateway>) -> Self {
        Self {
            retrieval,
            grader: RelevanceGrader::new(generation.clone()),
            rewriter: QueryRewriter::new(generation.clone()),
            generation,
            classifier: IntentClassifier::default(),
            default_max_rewrites: WorkflowParams::default().max_rewrites,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    /// Assemble the gateways and the use case from workflow parameters
    pub fn from_params(
        search: Arc<dyn ProductSearchPort>,
        llm: Arc<dyn LlmGateway>,
        prompts: PromptRegistry,
        params: &WorkflowParams,
    ) -> Self {
        let retrieval = RetrievalGateway::new(search)
            .with_top_k(params.top_k)
            .with_relevance_threshold(params.relevance_threshold)
            .with_timeout(params.request_timeout);
        let generation =
            GenerationGateway::new(llm, prompts).with_timeout(params.request_timeout);

        Self::new(Arc::new(retrieval), Arc::new(generation))
            .with_classifier(IntentClassifier::new(params.intent_terms.iter()))
            .with_default_max_rewrites(params.max_rewrites)
    }

    pub fn with_classifier(mut self, classifier: IntentClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Rewrite budget used by [`answer`](Self::answer)
    pub fn with_default_max_rewrites(mut self, max_rewrites: u32) -> Self {
        self.default_max_rewrites = max_rewrites;
        self
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub fn default_max_rewrites(&self) -> u32 {
        self.default_max_rewrites
    }

    /// Answer `query` on `thread_id` with the default rewrite budget
    pub async fn answer(&self, query: &str, thread_id: &str) -> Result<String, AnswerQueryError> {
        let config = RunConfig::new(thread_id, self.default_max_rewrites)?;
        self.run(query, &config).await
    }

    /// Run the workflow and return only the final answer text
    pub async fn run(&self, query: &str, config: &RunConfig) -> Result<String, AnswerQueryError> {
        self.execute(query, config).await.map(|output| output.answer)
    }

    pub async fn execute(
        &self,
        query: &str,
        config: &RunConfig,
    ) -> Result<AnswerQueryOutput, AnswerQueryError> {
        self.execute_with_progress(query, config, &NoProgress, None)
            .await
    }

    pub async fn execute_cancellable(
        &self,
        query: &str,
        config: &RunConfig,
        cancellation: &CancellationToken,
    ) -> Result<AnswerQueryOutput, AnswerQueryError> {
        self.execute_with_progress(query, config, &NoProgress, Some(cancellation))
            .await
    }

    /// Run the workflow, reporting each step to `progress`.
    ///
    /// Cancellation is observed between steps and during every
    /// collaborator call.
    pub async fn execute_with_progress(
        &self,
        query: &str,
        config: &RunConfig,
        progress: &dyn WorkflowProgress,
        cancellation: Option<&CancellationToken>,
    ) -> Result<AnswerQueryOutput, AnswerQueryError> {
        let question = Question::try_new(query)?;

        info!(
            "Answering on thread {} (max rewrites: {})",
            config.thread_id(),
            config.max_rewrites()
        );
        self.conversation_logger.log(ConversationEvent::new(
            "run_started",
            json!({
                "thread_id": config.thread_id(),
                "question": question.content(),
                "max_rewrites": config.max_rewrites(),
            }),
        ));

        let mut run = RunState {
            config,
            conversation: ConversationState::start(&question),
            steps: Vec::new(),
            rewrites: 0,
            forced_generate: false,
        };

        match self.drive(&mut run, progress, cancellation).await {
            Ok(()) => self.finish(run),
            Err(e) => {
                warn!("Run on thread {} failed: {}", config.thread_id(), e);
                self.conversation_logger.log(ConversationEvent::new(
                    "run_failed",
                    json!({
                        "thread_id": config.thread_id(),
                        "error": e.to_string(),
                        "steps": run.steps.iter().map(|s| s.as_str()).collect::<Vec<_>>(),
                    }),
                ));
                Err(e)
            }
        }
    }

    async fn drive(
        &self,
        run: &mut RunState<'_>,
        progress: &dyn WorkflowProgress,
        cancellation: Option<&CancellationToken>,
    ) -> Result<(), AnswerQueryError> {
        let mut step = WorkflowStep::Assistant;

        while !step.is_terminal() {
            check_cancelled(cancellation)?;
            run.steps.push(step);
            progress.on_step_start(step);

            let next = match step {
                WorkflowStep::Assistant => self.assistant_step(run, cancellation).await?,
                WorkflowStep::Retrieve => self.retrieve_step(run, cancellation).await?,
                WorkflowStep::Grade => self.grade_step(run, progress, cancellation).await?,
                WorkflowStep::Generate => self.generate_step(run, cancellation).await?,
                WorkflowStep::Rewrite => self.rewrite_step(run, progress, cancellation).await?,
                WorkflowStep::Done => WorkflowStep::Done,
            };

            progress.on_step_complete(step);
            step = next;
        }

        run.steps.push(WorkflowStep::Done);
        Ok(())
    }

    fn finish(&self, run: RunState<'_>) -> Result<AnswerQueryOutput, AnswerQueryError> {
        let answer = run
            .conversation
            .final_answer()
            .ok_or_else(|| {
                AnswerQueryError::Orchestration("run finished without an answer turn".to_string())
            })?
            .to_string();

        info!(
            "Thread {} answered after {} step(s), {} rewrite(s){}",
            run.config.thread_id(),
            run.steps.len(),
            run.rewrites,
            if run.forced_generate { ", forced" } else { "" }
        );
        self.conversation_logger.log(ConversationEvent::new(
            "run_finished",
            json!({
                "thread_id": run.config.thread_id(),
                "answer": answer,
                "rewrites": run.rewrites,
                "forced_generate": run.forced_generate,
                "steps": run.steps.iter().map(|s| s.as_str()).collect::<Vec<_>>(),
            }),
        ));

        Ok(AnswerQueryOutput {
            answer,
            steps: run.steps,
            rewrites: run.rewrites,
            forced_generate: run.forced_generate,
            conversation: run.conversation,
        })
    }

    fn append(&self, run: &mut RunState<'_>, turn: Turn) {
        self.conversation_logger.log(ConversationEvent::new(
            "turn_appended",
            json!({
                "thread_id": run.config.thread_id(),
                "role": turn.role.as_str(),
                "text": turn.text,
            }),
        ));
        run.conversation.append(turn);
    }
}
