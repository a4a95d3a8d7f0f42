//! CLI entrypoint for Product Assistant
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use assistant_application::{
    AnswerQueryError, AnswerQueryUseCase, LlmGateway, NoProgress, ProductSearchPort,
    WorkflowProgress,
};
use assistant_domain::{OutputFormat, RunConfig, Severity};
use assistant_infrastructure::{
    ConfigLoader, FallbackSearch, FileConfig, FileRetrieverConfig, HttpVectorSearch,
    InMemoryProductIndex, JsonlConversationLogger, OpenAiChatGateway, RetrieverBackend, expand_home,
};
use assistant_presentation::{ChatRepl, Cli, ConsoleFormatter, ProgressReporter};
use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_THREAD: &str = "default";

/// Exit code for invalid configuration or input
const EXIT_CONFIG: u8 = 2;
/// Exit code for a failed collaborator call
const EXIT_DEPENDENCY: u8 = 3;
/// Exit code after Ctrl-C
const EXIT_CANCELLED: u8 = 130;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(ExitCode::SUCCESS);
    }

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            let format = cli.output.map(OutputFormat::from).unwrap_or_default();
            eprintln!("{}", ConsoleFormatter::format_error(&e, format));
            return Ok(ExitCode::from(exit_code(&e)));
        }
    };

    let _log_guard = init_logging(cli.verbose, &config)?;
    info!("Starting Product Assistant");

    if !report_config_issues(&config) {
        return Ok(ExitCode::from(EXIT_CONFIG));
    }

    let format = cli
        .output
        .map(OutputFormat::from)
        .or(config.output.format)
        .unwrap_or_default();
    ConsoleFormatter::set_color(config.output.color);

    let params = config.to_workflow_params();
    let run_config = match RunConfig::from_signed(
        cli.thread.as_deref().unwrap_or(DEFAULT_THREAD),
        cli.max_rewrites.unwrap_or(i64::from(params.max_rewrites)),
    ) {
        Ok(run_config) => run_config,
        Err(e) => {
            eprintln!(
                "{}",
                ConsoleFormatter::format_error(&AnswerQueryError::from(e), format)
            );
            return Ok(ExitCode::from(EXIT_CONFIG));
        }
    };

    // === Dependency Injection ===
    let llm: Arc<dyn LlmGateway> = match OpenAiChatGateway::from_config(&config.llm) {
        Ok(gateway) => Arc::new(gateway),
        Err(e) => {
            eprintln!(
                "{}",
                ConsoleFormatter::format_error(
                    &AnswerQueryError::Configuration(e.to_string()),
                    format
                )
            );
            return Ok(ExitCode::from(EXIT_CONFIG));
        }
    };
    let search = match build_search(&config.retriever) {
        Ok(search) => search,
        Err(e) => {
            eprintln!("{}", ConsoleFormatter::format_error(&e, format));
            return Ok(ExitCode::from(exit_code(&e)));
        }
    };

    let mut use_case = AnswerQueryUseCase::from_params(
        search,
        llm,
        config.prompts.to_registry(),
        &params,
    )
    .with_default_max_rewrites(run_config.max_rewrites());

    if let Some(path) = config.logging.conversation_log_path() {
        match JsonlConversationLogger::new(&path) {
            Some(logger) => {
                info!("Conversation log: {}", logger.path().display());
                use_case = use_case.with_conversation_logger(Arc::new(logger));
            }
            None => warn!("Conversation logging disabled"),
        }
    }

    // Chat mode
    if cli.chat {
        let mut repl = ChatRepl::new(Arc::new(use_case), run_config)
            .with_progress(!cli.quiet)
            .with_format(format);
        repl.run().await?;
        return Ok(ExitCode::SUCCESS);
    }

    // Single question mode - question is required
    let Some(question) = cli.question else {
        bail!("Question is required. Use --chat for interactive mode.");
    };

    let cancellation = CancellationToken::new();
    let watcher = cancellation.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            watcher.cancel();
        }
    });

    let reporter = (!cli.quiet).then(ProgressReporter::new);
    let progress: &dyn WorkflowProgress = match &reporter {
        Some(reporter) => reporter,
        None => &NoProgress,
    };

    let result = use_case
        .execute_with_progress(&question, &run_config, progress, Some(&cancellation))
        .await;
    if let Some(reporter) = &reporter {
        reporter.finish();
    }

    match result {
        Ok(output) => {
            println!("{}", ConsoleFormatter::format(&output, format));
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            let rendered = ConsoleFormatter::format_error(&e, format);
            if format == OutputFormat::Json {
                println!("{}", rendered);
            } else {
                eprintln!("{}", rendered);
            }
            Ok(ExitCode::from(exit_code(&e)))
        }
    }
}

/// Initialize tracing: stderr filtered by verbosity, plus an optional log file.
///
/// `RUST_LOG` overrides the verbosity flag.
fn init_logging(verbose: u8, config: &FileConfig) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = || EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let stderr_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(filter());

    let (file_layer, guard) = match config.logging.file_path() {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(|p| p.to_path_buf())
                .unwrap_or_else(|| ".".into());
            let file_name = path
                .file_name()
                .context("[logging] file must name a file")?
                .to_owned();
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("Could not create log directory {}", dir.display()))?;

            let appender = tracing_appender::rolling::never(dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_ansi(false)
                .with_writer(writer)
                .with_filter(filter());
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .init();

    Ok(guard)
}

/// Print every config issue. Returns false if any is an error.
fn report_config_issues(config: &FileConfig) -> bool {
    let issues = config.validate();
    for issue in &issues {
        match issue.severity {
            Severity::Warning => warn!("{}", issue.message),
            Severity::Error => eprintln!("Configuration error: {}", issue.message),
        }
    }
    !issues.iter().any(|i| i.is_error())
}

/// Load layered configuration, or defaults with `--no-config`
fn load_config(cli: &Cli) -> Result<FileConfig, AnswerQueryError> {
    if cli.no_config {
        return Ok(ConfigLoader::load_defaults());
    }
    ConfigLoader::load(cli.config.as_ref()).map_err(|e| {
        AnswerQueryError::Configuration(format!("Failed to load configuration: {}", e))
    })
}

fn build_search(
    config: &FileRetrieverConfig,
) -> Result<Arc<dyn ProductSearchPort>, AnswerQueryError> {
    let primary: Arc<dyn ProductSearchPort> = match config.parse_backend().0 {
        Some(RetrieverBackend::File) => {
            let path = config.documents_file.as_deref().ok_or_else(|| {
                AnswerQueryError::Configuration(
                    "retriever.documents_file is required by the file backend".to_string(),
                )
            })?;
            let index = InMemoryProductIndex::from_file(expand_home(path))
                .map_err(|e| AnswerQueryError::Configuration(e.to_string()))?;
            Arc::new(index)
        }
        Some(RetrieverBackend::Http) => Arc::new(HttpVectorSearch::new(config.endpoint.clone())),
        None => {
            return Err(AnswerQueryError::Configuration(format!(
                "Unknown retriever backend '{}'",
                config.backend
            )));
        }
    };

    Ok(match &config.fallback_endpoint {
        Some(endpoint) => {
            info!("Fallback search: {}", endpoint);
            Arc::new(FallbackSearch::new(
                primary,
                Arc::new(HttpVectorSearch::new(endpoint.clone())),
            ))
        }
        None => primary,
    })
}

fn exit_code(error: &AnswerQueryError) -> u8 {
    match error {
        AnswerQueryError::Configuration(_) => EXIT_CONFIG,
        AnswerQueryError::Cancelled => EXIT_CANCELLED,
        AnswerQueryError::DependencyFailure { .. } | AnswerQueryError::Orchestration(_) => {
            EXIT_DEPENDENCY
        }
    }
}
