//! REPL (Read-Eval-Print Loop) for interactive chat

use crate::{ConsoleFormatter, ProgressReporter};
use assistant_application::{AnswerQueryUseCase, NoProgress, WorkflowProgress};
use assistant_domain::{OutputFormat, RunConfig};
use colored::Colorize;
use reedline::{DefaultPrompt, DefaultPromptSegment, FileBackedHistory, Reedline, Signal};
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

const HISTORY_SIZE: usize = 1000;

/// Outcome of a slash command
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Quit,
    Help,
    ShowThread,
    SwitchThread(String),
    Unknown(String),
}

impl Command {
    fn parse(line: &str) -> Self {
        let mut parts = line.split_whitespace();
        match (parts.next().unwrap_or_default(), parts.next()) {
            ("/quit" | "/exit" | "/q", _) => Command::Quit,
            ("/help" | "/h" | "/?", _) => Command::Help,
            ("/thread", None) => Command::ShowThread,
            ("/thread", Some(id)) => Command::SwitchThread(id.to_string()),
            _ => Command::Unknown(line.to_string()),
        }
    }
}

/// Interactive chat REPL
///
/// All questions of a session share one thread id. Ctrl-C during a run
/// cancels that run; at the prompt it only clears the line.
pub struct ChatRepl {
    use_case: Arc<AnswerQueryUseCase>,
    config: RunConfig,
    format: OutputFormat,
    show_progress: bool,
    history_file: Option<PathBuf>,
}

impl ChatRepl {
    pub fn new(use_case: Arc<AnswerQueryUseCase>, config: RunConfig) -> Self {
        Self {
            use_case,
            config,
            format: OutputFormat::Answer,
            show_progress: true,
            history_file: dirs::data_dir()
                .map(|p| p.join("product-assistant").join("history.txt")),
        }
    }

    /// Set whether to show progress
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> std::io::Result<()> {
        let mut editor = Reedline::create();
        if let Some(path) = &self.history_file {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            if let Ok(history) = FileBackedHistory::with_file(HISTORY_SIZE, path.clone()) {
                editor = editor.with_history(Box::new(history));
            }
        }

        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic("assistant".to_string()),
            DefaultPromptSegment::Empty,
        );

        self.print_welcome();

        loop {
            match editor.read_line(&prompt) {
                Ok(Signal::Success(line)) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }

                    if line.starts_with('/') {
                        if self.handle_command(line) {
                            break;
                        }
                        continue;
                    }

                    self.process_question(line).await;
                }
                Ok(Signal::CtrlC) => continue,
                Ok(_) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {}", err);
                    break;
                }
            }
        }

        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("{}", "Product Assistant - Chat Mode".cyan().bold());
        println!("Thread: {}", self.config.thread_id());
        println!("Max rewrites: {}", self.config.max_rewrites());
        println!();
        Self::print_help();
    }

    fn print_help() {
        println!("Commands:");
        println!("  /help, /h, /?     - Show this help");
        println!("  /thread           - Show the current thread id");
        println!("  /thread <id>      - Switch to another thread id");
        println!("  /quit, /exit, /q  - Exit chat");
        println!();
    }

    /// Handle slash commands. Returns true if should exit.
    fn handle_command(&mut self, line: &str) -> bool {
        match Command::parse(line) {
            Command::Quit => {
                println!("Bye!");
                return true;
            }
            Command::Help => Self::print_help(),
            Command::ShowThread => println!("Thread: {}", self.config.thread_id()),
            Command::SwitchThread(id) => {
                match RunConfig::new(id, self.config.max_rewrites()) {
                    Ok(config) => {
                        self.config = config;
                        println!("Switched to thread {}", self.config.thread_id());
                    }
                    Err(e) => eprintln!("Error: {}", e),
                }
            }
            Command::Unknown(cmd) => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
            }
        }
        false
    }

    async fn process_question(&self, question: &str) {
        println!();

        let token = CancellationToken::new();
        let watcher = token.clone();
        let ctrl_c = tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                watcher.cancel();
            }
        });

        let reporter = self.show_progress.then(ProgressReporter::new);
        let progress: &dyn WorkflowProgress = match &reporter {
            Some(reporter) => reporter,
            None => &NoProgress,
        };

        let result = self
            .use_case
            .execute_with_progress(question, &self.config, progress, Some(&token))
            .await;

        ctrl_c.abort();
        if let Some(reporter) = &reporter {
            reporter.finish();
        }

        match result {
            Ok(output) => println!("{}", ConsoleFormatter::format(&output, self.format)),
            Err(e) => eprintln!("{}", ConsoleFormatter::format_error(&e, self.format)),
        }
        println!();
    }
}
