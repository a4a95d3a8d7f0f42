//! CLI command definitions

use assistant_domain::OutputFormat;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputArg {
    /// Only the final answer
    Answer,
    /// Answer plus the workflow path, rewrites and forced generation
    Trace,
    /// JSON output
    Json,
}

impl From<OutputArg> for OutputFormat {
    fn from(arg: OutputArg) -> Self {
        match arg {
            OutputArg::Answer => OutputFormat::Answer,
            OutputArg::Trace => OutputFormat::Trace,
            OutputArg::Json => OutputFormat::Json,
        }
    }
}

/// CLI arguments for product-assistant
#[derive(Parser, Debug)]
#[command(name = "product-assistant")]
#[command(author, version, about = "Product assistant - answers e-commerce questions from product reviews")]
#[command(long_about = r#"
Product Assistant answers questions about products, prices and reviews.

Questions mentioning a product, price or review are answered from
retrieved review data:
1. Retrieve: fetch matching product reviews
2. Grade: check the reviews are relevant to the question
3. Rewrite: if not, rephrase the question and retrieve again (bounded)
4. Generate: answer from the reviews

Other questions are answered directly.

Configuration files are loaded from (in priority order):
1. PRODUCT_ASSISTANT_<SECTION>__<KEY>   Environment variables
2. --config <path>                      Explicit config file
3. ./product-assistant.toml             Project-level config
4. ~/.config/product-assistant/config.toml   Global config

Example:
  product-assistant "What is the price of the iPhone 15?"
  product-assistant -o trace --max-rewrites 1 "Best rated headphones under $100?"
  product-assistant --chat --thread shopping-session
"#)]
pub struct Cli {
    /// The question to ask (not required in chat mode)
    pub question: Option<String>,

    /// Start interactive chat mode
    #[arg(short, long)]
    pub chat: bool,

    /// Conversation thread id
    #[arg(short, long, value_name = "ID")]
    pub thread: Option<String>,

    /// Maximum number of question rewrites before a best-effort answer
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub max_rewrites: Option<i64>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputArg>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_question_with_flags() {
        let cli = Cli::try_parse_from([
            "product-assistant",
            "-o",
            "trace",
            "--thread",
            "t-42",
            "--max-rewrites",
            "1",
            "-vv",
            "price of iPhone 15?",
        ])
        .unwrap();

        assert_eq!(cli.question.as_deref(), Some("price of iPhone 15?"));
        assert_eq!(cli.output, Some(OutputArg::Trace));
        assert_eq!(cli.thread.as_deref(), Some("t-42"));
        assert_eq!(cli.max_rewrites, Some(1));
        assert_eq!(cli.verbose, 2);
        assert!(!cli.chat);
    }

    #[test]
    fn test_negative_max_rewrites_parses() {
        let cli =
            Cli::try_parse_from(["product-assistant", "--max-rewrites", "-1", "q"]).unwrap();
        assert_eq!(cli.max_rewrites, Some(-1));
    }

    #[test]
    fn test_unknown_output_format_is_rejected() {
        assert!(Cli::try_parse_from(["product-assistant", "-o", "full", "q"]).is_err());
    }

    #[test]
    fn test_output_arg_maps_to_domain_format() {
        assert_eq!(OutputFormat::from(OutputArg::Json), OutputFormat::Json);
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
