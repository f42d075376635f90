//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for trivia-rush
#[derive(Parser, Debug)]
#[command(name = "trivia-rush")]
#[command(author, version, about = "Timed multiple-choice trivia in the terminal")]
#[command(long_about = r#"
Trivia Rush asks timed multiple-choice questions on a topic until you run
out of lives.

Questions come from a local cache, an OpenAI-compatible generator (when
an API key is configured) or a built-in fallback corpus.

While playing, type a line and press Enter:
  1-4   answer
  h     hint (costs points)
  p     pause / resume
  r     retry when no questions are available
  q     quit

Configuration files are loaded from (in priority order):
1. TRIVIA_<SECTION>__<KEY> environment variables
2. --config <path>     Explicit config file
3. ./trivia.toml       Project-level config
4. ~/.config/trivia-rush/config.toml   Global config

Example:
  trivia-rush science
  trivia-rush --offline history
  trivia-rush -vv --log-dir ./logs --event-log ./session.jsonl math
"#)]
pub struct Cli {
    /// Topic to play (defaults to [session] default_topic)
    pub topic: Option<String>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Never call the remote generator; play from the fallback corpus
    #[arg(long)]
    pub offline: bool,

    /// Write logs to a daily rolling file in DIR instead of stderr
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Record session events as JSON lines
    #[arg(long, value_name = "PATH")]
    pub event_log: Option<PathBuf>,

    /// Host tick interval in milliseconds
    #[arg(long, value_name = "N", default_value_t = 100, value_parser = clap::value_parser!(u64).range(10..=1000))]
    pub tick_ms: u64,

    /// Suppress the countdown bar
    #[arg(short, long)]
    pub quiet: bool,

    /// List available fallback topics and exit
    #[arg(long)]
    pub list_topics: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Show the stored high score and exit
    #[arg(long)]
    pub high_score: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["trivia-rush"]).unwrap();
        assert!(cli.topic.is_none());
        assert_eq!(cli.tick_ms, 100);
        assert_eq!(cli.verbose, 0);
        assert!(!cli.offline);
    }

    #[test]
    fn test_full_invocation() {
        let cli = Cli::try_parse_from([
            "trivia-rush",
            "-vv",
            "--offline",
            "--tick-ms",
            "250",
            "--event-log",
            "session.jsonl",
            "history",
        ])
        .unwrap();
        assert_eq!(cli.topic.as_deref(), Some("history"));
        assert_eq!(cli.verbose, 2);
        assert!(cli.offline);
        assert_eq!(cli.tick_ms, 250);
        assert_eq!(cli.event_log, Some(PathBuf::from("session.jsonl")));
    }

    #[test]
    fn test_tick_out_of_range_rejected() {
        assert!(Cli::try_parse_from(["trivia-rush", "--tick-ms", "5"]).is_err());
    }
}
