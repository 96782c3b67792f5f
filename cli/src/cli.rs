//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for droidmind
#[derive(Parser, Debug)]
#[command(name = "droidmind")]
#[command(author, version, about = "Conversational assistant with tool calling and layered fallbacks")]
#[command(long_about = r#"
droidmind answers questions with a tool-calling model. When the primary tier
fails it falls back to a knowledge-backed model call, and finally to a canned
apology. Conversation memory is kept bounded by summarizing old exchanges.

Configuration files are loaded from (in priority order):
1. --config <path>                       Explicit config file
2. DROIDMIND_* environment variables     e.g. DROIDMIND_PROVIDER__MODEL
3. ./droidmind.toml                      Project-level config
4. ~/.config/droidmind/config.toml       Global config

Example:
  droidmind ask "Who is the fastest champion?"
  droidmind chat --show-memory
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Directory for daily-rolling diagnostic logs and conversation logs
    #[arg(long, value_name = "DIR", global = true)]
    pub log_dir: Option<PathBuf>,

    /// Session identifier (defaults to a timestamp)
    #[arg(long, value_name = "ID", global = true)]
    pub session: Option<String>,

    /// Print the memory snapshot after each turn
    #[arg(long, global = true)]
    pub show_memory: bool,

    /// Screen the user is looking at, as `name` or `name=<json>`
    #[arg(long, value_name = "SCREEN", global = true)]
    pub screen: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactive conversation
    Chat,
    /// Answer a single question and exit
    Ask {
        /// The question
        question: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ask_with_globals() {
        let cli = Cli::try_parse_from([
            "droidmind",
            "ask",
            "Who shot first?",
            "-vv",
            "--session",
            "s1",
            "--show-memory",
        ])
        .unwrap();

        assert!(matches!(cli.command, Commands::Ask { ref question } if question == "Who shot first?"));
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.session.as_deref(), Some("s1"));
        assert!(cli.show_memory);
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["droidmind"]).is_err());
    }
}
