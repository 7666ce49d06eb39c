//! CLI module for Vidask.

pub mod commands;
mod output;
mod view;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Vidask - Ask questions about a video
///
/// Paste a video URL, read its transcript, and ask questions answered from it.
#[derive(Parser, Debug)]
#[command(name = "vidask")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Base URL of the transcript/ingest/ask service (overrides the config file)
    #[arg(long, env = "VIDASK_SERVER", global = true)]
    pub server: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a video URL and optionally ask questions about it
    Analyze {
        /// Video URL
        url: String,

        /// Question to ask once the transcript is indexed (repeatable)
        #[arg(short, long = "question")]
        questions: Vec<String>,

        /// Do not print the transcript
        #[arg(long)]
        quiet: bool,
    },

    /// Start an interactive question-answering session
    Session {
        /// Video URL to analyze first
        url: Option<String>,
    },

    /// Fetch a transcript without indexing it
    Transcript {
        /// Video URL
        url: String,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<String>,

        /// Output format (text, json, markdown)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Check configuration and service reachability
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Open configuration file in editor
    Edit,

    /// Show configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_analyze_with_questions() {
        let cli = Cli::parse_from([
            "vidask",
            "-vv",
            "analyze",
            "https://youtu.be/dQw4w9WgXcQ",
            "-q",
            "Who sings?",
            "--question",
            "When?",
        ]);

        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Analyze { url, questions, quiet } => {
                assert_eq!(url, "https://youtu.be/dQw4w9WgXcQ");
                assert_eq!(questions, vec!["Who sings?", "When?"]);
                assert!(!quiet);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_server_flag_is_global() {
        let cli = Cli::parse_from(["vidask", "doctor", "--server", "http://backend:9000"]);
        assert_eq!(cli.server.as_deref(), Some("http://backend:9000"));
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
