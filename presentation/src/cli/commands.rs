//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human readable, coloured
    Text,
    /// Pretty-printed JSON
    Json,
}

/// CLI arguments for tunebridge
#[derive(Parser, Debug)]
#[command(name = "tunebridge")]
#[command(author, version, about = "Chat message analysis and music lookup for chat bots")]
#[command(long_about = r#"
tunebridge analyses chat messages with a small ensemble of pretrained models
(music intent, sentiment, entities, intent) and resolves music requests to
tracks on Spotify or YouTube.

Configuration files are loaded from (in priority order):
1. TUNEBRIDGE_* env vars   e.g. TUNEBRIDGE_CACHE__TTL_SECS=60
2. --config <path>         Explicit config file
3. ./tunebridge.toml       Project-level config
4. ~/.config/tunebridge/config.toml   Global config

Example:
  tunebridge process "play Blinding Lights by The Weeknd"
  tunebridge search "bohemian rhapsody on youtube"
  tunebridge mood "finally passed my exam!!"
  tunebridge chat
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text", global = true)]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Warm up every model and report readiness
    Init,

    /// Analyse one chat message
    Process {
        /// Message text
        message: String,

        #[arg(long, default_value = "local")]
        user: String,

        #[arg(long, default_value = "local")]
        guild: String,

        #[arg(long, default_value = "local")]
        channel: String,
    },

    /// Resolve a free-text music query to a track
    Search {
        /// e.g. "Blinding Lights by The Weeknd" or a YouTube URL
        query: String,
    },

    /// Detect the mood of a text
    Mood { text: String },

    /// Classify the genre of an audio file
    Genre {
        #[arg(value_name = "AUDIO_FILE")]
        file: PathBuf,
    },

    /// Download the audio of a YouTube video as mp3
    Download {
        url: String,

        /// Target directory (default: [youtube] download_dir)
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,
    },

    /// Interactive chat session
    Chat {
        /// User id attached to every message
        #[arg(long, default_value = "local")]
        user: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_process_with_ids() {
        let cli = Cli::parse_from([
            "tunebridge",
            "process",
            "play something",
            "--user",
            "42",
            "--channel",
            "general",
        ]);
        assert_eq!(
            cli.command,
            Some(Command::Process {
                message: "play something".to_string(),
                user: "42".to_string(),
                guild: "local".to_string(),
                channel: "general".to_string(),
            })
        );
        assert_eq!(cli.output, OutputFormat::Text);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["tunebridge", "search", "hello", "-o", "json", "-vv"]);
        assert_eq!(cli.output, OutputFormat::Json);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_show_config_without_command() {
        let cli = Cli::parse_from(["tunebridge", "--show-config"]);
        assert!(cli.show_config);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_parse_chat_user() {
        let cli = Cli::parse_from(["tunebridge", "chat"]);
        assert_eq!(
            cli.command,
            Some(Command::Chat {
                user: "local".to_string()
            })
        );

        let cli = Cli::parse_from(["tunebridge", "chat", "--user", "alice"]);
        assert_eq!(
            cli.command,
            Some(Command::Chat {
                user: "alice".to_string()
            })
        );
    }

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
