//! REPL (Read-Eval-Print Loop) for interactive chat

use crate::output::console::ConsoleFormatter;
use crate::progress::Spinner;
use reedline::{DefaultPrompt, DefaultPromptSegment, Reedline, Signal};
use std::sync::Arc;
use tunebridge_application::TuneBridge;
use tunebridge_domain::MessageContext;

/// A parsed slash command.
#[derive(Debug, Clone, PartialEq)]
enum ChatCommand {
    Quit,
    Help,
    Stats,
    Search(String),
    Mood(String),
    Unknown(String),
}

impl ChatCommand {
    fn parse(line: &str) -> Self {
        let (name, arg) = match line.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (line, ""),
        };
        match (name, arg) {
            ("/quit" | "/exit" | "/q", _) => ChatCommand::Quit,
            ("/help" | "/h" | "/?", _) => ChatCommand::Help,
            ("/stats", _) => ChatCommand::Stats,
            ("/search", arg) if !arg.is_empty() => ChatCommand::Search(arg.to_string()),
            ("/mood", arg) if !arg.is_empty() => ChatCommand::Mood(arg.to_string()),
            _ => ChatCommand::Unknown(line.to_string()),
        }
    }
}

/// Interactive chat REPL
///
/// Plain lines are analysed like chat messages; when one is a music command
/// the extracted query is searched right away.
pub struct ChatRepl {
    bridge: Arc<TuneBridge>,
    show_progress: bool,
    user_id: String,
}

impl ChatRepl {
    pub fn new(bridge: Arc<TuneBridge>) -> Self {
        Self {
            bridge,
            show_progress: true,
            user_id: "local".to_string(),
        }
    }

    /// Set whether to show progress
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    /// Run the interactive REPL
    pub async fn run(&self) -> std::io::Result<()> {
        let mut editor = Reedline::create();
        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic("tunebridge".to_string()),
            DefaultPromptSegment::Empty,
        );

        self.print_welcome();

        loop {
            match editor.read_line(&prompt)? {
                Signal::Success(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }

                    if line.starts_with('/') {
                        if self.handle_command(ChatCommand::parse(line)).await {
                            break;
                        }
                        continue;
                    }

                    self.process_line(line).await;
                }
                Signal::CtrlC => {
                    println!("^C");
                    continue;
                }
                Signal::CtrlD => {
                    println!("Bye!");
                    break;
                }
            }
        }

        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│            tunebridge - Chat Mode           │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        Self::print_help();
    }

    fn print_help() {
        println!("Commands:");
        println!("  /search <query>   - Find a track");
        println!("  /mood <text>      - Detect the mood of a text");
        println!("  /stats            - Show performance counters");
        println!("  /help, /h, /?     - Show this help");
        println!("  /quit, /exit, /q  - Exit chat");
        println!();
    }

    /// Handle slash commands. Returns true if should exit.
    async fn handle_command(&self, command: ChatCommand) -> bool {
        match command {
            ChatCommand::Quit => {
                println!("Bye!");
                return true;
            }
            ChatCommand::Help => Self::print_help(),
            ChatCommand::Stats => {
                print!(
                    "{}",
                    ConsoleFormatter::format_stats(&self.bridge.performance_stats())
                );
            }
            ChatCommand::Search(query) => self.search(&query).await,
            ChatCommand::Mood(text) => match self.bridge.detect_mood(&text).await {
                Ok(labels) => print!(
                    "{}",
                    ConsoleFormatter::format_classifications("Mood", &labels)
                ),
                Err(e) => eprintln!("Error: {}", e),
            },
            ChatCommand::Unknown(line) => {
                println!("Unknown command: {}", line);
                println!("Type /help for available commands");
            }
        }
        false
    }

    async fn process_line(&self, line: &str) {
        let ctx = MessageContext::new(line, self.user_id.as_str(), "local", "chat");

        let spinner = Spinner::start("Analysing...", self.show_progress);
        let response = self.bridge.process_message(&ctx).await;
        spinner.finish();

        print!("{}", ConsoleFormatter::format_response(&response));

        if response.is_music_command
            && let Some(query) = &response.extracted_query
        {
            self.search(query).await;
        }
        println!();
    }

    async fn search(&self, query: &str) {
        let spinner = Spinner::start(format!("Searching for {}...", query), self.show_progress);
        let result = self.bridge.search_music(query).await;
        spinner.finish();
        print!("{}", ConsoleFormatter::format_search(query, result.as_ref()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(ChatCommand::parse("/q"), ChatCommand::Quit);
        assert_eq!(ChatCommand::parse("/stats"), ChatCommand::Stats);
        assert_eq!(
            ChatCommand::parse("/search  Hello by Adele "),
            ChatCommand::Search("Hello by Adele".to_string())
        );
        assert_eq!(
            ChatCommand::parse("/mood so tired"),
            ChatCommand::Mood("so tired".to_string())
        );
    }

    #[test]
    fn test_commands_missing_argument_are_unknown() {
        assert_eq!(
            ChatCommand::parse("/search"),
            ChatCommand::Unknown("/search".to_string())
        );
        assert_eq!(
            ChatCommand::parse("/dance"),
            ChatCommand::Unknown("/dance".to_string())
        );
    }
}
