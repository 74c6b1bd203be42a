//! Special commands parser for interactive chat mode
//!
//! This module parses and handles special commands that can be entered during
//! interactive chat sessions. Special commands allow users to:
//! - Create, list, switch, rename, and delete sessions
//! - Export the current session as JSON
//! - Stage file attachments for the next message
//! - Inspect the dashboard context
//! - Display help information
//! - Exit the session
//!
//! Commands are prefixed with `/`; the command word is case-insensitive while
//! arguments (titles, paths) keep their original casing.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when parsing special commands
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Unknown command was entered
    #[error("Unknown command: {0}\n\nType '/help' to see available commands")]
    UnknownCommand(String),

    /// Command was given an unsupported argument
    #[error("Unsupported argument for {command}: {arg}\n\nType '/help' to see valid usage")]
    UnsupportedArgument { command: String, arg: String },

    /// Command requires an argument but none was provided
    #[error("Command {command} requires an argument\n\nUsage: {usage}")]
    MissingArgument { command: String, usage: String },
}

/// Special commands that can be executed during interactive chat
///
/// These commands modify session state or print information rather than
/// being sent through the assistant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecialCommand {
    /// Create a new session and make it current
    NewSession,

    /// List all sessions with their position and message count
    ListSessions,

    /// Switch to the session at the given 1-based position
    SwitchSession(usize),

    /// Rename the current session
    ///
    /// A renamed session stops deriving its title from the first message.
    RenameSession(String),

    /// Delete the current session
    ///
    /// When it is the last session, it is reset in place instead.
    DeleteSession,

    /// Export the current session as pretty-printed JSON
    ///
    /// With a path argument the JSON is written to that file; otherwise it
    /// is printed to stdout.
    ExportSession(Option<PathBuf>),

    /// Stage one or more files as attachments for the next message
    Attach(Vec<PathBuf>),

    /// Show the dashboard context the assistant is answering from
    ShowData,

    /// Display help information
    Help,

    /// Exit the interactive session
    Exit,

    /// Not a special command
    ///
    /// The input should be sent to the assistant as a regular message.
    None,
}

/// Parse a user input string into a special command
///
/// Checks if the input matches any special command pattern. The command word
/// is case-insensitive; arguments keep their casing.
///
/// # Arguments
///
/// * `input` - The user input string to parse
///
/// # Returns
///
/// Returns Ok(SpecialCommand) for valid commands or SpecialCommand::None for
/// non-commands.
///
/// # Errors
///
/// Returns CommandError::UnknownCommand if input starts with "/" but is not a
/// valid command.
/// Returns CommandError::MissingArgument if a command requires an argument but
/// none was provided.
/// Returns CommandError::UnsupportedArgument if a command receives an invalid
/// argument.
///
/// # Examples
///
/// ```
/// use pulsechat::commands::special_commands::{parse_special_command, SpecialCommand};
///
/// let cmd = parse_special_command("/new").unwrap();
/// assert_eq!(cmd, SpecialCommand::NewSession);
///
/// let cmd = parse_special_command("/switch 2").unwrap();
/// assert_eq!(cmd, SpecialCommand::SwitchSession(2));
///
/// let cmd = parse_special_command("hello assistant").unwrap();
/// assert_eq!(cmd, SpecialCommand::None);
///
/// // Invalid command returns error
/// assert!(parse_special_command("/foo").is_err());
/// ```
pub fn parse_special_command(input: &str) -> Result<SpecialCommand, CommandError> {
    let trimmed = input.trim();
    let lower = trimmed.to_lowercase();

    // If input doesn't start with "/", it's not a command (except exit/quit)
    if !trimmed.starts_with('/') {
        if lower == "exit" || lower == "quit" {
            return Ok(SpecialCommand::Exit);
        }
        return Ok(SpecialCommand::None);
    }

    let (word, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((word, rest)) => (word.to_lowercase(), rest.trim()),
        None => (lower.clone(), ""),
    };

    match word.as_str() {
        "/new" => Ok(SpecialCommand::NewSession),
        "/sessions" => Ok(SpecialCommand::ListSessions),

        "/switch" => {
            if rest.is_empty() {
                return Err(CommandError::MissingArgument {
                    command: "/switch".to_string(),
                    usage: "/switch <number>".to_string(),
                });
            }
            match rest.parse::<usize>() {
                Ok(position) if position >= 1 => Ok(SpecialCommand::SwitchSession(position)),
                _ => Err(CommandError::UnsupportedArgument {
                    command: "/switch".to_string(),
                    arg: rest.to_string(),
                }),
            }
        }

        "/rename" => {
            if rest.is_empty() {
                return Err(CommandError::MissingArgument {
                    command: "/rename".to_string(),
                    usage: "/rename <title>".to_string(),
                });
            }
            Ok(SpecialCommand::RenameSession(rest.to_string()))
        }

        "/delete" => Ok(SpecialCommand::DeleteSession),

        "/export" => {
            if rest.is_empty() {
                Ok(SpecialCommand::ExportSession(None))
            } else {
                Ok(SpecialCommand::ExportSession(Some(PathBuf::from(rest))))
            }
        }

        "/attach" => {
            if rest.is_empty() {
                return Err(CommandError::MissingArgument {
                    command: "/attach".to_string(),
                    usage: "/attach <path> [path ...]".to_string(),
                });
            }
            Ok(SpecialCommand::Attach(
                rest.split_whitespace().map(PathBuf::from).collect(),
            ))
        }

        "/data" => Ok(SpecialCommand::ShowData),
        "/help" => Ok(SpecialCommand::Help),
        "/exit" | "/quit" => Ok(SpecialCommand::Exit),

        _ => Err(CommandError::UnknownCommand(trimmed.to_string())),
    }
}

/// Print help information for special commands
pub fn print_help() {
    println!("Available commands:");
    println!("  /new              Create a new chat session");
    println!("  /sessions         List all sessions");
    println!("  /switch <number>  Switch to a session by its position");
    println!("  /rename <title>   Rename the current session");
    println!("  /delete           Delete the current session");
    println!("  /export [path]    Export the current session as JSON");
    println!("  /attach <path>    Stage files as attachments for the next message");
    println!("  /data             Show the dashboard context");
    println!("  /help             Show this help");
    println!("  exit, quit        Leave the chat");
    println!();
    println!("Anything else is sent to the assistant. Try asking about trends,");
    println!("reports, alerts, your team, or workflows.");
}
