//! CLI interface module
//!
//! The interactive console front end: command parsing, the per-console
//! owner session and the read-eval-print loop.

pub mod parser;
pub mod repl;
pub mod session;

pub use parser::{CommandParser, ParsedCommand, normalize_shortlink_input};
pub use repl::{Repl, ReplControl};
pub use session::Session;

use std::fmt;

#[derive(Debug)]
pub enum CliError {
    ParseError(String),
    CommandError(String),
    Io(std::io::Error),
}

impl CliError {
    /// Bare message without the category prefix
    pub fn message(&self) -> String {
        match self {
            CliError::ParseError(msg) => msg.clone(),
            CliError::CommandError(msg) => msg.clone(),
            CliError::Io(e) => e.to_string(),
        }
    }

    /// Format as simple output
    pub fn format_simple(&self) -> String {
        match self {
            CliError::ParseError(msg) => format!("Parse error: {}", msg),
            CliError::CommandError(msg) => format!("Command error: {}", msg),
            CliError::Io(e) => format!("I/O error: {}", e),
        }
    }

    /// Format as colored output
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        match self {
            CliError::ParseError(msg) => {
                format!("{} {}", "Parse error:".yellow().bold(), msg.white())
            }
            CliError::CommandError(msg) => {
                format!("{} {}", "Command error:".red().bold(), msg.white())
            }
            CliError::Io(e) => format!("{} {}", "I/O error:".red().bold(), e),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CliError {}

impl From<crate::errors::ClicklinkError> for CliError {
    fn from(err: crate::errors::ClicklinkError) -> Self {
        CliError::CommandError(err.message().to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Io(err)
    }
}
