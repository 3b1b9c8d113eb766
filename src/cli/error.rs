use thiserror::Error;

use crate::errors::{DayLedgerError, ValidationError};

/// Failures that end the shell.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Core(#[from] DayLedgerError),
}

/// Failures of a single command. Reported to the operator; the shell keeps running.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Core(#[from] DayLedgerError),
    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
    #[error("Unknown command `{name}`{}", suggestion_hint(.suggestion))]
    UnknownCommand {
        name: String,
        suggestion: Option<&'static str>,
    },
}

fn suggestion_hint(suggestion: &Option<&'static str>) -> String {
    match suggestion {
        Some(name) => format!(". Did you mean `{name}`?"),
        None => ". Type `help` to list commands.".into(),
    }
}

impl CommandError {
    pub fn usage(usage: &str) -> Self {
        CommandError::InvalidArguments(format!("Usage: {usage}"))
    }
}
