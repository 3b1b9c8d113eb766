//! Line-oriented shell over a [`DaySession`](crate::session::DaySession).

pub mod commands;
mod context;
mod error;
pub mod output;
mod shell;

pub use context::{CliMode, ShellContext};
pub use error::{CliError, CommandError};
pub use shell::{run_cli, SCRIPT_ENV};
