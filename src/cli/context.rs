use dialoguer::{theme::ColorfulTheme, Confirm};

use crate::{
    config::{Config, ConfigManager},
    currency::{format_currency, format_long_date},
    session::DaySession,
};

use super::error::{CliError, CommandError};
use super::output;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

/// State shared by every command for the lifetime of the shell.
pub struct ShellContext {
    pub(crate) mode: CliMode,
    pub(crate) session: DaySession,
    pub(crate) config: Config,
    pub(crate) config_manager: ConfigManager,
    theme: ColorfulTheme,
    pub(crate) running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = ConfigManager::new()?;
        let config = config_manager.load()?;
        Ok(Self::from_parts(mode, config, config_manager))
    }

    pub fn from_parts(mode: CliMode, config: Config, config_manager: ConfigManager) -> Self {
        if mode == CliMode::Script {
            output::disable_color();
        }
        Self {
            mode,
            session: DaySession::new(),
            config,
            config_manager,
            theme: ColorfulTheme::default(),
            running: true,
        }
    }

    pub fn session(&self) -> &DaySession {
        &self.session
    }

    pub fn prompt(&self) -> String {
        format!("day-ledger [{}]> ", self.session.current_date().format("%Y-%m-%d"))
    }

    pub(crate) fn money(&self, amount: f64) -> String {
        format_currency(amount, &self.config.currency_symbol)
    }

    pub(crate) fn long_date(&self) -> String {
        format_long_date(self.session.current_date())
    }

    /// Asks before destructive actions. Script mode and a disabled
    /// `confirm_destructive` setting answer yes.
    pub(crate) fn confirm(&self, prompt: &str) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script || !self.config.confirm_destructive {
            return Ok(true);
        }
        Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(false)
            .interact()
            .map_err(CommandError::from)
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        match self.confirm("Exit the shell? Today's entries are not saved.") {
            Ok(answer) => Ok(answer),
            Err(err) => {
                output::error(&err);
                Ok(true)
            }
        }
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        tracing::warn!(error = %err, "command rejected");
        output::error(err);
    }
}
