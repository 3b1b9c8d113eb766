use dirs::home_dir;
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

use crate::{currency::DEFAULT_SYMBOL, errors::DayLedgerError, utils::persistence::write_atomic};

const DEFAULT_DIR_NAME: &str = ".day_ledger";
const CONFIG_FILE: &str = "config.json";
pub const HOME_ENV: &str = "DAY_LEDGER_HOME";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default = "Config::default_symbol")]
    pub currency_symbol: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,
    #[serde(default = "Config::default_confirm")]
    pub confirm_destructive: bool,
}

impl Config {
    fn default_symbol() -> String {
        DEFAULT_SYMBOL.into()
    }

    fn default_confirm() -> bool {
        true
    }

    /// Directory exported summaries land in, relative to the working directory
    /// when unset.
    pub fn export_dir(&self) -> PathBuf {
        self.export_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    /// Updates one setting from its textual form. An empty `export_dir`
    /// value resets it to the working directory.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), DayLedgerError> {
        let value = value.trim();
        match key {
            "currency_symbol" => {
                if value.is_empty() {
                    return Err(DayLedgerError::Config(
                        "`currency_symbol` must not be empty".into(),
                    ));
                }
                self.currency_symbol = value.to_string();
            }
            "export_dir" => {
                self.export_dir = (!value.is_empty()).then(|| PathBuf::from(value));
            }
            "confirm_destructive" => {
                self.confirm_destructive = value.parse().map_err(|_| {
                    DayLedgerError::Config(format!(
                        "`confirm_destructive` expects true or false, got `{value}`"
                    ))
                })?;
            }
            other => {
                return Err(DayLedgerError::Config(format!(
                    "unknown setting `{other}`"
                )))
            }
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency_symbol: Self::default_symbol(),
            export_dir: None,
            confirm_destructive: Self::default_confirm(),
        }
    }
}

/// Returns the application data directory, defaulting to `~/.day_ledger`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, DayLedgerError> {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, DayLedgerError> {
        fs::create_dir_all(&base)?;
        Ok(Self {
            path: base.join(CONFIG_FILE),
        })
    }

    /// Loads the stored configuration, or the defaults when none was saved.
    pub fn load(&self) -> Result<Config, DayLedgerError> {
        if !self.path.exists() {
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        let config: Config = serde_json::from_str(&data)?;
        if config.currency_symbol.trim().is_empty() {
            return Err(DayLedgerError::Config(format!(
                "`currency_symbol` in {} must not be empty",
                self.path.display()
            )));
        }
        Ok(config)
    }

    pub fn save(&self, config: &Config) -> Result<(), DayLedgerError> {
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)?;
        tracing::info!(path = %self.path.display(), "configuration saved");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
