//! Runtime configuration.
//!
//! Configuration is merged from multiple sources with the following
//! precedence (highest to lowest):
//!
//! 1. Programmatic overrides (via [`ConfigBuilder::with_config`])
//! 2. Environment variables (`INNKEEP_*`)
//! 3. User config file (`~/.innkeep/config.yaml`)
//! 4. Built-in defaults
//!
//! # Examples
//!
//! ```
//! use innkeep::config::{Config, ConfigBuilder};
//!
//! let config = ConfigBuilder::new()
//!     .skip_files()
//!     .skip_env()
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.score_margin_days(), 3);
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default look-around margin for the room preference scorer, in days.
pub const DEFAULT_SCORE_MARGIN_DAYS: i64 = 3;

/// Default timeout for acquiring a booking scope lock, in milliseconds.
pub const DEFAULT_SCOPE_TIMEOUT_MS: u64 = 5000;

/// Runtime configuration for booking operations.
///
/// All fields are optional; unset fields fall back to built-in defaults
/// through the accessor methods.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Look-around margin used by the room preference scorer, in days.
    pub score_margin_days: Option<i64>,

    /// How long a booking waits for a busy (hotel, room type) scope
    /// before failing, in milliseconds.
    pub scope_timeout_ms: Option<u64>,

    /// Path to the reservation database.
    pub database: Option<PathBuf>,
}

impl Config {
    /// The effective scorer margin in days.
    #[must_use]
    pub fn score_margin_days(&self) -> i64 {
        self.score_margin_days.unwrap_or(DEFAULT_SCORE_MARGIN_DAYS)
    }

    /// The effective scope lock timeout.
    #[must_use]
    pub fn scope_timeout(&self) -> Duration {
        Duration::from_millis(self.scope_timeout_ms.unwrap_or(DEFAULT_SCOPE_TIMEOUT_MS))
    }

    /// Merges `other` into `self`, with `other` taking precedence.
    fn merge(mut self, other: Self) -> Self {
        if other.score_margin_days.is_some() {
            self.score_margin_days = other.score_margin_days;
        }
        if other.scope_timeout_ms.is_some() {
            self.scope_timeout_ms = other.scope_timeout_ms;
        }
        if other.database.is_some() {
            self.database = other.database;
        }
        self
    }

    /// Validates field values.
    fn validate(&self) -> Result<()> {
        if let Some(margin) = self.score_margin_days {
            if margin < 0 {
                return Err(Error::Validation {
                    field: "score_margin_days".into(),
                    message: format!("must be non-negative, got {margin}"),
                });
            }
        }
        if self.scope_timeout_ms == Some(0) {
            return Err(Error::Validation {
                field: "scope_timeout_ms".into(),
                message: "must be greater than zero".into(),
            });
        }
        Ok(())
    }
}

/// Returns the path of the user configuration file, `~/.innkeep/config.yaml`.
///
/// # Errors
///
/// Returns a validation error if the home directory cannot be determined.
pub fn user_config_path() -> Result<PathBuf> {
    let home = home::home_dir().ok_or_else(|| Error::Validation {
        field: "home_directory".into(),
        message: "cannot determine home directory".into(),
    })?;
    Ok(home.join(".innkeep").join("config.yaml"))
}

/// Builder that assembles a [`Config`] from files, environment and
/// programmatic overrides.
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config_path: Option<PathBuf>,
    overrides: Option<Config>,
    skip_files: bool,
    skip_env: bool,
}

impl ConfigBuilder {
    /// Creates a builder with default source resolution.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the config file from an explicit path instead of the user
    /// config location.
    #[must_use]
    pub fn with_config_path(mut self, path: impl AsRef<Path>) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Applies programmatic overrides on top of every other source.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.overrides = Some(config);
        self
    }

    /// Skips reading configuration files.
    #[must_use]
    pub const fn skip_files(mut self) -> Self {
        self.skip_files = true;
        self
    }

    /// Skips reading environment variables.
    #[must_use]
    pub const fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Builds the merged, validated configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read or
    /// parsed, or if a merged value fails validation.
    pub fn build(self) -> Result<Config> {
        let mut config = Config::default();

        if !self.skip_files {
            if let Some(file_config) = self.load_file()? {
                config = config.merge(file_config);
            }
        }

        if !self.skip_env {
            config = config.merge(Self::load_env()?);
        }

        if let Some(overrides) = self.overrides {
            config = config.merge(overrides);
        }

        config.validate()?;
        Ok(config)
    }

    fn load_file(&self) -> Result<Option<Config>> {
        let path = match &self.config_path {
            Some(path) => path.clone(),
            None => match user_config_path() {
                Ok(path) => path,
                // No home directory: nothing to load.
                Err(_) => return Ok(None),
            },
        };

        if !path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(Some(config))
    }

    fn load_env() -> Result<Config> {
        let mut config = Config::default();

        if let Ok(value) = std::env::var("INNKEEP_SCORE_MARGIN_DAYS") {
            let margin = value.parse::<i64>().map_err(|e| Error::Validation {
                field: "INNKEEP_SCORE_MARGIN_DAYS".into(),
                message: format!("invalid integer '{value}': {e}"),
            })?;
            config.score_margin_days = Some(margin);
        }

        if let Ok(value) = std::env::var("INNKEEP_SCOPE_TIMEOUT_MS") {
            let timeout = value.parse::<u64>().map_err(|e| Error::Validation {
                field: "INNKEEP_SCOPE_TIMEOUT_MS".into(),
                message: format!("invalid integer '{value}': {e}"),
            })?;
            config.scope_timeout_ms = Some(timeout);
        }

        if let Ok(value) = std::env::var("INNKEEP_DATABASE") {
            config.database = Some(PathBuf::from(value));
        }

        Ok(config)
    }
}
