//! Application configuration loaded from a TOML file.
//!
//! Every section and field is optional; anything missing falls back to its
//! default, so an empty file is a valid configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use space_query::EngineConfig;

use crate::error::{AppError, Result};

/// Default `tracing` filter directive.
pub const DEFAULT_LOG_FILTER: &str = "cosmic_explorer=info,space_query=info";

/// Top-level application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Query engine settings, passed through to [`space_query::QueryEngine`].
    pub search: EngineConfig,
    /// Log output settings.
    pub logging: LoggingConfig,
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_owned(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| AppError::Config(format!("{}: {e}", path.display())))
    }

    /// Load from `path` if given, else use defaults. The result is validated.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be loaded or fails validation.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Pretty-printed TOML form of this configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Check the engine settings and the log filter.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Query`] for invalid engine settings and
    /// [`AppError::Config`] for an empty log filter.
    pub fn validate(&self) -> Result<()> {
        self.search.validate()?;
        if self.logging.filter.trim().is_empty() {
            return Err(AppError::Config("logging.filter must not be empty".into()));
        }
        Ok(())
    }

    /// Returns the default config file path: `~/.config/cosmic-explorer/config.toml`.
    pub fn default_config_path() -> PathBuf {
        if let Some(config) = std::env::var_os("XDG_CONFIG_HOME") {
            PathBuf::from(config)
                .join("cosmic-explorer")
                .join("config.toml")
        } else if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home)
                .join(".config")
                .join("cosmic-explorer")
                .join("config.toml")
        } else {
            PathBuf::from("/tmp/cosmic-explorer/config.toml")
        }
    }
}
