//! Application configuration management.
//!
//! Handles loading, saving, and validating andromeda configuration including:
//! - Default formatting patterns and placeholders
//! - Strict or permissive component validation
//! - HTTP bind address and port
//! - Log level and output mode
//!
//! Values are layered: built-in defaults, then the TOML file (if present),
//! then `ANDROMEDA__`-prefixed environment variables such as
//! `ANDROMEDA__SERVER__PORT=8080`.

use std::net::IpAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::format::{
    has_format_token, DEFAULT_DATE_PATTERN, DEFAULT_DATE_PLACEHOLDER, DEFAULT_DATE_TIME_PATTERN,
    DEFAULT_DATE_TIME_PLACEHOLDER,
};

/// Environment variable that overrides the configuration file location.
pub const CONFIG_PATH_ENV: &str = "ANDROMEDA_CONFIG";

/// Prefix for per-field environment overrides.
pub const ENV_PREFIX: &str = "ANDROMEDA";

/// Configuration-specific errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No configuration file at the given path.
    #[error("configuration file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The layered sources could not be read or deserialized.
    #[error("failed to load configuration: {0}")]
    LoadError(#[from] ::config::ConfigError),

    /// Writing the configuration file failed.
    #[error("failed to write {}: {source}", path.display())]
    WriteError {
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The configuration could not be serialized to TOML.
    #[error("failed to serialize configuration: {0}")]
    SerializeError(#[from] toml::ser::Error),

    /// A single field holds an invalid value.
    #[error("{field}: {message}")]
    ValidationError {
        /// Dotted field path, e.g. `server.port`.
        field: String,
        /// What is wrong with it.
        message: String,
    },

    /// More than one field is invalid.
    #[error("{} validation errors", .0.len())]
    MultipleValidationErrors(Vec<ConfigError>),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Main application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct Config {
    /// Default patterns used when a request does not name one.
    pub format: FormatConfig,
    /// Component validation mode.
    pub validation: ValidationConfig,
    /// HTTP listener settings.
    pub server: ServerConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Formatting defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct FormatConfig {
    /// Pattern for date-only output.
    pub date_pattern: String,
    /// Pattern for date-time output.
    pub date_time_pattern: String,
    /// Text shown when a date is absent.
    pub date_placeholder: String,
    /// Text shown when a date-time is absent.
    pub date_time_placeholder: String,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            date_pattern: DEFAULT_DATE_PATTERN.to_string(),
            date_time_pattern: DEFAULT_DATE_TIME_PATTERN.to_string(),
            date_placeholder: DEFAULT_DATE_PLACEHOLDER.to_string(),
            date_time_placeholder: DEFAULT_DATE_TIME_PLACEHOLDER.to_string(),
        }
    }
}

impl FormatConfig {
    /// Placeholder for an absent value rendered with `pattern`: the date
    /// placeholder for the configured date pattern, otherwise the date-time one.
    #[must_use]
    pub fn placeholder_for(&self, pattern: &str) -> &str {
        if pattern == self.date_pattern {
            &self.date_placeholder
        } else {
            &self.date_time_placeholder
        }
    }
}

/// Validation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct ValidationConfig {
    /// Reject out-of-range components instead of converting them as-is.
    pub strict: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self { strict: true }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind, e.g. `0.0.0.0` or `127.0.0.1`.
    pub bind_address: String,
    /// TCP port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    pub level: String,
    /// JSON file output instead of pretty console output.
    pub production: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            production: false,
        }
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// A missing file is not an error; defaults and environment overrides
    /// still apply.
    ///
    /// # Errors
    ///
    /// Returns an error if the file or an override cannot be parsed.
    pub fn load() -> ConfigResult<Self> {
        Self::layered(&Self::config_path(), ENV_PREFIX)
    }

    /// Load configuration from `path`, which must exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotFound`] if the file is missing, or a load
    /// error if it cannot be parsed.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        Self::layered(path, ENV_PREFIX)
    }

    /// Load configuration, falling back to defaults on any error.
    #[must_use]
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to load configuration, using defaults");
            Self::default()
        })
    }

    fn layered(path: &Path, env_prefix: &str) -> ConfigResult<Self> {
        tracing::debug!(path = %path.display(), "Loading configuration");
        let settings = ::config::Config::builder()
            .add_source(::config::File::from(path).required(false))
            .add_source(
                ::config::Environment::with_prefix(env_prefix)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    /// Save configuration to the default path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn save(&self) -> ConfigResult<()> {
        self.save_to(&Self::config_path())
    }

    /// Save configuration to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        let write_error = |source| ConfigError::WriteError {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_error)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(write_error)?;
        tracing::debug!(path = %path.display(), "Saved configuration");
        Ok(())
    }

    /// Check every field, reporting all problems at once.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] for a single problem, or
    /// [`ConfigError::MultipleValidationErrors`] for several.
    pub fn validate(&self) -> ConfigResult<()> {
        let mut errors = Vec::new();
        let mut reject = |field: &str, message: &str| {
            errors.push(ConfigError::ValidationError {
                field: field.to_string(),
                message: message.to_string(),
            });
        };

        for (field, pattern) in [
            ("format.date_pattern", &self.format.date_pattern),
            ("format.date_time_pattern", &self.format.date_time_pattern),
        ] {
            if !has_format_token(pattern) {
                reject(field, "must contain at least one of yyyy, MM, dd, HH, mm, ss");
            }
        }
        if self.server.bind_address.parse::<IpAddr>().is_err() {
            reject("server.bind_address", "must be an IP address");
        }
        if self.server.port == 0 {
            reject("server.port", "must not be 0");
        }
        if self.logging.level.trim().is_empty() {
            reject("logging.level", "must not be empty");
        }

        match errors.len() {
            0 => Ok(()),
            1 => Err(errors.remove(0)),
            _ => Err(ConfigError::MultipleValidationErrors(errors)),
        }
    }

    /// The socket address string the server binds to.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.bind_address, self.server.port)
    }

    /// Get the configuration file path.
    #[must_use]
    pub fn config_path() -> PathBuf {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            return PathBuf::from(path);
        }
        // System install: /etc/andromeda/config.toml
        // Elsewhere: the platform config dir, e.g. ~/Library/Application Support/andromeda
        #[cfg(target_os = "linux")]
        {
            PathBuf::from("/etc/andromeda/config.toml")
        }
        #[cfg(not(target_os = "linux"))]
        {
            directories::ProjectDirs::from("", "", "andromeda").map_or_else(
                || PathBuf::from("andromeda.toml"),
                |dirs| dirs.config_dir().join("config.toml"),
            )
        }
    }
}
