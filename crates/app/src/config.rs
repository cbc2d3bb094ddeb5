//! Console configuration.
//!
//! Layered with the `config` crate: built-in defaults, then an optional TOML
//! file, then `CLINIC_*` environment variables.

use std::path::{Path, PathBuf};
use std::time::Duration;

use clinic_infrastructure::FileSessionStorage;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Default API base of the hosted clinic backend.
pub const DEFAULT_BASE_URL: &str = "https://ruh-backend-production.up.railway.app/api";

/// File read from the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "clinic.toml";

/// Environment variable prefix, e.g. `CLINIC_BASE_URL`.
pub const ENV_PREFIX: &str = "CLINIC";

/// Errors raised while building the configuration.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    /// A source could not be read or merged.
    #[error("could not load configuration: {0}")]
    Source(#[from] config::ConfigError),

    /// `base_url` is not an absolute http(s) URL.
    #[error("invalid base_url {url:?}: {reason}")]
    InvalidBaseUrl {
        /// Offending value.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// `request_timeout_secs` is zero.
    #[error("request_timeout_secs must be greater than zero")]
    InvalidTimeout,

    /// No session file was configured and the platform has no config dir.
    #[error("no session_file configured and no platform config directory found")]
    NoSessionLocation,
}

/// Settings for one console run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// API base URL, including the `/api` segment.
    pub base_url: String,

    /// Where the session is persisted. Defaults to the platform config dir.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_file: Option<PathBuf>,

    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            session_file: None,
            request_timeout_secs: 30,
        }
    }
}

impl ConsoleConfig {
    /// Loads the configuration.
    ///
    /// `explicit` must exist when given. Otherwise `clinic.toml` in the
    /// working directory is used if present.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or the result is invalid.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigLoadError> {
        let file = explicit.map_or_else(
            || File::new(DEFAULT_CONFIG_FILE, FileFormat::Toml).required(false),
            |path| File::from(path).format(FileFormat::Toml).required(true),
        );
        Self::from_sources(file, Environment::with_prefix(ENV_PREFIX).try_parsing(true))
    }

    fn from_sources(
        file: File<config::FileSourceFile, FileFormat>,
        env: Environment,
    ) -> Result<Self, ConfigLoadError> {
        let settings = Config::builder()
            .add_source(Config::try_from(&Self::default())?)
            .add_source(file)
            .add_source(env)
            .build()?;
        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values the sources cannot type-check.
    ///
    /// # Errors
    ///
    /// Returns the first invalid setting found.
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        let url = Url::parse(&self.base_url).map_err(|e| ConfigLoadError::InvalidBaseUrl {
            url: self.base_url.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigLoadError::InvalidBaseUrl {
                url: self.base_url.clone(),
                reason: "scheme must be http or https".to_string(),
            });
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigLoadError::InvalidTimeout);
        }
        Ok(())
    }

    /// Per-request timeout.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Resolved session file location.
    ///
    /// # Errors
    ///
    /// Returns `NoSessionLocation` if none is configured and the platform
    /// has no config directory.
    pub fn session_path(&self) -> Result<PathBuf, ConfigLoadError> {
        self.session_file
            .clone()
            .or_else(FileSessionStorage::default_path)
            .ok_or(ConfigLoadError::NoSessionLocation)
    }
}
