//! Datafeed settings.
//!
//! Settings are built once and handed to the datafeed; nothing here reads
//! global state after construction. Two loaders are provided:
//!
//! - [`DatafeedSettings::from_env`]: `NASDAQDATA_USERNAME`, `NASDAQDATA_PASSWORD`,
//!   and optionally `NASDAQDATA_BASE_URL`, `NASDAQDATA_TIMEOUT_SECS`,
//!   `NASDAQDATA_REQUESTS_PER_SECOND`.
//! - [`DatafeedSettings::from_file`] / [`DatafeedSettings::from_toml_str`]: a
//!   `[datafeed]` table.
//!
//! ```toml
//! [datafeed]
//! username = "alice"
//! password = "my-api-key"
//! timeout_secs = 10
//! ```

use std::{fs, num::NonZeroU32, path::Path, time::Duration};

use nonzero_ext::nonzero;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use shared_utils::env::{InvalidEnvVarError, MissingEnvVarError, get_env_var, get_parsed_env_var};
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://data.nasdaq.com/api/v3/datasets";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const USERNAME_ENV: &str = "NASDAQDATA_USERNAME";
pub const PASSWORD_ENV: &str = "NASDAQDATA_PASSWORD";
pub const BASE_URL_ENV: &str = "NASDAQDATA_BASE_URL";
pub const TIMEOUT_ENV: &str = "NASDAQDATA_TIMEOUT_SECS";
pub const REQUESTS_PER_SECOND_ENV: &str = "NASDAQDATA_REQUESTS_PER_SECOND";

/// Errors related to datafeed configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    MissingEnvVar(#[from] MissingEnvVarError),

    #[error(transparent)]
    InvalidEnvVar(#[from] InvalidEnvVarError),

    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Credentials and connection settings for the NasdaqData datafeed.
#[derive(Debug)]
pub struct DatafeedSettings {
    pub username: String,
    /// Also used as the API key.
    pub password: SecretString,
    pub base_url: String,
    pub timeout: Duration,
    pub requests_per_second: NonZeroU32,
}

#[derive(Deserialize)]
struct SettingsFile {
    datafeed: DatafeedTable,
}

#[derive(Deserialize)]
struct DatafeedTable {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
    base_url: Option<String>,
    timeout_secs: Option<u64>,
    requests_per_second: Option<NonZeroU32>,
}

impl DatafeedSettings {
    /// Settings with default connection parameters.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: secret(password.into()),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            requests_per_second: default_requests_per_second(),
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let mut settings = Self::new(get_env_var(USERNAME_ENV)?, get_env_var(PASSWORD_ENV)?);
        if let Some(base_url) = get_parsed_env_var::<String>(BASE_URL_ENV)? {
            settings.base_url = base_url;
        }
        if let Some(secs) = get_parsed_env_var::<u64>(TIMEOUT_ENV)? {
            settings.timeout = Duration::from_secs(secs);
        }
        if let Some(rps) = get_parsed_env_var::<NonZeroU32>(REQUESTS_PER_SECOND_ENV)? {
            settings.requests_per_second = rps;
        }
        Ok(settings)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let file: SettingsFile = toml::from_str(content)?;
        let table = file.datafeed;

        let mut settings = Self::new(table.username, table.password);
        if let Some(base_url) = table.base_url.filter(|url| !url.trim().is_empty()) {
            settings.base_url = base_url;
        }
        if let Some(secs) = table.timeout_secs {
            settings.timeout = Duration::from_secs(secs);
        }
        if let Some(rps) = table.requests_per_second {
            settings.requests_per_second = rps;
        }
        Ok(settings)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn has_username(&self) -> bool {
        !self.username.trim().is_empty()
    }

    pub fn has_password(&self) -> bool {
        !self.password.expose_secret().trim().is_empty()
    }

    pub(crate) fn api_key(&self) -> SecretString {
        secret(self.password.expose_secret().to_string())
    }
}

pub fn default_requests_per_second() -> NonZeroU32 {
    nonzero!(1u32)
}

fn secret(value: String) -> SecretString {
    SecretString::new(value.into_boxed_str())
}
