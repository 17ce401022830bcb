//! Configuration loading for API test suites.
//!
//! Configuration is an explicit value: it is loaded from a settings document,
//! a JSON file, or the environment, and then handed to
//! [`ApiClient::new`](crate::client::ApiClient::new). Nothing here keeps
//! process-wide state.

pub mod schema;

pub use schema::ApiClientConfig;

use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Key under which suite settings live in a settings document.
pub const SETTINGS_KEY: &str = "api-client";

/// Environment variable naming a JSON settings file.
pub const ENV_CONFIG_FILE: &str = "API_CONFIG_FILE";
/// Environment variable overriding the base URL.
pub const ENV_BASE_URL: &str = "API_BASE_URL";
/// Environment variable overriding the timeout in milliseconds.
pub const ENV_TIMEOUT_MS: &str = "API_TIMEOUT_MS";
/// Environment variable overriding the latency threshold in seconds.
pub const ENV_MAX_LATENCY_SECS: &str = "API_MAX_LATENCY_SECS";
/// Environment variable overriding the worker pool size.
pub const ENV_POOL_SIZE: &str = "API_POOL_SIZE";
/// Environment variable enabling strict checks.
pub const ENV_STRICT: &str = "API_STRICT";

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The settings file could not be read.
    #[error("failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The settings document is not valid for this schema.
    #[error("failed to parse api-client settings: {0}")]
    Parse(#[from] serde_json::Error),

    /// An environment override could not be parsed.
    #[error("invalid value for {var}: '{value}'")]
    InvalidEnv { var: &'static str, value: String },

    /// A value failed validation.
    #[error("invalid configuration: {field} {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Loads configuration from a settings document.
///
/// Reads the `"api-client"` section, fills missing keys with defaults and
/// validates the result. A document without that section yields defaults.
///
/// # Example
///
/// ```
/// use api_test_kit::config::load_config;
/// use serde_json::json;
///
/// let settings = json!({
///     "api-client": {
///         "baseUrl": "http://localhost:3000",
///         "timeoutMs": 2500
///     }
/// });
///
/// let config = load_config(Some(settings)).unwrap();
/// assert_eq!(config.timeout_ms, 2500);
/// ```
pub fn load_config(settings_json: Option<Value>) -> Result<ApiClientConfig, ConfigError> {
    let config = match settings_json
        .as_ref()
        .and_then(|settings| settings.get(SETTINGS_KEY))
    {
        Some(section) => serde_json::from_value::<ApiClientConfig>(section.clone())?,
        None => ApiClientConfig::default(),
    };

    config.validate()?;
    Ok(config)
}

/// Loads configuration from a JSON settings file.
pub fn load_config_file(path: impl AsRef<Path>) -> Result<ApiClientConfig, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let settings: Value = serde_json::from_str(&content)?;
    log::debug!("loaded settings from {}", path.display());
    load_config(Some(settings))
}

/// Resolves the configuration a suite should run with.
///
/// Starts from the file named by `API_CONFIG_FILE` (or defaults when unset),
/// then applies the `API_*` environment overrides and validates.
pub fn resolve_config() -> Result<ApiClientConfig, ConfigError> {
    let mut config = match std::env::var(ENV_CONFIG_FILE) {
        Ok(path) if !path.trim().is_empty() => load_config_file(path)?,
        _ => ApiClientConfig::default(),
    };
    config.apply_env()?;
    config.validate()?;
    Ok(config)
}

impl ApiClientConfig {
    /// Applies `API_*` environment variable overrides.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    /// Applies overrides from an arbitrary variable lookup.
    ///
    /// Empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(base_url) = get(ENV_BASE_URL) {
            self.base_url = base_url.trim().to_string();
        }
        if let Some(value) = get(ENV_TIMEOUT_MS) {
            self.timeout_ms = parse_env(ENV_TIMEOUT_MS, &value)?;
        }
        if let Some(value) = get(ENV_MAX_LATENCY_SECS) {
            self.max_latency_secs = parse_env(ENV_MAX_LATENCY_SECS, &value)?;
        }
        if let Some(value) = get(ENV_POOL_SIZE) {
            self.pool_size = parse_env(ENV_POOL_SIZE, &value)?;
        }
        if let Some(value) = get(ENV_STRICT) {
            self.strict = match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => {
                    return Err(ConfigError::InvalidEnv {
                        var: ENV_STRICT,
                        value,
                    })
                }
            };
        }
        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(var: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
        var,
        value: value.to_string(),
    })
}
