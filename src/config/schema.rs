//! Configuration schema for API test suites.
//!
//! This module defines the configuration structure and validation logic for
//! every knob a suite can override: where requests go, how long they may take,
//! and how strictly the target API is expected to behave.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::time::Duration;
use url::Url;

use super::ConfigError;

/// Main configuration structure for an API test suite.
///
/// Every field has a default, so a settings document only needs to name the
/// values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiClientConfig {
    /// Origin and path prefix all requests are issued against.
    ///
    /// Defaults to the public JSONPlaceholder demo service.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in milliseconds.
    ///
    /// Covers connection, headers and body download. Defaults to 10000ms.
    ///
    /// Must be greater than 0.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Headers sent with every request unless the request overrides them.
    ///
    /// Defaults to JSON `Content-Type` and `Accept`.
    #[serde(default = "default_headers")]
    pub default_headers: HashMap<String, String>,

    /// Latency threshold used by performance checks, in seconds.
    ///
    /// Must be finite and greater than 0. Defaults to 2.0.
    #[serde(default = "default_max_latency_secs")]
    pub max_latency_secs: f64,

    /// Number of concurrent slots in the worker pool. Defaults to 10.
    #[serde(default = "default_pool_size")]
    pub pool_size: usize,

    /// Whether the target API is expected to reject invalid input.
    ///
    /// The demo service accepts anything (missing fields, unknown ids), so
    /// checks that need a conformant API only run when this is enabled.
    #[serde(default)]
    pub strict: bool,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
            default_headers: default_headers(),
            max_latency_secs: default_max_latency_secs(),
            pool_size: default_pool_size(),
            strict: false,
        }
    }
}

impl ApiClientConfig {
    /// Creates a default configuration pointing at `base_url`.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Returns the timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Validates the configuration values.
    ///
    /// # Returns
    ///
    /// `Ok(())` if every value is usable, or the first `ConfigError` found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.base_url).map_err(|e| ConfigError::InvalidValue {
            field: "baseUrl",
            reason: format!("'{}' is not a valid URL: {}", self.base_url, e),
        })?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::InvalidValue {
                field: "baseUrl",
                reason: format!("unsupported scheme '{}'", url.scheme()),
            });
        }

        if self.timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "timeoutMs",
                reason: "must be greater than 0".to_string(),
            });
        }

        if !self.max_latency_secs.is_finite() || self.max_latency_secs <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "maxLatencySecs",
                reason: format!("must be a positive number, got {}", self.max_latency_secs),
            });
        }

        if self.pool_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "poolSize",
                reason: "must be greater than 0".to_string(),
            });
        }

        let mut seen = HashSet::with_capacity(self.default_headers.len());
        for name in self.default_headers.keys() {
            if name.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "defaultHeaders",
                    reason: "header names cannot be empty".to_string(),
                });
            }
            // Header names are case-insensitive on the wire.
            if !seen.insert(name.to_ascii_lowercase()) {
                return Err(ConfigError::InvalidValue {
                    field: "defaultHeaders",
                    reason: format!("header '{}' is set more than once", name),
                });
            }
        }

        Ok(())
    }
}

fn default_base_url() -> String {
    "https://jsonplaceholder.typicode.com".to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_headers() -> HashMap<String, String> {
    let mut headers = HashMap::new();
    headers.insert("Content-Type".to_string(), "application/json".to_string());
    headers.insert("Accept".to_string(), "application/json".to_string());
    headers
}

fn default_max_latency_secs() -> f64 {
    2.0
}

fn default_pool_size() -> usize {
    10
}
