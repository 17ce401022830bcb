//! Transport error types.
//!
//! A `TransportError` means no HTTP response was obtained at all. HTTP error
//! statuses (4xx/5xx) are never mapped here; they come back as ordinary
//! responses for the caller to inspect.

use std::time::Duration;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur before a response is received.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request did not complete within the configured timeout.
    #[error("request to {url} timed out after {}ms", .timeout.as_millis())]
    Timeout { url: String, timeout: Duration },

    /// The connection could not be established.
    ///
    /// Covers DNS resolution failures and refused connections.
    #[error("connection to {url} failed: {message}")]
    Connect { url: String, message: String },

    /// The base URL or the joined request URL is malformed.
    #[error("invalid URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    /// The client configuration failed validation.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The request could not be built (bad header, unserializable body).
    #[error("request build error: {0}")]
    Build(String),

    /// Any other network-level failure, including reading the body.
    #[error("network error: {0}")]
    Network(String),
}

impl TransportError {
    /// Maps a reqwest error for a request to `url` with the given timeout.
    pub(crate) fn from_reqwest(err: reqwest::Error, url: &str, timeout: Duration) -> Self {
        if err.is_timeout() {
            TransportError::Timeout {
                url: url.to_string(),
                timeout,
            }
        } else if err.is_connect() {
            TransportError::Connect {
                url: url.to_string(),
                message: err.to_string(),
            }
        } else if err.is_builder() {
            TransportError::Build(err.to_string())
        } else {
            TransportError::Network(err.to_string())
        }
    }

    /// Returns `true` if the request timed out.
    pub fn is_timeout(&self) -> bool {
        matches!(self, TransportError::Timeout { .. })
    }

    /// Returns `true` if the connection could not be established.
    pub fn is_connect(&self) -> bool {
        matches!(self, TransportError::Connect { .. })
    }
}
