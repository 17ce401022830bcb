//! Building blocks for HTTP API test suites.
//!
//! This crate holds the reusable part of a REST API test suite: a configured
//! client and a handful of assertions. The test cases themselves live with
//! the suite (see `tests/` in this repository for a complete example against
//! the JSONPlaceholder demo service).
//!
//! # Architecture
//!
//! - **config**: suite configuration (base URL, timeout, default headers,
//!   latency threshold, pool size, strictness) loaded from JSON or `API_*`
//!   environment variables
//! - **client**: [`ApiClient`], a thin wrapper over `reqwest` with one method
//!   per verb
//! - **models**: request options, responses and the demo resources
//! - **assertions**: shape and latency validation plus status, header,
//!   filter and pagination checks
//! - **pool**: bounded concurrent dispatch with completion-order results
//!
//! # Usage
//!
//! ```no_run
//! use api_test_kit::assertions::{assert_status, validate_latency, validate_resource_shape};
//! use api_test_kit::{ApiClient, ApiClientConfig, RequestOptions};
//!
//! # async fn example() -> api_test_kit::Result<()> {
//! let config = ApiClientConfig::default();
//! let api = ApiClient::new(&config)?;
//!
//! let response = api.get("posts/1", RequestOptions::new()).await?;
//! assert_status(&response, 200)?;
//! validate_resource_shape(&response.json()?)?;
//! validate_latency(&response, config.max_latency_secs)?;
//! # Ok(())
//! # }
//! ```

pub mod assertions;
pub mod client;
pub mod config;
pub mod models;
pub mod pool;

pub use assertions::{AssertionFailure, LatencyViolation, ShapeViolation};
pub use client::{ApiClient, TransportError};
pub use config::{ApiClientConfig, ConfigError};
pub use models::{ApiResponse, Comment, HttpMethod, NewPost, Post, RequestOptions};
pub use pool::{PoolError, WorkerPool};

use thiserror::Error;

/// Any failure a suite can hit.
#[derive(Debug, Error)]
pub enum Error {
    /// No response was obtained.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A response did not meet an expectation.
    #[error(transparent)]
    Assertion(#[from] AssertionFailure),

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Concurrent dispatch failed.
    #[error(transparent)]
    Pool(#[from] PoolError),
}

impl From<ShapeViolation> for Error {
    fn from(violation: ShapeViolation) -> Self {
        Error::Assertion(violation.into())
    }
}

impl From<LatencyViolation> for Error {
    fn from(violation: LatencyViolation) -> Self {
        Error::Assertion(violation.into())
    }
}

/// Result alias used by suite scenarios.
pub type Result<T> = std::result::Result<T, Error>;

/// Installs the `env_logger` backend for the `log` facade.
///
/// Filtering follows `RUST_LOG`. Safe to call from every test: only the
/// first call installs the logger.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
