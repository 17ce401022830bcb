//! HTTP client wrapper.
//!
//! [`ApiClient`] fixes a base URL, default headers and a timeout, and exposes
//! one method per verb. Each call is a single round trip: no retries, and
//! HTTP error statuses come back as ordinary [`ApiResponse`] values.

pub mod error;

pub use error::TransportError;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use url::Url;

use crate::config::ApiClientConfig;
use crate::models::{ApiResponse, HttpMethod, RequestOptions};

/// A configured client for one API.
///
/// Cloning is cheap and clones share the underlying connection pool, so a
/// clone can be moved into each concurrently dispatched task.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    timeout: Duration,
    default_headers: HashMap<String, String>,
    http: reqwest::Client,
}

impl ApiClient {
    /// Creates a client from configuration.
    ///
    /// # Errors
    ///
    /// `TransportError::InvalidUrl` if the base URL does not parse,
    /// `TransportError::Config` if the configuration fails validation, or
    /// `TransportError::Build` if a default header is not a valid header.
    pub fn new(config: &ApiClientConfig) -> Result<Self, TransportError> {
        let base = Url::parse(&config.base_url).map_err(|e| TransportError::InvalidUrl {
            url: config.base_url.clone(),
            message: e.to_string(),
        })?;
        config.validate()?;

        let headers = to_header_map(&config.default_headers)?;
        let timeout = config.timeout();

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .user_agent(concat!("api-test-kit/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TransportError::Build(e.to_string()))?;

        log::debug!(
            "api client ready for {} (timeout {}ms)",
            base,
            timeout.as_millis()
        );

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout,
            default_headers: config.default_headers.clone(),
            http,
        })
    }

    /// The base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Headers attached to every request.
    pub fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Joins the base URL and a relative path.
    ///
    /// A leading slash on `path` is optional.
    pub fn url_for(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            format!("{}/", self.base_url)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Sends a GET request.
    pub async fn get(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<ApiResponse, TransportError> {
        self.request(HttpMethod::GET, path, options).await
    }

    /// Sends a POST request.
    pub async fn post(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<ApiResponse, TransportError> {
        self.request(HttpMethod::POST, path, options).await
    }

    /// Sends a PUT request.
    pub async fn put(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<ApiResponse, TransportError> {
        self.request(HttpMethod::PUT, path, options).await
    }

    /// Sends a DELETE request.
    pub async fn delete(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<ApiResponse, TransportError> {
        self.request(HttpMethod::DELETE, path, options).await
    }

    /// Sends a request with an explicit method.
    ///
    /// Returns once the full body has been read or the timeout elapsed.
    /// The response's `elapsed` covers that whole span.
    pub async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        options: RequestOptions,
    ) -> Result<ApiResponse, TransportError> {
        if let Some(reason) = options.body_error() {
            return Err(TransportError::Build(format!(
                "request body is not valid JSON: {}",
                reason
            )));
        }

        let url = self.url_for(path);
        let parsed = Url::parse(&url).map_err(|e| TransportError::InvalidUrl {
            url: url.clone(),
            message: e.to_string(),
        })?;

        let mut builder = self.http.request(method.to_reqwest(), parsed);
        if !options.query_pairs().is_empty() {
            builder = builder.query(options.query_pairs());
        }
        if !options.headers().is_empty() {
            builder = builder.headers(to_header_map(options.headers())?);
        }
        if let Some(body) = options.json_body() {
            builder = builder.json(body);
        }

        let request = builder
            .build()
            .map_err(|e| TransportError::Build(e.to_string()))?;
        let full_url = request.url().to_string();

        log::debug!("{} {}", method, full_url);
        let started = Instant::now();

        let response = self
            .http
            .execute(request)
            .await
            .map_err(|e| TransportError::from_reqwest(e, &full_url, self.timeout))?;

        let status = response.status();
        let headers = collect_headers(response.headers());

        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::from_reqwest(e, &full_url, self.timeout))?
            .to_vec();
        let elapsed = started.elapsed();

        log::debug!(
            "{} {} -> {} in {:.3}s",
            method,
            full_url,
            status.as_u16(),
            elapsed.as_secs_f64()
        );

        Ok(ApiResponse {
            method,
            url: full_url,
            status_code: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or("Unknown").to_string(),
            headers,
            body,
            elapsed,
        })
    }
}

/// Flattens response headers, joining repeated values with `", "`.
fn collect_headers(headers: &HeaderMap) -> HashMap<String, String> {
    let mut collected: HashMap<String, String> = HashMap::with_capacity(headers.keys_len());
    for (name, value) in headers {
        let value = String::from_utf8_lossy(value.as_bytes());
        collected
            .entry(name.as_str().to_string())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(&value);
            })
            .or_insert_with(|| value.into_owned());
    }
    collected
}

fn to_header_map(headers: &HashMap<String, String>) -> Result<HeaderMap, TransportError> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| TransportError::Build(format!("invalid header name '{}': {}", name, e)))?;
        let value = HeaderValue::from_str(value).map_err(|e| {
            TransportError::Build(format!(
                "invalid value for header '{}': {}",
                name.as_str(),
                e
            ))
        })?;
        map.insert(name, value);
    }
    Ok(map)
}
