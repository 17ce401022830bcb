//! HTTP request data models.
//!
//! This module defines the HTTP method enum and the per-request options a
//! caller can attach to a call: query parameters, a JSON body and header
//! overrides.

use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt::Display;

/// HTTP request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET method - retrieve a resource
    GET,
    /// HTTP POST method - submit data to create a resource
    POST,
    /// HTTP PUT method - replace a resource
    PUT,
    /// HTTP DELETE method - remove a resource
    DELETE,
    /// HTTP PATCH method - partially modify a resource
    PATCH,
}

impl HttpMethod {
    /// Returns the string representation of the HTTP method.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::GET => "GET",
            HttpMethod::POST => "POST",
            HttpMethod::PUT => "PUT",
            HttpMethod::DELETE => "DELETE",
            HttpMethod::PATCH => "PATCH",
        }
    }

    pub(crate) fn to_reqwest(self) -> reqwest::Method {
        match self {
            HttpMethod::GET => reqwest::Method::GET,
            HttpMethod::POST => reqwest::Method::POST,
            HttpMethod::PUT => reqwest::Method::PUT,
            HttpMethod::DELETE => reqwest::Method::DELETE,
            HttpMethod::PATCH => reqwest::Method::PATCH,
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Optional parts of a single request.
///
/// Built with chained calls:
///
/// ```
/// use api_test_kit::RequestOptions;
///
/// let options = RequestOptions::new()
///     .query("_page", 2)
///     .query("_limit", 10)
///     .header("X-Trace", "suite");
/// assert_eq!(options.query_pairs().len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    query: Vec<(String, String)>,
    json: Option<Value>,
    headers: HashMap<String, String>,
    body_error: Option<String>,
}

impl RequestOptions {
    /// Creates empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a query parameter. Order is preserved on the wire.
    pub fn query(mut self, name: impl Into<String>, value: impl Display) -> Self {
        self.query.push((name.into(), value.to_string()));
        self
    }

    /// Sets the JSON body.
    ///
    /// A body that cannot be represented as JSON is reported as a
    /// `TransportError::Build` when the request is sent.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Self {
        match serde_json::to_value(body) {
            Ok(value) => {
                self.json = Some(value);
                self.body_error = None;
            }
            Err(e) => {
                self.json = None;
                self.body_error = Some(e.to_string());
            }
        }
        self
    }

    /// Overrides (or adds) a header for this request only.
    ///
    /// Names are stored lowercased, so setting the same header twice in
    /// different case keeps only the last value.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .insert(name.into().to_ascii_lowercase(), value.into());
        self
    }

    /// Query parameters in insertion order.
    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    /// The JSON body, if any.
    pub fn json_body(&self) -> Option<&Value> {
        self.json.as_ref()
    }

    /// Per-request header overrides, keyed by lowercased name.
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    pub(crate) fn body_error(&self) -> Option<&str> {
        self.body_error.as_deref()
    }
}
