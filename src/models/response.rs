//! HTTP response data models.
//!
//! An `ApiResponse` is the read-only result of one round trip: status,
//! headers, the raw body and how long the whole exchange took.

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;

use super::request::HttpMethod;
use crate::assertions::AssertionFailure;

/// Represents an HTTP response received from the API under test.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// Method of the request that produced this response.
    pub method: HttpMethod,

    /// Full URL the request was sent to, including the query string.
    pub url: String,

    /// HTTP status code (e.g., 200, 404, 500).
    pub status_code: u16,

    /// HTTP status text (e.g., "OK", "Not Found").
    pub status_text: String,

    /// Response headers as key-value pairs.
    ///
    /// Use [`ApiResponse::header`] for case-insensitive lookup.
    pub headers: HashMap<String, String>,

    /// Response body as raw bytes.
    pub body: Vec<u8>,

    /// Time from sending the request until the body was fully read.
    pub elapsed: Duration,
}

impl ApiResponse {
    /// Creates a response with an empty body and no headers.
    ///
    /// # Arguments
    ///
    /// * `method` - Method of the originating request
    /// * `url` - URL of the originating request
    /// * `status_code` - HTTP status code
    pub fn new(method: HttpMethod, url: impl Into<String>, status_code: u16) -> Self {
        let status_text = reqwest::StatusCode::from_u16(status_code)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("Unknown")
            .to_string();

        Self {
            method,
            url: url.into(),
            status_code,
            status_text,
            headers: HashMap::new(),
            body: Vec::new(),
            elapsed: Duration::ZERO,
        }
    }

    /// Checks if the response status indicates success (2xx).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// Checks if the response status indicates a client error (4xx).
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code)
    }

    /// Checks if the response status indicates a server error (5xx).
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status_code)
    }

    /// Looks up a header value, ignoring the case of the name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Gets the Content-Type header value if present.
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// Elapsed round-trip time in fractional seconds.
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    /// Parses the body as a JSON value.
    ///
    /// # Returns
    ///
    /// The parsed value, or `AssertionFailure::InvalidBody` if the body is
    /// not JSON.
    pub fn json(&self) -> Result<Value, AssertionFailure> {
        serde_json::from_slice(&self.body).map_err(|e| AssertionFailure::InvalidBody {
            url: self.url.clone(),
            reason: format!("body is not valid JSON: {}", e),
        })
    }

    /// Parses the body as a JSON array.
    pub fn json_array(&self) -> Result<Vec<Value>, AssertionFailure> {
        match self.json()? {
            Value::Array(items) => Ok(items),
            other => Err(AssertionFailure::InvalidBody {
                url: self.url.clone(),
                reason: format!("expected a JSON array, got {}", json_type_name(&other)),
            }),
        }
    }

    /// Deserializes the body into a typed model.
    pub fn json_as<T: DeserializeOwned>(&self) -> Result<T, AssertionFailure> {
        serde_json::from_slice(&self.body).map_err(|e| AssertionFailure::InvalidBody {
            url: self.url.clone(),
            reason: format!(
                "body does not match {}: {}",
                std::any::type_name::<T>(),
                e
            ),
        })
    }

    /// Replaces the body with the serialized form of `value`.
    pub fn with_json_body(mut self, value: &Value) -> Self {
        self.body = value.to_string().into_bytes();
        self
    }

    /// Sets the elapsed time.
    pub fn with_elapsed(mut self, elapsed: Duration) -> Self {
        self.elapsed = elapsed;
        self
    }
}

/// Name of a JSON value's type, as used in failure messages.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
