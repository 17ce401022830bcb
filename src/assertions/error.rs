//! Assertion failure types.
//!
//! Every failure names what was checked and shows expected against actual.

use std::time::Duration;
use thiserror::Error;

use super::shape::FieldKind;

/// An expectation about a response did not hold.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AssertionFailure {
    /// Unexpected status code.
    #[error("{url}: expected status {expected}, got {actual}")]
    Status {
        url: String,
        expected: String,
        actual: u16,
    },

    /// Header missing or with the wrong value.
    #[error("{url}: expected header '{name}' to be '{expected}', got {}", display_actual(.actual))]
    Header {
        url: String,
        name: String,
        expected: String,
        actual: Option<String>,
    },

    /// Body could not be interpreted as the caller required.
    #[error("{url}: {reason}")]
    InvalidBody { url: String, reason: String },

    /// An item in a collection had the wrong value for a field.
    #[error("item {index}: expected '{field}' == {expected}, got {actual}")]
    FieldMismatch {
        index: usize,
        field: String,
        expected: String,
        actual: String,
    },

    /// Two pages shared identifiers.
    #[error("pages overlap on ids {overlap:?}")]
    Overlap { overlap: Vec<i64> },

    /// A collection was expected to be non-empty or of a given size.
    #[error("{what}: expected {expected} items, got {actual}")]
    Count {
        what: String,
        expected: String,
        actual: usize,
    },

    /// A resource did not match its shape.
    #[error(transparent)]
    Shape(#[from] ShapeViolation),

    /// A response was too slow.
    #[error(transparent)]
    Latency(#[from] LatencyViolation),
}

fn display_actual(actual: &Option<String>) -> String {
    match actual {
        Some(value) => format!("'{}'", value),
        None => "nothing".to_string(),
    }
}

/// A resource's structure broke its contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeViolation {
    /// The value under test is not a JSON object.
    #[error("{shape}: expected an object, got {actual}")]
    NotAnObject { shape: &'static str, actual: &'static str },

    /// A required field is absent.
    #[error("{shape}: missing required field: {field}")]
    MissingField {
        shape: &'static str,
        field: &'static str,
    },

    /// A field holds the wrong JSON type.
    #[error("{shape}: {field} should be {expected}, got {actual}")]
    WrongType {
        shape: &'static str,
        field: &'static str,
        expected: FieldKind,
        actual: &'static str,
    },

    /// A field has the right type but an unacceptable value.
    #[error("{shape}: {field} should be {expected}, got {value}")]
    Constraint {
        shape: &'static str,
        field: &'static str,
        expected: FieldKind,
        value: String,
    },
}

impl ShapeViolation {
    /// The field that triggered the violation, if any.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ShapeViolation::NotAnObject { .. } => None,
            ShapeViolation::MissingField { field, .. }
            | ShapeViolation::WrongType { field, .. }
            | ShapeViolation::Constraint { field, .. } => Some(*field),
        }
    }
}

/// A response took at least as long as the allowed maximum.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{subject} took {:.3}s, limit is {:.3}s", .elapsed.as_secs_f64(), .max_seconds)]
pub struct LatencyViolation {
    /// What was measured ("GET http://..." or "mean of 10 responses").
    pub subject: String,
    pub elapsed: Duration,
    pub max_seconds: f64,
}
