//! Reusable assertions over API responses.
//!
//! Each helper returns `Err` on the first expectation that does not hold, so a
//! scenario can chain them with `?` and stop at the first failure.

pub mod error;
pub mod latency;
pub mod shape;

pub use error::{AssertionFailure, LatencyViolation, ShapeViolation};
pub use latency::{mean_elapsed, validate_latency, validate_mean_latency};
pub use shape::{validate_resource_shape, FieldKind, ResourceShape, COMMENT_SHAPE, POST_SHAPE};

use serde_json::Value;
use std::collections::BTreeSet;

use crate::models::ApiResponse;

/// Fails unless the response has exactly `expected` status.
pub fn assert_status(response: &ApiResponse, expected: u16) -> Result<(), AssertionFailure> {
    if response.status_code == expected {
        Ok(())
    } else {
        Err(AssertionFailure::Status {
            url: response.url.clone(),
            expected: expected.to_string(),
            actual: response.status_code,
        })
    }
}

/// Fails unless the response status is one of `allowed`.
pub fn assert_status_in(response: &ApiResponse, allowed: &[u16]) -> Result<(), AssertionFailure> {
    if allowed.contains(&response.status_code) {
        Ok(())
    } else {
        let codes: Vec<String> = allowed.iter().map(ToString::to_string).collect();
        Err(AssertionFailure::Status {
            url: response.url.clone(),
            expected: format!("one of [{}]", codes.join(", ")),
            actual: response.status_code,
        })
    }
}

/// Fails unless header `name` is present with exactly `expected` as value.
pub fn assert_header(
    response: &ApiResponse,
    name: &str,
    expected: &str,
) -> Result<(), AssertionFailure> {
    match response.header(name) {
        Some(actual) if actual == expected => Ok(()),
        actual => Err(AssertionFailure::Header {
            url: response.url.clone(),
            name: name.to_string(),
            expected: expected.to_string(),
            actual: actual.map(str::to_string),
        }),
    }
}

/// Fails unless `items` has exactly `expected` elements.
pub fn assert_count(what: &str, items: &[Value], expected: usize) -> Result<(), AssertionFailure> {
    if items.len() == expected {
        Ok(())
    } else {
        Err(AssertionFailure::Count {
            what: what.to_string(),
            expected: expected.to_string(),
            actual: items.len(),
        })
    }
}

/// Fails if `items` is empty.
pub fn assert_non_empty(what: &str, items: &[Value]) -> Result<(), AssertionFailure> {
    if items.is_empty() {
        Err(AssertionFailure::Count {
            what: what.to_string(),
            expected: "at least 1".to_string(),
            actual: 0,
        })
    } else {
        Ok(())
    }
}

/// Fails unless every item's `field` equals `expected`.
///
/// Used to check that a filtered listing has no false positives.
pub fn assert_field_equals_all(
    items: &[Value],
    field: &str,
    expected: &Value,
) -> Result<(), AssertionFailure> {
    for (index, item) in items.iter().enumerate() {
        let actual = item.get(field);
        if actual != Some(expected) {
            return Err(AssertionFailure::FieldMismatch {
                index,
                field: field.to_string(),
                expected: expected.to_string(),
                actual: actual.map_or_else(|| "null".to_string(), Value::to_string),
            });
        }
    }
    Ok(())
}

/// Collects the integer `id` of every item.
///
/// Items without an integer `id` are an `InvalidBody` failure.
pub fn collect_ids(items: &[Value]) -> Result<BTreeSet<i64>, AssertionFailure> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            item.get("id")
                .and_then(Value::as_i64)
                .ok_or_else(|| AssertionFailure::InvalidBody {
                    url: "listing".to_string(),
                    reason: format!("item {} has no integer 'id'", index),
                })
        })
        .collect()
}

/// Fails if the two pages share any `id`.
pub fn assert_ids_disjoint(first: &[Value], second: &[Value]) -> Result<(), AssertionFailure> {
    let first = collect_ids(first)?;
    let second = collect_ids(second)?;
    let overlap: Vec<i64> = first.intersection(&second).copied().collect();
    if overlap.is_empty() {
        Ok(())
    } else {
        Err(AssertionFailure::Overlap { overlap })
    }
}
