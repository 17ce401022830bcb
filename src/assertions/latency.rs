//! Latency checks.
//!
//! The threshold is always supplied by the caller; suites usually take it from
//! [`ApiClientConfig::max_latency_secs`](crate::config::ApiClientConfig).

use std::time::Duration;

use super::error::LatencyViolation;
use crate::models::ApiResponse;

/// Fails when the response's elapsed time meets or exceeds `max_seconds`.
pub fn validate_latency(response: &ApiResponse, max_seconds: f64) -> Result<(), LatencyViolation> {
    check(
        || format!("{} {}", response.method, response.url),
        response.elapsed,
        max_seconds,
    )
}

/// Fails when the mean elapsed time of `responses` meets or exceeds
/// `max_seconds`. An empty slice passes.
pub fn validate_mean_latency(
    responses: &[ApiResponse],
    max_seconds: f64,
) -> Result<(), LatencyViolation> {
    match mean_elapsed(responses) {
        Some(mean) => check(
            || format!("mean of {} responses", responses.len()),
            mean,
            max_seconds,
        ),
        None => Ok(()),
    }
}

/// Arithmetic mean of the elapsed times, or `None` for an empty slice.
pub fn mean_elapsed(responses: &[ApiResponse]) -> Option<Duration> {
    if responses.is_empty() {
        return None;
    }
    let total: Duration = responses.iter().map(|r| r.elapsed).sum();
    let count = u32::try_from(responses.len()).unwrap_or(u32::MAX);
    Some(total / count)
}

fn check(
    subject: impl FnOnce() -> String,
    elapsed: Duration,
    max_seconds: f64,
) -> Result<(), LatencyViolation> {
    if elapsed.as_secs_f64() < max_seconds {
        Ok(())
    } else {
        Err(LatencyViolation {
            subject: subject(),
            elapsed,
            max_seconds,
        })
    }
}
