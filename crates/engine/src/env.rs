// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for worker defaults.

use std::time::Duration;
use zb_core::parse_duration;

/// Default gateway REST endpoint
pub const DEFAULT_GATEWAY_ADDRESS: &str = "http://127.0.0.1:8080";

const DEFAULT_WORKER_NAME: &str = "default";
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);
const DEFAULT_JOB_TIMEOUT: Duration = Duration::from_secs(300);

/// Worker name reported to the broker (`ZB_WORKER_NAME`, default "default")
pub fn worker_name() -> String {
    std::env::var("ZB_WORKER_NAME")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_WORKER_NAME.to_string())
}

/// Interval between activation attempts (`ZB_POLL_INTERVAL`, default 100ms)
pub fn poll_interval() -> Duration {
    duration_var("ZB_POLL_INTERVAL").unwrap_or(DEFAULT_POLL_INTERVAL)
}

/// Lease timeout for one-shot activations (`ZB_JOB_TIMEOUT`, default 5m)
pub fn job_timeout() -> Duration {
    duration_var("ZB_JOB_TIMEOUT").unwrap_or(DEFAULT_JOB_TIMEOUT)
}

/// Gateway base URL (`ZB_GATEWAY_ADDRESS`)
pub fn gateway_address() -> String {
    std::env::var("ZB_GATEWAY_ADDRESS")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_GATEWAY_ADDRESS.to_string())
}

/// Bearer token sent with every gateway request (`ZB_AUTH_TOKEN`)
pub fn auth_token() -> Option<String> {
    std::env::var("ZB_AUTH_TOKEN").ok().filter(|s| !s.is_empty())
}

/// Zero durations are rejected here so a bad env value cannot spin the
/// acquire loop.
fn duration_var(name: &str) -> Option<Duration> {
    let raw = std::env::var(name).ok()?;
    match parse_duration(&raw) {
        Ok(d) if !d.is_zero() => Some(d),
        Ok(_) => {
            tracing::warn!(var = name, value = %raw, "zero duration ignored, using default");
            None
        }
        Err(e) => {
            tracing::warn!(var = name, value = %raw, error = %e, "invalid duration, using default");
            None
        }
    }
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
