// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Human-readable duration parsing for configuration values.

use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationError {
    #[error("empty duration string")]
    Empty,
    #[error("invalid number in duration: {0}")]
    InvalidNumber(String),
    #[error("unknown duration suffix: {0}")]
    UnknownSuffix(String),
}

/// Parse a duration string like "100ms", "30s", "5m", "1h" into a Duration.
///
/// A bare number is read as seconds.
pub fn parse_duration(s: &str) -> Result<Duration, DurationError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(DurationError::Empty);
    }

    let (num_str, suffix) = s
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| (&s[..i], &s[i..]))
        .unwrap_or((s, ""));

    let num: u64 = num_str.parse().map_err(|_| DurationError::InvalidNumber(s.to_string()))?;

    let multiplier = match suffix.trim() {
        "ms" | "millis" | "millisecond" | "milliseconds" => {
            return Ok(Duration::from_millis(num));
        }
        "" | "s" | "sec" | "secs" | "second" | "seconds" => 1,
        "m" | "min" | "mins" | "minute" | "minutes" => 60,
        "h" | "hr" | "hrs" | "hour" | "hours" => 3600,
        "d" | "day" | "days" => 86400,
        other => return Err(DurationError::UnknownSuffix(other.to_string())),
    };

    Ok(Duration::from_secs(num.saturating_mul(multiplier)))
}

#[cfg(test)]
#[path = "duration_tests.rs"]
mod tests;
