// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error type that carries a process exit code.
//!
//! Commands return `ExitError` instead of calling `std::process::exit()`
//! directly, so `main()` owns process termination.

use std::fmt;
use zb_engine::{ConfigError, WorkerError};

/// Exit code for configuration rejected before any gateway call
pub const EXIT_CONFIG: i32 = 2;

#[derive(Debug)]
pub struct ExitError {
    pub code: i32,
    pub message: String,
}

impl ExitError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }
}

impl From<ConfigError> for ExitError {
    fn from(e: ConfigError) -> Self {
        Self::new(EXIT_CONFIG, e.to_string())
    }
}

impl fmt::Display for ExitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ExitError {}

/// Configuration problems exit with [`EXIT_CONFIG`]; everything else is a
/// runtime failure.
pub fn from_worker_error(e: WorkerError) -> anyhow::Error {
    match e {
        WorkerError::Config(config) => ExitError::from(config).into(),
        other => anyhow::Error::new(other),
    }
}
