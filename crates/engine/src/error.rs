// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker and configuration errors

use thiserror::Error;
use zb_adapters::GatewayError;

/// Invalid or incomplete worker/command configuration.
///
/// Raised synchronously by `open()` / `send()`; a worker that fails
/// validation never reaches the open state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("missing required setting '{0}'")]
    Missing(&'static str),

    #[error("invalid setting '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("job workers must be opened inside a tokio runtime")]
    NoRuntime,

    #[error("job workers need a multi-threaded tokio runtime")]
    CurrentThreadRuntime,
}

/// Errors surfaced by activation and one-shot commands
#[derive(Debug, Error)]
pub enum WorkerError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("activation cancelled")]
    Cancelled,
}
