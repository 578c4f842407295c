// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Gateway adapter: the three remote operations a job worker needs.

mod rest;

pub use rest::RestGateway;

use async_trait::async_trait;
use thiserror::Error;
use zb_core::{ActivateJobsRequest, CompleteJobRequest, FailJobRequest, Job};

/// Errors from gateway calls
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("gateway unavailable: {0}")]
    Unavailable(String),

    #[error("gateway rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("invalid gateway response: {0}")]
    InvalidResponse(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Adapter for the broker's job gateway.
///
/// Ownership and idempotency of job commands are enforced by the broker.
#[async_trait]
pub trait GatewayAdapter: Clone + Send + Sync + 'static {
    /// Activate up to `request.max_jobs_to_activate` jobs. May return fewer, or none.
    async fn activate_jobs(&self, request: &ActivateJobsRequest) -> Result<Vec<Job>, GatewayError>;

    /// Complete a job, optionally merging variables into the process scope.
    async fn complete_job(&self, request: &CompleteJobRequest) -> Result<(), GatewayError>;

    /// Fail a job, setting its remaining retries.
    async fn fail_job(&self, request: &FailJobRequest) -> Result<(), GatewayError>;
}

#[cfg(any(test, feature = "test-support"))]
mod fake;

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeGateway, GatewayCall};
