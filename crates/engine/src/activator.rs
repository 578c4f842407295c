// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Single-shot job activation against the gateway.

use crate::error::WorkerError;
use tokio_util::sync::CancellationToken;
use zb_adapters::GatewayAdapter;
use zb_core::{ActivateJobsRequest, Job};

/// Issues one activation per call, racing it against cancellation.
///
/// Never retries; the acquire loop decides when to try again.
#[derive(Clone)]
pub struct JobActivator<G: GatewayAdapter> {
    gateway: G,
}

impl<G: GatewayAdapter> JobActivator<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    /// Activate up to `request.max_jobs_to_activate` jobs.
    ///
    /// Returns at most that many jobs; anything the broker granted beyond
    /// the limit is dropped so callers can rely on the bound.
    pub async fn activate(
        &self,
        request: &ActivateJobsRequest,
        cancel: &CancellationToken,
    ) -> Result<Vec<Job>, WorkerError> {
        let limit = request.max_jobs_to_activate as usize;
        if limit == 0 {
            return Ok(Vec::new());
        }

        let mut jobs = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(WorkerError::Cancelled),
            result = self.gateway.activate_jobs(request) => result?,
        };

        if jobs.len() > limit {
            tracing::warn!(
                job_type = %request.job_type,
                requested = limit,
                granted = jobs.len(),
                "gateway granted more jobs than requested, dropping surplus"
            );
            jobs.truncate(limit);
        }

        tracing::debug!(job_type = %request.job_type, count = jobs.len(), "activated jobs");
        Ok(jobs)
    }
}

#[cfg(test)]
#[path = "activator_tests.rs"]
mod tests;
