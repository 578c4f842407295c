// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Acquire loop: keeps the job queue topped up.

use crate::activator::JobActivator;
use crate::error::WorkerError;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, Notify};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use zb_adapters::GatewayAdapter;
use zb_core::{ActivateJobsRequest, Job};

pub(super) struct AcquireLoop<G: GatewayAdapter> {
    pub activator: JobActivator<G>,
    pub request: ActivateJobsRequest,
    pub queue: mpsc::Sender<Job>,
    pub poll_now: Arc<Notify>,
    pub poll_interval: Duration,
    pub cancel: CancellationToken,
}

impl<G: GatewayAdapter> AcquireLoop<G> {
    pub(super) async fn run(mut self) {
        loop {
            if self.cancel.is_cancelled() {
                break;
            }

            let capacity = self.queue.max_capacity();
            let queued = capacity.saturating_sub(self.queue.capacity());
            if let Some(n) = deficit(capacity, queued) {
                if !self.poll(n).await {
                    break;
                }
            }

            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => break,
                _ = self.poll_now.notified() => {}
                _ = tokio::time::sleep(self.poll_interval) => {}
            }
        }
        debug!(worker = %self.request.worker, job_type = %self.request.job_type, "acquire loop stopped");
    }

    /// One activation cycle. Returns false when the loop should stop.
    async fn poll(&mut self, n: usize) -> bool {
        self.request.max_jobs_to_activate = u32::try_from(n).unwrap_or(u32::MAX);

        let jobs = match self.activator.activate(&self.request, &self.cancel).await {
            Ok(jobs) => jobs,
            Err(WorkerError::Cancelled) => return false,
            Err(e) => {
                warn!(
                    worker = %self.request.worker,
                    job_type = %self.request.job_type,
                    error = %e,
                    "job activation failed"
                );
                return true;
            }
        };

        for job in jobs {
            match self.queue.try_send(job) {
                Ok(()) => {}
                Err(TrySendError::Full(job)) => {
                    warn!(job_key = %job.key, "job queue full, dropping activated job");
                }
                Err(TrySendError::Closed(_)) => return false,
            }
        }
        true
    }
}

/// Jobs to request so the queue reaches `capacity`, if any.
///
/// The job currently held by the handler is not counted as queued.
pub(super) fn deficit(capacity: usize, queued: usize) -> Option<usize> {
    capacity.checked_sub(queued).filter(|n| *n > 0)
}
