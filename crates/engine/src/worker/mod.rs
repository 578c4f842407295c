// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job worker: acquire and execute loops over a bounded queue.
//!
//! The acquire loop tops the queue up to capacity; the execute loop drains it
//! one job at a time. Neither loop ever blocks the other: the queue bound is
//! the only backpressure.

mod acquire;
mod execute;

use crate::activator::JobActivator;
use crate::client::JobClient;
use crate::error::ConfigError;
use crate::handler::JobHandler;
use acquire::AcquireLoop;
use execute::ExecuteLoop;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::{Handle, RuntimeFlavor};
use tokio::sync::{mpsc, Notify};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use zb_adapters::GatewayAdapter;
use zb_core::ActivateJobsRequest;

/// Lifecycle of a worker handle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    Open,
    Closed,
}

zb_core::simple_display! {
    WorkerState {
        Open => "open",
        Closed => "closed",
    }
}

/// Validated worker settings, produced by the builder.
pub(crate) struct WorkerConfig<G: GatewayAdapter> {
    pub gateway: G,
    pub handler: Arc<dyn JobHandler<G>>,
    /// Template request; the acquire loop rewrites `max_jobs_to_activate`
    pub request: ActivateJobsRequest,
    pub capacity: usize,
    pub poll_interval: Duration,
    pub auto_complete: bool,
}

/// Handle to a running worker.
///
/// Dropping the handle closes the worker. A handler already running when the
/// worker closes is allowed to finish; queued jobs are abandoned and their
/// leases expire on the broker.
pub struct JobWorker {
    worker_name: String,
    job_type: String,
    cancel: CancellationToken,
    tasks: Vec<JoinHandle<()>>,
}

impl JobWorker {
    /// Start both loops on the current tokio runtime.
    ///
    /// A handler may block its thread, so the loops need a runtime with more
    /// than one worker thread.
    pub(crate) fn spawn<G: GatewayAdapter>(config: WorkerConfig<G>) -> Result<Self, ConfigError> {
        let runtime = Handle::try_current().map_err(|_| ConfigError::NoRuntime)?;
        if runtime.runtime_flavor() == RuntimeFlavor::CurrentThread {
            return Err(ConfigError::CurrentThreadRuntime);
        }

        let worker_name = config.request.worker.clone();
        let job_type = config.request.job_type.clone();
        let (tx, rx) = mpsc::channel(config.capacity);
        let poll_now = Arc::new(Notify::new());
        let cancel = CancellationToken::new();

        let acquire = AcquireLoop {
            activator: JobActivator::new(config.gateway.clone()),
            request: config.request,
            queue: tx,
            poll_now: Arc::clone(&poll_now),
            poll_interval: config.poll_interval,
            cancel: cancel.clone(),
        };
        let execute = ExecuteLoop {
            worker_name: worker_name.clone(),
            handler: config.handler,
            client: JobClient::new(config.gateway),
            queue: rx,
            poll_now,
            auto_complete: config.auto_complete,
            cancel: cancel.clone(),
        };

        let tasks = vec![runtime.spawn(acquire.run()), runtime.spawn(execute.run())];

        info!(
            worker = %worker_name,
            job_type = %job_type,
            capacity = config.capacity,
            poll_interval_ms = config.poll_interval.as_millis() as u64,
            "job worker opened"
        );

        Ok(Self { worker_name, job_type, cancel, tasks })
    }

    pub fn state(&self) -> WorkerState {
        if self.cancel.is_cancelled() {
            WorkerState::Closed
        } else {
            WorkerState::Open
        }
    }

    pub fn is_open(&self) -> bool {
        self.state() == WorkerState::Open
    }

    pub fn is_closed(&self) -> bool {
        self.state() == WorkerState::Closed
    }

    pub fn worker_name(&self) -> &str {
        &self.worker_name
    }

    pub fn job_type(&self) -> &str {
        &self.job_type
    }

    /// Stop polling and dispatching. Idempotent.
    pub fn close(&self) {
        if self.cancel.is_cancelled() {
            return;
        }
        self.cancel.cancel();
        info!(worker = %self.worker_name, job_type = %self.job_type, "job worker closed");
    }

    /// Close and wait until both loops have exited, including any handler
    /// that was running at the time.
    pub async fn shutdown(mut self) {
        self.close();
        for task in std::mem::take(&mut self.tasks) {
            if let Err(e) = task.await {
                warn!(worker = %self.worker_name, error = %e, "worker task ended abnormally");
            }
        }
    }
}

impl Drop for JobWorker {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
#[path = "../worker_tests.rs"]
mod tests;
