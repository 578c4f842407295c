// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Execute loop: hands queued jobs to the handler one at a time.

use crate::client::JobClient;
use crate::handler::{HandlerResult, JobHandler};
use crate::resolution::Resolution;
use futures_util::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::sync::{mpsc, Notify};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};
use zb_adapters::GatewayAdapter;
use zb_core::{Job, JobKey};

pub(super) struct ExecuteLoop<G: GatewayAdapter> {
    pub worker_name: String,
    pub handler: Arc<dyn JobHandler<G>>,
    pub client: JobClient<G>,
    pub queue: mpsc::Receiver<Job>,
    pub poll_now: Arc<Notify>,
    pub auto_complete: bool,
    pub cancel: CancellationToken,
}

impl<G: GatewayAdapter> ExecuteLoop<G> {
    pub(super) async fn run(mut self) {
        loop {
            let job = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => break,
                job = self.queue.recv() => match job {
                    Some(job) => job,
                    None => break,
                },
            };

            if self.queue.is_empty() {
                self.poll_now.notify_one();
            }

            self.dispatch(job).await;
        }
        debug!(worker = %self.worker_name, "execute loop stopped");
    }

    async fn dispatch(&self, job: Job) {
        let key = job.key;
        let retries = job.retries;
        let job_type = job.job_type.clone();

        let result = self.invoke(job).await;
        match result {
            Ok(resolution) if resolution.resolves(key) => {
                debug!(worker = %self.worker_name, job_key = %key, "job resolved by handler");
            }
            Ok(resolution) => {
                if let Resolution::Resolved(receipt) = &resolution {
                    warn!(
                        worker = %self.worker_name,
                        job_key = %key,
                        receipt_key = %receipt.job_key(),
                        "handler returned a receipt for another job"
                    );
                }
                if self.auto_complete {
                    self.complete(key).await;
                }
            }
            Err(e) => self.fail(key, &job_type, retries, &e).await,
        }
    }

    async fn invoke(&self, job: Job) -> HandlerResult {
        match AssertUnwindSafe(self.handler.handle(self.client.clone(), job)).catch_unwind().await {
            Ok(result) => result,
            Err(payload) => Err(anyhow::anyhow!("handler panicked: {}", panic_message(&*payload))),
        }
    }

    async fn complete(&self, key: JobKey) {
        match self.client.complete_job(key).send().await {
            Ok(_) => debug!(worker = %self.worker_name, job_key = %key, "job auto-completed"),
            Err(e) => warn!(
                worker = %self.worker_name,
                job_key = %key,
                error = %e,
                "auto-completion failed"
            ),
        }
    }

    async fn fail(&self, key: JobKey, job_type: &str, retries: i32, cause: &anyhow::Error) {
        let message = failure_message(&self.worker_name, job_type, cause);
        let detail = format!("{:#}", cause);
        error!(worker = %self.worker_name, job_key = %key, job_type, error = %detail, "job handler failed");

        let result = self
            .client
            .fail_job(key)
            .retries(retries.saturating_sub(1).max(0))
            .error_message(message)
            .send()
            .await;
        if let Err(e) = result {
            warn!(worker = %self.worker_name, job_key = %key, error = %e, "failing job failed");
        }
    }
}

pub(super) fn failure_message(worker_name: &str, job_type: &str, cause: &anyhow::Error) -> String {
    format!(
        "Job worker '{}' tried to handle job of type '{}', but exception occurred '{:#}'",
        worker_name, job_type, cause
    )
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
