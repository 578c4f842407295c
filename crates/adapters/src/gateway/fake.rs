// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory gateway for tests.

use super::{GatewayAdapter, GatewayError};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use zb_core::{ActivateJobsRequest, CompleteJobRequest, FailJobRequest, Job};

/// Recorded gateway call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayCall {
    Activate(ActivateJobsRequest),
    Complete(CompleteJobRequest),
    Fail(FailJobRequest),
}

enum Scripted {
    Jobs(VecDeque<Job>),
    Error(GatewayError),
}

#[derive(Default)]
struct FakeGatewayState {
    script: VecDeque<Scripted>,
    calls: Vec<GatewayCall>,
    hold_activation: bool,
    over_grant: bool,
    complete_error: Option<GatewayError>,
    fail_error: Option<GatewayError>,
}

/// Fake gateway with scripted activation batches.
///
/// Each activation takes at most `max_jobs_to_activate` jobs from the front
/// batch; leftovers stay available for the next activation, like jobs the
/// broker has not leased yet. With nothing scripted, activation grants nothing.
#[derive(Clone, Default)]
pub struct FakeGateway {
    inner: Arc<Mutex<FakeGatewayState>>,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a batch of jobs to be granted by upcoming activations.
    pub fn push_batch(&self, jobs: Vec<Job>) {
        self.inner.lock().script.push_back(Scripted::Jobs(jobs.into()));
    }

    /// Queue an activation failure.
    pub fn push_activation_error(&self, error: GatewayError) {
        self.inner.lock().script.push_back(Scripted::Error(error));
    }

    /// Make activations hang until the caller gives up on them.
    pub fn hold_activations(&self) {
        self.inner.lock().hold_activation = true;
    }

    /// Grant whole batches, ignoring `max_jobs_to_activate`.
    pub fn over_grant(&self) {
        self.inner.lock().over_grant = true;
    }

    pub fn set_complete_error(&self, error: Option<GatewayError>) {
        self.inner.lock().complete_error = error;
    }

    pub fn set_fail_error(&self, error: Option<GatewayError>) {
        self.inner.lock().fail_error = error;
    }

    /// All recorded calls, in order
    pub fn calls(&self) -> Vec<GatewayCall> {
        self.inner.lock().calls.clone()
    }

    pub fn activations(&self) -> Vec<ActivateJobsRequest> {
        self.filter_calls(|call| match call {
            GatewayCall::Activate(r) => Some(r.clone()),
            _ => None,
        })
    }

    pub fn completions(&self) -> Vec<CompleteJobRequest> {
        self.filter_calls(|call| match call {
            GatewayCall::Complete(r) => Some(r.clone()),
            _ => None,
        })
    }

    pub fn failures(&self) -> Vec<FailJobRequest> {
        self.filter_calls(|call| match call {
            GatewayCall::Fail(r) => Some(r.clone()),
            _ => None,
        })
    }

    /// Poll recorded calls until `predicate` holds or `timeout` elapses.
    pub async fn wait_until(
        &self,
        timeout: Duration,
        predicate: impl Fn(&[GatewayCall]) -> bool,
    ) -> bool {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            if predicate(&self.inner.lock().calls) {
                return true;
            }
            if tokio::time::Instant::now() >= deadline {
                return false;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    }

    fn filter_calls<T>(&self, f: impl Fn(&GatewayCall) -> Option<T>) -> Vec<T> {
        self.inner.lock().calls.iter().filter_map(f).collect()
    }
}

#[async_trait]
impl GatewayAdapter for FakeGateway {
    async fn activate_jobs(&self, request: &ActivateJobsRequest) -> Result<Vec<Job>, GatewayError> {
        let hold = {
            let mut state = self.inner.lock();
            state.calls.push(GatewayCall::Activate(request.clone()));
            state.hold_activation
        };
        if hold {
            std::future::pending::<()>().await;
        }

        let mut state = self.inner.lock();
        let over_grant = state.over_grant;
        match state.script.pop_front() {
            None => Ok(Vec::new()),
            Some(Scripted::Error(e)) => Err(e),
            Some(Scripted::Jobs(mut batch)) => {
                let take = if over_grant {
                    batch.len()
                } else {
                    batch.len().min(request.max_jobs_to_activate as usize)
                };
                let granted: Vec<Job> = batch.drain(..take).collect();
                if !batch.is_empty() {
                    state.script.push_front(Scripted::Jobs(batch));
                }
                Ok(granted)
            }
        }
    }

    async fn complete_job(&self, request: &CompleteJobRequest) -> Result<(), GatewayError> {
        let mut state = self.inner.lock();
        state.calls.push(GatewayCall::Complete(request.clone()));
        match state.complete_error.clone() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    async fn fail_job(&self, request: &FailJobRequest) -> Result<(), GatewayError> {
        let mut state = self.inner.lock();
        state.calls.push(GatewayCall::Fail(request.clone()));
        match state.fail_error.clone() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
