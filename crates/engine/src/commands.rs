// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job commands: complete, fail, and one-shot activation.

use crate::activator::JobActivator;
use crate::env;
use crate::error::{ConfigError, WorkerError};
use crate::resolution::{Receipt, TerminalCommand};
use serde::Serialize;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use zb_adapters::{GatewayAdapter, GatewayError};
use zb_core::{ActivateJobsRequest, CompleteJobRequest, FailJobRequest, Job, JobKey};

/// Completes a job, optionally merging variables into the process scope.
pub struct CompleteJobCommand<G: GatewayAdapter> {
    gateway: G,
    request: CompleteJobRequest,
}

impl<G: GatewayAdapter> CompleteJobCommand<G> {
    pub(crate) fn new(gateway: G, key: JobKey) -> Self {
        Self { gateway, request: CompleteJobRequest::new(key) }
    }

    /// Variables as a JSON document.
    pub fn variables(mut self, variables: impl Into<String>) -> Self {
        self.request.variables = Some(variables.into());
        self
    }

    /// Variables serialized from any value that maps to a JSON object.
    pub fn variables_from<T: Serialize>(mut self, variables: &T) -> Result<Self, serde_json::Error> {
        self.request.variables = Some(serde_json::to_string(variables)?);
        Ok(self)
    }

    pub fn request(&self) -> &CompleteJobRequest {
        &self.request
    }

    pub async fn send(self) -> Result<Receipt, GatewayError> {
        self.gateway.complete_job(&self.request).await?;
        Ok(Receipt::new(self.request.job_key, TerminalCommand::Complete))
    }
}

/// Fails a job and sets its remaining retries.
pub struct FailJobCommand<G: GatewayAdapter> {
    gateway: G,
    request: FailJobRequest,
}

impl<G: GatewayAdapter> FailJobCommand<G> {
    pub(crate) fn new(gateway: G, key: JobKey) -> Self {
        Self {
            gateway,
            request: FailJobRequest { job_key: key, retries: 0, error_message: String::new() },
        }
    }

    /// Remaining retries; zero raises an incident on the broker.
    pub fn retries(mut self, retries: i32) -> Self {
        self.request.retries = retries;
        self
    }

    pub fn error_message(mut self, message: impl Into<String>) -> Self {
        self.request.error_message = message.into();
        self
    }

    pub fn request(&self) -> &FailJobRequest {
        &self.request
    }

    pub async fn send(self) -> Result<Receipt, GatewayError> {
        self.gateway.fail_job(&self.request).await?;
        Ok(Receipt::new(self.request.job_key, TerminalCommand::Fail))
    }
}

/// Single activation outside of a worker.
///
/// Worker name and lease timeout default to the env configuration.
pub struct ActivateJobsCommand<G: GatewayAdapter> {
    gateway: G,
    job_type: Option<String>,
    limit: Option<u32>,
    timeout: Option<Duration>,
    worker_name: Option<String>,
    fetch_variables: Vec<String>,
}

impl<G: GatewayAdapter> ActivateJobsCommand<G> {
    pub(crate) fn new(gateway: G) -> Self {
        Self {
            gateway,
            job_type: None,
            limit: None,
            timeout: None,
            worker_name: None,
            fetch_variables: Vec::new(),
        }
    }

    zb_core::setters! {
        option { job_type: String, timeout: Duration, worker_name: String }
    }

    /// Maximum number of jobs to activate.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn fetch_variables<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fetch_variables.extend(names.into_iter().map(Into::into));
        self
    }

    /// Validate and assemble the activation request.
    pub fn build_request(&self) -> Result<ActivateJobsRequest, ConfigError> {
        let job_type = match self.job_type.as_deref() {
            None => return Err(ConfigError::Missing("job_type")),
            Some(t) if t.trim().is_empty() => {
                return Err(ConfigError::Invalid {
                    field: "job_type",
                    reason: "must not be empty".to_string(),
                })
            }
            Some(t) => t,
        };
        let limit = match self.limit {
            None => return Err(ConfigError::Missing("limit")),
            Some(0) => {
                return Err(ConfigError::Invalid {
                    field: "limit",
                    reason: "must be greater than zero".to_string(),
                })
            }
            Some(n) => n,
        };
        let timeout = self.timeout.unwrap_or_else(env::job_timeout);
        if timeout.is_zero() {
            return Err(ConfigError::Invalid {
                field: "timeout",
                reason: "must be greater than zero".to_string(),
            });
        }
        let worker = self.worker_name.clone().unwrap_or_else(env::worker_name);

        Ok(ActivateJobsRequest::new(job_type, worker, timeout)
            .max_jobs_to_activate(limit)
            .fetch_variables(self.fetch_variables.clone()))
    }

    pub async fn send(self) -> Result<Vec<Job>, WorkerError> {
        let request = self.build_request()?;
        JobActivator::new(self.gateway).activate(&request, &CancellationToken::new()).await
    }
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
