// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fluent configuration for job workers.

use crate::env;
use crate::error::ConfigError;
use crate::handler::JobHandler;
use crate::worker::{JobWorker, WorkerConfig};
use std::sync::Arc;
use std::time::Duration;
use zb_adapters::GatewayAdapter;
use zb_core::ActivateJobsRequest;

/// Collects worker settings and opens the worker.
///
/// Required: `job_type`, `handler`, `max_jobs_active`, `timeout`.
/// Worker name and poll interval default to the env configuration.
pub struct JobWorkerBuilder<G: GatewayAdapter> {
    gateway: G,
    job_type: Option<String>,
    handler: Option<Arc<dyn JobHandler<G>>>,
    max_jobs_active: Option<u32>,
    timeout: Option<Duration>,
    name: Option<String>,
    poll_interval: Option<Duration>,
    fetch_variables: Vec<String>,
    auto_complete: bool,
}

impl<G: GatewayAdapter> JobWorkerBuilder<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            job_type: None,
            handler: None,
            max_jobs_active: None,
            timeout: None,
            name: None,
            poll_interval: None,
            fetch_variables: Vec::new(),
            auto_complete: false,
        }
    }

    zb_core::setters! {
        option {
            job_type: String,
            timeout: Duration,
            name: String,
            poll_interval: Duration,
        }
    }

    pub fn handler(mut self, handler: impl JobHandler<G>) -> Self {
        self.handler = Some(Arc::new(handler));
        self
    }

    /// Queue capacity: the most jobs held by this worker at once.
    pub fn max_jobs_active(mut self, n: u32) -> Self {
        self.max_jobs_active = Some(n);
        self
    }

    pub fn timeout_ms(self, ms: u64) -> Self {
        self.timeout(Duration::from_millis(ms))
    }

    /// Restrict the variables fetched with each job. Extends earlier calls.
    pub fn fetch_variables<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fetch_variables.extend(names.into_iter().map(Into::into));
        self
    }

    /// Complete every job the handler leaves unresolved.
    pub fn auto_completion(mut self) -> Self {
        self.auto_complete = true;
        self
    }

    /// Check the settings without starting anything.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.settings().map(drop)
    }

    /// Validate the settings and start the worker.
    ///
    /// Both loops are running when this returns.
    pub fn open(self) -> Result<JobWorker, ConfigError> {
        let settings = self.settings()?;
        let request = ActivateJobsRequest::new(settings.job_type, settings.name, settings.timeout)
            .max_jobs_to_activate(settings.capacity)
            .fetch_variables(self.fetch_variables);

        JobWorker::spawn(WorkerConfig {
            gateway: self.gateway,
            handler: settings.handler,
            request,
            capacity: settings.capacity as usize,
            poll_interval: settings.poll_interval,
            auto_complete: self.auto_complete,
        })
    }

    fn settings(&self) -> Result<Settings<G>, ConfigError> {
        let job_type = match &self.job_type {
            None => return Err(ConfigError::Missing("job_type")),
            Some(t) if t.trim().is_empty() => return Err(invalid("job_type", "must not be empty")),
            Some(t) => t.clone(),
        };
        let handler = self.handler.clone().ok_or(ConfigError::Missing("handler"))?;
        let capacity = match self.max_jobs_active {
            None => return Err(ConfigError::Missing("max_jobs_active")),
            Some(0) => return Err(invalid("max_jobs_active", "must be greater than zero")),
            Some(n) => n,
        };
        let timeout = match self.timeout {
            None => return Err(ConfigError::Missing("timeout")),
            Some(t) if t.is_zero() => return Err(invalid("timeout", "must be greater than zero")),
            Some(t) => t,
        };
        let poll_interval = self.poll_interval.unwrap_or_else(env::poll_interval);
        if poll_interval.is_zero() {
            return Err(invalid("poll_interval", "must be greater than zero"));
        }
        let name = self.name.clone().unwrap_or_else(env::worker_name);

        Ok(Settings { job_type, handler, capacity, timeout, poll_interval, name })
    }
}

struct Settings<G: GatewayAdapter> {
    job_type: String,
    handler: Arc<dyn JobHandler<G>>,
    capacity: u32,
    timeout: Duration,
    poll_interval: Duration,
    name: String,
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid { field, reason: reason.to_string() }
}

#[cfg(test)]
#[path = "builder_tests.rs"]
mod tests;
