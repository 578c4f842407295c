// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Request shapes for the three gateway operations the worker depends on.

use crate::job::JobKey;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Request to activate up to `max_jobs_to_activate` jobs of one type.
///
/// A job worker owns a single instance and rewrites `max_jobs_to_activate`
/// before each poll cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivateJobsRequest {
    pub job_type: String,
    pub worker: String,
    /// Lease timeout in milliseconds
    pub timeout_ms: u64,
    pub max_jobs_to_activate: u32,
    /// Variable names to fetch; empty fetches all
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fetch_variables: Vec<String>,
}

impl ActivateJobsRequest {
    pub fn new(job_type: impl Into<String>, worker: impl Into<String>, timeout: Duration) -> Self {
        Self {
            job_type: job_type.into(),
            worker: worker.into(),
            timeout_ms: timeout.as_millis() as u64,
            max_jobs_to_activate: 0,
            fetch_variables: Vec::new(),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    crate::setters! {
        set { max_jobs_to_activate: u32, fetch_variables: Vec<String> }
    }
}

/// Request to complete a job, optionally merging new variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompleteJobRequest {
    pub job_key: JobKey,
    /// JSON document; `None` leaves the process variables untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<String>,
}

impl CompleteJobRequest {
    pub fn new(job_key: JobKey) -> Self {
        Self { job_key, variables: None }
    }
}

/// Request to mark a job as failed with a new retry budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailJobRequest {
    pub job_key: JobKey,
    pub retries: i32,
    pub error_message: String,
}

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;
