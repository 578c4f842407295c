// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::{Job, JobHeaders, JobKey};

// ── Proptest strategies ─────────────────────────────────────────────────

pub mod strategies {
    use crate::JobKey;
    use proptest::prelude::*;

    pub fn arb_job_key() -> impl Strategy<Value = JobKey> {
        any::<i64>().prop_map(JobKey)
    }
}

// ── Job factories ───────────────────────────────────────────────────────

/// A job as the broker would activate it for `worker`, keyed `key`.
///
/// Variables are `{"foo":<key>}` and the element id is `job<key>`, so tests
/// can tell jobs apart after they pass through a worker.
pub fn activated_job(key: i64, job_type: &str, worker: &str) -> Job {
    Job::builder()
        .key(JobKey(key))
        .job_type(job_type)
        .worker(worker)
        .retries(3)
        .deadline(123_932)
        .variables(format!("{{\"foo\":{}}}", key))
        .headers(JobHeaders {
            bpmn_process_id: "process".to_string(),
            element_id: format!("job{}", key),
            element_instance_key: 23,
            process_definition_version: 3,
            process_definition_key: 21,
            process_instance_key: 42,
        })
        .build()
}

/// A batch of activated jobs with consecutive keys.
pub fn activated_batch(keys: impl IntoIterator<Item = i64>, job_type: &str, worker: &str) -> Vec<Job> {
    keys.into_iter().map(|key| activated_job(key, job_type, worker)).collect()
}
