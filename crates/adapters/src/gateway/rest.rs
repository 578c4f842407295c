// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Gateway adapter for the broker's REST API (`/v2/jobs/...`).

use super::{GatewayAdapter, GatewayError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use zb_core::{ActivateJobsRequest, CompleteJobRequest, FailJobRequest, Job, JobHeaders, JobKey};

/// REST gateway client.
///
/// Activation is sent without long polling by default (`requestTimeout = -1`):
/// the job worker drives its own poll interval.
#[derive(Clone)]
pub struct RestGateway {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
    request_timeout_ms: i64,
}

impl RestGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url, token: None, request_timeout_ms: -1 }
    }

    /// Authenticate every request with a bearer token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Let the gateway hold activation requests open for up to `timeout`
    /// while waiting for jobs.
    pub fn with_long_polling(mut self, timeout: Duration) -> Self {
        self.request_timeout_ms = timeout.as_millis() as i64;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<reqwest::Response, GatewayError> {
        let mut request = self.client.post(format!("{}{}", self.base_url, path)).json(body);
        if let Some(ref token) = self.token {
            request = request.bearer_auth(token);
        }
        let response =
            request.send().await.map_err(|e| GatewayError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::debug!(path, status = status.as_u16(), %message, "gateway rejected request");
            return Err(GatewayError::Rejected { status: status.as_u16(), message });
        }
        Ok(response)
    }
}

#[async_trait]
impl GatewayAdapter for RestGateway {
    async fn activate_jobs(&self, request: &ActivateJobsRequest) -> Result<Vec<Job>, GatewayError> {
        let body = ActivationBody::new(request, self.request_timeout_ms);
        let response = self.post("/v2/jobs/activation", &body).await?;
        let activation: ActivationResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;
        Ok(activation.jobs.into_iter().map(Job::from).collect())
    }

    async fn complete_job(&self, request: &CompleteJobRequest) -> Result<(), GatewayError> {
        let body = CompletionBody::new(request)?;
        self.post(&format!("/v2/jobs/{}/completion", request.job_key), &body).await?;
        Ok(())
    }

    async fn fail_job(&self, request: &FailJobRequest) -> Result<(), GatewayError> {
        let body = FailureBody { retries: request.retries, error_message: &request.error_message };
        self.post(&format!("/v2/jobs/{}/failure", request.job_key), &body).await?;
        Ok(())
    }
}

// ── Wire shapes ─────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ActivationBody<'a> {
    #[serde(rename = "type")]
    job_type: &'a str,
    worker: &'a str,
    timeout: u64,
    max_jobs_to_activate: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    fetch_variable: Option<&'a [String]>,
    request_timeout: i64,
}

impl<'a> ActivationBody<'a> {
    pub(super) fn new(request: &'a ActivateJobsRequest, request_timeout: i64) -> Self {
        Self {
            job_type: &request.job_type,
            worker: &request.worker,
            timeout: request.timeout_ms,
            max_jobs_to_activate: request.max_jobs_to_activate,
            fetch_variable: (!request.fetch_variables.is_empty())
                .then_some(request.fetch_variables.as_slice()),
            request_timeout,
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct CompletionBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    variables: Option<Value>,
}

impl CompletionBody {
    pub(super) fn new(request: &CompleteJobRequest) -> Result<Self, GatewayError> {
        let variables = match request.variables.as_deref() {
            None => None,
            Some(doc) if doc.trim().is_empty() => None,
            Some(doc) => Some(serde_json::from_str(doc).map_err(|e| {
                GatewayError::InvalidRequest(format!("variables are not valid JSON: {}", e))
            })?),
        };
        Ok(Self { variables })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FailureBody<'a> {
    retries: i32,
    error_message: &'a str,
}

#[derive(Debug, Deserialize)]
pub(super) struct ActivationResponse {
    #[serde(default)]
    pub(super) jobs: Vec<WireJob>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct WireJob {
    job_key: JobKey,
    #[serde(rename = "type")]
    job_type: String,
    #[serde(default)]
    worker: String,
    #[serde(default)]
    retries: i32,
    #[serde(default)]
    deadline: i64,
    #[serde(default)]
    variables: Value,
    #[serde(default)]
    custom_headers: Value,
    #[serde(default)]
    process_definition_id: String,
    #[serde(default)]
    process_definition_version: i32,
    #[serde(default)]
    process_definition_key: Option<JobKey>,
    #[serde(default)]
    element_id: String,
    #[serde(default)]
    element_instance_key: Option<JobKey>,
    #[serde(default)]
    process_instance_key: Option<JobKey>,
}

impl From<WireJob> for Job {
    fn from(wire: WireJob) -> Self {
        Job {
            key: wire.job_key,
            job_type: wire.job_type,
            worker: wire.worker,
            retries: wire.retries,
            deadline: wire.deadline,
            variables: document(wire.variables),
            custom_headers: document(wire.custom_headers),
            headers: JobHeaders {
                bpmn_process_id: wire.process_definition_id,
                element_id: wire.element_id,
                element_instance_key: key_or_zero(wire.element_instance_key),
                process_definition_version: wire.process_definition_version,
                process_definition_key: key_or_zero(wire.process_definition_key),
                process_instance_key: key_or_zero(wire.process_instance_key),
            },
        }
    }
}

/// Render a JSON value as document text; strings are taken as already serialized.
fn document(value: Value) -> String {
    match value {
        Value::Null => "{}".to_string(),
        Value::String(doc) => doc,
        other => other.to_string(),
    }
}

fn key_or_zero(key: Option<JobKey>) -> i64 {
    key.map(JobKey::get).unwrap_or_default()
}

#[cfg(test)]
#[path = "rest_tests.rs"]
mod tests;
