// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn activate_request_from_duration() {
    let request = ActivateJobsRequest::new("foo", "jobWorker", Duration::from_secs(10))
        .max_jobs_to_activate(3);
    assert_eq!(request.timeout_ms, 10_000);
    assert_eq!(request.timeout(), Duration::from_secs(10));
    assert_eq!(request.max_jobs_to_activate, 3);
    assert!(request.fetch_variables.is_empty());
}

#[test]
fn activate_request_omits_empty_fetch_variables() {
    let request = ActivateJobsRequest::new("foo", "w", Duration::from_millis(123));
    let value = serde_json::to_value(&request).unwrap();
    assert!(value.get("fetch_variables").is_none());

    let request = request.fetch_variables(vec!["foo".into(), "bar".into()]);
    let value = serde_json::to_value(&request).unwrap();
    assert_eq!(value["fetch_variables"], serde_json::json!(["foo", "bar"]));
}

#[test]
fn complete_request_defaults_to_no_variables() {
    let request = CompleteJobRequest::new(JobKey(255));
    assert_eq!(request.variables, None);
    let value = serde_json::to_value(&request).unwrap();
    assert_eq!(value, serde_json::json!({ "job_key": 255 }));
}
