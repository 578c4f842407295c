// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use zb_core::test_support::activated_batch;
use zb_core::JobKey;

fn request(max: u32) -> ActivateJobsRequest {
    ActivateJobsRequest::new("foo", "jobWorker", Duration::from_millis(123)).max_jobs_to_activate(max)
}

fn keys(jobs: &[Job]) -> Vec<i64> {
    jobs.iter().map(|j| j.key.get()).collect()
}

#[tokio::test]
async fn activation_honours_max_and_keeps_leftovers() {
    let gateway = FakeGateway::new();
    gateway.push_batch(activated_batch(1..=3, "foo", "jobWorker"));

    let first = gateway.activate_jobs(&request(2)).await.unwrap();
    let second = gateway.activate_jobs(&request(2)).await.unwrap();
    let third = gateway.activate_jobs(&request(2)).await.unwrap();

    assert_eq!(keys(&first), vec![1, 2]);
    assert_eq!(keys(&second), vec![3]);
    assert!(third.is_empty());
    assert_eq!(gateway.activations().len(), 3);
}

#[tokio::test]
async fn over_grant_ignores_max() {
    let gateway = FakeGateway::new();
    gateway.over_grant();
    gateway.push_batch(activated_batch(1..=3, "foo", "jobWorker"));

    let jobs = gateway.activate_jobs(&request(1)).await.unwrap();

    assert_eq!(keys(&jobs), vec![1, 2, 3]);
}

#[tokio::test]
async fn scripted_activation_error_is_returned_once() {
    let gateway = FakeGateway::new();
    gateway.push_activation_error(GatewayError::Unavailable("down".into()));

    assert!(gateway.activate_jobs(&request(1)).await.is_err());
    assert!(gateway.activate_jobs(&request(1)).await.unwrap().is_empty());
}

#[tokio::test]
async fn records_calls_in_order() {
    let gateway = FakeGateway::new();
    let complete = CompleteJobRequest::new(JobKey(1));
    let fail = FailJobRequest { job_key: JobKey(2), retries: 1, error_message: "x".into() };

    gateway.activate_jobs(&request(1)).await.unwrap();
    gateway.complete_job(&complete).await.unwrap();
    gateway.fail_job(&fail).await.unwrap();

    assert_eq!(
        gateway.calls(),
        vec![
            GatewayCall::Activate(request(1)),
            GatewayCall::Complete(complete.clone()),
            GatewayCall::Fail(fail.clone()),
        ]
    );
    assert_eq!(gateway.completions(), vec![complete]);
    assert_eq!(gateway.failures(), vec![fail]);
}

#[tokio::test]
async fn command_errors_are_injected_but_still_recorded() {
    let gateway = FakeGateway::new();
    gateway.set_complete_error(Some(GatewayError::Unavailable("down".into())));

    let result = gateway.complete_job(&CompleteJobRequest::new(JobKey(1))).await;

    assert!(result.is_err());
    assert_eq!(gateway.completions().len(), 1);
}

#[tokio::test]
async fn held_activation_never_resolves() {
    let gateway = FakeGateway::new();
    gateway.hold_activations();

    let result =
        tokio::time::timeout(Duration::from_millis(50), gateway.activate_jobs(&request(1))).await;

    assert!(result.is_err(), "held activation should time out");
    assert_eq!(gateway.activations().len(), 1);
}

#[tokio::test]
async fn wait_until_times_out_when_predicate_never_holds() {
    let gateway = FakeGateway::new();
    assert!(!gateway.wait_until(Duration::from_millis(20), |calls| !calls.is_empty()).await);
}
