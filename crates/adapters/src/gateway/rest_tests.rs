// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// A request as seen by the stub gateway.
#[derive(Debug, Clone)]
struct Captured {
    request_line: String,
    head: String,
    body: String,
}

impl Captured {
    fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

/// Serve one canned response per connection, in order, capturing requests.
async fn serve(responses: Vec<(u16, &'static str)>) -> (RestGateway, Arc<Mutex<Vec<Captured>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let captured = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&captured);

    tokio::spawn(async move {
        for (status, body) in responses {
            let (mut stream, _) = listener.accept().await.unwrap();
            let request = read_request(&mut stream).await;
            sink.lock().push(request);
            let response = format!(
                "HTTP/1.1 {} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            let _ = stream.shutdown().await;
        }
    });

    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    (RestGateway::with_client(client, format!("http://{}/", addr)), captured)
}

async fn read_request(stream: &mut TcpStream) -> Captured {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    let header_end = loop {
        let n = stream.read(&mut chunk).await.unwrap();
        assert!(n > 0, "connection closed before request headers");
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };
    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let content_length = head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);
    while buf.len() < header_end + content_length {
        let n = stream.read(&mut chunk).await.unwrap();
        assert!(n > 0, "connection closed before request body");
        buf.extend_from_slice(&chunk[..n]);
    }
    let body = String::from_utf8_lossy(&buf[header_end..header_end + content_length]).to_string();
    let request_line = head.lines().next().unwrap_or_default().to_string();
    Captured { request_line, head, body }
}

const ACTIVATION_RESPONSE: &str = r#"{
  "jobs": [
    {
      "jobKey": "2251799813685249",
      "type": "foo",
      "worker": "jobWorker",
      "retries": 3,
      "deadline": 123932,
      "variables": {"foo": 1},
      "customHeaders": {"method": "collect"},
      "processDefinitionId": "process",
      "processDefinitionVersion": 3,
      "processDefinitionKey": "21",
      "elementId": "job1",
      "elementInstanceKey": 23,
      "processInstanceKey": "42"
    },
    {
      "jobKey": 2,
      "type": "foo",
      "variables": {}
    }
  ]
}"#;

#[tokio::test]
async fn activation_posts_request_and_maps_jobs() {
    let (gateway, captured) = serve(vec![(200, ACTIVATION_RESPONSE)]).await;
    let request = ActivateJobsRequest::new("foo", "jobWorker", Duration::from_millis(123))
        .max_jobs_to_activate(3)
        .fetch_variables(vec!["foo".into(), "bar".into()]);

    let jobs = gateway.activate_jobs(&request).await.unwrap();

    let captured = captured.lock().clone();
    assert_eq!(captured[0].request_line, "POST /v2/jobs/activation HTTP/1.1");
    assert_eq!(
        captured[0].json(),
        serde_json::json!({
            "type": "foo",
            "worker": "jobWorker",
            "timeout": 123,
            "maxJobsToActivate": 3,
            "fetchVariable": ["foo", "bar"],
            "requestTimeout": -1,
        })
    );

    assert_eq!(jobs.len(), 2);
    let first = &jobs[0];
    assert_eq!(first.key.get(), 2251799813685249);
    assert_eq!(first.job_type, "foo");
    assert_eq!(first.worker, "jobWorker");
    assert_eq!(first.retries, 3);
    assert_eq!(first.deadline, 123932);
    assert_eq!(first.variables, r#"{"foo":1}"#);
    assert_eq!(first.custom_headers, r#"{"method":"collect"}"#);
    assert_eq!(first.headers.bpmn_process_id, "process");
    assert_eq!(first.headers.element_id, "job1");
    assert_eq!(first.headers.element_instance_key, 23);
    assert_eq!(first.headers.process_definition_version, 3);
    assert_eq!(first.headers.process_definition_key, 21);
    assert_eq!(first.headers.process_instance_key, 42);

    let second = &jobs[1];
    assert_eq!(second.key.get(), 2);
    assert_eq!(second.custom_headers, "{}");
    assert_eq!(second.headers, JobHeaders::default());
}

#[tokio::test]
async fn activation_omits_empty_fetch_variables() {
    let (gateway, captured) = serve(vec![(200, r#"{"jobs":[]}"#)]).await;
    let request =
        ActivateJobsRequest::new("foo", "w", Duration::from_secs(1)).max_jobs_to_activate(1);

    let jobs = gateway.activate_jobs(&request).await.unwrap();

    assert!(jobs.is_empty());
    assert!(captured.lock()[0].json().get("fetchVariable").is_none());
}

#[tokio::test]
async fn long_polling_sets_request_timeout() {
    let (gateway, captured) = serve(vec![(200, r#"{"jobs":[]}"#)]).await;
    let gateway = gateway.with_long_polling(Duration::from_secs(20));
    let request =
        ActivateJobsRequest::new("foo", "w", Duration::from_secs(1)).max_jobs_to_activate(1);

    gateway.activate_jobs(&request).await.unwrap();

    assert_eq!(captured.lock()[0].json()["requestTimeout"], 20_000);
}

#[tokio::test]
async fn completion_posts_variables() {
    let (gateway, captured) = serve(vec![(204, "")]).await;
    let request = CompleteJobRequest {
        job_key: JobKey(255),
        variables: Some(r#"{"foo":23}"#.to_string()),
    };

    gateway.complete_job(&request).await.unwrap();

    let captured = captured.lock().clone();
    assert_eq!(captured[0].request_line, "POST /v2/jobs/255/completion HTTP/1.1");
    assert_eq!(captured[0].json(), serde_json::json!({ "variables": { "foo": 23 } }));
}

#[tokio::test]
async fn completion_without_variables_sends_empty_object() {
    let (gateway, captured) = serve(vec![(204, "")]).await;

    gateway.complete_job(&CompleteJobRequest::new(JobKey(1))).await.unwrap();

    assert_eq!(captured.lock()[0].json(), serde_json::json!({}));
}

#[tokio::test]
async fn failure_posts_retries_and_message() {
    let (gateway, captured) = serve(vec![(204, "")]).await;
    let request =
        FailJobRequest { job_key: JobKey(1), retries: 2, error_message: "boom".to_string() };

    gateway.fail_job(&request).await.unwrap();

    let captured = captured.lock().clone();
    assert_eq!(captured[0].request_line, "POST /v2/jobs/1/failure HTTP/1.1");
    assert_eq!(captured[0].json(), serde_json::json!({ "retries": 2, "errorMessage": "boom" }));
}

#[tokio::test]
async fn bearer_token_is_sent() {
    let (gateway, captured) = serve(vec![(204, "")]).await;
    let gateway = gateway.with_token("secret");

    gateway.complete_job(&CompleteJobRequest::new(JobKey(1))).await.unwrap();

    let head = captured.lock()[0].head.to_ascii_lowercase();
    assert!(head.contains("authorization: bearer secret"), "head was: {}", head);
}

#[tokio::test]
async fn non_success_status_is_rejected() {
    let (gateway, _) = serve(vec![(404, r#"{"title":"NOT_FOUND"}"#)]).await;

    let err = gateway.complete_job(&CompleteJobRequest::new(JobKey(7))).await.unwrap_err();

    assert_eq!(
        err,
        GatewayError::Rejected { status: 404, message: r#"{"title":"NOT_FOUND"}"#.to_string() }
    );
}

#[tokio::test]
async fn undecodable_activation_response_is_invalid() {
    let (gateway, _) = serve(vec![(200, "not json")]).await;
    let request =
        ActivateJobsRequest::new("foo", "w", Duration::from_secs(1)).max_jobs_to_activate(1);

    let err = gateway.activate_jobs(&request).await.unwrap_err();

    assert!(matches!(err, GatewayError::InvalidResponse(_)), "got {:?}", err);
}

#[tokio::test]
async fn closed_port_is_unavailable() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    let gateway = RestGateway::with_client(client, format!("http://{}", addr));

    let request = FailJobRequest {
        job_key: JobKey(1),
        retries: 0,
        error_message: String::new(),
    };
    let err = gateway.fail_job(&request);

    assert!(matches!(err.await, Err(GatewayError::Unavailable(_))));
}

#[test]
fn completion_body_rejects_invalid_variables() {
    let request = CompleteJobRequest { job_key: JobKey(1), variables: Some("{oops".to_string()) };
    assert!(matches!(CompletionBody::new(&request), Err(GatewayError::InvalidRequest(_))));
}

#[test]
fn base_url_trailing_slash_is_trimmed() {
    let gateway = RestGateway::new("http://localhost:8080/");
    assert_eq!(gateway.base_url(), "http://localhost:8080");
}

#[yare::parameterized(
    null           = { Value::Null, "{}" },
    object         = { serde_json::json!({"a": 1}), r#"{"a":1}"# },
    preserialized  = { Value::String(r#"{"a":1}"#.to_string()), r#"{"a":1}"# },
)]
fn document_rendering(value: Value, expected: &str) {
    assert_eq!(document(value), expected);
}
