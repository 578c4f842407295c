// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;

fn with_var<T>(name: &str, value: Option<&str>, f: impl FnOnce() -> T) -> T {
    let saved = std::env::var(name).ok();
    match value {
        Some(v) => std::env::set_var(name, v),
        None => std::env::remove_var(name),
    }
    let out = f();
    match saved {
        Some(v) => std::env::set_var(name, v),
        None => std::env::remove_var(name),
    }
    out
}

#[test]
#[serial]
fn worker_name_defaults() {
    assert_eq!(with_var("ZB_WORKER_NAME", None, worker_name), "default");
    assert_eq!(with_var("ZB_WORKER_NAME", Some("  "), worker_name), "default");
}

#[test]
#[serial]
fn worker_name_from_env() {
    assert_eq!(with_var("ZB_WORKER_NAME", Some("billing"), worker_name), "billing");
}

#[test]
#[serial]
fn poll_interval_parsing() {
    let cases = [
        (None, Duration::from_millis(100)),
        (Some("250ms"), Duration::from_millis(250)),
        (Some("2"), Duration::from_secs(2)),
        (Some("soon"), Duration::from_millis(100)),
        (Some("0ms"), Duration::from_millis(100)),
    ];
    for (value, expected) in cases {
        assert_eq!(with_var("ZB_POLL_INTERVAL", value, poll_interval), expected, "{:?}", value);
    }
}

#[test]
#[serial]
fn job_timeout_default_and_override() {
    assert_eq!(with_var("ZB_JOB_TIMEOUT", None, job_timeout), Duration::from_secs(300));
    assert_eq!(with_var("ZB_JOB_TIMEOUT", Some("30s"), job_timeout), Duration::from_secs(30));
}

#[test]
#[serial]
fn gateway_address_default() {
    assert_eq!(with_var("ZB_GATEWAY_ADDRESS", None, gateway_address), DEFAULT_GATEWAY_ADDRESS);
    assert_eq!(
        with_var("ZB_GATEWAY_ADDRESS", Some("http://gw:8080"), gateway_address),
        "http://gw:8080"
    );
}

#[test]
#[serial]
fn empty_auth_token_is_none() {
    assert_eq!(with_var("ZB_AUTH_TOKEN", Some(""), auth_token), None);
    assert_eq!(with_var("ZB_AUTH_TOKEN", Some("s3cr3t"), auth_token), Some("s3cr3t".into()));
}
