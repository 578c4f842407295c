// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Activated job snapshot.

use serde::de::{self, DeserializeOwned, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Broker-assigned unique job identifier.
///
/// Serializes as a JSON number. Deserializes from a number or from a decimal
/// string, since newer gateways emit 64-bit keys as strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct JobKey(pub i64);

impl JobKey {
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for JobKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for JobKey {
    fn from(key: i64) -> Self {
        Self(key)
    }
}

impl From<&Job> for JobKey {
    fn from(job: &Job) -> Self {
        job.key
    }
}

impl PartialEq<i64> for JobKey {
    fn eq(&self, other: &i64) -> bool {
        self.0 == *other
    }
}

impl<'de> Deserialize<'de> for JobKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct KeyVisitor;

        impl Visitor<'_> for KeyVisitor {
            type Value = JobKey;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a job key as an integer or a decimal string")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<JobKey, E> {
                Ok(JobKey(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<JobKey, E> {
                i64::try_from(v)
                    .map(JobKey)
                    .map_err(|_| E::custom(format!("job key out of range: {}", v)))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<JobKey, E> {
                v.trim()
                    .parse::<i64>()
                    .map(JobKey)
                    .map_err(|_| E::custom(format!("invalid job key: '{}'", v)))
            }
        }

        deserializer.deserialize_any(KeyVisitor)
    }
}

/// Process metadata attached to an activated job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobHeaders {
    /// BPMN process id of the process definition (e.g. "order-process")
    pub bpmn_process_id: String,
    /// Id of the task element in the process model
    pub element_id: String,
    pub element_instance_key: i64,
    pub process_definition_version: i32,
    pub process_definition_key: i64,
    pub process_instance_key: i64,
}

/// A job leased to this worker by the broker.
///
/// Jobs are immutable snapshots: the worker only forwards them to the
/// handler and issues follow-up commands that reference their key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub key: JobKey,
    /// Type tag matching the worker's subscription
    #[serde(rename = "type")]
    pub job_type: String,
    /// Name of the worker holding the lease
    pub worker: String,
    /// Remaining attempt budget
    pub retries: i32,
    /// Lease expiry as epoch milliseconds
    pub deadline: i64,
    /// Variables visible to the task scope, as a JSON document
    pub variables: String,
    /// Custom headers defined during modelling, as a JSON document
    pub custom_headers: String,
    pub headers: JobHeaders,
}

impl Job {
    /// Parse the variables document into a JSON object.
    ///
    /// An empty document yields an empty map.
    pub fn variables_map(&self) -> Result<serde_json::Map<String, serde_json::Value>, serde_json::Error> {
        parse_object(&self.variables)
    }

    /// Deserialize the variables document into a caller-defined type.
    pub fn variables_as<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.variables)
    }

    /// Parse the custom headers document into a JSON object.
    pub fn custom_headers_map(
        &self,
    ) -> Result<serde_json::Map<String, serde_json::Value>, serde_json::Error> {
        parse_object(&self.custom_headers)
    }
}

fn parse_object(doc: &str) -> Result<serde_json::Map<String, serde_json::Value>, serde_json::Error> {
    if doc.trim().is_empty() {
        return Ok(serde_json::Map::new());
    }
    serde_json::from_str(doc)
}

crate::builder! {
    pub struct JobBuilder => Job {
        into {
            job_type: String = "test",
            worker: String = "test-worker",
            variables: String = "{}",
            custom_headers: String = "{}",
        }
        set {
            key: JobKey = JobKey(1),
            retries: i32 = 3,
            deadline: i64 = 0,
            headers: JobHeaders = JobHeaders::default(),
        }
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
