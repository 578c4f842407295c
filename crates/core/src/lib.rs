// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! zb-core: data model shared by the gateway adapters and the job worker

pub mod macros;

pub mod duration;
pub mod job;
pub mod request;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use duration::{parse_duration, DurationError};
#[cfg(any(test, feature = "test-support"))]
pub use job::JobBuilder;
pub use job::{Job, JobHeaders, JobKey};
pub use request::{ActivateJobsRequest, CompleteJobRequest, FailJobRequest};
