// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! zb-engine: job activation and dispatch
//!
//! A [`JobWorker`] runs two tasks over a bounded queue: the acquire loop
//! activates jobs from the gateway while the queue has spare capacity, and
//! the execute loop hands queued jobs one at a time to a [`JobHandler`],
//! completing or failing them according to what the handler returned.
//!
//! ```ignore
//! let client = Client::new(RestGateway::new(env::gateway_address()));
//! let worker = client
//!     .new_worker()
//!     .job_type("payment")
//!     .handler(|client: JobClient<_>, job: Job| async move {
//!         let receipt = client.complete_job(&job).variables(r#"{"paid":true}"#).send().await?;
//!         Ok(receipt.into())
//!     })
//!     .max_jobs_active(5)
//!     .timeout(Duration::from_secs(10))
//!     .open()?;
//! ```

mod activator;
mod builder;
mod client;
mod commands;
pub mod env;
mod error;
mod handler;
mod resolution;
mod worker;

pub use activator::JobActivator;
pub use builder::JobWorkerBuilder;
pub use client::{Client, JobClient};
pub use commands::{ActivateJobsCommand, CompleteJobCommand, FailJobCommand};
pub use error::{ConfigError, WorkerError};
pub use handler::{HandlerResult, JobHandler};
pub use resolution::{Receipt, Resolution, TerminalCommand};
pub use worker::{JobWorker, WorkerState};

