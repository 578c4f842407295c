// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Client facade and the job client handed to handlers.

use crate::builder::JobWorkerBuilder;
use crate::commands::{ActivateJobsCommand, CompleteJobCommand, FailJobCommand};
use zb_adapters::GatewayAdapter;
use zb_core::JobKey;

/// Issues terminal commands for jobs.
///
/// A job counts as resolved only once one of its commands has been sent and
/// the returned [`Receipt`](crate::Receipt) is handed back to the worker.
#[derive(Clone)]
pub struct JobClient<G: GatewayAdapter> {
    gateway: G,
}

impl<G: GatewayAdapter> JobClient<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    pub fn complete_job(&self, key: impl Into<JobKey>) -> CompleteJobCommand<G> {
        CompleteJobCommand::new(self.gateway.clone(), key.into())
    }

    pub fn fail_job(&self, key: impl Into<JobKey>) -> FailJobCommand<G> {
        FailJobCommand::new(self.gateway.clone(), key.into())
    }
}

/// Entry point for workers and one-shot job commands
#[derive(Clone)]
pub struct Client<G: GatewayAdapter> {
    gateway: G,
}

impl<G: GatewayAdapter> Client<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn new_worker(&self) -> JobWorkerBuilder<G> {
        JobWorkerBuilder::new(self.gateway.clone())
    }

    pub fn new_activate_jobs_command(&self) -> ActivateJobsCommand<G> {
        ActivateJobsCommand::new(self.gateway.clone())
    }

    pub fn job_client(&self) -> JobClient<G> {
        JobClient::new(self.gateway.clone())
    }

    pub fn complete_job(&self, key: impl Into<JobKey>) -> CompleteJobCommand<G> {
        self.job_client().complete_job(key)
    }

    pub fn fail_job(&self, key: impl Into<JobKey>) -> FailJobCommand<G> {
        self.job_client().fail_job(key)
    }
}
