// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `zb activate`: one-shot activation

use anyhow::Result;
use clap::Args;
use std::time::Duration;
use zb_adapters::RestGateway;
use zb_engine::ActivateJobsCommand;

use super::{duration_arg, GatewayArgs};
use crate::exit_error::{from_worker_error, ExitError};

#[derive(Args, Debug)]
pub struct ActivateArgs {
    /// Job type to activate
    #[arg(long = "type", value_name = "TYPE")]
    pub job_type: String,

    /// Maximum number of jobs to activate
    #[arg(long)]
    pub limit: u32,

    /// Lease timeout [default: $ZB_JOB_TIMEOUT or 5m]
    #[arg(long, value_parser = duration_arg)]
    pub timeout: Option<Duration>,

    /// Worker name reported to the broker [default: $ZB_WORKER_NAME or "default"]
    #[arg(long)]
    pub name: Option<String>,

    /// Only fetch these variables
    #[arg(long = "fetch-variable", value_name = "NAME")]
    pub fetch_variables: Vec<String>,

    #[command(flatten)]
    pub gateway: GatewayArgs,
}

impl ActivateArgs {
    pub fn command(&self) -> ActivateJobsCommand<RestGateway> {
        let mut command = self
            .gateway
            .client()
            .new_activate_jobs_command()
            .job_type(self.job_type.as_str())
            .limit(self.limit)
            .fetch_variables(self.fetch_variables.iter().cloned());
        if let Some(timeout) = self.timeout {
            command = command.timeout(timeout);
        }
        if let Some(name) = &self.name {
            command = command.worker_name(name.as_str());
        }
        command
    }
}

pub async fn run(args: ActivateArgs) -> Result<()> {
    let command = args.command();
    command.build_request().map_err(ExitError::from)?;

    let jobs = command.send().await.map_err(from_worker_error)?;
    tracing::debug!(count = jobs.len(), job_type = %args.job_type, "activation finished");
    println!("{}", serde_json::to_string_pretty(&jobs)?);
    Ok(())
}
