// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `zb worker`: open one job worker per type and log the jobs it receives

use anyhow::Result;
use clap::Args;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use zb_adapters::RestGateway;
use zb_core::Job;
use zb_engine::{Client, HandlerResult, JobClient, JobWorker, JobWorkerBuilder, Resolution};

use super::{duration_arg, GatewayArgs};
use crate::exit_error::ExitError;

#[derive(Args, Debug)]
pub struct WorkerArgs {
    /// Job type to handle; repeat to open one worker per type
    #[arg(long = "type", value_name = "TYPE", required = true)]
    pub job_types: Vec<String>,

    /// Most jobs held by each worker at once
    #[arg(long)]
    pub max_jobs: u32,

    /// Lease timeout for activated jobs (e.g. "30s", "5m")
    #[arg(long, value_parser = duration_arg)]
    pub timeout: Duration,

    /// Delay between activation attempts [default: $ZB_POLL_INTERVAL or 100ms]
    #[arg(long, value_parser = duration_arg)]
    pub poll_interval: Option<Duration>,

    /// Worker name reported to the broker [default: $ZB_WORKER_NAME or "default"]
    #[arg(long)]
    pub name: Option<String>,

    /// Only fetch these variables with each job
    #[arg(long = "fetch-variable", value_name = "NAME")]
    pub fetch_variables: Vec<String>,

    /// Complete every job after logging it
    #[arg(long)]
    pub auto_complete: bool,

    #[command(flatten)]
    pub gateway: GatewayArgs,
}

/// Print the job as one JSON line and leave it unresolved.
async fn log_job(_client: JobClient<RestGateway>, job: Job) -> HandlerResult {
    let line = serde_json::json!({
        "key": job.key,
        "type": job.job_type,
        "variables": job.variables_map()?,
    });
    println!("{}", line);
    tracing::info!(job_key = %job.key, job_type = %job.job_type, "handled job");
    Ok(Resolution::Unresolved)
}

/// Validate the flags and open every worker.
///
/// Every worker's configuration is checked before the first one is opened.
pub fn open_workers(
    args: &WorkerArgs,
    client: &Client<RestGateway>,
) -> Result<Vec<JobWorker>, ExitError> {
    let builders: Vec<_> =
        args.job_types.iter().map(|job_type| builder(args, client, job_type)).collect();
    for builder in &builders {
        builder.validate()?;
    }

    let mut workers = Vec::with_capacity(builders.len());
    for builder in builders {
        workers.push(builder.open()?);
    }
    Ok(workers)
}

fn builder(
    args: &WorkerArgs,
    client: &Client<RestGateway>,
    job_type: &str,
) -> JobWorkerBuilder<RestGateway> {
    let mut builder = client
        .new_worker()
        .job_type(job_type)
        .handler(log_job)
        .max_jobs_active(args.max_jobs)
        .timeout(args.timeout)
        .fetch_variables(args.fetch_variables.iter().cloned());
    if let Some(name) = &args.name {
        builder = builder.name(name.as_str());
    }
    if let Some(interval) = args.poll_interval {
        builder = builder.poll_interval(interval);
    }
    if args.auto_complete {
        builder = builder.auto_completion();
    }
    builder
}

pub async fn run(args: WorkerArgs, shutdown: CancellationToken) -> Result<()> {
    let client = args.gateway.client();
    let workers = open_workers(&args, &client)?;
    tracing::info!(
        gateway = %client.gateway().base_url(),
        workers = workers.len(),
        "waiting for jobs, press Ctrl-C to stop"
    );

    shutdown.cancelled().await;

    for worker in workers {
        worker.shutdown().await;
    }
    Ok(())
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod tests;
