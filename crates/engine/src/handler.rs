// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job handler seam.

use crate::client::JobClient;
use crate::resolution::Resolution;
use async_trait::async_trait;
use std::future::Future;
use zb_adapters::GatewayAdapter;
use zb_core::Job;

/// Result of one handler invocation.
///
/// `Err` makes the worker fail the job with one retry fewer.
pub type HandlerResult = anyhow::Result<Resolution>;

/// User code invoked once per activated job.
///
/// Implemented for any `Fn(JobClient<G>, Job) -> impl Future<Output = HandlerResult>`.
#[async_trait]
pub trait JobHandler<G: GatewayAdapter>: Send + Sync + 'static {
    async fn handle(&self, client: JobClient<G>, job: Job) -> HandlerResult;
}

#[async_trait]
impl<G, F, Fut> JobHandler<G> for F
where
    G: GatewayAdapter,
    F: Fn(JobClient<G>, Job) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    async fn handle(&self, client: JobClient<G>, job: Job) -> HandlerResult {
        (self)(client, job).await
    }
}
