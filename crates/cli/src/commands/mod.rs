// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod activate;
pub mod worker;

use clap::Args;
use std::time::Duration;
use zb_adapters::RestGateway;
use zb_engine::{env, Client};

/// Gateway connection flags shared by every command
#[derive(Args, Debug, Clone, Default)]
pub struct GatewayArgs {
    /// Gateway REST address [default: $ZB_GATEWAY_ADDRESS or http://127.0.0.1:8080]
    #[arg(long = "gateway")]
    pub address: Option<String>,
}

impl GatewayArgs {
    pub fn address(&self) -> String {
        self.address.clone().unwrap_or_else(env::gateway_address)
    }

    pub fn client(&self) -> Client<RestGateway> {
        let mut gateway = RestGateway::new(self.address());
        if let Some(token) = env::auth_token() {
            gateway = gateway.with_token(token);
        }
        Client::new(gateway)
    }
}

/// clap value parser for "100ms", "30s", "5m" style durations
pub fn duration_arg(s: &str) -> Result<Duration, String> {
    zb_core::parse_duration(s).map_err(|e| e.to_string())
}
