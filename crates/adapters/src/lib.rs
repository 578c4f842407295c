// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! zb-adapters: transport adapters for the workflow gateway

pub mod gateway;

pub use gateway::{GatewayAdapter, GatewayError, RestGateway};

#[cfg(any(test, feature = "test-support"))]
pub use gateway::{FakeGateway, GatewayCall};
