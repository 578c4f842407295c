// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! What a handler did with its job.

use zb_core::JobKey;

/// Terminal command that resolved a job
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalCommand {
    Complete,
    Fail,
}

zb_core::simple_display! {
    TerminalCommand {
        Complete => "complete",
        Fail => "fail",
    }
}

/// Proof that a terminal command for a job was accepted by the gateway.
///
/// Only the job client can create one, so holding a receipt means the
/// command really went out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    job_key: JobKey,
    command: TerminalCommand,
}

impl Receipt {
    pub(crate) fn new(job_key: JobKey, command: TerminalCommand) -> Self {
        Self { job_key, command }
    }

    pub fn job_key(&self) -> JobKey {
        self.job_key
    }

    pub fn command(&self) -> TerminalCommand {
        self.command
    }
}

/// Outcome of a successful handler invocation.
///
/// `Unresolved` lets the worker auto-complete the job when configured to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved(Receipt),
    Unresolved,
}

impl Resolution {
    /// Whether this resolution carries a receipt for `key`.
    pub fn resolves(&self, key: JobKey) -> bool {
        matches!(self, Resolution::Resolved(receipt) if receipt.job_key == key)
    }
}

impl From<Receipt> for Resolution {
    fn from(receipt: Receipt) -> Self {
        Resolution::Resolved(receipt)
    }
}
