// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Internal failure taxonomy shared by all adapters.
//!
//! Failures are reported to the local log and folded into a
//! [`VerifyOutcome`]; they never reach the engine or the peer.

use thiserror::Error;

use crate::outcome::VerifyOutcome;

/// Why a backend could not produce a trustworthy decision.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BackendFailure {
    /// No backend configured; the feature is simply off.
    #[error("no backend configured")]
    ConfigurationMissing,

    /// Pipes or process could not be created.
    #[error("backend could not be started: {0}")]
    SpawnFailure(String),

    /// The backend answered with no line, an empty line or a wrong type.
    #[error("backend protocol violation: {0}")]
    ProtocolViolation(String),

    /// The external program exited unsuccessfully after answering.
    #[error("backend exited abnormally: {0}")]
    AbnormalExit(String),

    /// The interpreter raised during a hook call.
    #[error("foreign hook call failed: {0}")]
    ForeignCallFailure(String),
}

impl BackendFailure {
    /// Outcome the engine sees for this failure.
    pub fn outcome(&self) -> VerifyOutcome {
        match self {
            Self::ConfigurationMissing | Self::SpawnFailure(_) | Self::ProtocolViolation(_) => {
                VerifyOutcome::BackendUnavailable
            }
            Self::AbnormalExit(_) | Self::ForeignCallFailure(_) => VerifyOutcome::Rejected,
        }
    }

    /// Writes this failure to the local log on behalf of `adapter`.
    pub fn report(&self, adapter: &str) {
        match self {
            Self::ConfigurationMissing => tracing::debug!(adapter, "{}", self),
            _ => tracing::warn!(adapter, "{}", self),
        }
    }

    /// Reports this failure and returns its outcome.
    pub fn into_outcome(self, adapter: &str) -> VerifyOutcome {
        self.report(adapter);
        self.outcome()
    }
}
