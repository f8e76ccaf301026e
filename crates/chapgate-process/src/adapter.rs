// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! [`BackendAdapter`] backed by one external program per attempt.

use std::ffi::OsStr;
use std::net::Ipv4Addr;
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use chapgate_core::{
    BackendAdapter, BackendFailure, ChapRequest, DigestCapability, LifecycleEvent,
    NegotiationState, ResponseMessage, Verification, VerifyOutcome,
};
use chapgate_secret::{MAX_SECRET_LEN, SecretBuffer};

use crate::channel::{ChildProcessChannel, LineRead};

/// Which program to run and how long to give it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessConfig {
    /// Absolute path of the backend program.
    pub program: PathBuf,
    /// Upper bound for one exchange. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl ProcessConfig {
    /// Runs `program` with no timeout.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            timeout: None,
        }
    }

    /// Bounds each exchange to `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Asks an external program for the peer's secret on every attempt.
///
/// The secret lands in a buffer owned by the adapter and is zeroized before
/// [`verify`](BackendAdapter::verify) returns on every path.
pub struct ProcessBackendAdapter {
    config: Option<ProcessConfig>,
    negotiation: Arc<dyn NegotiationState>,
    secret: SecretBuffer,
}

impl ProcessBackendAdapter {
    /// Name used in log lines.
    pub const NAME: &'static str = "backend";

    /// Creates the adapter. With `config` unset the adapter declines to check.
    pub fn new(config: Option<ProcessConfig>, negotiation: Arc<dyn NegotiationState>) -> Self {
        Self {
            config,
            negotiation,
            secret: SecretBuffer::acquire(),
        }
    }

    /// Configured program, if any.
    pub fn program(&self) -> Option<&Path> {
        self.config.as_ref().map(|config| config.program.as_path())
    }

    /// The buffer secrets are read into, for inspection between attempts.
    pub fn secret_buffer(&self) -> &SecretBuffer {
        &self.secret
    }

    fn exchange(
        &mut self,
        request: &ChapRequest<'_>,
        digest: &dyn DigestCapability,
    ) -> Result<Verification, BackendFailure> {
        let config = self
            .config
            .as_ref()
            .ok_or(BackendFailure::ConfigurationMissing)?;

        tracing::info!(
            program = %config.program.display(),
            peer = %request.peer(),
            "asking backend for secret"
        );

        let peer = OsStr::from_bytes(request.peer_name);
        let mut channel = ChildProcessChannel::spawn(&config.program, [peer])
            .map_err(|e| BackendFailure::SpawnFailure(e.to_string()))?;

        if let Some(timeout) = config.timeout {
            channel.set_timeout(timeout);
        }

        let decision = {
            let mut secret = self.secret.scope();

            match channel.read_line_into(&mut secret) {
                Ok(LineRead::Line(0)) => Err(BackendFailure::ProtocolViolation(
                    "backend printed an empty line".into(),
                )),
                Ok(LineRead::Line(_)) => {
                    let mut message = ResponseMessage::new();
                    let matched = digest.verify_response(
                        request.id,
                        request.peer_name,
                        secret.as_slice(),
                        request.challenge,
                        request.response,
                        &mut message,
                    );

                    let outcome = if matched {
                        VerifyOutcome::Accepted
                    } else {
                        VerifyOutcome::Rejected
                    };

                    Ok(Verification::new(outcome, message))
                }
                Ok(LineRead::Eof) => Err(BackendFailure::ProtocolViolation(
                    "backend closed its output without a secret".into(),
                )),
                Ok(LineRead::Truncated(_)) => Err(BackendFailure::ProtocolViolation(format!(
                    "secret line exceeds {MAX_SECRET_LEN} bytes"
                ))),
                Err(e) => Err(BackendFailure::ProtocolViolation(format!(
                    "reading secret: {e}"
                ))),
            }
        };

        match channel.wait() {
            Ok(exit) if exit.is_success() => decision,
            Ok(exit) => Self::distrust(decision, BackendFailure::AbnormalExit(exit.to_string())),
            Err(e) => Self::distrust(decision, BackendFailure::AbnormalExit(e.to_string())),
        }
    }

    /// An unsuccessful exit overrides an acceptance.
    fn distrust(
        decision: Result<Verification, BackendFailure>,
        failure: BackendFailure,
    ) -> Result<Verification, BackendFailure> {
        match decision {
            Ok(verification) => {
                failure.report(Self::NAME);
                Ok(verification.downgrade())
            }
            Err(earlier) => Err(earlier),
        }
    }
}

impl BackendAdapter for ProcessBackendAdapter {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn supports_check(&mut self) -> bool {
        self.config.is_some()
    }

    fn verify(&mut self, request: &ChapRequest<'_>, digest: &dyn DigestCapability) -> Verification {
        let verification = match self.exchange(request, digest) {
            Ok(verification) => verification,
            Err(failure) => Verification {
                outcome: failure.into_outcome(Self::NAME),
                message: None,
            },
        };

        tracing::debug!(peer = %request.peer(), outcome = %verification.outcome, "backend decision");

        verification
    }

    fn allowed_address(&mut self, candidate: Ipv4Addr) -> bool {
        match self.negotiation.wanted_peer_address() {
            Some(wanted) => !wanted.is_unspecified() && wanted == candidate,
            None => false,
        }
    }

    fn choose_address(&mut self, _current: Ipv4Addr) -> Option<Ipv4Addr> {
        None
    }

    fn notify(&mut self, event: LifecycleEvent, arg: i32) {
        tracing::debug!(%event, arg, "lifecycle event ignored by process backend");
    }
}
