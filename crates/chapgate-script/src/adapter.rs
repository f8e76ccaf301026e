// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! [`BackendAdapter`] realized by script hooks.

use std::net::Ipv4Addr;

use chapgate_core::{
    BackendAdapter, BackendFailure, ChapRequest, DigestCapability, LifecycleEvent,
    ResponseMessage, Verification, VerifyOutcome,
};
use chapgate_secret::{MAX_SECRET_LEN, SecretBuffer};

use crate::dispatcher::HookDispatcher;
use crate::error::{HookError, LoadError};
use crate::hook::HookCall;

/// Answers the engine by calling hooks through a [`HookDispatcher`].
///
/// | Hook result                         | Decision                 |
/// |-------------------------------------|--------------------------|
/// | verify hook missing, module missing | `BackendUnavailable`     |
/// | verify hook raised or wrong type    | `Rejected`               |
/// | secret over `MAX_SECRET_LEN` bytes  | `Rejected`               |
/// | address hook missing or not `bool`  | configured default       |
/// | choose hook missing, `None`, not int | no override             |
///
/// The secret returned by `chap_verify_hook` is copied into the adapter's
/// [`SecretBuffer`] and the zeroizing foreign value is dropped right after,
/// before the digest runs. That brief overlap is the only second copy held
/// on this side of the boundary.
pub struct InterpreterBackendAdapter {
    dispatcher: HookDispatcher,
    allow_address_by_default: bool,
    secret: SecretBuffer,
}

impl InterpreterBackendAdapter {
    /// Name used in log lines.
    pub const NAME: &'static str = "script";

    /// Creates the adapter; addresses are denied unless a hook allows them.
    pub fn new(dispatcher: HookDispatcher) -> Self {
        Self {
            dispatcher,
            allow_address_by_default: false,
            secret: SecretBuffer::acquire(),
        }
    }

    /// Sets the answer used when `allowed_address_hook` gives none.
    pub fn with_address_default(mut self, allow: bool) -> Self {
        self.allow_address_by_default = allow;
        self
    }

    /// The dispatcher hooks are called through.
    pub fn dispatcher(&self) -> &HookDispatcher {
        &self.dispatcher
    }

    /// The buffer secrets are copied into, for inspection between attempts.
    pub fn secret_buffer(&self) -> &SecretBuffer {
        &self.secret
    }

    fn decide(
        &mut self,
        request: &ChapRequest<'_>,
        digest: &dyn DigestCapability,
    ) -> Result<Verification, BackendFailure> {
        let call = HookCall::ChapVerify {
            name: request.peer_name,
            ourname: request.our_name,
            ipparam: request.ipparam.unwrap_or(""),
        };

        let mut secret = self.secret.scope();

        let value = self.dispatcher.invoke(&call).map_err(failure)?;
        let bytes = value.as_secret_bytes().map_err(failure)?;

        if bytes.is_empty() {
            return Err(BackendFailure::ProtocolViolation(
                "chap_verify_hook returned an empty secret".into(),
            ));
        }

        if bytes.len() > MAX_SECRET_LEN {
            return Err(BackendFailure::ForeignCallFailure(format!(
                "chap_verify_hook returned a secret of {} bytes, limit is {MAX_SECRET_LEN}",
                bytes.len()
            )));
        }

        secret
            .fill(bytes)
            .map_err(|e| BackendFailure::ForeignCallFailure(e.to_string()))?;
        drop(value);

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
}

/// Folds a hook error into the failure taxonomy.
fn failure(error: HookError) -> BackendFailure {
    match error {
        HookError::NotFound { .. } | HookError::ModuleUnavailable(LoadError::NotConfigured) => {
            BackendFailure::ConfigurationMissing
        }
        HookError::ModuleUnavailable(e) => BackendFailure::SpawnFailure(e.to_string()),
        e @ (HookError::CallFailed { .. } | HookError::TypeMismatch { .. }) => {
            BackendFailure::ForeignCallFailure(e.to_string())
        }
    }
}

impl BackendAdapter for InterpreterBackendAdapter {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn supports_check(&mut self) -> bool {
        match self.dispatcher.invoke(&HookCall::ChapCheck) {
            Ok(value) => value.as_bool().unwrap_or_else(|e| {
                tracing::warn!("chap_check_hook: {e}");
                false
            }),
            Err(_) => false,
        }
    }

    fn verify(&mut self, request: &ChapRequest<'_>, digest: &dyn DigestCapability) -> Verification {
        let verification = match self.decide(request, digest) {
            Ok(verification) => verification,
            Err(failure) => Verification {
                outcome: failure.into_outcome(Self::NAME),
                message: None,
            },
        };

        tracing::debug!(peer = %request.peer(), outcome = %verification.outcome, "script decision");

        verification
    }

    fn allowed_address(&mut self, candidate: Ipv4Addr) -> bool {
        let call = HookCall::AllowedAddress {
            addr: u32::from(candidate),
        };

        match self.dispatcher.invoke(&call) {
            Ok(value) => value.as_bool().unwrap_or_else(|e| {
                tracing::warn!(%candidate, "allowed_address_hook: {e}");
                self.allow_address_by_default
            }),
            Err(_) => self.allow_address_by_default,
        }
    }

    fn choose_address(&mut self, _current: Ipv4Addr) -> Option<Ipv4Addr> {
        let value = self.dispatcher.invoke(&HookCall::IpChoose).ok()?;
        if value.is_none() {
            return None;
        }

        match value.as_uint32() {
            Ok(addr) => Some(Ipv4Addr::from(addr)),
            Err(e) => {
                tracing::warn!("ip_choose_hook: {e}");
                None
            }
        }
    }

    fn notify(&mut self, event: LifecycleEvent, arg: i32) {
        // Result and failures are already logged by the dispatcher.
        let _ = self.dispatcher.invoke(&HookCall::Notifier { event, arg });
    }
}
