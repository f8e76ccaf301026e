// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::net::Ipv4Addr;

use crate::digest::DigestCapability;
use crate::event::LifecycleEvent;
use crate::outcome::Verification;
use crate::request::ChapRequest;

/// Uniform decision contract implemented by every backend strategy.
///
/// Exactly one adapter is active at a time. Every method is synchronous and
/// infallible from the engine's point of view: internal failures are logged
/// and folded into the returned decision.
pub trait BackendAdapter: Send {
    /// Short strategy name used in log lines.
    fn name(&self) -> &'static str;

    /// Whether this backend is configured and willing to check secrets.
    fn supports_check(&mut self) -> bool;

    /// Decides one CHAP attempt.
    ///
    /// Any secret obtained while deciding is wiped before this returns.
    fn verify(&mut self, request: &ChapRequest<'_>, digest: &dyn DigestCapability) -> Verification;

    /// Whether the peer may use `candidate` as its address.
    fn allowed_address(&mut self, candidate: Ipv4Addr) -> bool;

    /// Optional override of the address the engine proposes.
    ///
    /// `None` leaves the engine's choice untouched.
    fn choose_address(&mut self, current: Ipv4Addr) -> Option<Ipv4Addr>;

    /// Fire-and-forget lifecycle notification.
    fn notify(&mut self, event: LifecycleEvent, arg: i32);
}
